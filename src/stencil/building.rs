//! The builder contract: expanding a component tree into a final message.
//!
//! Builders implement the leaves (`text`, `unresolvable`); the provided
//! `build` and `resolved` drivers handle exhaustive dispatch, group
//! recursion, and the lazy formatter invocation. A resolved macro's
//! formatter runs here, not during resolution, and whatever component it
//! returns is built recursively.

use crate::stencil::component::{Component, ResolvedMacro, TextComponent, UnresolvableMacro};
use crate::stencil::error::ComposeError;
use crate::stencil::formatter::Formatter as _;

/// Consumes a component tree in order and produces the final message value.
pub trait Builder {
    type Message;

    fn text(&mut self, component: &TextComponent);

    fn unresolvable(&mut self, component: &UnresolvableMacro);

    /// Invoke the formatter and build its output. The formatter call is the
    /// one place a compose can abort with
    /// [`ComposeError::InvalidFormatterArgument`].
    fn resolved(&mut self, component: &ResolvedMacro) -> Result<(), ComposeError> {
        let produced = component.formatter.format(
            component.input.as_ref(),
            &component.context,
            &component.arguments,
        )?;
        self.build(&produced)
    }

    fn build(&mut self, component: &Component) -> Result<(), ComposeError> {
        match component {
            Component::Text(text) => {
                self.text(text);
                Ok(())
            }
            Component::Resolved(resolved) => self.resolved(resolved),
            Component::Unresolvable(unresolvable) => {
                self.unresolvable(unresolvable);
                Ok(())
            }
            Component::Group(group) => {
                for child in &group.children {
                    self.build(child)?;
                }
                Ok(())
            }
        }
    }

    fn finish(self) -> Self::Message
    where
        Self: Sized;
}

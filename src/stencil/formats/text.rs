//! Plain-string message builder.

use crate::stencil::building::Builder;
use crate::stencil::component::{FailureKind, TextComponent, UnresolvableMacro};

/// Builds the final message as one plain string.
///
/// Unresolvable macros render as visible placeholders that keep the two
/// failure kinds distinguishable: `{unknown:NAME}` when nothing is
/// registered under the macro's name, `{unmatched:NAME}` when candidates
/// existed but none accepted the bound value. Name-less macros use `_`.
#[derive(Debug, Default)]
pub struct TextBuilder {
    out: String,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Builder for TextBuilder {
    type Message = String;

    fn text(&mut self, component: &TextComponent) {
        self.out.push_str(&component.text);
    }

    fn unresolvable(&mut self, component: &UnresolvableMacro) {
        let name = component.element.name().unwrap_or("_");
        match component.failure {
            FailureKind::UnknownName => {
                self.out.push_str("{unknown:");
            }
            FailureKind::NoneApplicable => {
                self.out.push_str("{unmatched:");
            }
        }
        self.out.push_str(name);
        self.out.push('}');
    }

    fn finish(self) -> String {
        self.out
    }
}

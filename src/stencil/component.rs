//! Output-side components produced by resolution.
//!
//! A component records a resolution decision; it is not yet rendered text.
//! In particular [`ResolvedMacro`] defers the actual formatting call until a
//! builder expands it, so resolution decisions can be inspected and tested
//! without rendering side effects.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::stencil::arguments::Arguments;
use crate::stencil::context::Context;
use crate::stencil::element::Element;
use crate::stencil::formatter::Formatter;
use crate::stencil::value::Value;

/// One node of the output tree handed to a builder.
#[derive(Debug, Clone)]
pub enum Component {
    Text(TextComponent),
    Resolved(ResolvedMacro),
    Unresolvable(UnresolvableMacro),
    Group(ComponentGroup),
}

impl Component {
    pub fn from_text(text: impl Into<String>) -> Component {
        Component::Text(TextComponent { text: text.into() })
    }

    pub fn group(children: Vec<Component>) -> Component {
        Component::Group(ComponentGroup { children })
    }
}

/// A literal text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextComponent {
    pub text: String,
}

/// A macro successfully matched to a formatter. The formatter has not run
/// yet; this records which formatter would run and with what inputs.
#[derive(Clone)]
pub struct ResolvedMacro {
    pub formatter: Arc<dyn Formatter>,
    /// The bound positional value; `None` for constant formatters and for
    /// out-of-range binding indices.
    pub input: Option<Value>,
    pub context: Context,
    pub arguments: Arguments,
}

impl fmt::Debug for ResolvedMacro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedMacro")
            .field("formatter", &self.formatter.names())
            .field("input", &self.input)
            .field("context", &self.context)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// A macro that found no formatter. Builders render this as a visible
/// placeholder; it is never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvableMacro {
    /// The original macro element, for diagnostics and placeholder text.
    pub element: Element,
    pub input: Option<Value>,
    pub failure: FailureKind,
}

/// Why a macro failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// The macro named a formatter nothing is registered under.
    UnknownName,
    /// Candidates existed but none accepted the bound value.
    NoneApplicable,
}

/// An ordered group, used to splice extra components around a result (for
/// example by a post-processor wrapping its input).
#[derive(Debug, Clone, Default)]
pub struct ComponentGroup {
    pub children: Vec<Component>,
}

//! Parse-time message elements.
//!
//! The scanner turns a source string into an ordered sequence of elements.
//! The hierarchy is one closed union so downstream matching is exhaustive:
//! adding a variant is a compile error everywhere it is not handled.

use serde::Serialize;

use crate::stencil::arguments::Arguments;

/// One parsed unit of a message: a text run or a macro.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Element {
    /// A literal text run with escapes already removed.
    Text { content: String },
    /// `{}` — no name, no explicit index.
    DefaultMacro,
    /// `{2}` — no name, explicit index.
    IndexedDefaultMacro { index: usize },
    /// `{name:...}` — named, implicit index.
    NamedMacro { name: String, arguments: Arguments },
    /// `{2:name:...}` — named with an explicit index.
    CompleteMacro {
        index: usize,
        name: String,
        arguments: Arguments,
    },
    /// A macro attempt that never found a terminator; `raw` is the untouched
    /// original text from the opening `{` to end of input.
    InvalidMacro { raw: String },
}

impl Element {
    pub fn is_macro(&self) -> bool {
        !matches!(self, Element::Text { .. })
    }

    /// The macro's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Element::NamedMacro { name, .. } | Element::CompleteMacro { name, .. } => {
                Some(name.as_str())
            }
            Element::Text { .. }
            | Element::DefaultMacro
            | Element::IndexedDefaultMacro { .. }
            | Element::InvalidMacro { .. } => None,
        }
    }

    /// The explicitly authored index, if any. An explicit index always wins
    /// over the engine's implicit cursor.
    pub fn explicit_index(&self) -> Option<usize> {
        match self {
            Element::IndexedDefaultMacro { index } | Element::CompleteMacro { index, .. } => {
                Some(*index)
            }
            Element::Text { .. }
            | Element::DefaultMacro
            | Element::NamedMacro { .. }
            | Element::InvalidMacro { .. } => None,
        }
    }

    pub fn arguments(&self) -> &Arguments {
        match self {
            Element::NamedMacro { arguments, .. } | Element::CompleteMacro { arguments, .. } => {
                arguments
            }
            Element::Text { .. }
            | Element::DefaultMacro
            | Element::IndexedDefaultMacro { .. }
            | Element::InvalidMacro { .. } => Arguments::none(),
        }
    }
}

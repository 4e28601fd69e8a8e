//! Constant formatters: fixed output, no bound value.

use crate::stencil::arguments::Arguments;
use crate::stencil::component::Component;
use crate::stencil::context::Context;
use crate::stencil::error::ComposeError;
use crate::stencil::formatter::Formatter;
use crate::stencil::value::Value;

/// Emits a fixed text fragment. Constant: never receives a bound value and
/// never consumes a positional slot.
pub struct ConstantText {
    names: Vec<&'static str>,
    text: String,
}

impl ConstantText {
    pub fn new(names: &[&'static str], text: impl Into<String>) -> Self {
        Self {
            names: names.to_vec(),
            text: text.into(),
        }
    }

    /// The `{br}` / `{newline}` line-break constant.
    pub fn newline() -> Self {
        Self::new(&["br", "newline"], "\n")
    }
}

impl Formatter for ConstantText {
    fn names(&self) -> &[&'static str] {
        &self.names
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn is_applicable(&self, _value: Option<&Value>) -> bool {
        true
    }

    fn format(
        &self,
        _value: Option<&Value>,
        _context: &Context,
        _arguments: &Arguments,
    ) -> Result<Component, ComposeError> {
        Ok(Component::from_text(self.text.clone()))
    }
}

//! Fallback formatter rendering any value via its display form.

use crate::stencil::arguments::Arguments;
use crate::stencil::component::Component;
use crate::stencil::context::Context;
use crate::stencil::error::ComposeError;
use crate::stencil::formatter::Formatter;
use crate::stencil::value::Value;

/// Accepts any present value and renders its display form. Usually
/// registered as the default formatter so `{}` works out of the box.
#[derive(Debug, Default)]
pub struct StringifyFormatter;

impl Formatter for StringifyFormatter {
    fn names(&self) -> &[&'static str] {
        &["string"]
    }

    fn is_applicable(&self, value: Option<&Value>) -> bool {
        value.is_some()
    }

    fn format(
        &self,
        value: Option<&Value>,
        _context: &Context,
        _arguments: &Arguments,
    ) -> Result<Component, ComposeError> {
        let text = value.map(|v| v.to_string()).unwrap_or_default();
        Ok(Component::from_text(text))
    }
}

//! Post-processor wrapping a component in prefix/suffix text.

use crate::stencil::arguments::Arguments;
use crate::stencil::component::Component;
use crate::stencil::context::Context;
use crate::stencil::processor::PostProcessor;

/// Wraps its input into a group `[prefix, component, suffix]`. Attach it
/// scoped to a formatter to decorate only that formatter's output, or
/// globally to decorate every top-level component.
pub struct SurroundProcessor {
    prefix: String,
    suffix: String,
}

impl SurroundProcessor {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl PostProcessor for SurroundProcessor {
    fn process(
        &self,
        component: Component,
        _context: &Context,
        _arguments: &Arguments,
    ) -> Component {
        Component::group(vec![
            Component::from_text(self.prefix.clone()),
            component,
            Component::from_text(self.suffix.clone()),
        ])
    }
}

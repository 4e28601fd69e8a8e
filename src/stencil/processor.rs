//! The post-processing capability contract.

use crate::stencil::arguments::Arguments;
use crate::stencil::component::Component;
use crate::stencil::context::Context;

/// Transforms an already-produced component.
///
/// A post-processor may be attached globally to a composer, where it runs for
/// every top-level component, or scoped to one registered formatter, where it
/// runs only on components resolved to that formatter and strictly before any
/// global post-processor sees them. Processors receive the macro's arguments
/// (the shared empty instance for text components) and may return the
/// component unchanged, a replacement, or a wrapping
/// [`ComponentGroup`](crate::stencil::component::ComponentGroup).
pub trait PostProcessor: Send + Sync {
    fn process(&self, component: Component, context: &Context, arguments: &Arguments)
        -> Component;
}

//! The formatter capability contract and the composer-owned registry.
//!
//! Formatters are registered under each of their declared trigger names.
//! The registry belongs to one composer instance; there are no process-wide
//! tables. Scoped post-processors live on the registry entry of the
//! formatter they target.

use std::collections::HashMap;
use std::sync::Arc;

use crate::stencil::arguments::Arguments;
use crate::stencil::component::Component;
use crate::stencil::context::Context;
use crate::stencil::error::{ComposeError, RegistrationError};
use crate::stencil::processor::PostProcessor;
use crate::stencil::value::Value;

/// Converts one bound value into an output component.
///
/// A constant formatter (`is_constant() == true`) never receives a bound
/// value and never consumes a positional slot; its `format` is called with
/// `None`. During resolution, constant formatters are always applicable but
/// are selected only as a fallback when no non-constant candidate applies.
pub trait Formatter: Send + Sync {
    /// The trigger names this formatter is indexed under. Must be non-empty.
    fn names(&self) -> &[&'static str];

    fn is_constant(&self) -> bool {
        false
    }

    /// Whether this formatter accepts the value bound to the macro. The
    /// value is `None` when the binding index is out of range of the
    /// supplied arguments.
    fn is_applicable(&self, value: Option<&Value>) -> bool;

    /// Produce the output component. Invoked lazily by a builder, never
    /// during resolution. Returning an error aborts the whole compose call;
    /// reserve it for semantically invalid macro arguments.
    fn format(
        &self,
        value: Option<&Value>,
        context: &Context,
        arguments: &Arguments,
    ) -> Result<Component, ComposeError>;
}

/// Handle to a formatter registered with one composer, used to attach scoped
/// post-processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatterId(usize);

pub(crate) struct FormatterEntry {
    pub(crate) formatter: Arc<dyn Formatter>,
    pub(crate) processors: Vec<Arc<dyn PostProcessor>>,
}

/// The name→formatter index owned by a composer.
#[derive(Default)]
pub struct FormatterRegistry {
    entries: Vec<FormatterEntry>,
    by_name: HashMap<String, Vec<usize>>,
    defaults: Vec<usize>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `formatter` under each of its declared names. Registration
    /// order is preserved per name and decides candidate order during
    /// resolution.
    pub fn register(
        &mut self,
        formatter: Arc<dyn Formatter>,
    ) -> Result<FormatterId, RegistrationError> {
        let names = formatter.names();
        if names.is_empty() {
            return Err(RegistrationError::NoNames);
        }
        let id = self.entries.len();
        for name in names {
            self.by_name.entry((*name).to_string()).or_default().push(id);
        }
        self.entries.push(FormatterEntry {
            formatter,
            processors: Vec::new(),
        });
        Ok(FormatterId(id))
    }

    /// Register and additionally add to the default set consulted by
    /// name-less macros.
    pub fn register_default(
        &mut self,
        formatter: Arc<dyn Formatter>,
    ) -> Result<FormatterId, RegistrationError> {
        let id = self.register(formatter)?;
        self.defaults.push(id.0);
        Ok(id)
    }

    /// Attach a post-processor scoped to one registered formatter.
    pub fn attach_processor(
        &mut self,
        id: FormatterId,
        processor: Arc<dyn PostProcessor>,
    ) -> Result<(), RegistrationError> {
        match self.entries.get_mut(id.0) {
            Some(entry) => {
                entry.processors.push(processor);
                Ok(())
            }
            None => Err(RegistrationError::UnknownFormatter),
        }
    }

    /// Candidate entries registered under `name`, in registration order.
    pub(crate) fn lookup(&self, name: &str) -> Option<&[usize]> {
        self.by_name.get(name).map(Vec::as_slice)
    }

    pub(crate) fn defaults(&self) -> &[usize] {
        &self.defaults
    }

    pub(crate) fn entry(&self, index: usize) -> &FormatterEntry {
        &self.entries[index]
    }
}

//! The resolution/composition engine.
//!
//! A [`Composer`] owns a formatter registry and a list of global
//! post-processors, both populated during a single-threaded setup phase and
//! read-only afterwards. Each compose call parses the source, walks the
//! element sequence with an implicit positional cursor as its only mutable
//! state, matches formatters, threads post-processors, and expands the
//! resulting component tree through a builder.

use std::sync::Arc;

use crate::stencil::arguments::Arguments;
use crate::stencil::building::Builder;
use crate::stencil::component::{
    Component, FailureKind, ResolvedMacro, TextComponent, UnresolvableMacro,
};
use crate::stencil::context::Context;
use crate::stencil::element::Element;
use crate::stencil::error::{ComposeError, RegistrationError};
use crate::stencil::formats::constant::ConstantText;
use crate::stencil::formats::number::NumberFormatter;
use crate::stencil::formats::stringify::StringifyFormatter;
use crate::stencil::formats::text::TextBuilder;
use crate::stencil::formatter::{Formatter, FormatterId, FormatterRegistry};
use crate::stencil::processor::PostProcessor;
use crate::stencil::scanning;
use crate::stencil::value::Value;

/// The composing engine.
pub struct Composer {
    registry: FormatterRegistry,
    processors: Vec<Arc<dyn PostProcessor>>,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            registry: FormatterRegistry::new(),
            processors: Vec::new(),
        }
    }

    /// A composer pre-loaded with the crate's standard formats: stringify as
    /// the default formatter, the number formatter, and the newline
    /// constant.
    pub fn with_standard_formats() -> Result<Self, RegistrationError> {
        let mut composer = Composer::new();
        composer.register_default_formatter(Arc::new(StringifyFormatter))?;
        composer.register_formatter(Arc::new(NumberFormatter::new()))?;
        composer.register_formatter(Arc::new(ConstantText::newline()))?;
        Ok(composer)
    }

    /// Index a formatter under each of its declared names. Fails if the
    /// formatter declares no names.
    pub fn register_formatter(
        &mut self,
        formatter: Arc<dyn Formatter>,
    ) -> Result<FormatterId, RegistrationError> {
        self.registry.register(formatter)
    }

    /// Register a formatter and add it to the default set consulted by
    /// name-less macros, in registration order.
    pub fn register_default_formatter(
        &mut self,
        formatter: Arc<dyn Formatter>,
    ) -> Result<FormatterId, RegistrationError> {
        self.registry.register_default(formatter)
    }

    /// Add a global post-processor; it runs for every top-level component,
    /// after any scoped post-processors.
    pub fn add_post_processor(&mut self, processor: Arc<dyn PostProcessor>) {
        self.processors.push(processor);
    }

    /// Attach a post-processor to one registered formatter. It runs exactly
    /// once per macro resolved to that formatter, before any global
    /// post-processor.
    pub fn add_scoped_post_processor(
        &mut self,
        id: FormatterId,
        processor: Arc<dyn PostProcessor>,
    ) -> Result<(), RegistrationError> {
        self.registry.attach_processor(id, processor)
    }

    /// Resolve a source message against positional arguments without
    /// rendering anything. Formatters are matched but not invoked, so
    /// resolution decisions can be inspected independent of rendering.
    pub fn resolve(&self, context: &Context, source: &str, args: &[Value]) -> Vec<Component> {
        let elements = scanning::parse(source);
        let mut components = Vec::with_capacity(elements.len());
        // The implicit cursor is the only engine state that persists across
        // the element walk.
        let mut cursor = 0usize;
        for element in elements {
            let component = match element {
                Element::Text { content } => self.post_process(
                    Component::Text(TextComponent { text: content }),
                    None,
                    context,
                    Arguments::none(),
                ),
                // Recovered literal text; rendering must reproduce it
                // byte for byte.
                Element::InvalidMacro { raw } => self.post_process(
                    Component::Text(TextComponent { text: raw }),
                    None,
                    context,
                    Arguments::none(),
                ),
                macro_element => self.resolve_macro(macro_element, context, args, &mut cursor),
            };
            components.push(component);
        }
        components
    }

    /// Compose with the process-wide default context and the plain-text
    /// builder.
    pub fn compose(&self, source: &str, args: &[Value]) -> Result<String, ComposeError> {
        self.compose_with(Context::default_global(), source, args)
    }

    /// Compose with an explicit context and the plain-text builder.
    pub fn compose_with(
        &self,
        context: &Context,
        source: &str,
        args: &[Value],
    ) -> Result<String, ComposeError> {
        self.compose_into(context, source, args, TextBuilder::new())
    }

    /// Compose into an arbitrary builder.
    pub fn compose_into<B: Builder>(
        &self,
        context: &Context,
        source: &str,
        args: &[Value],
        mut builder: B,
    ) -> Result<B::Message, ComposeError> {
        for component in self.resolve(context, source, args) {
            builder.build(&component)?;
        }
        Ok(builder.finish())
    }

    fn resolve_macro(
        &self,
        element: Element,
        context: &Context,
        args: &[Value],
        cursor: &mut usize,
    ) -> Component {
        // The macro's own index wins; otherwise bind at the implicit cursor.
        let explicit = element.explicit_index();
        let binding = explicit.unwrap_or(*cursor);
        // Out of range is not an error; the formatter sees `None`.
        let bound = args.get(binding);

        let candidates: &[usize] = match element.name() {
            Some(name) => match self.registry.lookup(name) {
                Some(ids) => ids,
                None => {
                    let arguments = element.arguments().clone();
                    let component = Component::Unresolvable(UnresolvableMacro {
                        element,
                        input: bound.cloned(),
                        failure: FailureKind::UnknownName,
                    });
                    return self.post_process(component, None, context, &arguments);
                }
            },
            None => self.registry.defaults(),
        };

        // First applicable non-constant candidate wins; a constant candidate
        // is kept only as a fallback.
        let mut chosen = None;
        let mut constant_fallback = None;
        for &index in candidates {
            let formatter = &self.registry.entry(index).formatter;
            if formatter.is_constant() {
                if constant_fallback.is_none() {
                    constant_fallback = Some(index);
                }
            } else if formatter.is_applicable(bound) {
                chosen = Some(index);
                break;
            }
        }

        match chosen.or(constant_fallback) {
            Some(index) => {
                let entry = self.registry.entry(index);
                let constant = entry.formatter.is_constant();
                // Only a non-constant match on the implicit index consumes a
                // positional slot.
                if explicit.is_none() && !constant {
                    *cursor += 1;
                }
                let arguments = element.arguments().clone();
                let component = Component::Resolved(ResolvedMacro {
                    formatter: Arc::clone(&entry.formatter),
                    input: if constant { None } else { bound.cloned() },
                    context: context.clone(),
                    arguments: arguments.clone(),
                });
                self.post_process(component, Some(index), context, &arguments)
            }
            None => {
                let arguments = element.arguments().clone();
                let component = Component::Unresolvable(UnresolvableMacro {
                    element,
                    input: bound.cloned(),
                    failure: FailureKind::NoneApplicable,
                });
                self.post_process(component, None, context, &arguments)
            }
        }
    }

    /// Scoped post-processors of the matched formatter first, then the
    /// globals, each in registration order.
    fn post_process(
        &self,
        mut component: Component,
        matched: Option<usize>,
        context: &Context,
        arguments: &Arguments,
    ) -> Component {
        if let Some(index) = matched {
            for processor in &self.registry.entry(index).processors {
                component = processor.process(component, context, arguments);
            }
        }
        for processor in &self.processors {
            component = processor.process(component, context, arguments);
        }
        component
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

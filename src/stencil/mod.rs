//! Main module for stencil library functionality

pub mod arguments;
pub mod building;
pub mod component;
pub mod composing;
pub mod context;
pub mod element;
pub mod error;
pub mod formats;
pub mod formatter;
pub mod processor;
pub mod scanning;
pub mod value;

pub use arguments::{ArgumentToken, Arguments};
pub use building::Builder;
pub use component::{
    Component, ComponentGroup, FailureKind, ResolvedMacro, TextComponent, UnresolvableMacro,
};
pub use composing::Composer;
pub use context::{Context, Property};
pub use element::Element;
pub use error::{ComposeError, RegistrationError};
pub use formatter::{Formatter, FormatterId, FormatterRegistry};
pub use processor::PostProcessor;
pub use value::{Value, ValueKind};

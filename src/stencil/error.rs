//! Error types for composition and setup.
//!
//! The error surface is deliberately narrow. Malformed macros and resolution
//! failures are values (literal text and [`UnresolvableMacro`] components),
//! never errors; only a semantically invalid argument handed to a matched
//! formatter aborts a compose call, and only an invalid formatter definition
//! fails registration.
//!
//! [`UnresolvableMacro`]: crate::stencil::component::UnresolvableMacro

use std::fmt;

/// A fatal compose-time error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A matched formatter was given a semantically invalid argument, e.g. a
    /// non-numeric precision. The macro itself was correct, so this is bad
    /// caller configuration and aborts the whole compose call.
    InvalidFormatterArgument {
        formatter: String,
        argument: String,
        reason: String,
    },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::InvalidFormatterArgument {
                formatter,
                argument,
                reason,
            } => {
                write!(
                    f,
                    "Invalid argument '{}' for formatter '{}': {}",
                    argument, formatter, reason
                )
            }
        }
    }
}

impl std::error::Error for ComposeError {}

/// A setup-phase error raised while registering capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// A formatter must declare at least one trigger name.
    NoNames,
    /// The target of a scoped post-processor is not registered with this
    /// composer.
    UnknownFormatter,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::NoNames => {
                write!(f, "Formatter declares no trigger names")
            }
            RegistrationError::UnknownFormatter => {
                write!(
                    f,
                    "Scoped post-processor targets a formatter not registered with this composer"
                )
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

//! Concrete builders, formatters, and post-processors.
//!
//! The engine core only defines and drives the capability contracts; the
//! working set shipped here makes the crate usable end to end: a plain-text
//! builder, the stringify and number formatters, a constant-text formatter,
//! and a wrapping post-processor.

pub mod constant;
pub mod number;
pub mod stringify;
pub mod surround;
pub mod text;

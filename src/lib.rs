//! # stencil
//!
//! A message-templating engine.
//!
//! A source string interleaves literal text with macros of the form
//! `{[[index:]name[#label][:arg]*]}`. Composing resolves each macro against a
//! positional argument list and a registry of formatters, honoring an
//! immutable render context and optional post-processing, and expands the
//! resulting component tree through a builder into the final message.
//!
//! The pipeline:
//!
//! ```text
//! source + args + context
//!   -> scanner (element sequence, total, recovers malformed macros)
//!   -> composer (formatter matching, positional bookkeeping, post-processing)
//!   -> component tree
//!   -> builder (lazy formatter invocation)
//!   -> rendered message
//! ```
//!
//! Malformed or unresolvable macros never prevent the rest of a message from
//! rendering: broken syntax degrades to literal text and failed lookups
//! become visible placeholder components.

pub mod stencil;

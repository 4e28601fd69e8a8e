//! Per-macro argument storage.
//!
//! The scanner produces raw [`ArgumentToken`]s; [`Arguments`] aggregates them
//! into an ordered list of value texts (order-preserving, not deduplicated)
//! and a name→value map whose keys are compared case-insensitively.
//!
//! Duplicate parameter names (after case folding) keep the last occurrence.
//! This mirrors observed insertion-order behavior and is an assumption, not a
//! confirmed contract.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// A single raw argument token as written in the macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArgumentToken {
    /// An unnamed value acting as a flag or switch, e.g. `{number:grouping}`.
    Value(String),
    /// A named parameter, e.g. `{number:precision=2}`.
    Parameter { name: String, value: String },
}

/// The aggregated argument list of one macro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Arguments {
    values: Vec<String>,
    parameters: HashMap<String, String>,
}

static NONE: Lazy<Arguments> = Lazy::new(Arguments::default);

impl Arguments {
    /// The shared "no arguments" instance used by argument-less macros.
    pub fn none() -> &'static Arguments {
        &NONE
    }

    pub fn from_tokens(tokens: Vec<ArgumentToken>) -> Self {
        let mut values = Vec::new();
        let mut parameters = HashMap::new();
        for token in tokens {
            match token {
                ArgumentToken::Value(text) => values.push(text),
                ArgumentToken::Parameter { name, value } => {
                    // Last occurrence wins for duplicate case-folded names.
                    parameters.insert(name.to_lowercase(), value);
                }
            }
        }
        Self { values, parameters }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.parameters.is_empty()
    }

    /// The unnamed value at position `index`, in authoring order.
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Look up a named parameter; names are case-insensitive.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn parameter_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.parameter(name).unwrap_or(default)
    }

    /// Exact match against the unnamed values.
    pub fn contains_value(&self, text: &str) -> bool {
        self.values.iter().any(|value| value == text)
    }

    pub fn contains_value_ignoring_case(&self, text: &str) -> bool {
        let folded = text.to_lowercase();
        self.values.iter().any(|value| value.to_lowercase() == folded)
    }
}

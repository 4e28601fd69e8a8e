//! Numeric formatter with precision and digit-grouping arguments.

use std::collections::HashMap;

use crate::stencil::arguments::Arguments;
use crate::stencil::component::Component;
use crate::stencil::context::Context;
use crate::stencil::error::ComposeError;
use crate::stencil::formatter::Formatter;
use crate::stencil::value::{Value, ValueKind};

type Handler = fn(&Value, &NumberOptions) -> String;

/// Formats `Int` and `Float` values.
///
/// Arguments: `precision=N` fixes the number of decimal places; the value
/// flag `grouping` inserts thousands separators. A non-numeric `precision`
/// aborts the compose call — the macro matched, so the bad argument is
/// caller configuration, not a recoverable resolution failure.
///
/// Dispatch goes through a type-tag table built once at construction; no
/// runtime type probing.
pub struct NumberFormatter {
    table: HashMap<ValueKind, Handler>,
}

impl NumberFormatter {
    pub fn new() -> Self {
        let mut table: HashMap<ValueKind, Handler> = HashMap::new();
        table.insert(ValueKind::Int, format_int);
        table.insert(ValueKind::Float, format_float);
        Self { table }
    }
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for NumberFormatter {
    fn names(&self) -> &[&'static str] {
        &["number"]
    }

    fn is_applicable(&self, value: Option<&Value>) -> bool {
        value.is_some_and(|v| self.table.contains_key(&v.kind()))
    }

    fn format(
        &self,
        value: Option<&Value>,
        _context: &Context,
        arguments: &Arguments,
    ) -> Result<Component, ComposeError> {
        let options = NumberOptions::from_arguments(arguments)?;
        let text = match value {
            Some(v) => match self.table.get(&v.kind()) {
                Some(handler) => handler(v, &options),
                // Applicability gates the call; fall back to the display
                // form rather than guessing.
                None => v.to_string(),
            },
            None => String::new(),
        };
        Ok(Component::from_text(text))
    }
}

struct NumberOptions {
    precision: Option<usize>,
    grouping: bool,
}

impl NumberOptions {
    fn from_arguments(arguments: &Arguments) -> Result<Self, ComposeError> {
        let precision = match arguments.parameter("precision") {
            Some(raw) => {
                let parsed =
                    raw.parse::<usize>()
                        .map_err(|_| ComposeError::InvalidFormatterArgument {
                            formatter: "number".to_string(),
                            argument: format!("precision={}", raw),
                            reason: "precision must be a non-negative integer".to_string(),
                        })?;
                Some(parsed)
            }
            None => None,
        };
        Ok(Self {
            precision,
            grouping: arguments.contains_value_ignoring_case("grouping"),
        })
    }
}

fn format_int(value: &Value, options: &NumberOptions) -> String {
    let rendered = match value {
        Value::Int(n) => n.to_string(),
        other => other.to_string(),
    };
    let rendered = if options.grouping {
        group_integer(&rendered)
    } else {
        rendered
    };
    match options.precision {
        Some(precision) if precision > 0 => {
            format!("{}.{}", rendered, "0".repeat(precision))
        }
        _ => rendered,
    }
}

fn format_float(value: &Value, options: &NumberOptions) -> String {
    let x = match value {
        Value::Float(x) => *x,
        other => return other.to_string(),
    };
    let rendered = match options.precision {
        Some(precision) => format!("{:.*}", precision, x),
        None => format!("{}", x),
    };
    if options.grouping {
        match rendered.split_once('.') {
            Some((integer, fraction)) => {
                format!("{}.{}", group_integer(integer), fraction)
            }
            None => group_integer(&rendered),
        }
    } else {
        rendered
    }
}

/// Insert `,` separators into a (possibly signed) run of integer digits.
fn group_integer(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::with_capacity(sign.len() + chars.len() + chars.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stencil::arguments::ArgumentToken;
    use crate::stencil::component::TextComponent;

    fn args(tokens: Vec<ArgumentToken>) -> Arguments {
        Arguments::from_tokens(tokens)
    }

    fn render(value: Value, arguments: &Arguments) -> Result<String, ComposeError> {
        let component = NumberFormatter::new().format(
            Some(&value),
            Context::default_global(),
            arguments,
        )?;
        match component {
            Component::Text(TextComponent { text }) => Ok(text),
            other => panic!("Unexpected component: {:?}", other),
        }
    }

    #[test]
    fn applicability_follows_the_dispatch_table() {
        let formatter = NumberFormatter::new();
        assert!(formatter.is_applicable(Some(&Value::from(1))));
        assert!(formatter.is_applicable(Some(&Value::from(1.5))));
        assert!(!formatter.is_applicable(Some(&Value::from("1"))));
        assert!(!formatter.is_applicable(Some(&Value::from(true))));
        assert!(!formatter.is_applicable(None));
    }

    #[test]
    fn plain_rendering() {
        assert_eq!(render(Value::from(42), Arguments::none()).unwrap(), "42");
        assert_eq!(render(Value::from(2.5), Arguments::none()).unwrap(), "2.5");
    }

    #[test]
    fn precision_pads_and_rounds() {
        let two = args(vec![ArgumentToken::Parameter {
            name: "precision".to_string(),
            value: "2".to_string(),
        }]);
        assert_eq!(render(Value::from(10), &two).unwrap(), "10.00");
        assert_eq!(render(Value::from(2.345), &two).unwrap(), "2.35");
        assert_eq!(render(Value::from(1.0), &two).unwrap(), "1.00");
    }

    #[test]
    fn grouping_inserts_separators() {
        let grouping = args(vec![ArgumentToken::Value("grouping".to_string())]);
        assert_eq!(
            render(Value::from(1234567), &grouping).unwrap(),
            "1,234,567"
        );
        assert_eq!(render(Value::from(-1234), &grouping).unwrap(), "-1,234");
        assert_eq!(render(Value::from(123), &grouping).unwrap(), "123");
        assert_eq!(
            render(Value::from(9876.54), &grouping).unwrap(),
            "9,876.54"
        );
    }

    #[test]
    fn non_numeric_precision_is_fatal() {
        let bad = args(vec![ArgumentToken::Parameter {
            name: "precision".to_string(),
            value: "lots".to_string(),
        }]);
        let error = render(Value::from(1), &bad).unwrap_err();
        match error {
            ComposeError::InvalidFormatterArgument {
                formatter,
                argument,
                ..
            } => {
                assert_eq!(formatter, "number");
                assert_eq!(argument, "precision=lots");
            }
        }
    }
}

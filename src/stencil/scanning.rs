//! The message tokenizer/parser.
//!
//! A single forward pass over the source string driven by an explicit state
//! machine. The grammar, informally:
//!
//! ```text
//! message  := (text-run | macro)*
//! macro    := '{' [index ':'] [name ['#' label] (':' argument)*] '}'
//! argument := value | name '=' value
//! ```
//!
//! Escaping is lexical-context-dependent; a backslash escapes a different
//! character set depending on where the scanner currently is:
//!
//! - plain text: `{`, `\`
//! - macro name and label: `}`, `:`, `\`
//! - argument name: `=`, `:`, `}`, `\`
//! - argument value: `:`, `}`, `\`
//!
//! A backslash before any other character stays a literal backslash, except
//! inside a macro name, where it is an invalid character and triggers
//! recovery.
//!
//! Parsing is total: malformed input never fails. A character that is not
//! valid in the current state abandons the in-progress macro and re-emits the
//! consumed `{` plus every raw character since (including the offender) as
//! literal text, resuming plain-text scanning immediately after. End of input
//! inside a macro emits [`Element::InvalidMacro`] carrying the untouched
//! original text, so broken input is byte-for-byte recoverable.

use crate::stencil::arguments::{ArgumentToken, Arguments};
use crate::stencil::element::Element;

/// Parse a source string into its ordered element sequence. Total; never
/// fails on malformed input.
pub fn parse(source: &str) -> Vec<Element> {
    Scanner::new(source).run()
}

/// Scanner states. `Arguments` from the grammar splits into `ArgName` and
/// `ArgValue` here because the two positions escape different sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    Start,
    Pos,
    Name,
    Label,
    ArgName,
    ArgValue,
}

/// Buffers for the macro attempt currently being scanned.
///
/// `raw` records every character consumed since the opening `{` exactly as
/// written (escape backslashes included) so recovery and unterminated-macro
/// handling can reproduce the source text.
#[derive(Default)]
struct Attempt {
    raw: String,
    index: usize,
    has_index: bool,
    zero_first: bool,
    name: String,
    tokens: Vec<ArgumentToken>,
    arg_name: String,
    arg_value: String,
}

impl Attempt {
    fn reset(&mut self) {
        *self = Attempt::default();
    }

    /// Finish the current `value`-style argument, if any text accumulated.
    fn finish_value_token(&mut self) {
        let text = std::mem::take(&mut self.arg_name);
        if !text.is_empty() {
            self.tokens.push(ArgumentToken::Value(text));
        }
    }

    /// Finish the current `name=value` argument.
    fn finish_parameter_token(&mut self) {
        let name = std::mem::take(&mut self.arg_name);
        let value = std::mem::take(&mut self.arg_value);
        self.tokens.push(ArgumentToken::Parameter { name, value });
    }

    /// Commit the attempt into a macro element. An empty name yields the
    /// default variants; any buffered arguments belong to a name and are
    /// dropped without one.
    fn into_macro(&mut self) -> Element {
        let name = std::mem::take(&mut self.name);
        let tokens = std::mem::take(&mut self.tokens);
        let element = if name.is_empty() {
            if self.has_index {
                Element::IndexedDefaultMacro { index: self.index }
            } else {
                Element::DefaultMacro
            }
        } else {
            let arguments = Arguments::from_tokens(tokens);
            if self.has_index {
                Element::CompleteMacro {
                    index: self.index,
                    name,
                    arguments,
                }
            } else {
                Element::NamedMacro { name, arguments }
            }
        };
        self.reset();
        element
    }
}

struct Scanner {
    chars: Vec<char>,
    elements: Vec<Element>,
    text: String,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            elements: Vec::new(),
            text: String::new(),
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.elements.push(Element::Text {
                content: std::mem::take(&mut self.text),
            });
        }
    }

    fn commit(&mut self, element: Element) {
        self.flush_text();
        self.elements.push(element);
    }

    /// Abandon the attempt: re-emit the consumed `{`, everything buffered,
    /// and the offending character as literal text. The caller resumes
    /// plain-text scanning right after the offender.
    fn recover(&mut self, attempt: &mut Attempt, offending: char) {
        self.text.push('{');
        self.text.push_str(&attempt.raw);
        self.text.push(offending);
        attempt.reset();
    }

    fn run(mut self) -> Vec<Element> {
        let mut state = State::None;
        let mut attempt = Attempt::default();
        let mut i = 0;

        while i < self.chars.len() {
            let ch = self.chars[i];
            let next = self.chars.get(i + 1).copied();

            match state {
                State::None => match ch {
                    '\\' => match next {
                        Some(escaped @ ('{' | '\\')) => {
                            self.text.push(escaped);
                            i += 2;
                        }
                        _ => {
                            self.text.push('\\');
                            i += 1;
                        }
                    },
                    '{' => {
                        attempt.reset();
                        state = State::Start;
                        i += 1;
                    }
                    _ => {
                        self.text.push(ch);
                        i += 1;
                    }
                },

                State::Start => match ch {
                    '}' => {
                        self.commit(Element::DefaultMacro);
                        state = State::None;
                        i += 1;
                    }
                    digit if digit.is_ascii_digit() => {
                        attempt.raw.push(digit);
                        attempt.index = digit as usize - '0' as usize;
                        attempt.has_index = true;
                        attempt.zero_first = digit == '0';
                        state = State::Pos;
                        i += 1;
                    }
                    letter if letter.is_alphabetic() => {
                        attempt.raw.push(letter);
                        attempt.name.push(letter);
                        state = State::Name;
                        i += 1;
                    }
                    _ => {
                        self.recover(&mut attempt, ch);
                        state = State::None;
                        i += 1;
                    }
                },

                State::Pos => match ch {
                    digit if digit.is_ascii_digit() => {
                        // Horner accumulation; a leading zero never starts a
                        // multi-digit index, and overflow is not an index.
                        let accumulated = if attempt.zero_first {
                            None
                        } else {
                            attempt
                                .index
                                .checked_mul(10)
                                .and_then(|v| v.checked_add(digit as usize - '0' as usize))
                        };
                        match accumulated {
                            Some(index) => {
                                attempt.index = index;
                                attempt.raw.push(digit);
                                i += 1;
                            }
                            None => {
                                self.recover(&mut attempt, ch);
                                state = State::None;
                                i += 1;
                            }
                        }
                    }
                    ':' => {
                        attempt.raw.push(':');
                        state = State::Name;
                        i += 1;
                    }
                    '}' => {
                        let element = attempt.into_macro();
                        self.commit(element);
                        state = State::None;
                        i += 1;
                    }
                    _ => {
                        self.recover(&mut attempt, ch);
                        state = State::None;
                        i += 1;
                    }
                },

                State::Name => match ch {
                    '\\' => match next {
                        Some(escaped @ ('}' | ':' | '\\')) => {
                            attempt.raw.push('\\');
                            attempt.raw.push(escaped);
                            attempt.name.push(escaped);
                            i += 2;
                        }
                        // A backslash escaping nothing is not a name
                        // character.
                        _ => {
                            self.recover(&mut attempt, ch);
                            state = State::None;
                            i += 1;
                        }
                    },
                    '#' => {
                        attempt.raw.push('#');
                        state = State::Label;
                        i += 1;
                    }
                    ':' => {
                        attempt.raw.push(':');
                        state = State::ArgName;
                        i += 1;
                    }
                    '}' => {
                        let element = attempt.into_macro();
                        self.commit(element);
                        state = State::None;
                        i += 1;
                    }
                    word if word.is_alphanumeric() => {
                        attempt.raw.push(word);
                        attempt.name.push(word);
                        i += 1;
                    }
                    _ => {
                        self.recover(&mut attempt, ch);
                        state = State::None;
                        i += 1;
                    }
                },

                // The label is documentation only: consumed and discarded.
                State::Label => match ch {
                    '\\' => match next {
                        Some(escaped @ ('}' | ':' | '\\')) => {
                            attempt.raw.push('\\');
                            attempt.raw.push(escaped);
                            i += 2;
                        }
                        _ => {
                            attempt.raw.push('\\');
                            i += 1;
                        }
                    },
                    ':' => {
                        attempt.raw.push(':');
                        state = State::ArgName;
                        i += 1;
                    }
                    '}' => {
                        let element = attempt.into_macro();
                        self.commit(element);
                        state = State::None;
                        i += 1;
                    }
                    _ => {
                        attempt.raw.push(ch);
                        i += 1;
                    }
                },

                State::ArgName => match ch {
                    '\\' => match next {
                        Some(escaped @ ('=' | ':' | '}' | '\\')) => {
                            attempt.raw.push('\\');
                            attempt.raw.push(escaped);
                            attempt.arg_name.push(escaped);
                            i += 2;
                        }
                        _ => {
                            attempt.raw.push('\\');
                            attempt.arg_name.push('\\');
                            i += 1;
                        }
                    },
                    '=' => {
                        attempt.raw.push('=');
                        state = State::ArgValue;
                        i += 1;
                    }
                    ':' => {
                        attempt.raw.push(':');
                        attempt.finish_value_token();
                        i += 1;
                    }
                    '}' => {
                        attempt.finish_value_token();
                        let element = attempt.into_macro();
                        self.commit(element);
                        state = State::None;
                        i += 1;
                    }
                    _ => {
                        attempt.raw.push(ch);
                        attempt.arg_name.push(ch);
                        i += 1;
                    }
                },

                State::ArgValue => match ch {
                    '\\' => match next {
                        Some(escaped @ (':' | '}' | '\\')) => {
                            attempt.raw.push('\\');
                            attempt.raw.push(escaped);
                            attempt.arg_value.push(escaped);
                            i += 2;
                        }
                        _ => {
                            attempt.raw.push('\\');
                            attempt.arg_value.push('\\');
                            i += 1;
                        }
                    },
                    ':' => {
                        attempt.raw.push(':');
                        attempt.finish_parameter_token();
                        state = State::ArgName;
                        i += 1;
                    }
                    '}' => {
                        attempt.finish_parameter_token();
                        let element = attempt.into_macro();
                        self.commit(element);
                        state = State::None;
                        i += 1;
                    }
                    _ => {
                        attempt.raw.push(ch);
                        attempt.arg_value.push(ch);
                        i += 1;
                    }
                },
            }
        }

        // End of input inside a macro: the attempt was never terminated.
        if state == State::None {
            self.flush_text();
        } else {
            self.flush_text();
            self.elements.push(Element::InvalidMacro {
                raw: format!("{{{}", attempt.raw),
            });
        }
        self.elements
    }
}

//! Parameterized grammar and recovery tests for the macro scanner.

use rstest::rstest;

use stencil::stencil::arguments::{ArgumentToken, Arguments};
use stencil::stencil::element::Element;
use stencil::stencil::scanning::parse;

/// Concatenate the literal rendering of a recovered parse: text content plus
/// invalid-macro raw text. Panics if any real macro survived.
fn rendered_literal(elements: &[Element]) -> String {
    let mut out = String::new();
    for element in elements {
        match element {
            Element::Text { content } => out.push_str(content),
            Element::InvalidMacro { raw } => out.push_str(raw),
            other => panic!("Unexpected macro element: {:?}", other),
        }
    }
    out
}

#[rstest]
#[case::leading_zero_index("{01}")]
#[case::space_in_name("{a b}")]
#[case::symbol_at_start("{!oops}")]
#[case::nested_open_brace("{a{b}")]
#[case::space_after_index("{1 2}")]
#[case::unterminated_name("{bad")]
#[case::unterminated_arguments("{name:arg")]
#[case::unterminated_parameter("{name:key=val")]
#[case::lone_open_brace("{")]
#[case::open_brace_then_text("{ hello")]
fn malformed_input_is_byte_for_byte_recoverable(#[case] source: &str) {
    assert_eq!(rendered_literal(&parse(source)), source);
}

#[rstest]
#[case::default_macro("{}", Element::DefaultMacro)]
#[case::indexed_default("{7}", Element::IndexedDefaultMacro { index: 7 })]
#[case::multi_digit_index("{10}", Element::IndexedDefaultMacro { index: 10 })]
#[case::indexed_empty_name("{7:}", Element::IndexedDefaultMacro { index: 7 })]
#[case::named("{date}", Element::NamedMacro {
    name: "date".to_string(),
    arguments: Arguments::from_tokens(vec![]),
})]
#[case::named_with_label("{date#when it happened}", Element::NamedMacro {
    name: "date".to_string(),
    arguments: Arguments::from_tokens(vec![]),
})]
#[case::complete("{3:number}", Element::CompleteMacro {
    index: 3,
    name: "number".to_string(),
    arguments: Arguments::from_tokens(vec![]),
})]
#[case::complete_with_arguments("{0:number:precision=2:grouping}", Element::CompleteMacro {
    index: 0,
    name: "number".to_string(),
    arguments: Arguments::from_tokens(vec![
        ArgumentToken::Parameter { name: "precision".to_string(), value: "2".to_string() },
        ArgumentToken::Value("grouping".to_string()),
    ]),
})]
fn single_macro_parses(#[case] source: &str, #[case] expected: Element) {
    assert_eq!(parse(source), vec![expected]);
}

#[test]
fn parsed_elements_serialize_for_inspection() {
    let elements = parse("hi {2:number:precision=2}");
    let json = serde_json::to_value(&elements).unwrap();
    assert_eq!(json[0]["Text"]["content"], "hi ");
    assert_eq!(json[1]["CompleteMacro"]["index"], 2);
    assert_eq!(json[1]["CompleteMacro"]["name"], "number");
}

// Parser error path tests
// These systematically test unhappy paths of the tag indexer and extractor

use tagtree::{parse, ParseError};

fn assert_malformed(source: &str) {
    match parse(source.as_bytes()) {
        Err(ParseError::MalformedMarkup { .. }) => {}
        other => panic!("expected malformed markup for {source:?}, got {other:?}"),
    }
}

#[test]
fn test_parser_error_mismatched_close() {
    assert_malformed("<a><b></a>");
}

#[test]
fn test_parser_error_missing_close_tag() {
    assert_malformed("<a><b>1</b>");
}

#[test]
fn test_parser_error_close_without_open() {
    assert_malformed("<a></a></b>");
}

#[test]
fn test_parser_error_unterminated_tag() {
    assert_malformed("<a>1</a");
}

#[test]
fn test_parser_error_open_inside_tag() {
    assert_malformed("<a <b/>></a>");
}

#[test]
fn test_parser_error_stray_greater_than() {
    assert_malformed("<a>x > y</a>");
}

#[test]
fn test_parser_error_unterminated_comment() {
    assert_malformed("<a><!-- never ends</a>");
}

#[test]
fn test_parser_error_unterminated_cdata() {
    assert_malformed("<a><![CDATA[ never ends</a>");
}

#[test]
fn test_parser_error_unterminated_processing_instruction() {
    assert_malformed("<?xml version=\"1.0\"<a/>");
}

#[test]
fn test_parser_error_empty_tag_name() {
    assert_malformed("<a><></a>");
}

#[test]
fn test_parser_error_closing_self_closing_tag() {
    assert_malformed("<a></a/>");
}

#[test]
fn test_parser_error_empty_document() {
    assert_malformed("");
    assert_malformed("   \r\n");
    assert_malformed("<!-- only a comment -->");
}

#[test]
fn test_parser_error_text_without_elements() {
    assert_malformed("just some text");
}

#[test]
fn test_parser_error_two_roots() {
    assert_malformed("<a/><b/>");
}

#[test]
fn test_parser_error_case_sensitive_names() {
    assert_malformed("<Config></config>");
}

#[test]
fn test_parser_error_nesting_too_deep() {
    let mut source = String::new();
    for _ in 0..300 {
        source.push_str("<n>");
    }
    for _ in 0..300 {
        source.push_str("</n>");
    }
    assert!(matches!(
        parse(source.as_bytes()),
        Err(ParseError::NestingTooDeep { limit: 256, .. })
    ));
}

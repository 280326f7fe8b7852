//! Tokenizer integration tests.
//!
//! Covers token boundaries, position tracking and lexical errors.

use luast_scanner::{Token, TokenKind, Tokenizer};

/// Helper: tokenize with comments dropped and the default tab width.
fn tokens(source: &str) -> Vec<Token<'_>> {
    Tokenizer::new(source).collect::<Result<_, _>>().unwrap()
}

fn values(source: &str) -> Vec<&str> {
    tokens(source).iter().map(|t| t.value()).collect()
}

fn positions(source: &str) -> Vec<(u32, u32)> {
    tokens(source).iter().map(|t| (t.line, t.column)).collect()
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_columns() {
    assert_eq!(positions("a + b"), [(1, 1), (1, 3), (1, 5)]);
}

#[test]
fn test_line_breaks() {
    // \r\n counts as one line break, a lone \r as another
    assert_eq!(positions("a\r\n=\rb"), [(1, 1), (2, 1), (3, 1)]);
    assert_eq!(positions("a\n\nb"), [(1, 1), (3, 1)]);
}

#[test]
fn test_tab_width() {
    let mut tokenizer = Tokenizer::with_options("\ta", 3, true);
    let token = tokenizer.next_token().unwrap().unwrap();
    assert_eq!(token.column, 4);

    let token = Tokenizer::new("\ta").next_token().unwrap().unwrap();
    assert_eq!(token.column, 3);
}

#[test]
fn test_position_accessors() {
    let mut tokenizer = Tokenizer::new("a\n  bc");
    tokenizer.next_token().unwrap();
    tokenizer.next_token().unwrap();
    assert_eq!(tokenizer.pos(), 6);
    assert_eq!(tokenizer.line_number(), 2);
    assert_eq!(tokenizer.column_number(), 5);
}

#[test]
fn test_token_after_comment_on_next_line() {
    let toks = tokens("{\"test\", --test\n}");
    let close = toks.last().unwrap();
    assert_eq!(close.value(), "}");
    assert_eq!((close.line, close.column), (2, 1));
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_comments_kept_when_requested() {
    let toks: Vec<_> = Tokenizer::with_options("--[==[abc]==] --a\na = 1", 2, false)
        .collect::<Result<_, _>>()
        .unwrap();
    let summary: Vec<_> = toks.iter().map(|t| (t.kind, t.value(), t.line, t.column)).collect();
    assert_eq!(summary, [
        (TokenKind::Comment, "--[==[abc]==]", 1, 1),
        (TokenKind::Comment, "--a", 1, 15),
        (TokenKind::Identifier, "a", 2, 1),
        (TokenKind::Simple, "=", 2, 3),
        (TokenKind::Number, "1", 2, 5),
    ]);
}

#[test]
fn test_comments_skipped_by_default() {
    assert_eq!(values("-- line\nx --[[ long\ncomment ]] y"), ["x", "y"]);
    assert!(tokens("-- only a comment").is_empty());
}

#[test]
fn test_broken_long_comment_is_a_line_comment() {
    assert_eq!(values("--[= not long\nx"), ["x"]);
}

#[test]
fn test_shebang() {
    let mut tokenizer = Tokenizer::with_options("#!/usr/bin/env lua\nprint(1)", 2, false);
    let token = tokenizer.next_token().unwrap().unwrap();
    assert_eq!(token.kind, TokenKind::Comment);
    assert_eq!(token.value(), "#!/usr/bin/env lua");

    assert_eq!(values("#!/usr/bin/env lua\nprint(1)"), ["print", "(", "1", ")"]);
}

#[test]
fn test_hash_after_start_is_length_operator() {
    let toks = tokens("x = #t");
    assert_eq!(toks[2].kind, TokenKind::Simple);
    assert_eq!(toks[2].value(), "#");
}

#[test]
fn test_unfinished_long_comment() {
    let err = Tokenizer::new("x --[[ never closed").collect::<Result<Vec<_>, _>>().unwrap_err();
    assert!(err.is_lexical());
    assert_eq!(err.message, "unfinished long comment");
    assert_eq!((err.line(), err.column()), (Some(1), Some(3)));
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_number_shapes() {
    assert_eq!(values("1.2.3"), ["1.2", ".3"]);
    assert_eq!(values("-56e-2"), ["-", "56e-2"]);
    assert_eq!(values("0xdef.123"), ["0xdef.123"]);
    assert_eq!(values("0b1111.1010"), ["0b1111.1010"]);
    assert_eq!(values(".5 1E+10 0XFF"), [".5", "1E+10", "0XFF"]);
}

#[test]
fn test_number_columns() {
    let toks = tokens("1.2.3");
    assert_eq!(toks[1].column, 4);
    assert!(toks.iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_hex_e_is_a_digit() {
    assert_eq!(values("0x1e+1"), ["0x1e", "+", "1"]);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_short_strings() {
    let toks = tokens(r#"'a' "b\"c" 'd\'e'"#);
    assert!(toks.iter().all(|t| t.kind == TokenKind::String));
    assert_eq!(toks[1].value(), r#""b\"c""#);
    assert_eq!(toks[2].value(), r"'d\'e'");
}

#[test]
fn test_escaped_line_break_in_short_string() {
    let toks = tokens("'a\\\nb' c");
    assert_eq!(toks[0].value(), "'a\\\nb'");
    assert_eq!((toks[1].line, toks[1].column), (2, 4));
}

#[test]
fn test_unfinished_short_string() {
    let err = Tokenizer::new("x = 'abc").collect::<Result<Vec<_>, _>>().unwrap_err();
    assert_eq!(err.to_string(), "unfinished string, expected ''' near ''abc' at 1:5");
}

#[test]
fn test_raw_line_break_in_short_string() {
    let toks = tokens("\"abc\r\ndef\" x");
    assert_eq!(toks[0].kind, TokenKind::String);
    assert_eq!(toks[0].value(), "\"abc\r\ndef\"");
    assert_eq!((toks[1].line, toks[1].column), (2, 6));

    // only the end of input leaves a string unfinished
    let err = Tokenizer::new("'abc\n").collect::<Result<Vec<_>, _>>().unwrap_err();
    assert_eq!(err.message, "unfinished string, expected '''");
    assert_eq!(err.near_text(), Some("'abc\n"));
}

#[test]
fn test_long_strings() {
    assert_eq!(values("[[abc]=]]"), ["[[abc]=]]"]);
    assert_eq!(values("[==[abc]]=]==]"), ["[==[abc]]=]==]"]);
    assert_eq!(values("[==abc]==]"), ["[", "==", "abc", "]", "==", "]"]);
    assert_eq!(tokens("[[x]]")[0].kind, TokenKind::String);
}

#[test]
fn test_long_string_spans_lines() {
    let toks = tokens("[[a\nb\r\nc]] d");
    assert_eq!(toks[0].value(), "[[a\nb\r\nc]]");
    assert_eq!((toks[1].line, toks[1].column), (3, 5));
}

#[test]
fn test_unfinished_long_string() {
    let err = Tokenizer::new("return [=[test]==]").collect::<Result<Vec<_>, _>>().unwrap_err();
    assert_eq!(err.message, "unfinished long string");
    assert_eq!(err.column(), Some(8));
}

#[test]
fn test_index_bracket_is_simple() {
    let toks = tokens("t[1]");
    assert_eq!(toks[1].kind, TokenKind::Simple);
    assert_eq!(toks[1].value(), "[");
}

//! The tokenizer.
//!
//! Tokens are produced lazily: [`Tokenizer::lookahead`] scans the next token
//! on first use and caches it until [`Tokenizer::next_token`] hands it out.
//! Nothing is scanned beyond that single token.

use luast_core::text::TextRange;
use luast_diagnostics::{messages, DiagnosticMessage, Near, ParseError};
use memchr::{memchr, memchr2};

use crate::char_codes::*;
use crate::token::{Token, TokenKind};

/// Columns a tab advances when no width is given.
pub const DEFAULT_TAB_SIZE: u32 = 2;

#[derive(Debug, Clone, Copy)]
struct Cursor {
    pos: usize,
    line: u32,
    column: u32,
}

pub struct Tokenizer<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    line: u32,
    column: u32,
    tab_size: u32,
    skip_comments: bool,
    /// `None` until the next token has been scanned; `Some(None)` at EOF.
    peeked: Option<Option<Token<'s>>>,
}

impl<'s> Tokenizer<'s> {
    /// A tokenizer with the default tab width that drops comments.
    pub fn new(source: &'s str) -> Self {
        Self::with_options(source, DEFAULT_TAB_SIZE, true)
    }

    pub fn with_options(source: &'s str, tab_size: u32, skip_comments: bool) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            tab_size,
            skip_comments,
            peeked: None,
        }
    }

    #[inline]
    pub fn source(&self) -> &'s str {
        self.source
    }

    #[inline]
    pub fn tab_size(&self) -> u32 {
        self.tab_size
    }

    /// Byte offset the scanner has reached. Once the lookahead has been
    /// scanned this is the end of the lookahead token.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn line_number(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column_number(&self) -> u32 {
        self.column
    }

    // ========================================================================
    // Token stream
    // ========================================================================

    /// The next token without consuming it, or `None` at end of input.
    pub fn lookahead(&mut self) -> Result<Option<Token<'s>>, ParseError> {
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.scan_token()?;
        self.peeked = Some(token);
        Ok(token)
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Result<Option<Token<'s>>, ParseError> {
        let token = self.lookahead()?;
        self.peeked = None;
        Ok(token)
    }

    /// Consume the next token if its text is `expected`.
    pub fn consume(&mut self, expected: &str) -> Result<Option<Token<'s>>, ParseError> {
        match self.lookahead()? {
            Some(token) if token.is(expected) => self.next_token(),
            _ => Ok(None),
        }
    }

    /// Consume the next token, failing unless its text is `expected`.
    pub fn expect(&mut self, expected: &str) -> Result<Token<'s>, ParseError> {
        match self.lookahead()? {
            Some(token) if token.is(expected) => {
                self.peeked = None;
                Ok(token)
            }
            other => Err(ParseError::new(
                &messages::EXPECTED_TOKEN,
                &[expected],
                other.map_or(Near::Eof, |t| t.near()),
            )),
        }
    }

    /// Whether the next token's text is `text`, without consuming it.
    pub fn is_next(&mut self, text: &str) -> Result<bool, ParseError> {
        Ok(self.lookahead()?.is_some_and(|t| t.is(text)))
    }

    pub fn is_eof(&mut self) -> Result<bool, ParseError> {
        Ok(self.lookahead()?.is_none())
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    fn scan_token(&mut self) -> Result<Option<Token<'s>>, ParseError> {
        loop {
            self.skip_white_space();
            if self.pos >= self.bytes.len() {
                return Ok(None);
            }

            let start = self.cursor();
            let kind = self.scan_kind(start)?;
            if kind == TokenKind::Comment && self.skip_comments {
                continue;
            }

            let range = TextRange::new(start.pos as u32, self.pos as u32);
            return Ok(Some(Token::new(kind, self.source, range, start.line, start.column)));
        }
    }

    fn scan_kind(&mut self, start: Cursor) -> Result<TokenKind, ParseError> {
        let b = self.bytes[self.pos];
        let kind = match b {
            b'=' | b'<' | b'>' | b'~' => {
                self.advance();
                if self.peek(0) == Some(EQUALS) {
                    self.advance();
                }
                TokenKind::Simple
            }
            DOT if self.peek(1).is_some_and(is_digit) => {
                self.scan_number();
                TokenKind::Number
            }
            DOT => {
                self.advance();
                if self.peek(0) == Some(DOT) {
                    self.advance();
                    if self.peek(0) == Some(DOT) {
                        self.advance();
                    }
                }
                TokenKind::Simple
            }
            MINUS if self.peek(1) == Some(MINUS) => {
                self.advance_by(2);
                self.scan_comment(start)?;
                TokenKind::Comment
            }
            // `#!...` on the very first line is skipped like a comment.
            HASH if start.pos == 0 => {
                self.skip_to_line_end();
                TokenKind::Comment
            }
            b if is_identifier_start(b) => {
                self.skip_while(is_identifier_part);
                TokenKind::Identifier
            }
            b if is_digit(b) => {
                self.scan_number();
                TokenKind::Number
            }
            b if is_quote(b) => {
                self.scan_short_string(start)?;
                TokenKind::String
            }
            OPEN_BRACKET => {
                if !self.scan_long_bracket(start, &messages::UNFINISHED_LONG_STRING)? {
                    self.advance();
                    return Ok(TokenKind::Simple);
                }
                TokenKind::String
            }
            _ => {
                self.advance();
                TokenKind::Simple
            }
        };
        Ok(kind)
    }

    /// The cursor sits just past `--`.
    fn scan_comment(&mut self, start: Cursor) -> Result<(), ParseError> {
        if self.peek(0) == Some(OPEN_BRACKET) && self.scan_long_bracket(start, &messages::UNFINISHED_LONG_COMMENT)? {
            return Ok(());
        }
        self.skip_to_line_end();
        Ok(())
    }

    /// Scan `[=*[ ... ]=*]` with the cursor on the opening `[`. Returns
    /// `false`, consuming nothing, when no long bracket opens here.
    fn scan_long_bracket(&mut self, start: Cursor, unfinished: &DiagnosticMessage) -> Result<bool, ParseError> {
        let mut level = 0;
        while self.peek(1 + level) == Some(EQUALS) {
            level += 1;
        }
        if self.peek(1 + level) != Some(OPEN_BRACKET) {
            return Ok(false);
        }
        self.advance_by(level + 2);

        loop {
            let Some(offset) = memchr(CLOSE_BRACKET, &self.bytes[self.pos..]) else {
                self.advance_to(self.bytes.len());
                return Err(self.lexical_error(start, unfinished, &[]));
            };
            self.advance_to(self.pos + offset + 1);

            let closes = (0..level).all(|i| self.peek(i) == Some(EQUALS)) && self.peek(level) == Some(CLOSE_BRACKET);
            if closes {
                self.advance_by(level + 1);
                return Ok(true);
            }
        }
    }

    /// Escapes are only skipped here; the parser decodes them.
    fn scan_short_string(&mut self, start: Cursor) -> Result<(), ParseError> {
        let quote = self.bytes[self.pos];
        self.advance();
        loop {
            match self.peek(0) {
                Some(b) if b == quote => {
                    self.advance();
                    return Ok(());
                }
                Some(BACKSLASH) => {
                    self.advance();
                    if self.peek(0).is_some() {
                        self.advance();
                    }
                }
                Some(_) => self.advance(),
                None => {
                    let quote = (quote as char).to_string();
                    return Err(self.lexical_error(start, &messages::UNFINISHED_STRING, &[quote.as_str()]));
                }
            }
        }
    }

    /// Decimal with optional fraction and exponent, `0x` hex with optional
    /// hex fraction, or `0b` binary. Validation is left to the parser.
    fn scan_number(&mut self) {
        let prefix = (self.peek(0), self.peek(1));
        let (is_radix_digit, decimal): (fn(u8) -> bool, bool) = match prefix {
            (Some(b'0'), Some(b'x' | b'X')) => {
                self.advance_by(2);
                (is_hex_digit, false)
            }
            (Some(b'0'), Some(b'b' | b'B')) => {
                self.advance_by(2);
                (is_binary_digit, false)
            }
            _ => (is_digit, true),
        };

        self.skip_while(is_radix_digit);
        if self.peek(0) == Some(DOT) {
            self.advance();
            self.skip_while(is_radix_digit);
        }
        if decimal && matches!(self.peek(0), Some(b'e' | b'E')) {
            self.advance();
            if matches!(self.peek(0), Some(b'+' | b'-')) {
                self.advance();
            }
            self.skip_while(is_digit);
        }
    }

    // ========================================================================
    // Cursor movement
    // ========================================================================

    #[inline]
    fn cursor(&self) -> Cursor {
        Cursor {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Step over one byte, or over a `\r\n` pair, keeping line and column
    /// in sync.
    fn advance(&mut self) {
        let b = self.bytes[self.pos];
        self.pos += 1;
        match b {
            LINE_FEED => self.new_line(),
            CARRIAGE_RETURN => {
                if self.peek(0) == Some(LINE_FEED) {
                    self.pos += 1;
                }
                self.new_line();
            }
            TAB => self.column += self.tab_size,
            b if is_utf8_continuation(b) => {}
            _ => self.column += 1,
        }
    }

    #[inline]
    fn new_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    fn advance_by(&mut self, count: usize) {
        let end = (self.pos + count).min(self.bytes.len());
        self.advance_to(end);
    }

    fn advance_to(&mut self, end: usize) {
        while self.pos < end {
            self.advance();
        }
    }

    fn skip_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.peek(0).is_some_and(&predicate) {
            self.advance();
        }
    }

    fn skip_white_space(&mut self) {
        self.skip_while(is_white_space);
    }

    /// Move to the next line break without consuming it.
    fn skip_to_line_end(&mut self) {
        let end = memchr2(LINE_FEED, CARRIAGE_RETURN, &self.bytes[self.pos..])
            .map_or(self.bytes.len(), |offset| self.pos + offset);
        self.advance_to(end);
    }

    fn lexical_error(&self, start: Cursor, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        let lexeme = &self.source[start.pos..self.pos];
        ParseError::new(message, args, Near::token(lexeme, start.line, start.column))
    }
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Result<Token<'s>, ParseError>;

    /// Yields tokens until end of input. After a lexical error the rest of
    /// the input is abandoned.
    fn next(&mut self) -> Option<Self::Item> {
        let result = self.next_token();
        if result.is_err() {
            self.pos = self.bytes.len();
            self.peeked = Some(None);
        }
        result.transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(source: &str) -> Vec<String> {
        Tokenizer::new(source)
            .map(|t| t.map(|t| t.value().to_string()))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_operators_take_trailing_equals() {
        assert_eq!(values("a == b ~= c <= d >= e = f"), [
            "a", "==", "b", "~=", "c", "<=", "d", ">=", "e", "=", "f"
        ]);
    }

    #[test]
    fn test_dots() {
        assert_eq!(values(".. . ..."), ["..", ".", "..."]);
        assert_eq!(values("a.b"), ["a", ".", "b"]);
    }

    #[test]
    fn test_lookahead_is_cached_until_consumed() {
        let mut tokenizer = Tokenizer::new("x y");
        let first = tokenizer.lookahead().unwrap().unwrap();
        let again = tokenizer.lookahead().unwrap().unwrap();
        assert_eq!(first, again);
        assert_eq!(tokenizer.pos(), 1);

        assert_eq!(tokenizer.next_token().unwrap(), Some(first));
        assert_eq!(tokenizer.lookahead().unwrap().map(|t| t.value()), Some("y"));
        assert_eq!(tokenizer.pos(), 3);
    }

    #[test]
    fn test_consume_and_expect() {
        let mut tokenizer = Tokenizer::new("( x )");
        assert!(tokenizer.consume("[").unwrap().is_none());
        assert!(tokenizer.consume("(").unwrap().is_some());
        assert!(tokenizer.is_next("x").unwrap());
        let err = tokenizer.expect(")").unwrap_err();
        assert_eq!(err.to_string(), "expected ')' near 'x' at 1:3");
        tokenizer.next_token().unwrap();
        assert_eq!(tokenizer.expect(")").unwrap().column, 5);
        assert!(tokenizer.is_eof().unwrap());

        let err = tokenizer.expect("end").unwrap_err();
        assert_eq!(err.to_string(), "expected 'end' near EOF");
    }

    #[test]
    fn test_keywords_are_identifiers() {
        let mut tokenizer = Tokenizer::new("local function");
        let token = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.value(), "local");
    }

    #[test]
    fn test_unicode_identifier_columns() {
        let mut tokenizer = Tokenizer::new("héllo x");
        let word = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(word.value(), "héllo");
        let x = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(x.column, 7);
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut tokenizer = Tokenizer::new("a 'oops");
        assert!(tokenizer.next().unwrap().is_ok());
        assert!(tokenizer.next().unwrap().is_err());
        assert!(tokenizer.next().is_none());
    }
}

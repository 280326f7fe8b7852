//! Token representation.

use luast_core::text::TextRange;
use luast_diagnostics::Near;
use std::fmt;

/// Lexical class of a token. Keywords are `Identifier` tokens; the parser
/// tells them apart by text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    String,
    /// Operators and punctuation, one to three bytes long.
    Simple,
    /// Line and long comments, and a leading `#` line.
    Comment,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Simple => "symbol",
            TokenKind::Comment => "comment",
        };
        f.write_str(text)
    }
}

/// A token: a view over a span of the source plus where it starts.
///
/// The token's text is not copied; [`Token::value`] slices it out of the
/// source on demand.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub range: TextRange,
    /// 1-based line of the first byte.
    pub line: u32,
    /// 1-based column of the first byte.
    pub column: u32,
    source: &'s str,
}

impl<'s> Token<'s> {
    pub(crate) fn new(kind: TokenKind, source: &'s str, range: TextRange, line: u32, column: u32) -> Self {
        Self { kind, range, line, column, source }
    }

    /// The token's text as written.
    #[inline]
    pub fn value(&self) -> &'s str {
        &self.source[self.range.to_range()]
    }

    /// Whether the token's text equals `text`. String tokens never match,
    /// so `"end"` (quoted) is not mistaken for the keyword.
    #[inline]
    pub fn is(&self, text: &str) -> bool {
        self.kind != TokenKind::String && self.value() == text
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.range.pos as usize
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.range.end as usize
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.range.len() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Error location pointing at this token.
    pub fn near(&self) -> Near {
        Near::token(self.value(), self.line, self.column)
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?}) at {}:{} [{:?}]",
            self.kind,
            self.value(),
            self.line,
            self.column,
            self.range
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

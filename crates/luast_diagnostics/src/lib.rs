//! luast_diagnostics: Error messages and the parse error type.
//!
//! Every failure the front end can report is declared once in [`messages`]
//! with a stable code. Parsing is fail-fast, so a failed parse produces
//! exactly one [`ParseError`] pointing at the token it choked on.

use std::fmt;
use thiserror::Error;

/// Which layer rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A malformed or unterminated lexeme: bad escapes, unfinished strings
    /// and long brackets, malformed numbers.
    Lexical,
    /// A token stream that does not fit the grammar.
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A message template with a code and kind.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// Stable numeric code. Lexical messages are 1xxx, syntax messages 2xxx.
    pub code: u32,
    pub kind: ErrorKind,
    /// The template. May contain `{0}`, `{1}`, ... placeholders.
    pub message: &'static str,
}

/// Replace `{0}`, `{1}`, ... in `template` with `args`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Longest lexeme prefix quoted in an error, in chars.
const MAX_NEAR_CHARS: usize = 40;

/// Where an error happened: the offending token, or the end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Near {
    Token { text: String, line: u32, column: u32 },
    Eof,
}

impl Near {
    /// Point at a token. Long lexemes (an unfinished long string running to
    /// the end of the file, say) are cut down to a short prefix.
    pub fn token(text: &str, line: u32, column: u32) -> Self {
        let text = match text.char_indices().nth(MAX_NEAR_CHARS) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        };
        Near::Token { text, line, column }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Near::Eof)
    }
}

impl fmt::Display for Near {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Near::Token { text, line, column } => write!(f, "'{}' at {}:{}", text, line, column),
            Near::Eof => write!(f, "EOF"),
        }
    }
}

/// The single error type of the front end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} near {near}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub code: u32,
    pub message: String,
    pub near: Near,
}

impl ParseError {
    pub fn new(message: &DiagnosticMessage, args: &[&str], near: Near) -> Self {
        Self {
            kind: message.kind,
            code: message.code,
            message: format_message(message.message, args),
            near,
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.kind == ErrorKind::Lexical
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ErrorKind::Syntax
    }

    /// Line of the offending token, `None` at end of input.
    pub fn line(&self) -> Option<u32> {
        match self.near {
            Near::Token { line, .. } => Some(line),
            Near::Eof => None,
        }
    }

    /// Column of the offending token, `None` at end of input.
    pub fn column(&self) -> Option<u32> {
        match self.near {
            Near::Token { column, .. } => Some(column),
            Near::Eof => None,
        }
    }

    /// Text of the offending token, `None` at end of input.
    pub fn near_text(&self) -> Option<&str> {
        match &self.near {
            Near::Token { text, .. } => Some(text),
            Near::Eof => None,
        }
    }
}

/// The message catalogue.
pub mod messages {
    use super::{DiagnosticMessage, ErrorKind};

    macro_rules! diag {
        ($code:expr, $kind:ident, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                kind: ErrorKind::$kind,
                message: $msg,
            }
        };
    }

    // Lexical
    pub const UNFINISHED_STRING: DiagnosticMessage = diag!(1001, Lexical, "unfinished string, expected '{0}'");
    pub const UNFINISHED_LONG_STRING: DiagnosticMessage = diag!(1002, Lexical, "unfinished long string");
    pub const UNFINISHED_LONG_COMMENT: DiagnosticMessage = diag!(1003, Lexical, "unfinished long comment");
    pub const INVALID_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1004, Lexical, "invalid escape sequence");
    pub const ESCAPE_TOO_LARGE: DiagnosticMessage = diag!(1005, Lexical, "decimal escape too large");
    pub const MALFORMED_NUMBER: DiagnosticMessage = diag!(1006, Lexical, "malformed number");
    pub const INVALID_LONG_STRING_DELIMITER: DiagnosticMessage = diag!(1007, Lexical, "invalid long string delimiter");
    pub const MALFORMED_STRING: DiagnosticMessage = diag!(1008, Lexical, "malformed string");

    // Syntax
    pub const EXPECTED_TOKEN: DiagnosticMessage = diag!(2001, Syntax, "expected '{0}'");
    pub const EXPECTED_EXPRESSION: DiagnosticMessage = diag!(2002, Syntax, "expected expression");
    pub const EXPECTED_NAME: DiagnosticMessage = diag!(2003, Syntax, "expected name");
    pub const EXPECTED_VARIABLE: DiagnosticMessage = diag!(2004, Syntax, "expected variable");
    pub const EXPECTED_STATEMENT: DiagnosticMessage = diag!(2005, Syntax, "expected statement");
    pub const UNEXPECTED_KEYWORD: DiagnosticMessage = diag!(2006, Syntax, "unexpected keyword '{0}'");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(2007, Syntax, "unexpected token, expected end of input");
    pub const NUMERIC_FOR_SINGLE_NAME: DiagnosticMessage =
        diag!(2008, Syntax, "expected name: a numeric for takes exactly one control variable");
    pub const TOO_MANY_SYNTAX_LEVELS: DiagnosticMessage = diag!(2009, Syntax, "chunk has too many syntax levels");
}

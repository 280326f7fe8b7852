//! Operators and reserved words.

use std::fmt;

/// The reserved words of Lua 5.1. None of them can be used as a name.
pub const KEYWORDS: [&str; 21] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if", "in", "local",
    "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Whether `text` is one of the [`KEYWORDS`].
pub fn is_keyword(text: &str) -> bool {
    matches!(
        text,
        "and"
            | "break"
            | "do"
            | "else"
            | "elseif"
            | "end"
            | "false"
            | "for"
            | "function"
            | "if"
            | "in"
            | "local"
            | "nil"
            | "not"
            | "or"
            | "repeat"
            | "return"
            | "then"
            | "true"
            | "until"
            | "while"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    NotEqual,
    Equal,
    Concat,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOperator {
    /// Map token text to an operator. `and`/`or` are matched as words.
    pub fn from_token(text: &str) -> Option<Self> {
        Some(match text {
            "or" => BinaryOperator::Or,
            "and" => BinaryOperator::And,
            "<" => BinaryOperator::Less,
            ">" => BinaryOperator::Greater,
            "<=" => BinaryOperator::LessEqual,
            ">=" => BinaryOperator::GreaterEqual,
            "~=" => BinaryOperator::NotEqual,
            "==" => BinaryOperator::Equal,
            ".." => BinaryOperator::Concat,
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Modulo,
            "^" => BinaryOperator::Power,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Or => "or",
            BinaryOperator::And => "and",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::NotEqual => "~=",
            BinaryOperator::Equal => "==",
            BinaryOperator::Concat => "..",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "^",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Less
                | BinaryOperator::Greater
                | BinaryOperator::LessEqual
                | BinaryOperator::GreaterEqual
                | BinaryOperator::NotEqual
                | BinaryOperator::Equal
        )
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
                | BinaryOperator::Power
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `not`
    Not,
    /// `#`
    Length,
}

impl UnaryOperator {
    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            "-" => Some(UnaryOperator::Negate),
            "not" => Some(UnaryOperator::Not),
            "#" => Some(UnaryOperator::Length),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "not",
            UnaryOperator::Length => "#",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_matches_predicate() {
        for keyword in KEYWORDS {
            assert!(is_keyword(keyword), "{keyword}");
        }
        assert!(!is_keyword("goto"));
        assert!(!is_keyword("self"));
        assert!(!is_keyword("End"));
    }

    #[test]
    fn test_binary_operator_text() {
        for text in ["or", "and", "<", ">", "<=", ">=", "~=", "==", "..", "+", "-", "*", "/", "%", "^"] {
            let op = BinaryOperator::from_token(text).expect(text);
            assert_eq!(op.as_str(), text);
        }
        assert_eq!(BinaryOperator::from_token("!="), None);
        assert_eq!(BinaryOperator::from_token("not"), None);
    }

    #[test]
    fn test_operator_classes() {
        assert!(BinaryOperator::NotEqual.is_comparison());
        assert!(!BinaryOperator::Concat.is_comparison());
        assert!(BinaryOperator::Power.is_arithmetic());
        assert!(!BinaryOperator::And.is_arithmetic());
    }

    #[test]
    fn test_unary_operator_text() {
        assert_eq!(UnaryOperator::from_token("#"), Some(UnaryOperator::Length));
        assert_eq!(UnaryOperator::from_token("not"), Some(UnaryOperator::Not));
        assert_eq!(UnaryOperator::from_token("+"), None);
        assert_eq!(UnaryOperator::Negate.to_string(), "-");
    }
}

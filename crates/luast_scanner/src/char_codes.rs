//! Byte classes used by the tokenizer.

pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const TAB: u8 = b'\t';
pub const VERTICAL_TAB: u8 = 0x0B;
pub const FORM_FEED: u8 = 0x0C;

pub const BACKSLASH: u8 = b'\\';
pub const OPEN_BRACKET: u8 = b'[';
pub const CLOSE_BRACKET: u8 = b']';
pub const EQUALS: u8 = b'=';
pub const DOT: u8 = b'.';
pub const MINUS: u8 = b'-';
pub const HASH: u8 = b'#';

#[inline]
pub fn is_line_break(b: u8) -> bool {
    b == LINE_FEED || b == CARRIAGE_RETURN
}

#[inline]
pub fn is_white_space(b: u8) -> bool {
    matches!(b, b' ' | TAB | VERTICAL_TAB | FORM_FEED) || is_line_break(b)
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub fn is_binary_digit(b: u8) -> bool {
    b == b'0' || b == b'1'
}

/// ASCII letters, `_`, and any byte of a non-ASCII UTF-8 sequence.
#[inline]
pub fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

#[inline]
pub fn is_identifier_part(b: u8) -> bool {
    is_identifier_start(b) || is_digit(b)
}

/// Continuation bytes of a multi-byte UTF-8 sequence take up no column.
#[inline]
pub fn is_utf8_continuation(b: u8) -> bool {
    (0x80..0xC0).contains(&b)
}

#[inline]
pub fn is_quote(b: u8) -> bool {
    b == b'"' || b == b'\''
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start(b'_'));
        assert!(is_identifier_start(b'Z'));
        assert!(is_identifier_start(0xC3));
        assert!(!is_identifier_start(b'9'));
        assert!(is_identifier_part(b'9'));
        assert!(!is_identifier_part(b'-'));
    }

    #[test]
    fn test_digit_classes() {
        assert!(is_hex_digit(b'f'));
        assert!(is_hex_digit(b'E'));
        assert!(!is_hex_digit(b'g'));
        assert!(is_binary_digit(b'1'));
        assert!(!is_binary_digit(b'2'));
    }

    #[test]
    fn test_white_space() {
        for b in [b' ', b'\t', b'\n', b'\r', 0x0B, 0x0C] {
            assert!(is_white_space(b));
        }
        assert!(!is_white_space(b'a'));
        assert!(is_line_break(b'\r'));
        assert!(!is_line_break(b'\t'));
    }

    #[test]
    fn test_utf8_continuation() {
        let bytes = "é".as_bytes();
        assert!(!is_utf8_continuation(bytes[0]));
        assert!(is_utf8_continuation(bytes[1]));
    }
}

//! Decoding of number and string literals.
//!
//! The tokenizer only finds where a literal ends; its value is worked out
//! here, when the parser turns the token into a node.

use luast_diagnostics::{messages, DiagnosticMessage, Near, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralError {
    MalformedNumber,
    MalformedString,
    InvalidEscape,
    EscapeTooLarge,
    InvalidLongStringDelimiter,
}

impl LiteralError {
    pub fn message(self) -> &'static DiagnosticMessage {
        match self {
            LiteralError::MalformedNumber => &messages::MALFORMED_NUMBER,
            LiteralError::MalformedString => &messages::MALFORMED_STRING,
            LiteralError::InvalidEscape => &messages::INVALID_ESCAPE_SEQUENCE,
            LiteralError::EscapeTooLarge => &messages::ESCAPE_TOO_LARGE,
            LiteralError::InvalidLongStringDelimiter => &messages::INVALID_LONG_STRING_DELIMITER,
        }
    }

    pub fn into_parse_error(self, near: Near) -> ParseError {
        ParseError::new(self.message(), &[], near)
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// Decode a numeric literal.
///
/// `0x` literals take hex digits with an optional hex fraction and no
/// exponent. Anything else is decimal with an optional fraction and an
/// optional `e`/`E` exponent. Lua 5.1 has no binary literals, so a `0b`
/// token is malformed here.
pub fn decode_number(raw: &str) -> Result<f64, LiteralError> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(digits) => decode_hex(digits.as_bytes()),
        None => decode_decimal(raw),
    }
}

/// Split `digits` at its decimal point.
fn split_fraction(digits: &[u8]) -> (&[u8], &[u8]) {
    match digits.iter().position(|&b| b == b'.') {
        Some(dot) => (&digits[..dot], &digits[dot + 1..]),
        None => (digits, &[]),
    }
}

fn decode_hex(digits: &[u8]) -> Result<f64, LiteralError> {
    let (integer, fraction) = split_fraction(digits);
    if integer.is_empty() && fraction.is_empty() {
        return Err(LiteralError::MalformedNumber);
    }

    let mut value = 0.0;
    let mut place = 1.0;
    for &digit in integer.iter().rev() {
        value += hex_value(digit).ok_or(LiteralError::MalformedNumber)? as f64 * place;
        place *= 16.0;
    }

    let mut place = 1.0 / 16.0;
    for &digit in fraction {
        value += hex_value(digit).ok_or(LiteralError::MalformedNumber)? as f64 * place;
        place /= 16.0;
    }
    Ok(value)
}

fn decode_decimal(raw: &str) -> Result<f64, LiteralError> {
    let bytes = raw.as_bytes();
    let (mantissa, exponent) = match bytes.iter().position(|&b| b == b'e' || b == b'E') {
        Some(e) => (&bytes[..e], Some(&bytes[e + 1..])),
        None => (bytes, None),
    };

    let (integer, fraction) = split_fraction(mantissa);
    if integer.is_empty() && fraction.is_empty() {
        return Err(LiteralError::MalformedNumber);
    }
    if !integer.iter().chain(fraction).all(u8::is_ascii_digit) {
        return Err(LiteralError::MalformedNumber);
    }

    if let Some(exponent) = exponent {
        let digits = match exponent.first() {
            Some(b'+' | b'-') => &exponent[1..],
            _ => exponent,
        };
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(LiteralError::MalformedNumber);
        }
    }

    // The shape is checked; let the standard conversion do correctly
    // rounded arithmetic.
    raw.parse::<f64>().map_err(|_| LiteralError::MalformedNumber)
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

// ============================================================================
// Strings
// ============================================================================

/// Decode a string literal, delimiters included, into its bytes.
///
/// Quoted strings have their escapes processed. Long-bracket strings are
/// taken as written, minus a line break directly after the opening bracket.
pub fn decode_string(raw: &str) -> Result<Vec<u8>, LiteralError> {
    let bytes = raw.as_bytes();
    match bytes.first() {
        Some(&quote @ (b'"' | b'\'')) => {
            if bytes.len() < 2 || bytes[bytes.len() - 1] != quote {
                return Err(LiteralError::MalformedString);
            }
            decode_escapes(&bytes[1..bytes.len() - 1])
        }
        Some(b'[') => decode_long_string(bytes),
        _ => Err(LiteralError::MalformedString),
    }
}

fn decode_long_string(bytes: &[u8]) -> Result<Vec<u8>, LiteralError> {
    let level = bytes[1..].iter().take_while(|&&b| b == b'=').count();
    let width = level + 2;
    if bytes.len() < width * 2 || bytes[width - 1] != b'[' {
        return Err(LiteralError::InvalidLongStringDelimiter);
    }

    let close = &bytes[bytes.len() - width..];
    let closes = close[0] == b']' && close[width - 1] == b']' && close[1..width - 1].iter().all(|&b| b == b'=');
    if !closes {
        return Err(LiteralError::InvalidLongStringDelimiter);
    }

    let content = &bytes[width..bytes.len() - width];
    let content = match content {
        [b'\r', b'\n', rest @ ..] | [b'\n', b'\r', rest @ ..] => rest,
        [b'\n' | b'\r', rest @ ..] => rest,
        _ => content,
    };
    Ok(content.to_vec())
}

fn decode_escapes(content: &[u8]) -> Result<Vec<u8>, LiteralError> {
    let mut out = Vec::with_capacity(content.len());
    let mut i = 0;
    while i < content.len() {
        let b = content[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }

        let escape = *content.get(i + 1).ok_or(LiteralError::InvalidEscape)?;
        i += 2;
        match escape {
            b'\n' | b'\r' | b'\'' | b'"' | b'\\' => out.push(escape),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0B),
            b'z' => {}
            b'x' | b'X' => {
                let high = content.get(i).copied().and_then(hex_value);
                let low = content.get(i + 1).copied().and_then(hex_value);
                match (high, low) {
                    (Some(high), Some(low)) => out.push(high * 16 + low),
                    _ => return Err(LiteralError::InvalidEscape),
                }
                i += 2;
            }
            b'0'..=b'9' => {
                let mut value = u32::from(escape - b'0');
                let mut count = 1;
                while count < 3 {
                    match content.get(i) {
                        Some(&d) if d.is_ascii_digit() => {
                            value = value * 10 + u32::from(d - b'0');
                            i += 1;
                            count += 1;
                        }
                        _ => break,
                    }
                }
                let byte = u8::try_from(value).map_err(|_| LiteralError::EscapeTooLarge)?;
                out.push(byte);
            }
            _ => return Err(LiteralError::InvalidEscape),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(decode_number("0"), Ok(0.0));
        assert_eq!(decode_number("1"), Ok(1.0));
        assert_eq!(decode_number("1e2"), Ok(100.0));
        assert_eq!(decode_number("1.2"), Ok(1.2));
        assert_eq!(decode_number("1.2e3"), Ok(1200.0));
        assert_eq!(decode_number("56e-2"), Ok(0.56));
        assert_eq!(decode_number("56e+2"), Ok(5600.0));
        assert_eq!(decode_number(".5"), Ok(0.5));
        assert_eq!(decode_number("3."), Ok(3.0));
        assert_eq!(decode_number("1E10"), Ok(1e10));
    }

    #[test]
    fn test_hex_numbers() {
        assert_eq!(decode_number("0x123"), Ok(291.0));
        assert_eq!(decode_number("0xdeadbEef"), Ok(3735928559.0));
        assert_eq!(decode_number("0XFF"), Ok(255.0));
        let expected = 0xdead as f64 + 0xbeef as f64 / 65536.0;
        assert_eq!(decode_number("0xdead.bEef"), Ok(expected));
        assert_eq!(decode_number("0x.8"), Ok(0.5));
    }

    #[test]
    fn test_malformed_numbers() {
        for raw in ["0x", "1e", "1e+", ".", "0b101", "0x1g", "1.2.3"] {
            assert_eq!(decode_number(raw), Err(LiteralError::MalformedNumber), "{raw}");
        }
    }

    #[test]
    fn test_named_escapes() {
        assert_eq!(decode_string(r#""a\tb\nc""#).unwrap(), b"a\tb\nc");
        assert_eq!(decode_string(r#""\a\b\f\v\r""#).unwrap(), [7, 8, 12, 11, 13]);
        assert_eq!(decode_string(r#"'it\'s \"q\" \\'"#).unwrap(), br#"it's "q" \"#);
        assert_eq!(decode_string("\"line\\\nnext\"").unwrap(), b"line\nnext");
        assert_eq!(decode_string(r#""a\zb""#).unwrap(), b"ab");
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(decode_string(r#""\x0A\xfF""#).unwrap(), [0x0A, 0xFF]);
        assert_eq!(decode_string(r#""\x4""#), Err(LiteralError::InvalidEscape));
        assert_eq!(decode_string(r#""\xZZ""#), Err(LiteralError::InvalidEscape));
    }

    #[test]
    fn test_decimal_escapes() {
        assert_eq!(decode_string(r#""\1\10\255""#).unwrap(), [1, 10, 255]);
        assert_eq!(decode_string(r#""\0651""#).unwrap(), b"A1");
        assert_eq!(decode_string(r#""\256""#), Err(LiteralError::EscapeTooLarge));
    }

    #[test]
    fn test_unknown_escape() {
        assert_eq!(decode_string(r#""test\H""#), Err(LiteralError::InvalidEscape));
    }

    #[test]
    fn test_long_strings_are_verbatim() {
        assert_eq!(decode_string("[[test\\n\n]]").unwrap(), b"test\\n\n");
        assert_eq!(decode_string("[==[a]]b]==]").unwrap(), b"a]]b");
        assert_eq!(decode_string("[[]]").unwrap(), b"");
    }

    #[test]
    fn test_long_string_drops_first_line_break() {
        assert_eq!(decode_string("[[\nx]]").unwrap(), b"x");
        assert_eq!(decode_string("[[\r\nx\n]]").unwrap(), b"x\n");
        assert_eq!(decode_string("[[\n\nx]]").unwrap(), b"\nx");
    }

    #[test]
    fn test_bad_long_delimiters() {
        assert_eq!(decode_string("[=[x]]"), Err(LiteralError::InvalidLongStringDelimiter));
        assert_eq!(decode_string("abc"), Err(LiteralError::MalformedString));
    }
}

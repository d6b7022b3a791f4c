//! Byte constants and character classes used by the scanner.
//!
//! Lox source is scanned byte-wise: every byte that starts a lexeme is
//! ASCII, so anything else is reported as an unexpected character.

pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const TAB: u8 = b'\t';

pub const SPACE: u8 = b' ';
pub const EXCLAMATION: u8 = b'!';
pub const DOUBLE_QUOTE: u8 = b'"';
pub const OPEN_PAREN: u8 = b'(';
pub const CLOSE_PAREN: u8 = b')';
pub const ASTERISK: u8 = b'*';
pub const PLUS: u8 = b'+';
pub const COMMA: u8 = b',';
pub const MINUS: u8 = b'-';
pub const DOT: u8 = b'.';
pub const SLASH: u8 = b'/';
pub const SEMICOLON: u8 = b';';
pub const LESS_THAN: u8 = b'<';
pub const EQUALS: u8 = b'=';
pub const GREATER_THAN: u8 = b'>';
pub const UNDERSCORE: u8 = b'_';
pub const OPEN_BRACE: u8 = b'{';
pub const CLOSE_BRACE: u8 = b'}';

/// Whitespace that is skipped without affecting the line count.
#[inline]
pub fn is_white_space_single_line(ch: u8) -> bool {
    matches!(ch, SPACE | CARRIAGE_RETURN | TAB)
}

/// Check if a byte is an ASCII decimal digit.
#[inline]
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Check if a byte can start an identifier.
#[inline]
pub fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == UNDERSCORE
}

/// Check if a byte can be part of an identifier.
#[inline]
pub fn is_identifier_part(ch: u8) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}

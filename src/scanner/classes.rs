//! Byte-class helpers shared by the scanning phases.

/// Returns `true` for `[A-Za-z_]`.
pub(crate) const fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

/// Returns `true` for `[A-Za-z0-9_]`.
pub(crate) const fn is_identifier_char(byte: u8) -> bool {
    is_identifier_start(byte) || byte.is_ascii_digit()
}

/// Returns `true` for horizontal whitespace inside a logical line.
pub(crate) const fn is_line_whitespace(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

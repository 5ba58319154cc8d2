//! String literal scanning: starts, content chunks, brace escapes, ends.

use crate::scanner::delimiter::Delimiter;
use crate::scanner::io::LexerIo;
use crate::scanner::state::ScannerState;
use crate::scanner::token::TokenKind;

/// Result of one string-phase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringPhase {
    /// A token was produced.
    Token(TokenKind),
    /// The whole invocation yields to the grammar.
    Yield,
    /// Nothing to do here; later phases may still emit.
    Continue,
}

/// Scans a doubled-brace escape inside an interpolated string.
///
/// Caller guarantees the lookahead is `{` or `}` and the innermost delimiter
/// is interpolated. A single brace yields so the grammar can enter or exit
/// the hole.
pub(crate) fn scan_brace_escape<L: LexerIo>(io: &mut L) -> Option<TokenKind> {
    io.mark_end();
    let opening = io.lookahead()?;
    io.advance();
    if io.lookahead() == Some(opening) {
        io.advance();
        io.mark_end();
        return Some(TokenKind::EscapeInterpolation);
    }
    None
}

/// Scans one string-content chunk or the closing delimiter.
pub(crate) fn scan_content<L: LexerIo>(io: &mut L, state: &mut ScannerState) -> StringPhase {
    let Some(delimiter) = state.top_delimiter() else {
        return StringPhase::Continue;
    };
    let end_byte = delimiter.end_byte();
    let mut has_content = false;

    while let Some(byte) = io.lookahead() {
        if (byte == b'{' || byte == b'}') && delimiter.is_format() {
            io.mark_end();
            return content_or_yield(has_content);
        }

        if byte == b'\\' {
            if delimiter.is_raw() {
                // Backslash is literal, but protect a following delimiter or
                // line ending from terminating the scan.
                io.advance();
                if io.lookahead() == end_byte || io.lookahead() == Some(b'\\') {
                    io.advance();
                }
                if io.lookahead() == Some(b'\r') {
                    io.advance();
                    if io.lookahead() == Some(b'\n') {
                        io.advance();
                    }
                } else if io.lookahead() == Some(b'\n') {
                    io.advance();
                }
                continue;
            }
            if delimiter.is_bytes() {
                io.mark_end();
                io.advance();
                if matches!(io.lookahead(), Some(b'N' | b'u' | b'U')) {
                    // Not escape sequences in a bytes literal; the letters
                    // stay inside the content chunk.
                    io.advance();
                } else {
                    return content_or_yield(has_content);
                }
            } else {
                io.mark_end();
                return content_or_yield(has_content);
            }
        } else if Some(byte) == end_byte {
            if delimiter.is_triple() {
                io.mark_end();
                io.advance();
                if io.lookahead() == end_byte {
                    io.advance();
                    if io.lookahead() == end_byte {
                        if has_content {
                            // Emit the pending chunk first; the next
                            // invocation re-reads the closing quotes.
                            return StringPhase::Token(TokenKind::StringContent);
                        }
                        io.advance();
                        io.mark_end();
                        state.pop_delimiter();
                        return StringPhase::Token(TokenKind::StringEnd);
                    }
                    io.mark_end();
                    return StringPhase::Token(TokenKind::StringContent);
                }
                io.mark_end();
                return StringPhase::Token(TokenKind::StringContent);
            }

            if has_content {
                io.mark_end();
                return StringPhase::Token(TokenKind::StringContent);
            }
            io.advance();
            state.pop_delimiter();
            io.mark_end();
            return StringPhase::Token(TokenKind::StringEnd);
        } else if byte == b'\n' && has_content && !delimiter.is_triple() {
            // Unterminated single-line literal; the grammar reports it.
            return StringPhase::Yield;
        }

        io.advance();
        has_content = true;
    }

    StringPhase::Continue
}

/// Scans a string start with an optional prefix at the current position.
pub(crate) fn scan_string_start<L: LexerIo>(
    io: &mut L,
    state: &mut ScannerState,
) -> Option<TokenKind> {
    let mut delimiter = Delimiter::new();

    while let Some(byte) = io.lookahead() {
        match byte {
            b'f' | b'F' => delimiter.set_format(),
            b'r' | b'R' => delimiter.set_raw(),
            b'b' | b'B' => delimiter.set_bytes(),
            b'u' | b'U' => {}
            _ => break,
        }
        io.advance();
    }

    if io.lookahead() == Some(b'`') {
        // Backtick forms (regex and glob literals) belong to the grammar.
        return None;
    }

    open_quoted(io, state, delimiter)
}

/// Opens a literal whose prefix flags were already consumed by the predictor.
pub(crate) fn open_prefixed_string<L: LexerIo>(
    io: &mut L,
    state: &mut ScannerState,
    delimiter: Delimiter,
) -> Option<TokenKind> {
    open_quoted(io, state, delimiter)
}

fn open_quoted<L: LexerIo>(
    io: &mut L,
    state: &mut ScannerState,
    mut delimiter: Delimiter,
) -> Option<TokenKind> {
    let quote = match io.lookahead() {
        Some(quote @ (b'\'' | b'"')) => quote,
        _ => return None,
    };

    delimiter.set_quote(quote);
    io.advance();
    io.mark_end();
    if io.lookahead() == Some(quote) {
        io.advance();
        if io.lookahead() == Some(quote) {
            io.advance();
            io.mark_end();
            delimiter.set_triple();
        }
    }

    state.push_delimiter(delimiter);
    Some(TokenKind::StringStart)
}

fn content_or_yield(has_content: bool) -> StringPhase {
    if has_content {
        StringPhase::Token(TokenKind::StringContent)
    } else {
        StringPhase::Yield
    }
}

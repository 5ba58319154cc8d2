//! Operator disambiguation between Python and subprocess readings.

use crate::scanner::classes::is_identifier_char;
use crate::scanner::io::LexerIo;
use crate::scanner::token::{TokenKind, ValidTokenSet};

/// Result of one operator-phase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperatorPhase {
    /// A token was produced.
    Token(TokenKind),
    /// The whole invocation yields to the grammar.
    Yield,
    /// Nothing matched; later phases may still emit.
    Continue,
}

/// Scans `&&`, `||`, and the single background `&`.
///
/// `&&` before `&` so the logical operator wins over two background markers;
/// a single `|` is never consumed here because the grammar owns the pipe.
pub(crate) fn scan_control_operator<L: LexerIo>(
    io: &mut L,
    valid: ValidTokenSet,
) -> OperatorPhase {
    if !valid.contains(TokenKind::LogicalAnd)
        && !valid.contains(TokenKind::LogicalOr)
        && !valid.contains(TokenKind::BackgroundAmp)
    {
        return OperatorPhase::Continue;
    }

    match io.lookahead() {
        Some(b'&') => {
            io.advance();
            if io.lookahead() == Some(b'&') {
                if valid.contains(TokenKind::LogicalAnd) {
                    io.advance();
                    io.mark_end();
                    return OperatorPhase::Token(TokenKind::LogicalAnd);
                }
                // Leave both ampersands for the grammar's bitwise-and rule.
                return OperatorPhase::Yield;
            }
            if valid.contains(TokenKind::BackgroundAmp) {
                io.mark_end();
                return OperatorPhase::Token(TokenKind::BackgroundAmp);
            }
            OperatorPhase::Yield
        }
        Some(b'|') if valid.contains(TokenKind::LogicalOr) => {
            io.advance();
            if io.lookahead() == Some(b'|') {
                io.advance();
                io.mark_end();
                return OperatorPhase::Token(TokenKind::LogicalOr);
            }
            OperatorPhase::Yield
        }
        _ => OperatorPhase::Continue,
    }
}

/// Scans the `and`/`or` keyword operators in subprocess context.
pub(crate) fn scan_keyword_operator<L: LexerIo>(
    io: &mut L,
    valid: ValidTokenSet,
) -> OperatorPhase {
    if valid.contains(TokenKind::KeywordAnd) && io.lookahead() == Some(b'a') {
        io.advance();
        if io.lookahead() == Some(b'n') {
            io.advance();
            if io.lookahead() == Some(b'd') {
                io.advance();
                if at_word_boundary(io) {
                    io.mark_end();
                    return OperatorPhase::Token(TokenKind::KeywordAnd);
                }
            }
        }
        return OperatorPhase::Yield;
    }

    if valid.contains(TokenKind::KeywordOr) && io.lookahead() == Some(b'o') {
        io.advance();
        if io.lookahead() == Some(b'r') {
            io.advance();
            if at_word_boundary(io) {
                io.mark_end();
                return OperatorPhase::Token(TokenKind::KeywordOr);
            }
        }
        return OperatorPhase::Yield;
    }

    OperatorPhase::Continue
}

fn at_word_boundary<L: LexerIo>(io: &L) -> bool {
    io.lookahead().map_or(true, |byte| !is_identifier_char(byte))
}

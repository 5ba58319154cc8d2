//! Indent, newline, and line-continuation handling.

use crate::scanner::io::LexerIo;
use crate::scanner::state::ScannerState;
use crate::scanner::token::{TokenKind, ValidTokenSet};

/// Trivia summary gathered between the previous token and the next content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TriviaScan {
    /// A newline (or end of input) was crossed.
    pub(crate) end_of_line: bool,
    /// Indent width of the upcoming line, tabs counting 8 columns.
    pub(crate) width: u32,
    /// Indent width of the first full-line comment, when one was consumed.
    pub(crate) first_comment_indent: Option<u32>,
}

/// Consumes vertical and horizontal trivia up to the next content byte.
///
/// Returns `None` when the whole invocation must yield: a trailing comment on
/// the current line (the grammar lexes it), or a backslash that does not form
/// a line continuation.
pub(crate) fn consume_trivia<L: LexerIo>(io: &mut L, valid: ValidTokenSet) -> Option<TriviaScan> {
    let mut end_of_line = false;
    let mut width: u32 = 0;
    let mut first_comment_indent = None;

    loop {
        match io.lookahead() {
            Some(b'\n') => {
                end_of_line = true;
                width = 0;
                io.skip();
            }
            Some(b' ') => {
                width += 1;
                io.skip();
            }
            Some(b'\r') | Some(b'\x0c') => {
                width = 0;
                io.skip();
            }
            Some(b'\t') => {
                width += 8;
                io.skip();
            }
            Some(b'#') if valid.gates_comment() => {
                if !end_of_line {
                    // Trailing comment after an expression; emitting an
                    // indent token here would split the statement.
                    return None;
                }
                if first_comment_indent.is_none() {
                    first_comment_indent = Some(width);
                }
                while !matches!(io.lookahead(), None | Some(b'\n')) {
                    io.skip();
                }
                io.skip();
                width = 0;
            }
            Some(b'\\') => {
                io.skip();
                if io.lookahead() == Some(b'\r') {
                    io.skip();
                }
                if io.lookahead() == Some(b'\n') || io.is_eof() {
                    io.skip();
                } else {
                    return None;
                }
            }
            None => {
                width = 0;
                end_of_line = true;
                break;
            }
            Some(_) => break,
        }
    }

    Some(TriviaScan {
        end_of_line,
        width,
        first_comment_indent,
    })
}

/// Emits at most one block-structure token for a line boundary.
///
/// Caller guarantees `trivia.end_of_line` and that error recovery is not
/// active.
pub(crate) fn emit_block_token<L: LexerIo>(
    state: &mut ScannerState,
    io: &L,
    valid: ValidTokenSet,
    trivia: &TriviaScan,
) -> Option<TokenKind> {
    let current = u32::from(state.current_indent());

    if valid.contains(TokenKind::Indent) && trivia.width > current {
        state.push_indent(trivia.width);
        return Some(TokenKind::Indent);
    }

    let next_opens_string = matches!(io.lookahead(), Some(b'"' | b'\'' | b'`'));
    let dedent_reachable = valid.contains(TokenKind::Dedent)
        || (!valid.contains(TokenKind::Newline)
            && !(valid.contains(TokenKind::StringStart) && next_opens_string)
            && !valid.within_brackets());

    // Comments indented at the current block level belong to that block and
    // must be fully consumed before the block closes.
    let comments_cleared = trivia
        .first_comment_indent
        .map_or(true, |indent| indent < current);

    if dedent_reachable
        && trivia.width < current
        && !state.inside_interpolated()
        && comments_cleared
    {
        state.pop_indent();
        return Some(TokenKind::Dedent);
    }

    if valid.contains(TokenKind::Newline) {
        return Some(TokenKind::Newline);
    }

    None
}

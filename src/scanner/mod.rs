//! External scanner for the shell-augmented Python dialect.
//!
//! The scanner resolves the tokens the context-free grammar cannot express:
//! indentation-driven block structure, multi-modal string literals with
//! interpolation, operator disambiguation between Python and subprocess
//! readings, and the line-class prediction that tells a bare subprocess
//! command apart from a Python statement.
//!
//! One invocation of [`Scanner::scan`] emits at most one token. The host
//! parser supplies the set of tokens its grammar currently accepts together
//! with a byte cursor behind the [`LexerIo`] capability interface; the
//! scanner answers with a token kind or yields so the grammar can try its
//! own rules.

pub mod delimiter;
pub mod io;
pub mod state;
pub mod token;
pub mod words;

mod classes;
mod indent;
mod operator;
mod predict;
mod string;

pub use delimiter::Delimiter;
pub use io::{LexerIo, SliceLexer};
pub use state::{ScannerState, SnapshotError};
pub use token::{TokenKind, ValidTokenSet};
pub use words::{ScannerOptions, RESERVED_KEYWORDS, SHELL_COMMANDS};

use operator::OperatorPhase;
use predict::LineClass;
use string::StringPhase;
use words::Dictionaries;

/// External scanner instance owned by one parse session.
///
/// Holds the indent and delimiter stacks across invocations and dispatches
/// each invocation to the scanning phases in grammar priority order.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    state: ScannerState,
    dictionaries: Dictionaries,
}

impl Scanner {
    /// Creates a scanner with the default dictionaries.
    pub fn new() -> Self {
        Self::with_options(ScannerOptions::default())
    }

    /// Creates a scanner with extended dictionaries.
    pub fn with_options(options: ScannerOptions) -> Self {
        Self {
            state: ScannerState::new(),
            dictionaries: Dictionaries::new(&options),
        }
    }

    /// Returns the persistent state for inspection.
    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Encodes the state into `buffer`; see [`ScannerState::serialize`].
    pub fn serialize(&self, buffer: &mut [u8]) -> Result<usize, SnapshotError> {
        self.state.serialize(buffer)
    }

    /// Restores the state from a snapshot; see [`ScannerState::deserialize`].
    pub fn deserialize(&mut self, buffer: &[u8]) -> Result<(), SnapshotError> {
        self.state.deserialize(buffer)
    }

    /// Scans at most one token at the cursor.
    ///
    /// Returns `None` when no external token applies and the grammar should
    /// tokenize with its own rules. Phases run in fixed priority order;
    /// whichever produces a token first wins.
    pub fn scan<L: LexerIo>(&mut self, io: &mut L, valid: ValidTokenSet) -> Option<TokenKind> {
        let error_recovery = valid.error_recovery();
        let within_brackets = valid.within_brackets();

        if valid.contains(TokenKind::EscapeInterpolation)
            && !error_recovery
            && matches!(io.lookahead(), Some(b'{' | b'}'))
        {
            if let Some(delimiter) = self.state.top_delimiter() {
                if delimiter.is_format() {
                    return string::scan_brace_escape(io);
                }
            }
        }

        if valid.contains(TokenKind::StringContent)
            && self.state.delimiter_depth() > 0
            && !error_recovery
        {
            match string::scan_content(io, &mut self.state) {
                StringPhase::Token(kind) => return Some(kind),
                StringPhase::Yield => return None,
                StringPhase::Continue => {}
            }
        }

        io.mark_end();
        let trivia = indent::consume_trivia(io, valid)?;

        if trivia.end_of_line && !error_recovery {
            if let Some(kind) = indent::emit_block_token(&mut self.state, io, valid, &trivia) {
                return Some(kind);
            }
        }

        match operator::scan_control_operator(io, valid) {
            OperatorPhase::Token(kind) => return Some(kind),
            OperatorPhase::Yield => return None,
            OperatorPhase::Continue => {}
        }
        match operator::scan_keyword_operator(io, valid) {
            OperatorPhase::Token(kind) => return Some(kind),
            OperatorPhase::Yield => return None,
            OperatorPhase::Continue => {}
        }

        // String prefixes collide with command names (`rm`, `find`, `bash`):
        // a bare quote at the cursor always means a string, so prediction is
        // skipped and the string phases below take over.
        let looks_like_string = matches!(io.lookahead(), Some(b'"' | b'\''));
        let at_line_start = trivia.first_comment_indent.is_none();

        if valid.wants_line_class()
            && !within_brackets
            && !error_recovery
            && at_line_start
            && io.lookahead() != Some(b'#')
            && !looks_like_string
        {
            match predict::predict_line_class(io, &self.dictionaries) {
                LineClass::BlockMacro if valid.contains(TokenKind::BlockMacroStart) => {
                    io.mark_end();
                    return Some(TokenKind::BlockMacroStart);
                }
                LineClass::SubprocessMacro
                    if valid.contains(TokenKind::SubprocessMacroStart) =>
                {
                    io.mark_end();
                    return Some(TokenKind::SubprocessMacroStart);
                }
                LineClass::Subprocess if valid.contains(TokenKind::SubprocessStart) => {
                    return Some(TokenKind::SubprocessStart);
                }
                LineClass::PathPrefix if valid.contains(TokenKind::PathPrefix) => {
                    io.mark_end();
                    return Some(TokenKind::PathPrefix);
                }
                LineClass::String(delimiter) if valid.contains(TokenKind::StringStart) => {
                    return string::open_prefixed_string(io, &mut self.state, delimiter);
                }
                _ => {}
            }
        }

        if at_line_start
            && valid.contains(TokenKind::PathPrefix)
            && matches!(io.lookahead(), Some(b'p' | b'P'))
        {
            io.advance();
            if matches!(io.lookahead(), Some(b'\'' | b'"')) {
                io.mark_end();
                return Some(TokenKind::PathPrefix);
            }
            if matches!(io.lookahead(), Some(b'f' | b'F' | b'r' | b'R')) {
                io.advance();
                if matches!(io.lookahead(), Some(b'\'' | b'"')) {
                    io.mark_end();
                    return Some(TokenKind::PathPrefix);
                }
            }
            // Plain identifier starting with `p`; the grammar tokenizes it.
            return None;
        }

        if at_line_start && valid.contains(TokenKind::StringStart) {
            return string::scan_string_start(io, &mut self.state);
        }

        None
    }
}

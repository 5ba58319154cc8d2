//! Token contract between the scanner and the host grammar.

/// Tokens the scanner can be asked about, in the grammar's ordinal order.
///
/// The ordinal positions are part of the wire contract with the host parser
/// and must not be reordered. `Comment`, the `Close*` kinds, and `Except` are
/// never emitted; they participate only in valid-set queries (error-recovery
/// detection, bracket-nesting detection, and comment gating).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Logical line terminator.
    Newline = 0,
    /// Block opens at a deeper indent width.
    Indent,
    /// Block closes back to a shallower indent width.
    Dedent,
    /// Opening quote of a string literal, including its prefix.
    StringStart,
    /// One chunk of literal string content.
    StringContent,
    /// Doubled `{{` or `}}` inside an interpolated string.
    EscapeInterpolation,
    /// Closing quote of a string literal.
    StringEnd,
    /// `#` comment; owned by the grammar, never emitted here.
    Comment,
    /// `)` validity marker for bracket-nesting detection.
    CloseParen,
    /// `]` validity marker for bracket-nesting detection.
    CloseBracket,
    /// `}` validity marker for bracket-nesting detection.
    CloseBrace,
    /// `except` validity marker for comment gating.
    Except,
    /// Zero-width marker opening a bare subprocess line.
    SubprocessStart,
    /// `&&` in subprocess context.
    LogicalAnd,
    /// `||` in subprocess context.
    LogicalOr,
    /// Single `&` background operator.
    BackgroundAmp,
    /// `and` keyword in subprocess context.
    KeywordAnd,
    /// `or` keyword in subprocess context.
    KeywordOr,
    /// `ident! ` prefix opening a subprocess macro.
    SubprocessMacroStart,
    /// `with!` prefix opening a block macro.
    BlockMacroStart,
    /// `p`/`pf`/`pr` prefix marking a path string literal.
    PathPrefix,
}

impl TokenKind {
    /// Returns the grammar ordinal for this kind.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    const fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// Set of tokens the grammar accepts for the current invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidTokenSet(u32);

impl ValidTokenSet {
    /// Set containing no tokens.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from the listed kinds.
    pub fn of(kinds: &[TokenKind]) -> Self {
        let mut set = Self::EMPTY;
        for &kind in kinds {
            set.insert(kind);
        }
        set
    }

    /// Adds one kind to the set.
    pub fn insert(&mut self, kind: TokenKind) {
        self.0 |= kind.bit();
    }

    /// Returns a copy of the set with `kind` added.
    pub fn with(mut self, kind: TokenKind) -> Self {
        self.insert(kind);
        self
    }

    /// Returns `true` when `kind` is accepted.
    pub fn contains(self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// True when the grammar signals error recovery by accepting string
    /// content and an indent at the same position.
    pub(crate) fn error_recovery(self) -> bool {
        self.contains(TokenKind::StringContent) && self.contains(TokenKind::Indent)
    }

    /// True when the cursor sits inside an open bracket pair.
    pub(crate) fn within_brackets(self) -> bool {
        self.contains(TokenKind::CloseParen)
            || self.contains(TokenKind::CloseBracket)
            || self.contains(TokenKind::CloseBrace)
    }

    /// True when a `#` should be consumed as a comment in the block phase.
    pub(crate) fn gates_comment(self) -> bool {
        self.contains(TokenKind::Indent)
            || self.contains(TokenKind::Dedent)
            || self.contains(TokenKind::Newline)
            || self.contains(TokenKind::Except)
    }

    /// True when any line-class marker token is accepted.
    pub(crate) fn wants_line_class(self) -> bool {
        self.contains(TokenKind::SubprocessStart)
            || self.contains(TokenKind::SubprocessMacroStart)
            || self.contains(TokenKind::BlockMacroStart)
    }
}

//! Host lexer capability interface and the in-memory implementation.

/// Capability surface the host parser lends to the scanner for one
/// invocation.
///
/// The scanner consumes bytes through this interface only. `advance` records
/// a byte into the pending token, `skip` consumes it as leading trivia, and
/// `mark_end` commits everything advanced so far as the token extent. Bytes
/// advanced past the last `mark_end` are discarded by the host when the
/// invocation yields, which is what lets the line-class predictor peek to the
/// end of a line without consuming it.
pub trait LexerIo {
    /// Returns the byte under the cursor without consuming it.
    fn lookahead(&self) -> Option<u8>;

    /// Consumes one byte into the pending token.
    fn advance(&mut self);

    /// Consumes one byte as trivia preceding the pending token.
    fn skip(&mut self);

    /// Commits the consumed prefix as the token extent.
    fn mark_end(&mut self);

    /// Returns `true` once the cursor is past the last input byte.
    fn is_eof(&self) -> bool;
}

/// [`LexerIo`] over an in-memory byte slice.
///
/// Mirrors the host parser's cursor discipline: `skip` excludes bytes from
/// the token extent by moving the token start forward, and
/// [`SliceLexer::finish_token`] resolves a never-marked token to a zero-width
/// extent at the invocation start so marker tokens consume nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceLexer<'a> {
    input: &'a [u8],
    position: usize,
    token_start: usize,
    token_end: usize,
}

impl<'a> SliceLexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self::from_bytes(input.as_bytes())
    }

    /// Creates a lexer over raw bytes.
    pub fn from_bytes(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            token_start: 0,
            token_end: 0,
        }
    }

    /// Returns the current cursor byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Resets the pending token extent to the current cursor position.
    ///
    /// Call before each scanner invocation.
    pub fn begin_token(&mut self) {
        self.token_start = self.position;
        self.token_end = self.position;
    }

    /// Resolves the committed token extent and rewinds the cursor to it.
    ///
    /// When `mark_end` never ran after a `skip`, the token collapses to a
    /// zero-width extent at the invocation start; the skipped trivia is then
    /// re-read by the next invocation, exactly as the host parser would.
    pub fn finish_token(&mut self) -> std::ops::Range<usize> {
        if self.token_end < self.token_start {
            self.token_start = self.token_end;
        }
        self.position = self.token_end;
        self.token_start..self.token_end
    }

    /// Returns the text of the committed extent produced by `finish_token`.
    pub fn token_text(&self, range: std::ops::Range<usize>) -> &'a [u8] {
        &self.input[range]
    }

    /// Rewinds the cursor to `position`, discarding uncommitted consumption.
    pub fn rewind(&mut self, position: usize) {
        self.position = position.min(self.input.len());
    }
}

impl LexerIo for SliceLexer<'_> {
    fn lookahead(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn skip(&mut self) {
        self.advance();
        self.token_start = self.position;
    }

    fn mark_end(&mut self) {
        self.token_end = self.position;
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }
}

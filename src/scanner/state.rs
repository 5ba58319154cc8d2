//! Persistent scanner state and its snapshot encoding.

use thiserror::Error;

use crate::scanner::delimiter::Delimiter;

/// Failures of the snapshot encode/decode surface.
///
/// The scan path itself never fails; snapshots are the only fallible API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The output buffer cannot hold the header and delimiter section.
    #[error("snapshot buffer holds {capacity} bytes but {required} are required for the header and {delimiters} delimiter entries")]
    BufferTooSmall {
        /// Bytes available in the output buffer.
        capacity: usize,
        /// Delimiter entries that must be written.
        delimiters: usize,
        /// Minimum bytes the buffer must hold.
        required: usize,
    },
    /// The input buffer ends inside its own two-byte header.
    #[error("snapshot shorter than its two-byte header")]
    TruncatedHeader,
    /// The input buffer promises more delimiter entries than it carries.
    #[error("snapshot declares {declared} delimiter entries but only {available} bytes follow the header")]
    TruncatedDelimiters {
        /// Entries the header declares.
        declared: usize,
        /// Bytes actually present after the header.
        available: usize,
    },
}

/// Scanner state persisted across invocations and parse checkpoints.
///
/// The indent stack is never empty and always starts at width `0`; the
/// delimiter stack holds one entry per open string literal, bottom-to-top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerState {
    indents: Vec<u16>,
    delimiters: Vec<Delimiter>,
    inside_interpolated: bool,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScannerState {
    /// Creates the pristine state: indent stack `{0}`, no open strings.
    pub fn new() -> Self {
        Self {
            indents: vec![0],
            delimiters: Vec::new(),
            inside_interpolated: false,
        }
    }

    /// Returns the indent width of the enclosing block.
    pub fn current_indent(&self) -> u16 {
        *self.indents.last().expect("indent stack holds at least 0")
    }

    /// Returns the number of indent entries, counting the implicit bottom.
    pub fn indent_depth(&self) -> usize {
        self.indents.len()
    }

    /// Opens a block at `width` columns.
    pub fn push_indent(&mut self, width: u32) {
        self.indents.push(u16::try_from(width).unwrap_or(u16::MAX));
    }

    /// Closes the innermost block.
    pub fn pop_indent(&mut self) {
        debug_assert!(self.indents.len() > 1, "implicit bottom must stay");
        if self.indents.len() > 1 {
            self.indents.pop();
        }
    }

    /// Returns the innermost open string delimiter.
    pub fn top_delimiter(&self) -> Option<Delimiter> {
        self.delimiters.last().copied()
    }

    /// Returns the number of open string literals.
    pub fn delimiter_depth(&self) -> usize {
        self.delimiters.len()
    }

    /// Opens a string literal.
    pub fn push_delimiter(&mut self, delimiter: Delimiter) {
        self.delimiters.push(delimiter);
        self.inside_interpolated = delimiter.is_format();
    }

    /// Closes the innermost string literal.
    ///
    /// The interpolation flag is recomputed from the new stack top so that a
    /// plain literal nested inside an interpolation hole hands control back
    /// to the enclosing interpolated string.
    pub fn pop_delimiter(&mut self) -> Option<Delimiter> {
        let popped = self.delimiters.pop();
        self.inside_interpolated = self
            .delimiters
            .last()
            .is_some_and(|delimiter| delimiter.is_format());
        popped
    }

    /// True while the innermost open string is interpolated.
    pub fn inside_interpolated(&self) -> bool {
        self.inside_interpolated
    }

    /// Encodes the state into `buffer`, returning the bytes written.
    ///
    /// Layout: interpolation flag, delimiter count saturated to 255, one flag
    /// byte per delimiter bottom-to-top, then the indent entries above the
    /// implicit bottom clamped to 255 columns each. Indent entries that do
    /// not fit the buffer are dropped.
    pub fn serialize(&self, buffer: &mut [u8]) -> Result<usize, SnapshotError> {
        let delimiter_count = self.delimiters.len().min(usize::from(u8::MAX));
        let required = 2 + delimiter_count;
        if buffer.len() < required {
            return Err(SnapshotError::BufferTooSmall {
                capacity: buffer.len(),
                delimiters: delimiter_count,
                required,
            });
        }

        buffer[0] = u8::from(self.inside_interpolated);
        buffer[1] = delimiter_count as u8;
        for (slot, delimiter) in buffer[2..required].iter_mut().zip(&self.delimiters) {
            *slot = delimiter.raw();
        }

        let mut written = required;
        for &width in self.indents.iter().skip(1) {
            if written >= buffer.len() {
                break;
            }
            buffer[written] = u8::try_from(width).unwrap_or(u8::MAX);
            written += 1;
        }
        Ok(written)
    }

    /// Restores the state from a snapshot buffer.
    ///
    /// An empty buffer restores the pristine state.
    pub fn deserialize(&mut self, buffer: &[u8]) -> Result<(), SnapshotError> {
        self.indents.clear();
        self.indents.push(0);
        self.delimiters.clear();
        self.inside_interpolated = false;

        if buffer.is_empty() {
            return Ok(());
        }
        if buffer.len() < 2 {
            return Err(SnapshotError::TruncatedHeader);
        }

        let declared = usize::from(buffer[1]);
        let body = &buffer[2..];
        if body.len() < declared {
            return Err(SnapshotError::TruncatedDelimiters {
                declared,
                available: body.len(),
            });
        }

        self.inside_interpolated = buffer[0] != 0;
        self.delimiters
            .extend(body[..declared].iter().map(|&raw| Delimiter::from_raw(raw)));
        self.indents
            .extend(body[declared..].iter().map(|&width| u16::from(width)));
        Ok(())
    }
}

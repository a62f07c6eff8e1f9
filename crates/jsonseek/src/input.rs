//! Forward-only byte input over any [`std::io::Read`].
//!
//! [`Input`] owns the reader together with one fixed-size read buffer. The
//! lexer works byte by byte through [`Input::peek`] and [`Input::bump`], and
//! the buffer is refilled only when it runs dry, so at most one buffer's worth
//! of bytes is ever read ahead of the parse position.
//!
//! The input keeps the global position (`offset`, `line`, `column`) of the
//! next unconsumed byte. Columns count characters, not bytes: UTF-8
//! continuation bytes do not advance the column.

use std::io::{self, ErrorKind, Read};

/// A location in the source document.
///
/// `offset` is the 0-based byte offset; `line` and `column` are 1-based, with
/// `column` counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    #[inline(always)]
    fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if !is_continuation_byte(byte) {
            self.column += 1;
        }
    }
}

#[inline(always)]
fn is_continuation_byte(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[derive(Debug)]
pub(crate) struct Input<R> {
    reader: R,
    buf: Box<[u8]>,
    /// Index of the next unconsumed byte in `buf`.
    head: usize,
    /// Number of valid bytes in `buf`.
    len: usize,
    eof: bool,
    position: Position,
}

impl<R: Read> Input<R> {
    pub(crate) fn new(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            head: 0,
            len: 0,
            eof: false,
            position: Position::default(),
        }
    }

    /// Position of the next byte [`peek`](Self::peek) would return.
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// Refills the buffer if it has been fully consumed.
    ///
    /// Returns `false` once the reader reports end of input.
    fn fill(&mut self) -> io::Result<bool> {
        if self.head < self.len {
            return Ok(true);
        }
        if self.eof {
            return Ok(false);
        }
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    self.head = 0;
                    self.len = 0;
                    return Ok(false);
                }
                Ok(n) => {
                    self.head = 0;
                    self.len = n;
                    return Ok(true);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }

    /// Returns the next byte without consuming it, or `None` at end of input.
    #[inline(always)]
    pub(crate) fn peek(&mut self) -> io::Result<Option<u8>> {
        if self.head < self.len {
            return Ok(Some(self.buf[self.head]));
        }
        Ok(if self.fill()? {
            Some(self.buf[self.head])
        } else {
            None
        })
    }

    /// Consumes the byte last returned by [`peek`](Self::peek). Does nothing
    /// when no byte is buffered.
    #[inline(always)]
    pub(crate) fn bump(&mut self) {
        if self.head < self.len {
            self.position.advance(self.buf[self.head]);
            self.head += 1;
        }
    }

    /// Skips JSON insignificant whitespace (space, tab, line feed, carriage
    /// return).
    pub(crate) fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(byte) = self.peek()? {
            if !matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
                break;
            }
            self.bump();
        }
        Ok(())
    }

    /// Copies bytes into `dst` for as long as `pred` holds, refilling the
    /// buffer as needed. Returns the number of bytes copied.
    ///
    /// `pred` must reject `b'\n'`; the column is advanced per character and
    /// the line counter is left untouched.
    pub(crate) fn copy_while<F: Fn(u8) -> bool>(
        &mut self,
        dst: &mut Vec<u8>,
        pred: F,
    ) -> io::Result<usize> {
        let mut copied = 0;
        while self.fill()? {
            let available = &self.buf[self.head..self.len];
            let run = available
                .iter()
                .position(|&b| !pred(b))
                .unwrap_or(available.len());
            let chunk = &available[..run];
            dst.extend_from_slice(chunk);

            debug_assert!(!chunk.contains(&b'\n'));
            self.position.offset += run;
            self.position.column += chunk.iter().filter(|&&b| !is_continuation_byte(b)).count();
            self.head += run;
            copied += run;

            if self.head < self.len {
                break;
            }
        }
        Ok(copied)
    }
}

//! The streaming array decoder.
//!
//! [`ArrayDecoder`] reads one top-level JSON array from any [`Read`] and
//! yields its elements one at a time, fully parsed, in source order. Only the
//! element currently being built and one read buffer are held in memory.
//!
//! # Examples
//!
//! ```rust
//! use jsonseek::{ArrayDecoder, DecoderOptions, Value};
//!
//! let source = br#"[{"id": 1}, [true, null], "three"]"#;
//! let mut decoder = ArrayDecoder::new(&source[..], DecoderOptions::default());
//!
//! let first = decoder.next().unwrap().unwrap();
//! assert_eq!(first.to_string(), r#"{"id":1}"#);
//! assert_eq!(decoder.elements_emitted(), 1);
//!
//! // Nothing past the first element has been parsed; stop here.
//! decoder.stop();
//! assert!(decoder.next().is_none());
//! ```
#![allow(clippy::enum_glob_use)]

use core::iter::FusedIterator;
use std::io::Read;

use tracing::{debug, trace};

use crate::{
    error::{DecodeError, SyntaxError},
    frame::{Frame, FrameStack},
    input::{Input, Position},
    lexer::Lexer,
    options::DecoderOptions,
    value::Value,
};

/// Creates an [`ArrayDecoder`] with default options.
pub fn decode<R: Read>(reader: R) -> ArrayDecoder<R> {
    ArrayDecoder::new(reader, DecoderOptions::default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforeFirstArrayValue,
    BeforeArrayValue,
    AfterArrayValue,
    BeforeFirstPropertyName,
    BeforePropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    AfterPropertyValue,
    /// The top-level array is closed; only trailing input remains.
    End,
}

/// Iterator over the elements of a top-level JSON array.
///
/// Each call to [`next`](Iterator::next) reads just far enough to complete one
/// more element. The iterator ends after the closing `]`, or after yielding
/// the first error; either way the reader is dropped at that point. Call
/// [`stop`](Self::stop) (or drop the decoder) to release the reader early.
///
/// A decoder is single-use: decoding the same source again needs a fresh
/// reader and a fresh decoder.
#[derive(Debug)]
pub struct ArrayDecoder<R> {
    input: Option<Input<R>>,
    parser: Parser,
    emitted: usize,
    /// Where the input was when it was released.
    released_at: Position,
}

impl<R: Read> ArrayDecoder<R> {
    /// Creates a decoder reading from `reader`. Nothing is read until the
    /// first call to [`next`](Iterator::next).
    #[must_use]
    pub fn new(reader: R, options: DecoderOptions) -> Self {
        Self {
            input: Some(Input::new(reader, options.buffer_capacity)),
            parser: Parser::new(options),
            emitted: 0,
            released_at: Position::default(),
        }
    }

    /// Number of elements yielded so far.
    #[must_use]
    pub fn elements_emitted(&self) -> usize {
        self.emitted
    }

    /// Position of the next byte the decoder would parse.
    ///
    /// Once the decoder has finished or been stopped this stays at the
    /// position where the reader was released.
    #[must_use]
    pub fn position(&self) -> Position {
        self.input
            .as_ref()
            .map_or(self.released_at, Input::position)
    }

    /// Whether the reader has been released.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.input.is_none()
    }

    /// Stops decoding: drops the reader and all buffers. Later calls to
    /// [`next`](Iterator::next) return `None`.
    pub fn stop(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(input) = self.input.take() {
            self.released_at = input.position();
            drop(input);
            self.parser.reset();
            debug!(
                elements = self.emitted,
                bytes = self.released_at.offset,
                "released array source"
            );
        }
    }
}

impl<R: Read> Iterator for ArrayDecoder<R> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input.as_mut()?;
        match self.parser.next_element(input) {
            Ok(Some(value)) => {
                trace!(
                    index = self.emitted,
                    offset = input.position().offset,
                    "decoded array element"
                );
                self.emitted += 1;
                Some(Ok(value))
            }
            Ok(None) => {
                self.release();
                None
            }
            Err(err) => {
                self.release();
                Some(Err(err))
            }
        }
    }
}

impl<R: Read> FusedIterator for ArrayDecoder<R> {}

/// The state machine driving one decode, independent of the input it reads
/// from.
#[derive(Debug)]
struct Parser {
    parse_state: ParseState,
    frames: FrameStack,
    lexer: Lexer,
    max_depth: Option<usize>,
    allow_trailing_data: bool,
}

impl Parser {
    fn new(options: DecoderOptions) -> Self {
        Self {
            parse_state: ParseState::Start,
            frames: FrameStack::new(),
            lexer: Lexer::new(),
            max_depth: options.max_depth,
            allow_trailing_data: options.allow_trailing_data,
        }
    }

    /// Drops the partially built element and any scratch space.
    fn reset(&mut self) {
        self.frames.clear();
        self.lexer = Lexer::new();
    }

    /// Drives the state machine until one top-level element is complete.
    ///
    /// Returns:
    /// * `Ok(Some(value))` – the next element
    /// * `Ok(None)`        – the array is closed and the input is exhausted
    /// * `Err(err)`        – malformed input or a failed read
    fn next_element<R: Read>(
        &mut self,
        input: &mut Input<R>,
    ) -> Result<Option<Value>, DecodeError> {
        use ParseState::*;

        if self.parse_state == Start {
            Self::skip_byte_order_mark(input)?;
        }

        loop {
            input.skip_whitespace()?;
            let position = input.position();
            let next = input.peek()?;

            match (self.parse_state, next) {
                (End, None) => return Ok(None),
                (_, None) => {
                    return Err(DecodeError::syntax(
                        SyntaxError::UnexpectedEndOfInput,
                        position,
                    ));
                }

                (Start, Some(b'[')) => {
                    input.bump();
                    self.parse_state = BeforeFirstArrayValue;
                }
                (Start, Some(_)) => {
                    return Err(DecodeError::syntax(SyntaxError::ExpectedArray, position));
                }

                (BeforeFirstArrayValue | AfterArrayValue, Some(b']')) => {
                    input.bump();
                    if let Some(value) = self.close_container() {
                        return Ok(Some(value));
                    }
                }
                (BeforeArrayValue, Some(b']')) | (BeforePropertyName, Some(b'}')) => {
                    return Err(DecodeError::syntax(SyntaxError::TrailingComma, position));
                }
                (BeforeFirstArrayValue | BeforeArrayValue | BeforePropertyValue, Some(b)) => {
                    if let Some(value) = self.begin_value(input, b, position)? {
                        return Ok(Some(value));
                    }
                }
                (AfterArrayValue, Some(b',')) => {
                    input.bump();
                    self.parse_state = BeforeArrayValue;
                }

                (BeforeFirstPropertyName, Some(b'}')) | (AfterPropertyValue, Some(b'}')) => {
                    input.bump();
                    if let Some(value) = self.close_container() {
                        return Ok(Some(value));
                    }
                }
                (BeforeFirstPropertyName | BeforePropertyName, Some(b'"')) => {
                    let key = self.lexer.lex_string(input)?;
                    self.frames.set_pending_key(key);
                    self.parse_state = AfterPropertyName;
                }
                (AfterPropertyName, Some(b':')) => {
                    input.bump();
                    self.parse_state = BeforePropertyValue;
                }
                (AfterPropertyValue, Some(b',')) => {
                    input.bump();
                    self.parse_state = BeforePropertyName;
                }

                (End, Some(_)) if self.allow_trailing_data => return Ok(None),
                (End, Some(_)) => {
                    return Err(DecodeError::syntax(
                        SyntaxError::TrailingCharacters,
                        position,
                    ));
                }

                (_, Some(b)) => {
                    return Err(DecodeError::syntax(
                        SyntaxError::unexpected_byte(b),
                        position,
                    ));
                }
            }
        }
    }

    /// Skips a UTF-8 byte-order mark at the very start of the source.
    fn skip_byte_order_mark<R: Read>(input: &mut Input<R>) -> Result<(), DecodeError> {
        if input.peek()? != Some(0xEF) {
            return Ok(());
        }
        for expected in [0xEF, 0xBB, 0xBF] {
            let next = input.peek()?;
            if next != Some(expected) {
                return Err(DecodeError::syntax(
                    SyntaxError::unexpected(next),
                    input.position(),
                ));
            }
            input.bump();
        }
        Ok(())
    }

    /// Starts the value whose first byte `first` has been peeked.
    fn begin_value<R: Read>(
        &mut self,
        input: &mut Input<R>,
        first: u8,
        position: Position,
    ) -> Result<Option<Value>, DecodeError> {
        let (frame, state) = match first {
            b'{' => (Frame::new_object_frame(), ParseState::BeforeFirstPropertyName),
            b'[' => (Frame::new_array_frame(), ParseState::BeforeFirstArrayValue),
            _ => {
                let value = self.lexer.lex_scalar(input, first)?;
                return Ok(self.complete(value));
            }
        };

        if let Some(max) = self.max_depth.filter(|max| self.frames.depth() >= *max) {
            return Err(DecodeError::syntax(
                SyntaxError::DepthLimitExceeded(max),
                position,
            ));
        }
        input.bump();
        self.frames.push(frame);
        self.parse_state = state;
        Ok(None)
    }

    /// Handles a consumed `]` or `}`.
    fn close_container(&mut self) -> Option<Value> {
        match self.frames.pop() {
            Some(value) => self.complete(value),
            None => {
                self.parse_state = ParseState::End;
                None
            }
        }
    }

    /// Attaches a finished value to its parent, returning it if it is a
    /// top-level element.
    fn complete(&mut self, value: Value) -> Option<Value> {
        self.parse_state = match self.frames.last() {
            None | Some(Frame::Array(_)) => ParseState::AfterArrayValue,
            Some(Frame::Object { .. }) => ParseState::AfterPropertyValue,
        };
        self.frames.attach(value)
    }
}

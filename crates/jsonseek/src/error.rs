use std::io;

use bstr::BString;
use thiserror::Error;

use crate::input::Position;

/// Why a source document is not a well-formed JSON array.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A byte that cannot start or continue the current token.
    #[error("invalid character {0:?}")]
    UnexpectedCharacter(BString),
    /// The source ended inside the array.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The document does not start with `[`.
    #[error("expected '[' at the start of the document")]
    ExpectedArray,
    /// A `,` directly before `]` or `}`.
    #[error("trailing comma")]
    TrailingComma,
    /// Non-whitespace after the closing `]`.
    #[error("trailing characters after the top-level array")]
    TrailingCharacters,
    /// A backslash followed by a character that is not a JSON escape.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// A `\u` escape with a non-hex digit.
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A UTF-16 surrogate escape without its other half.
    #[error("lone surrogate \\u{0:04X} in unicode escape")]
    LoneSurrogate(u16),
    /// A raw byte below `0x20` inside a string.
    #[error("unescaped control character \\u{0:04X} in string")]
    ControlCharacterInString(u8),
    /// String contents that are not valid UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// A number lexeme that could not be converted.
    #[error("invalid number")]
    InvalidNumber,
    /// A number too large for an `f64`.
    #[error("number out of range")]
    NumberOutOfRange,
    /// Containers nested beyond [`DecoderOptions::max_depth`](crate::DecoderOptions::max_depth).
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
}

impl SyntaxError {
    pub(crate) fn unexpected_byte(byte: u8) -> Self {
        Self::UnexpectedCharacter(BString::from(vec![byte]))
    }

    /// The error for finding `next` where something else was required.
    pub(crate) fn unexpected(next: Option<u8>) -> Self {
        match next {
            Some(byte) => Self::unexpected_byte(byte),
            None => Self::UnexpectedEndOfInput,
        }
    }
}

/// A syntax error together with where in the source it was found.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "{source} at line {line} column {column} (byte {offset})",
    line = .position.line,
    column = .position.column,
    offset = .position.offset
)]
pub struct ParseError {
    /// What went wrong.
    pub source: SyntaxError,
    /// Where the offending byte, or the end of input, was found.
    pub position: Position,
}

impl ParseError {
    pub(crate) fn new(source: SyntaxError, position: Position) -> Self {
        Self { source, position }
    }

    /// The 1-based line of the error.
    #[must_use]
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// The 1-based column of the error.
    #[must_use]
    pub fn column(&self) -> usize {
        self.position.column
    }

    /// The 0-based byte offset of the error.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.position.offset
    }
}

/// An error yielded by [`ArrayDecoder`](crate::ArrayDecoder).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The reader failed.
    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    pub(crate) fn syntax(source: SyntaxError, position: Position) -> Self {
        Self::Parse(ParseError::new(source, position))
    }
}

/// Why a lookup could not produce a [`LookupResult`](crate::LookupResult).
///
/// A target beyond the end of the array is not an error; it is reported as
/// [`LookupResult::NotFound`](crate::LookupResult::NotFound).
#[derive(Debug, Error)]
pub enum LookupError {
    /// The requested ordinal is negative or not an integer. The source was not
    /// touched.
    #[error("invalid target index: {0}")]
    InvalidArgument(String),
    /// The source is not a well-formed JSON array up to the target.
    #[error("source is not a valid JSON array: {0}")]
    Parse(#[from] ParseError),
    /// The source could not be opened or read.
    #[error("source is unreadable: {0}")]
    Resource(#[from] io::Error),
}

impl From<DecodeError> for LookupError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Parse(err) => Self::Parse(err),
            DecodeError::Io(err) => Self::Resource(err),
        }
    }
}

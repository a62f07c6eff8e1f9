//! Fetch one record from a large on-disk JSON array without loading the
//! array into memory.
//!
//! The source is parsed incrementally by an [`ArrayDecoder`], which yields the
//! elements of the top-level array one at a time. A [`lookup`] counts the
//! elements as they complete and stops reading the moment the requested
//! ordinal has been produced; memory use is bounded by the size of one
//! element plus a fixed read buffer, whatever the size of the array.
//!
//! ```rust,no_run
//! use jsonseek::{lookup_path, LookupError, LookupResult};
//!
//! match lookup_path("public/features.json", 42) {
//!     Ok(LookupResult::Found(record)) => println!("{record}"),
//!     Ok(LookupResult::NotFound) => println!("record not found"),
//!     Err(LookupError::InvalidArgument(msg)) => println!("bad request: {msg}"),
//!     Err(err) => println!("source unreadable: {err}"),
//! }
//! ```
//!
//! The library only emits [`tracing`] events; installing a subscriber is up
//! to the host.

mod decoder;
mod error;
mod escape_buffer;
mod frame;
mod input;
mod lexer;
mod literal_buffer;
mod lookup;
mod options;
mod value;

#[cfg(test)]
mod tests;

pub use decoder::{ArrayDecoder, decode};
pub use error::{DecodeError, LookupError, ParseError, SyntaxError};
pub use input::Position;
pub use lookup::{Lookup, LookupResult, TargetIndex, lookup, lookup_path};
pub use options::{DEFAULT_BUFFER_CAPACITY, DecoderOptions};
pub use value::{Array, Map, Value};

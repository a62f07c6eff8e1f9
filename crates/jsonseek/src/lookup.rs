//! Fetching one element of a top-level JSON array by ordinal.
//!
//! A lookup drives an [`ArrayDecoder`] and counts the elements it yields. As
//! soon as the element at the target ordinal is produced the decoder is
//! stopped, so nothing after that element is read or parsed. Malformed input
//! past the target therefore never surfaces as an error.
//!
//! # Examples
//!
//! ```rust
//! use jsonseek::{lookup, LookupError, LookupResult};
//!
//! let source = r#"[{"a":1},{"a":2},{"a":3}]"#;
//!
//! let found = lookup(source.as_bytes(), 1)?;
//! assert_eq!(found.into_record().unwrap().to_string(), r#"{"a":2}"#);
//!
//! assert_eq!(lookup(source.as_bytes(), 5)?, LookupResult::NotFound);
//! assert!(matches!(
//!     lookup(source.as_bytes(), -1),
//!     Err(LookupError::InvalidArgument(_))
//! ));
//! # Ok::<(), LookupError>(())
//! ```

use core::{fmt, str::FromStr};
use std::{fs::File, io::Read, path::Path};

use tracing::{debug, warn};

use crate::{
    decoder::ArrayDecoder, error::LookupError, options::DecoderOptions, value::Value,
};

/// A validated, zero-based element ordinal.
///
/// Built from a `usize`, from an `i64` (negative values are rejected), or
/// parsed from text such as a URL path segment.
///
/// ```rust
/// use jsonseek::{LookupError, TargetIndex};
///
/// assert_eq!("42".parse::<TargetIndex>().unwrap().get(), 42);
/// assert!(matches!("-1".parse::<TargetIndex>(), Err(LookupError::InvalidArgument(_))));
/// assert!(matches!("4.2".parse::<TargetIndex>(), Err(LookupError::InvalidArgument(_))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetIndex(usize);

impl TargetIndex {
    /// Creates a target for the element at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The ordinal as a `usize`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for TargetIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl TryFrom<i64> for TargetIndex {
    type Error = LookupError;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        if index < 0 {
            return Err(LookupError::InvalidArgument(format!(
                "{index} is negative"
            )));
        }
        usize::try_from(index)
            .map(Self)
            .map_err(|_| LookupError::InvalidArgument(format!("{index} is out of range")))
    }
}

impl FromStr for TargetIndex {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s
            .trim()
            .parse::<i64>()
            .map_err(|_| LookupError::InvalidArgument(format!("{s:?} is not an integer")))?;
        Self::try_from(index)
    }
}

impl fmt::Display for TargetIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The outcome of a lookup over a well-formed source.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// The element at the target ordinal.
    Found(Value),
    /// The array has no element at the target ordinal.
    NotFound,
}

impl LookupResult {
    /// Returns `true` for [`LookupResult::Found`].
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the record, if one was found.
    #[must_use]
    pub fn into_record(self) -> Option<Value> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound => None,
        }
    }
}

/// A configured lookup service.
///
/// Holds no per-request state; one `Lookup` can serve any number of lookups,
/// concurrently or not, each against its own source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lookup {
    options: DecoderOptions,
}

impl Lookup {
    /// Creates a lookup service decoding with `options`.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    /// The decoder options used for every lookup.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Returns the element at `target` from the array in `source`.
    ///
    /// The source is read only as far as needed and is dropped before this
    /// returns, on every path.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Parse`] if the source is malformed before the target
    ///   element is complete (or anywhere, if the target is never reached).
    /// - [`LookupError::Resource`] if reading the source fails.
    pub fn find<R: Read>(&self, source: R, target: TargetIndex) -> Result<LookupResult, LookupError> {
        let mut decoder = ArrayDecoder::new(source, self.options);
        let mut cursor = 0usize;

        #[allow(clippy::while_let_on_iterator)]
        while let Some(record) = decoder.next() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!(
                        target_index = target.get(),
                        elements_scanned = cursor,
                        error = %err,
                        "lookup failed"
                    );
                    return Err(err.into());
                }
            };
            debug_assert_eq!(cursor + 1, decoder.elements_emitted());

            if cursor == target.get() {
                decoder.stop();
                debug!(
                    target_index = target.get(),
                    bytes_read = decoder.position().offset,
                    "record found"
                );
                return Ok(LookupResult::Found(record));
            }
            cursor += 1;
        }

        debug!(
            target_index = target.get(),
            elements = cursor,
            bytes_read = decoder.position().offset,
            "record not found"
        );
        Ok(LookupResult::NotFound)
    }

    /// Opens the file at `path` and returns the element at `target`.
    ///
    /// # Errors
    ///
    /// As [`find`](Self::find); failing to open the file is a
    /// [`LookupError::Resource`].
    pub fn find_in_file<P: AsRef<Path>>(
        &self,
        path: P,
        target: TargetIndex,
    ) -> Result<LookupResult, LookupError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            warn!(path = %path.display(), error = %err, "failed to open source");
            LookupError::Resource(err)
        })?;
        self.find(file, target)
    }
}

/// Returns the element at ordinal `target` from the JSON array in `source`,
/// using default options.
///
/// A negative `target` is rejected before `source` is touched.
///
/// # Errors
///
/// - [`LookupError::InvalidArgument`] if `target` is negative.
/// - [`LookupError::Parse`] / [`LookupError::Resource`] as for
///   [`Lookup::find`].
pub fn lookup<R: Read>(source: R, target: i64) -> Result<LookupResult, LookupError> {
    let target = TargetIndex::try_from(target)?;
    Lookup::default().find(source, target)
}

/// Opens the file at `path` and returns the element at ordinal `target`,
/// using default options.
///
/// A negative `target` is rejected before the file is opened.
///
/// # Errors
///
/// As [`lookup`]; failing to open the file is a [`LookupError::Resource`].
pub fn lookup_path<P: AsRef<Path>>(path: P, target: i64) -> Result<LookupResult, LookupError> {
    let target = TargetIndex::try_from(target)?;
    Lookup::default().find_in_file(path, target)
}

/// Read buffer size used when none is configured.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Configuration options for [`ArrayDecoder`](crate::ArrayDecoder) and
/// [`Lookup`](crate::Lookup).
///
/// # Examples
///
/// ```rust
/// use jsonseek::{ArrayDecoder, DecoderOptions};
///
/// let options = DecoderOptions {
///     buffer_capacity: 64 * 1024,
///     max_depth: Some(128),
///     ..Default::default()
/// };
/// let decoder = ArrayDecoder::new(&b"[1, 2, 3]"[..], options);
/// assert_eq!(decoder.count(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DecoderOptions {
    /// Size in bytes of the buffer the source is read through.
    ///
    /// At most this many bytes are read ahead of the parse position. Values
    /// below 1 are treated as 1.
    ///
    /// # Default
    ///
    /// [`DEFAULT_BUFFER_CAPACITY`] (8 KiB)
    pub buffer_capacity: usize,

    /// Maximum nesting of objects and arrays inside one element.
    ///
    /// Nesting is tracked on the heap, so any depth can be decoded; this only
    /// exists to bound memory for untrusted sources. An element `[[1]]` has
    /// depth 2.
    ///
    /// # Default
    ///
    /// `None` (unlimited)
    pub max_depth: Option<usize>,

    /// Whether bytes after the closing `]` of the top-level array are
    /// ignored.
    ///
    /// When `false`, only whitespace may follow the array, and anything else
    /// fails with [`SyntaxError::TrailingCharacters`] once the array has been
    /// fully read.
    ///
    /// [`SyntaxError::TrailingCharacters`]: crate::SyntaxError::TrailingCharacters
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_data: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_depth: None,
            allow_trailing_data: false,
        }
    }
}

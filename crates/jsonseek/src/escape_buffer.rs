//! Decoding of `\uXXXX` escape sequences.
//!
//! [`UnicodeEscapeBuffer`] accumulates the four hexadecimal digits of one
//! escape into a UTF-16 code unit, and pairs a high surrogate with the low
//! surrogate of the escape that must follow it.
//!
//! # Errors
//!
//! - A non-hexadecimal digit is an [`SyntaxError::InvalidUnicodeEscape`].
//! - A low surrogate without a preceding high surrogate, or a high surrogate
//!   not followed by a low one, is an [`SyntaxError::LoneSurrogate`].
use crate::error::SyntaxError;

const HIGH_SURROGATES: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    unit: u16,
    len: u8,
    high_surrogate: Option<u16>,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits. A pending high surrogate is kept.
    pub fn reset(&mut self) {
        self.unit = 0;
        self.len = 0;
    }

    /// Forgets everything, including a pending high surrogate.
    pub fn clear(&mut self) {
        self.reset();
        self.high_surrogate = None;
    }

    /// The high surrogate still waiting for its low half, if any.
    pub fn pending_high_surrogate(&self) -> Option<u16> {
        self.high_surrogate
    }

    /// Feeds one hexadecimal digit.
    ///
    /// Returns `Ok(Some(unit))` once the fourth digit completes a code unit,
    /// after which the digit buffer is empty again.
    pub fn feed(&mut self, digit: u8) -> Result<Option<u16>, SyntaxError> {
        let nibble = match digit {
            b'0'..=b'9' => digit - b'0',
            b'a'..=b'f' => digit - b'a' + 10,
            b'A'..=b'F' => digit - b'A' + 10,
            _ => return Err(SyntaxError::InvalidUnicodeEscape),
        };
        self.unit = (self.unit << 4) | u16::from(nibble);
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.unit;
        self.reset();
        Ok(Some(unit))
    }

    /// Turns a completed code unit into a `char`.
    ///
    /// Returns `Ok(None)` when `unit` is a high surrogate; the caller must
    /// then supply the low surrogate from the next escape.
    pub fn resolve(&mut self, unit: u16) -> Result<Option<char>, SyntaxError> {
        match self.high_surrogate.take() {
            None if HIGH_SURROGATES.contains(&unit) => {
                self.high_surrogate = Some(unit);
                Ok(None)
            }
            None if LOW_SURROGATES.contains(&unit) => Err(SyntaxError::LoneSurrogate(unit)),
            None => char::from_u32(u32::from(unit))
                .map(Some)
                .ok_or(SyntaxError::InvalidUnicodeEscape),
            Some(high) if LOW_SURROGATES.contains(&unit) => {
                let code = 0x1_0000
                    + ((u32::from(high) - 0xD800) << 10)
                    + (u32::from(unit) - 0xDC00);
                char::from_u32(code)
                    .map(Some)
                    .ok_or(SyntaxError::InvalidUnicodeEscape)
            }
            Some(high) => Err(SyntaxError::LoneSurrogate(high)),
        }
    }
}

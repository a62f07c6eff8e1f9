use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpectedLiteralValue {
    Null,
    True,
    False,
}

/// What happened after feeding one more byte into the literal matcher?
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Value),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// `None`  ➜  we are **not** in the middle of a literal
/// `Some`  ➜  `(remaining_bytes, token_kind)` while matching
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer(Option<(&'static [u8], ExpectedLiteralValue)>);

impl ExpectedLiteralBuffer {
    /// Start matching after the *first* byte (`n`, `t`, or `f`)
    pub(crate) fn new(first: u8) -> Self {
        match first {
            b'n' => ExpectedLiteralBuffer(Some((b"ull", ExpectedLiteralValue::Null))),
            b't' => ExpectedLiteralBuffer(Some((b"rue", ExpectedLiteralValue::True))),
            b'f' => ExpectedLiteralBuffer(Some((b"alse", ExpectedLiteralValue::False))),
            _ => ExpectedLiteralBuffer(None),
        }
    }

    /// Give the matcher the next input byte and learn what to do next.
    pub(crate) fn step(&mut self, b: Option<u8>) -> Step {
        let Some((bytes, kind)) = self.0.take() else {
            return Step::Reject;
        };

        match (bytes.split_first(), b) {
            (Some((expected, rest)), Some(b)) if *expected == b => {
                if rest.is_empty() {
                    Step::Done(match kind {
                        ExpectedLiteralValue::Null => Value::Null,
                        ExpectedLiteralValue::True => Value::Boolean(true),
                        ExpectedLiteralValue::False => Value::Boolean(false),
                    })
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            _ => {
                // Mismatch – restore the state we took at the top
                self.0 = Some((bytes, kind));
                Step::Reject
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpectedLiteralBuffer, Step};
    use crate::value::Value;

    #[test]
    fn matches_each_literal() {
        for (text, value) in [
            ("null", Value::Null),
            ("true", Value::Boolean(true)),
            ("false", Value::Boolean(false)),
        ] {
            let bytes = text.as_bytes();
            let mut buf = ExpectedLiteralBuffer::new(bytes[0]);
            for &b in &bytes[1..bytes.len() - 1] {
                assert_eq!(buf.step(Some(b)), Step::NeedMore);
            }
            assert_eq!(buf.step(bytes.last().copied()), Step::Done(value));
        }
    }

    #[test]
    fn rejects_mismatch_and_end_of_input() {
        let mut buf = ExpectedLiteralBuffer::new(b't');
        assert_eq!(buf.step(Some(b'r')), Step::NeedMore);
        assert_eq!(buf.step(Some(b'x')), Step::Reject);
        assert_eq!(buf.step(None), Step::Reject);
    }

    #[test]
    fn unknown_first_byte_rejects() {
        let mut buf = ExpectedLiteralBuffer::new(b'x');
        assert_eq!(buf.step(Some(b'u')), Step::Reject);
    }
}

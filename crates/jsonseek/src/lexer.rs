//! Scalar lexing: strings, numbers and the `true`/`false`/`null` literals.
//!
//! Structural bytes (`[`, `]`, `{`, `}`, `,`, `:`) are matched directly by the
//! decoder's state machine; the lexer is only entered once the decoder has
//! peeked the first byte of a scalar. Every lexing function leaves the input
//! positioned on the first byte after the scalar.

use std::io::Read;

use crate::{
    error::{DecodeError, SyntaxError},
    escape_buffer::UnicodeEscapeBuffer,
    input::Input,
    literal_buffer::{ExpectedLiteralBuffer, Step},
    value::Value,
};

#[derive(Debug, Default)]
pub(crate) struct Lexer {
    /// Reused for string payloads and number lexemes.
    scratch: Vec<u8>,
    unicode_escape_buffer: UnicodeEscapeBuffer,
}

impl Lexer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Lexes the scalar starting with `first`, which has been peeked but not
    /// consumed.
    pub(crate) fn lex_scalar<R: Read>(
        &mut self,
        input: &mut Input<R>,
        first: u8,
    ) -> Result<Value, DecodeError> {
        match first {
            b'"' => self.lex_string(input).map(Value::String),
            b'-' | b'0'..=b'9' => self.lex_number(input).map(Value::Number),
            b't' | b'f' | b'n' => Self::lex_literal(input, first),
            _ => Err(DecodeError::syntax(
                SyntaxError::unexpected_byte(first),
                input.position(),
            )),
        }
    }

    fn lex_literal<R: Read>(input: &mut Input<R>, first: u8) -> Result<Value, DecodeError> {
        input.bump();
        let mut expected = ExpectedLiteralBuffer::new(first);
        loop {
            let next = input.peek()?;
            match expected.step(next) {
                Step::NeedMore => input.bump(),
                Step::Done(value) => {
                    input.bump();
                    return Ok(value);
                }
                Step::Reject => {
                    return Err(DecodeError::syntax(
                        SyntaxError::unexpected(next),
                        input.position(),
                    ));
                }
            }
        }
    }

    /// Lexes a string; the input must be positioned on the opening quote.
    pub(crate) fn lex_string<R: Read>(&mut self, input: &mut Input<R>) -> Result<String, DecodeError> {
        let start = input.position();
        input.bump();
        self.scratch.clear();
        self.unicode_escape_buffer.clear();

        loop {
            if let Some(high) = self.unicode_escape_buffer.pending_high_surrogate() {
                // A high surrogate must be followed directly by `\u` and a low
                // surrogate.
                for expected in [b'\\', b'u'] {
                    if input.peek()? != Some(expected) {
                        return Err(DecodeError::syntax(
                            SyntaxError::LoneSurrogate(high),
                            input.position(),
                        ));
                    }
                    input.bump();
                }
                self.lex_unicode_escape(input)?;
                continue;
            }

            input.copy_while(&mut self.scratch, |b| b != b'"' && b != b'\\' && b >= 0x20)?;

            let position = input.position();
            match input.peek()? {
                Some(b'"') => {
                    input.bump();
                    break;
                }
                Some(b'\\') => {
                    input.bump();
                    self.lex_escape(input)?;
                }
                Some(b) => {
                    return Err(DecodeError::syntax(
                        SyntaxError::ControlCharacterInString(b),
                        position,
                    ));
                }
                None => {
                    return Err(DecodeError::syntax(
                        SyntaxError::UnexpectedEndOfInput,
                        position,
                    ));
                }
            }
        }

        match core::str::from_utf8(&self.scratch) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => Err(DecodeError::syntax(SyntaxError::InvalidUtf8, start)),
        }
    }

    /// Lexes the escape after a consumed backslash.
    fn lex_escape<R: Read>(&mut self, input: &mut Input<R>) -> Result<(), DecodeError> {
        let position = input.position();
        let decoded = match input.peek()? {
            Some(b @ (b'"' | b'\\' | b'/')) => b,
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                input.bump();
                return self.lex_unicode_escape(input);
            }
            Some(_) => return Err(DecodeError::syntax(SyntaxError::InvalidEscape, position)),
            None => {
                return Err(DecodeError::syntax(
                    SyntaxError::UnexpectedEndOfInput,
                    position,
                ));
            }
        };
        input.bump();
        self.scratch.push(decoded);
        Ok(())
    }

    /// Lexes the four hex digits after a consumed `\u`.
    fn lex_unicode_escape<R: Read>(&mut self, input: &mut Input<R>) -> Result<(), DecodeError> {
        let start = input.position();
        let unit = loop {
            let position = input.position();
            let Some(b) = input.peek()? else {
                return Err(DecodeError::syntax(
                    SyntaxError::UnexpectedEndOfInput,
                    position,
                ));
            };
            match self.unicode_escape_buffer.feed(b) {
                Ok(Some(unit)) => {
                    input.bump();
                    break unit;
                }
                Ok(None) => input.bump(),
                Err(err) => return Err(DecodeError::syntax(err, position)),
            }
        };

        match self.unicode_escape_buffer.resolve(unit) {
            Ok(Some(ch)) => {
                let mut utf8 = [0u8; 4];
                self.scratch
                    .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => Err(DecodeError::syntax(err, start)),
        }
    }

    /// Lexes a number following the RFC 8259 grammar:
    /// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
    fn lex_number<R: Read>(&mut self, input: &mut Input<R>) -> Result<f64, DecodeError> {
        let start = input.position();
        self.scratch.clear();

        if input.peek()? == Some(b'-') {
            self.scratch.push(b'-');
            input.bump();
        }

        match input.peek()? {
            Some(b'0') => {
                self.scratch.push(b'0');
                input.bump();
            }
            Some(b'1'..=b'9') => self.lex_digits(input)?,
            next => {
                return Err(DecodeError::syntax(
                    SyntaxError::unexpected(next),
                    input.position(),
                ));
            }
        }

        if input.peek()? == Some(b'.') {
            self.scratch.push(b'.');
            input.bump();
            self.lex_digits(input)?;
        }

        if let Some(e @ (b'e' | b'E')) = input.peek()? {
            self.scratch.push(e);
            input.bump();
            if let Some(sign @ (b'+' | b'-')) = input.peek()? {
                self.scratch.push(sign);
                input.bump();
            }
            self.lex_digits(input)?;
        }

        let number = core::str::from_utf8(&self.scratch)
            .ok()
            .and_then(|lexeme| lexeme.parse::<f64>().ok())
            .ok_or_else(|| DecodeError::syntax(SyntaxError::InvalidNumber, start))?;

        if number.is_finite() {
            Ok(number)
        } else {
            Err(DecodeError::syntax(SyntaxError::NumberOutOfRange, start))
        }
    }

    /// Copies one or more ASCII digits into the scratch buffer.
    fn lex_digits<R: Read>(&mut self, input: &mut Input<R>) -> Result<(), DecodeError> {
        let copied = input.copy_while(&mut self.scratch, |b| b.is_ascii_digit())?;
        if copied == 0 {
            let next = input.peek()?;
            return Err(DecodeError::syntax(
                SyntaxError::unexpected(next),
                input.position(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Lexer;
    use crate::{
        error::{DecodeError, SyntaxError},
        input::Input,
        value::Value,
    };

    fn lex(src: &str) -> Result<(Value, Option<u8>), DecodeError> {
        let mut input = Input::new(src.as_bytes(), 4);
        let mut lexer = Lexer::new();
        let first = input.peek()?.expect("non-empty source");
        let value = lexer.lex_scalar(&mut input, first)?;
        Ok((value, input.peek()?))
    }

    fn lex_err(src: &str) -> (SyntaxError, usize) {
        match lex(src) {
            Err(DecodeError::Parse(err)) => (err.source, err.position.offset),
            other => panic!("expected a parse error for {src:?}, got {other:?}"),
        }
    }

    #[rstest]
    #[case("0,", 0.0)]
    #[case("-0]", -0.0)]
    #[case("42 ", 42.0)]
    #[case("-12.5e3}", -12_500.0)]
    #[case("1E-2", 0.01)]
    #[case("6.02e+23", 6.02e23)]
    fn numbers(#[case] src: &str, #[case] expected: f64) {
        let (value, _) = lex(src).unwrap();
        assert_eq!(value, Value::Number(expected));
    }

    #[test]
    fn number_leaves_delimiter_unconsumed() {
        let (_, next) = lex("123,").unwrap();
        assert_eq!(next, Some(b','));
    }

    #[rstest]
    #[case("-", SyntaxError::UnexpectedEndOfInput, 1)]
    #[case("-a", SyntaxError::unexpected_byte(b'a'), 1)]
    #[case("1.", SyntaxError::UnexpectedEndOfInput, 2)]
    #[case("1.e5", SyntaxError::unexpected_byte(b'e'), 2)]
    #[case("1e+", SyntaxError::UnexpectedEndOfInput, 3)]
    #[case("1e400", SyntaxError::NumberOutOfRange, 0)]
    fn bad_numbers(#[case] src: &str, #[case] expected: SyntaxError, #[case] offset: usize) {
        assert_eq!(lex_err(src), (expected, offset));
    }

    #[rstest]
    #[case(r#""""#, "")]
    #[case(r#""hello world""#, "hello world")]
    #[case(r#""a\"b\\c\/d""#, "a\"b\\c/d")]
    #[case(r#""\b\f\n\r\t""#, "\u{8}\u{c}\n\r\t")]
    #[case(r#""étÉ""#, "étÉ")]
    #[case(r#""😀!""#, "😀!")]
    #[case("\"ünïcödé 中文\"", "ünïcödé 中文")]
    fn strings(#[case] src: &str, #[case] expected: &str) {
        let (value, _) = lex(src).unwrap();
        assert_eq!(value, Value::String(expected.to_string()));
    }

    #[rstest]
    #[case("\"abc", SyntaxError::UnexpectedEndOfInput, 4)]
    #[case("\"a\nb\"", SyntaxError::ControlCharacterInString(b'\n'), 2)]
    #[case(r#""\x""#, SyntaxError::InvalidEscape, 2)]
    #[case(r#""\u12G4""#, SyntaxError::InvalidUnicodeEscape, 5)]
    #[case(r#""\udc00""#, SyntaxError::LoneSurrogate(0xDC00), 3)]
    #[case(r#""\ud800""#, SyntaxError::LoneSurrogate(0xD800), 7)]
    #[case(r#""\ud800\n""#, SyntaxError::LoneSurrogate(0xD800), 8)]
    fn bad_strings(#[case] src: &str, #[case] expected: SyntaxError, #[case] offset: usize) {
        assert_eq!(lex_err(src), (expected, offset));
    }

    #[test]
    fn invalid_utf8_in_string() {
        let mut input = Input::new(&b"\"\xff\xfe\""[..], 4);
        let mut lexer = Lexer::new();
        assert_eq!(input.peek().unwrap(), Some(b'"'));
        let err = lexer.lex_string(&mut input).unwrap_err();
        match err {
            DecodeError::Parse(err) => {
                assert_eq!(err.source, SyntaxError::InvalidUtf8);
                assert_eq!(err.position.offset, 0);
            }
            DecodeError::Io(err) => panic!("unexpected io error {err}"),
        }
    }

    #[rstest]
    #[case("true", Value::Boolean(true))]
    #[case("false", Value::Boolean(false))]
    #[case("null", Value::Null)]
    fn literals(#[case] src: &str, #[case] expected: Value) {
        assert_eq!(lex(src).unwrap(), (expected, None));
    }

    #[rstest]
    #[case("tru", SyntaxError::UnexpectedEndOfInput, 3)]
    #[case("nul!", SyntaxError::unexpected_byte(b'!'), 3)]
    #[case("fals3", SyntaxError::unexpected_byte(b'3'), 4)]
    fn bad_literals(#[case] src: &str, #[case] expected: SyntaxError, #[case] offset: usize) {
        assert_eq!(lex_err(src), (expected, offset));
    }
}

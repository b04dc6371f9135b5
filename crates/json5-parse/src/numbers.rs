use crate::{error::ConversionError, value::Value};

/// Lexical hint so the parser can distinguish ints vs floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberLexeme<'a> {
    Integer(&'a str), // no '.' and no exponent
    Float(&'a str),   // has '.' or exponent
}

impl NumberLexeme<'_> {
    pub(crate) fn to_value(self) -> Result<Value, ConversionError> {
        match self {
            NumberLexeme::Integer(text) => parse_integer(text).map(Value::Integer),
            NumberLexeme::Float(text) => parse_float(text).map(Value::Float),
        }
    }
}

/// Converts the text of an `Integer` token to `i64`.
pub(crate) fn parse_integer(text: &str) -> Result<i64, ConversionError> {
    text.parse::<i64>()
        .map_err(|source| ConversionError::Integer {
            text: text.into(),
            source,
        })
}

/// Converts the text of a `Float` token to `f64`. Results that round to an
/// infinity are rejected rather than silently saturated.
pub(crate) fn parse_float(text: &str) -> Result<f64, ConversionError> {
    let value = text.parse::<f64>().map_err(|source| ConversionError::Float {
        text: text.into(),
        source,
    })?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConversionError::FloatOutOfRange { text: text.into() })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0", 0)]
    #[case("-0", 0)]
    #[case("5", 5)]
    #[case("-10", -10)]
    #[case("9223372036854775807", i64::MAX)]
    #[case("-9223372036854775808", i64::MIN)]
    fn integers(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(parse_integer(text).unwrap(), expected);
    }

    #[rstest]
    #[case("9223372036854775808")]
    #[case("-9223372036854775809")]
    #[case("99999999999999999999999")]
    fn integer_overflow(#[case] text: &str) {
        let err = parse_integer(text).unwrap_err();
        assert!(matches!(err, ConversionError::Integer { .. }), "{err:?}");
    }

    #[rstest]
    #[case("0.2", 0.2)]
    #[case("1e2", 100.0)]
    #[case("12.04e4", 120_400.0)]
    #[case("3.14e8", 314_000_000.0)]
    #[case("-1.5E-3", -0.0015)]
    #[case("1e-400", 0.0)]
    fn floats(#[case] text: &str, #[case] expected: f64) {
        assert!((parse_float(text).unwrap() - expected).abs() <= f64::EPSILON * expected.abs());
    }

    #[test]
    fn float_overflow() {
        assert_eq!(
            parse_float("1e400").unwrap_err(),
            ConversionError::FloatOutOfRange {
                text: "1e400".into()
            }
        );
        assert!(parse_float("-1e400").is_err());
    }

    #[test]
    fn lexeme_selects_representation() {
        assert_eq!(NumberLexeme::Integer("7").to_value(), Ok(Value::Integer(7)));
        assert_eq!(NumberLexeme::Float("7.0").to_value(), Ok(Value::Float(7.0)));
    }
}

//! Making typed [`Primitive`] values out of tokens.

use crate::date::Date;
use crate::token::TokenKind;
use crate::tree::Primitive;

/// Convert the text of a token into a value, according to the kind of token it is.
///
/// Values that look like a number or date but don't fit the type (an integer too large for
/// `i64`, a date with a month of 13) are not errors; they fall back to a less specific type.
pub fn make_primitive(raw: &str, kind: TokenKind) -> Primitive {
    match kind {
        TokenKind::Integer => raw
            .parse::<i64>()
            .map(Primitive::Int)
            .unwrap_or_else(|_| make_primitive(raw, TokenKind::Real)),
        TokenKind::Real => raw
            .parse::<f64>()
            .map_or_else(|_| Primitive::Id(raw.to_string()), Primitive::Real),
        TokenKind::Date => {
            raw.parse::<Date>().map_or_else(|_| Primitive::Id(raw.to_string()), Primitive::Date)
        }
        TokenKind::Boolean => Primitive::Bool(raw == "yes"),
        TokenKind::QuotedString => {
            let inner = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(raw);
            Primitive::Str(inner.to_string())
        }
        _ => Primitive::Id(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(make_primitive("-12", TokenKind::Integer), Primitive::Int(-12));
        assert_eq!(make_primitive("0.5", TokenKind::Real), Primitive::Real(0.5));
        assert_eq!(make_primitive("-.25", TokenKind::Real), Primitive::Real(-0.25));
        assert_eq!(
            make_primitive("99999999999999999999", TokenKind::Integer),
            Primitive::Real(1e20)
        );
    }

    #[test]
    fn test_date() {
        assert_eq!(
            make_primitive("1444.11.11", TokenKind::Date),
            Primitive::Date(Date::new(1444, 11, 11))
        );
        assert_eq!(
            make_primitive("1444.11.300", TokenKind::Date),
            Primitive::Id("1444.11.300".to_string())
        );
        assert_eq!(make_primitive("1444.13.1", TokenKind::Date), Primitive::Id("1444.13.1".into()));
        assert_eq!(make_primitive("1444.2.0", TokenKind::Date), Primitive::Id("1444.2.0".into()));
    }

    #[test]
    fn test_strings() {
        assert_eq!(make_primitive("yes", TokenKind::Boolean), Primitive::Bool(true));
        assert_eq!(make_primitive("no", TokenKind::Boolean), Primitive::Bool(false));
        assert_eq!(make_primitive("\"a b\"", TokenKind::QuotedString), Primitive::Str("a b".into()));
        assert_eq!(make_primitive("\"\"", TokenKind::QuotedString), Primitive::Str(String::new()));
        assert_eq!(make_primitive("FRA", TokenKind::Identifier), Primitive::Id("FRA".into()));
    }
}

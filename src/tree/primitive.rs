use std::fmt::{Display, Error, Formatter};

use serde::Serialize;

use crate::date::Date;

/// A scalar value from a script file. Keys are always primitives, and most values are too.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Primitive {
    Int(i64),
    Real(f64),
    Date(Date),
    Bool(bool),
    /// The text between the quotes of a quoted string.
    Str(String),
    /// A bare word.
    Id(String),
}

impl Primitive {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Primitive::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers are accepted as reals too.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Primitive::Int(i) => Some(*i as f64),
            Primitive::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Date> {
        match self {
            Primitive::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Primitive::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Quoted strings and bare words both count as strings.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::Str(s) | Primitive::Id(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Primitive::Int(_) | Primitive::Real(_))
    }

    /// Compare two keys. Strings compare case-insensitively, the way the game engines look them up.
    pub fn key_eq(&self, other: &Primitive) -> bool {
        match (self.as_str(), other.as_str()) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            (None, None) => self == other,
            _ => false,
        }
    }

    /// Check if this key matches a key written as text, as in `tree.get("1444.11.11")`.
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            Primitive::Int(i) => key.parse::<i64>().is_ok_and(|k| k == *i),
            #[allow(clippy::float_cmp)]
            Primitive::Real(r) => key.parse::<f64>().is_ok_and(|k| k == *r),
            Primitive::Date(date) => key.parse::<Date>().is_ok_and(|k| k == *date),
            Primitive::Bool(b) => key == if *b { "yes" } else { "no" },
            Primitive::Str(s) | Primitive::Id(s) => s.eq_ignore_ascii_case(key),
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Primitive::Int(i) => write!(f, "{i}"),
            Primitive::Real(r) => write!(f, "{r:?}"),
            Primitive::Date(date) => write!(f, "{date}"),
            Primitive::Bool(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            Primitive::Str(s) => write!(f, "\"{s}\""),
            Primitive::Id(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Primitive {
    fn from(s: &str) -> Self {
        Primitive::Id(s.to_string())
    }
}

impl From<i64> for Primitive {
    fn from(i: i64) -> Self {
        Primitive::Int(i)
    }
}

impl From<f64> for Primitive {
    fn from(r: f64) -> Self {
        Primitive::Real(r)
    }
}

impl From<bool> for Primitive {
    fn from(b: bool) -> Self {
        Primitive::Bool(b)
    }
}

impl From<Date> for Primitive {
    fn from(date: Date) -> Self {
        Primitive::Date(date)
    }
}

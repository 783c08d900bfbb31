use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The operator between a key and its value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`, an assignment
    #[default]
    Equals,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownOperator;

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Operator::Equals),
            ">" => Ok(Operator::GreaterThan),
            "<" => Ok(Operator::LessThan),
            _ => Err(UnknownOperator),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Operator::Equals => write!(f, "="),
            Operator::GreaterThan => write!(f, ">"),
            Operator::LessThan => write!(f, "<"),
        }
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

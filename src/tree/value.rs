use serde::Serialize;

use crate::date::Date;
use crate::tree::{Color, Primitive, Tree};

/// `Value` is the right-hand side of an [`Entry`](crate::tree::Entry).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Primitive(Primitive),
    Tree(Tree),
    Color(Color),
    /// A key that was never given a value.
    Nothing,
}

impl Value {
    pub fn get_primitive(&self) -> Option<&Primitive> {
        match self {
            Value::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn get_tree(&self) -> Option<&Tree> {
        match self {
            Value::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn get_color(&self) -> Option<&Color> {
        match self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Value::Tree(_))
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    pub fn as_int(&self) -> Option<i64> {
        self.get_primitive().and_then(Primitive::as_int)
    }

    pub fn as_real(&self) -> Option<f64> {
        self.get_primitive().and_then(Primitive::as_real)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.get_primitive().and_then(Primitive::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.get_primitive().and_then(Primitive::as_bool)
    }

    pub fn as_date(&self) -> Option<Date> {
        self.get_primitive().and_then(Primitive::as_date)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Value::Primitive(_) => "value",
            Value::Tree(_) => "block",
            Value::Color(_) => "color",
            Value::Nothing => "nothing",
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Primitive(p)
    }
}

impl From<Tree> for Value {
    fn from(t: Tree) -> Self {
        Value::Tree(t)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

use serde::Serialize;

use crate::token::Loc;
use crate::tree::{Operator, Primitive, Value};

/// One `key = value` item of a [`Tree`](crate::tree::Tree), or one bare member of a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// For group members this is the key the group was assigned to.
    pub key: Primitive,
    pub operator: Operator,
    pub value: Value,
    /// Group members are the bare values of a `key = { 1 2 3 }` group, one entry per value.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub in_group: bool,
    /// Comments on the lines before this entry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pre_comments: Vec<String>,
    /// The comment on the same line as this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_comment: Option<String>,
    /// Comments after this entry that had no following entry to attach to, or that were a second
    /// comment on this entry's line.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub post_comments: Vec<String>,
    /// Where the key was read from. `None` for entries built in code.
    #[serde(skip)]
    pub loc: Option<Loc>,
}

impl Entry {
    pub fn new(key: Primitive, operator: Operator, value: Value) -> Self {
        Entry {
            key,
            operator,
            value,
            in_group: false,
            pre_comments: Vec::new(),
            line_comment: None,
            post_comments: Vec::new(),
            loc: None,
        }
    }

    pub fn key(&self) -> &Primitive {
        &self.key
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_eq(&self) -> bool {
        self.operator == Operator::Equals
    }

    pub fn describe(&self) -> &'static str {
        if self.in_group {
            "group member"
        } else if self.is_eq() {
            match self.value {
                Value::Tree(_) => "definition",
                _ => "assignment",
            }
        } else {
            "comparison"
        }
    }

    /// Compare two entries without looking at where they came from.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.key == other.key
            && self.operator == other.operator
            && self.in_group == other.in_group
            && self.pre_comments == other.pre_comments
            && self.line_comment == other.line_comment
            && self.post_comments == other.post_comments
            && match (&self.value, &other.value) {
                (Value::Tree(t1), Value::Tree(t2)) => t1.equivalent(t2),
                (v1, v2) => v1 == v2,
            }
    }
}

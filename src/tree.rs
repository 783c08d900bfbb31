//! The [`Tree`] is what a script file parses into.
//!
//! It is an ordered list of [`Entry`] items. Duplicate keys are normal in script files and are all
//! kept, in the order they were written. Comments are kept too, attached to the entries around
//! them.

use serde::Serialize;

pub use crate::tree::color::{Channel, Color, Colorspace};
pub use crate::tree::entry::Entry;
pub use crate::tree::operator::{Operator, UnknownOperator};
pub use crate::tree::primitive::Primitive;
pub use crate::tree::value::Value;

mod color;
mod entry;
mod operator;
mod primitive;
mod value;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    entries: Vec<Entry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Append a `key = value` entry built in code.
    pub fn append<K: Into<Primitive>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.push(Entry::new(key.into(), Operator::Equals, value.into()));
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    pub fn last_entry(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn last_entry_mut(&mut self) -> Option<&mut Entry> {
        self.entries.last_mut()
    }

    // Lookup by key

    /// All entries with this key, in order. Group members are included.
    pub fn entries_for<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a Entry> + use<'a, 'k> {
        self.entries.iter().filter(move |entry| entry.key.matches_key(key))
    }

    /// Return the first value for this key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries_for(key).next().map(Entry::value)
    }

    /// Return the last value for this key. This is the one that counts if later definitions
    /// override earlier ones.
    pub fn get_last(&self, key: &str) -> Option<&Value> {
        self.entries_for(key).last().map(Entry::value)
    }

    /// Return all values for this key, in order.
    pub fn get_all<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a Value> + use<'a, 'k> {
        self.entries_for(key).map(Entry::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries_for(key).next().is_some()
    }

    /// The keys of all entries, in order and including duplicates.
    pub fn keys(&self) -> impl Iterator<Item = &Primitive> {
        self.entries.iter().map(Entry::key)
    }

    /// Return the members of the groups assigned to this key, in order.
    ///
    /// For `key = { 1 2 3 }` this returns the three numbers.
    pub fn get_group(&self, key: &str) -> Vec<&Primitive> {
        self.entries_for(key)
            .filter(|entry| entry.in_group)
            .filter_map(|entry| entry.value.get_primitive())
            .collect()
    }

    /// Return the first block value for this key.
    pub fn get_tree(&self, key: &str) -> Option<&Tree> {
        self.get_all(key).find_map(Value::get_tree)
    }

    /// Search this tree and all trees nested in it, depth first, for values with this key.
    pub fn find_all_recursive<'a>(&'a self, key: &str) -> Vec<&'a Value> {
        let mut found = Vec::new();
        self.find_recursive_into(key, &mut found);
        found
    }

    fn find_recursive_into<'a>(&'a self, key: &str, found: &mut Vec<&'a Value>) {
        for entry in &self.entries {
            if entry.key.matches_key(key) {
                found.push(&entry.value);
            }
            if let Value::Tree(tree) = &entry.value {
                tree.find_recursive_into(key, found);
            }
        }
    }

    // Comments by position

    pub fn pre_comments_at(&self, index: usize) -> Option<&[String]> {
        self.entry(index).map(|entry| entry.pre_comments.as_slice())
    }

    pub fn line_comment_at(&self, index: usize) -> Option<&str> {
        self.entry(index).and_then(|entry| entry.line_comment.as_deref())
    }

    /// Returns false if there is no entry at that index.
    pub fn set_line_comment_at(&mut self, index: usize, comment: Option<String>) -> bool {
        if let Some(entry) = self.entry_mut(index) {
            entry.line_comment = comment;
            true
        } else {
            false
        }
    }

    pub fn post_comments_at(&self, index: usize) -> Option<&[String]> {
        self.entry(index).map(|entry| entry.post_comments.as_slice())
    }

    pub fn post_comments_at_mut(&mut self, index: usize) -> Option<&mut Vec<String>> {
        self.entry_mut(index).map(|entry| &mut entry.post_comments)
    }

    /// Add the entries of `other` to this tree.
    ///
    /// With `merge_levels` above zero, a block value whose key already has a block value here is
    /// merged into that block (the first one) instead of being appended, recursively for up to
    /// `merge_levels` levels of nesting. Everything else is appended in order.
    pub fn merge(&mut self, other: Tree, merge_levels: u32) {
        for entry in other.entries {
            let target = if merge_levels > 0 && !entry.in_group && entry.value.is_tree() {
                self.entries.iter().position(|existing| {
                    !existing.in_group
                        && existing.value.is_tree()
                        && existing.key.key_eq(&entry.key)
                })
            } else {
                None
            };
            match target {
                Some(index) => {
                    if let (Value::Tree(existing), Value::Tree(incoming)) =
                        (&mut self.entries[index].value, entry.value)
                    {
                        existing.merge(incoming, merge_levels - 1);
                    }
                }
                None => self.entries.push(entry),
            }
        }
    }

    /// Compare two trees without looking at where their entries came from.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.entries.iter().zip(other.entries.iter()).all(|(a, b)| a.equivalent(b))
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Tree {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

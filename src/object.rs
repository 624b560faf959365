//! PDF object model for the write side.
//!
//! Only the value shapes a report document needs are modelled. Dictionaries
//! keep insertion order, so serialized output follows the order in which
//! entries were added.

use bytes::Bytes;
use std::fmt;

/// Number of an indirect object. Generation is always 0 in files we write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

/// A direct PDF value.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    /// Integer number
    Integer(i64),
    /// Real number
    Real(f64),
    /// Name, stored without the leading `/`
    Name(String),
    /// String as raw bytes
    Text(Vec<u8>),
    /// Array
    Array(Vec<PdfObject>),
    /// Dictionary
    Dict(Dict),
    /// Stream; `/Length` is derived from the data when written
    Stream(Dict, Bytes),
    /// Indirect reference
    Ref(ObjectId),
}

impl PdfObject {
    /// A name value.
    pub fn name(name: impl Into<String>) -> Self {
        PdfObject::Name(name.into())
    }

    /// An indirect reference to object `id`.
    pub fn reference(id: u32) -> Self {
        PdfObject::Ref(ObjectId(id))
    }

    /// `[llx lly urx ury]` for a rectangle given by origin and size.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Real(x),
            PdfObject::Real(y),
            PdfObject::Real(x + width),
            PdfObject::Real(y + height),
        ])
    }
}

impl From<i64> for PdfObject {
    fn from(value: i64) -> Self {
        PdfObject::Integer(value)
    }
}

impl From<Dict> for PdfObject {
    fn from(dict: Dict) -> Self {
        PdfObject::Dict(dict)
    }
}

/// Insertion-ordered PDF dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
    entries: Vec<(String, PdfObject)>,
}

impl Dict {
    /// An empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, keeping its original position if it already exists.
    pub fn set(&mut self, key: &str, value: impl Into<PdfObject>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Builder form of [`Dict::set`].
    pub fn with(mut self, key: &str, value: impl Into<PdfObject>) -> Self {
        self.set(key, value);
        self
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PdfObject)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_display() {
        assert_eq!(ObjectId(3).to_string(), "3 0 R");
    }

    #[test]
    fn test_dict_keeps_insertion_order() {
        let dict = Dict::new()
            .with("Type", PdfObject::name("Page"))
            .with("Parent", PdfObject::reference(2))
            .with("Type", PdfObject::name("Pages"));
        let keys: Vec<&str> = dict.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Type", "Parent"]);
        assert_eq!(dict.get("Type"), Some(&PdfObject::name("Pages")));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_rect() {
        assert_eq!(
            PdfObject::rect(10.0, 20.0, 100.0, 50.0),
            PdfObject::Array(vec![
                PdfObject::Real(10.0),
                PdfObject::Real(20.0),
                PdfObject::Real(110.0),
                PdfObject::Real(70.0),
            ])
        );
    }
}

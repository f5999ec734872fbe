//! # Domain Model: Records and Field Values
//!
//! A [`Record`] is an opaque item the caller owns: a stable [`RecordId`] plus a
//! bag of named fields. The pipeline only ever reads fields by name, so the
//! same code serves blog posts, products, or anything else that can be
//! described as strings and string lists.
//!
//! ## Field Values
//!
//! | Variant | JSON | Typical use |
//! |---------|------|-------------|
//! | [`FieldValue::Text`] | `"tech"` | title, category, author |
//! | [`FieldValue::List`] | `["rust", "cli"]` | tags |
//!
//! Fields are stored in a `BTreeMap` so serialized output is stable.
//!
//! ## Record File Format
//!
//! ```text
//! [
//!   {
//!     "id": "post-1",
//!     "created_at": "2024-03-01T10:00:00Z",
//!     "fields": { "title": "Hello", "category": "tech", "tags": ["rust"] }
//!   }
//! ]
//! ```
//!
//! `id` and `created_at` are optional on input. A record loaded without an id
//! gets a fresh UUID so identity stays stable for the lifetime of the
//! collection.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable, immutable record identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random id, used when a record arrives without one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A primitive field value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Iterate over the string values regardless of shape.
    ///
    /// A `Text` yields exactly one item, a `List` yields its elements.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        match self {
            FieldValue::Text(s) => std::slice::from_ref(s).iter(),
            FieldValue::List(items) => items.iter(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::List(items) => Some(items),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .insert(name.into(), FieldValue::Text(value.into()));
        self
    }

    pub fn with_list<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.fields.insert(name.into(), FieldValue::List(values));
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Look up a field by name. Absent fields return `None`, which every
    /// stage treats as "does not match".
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_iter_covers_both_shapes() {
        let text = FieldValue::from("tech");
        let list = FieldValue::from(vec!["a".to_string(), "b".to_string()]);

        assert_eq!(text.iter().collect::<Vec<_>>(), vec!["tech"]);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn record_builder_sets_fields() {
        let record = Record::new("p1")
            .with_text("title", "Hello")
            .with_list("tags", ["rust", "cli"]);

        assert_eq!(record.text("title"), Some("Hello"));
        assert_eq!(
            record.field("tags").and_then(FieldValue::as_list),
            Some(&["rust".to_string(), "cli".to_string()][..])
        );
        assert!(record.field("missing").is_none());
    }

    #[test]
    fn deserializes_untagged_field_values() {
        let json = r#"{"id":"p1","fields":{"title":"Hi","tags":["x","y"]}}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id.as_str(), "p1");
        assert_eq!(record.text("title"), Some("Hi"));
        assert_eq!(
            record.field("tags"),
            Some(&FieldValue::List(vec!["x".into(), "y".into()]))
        );
        assert!(record.created_at.is_none());
    }

    #[test]
    fn missing_id_gets_generated() {
        let a: Record = serde_json::from_str(r#"{"fields":{}}"#).unwrap();
        let b: Record = serde_json::from_str(r#"{"fields":{}}"#).unwrap();

        assert!(!a.id.as_str().is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn parses_created_at() {
        let json = r#"{"id":"p1","created_at":"2024-03-01T10:00:00Z","fields":{}}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.created_at.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );
    }
}

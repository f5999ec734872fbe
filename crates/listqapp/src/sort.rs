//! Optional ordering stage.
//!
//! Without a [`SortKey`] the pipeline keeps input order. Sorting is stable and
//! records lacking the sort field always go last, in either direction.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ListqError, Result};
use crate::model::Record;

const CREATED_AT: &str = "created_at";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    Field(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    #[serde(default)]
    pub descending: bool,
}

impl SortKey {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    /// Parse `name`, `name:asc` or `name:desc`. `created_at` sorts by the
    /// record timestamp; any other name sorts by that field's first value.
    pub fn parse(raw: &str) -> Result<Self> {
        let (name, direction) = match raw.split_once(':') {
            Some((name, direction)) => (name.trim(), direction.trim()),
            None => (raw.trim(), "asc"),
        };
        if name.is_empty() {
            return Err(ListqError::Api("Sort field cannot be empty".into()));
        }
        let descending = match direction {
            "asc" => false,
            "desc" => true,
            other => {
                return Err(ListqError::Api(format!(
                    "Invalid sort direction '{}' (expected asc or desc)",
                    other
                )))
            }
        };
        let field = if name == CREATED_AT {
            SortField::CreatedAt
        } else {
            SortField::Field(name.to_string())
        };
        Ok(Self { field, descending })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = match &self.field {
            SortField::CreatedAt => CREATED_AT,
            SortField::Field(name) => name,
        };
        let direction = if self.descending { "desc" } else { "asc" };
        write!(f, "{}:{}", name, direction)
    }
}

/// Key comparison result; `Missing` orderings ignore the sort direction.
enum Compared {
    Present(Ordering),
    Missing(Ordering),
}

use Compared::{Missing, Present};

pub fn sort_records(records: &mut [&Record], key: &SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &Record, b: &Record, key: &SortKey) -> Ordering {
    let ordering = match &key.field {
        SortField::CreatedAt => order_missing_last(a.created_at, b.created_at),
        SortField::Field(name) => {
            let a = a.field(name).and_then(|v| v.iter().next());
            let b = b.field(name).and_then(|v| v.iter().next());
            order_missing_last(a.map(|s| s.to_lowercase()), b.map(|s| s.to_lowercase()))
        }
    };
    match ordering {
        Missing(ord) => ord,
        Present(ord) if key.descending => ord.reverse(),
        Present(ord) => ord,
    }
}

fn order_missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Compared {
    match (a, b) {
        (Some(a), Some(b)) => Present(a.cmp(&b)),
        (Some(_), None) => Missing(Ordering::Less),
        (None, Some(_)) => Missing(Ordering::Greater),
        (None, None) => Missing(Ordering::Equal),
    }
}

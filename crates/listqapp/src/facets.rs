//! Facet computation.
//!
//! Facets are the option lists a UI shows next to its filters: the distinct
//! values each filterable field takes across the *whole* collection. They are
//! derived data, recomputed whenever the collection changes.
//!
//! Values appear in first-seen order. Single-select facets get the wildcard
//! entry prepended so "no filter" is always the first option. An empty
//! collection yields empty facets, wildcard included.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::model::Record;
use crate::schema::{FieldKind, Schema};

/// A single facet option with the number of records carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetEntry {
    pub value: String,
    pub count: usize,
    /// True only for the prepended "no filter" entry.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wildcard: bool,
}

impl FacetEntry {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
            wildcard: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub kind: FacetKind,
    pub entries: Vec<FacetEntry>,
}

impl Facet {
    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.value.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    SingleSelect,
    MultiSelect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacetSet(BTreeMap<String, Facet>);

impl FacetSet {
    pub fn get(&self, name: &str) -> Option<&Facet> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Facet)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Facet::is_empty)
    }
}

/// Collect distinct values, in first-seen order, for every filterable field.
pub fn compute_facets<'a, I>(records: I, schema: &Schema) -> FacetSet
where
    I: IntoIterator<Item = &'a Record>,
{
    let specs: Vec<_> = schema.filterable().collect();
    let mut seen: Vec<Vec<String>> = vec![Vec::new(); specs.len()];
    let mut counts: Vec<HashMap<String, usize>> = vec![HashMap::new(); specs.len()];
    let mut total = 0usize;

    for record in records {
        total += 1;
        for (i, spec) in specs.iter().enumerate() {
            let Some(field) = record.field(&spec.name) else {
                continue;
            };
            // A value repeated inside one record's list counts once for it.
            let mut local: Vec<&String> = Vec::new();
            for value in field.iter() {
                if local.contains(&value) {
                    continue;
                }
                local.push(value);
                let count = counts[i].entry(value.clone()).or_insert(0);
                if *count == 0 {
                    seen[i].push(value.clone());
                }
                *count += 1;
            }
        }
    }

    let mut facets = BTreeMap::new();
    for ((spec, values), counts) in specs.iter().zip(seen).zip(counts) {
        let kind = match spec.kind {
            FieldKind::SingleSelect => FacetKind::SingleSelect,
            _ => FacetKind::MultiSelect,
        };
        let mut entries = Vec::with_capacity(values.len() + 1);
        if kind == FacetKind::SingleSelect && !values.is_empty() {
            entries.push(FacetEntry {
                value: schema.wildcard().to_string(),
                count: total,
                wildcard: true,
            });
        }
        entries.extend(values.into_iter().map(|value| {
            let count = counts.get(&value).copied().unwrap_or_default();
            FacetEntry::new(value, count)
        }));
        facets.insert(spec.name.clone(), Facet { kind, entries });
    }

    tracing::debug!(records = total, fields = facets.len(), "computed facets");
    FacetSet(facets)
}

//! Field filtering.
//!
//! A [`FilterSet`] maps field names to a [`FilterValue`]. A record passes when
//! every active entry matches:
//!
//! - **AND** across field names
//! - **OR** across the values of one multi-select entry
//!
//! Matching is uniform over field shapes: a record field (text or list) matches
//! when any of its values is among the selected values. For a text field and a
//! single selection this is plain equality; for a tag list it is intersection.
//!
//! A filter naming a field the record does not have never matches that
//! record. There is no error path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Record;

/// The selection for one filter name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// The wildcard: no filter applied.
    Any,
    /// Single-select value.
    One(String),
    /// Multi-select values, OR-combined. Empty means no filter.
    AnyOf(Vec<String>),
}

impl FilterValue {
    /// Parse a raw selection as it comes from a UI or the command line.
    ///
    /// - the wildcard literal becomes [`FilterValue::Any`]
    /// - a comma-separated list becomes [`FilterValue::AnyOf`]
    /// - anything else becomes [`FilterValue::One`]
    pub fn parse(raw: &str, wildcard: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == wildcard {
            return FilterValue::Any;
        }
        if raw.contains(',') {
            let values: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty() && *v != wildcard)
                .map(str::to_string)
                .collect();
            return FilterValue::AnyOf(values);
        }
        FilterValue::One(raw.to_string())
    }

    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Any => false,
            FilterValue::One(_) => true,
            FilterValue::AnyOf(values) => !values.is_empty(),
        }
    }

    fn selected(&self) -> &[String] {
        match self {
            FilterValue::Any => &[],
            FilterValue::One(value) => std::slice::from_ref(value),
            FilterValue::AnyOf(values) => values,
        }
    }

    /// Check whether `record`'s field `name` satisfies this selection.
    ///
    /// Inactive selections match everything, including records without the
    /// field.
    pub fn matches(&self, record: &Record, name: &str) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(field) = record.field(name) else {
            return false;
        };
        let selected = self.selected();
        field.iter().any(|value| selected.contains(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, FilterValue>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: FilterValue) {
        self.0.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<FilterValue> {
        self.0.remove(name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// Entries that actually constrain the result.
    pub fn active(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter().filter(|(_, value)| value.is_active())
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.active().all(|(name, value)| value.matches(record, name))
    }
}

impl FromIterator<(String, FilterValue)> for FilterSet {
    fn from_iter<T: IntoIterator<Item = (String, FilterValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Keep the records that pass every active filter, in input order.
pub fn apply_filters<'a, I>(records: I, filters: &FilterSet) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    if filters.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| filters.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, category: &str, tags: &[&str]) -> Record {
        Record::new(id)
            .with_text("category", category)
            .with_list("tags", tags.iter().copied())
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            post("1", "tech", &["rust", "cli"]),
            post("2", "life", &["travel"]),
            post("3", "tech", &["web"]),
            post("4", "life", &["rust"]),
        ]
    }

    #[test]
    fn parse_recognizes_wildcard_and_lists() {
        assert_eq!(FilterValue::parse("all", "all"), FilterValue::Any);
        assert_eq!(FilterValue::parse("  ", "all"), FilterValue::Any);
        assert_eq!(
            FilterValue::parse("tech", "all"),
            FilterValue::One("tech".into())
        );
        assert_eq!(
            FilterValue::parse("rust, web,", "all"),
            FilterValue::AnyOf(vec!["rust".into(), "web".into()])
        );
    }

    #[test]
    fn empty_filters_are_identity() {
        let records = sample();
        let out = apply_filters(&records, &FilterSet::new());
        assert_eq!(ids(&out), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn all_wildcard_filters_are_identity() {
        let records = sample();
        let filters = FilterSet::new()
            .with("category", FilterValue::Any)
            .with("tags", FilterValue::AnyOf(vec![]));
        let out = apply_filters(&records, &filters);
        assert_eq!(ids(&out), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn single_select_is_equality() {
        let records = sample();
        let filters = FilterSet::new().with("category", FilterValue::One("tech".into()));
        assert_eq!(ids(&apply_filters(&records, &filters)), vec!["1", "3"]);
    }

    #[test]
    fn multi_select_is_or_within_a_name() {
        let records = sample();
        let filters = FilterSet::new().with(
            "tags",
            FilterValue::AnyOf(vec!["travel".into(), "web".into()]),
        );
        assert_eq!(ids(&apply_filters(&records, &filters)), vec!["2", "3"]);
    }

    #[test]
    fn names_combine_with_and() {
        let records = sample();
        let filters = FilterSet::new()
            .with("category", FilterValue::One("life".into()))
            .with("tags", FilterValue::One("rust".into()));
        assert_eq!(ids(&apply_filters(&records, &filters)), vec!["4"]);
    }

    #[test]
    fn unknown_field_matches_nothing() {
        let records = sample();
        let filters = FilterSet::new().with("author", FilterValue::One("ann".into()));
        assert!(apply_filters(&records, &filters).is_empty());
    }

    #[test]
    fn single_value_against_text_set() {
        let records = sample();
        let filters = FilterSet::new().with(
            "category",
            FilterValue::AnyOf(vec!["life".into(), "nope".into()]),
        );
        assert_eq!(ids(&apply_filters(&records, &filters)), vec!["2", "4"]);
    }
}

use crate::model::Record;

/// Keep the records where any of `fields` contains `term`, case-insensitively.
///
/// The term is trimmed first; an empty term returns the input unchanged. List
/// fields match when any element contains the term. Input order is kept.
pub fn apply_search<'a, I, S>(records: I, term: &str, fields: &[S]) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
    S: AsRef<str>,
{
    let term = term.trim();
    if term.is_empty() {
        return records.into_iter().collect();
    }
    let needle = term.to_lowercase();

    records
        .into_iter()
        .filter(|record| record_matches(record, &needle, fields))
        .collect()
}

fn record_matches<S: AsRef<str>>(record: &Record, needle: &str, fields: &[S]) -> bool {
    fields.iter().any(|name| {
        record.field(name.as_ref()).is_some_and(|value| {
            value
                .iter()
                .any(|text| text.to_lowercase().contains(needle))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("1")
                .with_text("title", "Learning Rust")
                .with_text("content", "Ownership and borrowing"),
            Record::new("2")
                .with_text("title", "Trip to Lisbon")
                .with_list("tags", ["travel", "Portugal"]),
            Record::new("3").with_text("content", "rusty bikes"),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn blank_term_is_identity() {
        let records = sample();
        assert_eq!(
            ids(&apply_search(&records, "   ", &["title"])),
            vec!["1", "2", "3"]
        );
    }

    #[test]
    fn case_insensitive_substring_over_any_field() {
        let records = sample();
        let out = apply_search(&records, "RUST", &["title", "content"]);
        assert_eq!(ids(&out), vec!["1", "3"]);
    }

    #[test]
    fn only_configured_fields_are_searched() {
        let records = sample();
        let out = apply_search(&records, "rust", &["title"]);
        assert_eq!(ids(&out), vec!["1"]);
    }

    #[test]
    fn list_fields_match_any_element() {
        let records = sample();
        let out = apply_search(&records, "portu", &["tags"]);
        assert_eq!(ids(&out), vec!["2"]);
    }

    #[test]
    fn term_is_trimmed_before_matching() {
        let records = sample();
        let out = apply_search(&records, "  lisbon ", &["title"]);
        assert_eq!(ids(&out), vec!["2"]);
    }

    #[test]
    fn no_fields_means_no_match() {
        let records = sample();
        let fields: [&str; 0] = [];
        assert!(apply_search(&records, "rust", &fields).is_empty());
    }
}

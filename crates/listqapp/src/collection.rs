//! Caller-owned record collection.
//!
//! The pipeline never reads a collection that can change under it. Callers
//! mutate a [`Collection`] and hand the pipeline a [`Snapshot`]: an immutable,
//! cheaply clonable view tagged with the revision it was taken at. Every
//! mutation bumps the revision, which is what memoized results are keyed on.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ListqError, Result};
use crate::model::{Record, RecordId};

#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Arc<[Record]>,
    revision: u64,
}

impl Snapshot {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when both snapshots share one allocation, i.e. they were taken
    /// from the same collection at the same revision.
    pub fn same_as(&self, other: &Snapshot) -> bool {
        self.revision == other.revision && Arc::ptr_eq(&self.records, &other.records)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Collection {
    records: Vec<Record>,
    positions: HashMap<RecordId, usize>,
    revision: u64,
    cached: Option<Snapshot>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from loaded records. Later duplicates of an id
    /// replace earlier ones in place.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut collection = Self::new();
        for record in records {
            match collection.positions.get(&record.id) {
                Some(&pos) => collection.records[pos] = record,
                None => {
                    collection
                        .positions
                        .insert(record.id.clone(), collection.records.len());
                    collection.records.push(record);
                }
            }
        }
        collection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.positions.get(id).map(|&pos| &self.records[pos])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Append a record. Fails if the id is already present.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        if self.positions.contains_key(&record.id) {
            return Err(ListqError::DuplicateRecord(record.id));
        }
        self.positions
            .insert(record.id.clone(), self.records.len());
        self.records.push(record);
        self.touch();
        Ok(())
    }

    /// Replace the record with the same id, keeping its position.
    pub fn update(&mut self, record: Record) -> Result<()> {
        let Some(&pos) = self.positions.get(&record.id) else {
            return Err(ListqError::RecordNotFound(record.id));
        };
        self.records[pos] = record;
        self.touch();
        Ok(())
    }

    pub fn remove(&mut self, id: &RecordId) -> Result<Record> {
        let pos = self
            .positions
            .remove(id)
            .ok_or_else(|| ListqError::RecordNotFound(id.clone()))?;
        let removed = self.records.remove(pos);
        for (i, record) in self.records.iter().enumerate().skip(pos) {
            self.positions.insert(record.id.clone(), i);
        }
        self.touch();
        Ok(removed)
    }

    /// An immutable view of the current records.
    ///
    /// Repeated calls without an intervening mutation share one allocation.
    pub fn snapshot(&mut self) -> Snapshot {
        if let Some(snapshot) = &self.cached {
            return snapshot.clone();
        }
        let snapshot = Snapshot {
            records: Arc::from(self.records.clone()),
            revision: self.revision,
        };
        self.cached = Some(snapshot.clone());
        snapshot
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.cached = None;
        tracing::trace!(revision = self.revision, records = self.records.len(), "collection changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, title: &str) -> Record {
        Record::new(id).with_text("title", title)
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut c = Collection::new();
        c.insert(rec("a", "A")).unwrap();

        let err = c.insert(rec("a", "again")).unwrap_err();
        assert!(matches!(err, ListqError::DuplicateRecord(_)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn update_keeps_position() {
        let mut c = Collection::from_records(vec![rec("a", "A"), rec("b", "B")]);
        c.update(rec("a", "A2")).unwrap();

        assert_eq!(c.records()[0].text("title"), Some("A2"));
        assert!(matches!(
            c.update(rec("zz", "x")),
            Err(ListqError::RecordNotFound(_))
        ));
    }

    #[test]
    fn remove_reindexes_following_records() {
        let mut c = Collection::from_records(vec![rec("a", "A"), rec("b", "B"), rec("c", "C")]);
        let removed = c.remove(&"a".into()).unwrap();

        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(c.get(&"c".into()).unwrap().text("title"), Some("C"));
        assert!(c.remove(&"a".into()).is_err());
    }

    #[test]
    fn mutations_bump_revision() {
        let mut c = Collection::new();
        assert_eq!(c.revision(), 0);
        c.insert(rec("a", "A")).unwrap();
        c.update(rec("a", "B")).unwrap();
        c.remove(&"a".into()).unwrap();
        assert_eq!(c.revision(), 3);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutations() {
        let mut c = Collection::from_records(vec![rec("a", "A")]);
        let before = c.snapshot();
        c.insert(rec("b", "B")).unwrap();
        let after = c.snapshot();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert!(after.revision() > before.revision());
    }

    #[test]
    fn snapshots_share_storage_until_mutation() {
        let mut c = Collection::from_records(vec![rec("a", "A")]);
        let one = c.snapshot();
        let two = c.snapshot();
        assert!(std::ptr::eq(one.records(), two.records()));
    }

    #[test]
    fn from_records_collapses_duplicate_ids() {
        let c = Collection::from_records(vec![rec("a", "A"), rec("b", "B"), rec("a", "A2")]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.records()[0].text("title"), Some("A2"));
    }
}

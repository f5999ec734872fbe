//! # API Facade
//!
//! [`ListqApi`] is the single entry point UI clients use. It owns the record
//! [`Collection`], keeps it in sync with a [`Persist`] backend, and runs
//! queries through a memoized [`QueryPipeline`].
//!
//! ## What the API Does
//!
//! - **Loads** the record collection once from the injected store
//! - **Persists** every insert/update/remove back to that store
//! - **Snapshots** the collection per query so the pipeline sees an immutable view
//! - **Syncs** the caller's [`QueryState`] page with the clamped page served
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: filtering, search and pagination live in their modules
//! - **Debouncing**: the caller decides when a query runs (see [`crate::debounce`])
//! - **Presentation**: returns data structures, not strings
//!
//! ## Generic Over Persist
//!
//! `ListqApi<S: Persist<Vec<Record>>>` works with any store:
//! - Production: `ListqApi<FileStore<Vec<Record>>>`
//! - Testing: `ListqApi<MemoryStore<Vec<Record>>>`

use crate::collection::Collection;
use crate::config::ListqConfig;
use crate::error::{ListqError, Result};
use crate::facets::FacetSet;
use crate::filter::FilterValue;
use crate::model::{Record, RecordId};
use crate::paginate::ResultPage;
use crate::pipeline::MemoPipeline;
use crate::query::QueryState;
use crate::store::Persist;

pub struct ListqApi<S: Persist<Vec<Record>>> {
    store: S,
    config: ListqConfig,
    collection: Collection,
    pipeline: MemoPipeline,
}

impl<S: Persist<Vec<Record>>> ListqApi<S> {
    /// Load the collection from `store` and build the pipeline from `config`.
    pub fn open(store: S, config: ListqConfig) -> Result<Self> {
        let records = store.load()?.unwrap_or_default();
        tracing::debug!(records = records.len(), "opened collection");
        let pipeline = MemoPipeline::new(config.pipeline());
        Ok(Self {
            store,
            config,
            collection: Collection::from_records(records),
            pipeline,
        })
    }

    pub fn config(&self) -> &ListqConfig {
        &self.config
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Run `state` against the current records and write the clamped page
    /// back into it.
    pub fn query(&mut self, state: &mut QueryState) -> ResultPage {
        let snapshot = self.collection.snapshot();
        let page = self.pipeline.run(&snapshot, state);
        state.sync(&page);
        page
    }

    pub fn facets(&mut self) -> FacetSet {
        let snapshot = self.collection.snapshot();
        self.pipeline.facets(&snapshot)
    }

    pub fn insert(&mut self, record: Record) -> Result<()> {
        self.commit(|collection| collection.insert(record))
    }

    pub fn update(&mut self, record: Record) -> Result<()> {
        self.commit(|collection| collection.update(record))
    }

    pub fn remove(&mut self, id: &RecordId) -> Result<Record> {
        self.commit(|collection| collection.remove(id))
    }

    /// Re-read the store, discarding in-memory state.
    pub fn reload(&mut self) -> Result<()> {
        let records = self.store.load()?.unwrap_or_default();
        self.collection = Collection::from_records(records);
        self.pipeline.invalidate();
        Ok(())
    }

    /// Parse a `name=value` filter argument using the configured wildcard.
    ///
    /// The value may be a comma-separated list for multi-select fields.
    pub fn parse_filter(&self, raw: &str) -> Result<(String, FilterValue)> {
        let (name, value) = raw.split_once('=').ok_or_else(|| {
            ListqError::Api(format!("Invalid filter '{}' (expected name=value)", raw))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ListqError::Api(format!(
                "Invalid filter '{}' (empty field name)",
                raw
            )));
        }
        Ok((
            name.to_string(),
            FilterValue::parse(value, &self.config.wildcard),
        ))
    }

    /// Apply `change` to a copy of the collection and save it. The live
    /// collection is only replaced once the store has accepted the result.
    fn commit<T>(&mut self, change: impl FnOnce(&mut Collection) -> Result<T>) -> Result<T> {
        let mut next = self.collection.clone();
        let out = change(&mut next)?;
        self.store.save(&next.records().to_vec())?;
        self.collection = next;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::test_utils::blog_posts;
    use std::cell::Cell;

    /// Memory store whose saves can be switched to fail.
    struct FlakyStore {
        inner: MemoryStore<Vec<Record>>,
        failing: Cell<bool>,
    }

    impl Persist<Vec<Record>> for FlakyStore {
        fn load(&self) -> Result<Option<Vec<Record>>> {
            self.inner.load()
        }

        fn save(&self, value: &Vec<Record>) -> Result<()> {
            if self.failing.get() {
                return Err(ListqError::Io(std::io::Error::other("disk full")));
            }
            self.inner.save(value)
        }
    }

    fn flaky() -> ListqApi<FlakyStore> {
        let store = FlakyStore {
            inner: MemoryStore::with_value(blog_posts()),
            failing: Cell::new(false),
        };
        ListqApi::open(store, ListqConfig::default()).unwrap()
    }

    fn setup() -> ListqApi<MemoryStore<Vec<Record>>> {
        ListqApi::open(MemoryStore::with_value(blog_posts()), ListqConfig::default()).unwrap()
    }

    #[test]
    fn open_empty_store() {
        let api = ListqApi::open(MemoryStore::new(), ListqConfig::default()).unwrap();
        assert!(api.collection().is_empty());
    }

    #[test]
    fn query_syncs_clamped_page() {
        let mut api = setup();
        let mut state = QueryState::new()
            .with_filter("category", FilterValue::One("tech".into()))
            .with_page(99);

        let page = api.query(&mut state);
        assert_eq!(page.page, 2);
        assert_eq!(state.page, 2);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn mutations_are_persisted() {
        let mut api = setup();
        api.insert(Record::new("new").with_text("category", "food"))
            .unwrap();
        api.remove(&"post-1".into()).unwrap();

        let saved = api.store.load().unwrap().unwrap();
        assert_eq!(saved.len(), 12);
        assert!(saved.iter().any(|r| r.id.as_str() == "new"));
        assert!(!saved.iter().any(|r| r.id.as_str() == "post-1"));
    }

    #[test]
    fn mutations_refresh_results() {
        let mut api = setup();
        let mut state = QueryState::new().with_filter("category", FilterValue::One("food".into()));
        assert_eq!(api.query(&mut state).match_count, 0);

        api.insert(Record::new("new").with_text("category", "food"))
            .unwrap();
        assert_eq!(api.query(&mut state).match_count, 1);
        assert!(api
            .facets()
            .get("category")
            .unwrap()
            .values()
            .contains(&"food"));
    }

    #[test]
    fn failed_update_does_not_persist() {
        let mut api = setup();
        let err = api.update(Record::new("ghost")).unwrap_err();
        assert!(matches!(err, ListqError::RecordNotFound(_)));
    }

    #[test]
    fn failed_save_leaves_collection_unchanged() {
        let mut api = flaky();
        let revision = api.collection().revision();
        api.store.failing.set(true);

        let err = api.insert(Record::new("n")).unwrap_err();
        assert!(matches!(err, ListqError::Io(_)));
        assert!(api.update(Record::new("post-1")).is_err());
        assert!(api.remove(&"post-2".into()).is_err());

        assert_eq!(api.collection().len(), 12);
        assert_eq!(api.collection().revision(), revision);
        assert!(api.collection().get(&"n".into()).is_none());
        assert!(api.collection().get(&"post-1".into()).unwrap().text("title").is_some());
        assert!(api.collection().get(&"post-2".into()).is_some());

        api.store.failing.set(false);
        api.insert(Record::new("n")).unwrap();
        assert_eq!(api.store.load().unwrap().unwrap().len(), 13);
    }

    #[test]
    fn reload_picks_up_external_changes() {
        let mut api = setup();
        api.store.save(&vec![Record::new("only")]).unwrap();
        api.reload().unwrap();
        assert_eq!(api.collection().len(), 1);
    }

    #[test]
    fn parse_filter_variants() {
        let api = setup();
        assert_eq!(
            api.parse_filter("category=tech").unwrap(),
            ("category".to_string(), FilterValue::One("tech".into()))
        );
        assert_eq!(
            api.parse_filter("category=all").unwrap(),
            ("category".to_string(), FilterValue::Any)
        );
        assert_eq!(
            api.parse_filter("tags=rust,cli").unwrap(),
            (
                "tags".to_string(),
                FilterValue::AnyOf(vec!["rust".into(), "cli".into()])
            )
        );
        assert!(api.parse_filter("category").is_err());
        assert!(api.parse_filter("=tech").is_err());
    }
}

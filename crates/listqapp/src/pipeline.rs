//! # Query Pipeline
//!
//! The pipeline turns a record slice and a [`QueryState`] into a
//! [`ResultPage`]. It is a strict forward pass, recomputed from scratch on
//! every call:
//!
//! ```text
//! records ─▶ filter ─▶ search ─▶ sort? ─▶ paginate ─▶ ResultPage
//! ```
//!
//! ## Stage Order
//!
//! Filters narrow first and search narrows the filtered set
//! ([`StageOrder::FilterThenSearch`]). Both stages are order-preserving
//! predicates, so [`StageOrder::SearchThenFilter`] yields the same records;
//! the policy is explicit so callers that depend on it can pin it.
//!
//! ## Purity
//!
//! `run` reads its inputs and allocates its output, nothing else. Two calls
//! with equal inputs return equal pages. [`MemoPipeline`] relies on that to
//! cache the last page per snapshot revision and query.
//!
//! ## Facets
//!
//! Facets are computed over the full collection, never the filtered set, so
//! option lists do not collapse as the user narrows the query.

use serde::{Deserialize, Serialize};

use crate::collection::Snapshot;
use crate::facets::{compute_facets, FacetSet};
use crate::filter::apply_filters;
use crate::model::Record;
use crate::paginate::{paginate, ResultPage};
use crate::query::QueryState;
use crate::schema::Schema;
use crate::search::apply_search;
use crate::sort::sort_records;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageOrder {
    #[default]
    FilterThenSearch,
    SearchThenFilter,
}

#[derive(Debug, Clone)]
pub struct QueryPipeline {
    schema: Schema,
    search_fields: Vec<String>,
    page_size: usize,
    order: StageOrder,
}

impl Default for QueryPipeline {
    fn default() -> Self {
        Self::new(Schema::default())
    }
}

impl QueryPipeline {
    /// A pipeline searching the schema's searchable fields.
    pub fn new(schema: Schema) -> Self {
        let search_fields = schema.search_fields();
        Self {
            schema,
            search_fields,
            page_size: DEFAULT_PAGE_SIZE,
            order: StageOrder::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_order(mut self, order: StageOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_search_fields(mut self, fields: Vec<String>) -> Self {
        self.search_fields = fields;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn order(&self) -> StageOrder {
        self.order
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// The records matching `state`, before pagination.
    pub fn matches<'a>(&self, records: &'a [Record], state: &QueryState) -> Vec<&'a Record> {
        let mut matched = match self.order {
            StageOrder::FilterThenSearch => {
                let filtered = apply_filters(records, &state.filters);
                apply_search(filtered, &state.search_term, &self.search_fields)
            }
            StageOrder::SearchThenFilter => {
                let searched = apply_search(records, &state.search_term, &self.search_fields);
                apply_filters(searched, &state.filters)
            }
        };
        if let Some(key) = &state.sort {
            sort_records(&mut matched, key);
        }
        matched
    }

    pub fn run(&self, records: &[Record], state: &QueryState) -> ResultPage {
        let matched = self.matches(records, state);
        let page = paginate(&matched, state.page, self.page_size);
        tracing::debug!(
            total = records.len(),
            matched = page.match_count,
            page = page.page,
            total_pages = page.total_pages,
            "ran query"
        );
        page
    }

    pub fn facets(&self, records: &[Record]) -> FacetSet {
        compute_facets(records, &self.schema)
    }
}

/// Caches the last page and facets computed by a [`QueryPipeline`].
///
/// Pages are keyed by `(snapshot, query state)`, facets by snapshot alone.
/// Snapshots compare by identity (see [`Snapshot::same_as`]), so snapshots
/// of two different collections never share an entry. Results are identical
/// to calling the pipeline directly.
#[derive(Debug)]
pub struct MemoPipeline {
    pipeline: QueryPipeline,
    last_page: Option<(Snapshot, QueryState, ResultPage)>,
    last_facets: Option<(Snapshot, FacetSet)>,
}

impl MemoPipeline {
    pub fn new(pipeline: QueryPipeline) -> Self {
        Self {
            pipeline,
            last_page: None,
            last_facets: None,
        }
    }

    pub fn pipeline(&self) -> &QueryPipeline {
        &self.pipeline
    }

    pub fn run(&mut self, snapshot: &Snapshot, state: &QueryState) -> ResultPage {
        if let Some((cached, cached_state, page)) = &self.last_page {
            if cached.same_as(snapshot) && cached_state == state {
                tracing::trace!(revision = snapshot.revision(), "query cache hit");
                return page.clone();
            }
        }
        let page = self.pipeline.run(snapshot.records(), state);
        self.last_page = Some((snapshot.clone(), state.clone(), page.clone()));
        page
    }

    pub fn facets(&mut self, snapshot: &Snapshot) -> FacetSet {
        if let Some((cached, facets)) = &self.last_facets {
            if cached.same_as(snapshot) {
                return facets.clone();
            }
        }
        let facets = self.pipeline.facets(snapshot.records());
        self.last_facets = Some((snapshot.clone(), facets.clone()));
        facets
    }

    pub fn invalidate(&mut self) {
        self.last_page = None;
        self.last_facets = None;
    }
}

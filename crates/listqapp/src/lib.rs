//! # listq Architecture
//!
//! listq is a **UI-agnostic list query library**: given an in-memory collection
//! of records and the user's query state, it produces the visible page of
//! results and the facet lists that populate filter widgets. The `listq` CLI is
//! one client; a web view or TUI would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (CLI, TUI, web)                                     │
//! │  - Captures input, debounces search, renders pages          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the Collection, persists mutations                  │
//! │  - Snapshots records per query, syncs QueryState            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Pipeline (pipeline.rs + stage modules)                     │
//! │  - filter → search → sort → paginate, plus facets           │
//! │  - Pure functions: no I/O, no hidden state, no errors       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence Port (store/)                                  │
//! │  - Persist<T> trait: FileStore (JSON), MemoryStore (tests)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: The Pipeline Is Total
//!
//! Every stage is defined for every input. Unknown filter fields match nothing,
//! out-of-range pages clamp, an empty result is one empty page. Errors only
//! exist at the edges: loading files, parsing config, mutating the collection.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade for clients
//! - [`pipeline`]: Stage composition and memoization
//! - [`filter`], [`search`], [`sort`], [`paginate`]: The stages
//! - [`facets`]: Distinct values per filterable field
//! - [`query`]: Caller-held query state
//! - [`collection`]: Mutable records and immutable snapshots
//! - [`debounce`]: Quiescence-window debouncing for search input
//! - [`schema`]: Which fields are filterable and searchable
//! - [`model`]: `Record` and `FieldValue`
//! - [`store`]: Persistence port
//! - [`config`]: Configuration loading
//! - [`error`]: Error types

pub mod api;
pub mod collection;
pub mod config;
pub mod debounce;
pub mod error;
pub mod facets;
pub mod filter;
pub mod model;
pub mod paginate;
pub mod pipeline;
pub mod query;
pub mod schema;
pub mod search;
pub mod sort;
pub mod store;

#[cfg(test)]
mod test_utils;

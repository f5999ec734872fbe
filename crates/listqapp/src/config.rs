//! # Configuration
//!
//! Configuration is loaded with [`confique`] from TOML files and environment
//! variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `LISTQ_PAGE_SIZE`, `LISTQ_DEBOUNCE_MS`, `LISTQ_WILDCARD`.
//! 2. **Explicit file**: the path passed to [`ListqConfig::load`] (`--config`).
//! 3. **Working directory**: `./listq.toml`, if present.
//! 4. **Compiled defaults**: `#[config(default = ...)]` and the accessor fallbacks.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `5` | Records per page |
//! | `debounce_ms` | `300` | Quiescence window for search input |
//! | `wildcard` | `all` | Filter value meaning "no filter" |
//! | `search_fields` | `["title", "content"]` | Fields free-text search looks at |
//! | `single_select` | `["category", "author"]` | Fields filtered by one value |
//! | `multi_select` | `["tags"]` | Fields filtered by any of several values |
//! | `stage_order` | `filter-then-search` | Or `search-then-filter` |

use std::path::Path;
use std::time::Duration;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pipeline::{QueryPipeline, StageOrder};
use crate::schema::{FieldSpec, Schema};

pub const DEFAULT_CONFIG_FILE: &str = "listq.toml";

fn default_search_fields() -> Vec<String> {
    vec!["title".to_string(), "content".to_string()]
}

fn default_single_select() -> Vec<String> {
    vec!["category".to_string(), "author".to_string()]
}

fn default_multi_select() -> Vec<String> {
    vec!["tags".to_string()]
}

/// Configuration for listq, stored in `listq.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListqConfig {
    /// Records per page.
    #[config(env = "LISTQ_PAGE_SIZE", default = 5)]
    pub page_size: usize,

    /// Quiescence window, in milliseconds, before a search term settles.
    #[config(env = "LISTQ_DEBOUNCE_MS", default = 300)]
    pub debounce_ms: u64,

    /// Filter value meaning "no filter applied".
    #[config(env = "LISTQ_WILDCARD", default = "all")]
    pub wildcard: String,

    /// Fields searched by free text. Defaults to ["title", "content"].
    pub search_fields: Option<Vec<String>>,

    /// Single-select filter fields. Defaults to ["category", "author"].
    pub single_select: Option<Vec<String>>,

    /// Multi-select filter fields. Defaults to ["tags"].
    pub multi_select: Option<Vec<String>>,

    /// Whether filters or search run first. Defaults to filter-then-search.
    pub stage_order: Option<StageOrder>,
}

impl Default for ListqConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            debounce_ms: 300,
            wildcard: "all".to_string(),
            search_fields: None,
            single_select: None,
            multi_select: None,
            stage_order: None,
        }
    }
}

impl ListqConfig {
    /// Load from env, an optional explicit file, then `./listq.toml`.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        let config = builder.file(DEFAULT_CONFIG_FILE).load()?;
        tracing::debug!(?config, "loaded config");
        Ok(config)
    }

    pub fn search_fields(&self) -> Vec<String> {
        self.search_fields
            .clone()
            .unwrap_or_else(default_search_fields)
    }

    pub fn single_select(&self) -> Vec<String> {
        self.single_select
            .clone()
            .unwrap_or_else(default_single_select)
    }

    pub fn multi_select(&self) -> Vec<String> {
        self.multi_select
            .clone()
            .unwrap_or_else(default_multi_select)
    }

    pub fn stage_order(&self) -> StageOrder {
        self.stage_order.unwrap_or_default()
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn schema(&self) -> Schema {
        let mut schema = Schema::new(Vec::new()).with_wildcard(self.wildcard.clone());
        for name in self.search_fields() {
            schema.add(FieldSpec::text(name).searchable());
        }
        for name in self.single_select() {
            schema.add(FieldSpec::single_select(name));
        }
        for name in self.multi_select() {
            schema.add(FieldSpec::multi_select(name));
        }
        schema
    }

    pub fn pipeline(&self) -> QueryPipeline {
        QueryPipeline::new(self.schema())
            .with_page_size(self.page_size)
            .with_order(self.stage_order())
    }
}

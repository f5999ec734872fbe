//! # Persistence Port
//!
//! The pipeline never touches storage. Anything that outlives a single query
//! (the record collection, the user's last [`crate::query::QueryState`]) goes
//! through the [`Persist`] trait, which callers inject where they need it.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON on disk. Missing file loads as `None`; writes go
//!   to a temp file first and are renamed into place.
//! - [`memory::MemoryStore`]: in-process, for tests and ephemeral sessions.
//!
//! ## Storage Layout
//!
//! ```text
//! posts.json          # Vec<Record>
//! .listq/state.json   # QueryState
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Load/save a single value of type `T`.
pub trait Persist<T> {
    /// Load the stored value. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<T>>;

    /// Store `value`, replacing whatever was there.
    fn save(&self, value: &T) -> Result<()>;

    /// Load the stored value or fall back to `T::default()`.
    fn load_or_default(&self) -> Result<T>
    where
        T: Default,
    {
        Ok(self.load()?.unwrap_or_default())
    }
}

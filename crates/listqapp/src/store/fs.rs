use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::Persist;
use crate::error::{ListqError, Result};

/// JSON file persistence for a single value.
pub struct FileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(ListqError::Io)?;
            }
        }
        Ok(())
    }
}

impl<T> Persist<T> for FileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(ListqError::Io)?;
        let value = serde_json::from_str(&content).map_err(ListqError::Serialization)?;
        tracing::debug!(path = %self.path.display(), "loaded");
        Ok(Some(value))
    }

    fn save(&self, value: &T) -> Result<()> {
        self.ensure_parent()?;
        let content = serde_json::to_string_pretty(value).map_err(ListqError::Serialization)?;

        // Atomic write: temp file in the same directory, then rename
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp_file = self
            .path
            .with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(ListqError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(ListqError::Io(e));
        }

        tracing::debug!(path = %self.path.display(), "saved");
        Ok(())
    }
}

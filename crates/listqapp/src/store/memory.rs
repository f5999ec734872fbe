use std::sync::Mutex;

use super::Persist;
use crate::error::Result;

/// In-process persistence. Clones on every load/save.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    value: Mutex<Option<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    pub fn with_value(value: T) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }
}

impl<T: Clone> Persist<T> for MemoryStore<T> {
    fn load(&self) -> Result<Option<T>> {
        let guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, value: &T) -> Result<()> {
        let mut guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(value.clone());
        Ok(())
    }
}

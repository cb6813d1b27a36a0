use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::domain::entities::FilmRecord;
use crate::shared::errors::AppResult;

struct CacheEntry {
    modified: SystemTime,
    table: Arc<Vec<FilmRecord>>,
}

/// Explicit load cache keyed by (file path, modification timestamp).
///
/// A hit requires the file's current mtime to match the cached one;
/// writers call [`TableCache::invalidate`] after a save. One render
/// pass reads the table once through here and treats it as immutable.
#[derive(Default)]
pub struct TableCache {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load<F>(&self, path: &Path, load: F) -> AppResult<Arc<Vec<FilmRecord>>>
    where
        F: FnOnce() -> AppResult<Vec<FilmRecord>>,
    {
        let modified = fs::metadata(path).and_then(|m| m.modified()).ok();

        if let Some(modified) = modified {
            let entries = self.entries.lock().expect("cache lock poisoned");
            if let Some(entry) = entries.get(path) {
                if entry.modified == modified {
                    log::debug!("Cache hit for {}", path.display());
                    return Ok(Arc::clone(&entry.table));
                }
            }
        }

        let table = Arc::new(load()?);
        if let Some(modified) = modified {
            let mut entries = self.entries.lock().expect("cache lock poisoned");
            entries.insert(
                path.to_path_buf(),
                CacheEntry {
                    modified,
                    table: Arc::clone(&table),
                },
            );
        }
        Ok(table)
    }

    /// Drop the cached table for `path`. Writers call this after every
    /// successful save so the next read observes their change even on
    /// filesystems with coarse mtime resolution.
    pub fn invalidate(&self, path: &Path) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if entries.remove(path).is_some() {
            log::debug!("Invalidated cached table for {}", path.display());
        }
    }
}

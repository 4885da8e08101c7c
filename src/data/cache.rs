use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::LoadError;
use super::loader::load_file;
use super::model::{Dataset, TimeBase};

// ---------------------------------------------------------------------------
// Lazily loaded, read-only dataset with manual invalidation
// ---------------------------------------------------------------------------

/// Holds the dataset for the current source file.
///
/// The first [`get`](Self::get) reads the file; later calls hand out the same
/// `Arc` until [`invalidate`](Self::invalidate) or [`set_path`](Self::set_path)
/// drops it. Failed loads are not cached.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    time_base: TimeBase,
    loaded: Option<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, time_base: TimeBase) -> Self {
        Self {
            path: path.into(),
            time_base,
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the dataset, reading the file only if nothing is cached.
    pub fn get(&mut self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(ds) = &self.loaded {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_file(&self.path, self.time_base)?);
        self.loaded = Some(Arc::clone(&ds));
        Ok(ds)
    }

    /// Drop the cached dataset; the next `get` re-reads the file.
    pub fn invalidate(&mut self) {
        if self.loaded.take().is_some() {
            log::debug!("Dropped cached dataset for {}", self.path.display());
        }
    }

    /// Point the cache at another file.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.invalidate();
        self.path = path.into();
    }
}

use crate::export;
use crate::ingest::{self, IngestReport};
use crate::lmdb_storage::{CategoryMeta, LmdbStorage};
use reception_core::{CategoryOrder, Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Owns the data directory and the persisted record store
pub struct StorageManager {
    lmdb: Arc<LmdbStorage>,
    data_dir: PathBuf,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let lmdb_path = data_dir.join("lmdb");
        let lmdb = Arc::new(LmdbStorage::new(&lmdb_path)
            .map_err(|e| Error::Storage(e.to_string()))?);

        Ok(Self { lmdb, data_dir })
    }

    /// Shared handle for the resolver
    #[inline]
    pub fn store(&self) -> Arc<LmdbStorage> {
        self.lmdb.clone()
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Import `{category}.csv` files from `csv_dir` for every category in `order`
    pub fn ingest_dir(&self, order: &CategoryOrder, csv_dir: &Path) -> Result<Vec<IngestReport>> {
        ingest::ingest_dir(&self.lmdb, order, csv_dir)
    }

    /// Write all stored records as a JSON FAQ document
    pub fn export_document(&self, order: &CategoryOrder, path: &Path) -> Result<usize> {
        export::export_document(self.lmdb.as_ref(), order, path)
    }

    pub fn list_categories(&self) -> Result<Vec<String>> {
        self.lmdb.list_categories()
            .map_err(|e| Error::Storage(e.to_string()))
    }

    pub fn category_meta(&self, category: &str) -> Result<Option<CategoryMeta>> {
        self.lmdb.category_meta(category)
            .map_err(|e| Error::Storage(e.to_string()))
    }
}

// LMDB-backed record storage, one key per record: "{category}/{seq:08}"
use anyhow::Result;
use heed::{Database, Env, EnvOpenOptions};
use parking_lot::RwLock;
use reception_core::{Category, Error, Record, RecordStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const DB_RECORDS: &str = "records";
const DB_CATEGORIES: &str = "categories";

/// Bookkeeping written alongside each ingested category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryMeta {
    pub records: usize,
    pub skipped: usize,
    pub ingested_at: String,
    pub source_checksum: Option<String>,
}

pub struct LmdbStorage {
    env: Arc<Env>,
    records_db: Database<heed::types::Str, heed::types::Bytes>,
    categories_db: Database<heed::types::Str, heed::types::Bytes>,
    // Decoded records per category, dropped on every replace
    cache: RwLock<HashMap<String, Arc<[Record]>>>,
}

fn record_prefix(category: &str) -> String {
    format!("{}/", category)
}

fn record_key(category: &str, seq: usize) -> String {
    format!("{}/{:08}", category, seq)
}

impl LmdbStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        std::fs::create_dir_all(&path)?;

        let env = Arc::new(
            unsafe {
                EnvOpenOptions::new()
                    .map_size(256 * 1024 * 1024)
                    .max_dbs(4)
                    .open(path)?
            }
        );

        let mut wtxn = env.write_txn()?;
        let records_db = env.create_database(&mut wtxn, Some(DB_RECORDS))?;
        let categories_db = env.create_database(&mut wtxn, Some(DB_CATEGORIES))?;
        wtxn.commit()?;

        Ok(Self {
            env,
            records_db,
            categories_db,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Replace every record of `category` in a single write transaction
    pub fn replace_category(&self, category: &str, records: &[Record], meta: &CategoryMeta) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;

        let prefix = record_prefix(category);
        let stale: Vec<String> = self
            .records_db
            .prefix_iter(&wtxn, &prefix)?
            .map(|entry| entry.map(|(key, _)| key.to_string()))
            .collect::<heed::Result<_>>()?;
        for key in &stale {
            self.records_db.delete(&mut wtxn, key)?;
        }

        for (seq, record) in records.iter().enumerate() {
            let data = bincode::serialize(record)?;
            self.records_db.put(&mut wtxn, &record_key(category, seq), &data)?;
        }

        let meta_data = bincode::serialize(meta)?;
        self.categories_db.put(&mut wtxn, category, &meta_data)?;

        // Commit and invalidate under the cache lock so no load can cache
        // the records being replaced
        let mut cache = self.cache.write();
        wtxn.commit()?;
        cache.remove(category);
        Ok(())
    }

    /// Records of `category` in ingestion order; empty when never ingested
    pub fn load_category(&self, category: &str) -> Result<Arc<[Record]>> {
        if let Some(records) = self.cache.read().get(category) {
            return Ok(records.clone());
        }

        // Filled under the write lock: a replace cannot commit between
        // this read and the insert
        let mut cache = self.cache.write();
        if let Some(records) = cache.get(category) {
            return Ok(records.clone());
        }

        let rtxn = self.env.read_txn()?;
        let prefix = record_prefix(category);
        let mut records = Vec::new();
        for entry in self.records_db.prefix_iter(&rtxn, &prefix)? {
            let (_, data) = entry?;
            records.push(bincode::deserialize::<Record>(data)?);
        }
        drop(rtxn);

        let records: Arc<[Record]> = records.into();
        cache.insert(category.to_string(), records.clone());
        Ok(records)
    }

    pub fn category_meta(&self, category: &str) -> Result<Option<CategoryMeta>> {
        let rtxn = self.env.read_txn()?;
        match self.categories_db.get(&rtxn, category)? {
            Some(data) => Ok(Some(bincode::deserialize(data)?)),
            None => Ok(None),
        }
    }

    /// Categories that have been ingested at least once
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let rtxn = self.env.read_txn()?;
        let mut categories = Vec::new();
        for result in self.categories_db.iter(&rtxn)? {
            let (key, _) = result?;
            categories.push(key.to_string());
        }
        Ok(categories)
    }
}

impl RecordStore for LmdbStorage {
    fn lookup(&self, category: &Category) -> reception_core::Result<Vec<Record>> {
        self.load_category(category.name())
            .map(|records| records.to_vec())
            .map_err(|e| Error::store_unavailable(category.name(), e))
    }
}

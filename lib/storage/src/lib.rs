pub mod export;
pub mod ingest;
pub mod lmdb_storage;
pub mod manager;

pub use export::export_document;
pub use ingest::{IngestReport, ParsedTable};
pub use lmdb_storage::{CategoryMeta, LmdbStorage};
pub use manager::StorageManager;

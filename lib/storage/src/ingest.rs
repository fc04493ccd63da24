// CSV ingestion: one file per category, `{category}.csv` or `{category}.csv.gz`
use crate::lmdb_storage::{CategoryMeta, LmdbStorage};
use chrono::Utc;
use flate2::read::GzDecoder;
use reception_core::{Category, CategoryOrder, Error, Record, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of importing one category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngestReport {
    pub category: String,
    pub imported: usize,
    /// Rows with neither question nor answer
    pub skipped: usize,
    pub source: PathBuf,
    pub checksum: String,
}

/// Rows parsed from one tabular source
#[derive(Debug, Default)]
pub struct ParsedTable {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Column positions picked from the header row
#[derive(Debug, Clone, Copy, PartialEq)]
struct Columns {
    question: usize,
    answer: usize,
    keywords: Option<usize>,
}

impl Columns {
    fn detect(headers: &csv::StringRecord) -> Result<Self> {
        let find = |needle: &str| {
            headers
                .iter()
                .position(|h| h.trim().to_lowercase().contains(needle))
        };

        Ok(Self {
            question: find("question").ok_or_else(|| Error::Ingest("no question column".to_string()))?,
            answer: find("answer").ok_or_else(|| Error::Ingest("no answer column".to_string()))?,
            keywords: find("keyword"),
        })
    }
}

/// Parse CSV data with a header row. Blank rows are counted, not returned.
pub fn parse_csv<R: Read>(reader: R) -> Result<ParsedTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::Ingest(e.to_string()))?
        .clone();
    let columns = Columns::detect(&headers)?;

    let mut table = ParsedTable::default();
    for row in csv_reader.records() {
        let row = row.map_err(|e| Error::Ingest(e.to_string()))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let record = Record::from_cells(
            cell(columns.question),
            cell(columns.answer),
            columns.keywords.map(cell).unwrap_or(""),
        );

        if record.is_blank() {
            table.skipped += 1;
        } else {
            table.records.push(record);
        }
    }

    Ok(table)
}

/// Locate the source file for a category, preferring plain CSV
pub fn source_for(dir: &Path, category: &Category) -> Option<PathBuf> {
    [
        dir.join(format!("{}.csv", category)),
        dir.join(format!("{}.csv.gz", category)),
    ]
    .into_iter()
    .find(|p| p.is_file())
}

/// Import one file into `category`, replacing what was there
pub fn ingest_file(storage: &LmdbStorage, category: &Category, path: &Path) -> Result<IngestReport> {
    let raw = fs::read(path)?;
    let checksum = format!("{:x}", Sha256::digest(&raw));

    let gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");
    let table = if gzipped {
        parse_csv(GzDecoder::new(raw.as_slice()))?
    } else {
        parse_csv(raw.as_slice())?
    };

    let meta = CategoryMeta {
        records: table.records.len(),
        skipped: table.skipped,
        ingested_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        source_checksum: Some(checksum.clone()),
    };
    storage
        .replace_category(category.name(), &table.records, &meta)
        .map_err(|e| Error::Storage(e.to_string()))?;

    info!(
        category = %category,
        imported = table.records.len(),
        skipped = table.skipped,
        "imported {}",
        path.display()
    );

    Ok(IngestReport {
        category: category.name().to_string(),
        imported: table.records.len(),
        skipped: table.skipped,
        source: path.to_path_buf(),
        checksum,
    })
}

/// Import every configured category found in `dir`. Missing files are skipped.
pub fn ingest_dir(storage: &LmdbStorage, order: &CategoryOrder, dir: &Path) -> Result<Vec<IngestReport>> {
    if !dir.is_dir() {
        return Err(Error::Ingest(format!("not a directory: {}", dir.display())));
    }

    let mut reports = Vec::new();
    for category in order {
        match source_for(dir, category) {
            Some(path) => reports.push(ingest_file(storage, category, &path)?),
            None => info!(category = %category, "no source file in {}, skipping", dir.display()),
        }
    }
    Ok(reports)
}

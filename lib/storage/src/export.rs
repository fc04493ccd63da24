// JSON FAQ document export for the browser widget
use atomicwrites::{AtomicFile, OverwriteBehavior};
use reception_core::{CategoryOrder, Error, FaqEntry, RecordStore, Result};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Collect every record of every category in precedence order
pub fn collect_entries<S: RecordStore + ?Sized>(store: &S, order: &CategoryOrder) -> Result<Vec<FaqEntry>> {
    let mut entries = Vec::new();
    for category in order {
        let records = store.lookup(category)?;
        entries.extend(records.iter().map(|r| FaqEntry::from_record(category, r)));
    }
    Ok(entries)
}

/// Write the document atomically; readers never see a partial file.
/// Returns the number of entries written.
pub fn export_document<S: RecordStore + ?Sized>(store: &S, order: &CategoryOrder, path: &Path) -> Result<usize> {
    let entries = collect_entries(store, order)?;

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &entries)?;
            writer.flush().map_err(serde_json::Error::io)
        })
        .map_err(|e| match e {
            atomicwrites::Error::Internal(io) => Error::Io(io),
            atomicwrites::Error::User(json) => Error::from(json),
        })?;

    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reception_core::{MemoryStore, Record};

    #[test]
    fn test_export_round_trips_through_memory_store() {
        let store = MemoryStore::new()
            .with_category("finance_faqs", vec![Record::new("fees?", "See bursar").with_keywords(["fee"])])
            .with_category("it_support", vec![Record::new("wifi?", "campus-net")]);
        let order = CategoryOrder::new(["finance_faqs", "it_support"]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq-data.json");
        assert_eq!(export_document(&store, &order, &path).unwrap(), 2);

        let loaded = MemoryStore::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.lookup(&"finance_faqs".into()).unwrap(), store.lookup(&"finance_faqs".into()).unwrap());
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_collect_entries_follows_order() {
        let store = MemoryStore::new()
            .with_category("a", vec![Record::new("qa", "aa")])
            .with_category("b", vec![Record::new("qb", "ab")]);
        let order = CategoryOrder::new(["b", "a"]).unwrap();

        let entries = collect_entries(&store, &order).unwrap();
        assert_eq!(entries[0].category.as_deref(), Some("b"));
        assert_eq!(entries[1].answer, "aa");
    }
}

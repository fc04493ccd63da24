//! Record store abstraction
//!
//! The resolver only needs one capability from its backing data: list the
//! records of a category. [`MemoryStore`] is the in-process snapshot used
//! for JSON FAQ documents and tests; the persisted LMDB store lives in the
//! storage crate.

use crate::record::parse_keywords;
use crate::{Category, Record, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::Arc;

/// Read-only lookup of records per category.
///
/// Implementations must be safe for concurrent reads. A lookup either
/// fails (typically [`crate::Error::StoreUnavailable`]) or returns the
/// category's records, possibly none; callers treat both the same way.
pub trait RecordStore: Send + Sync {
    fn lookup(&self, category: &Category) -> Result<Vec<Record>>;
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn lookup(&self, category: &Category) -> Result<Vec<Record>> {
        (**self).lookup(category)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn lookup(&self, category: &Category) -> Result<Vec<Record>> {
        (**self).lookup(category)
    }
}

/// Immutable in-memory snapshot of categorized records
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    categories: AHashMap<Category, Arc<[Record]>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a category. Blank records are dropped.
    #[must_use]
    pub fn with_category<C, I>(mut self, category: C, records: I) -> Self
    where
        C: Into<Category>,
        I: IntoIterator<Item = Record>,
    {
        let records: Vec<Record> = records.into_iter().filter(|r| !r.is_blank()).collect();
        self.categories.insert(category.into(), records.into());
        self
    }

    /// Build a snapshot from FAQ document entries, keeping document order
    /// within each category.
    pub fn from_entries(entries: Vec<FaqEntry>) -> Self {
        let mut grouped: AHashMap<Category, Vec<Record>> = AHashMap::new();
        for entry in entries {
            let category: Category = entry
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(crate::category::DEFAULT_DOCUMENT_CATEGORY)
                .into();
            let record = entry.into_record();
            if !record.is_blank() {
                grouped.entry(category).or_default().push(record);
            }
        }

        Self {
            categories: grouped.into_iter().map(|(c, r)| (c, r.into())).collect(),
        }
    }

    /// Parse a JSON FAQ document (an array of [`FaqEntry`])
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<FaqEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<FaqEntry> = serde_json::from_reader(reader)?;
        Ok(Self::from_entries(entries))
    }

    pub fn categories(&self) -> Vec<Category> {
        let mut names: Vec<Category> = self.categories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Total number of records across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn lookup(&self, category: &Category) -> Result<Vec<Record>> {
        Ok(self
            .categories
            .get(category)
            .map(|records| records.to_vec())
            .unwrap_or_default())
    }
}

/// One entry of a JSON FAQ document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub keywords: Keywords,
}

/// Keywords appear either as a JSON array or as a delimited string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Keywords {
    List(Vec<String>),
    Text(String),
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords::List(Vec::new())
    }
}

impl FaqEntry {
    pub fn from_record(category: &Category, record: &Record) -> Self {
        Self {
            category: Some(category.name().to_string()),
            question: record.question.clone(),
            answer: record.answer.clone(),
            keywords: Keywords::List(record.keywords.clone()),
        }
    }

    pub fn into_record(self) -> Record {
        let record = Record::new(self.question.trim(), self.answer.trim());
        match self.keywords {
            Keywords::List(list) => record.with_keywords(list),
            Keywords::Text(text) => record.with_keywords(parse_keywords(&text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_is_empty() {
        let store = MemoryStore::new();
        assert!(store.lookup(&Category::from("finance_faqs")).unwrap().is_empty());
    }

    #[test]
    fn test_with_category_drops_blank() {
        let store = MemoryStore::new().with_category(
            "finance_faqs",
            vec![Record::new("", ""), Record::new("fees?", "See the bursar")],
        );
        let records = store.lookup(&"finance_faqs".into()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].answer, "See the bursar");
    }

    #[test]
    fn test_from_json_document() {
        let json = r#"[
            {"question": "Where is the library?", "answer": "Building B", "keywords": ["library", "Books"]},
            {"category": "it_support", "question": "Reset password", "answer": "Use the portal", "keywords": "password; login"},
            {"category": "it_support", "question": "", "answer": ""}
        ]"#;
        let store = MemoryStore::from_json(json).unwrap();
        assert_eq!(store.len(), 2);

        let general = store.lookup(&"general_questions".into()).unwrap();
        assert_eq!(general[0].keywords, vec!["library", "books"]);

        let it = store.lookup(&"it_support".into()).unwrap();
        assert_eq!(it.len(), 1);
        assert_eq!(it[0].keywords, vec!["password", "login"]);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(MemoryStore::from_json("{not json"), Err(crate::Error::Serialization(_))));
    }

    #[test]
    fn test_categories_sorted() {
        let store = MemoryStore::new()
            .with_category("it_support", vec![Record::new("a", "b")])
            .with_category("finance_faqs", vec![Record::new("c", "d")]);
        assert_eq!(store.categories(), vec![Category::from("finance_faqs"), Category::from("it_support")]);
    }
}

//! # reception
//!
//! Campus reception assistant: a keyword-matching answer service over
//! categorized FAQ records.
//!
//! A question is normalized (trimmed, lowercased) and matched against the
//! records of each category in a configured precedence order. Inside a
//! category every record is scored (+3 when question and utterance contain
//! one another, +2 per keyword found in the utterance); the first category
//! with any positive score answers with its best record.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! reception --data-dir ./data init-db
//! reception --http-port 3000
//! curl -X POST localhost:3000/ask -H 'content-type: application/json' \
//!      -d '{"question": "How much is the tuition fee?"}'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use reception::prelude::*;
//!
//! let store = MemoryStore::new().with_category(
//!     "finance_faqs",
//!     vec![Record::new("what is the tuition", "Tuition is $5000/semester")
//!         .with_keywords(["tuition", "fee"])],
//! );
//! let resolver = Resolver::new(CategoryOrder::default());
//! let answer = resolver
//!     .resolve(&Utterance::new("How much is the tuition fee this year?"), &store)
//!     .answer_or("Sorry, I don't know the answer to that.");
//! assert_eq!(answer, "Tuition is $5000/semester");
//! ```
//!
//! ## Crate Structure
//!
//! - `reception-core` - Records, categories, the resolver and the equalization evaluator
//! - `reception-storage` - LMDB record store, CSV ingestion, JSON document export
//! - `reception-api` - REST API (`/ask`, `/_tables`, equalization, static pages)

// Re-export core types
pub use reception_core::{
    Category, CategoryOrder, Record, Utterance,
    RecordStore, MemoryStore, FaqEntry,
    Resolver, MatchResult, Hit,
    Error, Result,
};

pub use reception_core::equalization;

// Re-export storage
pub use reception_storage::{StorageManager, LmdbStorage, IngestReport};

// Re-export API
pub use reception_api::{RestApi, AppState, AskResponse, ReplyConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Category, CategoryOrder, Record, Utterance,
        RecordStore, MemoryStore,
        Resolver, MatchResult,
        Error, Result,
        StorageManager,
        RestApi, AppState, ReplyConfig,
    };
}

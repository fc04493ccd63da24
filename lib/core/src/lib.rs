//! # Reception Core
//!
//! Answer resolution for the campus reception assistant.
//!
//! This crate provides the data model and the matching algorithm:
//!
//! - [`Record`] - A stored question/answer unit with its keyword set
//! - [`Category`] / [`CategoryOrder`] - Named record partitions and their precedence
//! - [`Utterance`] - Normalized caller input
//! - [`RecordStore`] - Per-category record lookup, with the in-memory [`MemoryStore`]
//! - [`Resolver`] - Scored best match within the first matching category
//!
//! ## Example
//!
//! ```rust
//! use reception_core::{CategoryOrder, MatchResult, MemoryStore, Record, Resolver, Utterance};
//!
//! let store = MemoryStore::new().with_category(
//!     "finance_faqs",
//!     vec![Record::new("what is the tuition", "Tuition is $5000/semester")
//!         .with_keywords(["tuition", "fee"])],
//! );
//! let resolver = Resolver::new(CategoryOrder::default());
//!
//! let result = resolver.resolve(&Utterance::new("How much is the tuition fee?"), &store);
//! assert_eq!(result, MatchResult::Found("Tuition is $5000/semester".to_string()));
//! ```

pub mod category;
pub mod equalization;
pub mod error;
pub mod record;
pub mod resolver;
pub mod store;
pub mod utterance;

pub use category::{Category, CategoryOrder, DEFAULT_CATEGORIES};
pub use error::{Error, Result};
pub use record::{parse_keywords, Record};
pub use resolver::{Hit, MatchResult, Resolver};
pub use store::{FaqEntry, Keywords, MemoryStore, RecordStore};
pub use utterance::Utterance;

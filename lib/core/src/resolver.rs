//! Answer resolution
//!
//! Scored best match inside the first category that has any match:
//!
//! - `+3` when the record's question and the utterance contain one another
//!   (either direction)
//! - `+2` for every keyword found inside the utterance
//!
//! Categories are visited in the configured order and the first one with a
//! record scoring above zero answers, even if a later category would score
//! higher. Within a category the highest score wins and ties keep the record
//! seen first.

use crate::{Category, CategoryOrder, Record, RecordStore, Utterance};
use tracing::{debug, warn};

/// Weight of a question containment match
pub const QUESTION_WEIGHT: u32 = 3;
/// Weight of each keyword found in the utterance
pub const KEYWORD_WEIGHT: u32 = 2;

/// Outcome of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found(String),
    NotFound,
}

impl MatchResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found(_))
    }

    /// The matched answer, or `fallback` when nothing matched
    pub fn answer_or(self, fallback: &str) -> String {
        match self {
            MatchResult::Found(answer) => answer,
            MatchResult::NotFound => fallback.to_string(),
        }
    }
}

impl From<Option<Hit>> for MatchResult {
    fn from(hit: Option<Hit>) -> Self {
        hit.map(|h| MatchResult::Found(h.answer))
            .unwrap_or(MatchResult::NotFound)
    }
}

/// Winning record with where and how strongly it matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub category: Category,
    pub score: u32,
    pub answer: String,
}

/// Score one record against a normalized utterance
pub fn score(record: &Record, utterance: &str) -> u32 {
    let mut total = 0;

    let question = record.question.trim().to_lowercase();
    if !question.is_empty() && (question.contains(utterance) || utterance.contains(question.as_str())) {
        total += QUESTION_WEIGHT;
    }

    for keyword in &record.keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && utterance.contains(keyword.as_str()) {
            total += KEYWORD_WEIGHT;
        }
    }

    total
}

/// Best record of one category: highest score above zero, first seen on ties
pub fn best_match<'a>(records: &'a [Record], utterance: &str) -> Option<(&'a Record, u32)> {
    let mut best: Option<(&Record, u32)> = None;
    for record in records {
        let s = score(record, utterance);
        if s > best.map_or(0, |(_, top)| top) {
            best = Some((record, s));
        }
    }
    best
}

/// Resolves utterances against a record store in a fixed category order.
///
/// The resolver holds no mutable state; one instance can serve any number
/// of concurrent resolutions.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    order: CategoryOrder,
}

impl Resolver {
    #[must_use]
    pub fn new(order: CategoryOrder) -> Self {
        Self { order }
    }

    #[inline]
    pub fn order(&self) -> &CategoryOrder {
        &self.order
    }

    pub fn resolve<S: RecordStore + ?Sized>(&self, utterance: &Utterance, store: &S) -> MatchResult {
        self.resolve_detailed(utterance, store).into()
    }

    /// Like [`Resolver::resolve`] but reports the answering category and score.
    ///
    /// A category whose lookup fails is logged and skipped.
    pub fn resolve_detailed<S: RecordStore + ?Sized>(&self, utterance: &Utterance, store: &S) -> Option<Hit> {
        if utterance.is_empty() {
            return None;
        }
        let text = utterance.as_str();

        for category in &self.order {
            let records = match store.lookup(category) {
                Ok(records) => records,
                Err(e) => {
                    warn!(category = %category, error = %e, "category unavailable, skipping");
                    continue;
                }
            };

            if let Some((record, score)) = best_match(&records, text) {
                debug!(category = %category, score, "resolved");
                return Some(Hit {
                    category: category.clone(),
                    score,
                    answer: record.answer.clone(),
                });
            }
        }

        None
    }
}

use serde::{Deserialize, Serialize};

/// Separators accepted in a stored keyword list
const KEYWORD_SEPARATORS: &[char] = &[',', ';', '|'];

/// One stored question/answer unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Record {
    pub question: String,
    pub answer: String,
    /// Matching tokens, never displayed
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Record {
    #[inline]
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            keywords: Vec::new(),
        }
    }

    /// Replace the keyword set. Tokens go through the same cleanup as
    /// [`parse_keywords`] so matching never sees blank or upper-case keywords.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = dedup_tokens(keywords.into_iter().map(|k| k.as_ref().trim().to_lowercase()));
        self
    }

    /// Build a record from raw tabular cells. Cells are trimmed and the
    /// keyword cell is parsed as a delimited list.
    pub fn from_cells(question: &str, answer: &str, keywords: &str) -> Self {
        Self {
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
            keywords: parse_keywords(keywords),
        }
    }

    /// A record with neither question nor answer is never ingested
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.question.trim().is_empty() && self.answer.trim().is_empty()
    }
}

/// Parse a free-text keyword list such as `"Tuition, fee; payment"`.
///
/// Entries are trimmed and lowercased, empty entries dropped and
/// duplicates removed keeping the first occurrence.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    dedup_tokens(
        raw.split(KEYWORD_SEPARATORS)
            .map(|token| token.trim().to_lowercase()),
    )
}

fn dedup_tokens(tokens: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in tokens {
        if !token.is_empty() && !out.contains(&token) {
            out.push(token);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords_mixed_separators() {
        let keywords = parse_keywords(" Tuition, fee;PAYMENT | fee ,, ");
        assert_eq!(keywords, vec!["tuition", "fee", "payment"]);
    }

    #[test]
    fn test_parse_keywords_empty() {
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , ; | ").is_empty());
    }

    #[test]
    fn test_from_cells_trims() {
        let record = Record::from_cells("  What is WiFi? ", " Connect to campus-net ", "wifi, internet");
        assert_eq!(record.question, "What is WiFi?");
        assert_eq!(record.answer, "Connect to campus-net");
        assert_eq!(record.keywords, vec!["wifi", "internet"]);
    }

    #[test]
    fn test_blank_record() {
        assert!(Record::from_cells("  ", "", "orphan").is_blank());
        assert!(!Record::new("", "answer only").is_blank());
        assert!(!Record::new("question only", "").is_blank());
    }

    #[test]
    fn test_with_keywords_normalizes() {
        let record = Record::new("q", "a").with_keywords(["Fee", " fee ", ""]);
        assert_eq!(record.keywords, vec!["fee"]);
    }
}

use std::fmt;

/// Caller input after normalization (trimmed, lowercased).
///
/// Normalization is idempotent: normalizing an already normalized
/// utterance yields the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Utterance(String);

impl Utterance {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Utterance {
    fn from(raw: &str) -> Self {
        Utterance::new(raw)
    }
}

/// Trim then lowercase. The lowered text is trimmed again so the result
/// is always a fixed point of `normalize`.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    match lowered.trim() {
        trimmed if trimmed.len() == lowered.len() => lowered,
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  How Much Is TUITION?\n"), "how much is tuition?");
        assert_eq!(normalize("\t \n"), "");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(Utterance::new("   \t").is_empty());
        assert!(!Utterance::new(" a ").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("  Where is the LIBRARY  ");
        assert_eq!(normalize(&once), once);
    }
}

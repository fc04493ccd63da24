use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Precedence used when no order is configured
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "finance_faqs",
    "general_questions",
    "it_support",
    "inquiries",
    "major_test",
    "human_handoff",
];

/// Category that document entries without one fall into
pub const DEFAULT_DOCUMENT_CATEGORY: &str = "general_questions";

/// A named partition of records
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category(s.to_string())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category(s)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, duplicate-free list of categories. The first category with
/// any match wins, so the order here is the whole precedence policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOrder {
    categories: Vec<Category>,
}

impl CategoryOrder {
    pub fn new<I, C>(categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let mut out: Vec<Category> = Vec::new();
        for category in categories.into_iter().map(Into::into) {
            let name = category.name().trim();
            if name.is_empty() {
                return Err(Error::InvalidConfig("category name cannot be empty".to_string()));
            }
            // Names double as storage key prefixes
            if name.contains('/') {
                return Err(Error::InvalidConfig(format!("category name cannot contain '/': {}", name)));
            }
            let category = Category::new(name);
            if out.contains(&category) {
                return Err(Error::InvalidConfig(format!("duplicate category: {}", category)));
            }
            out.push(category);
        }

        if out.is_empty() {
            return Err(Error::InvalidConfig("at least one category is required".to_string()));
        }

        Ok(Self { categories: out })
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name() == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name().to_string()).collect()
    }
}

impl Default for CategoryOrder {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().copied().map(Category::from).collect(),
        }
    }
}

impl FromStr for CategoryOrder {
    type Err = Error;

    /// Parse a comma-separated list, e.g. `"finance_faqs,general_questions"`
    fn from_str(s: &str) -> Result<Self> {
        CategoryOrder::new(s.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }
}

impl<'a> IntoIterator for &'a CategoryOrder {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Validated search input.

use serde::Serialize;
use thiserror::Error;

/// Search input rejected before it reaches the store.
///
/// The message is shown to the visitor as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchQueryError {
    #[error("Your search is too short: use at least {min} characters.")]
    TooShort { min: usize },

    #[error("Your search is too long: use at most {max} characters.")]
    TooLong { max: usize },
}

/// A title search term between [`SearchQuery::MIN_LEN`] and
/// [`SearchQuery::MAX_LEN`] characters, surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub const MIN_LEN: usize = 4;
    pub const MAX_LEN: usize = 20;

    pub fn parse(raw: &str) -> Result<Self, SearchQueryError> {
        let term = raw.trim();
        let len = term.chars().count();
        if len < Self::MIN_LEN {
            return Err(SearchQueryError::TooShort { min: Self::MIN_LEN });
        }
        if len > Self::MAX_LEN {
            return Err(SearchQueryError::TooLong { max: Self::MAX_LEN });
        }
        Ok(Self(term.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test against a title.
    pub fn matches(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.0.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            SearchQuery::parse("abc"),
            Err(SearchQueryError::TooShort { min: 4 })
        );
        assert!(SearchQuery::parse("abcd").is_ok());
        assert!(SearchQuery::parse(&"a".repeat(20)).is_ok());
        assert_eq!(
            SearchQuery::parse(&"a".repeat(21)),
            Err(SearchQueryError::TooLong { max: 20 })
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(SearchQuery::parse("éééé").is_ok());
        assert!(SearchQuery::parse(&"é".repeat(20)).is_ok());
    }

    #[test]
    fn test_trims_whitespace() {
        let query = SearchQuery::parse("  rust  ").unwrap();
        assert_eq!(query.as_str(), "rust");
        assert!(SearchQuery::parse("  ab  ").is_err());
    }

    #[test]
    fn test_matches_ignores_case() {
        let query = SearchQuery::parse("RuSt").unwrap();
        assert!(query.matches("Learning rust today"));
        assert!(!query.matches("Learning Go"));
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

const KEY_SEPARATOR: &str = "::";
const NULL_YEAR: &str = "null";

/// Reconciliation key identifying one logical film.
///
/// Two records with the same key are the same film regardless of any
/// other field differences. The title part is trimmed and lowercased,
/// so the key is case- and whitespace-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilmKey {
    title: String,
    year: Option<i32>,
}

impl FilmKey {
    pub fn new(title: &str, year: Option<i32>) -> Self {
        Self {
            title: title.trim().to_lowercase(),
            year,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Parse the textual form used in the enrichment file's key column.
    pub fn parse(text: &str) -> Option<Self> {
        let (title, year) = text.rsplit_once(KEY_SEPARATOR)?;
        if title.is_empty() {
            return None;
        }
        let year = if year == NULL_YEAR {
            None
        } else {
            Some(year.parse().ok()?)
        };
        Some(Self::new(title, year))
    }
}

impl fmt::Display for FilmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{}{}{}", self.title, KEY_SEPARATOR, year),
            None => write!(f, "{}{}{}", self.title, KEY_SEPARATOR, NULL_YEAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_case_and_whitespace_insensitive() {
        assert_eq!(
            FilmKey::new("The Matrix ", Some(1999)),
            FilmKey::new("the matrix", Some(1999))
        );
    }

    #[test]
    fn test_different_years_are_different_keys() {
        assert_ne!(
            FilmKey::new("Solaris", Some(1972)),
            FilmKey::new("Solaris", Some(2002))
        );
        assert_ne!(FilmKey::new("Solaris", Some(1972)), FilmKey::new("Solaris", None));
    }

    #[test]
    fn test_display_and_parse_round_trip() {
        let with_year = FilmKey::new("The Matrix", Some(1999));
        assert_eq!(with_year.to_string(), "the matrix::1999");
        assert_eq!(FilmKey::parse("the matrix::1999"), Some(with_year));

        let without_year = FilmKey::new("Unknown Short", None);
        assert_eq!(without_year.to_string(), "unknown short::null");
        assert_eq!(FilmKey::parse("unknown short::null"), Some(without_year));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(FilmKey::parse("no separator"), None);
        assert_eq!(FilmKey::parse("title::not-a-year"), None);
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::services::field_normalizer;
use crate::domain::value_objects::{simplified_rating, FilmKey};

/// A film counts as "great" from this rating up.
pub const GREATNESS_THRESHOLD: f64 = 7.5;

/// Anything shorter is treated as a short, not a feature.
pub const FEATURE_MIN_MINUTES: i32 = 40;

/// One row of the watched-film table.
///
/// The raw text of every locale-formatted column is kept verbatim so
/// the file round-trips unchanged; the typed fields next to them are
/// derived once when the row is built and are what every query uses.
/// A cell that fails to parse derives to `None`, never to a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmRecord {
    pub title: String,
    pub year_raw: String,
    /// The stored half-point badge ("Rating" column), e.g. "3,5".
    pub rating_simplified_raw: String,
    /// The stored 0–10 rating ("Rating 10" column), e.g. "7,5".
    pub rating_raw: String,
    pub duration_raw: String,
    pub director: String,
    pub watched_raw: String,
    /// Free-text tokens naming who the film was watched with.
    pub companion_tags: String,
    pub greatness_raw: String,
    pub top: String,

    // Derived at construction, not persisted as their own columns
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub watched_date: Option<NaiveDate>,
}

impl FilmRecord {
    /// Build a record from the raw cells of one file row, deriving the
    /// typed fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        title: String,
        year_raw: String,
        rating_simplified_raw: String,
        rating_raw: String,
        duration_raw: String,
        director: String,
        watched_raw: String,
        companion_tags: String,
        greatness_raw: String,
        top: String,
    ) -> Self {
        let year = field_normalizer::parse_year(&year_raw);
        let rating = field_normalizer::parse_rating(&rating_raw);
        let duration_minutes = field_normalizer::parse_duration(&duration_raw);
        let watched_date = field_normalizer::parse_date(&watched_raw);

        Self {
            title,
            year_raw,
            rating_simplified_raw,
            rating_raw,
            duration_raw,
            director,
            watched_raw,
            companion_tags,
            greatness_raw,
            top,
            year,
            rating,
            duration_minutes,
            watched_date,
        }
    }

    /// Build a record from typed values (manual-entry path), generating
    /// the raw cells in the file's conventions.
    pub fn new(
        title: String,
        year: Option<i32>,
        rating: Option<f64>,
        duration_minutes: Option<i32>,
        director: String,
        watched_date: Option<NaiveDate>,
        companion_tags: String,
    ) -> Self {
        let year_raw = year.map(|y| y.to_string()).unwrap_or_default();
        let rating_raw = rating.map(field_normalizer::format_rating).unwrap_or_default();
        let rating_simplified_raw = simplified_rating::simplify(rating)
            .map(simplified_rating::format_simplified)
            .unwrap_or_default();
        let duration_raw = duration_minutes.map(|d| d.to_string()).unwrap_or_default();
        let watched_raw = watched_date
            .map(field_normalizer::format_date)
            .unwrap_or_default();
        let greatness_raw = if rating.map_or(false, |r| r >= GREATNESS_THRESHOLD) {
            "X".to_string()
        } else {
            String::new()
        };

        Self {
            title,
            year_raw,
            rating_simplified_raw,
            rating_raw,
            duration_raw,
            director,
            watched_raw,
            companion_tags,
            greatness_raw,
            top: String::new(),
            year,
            rating,
            duration_minutes,
            watched_date,
        }
    }

    pub fn key(&self) -> FilmKey {
        FilmKey::new(&self.title, self.year)
    }

    pub fn is_great(&self) -> bool {
        self.rating.map_or(false, |r| r >= GREATNESS_THRESHOLD)
    }

    pub fn is_feature(&self) -> bool {
        self.duration_minutes.map_or(false, |d| d >= FEATURE_MIN_MINUTES)
    }

    /// Simplified half-point rating recomputed from the raw rating.
    pub fn simplified_rating(&self) -> Option<f64> {
        simplified_rating::simplify(self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_derives_typed_fields() {
        let film = FilmRecord::from_raw(
            "Fargo".into(),
            "1996".into(),
            "4".into(),
            "8,5".into(),
            "98".into(),
            "Joel Coen".into(),
            "12/01/2020".into(),
            "Anna".into(),
            "X".into(),
            String::new(),
        );
        assert_eq!(film.year, Some(1996));
        assert_eq!(film.rating, Some(8.5));
        assert_eq!(film.duration_minutes, Some(98));
        assert_eq!(
            film.watched_date,
            NaiveDate::from_ymd_opt(2020, 1, 12)
        );
        assert!(film.is_great());
        assert!(film.is_feature());
    }

    #[test]
    fn test_bad_cells_derive_to_missing_without_losing_the_row() {
        let film = FilmRecord::from_raw(
            "Mystery Reel".into(),
            "??".into(),
            String::new(),
            "alta".into(),
            String::new(),
            String::new(),
            "ieri".into(),
            String::new(),
            String::new(),
            String::new(),
        );
        assert_eq!(film.year, None);
        assert_eq!(film.rating, None);
        assert_eq!(film.duration_minutes, None);
        assert_eq!(film.watched_date, None);
        assert!(!film.is_great());
        // Raw text survives untouched for round-tripping
        assert_eq!(film.year_raw, "??");
        assert_eq!(film.rating_raw, "alta");
    }

    #[test]
    fn test_manual_entry_generates_locale_raw_cells() {
        let film = FilmRecord::new(
            "La dolce vita".into(),
            Some(1960),
            Some(7.9),
            Some(174),
            "Federico Fellini".into(),
            NaiveDate::from_ymd_opt(2021, 3, 7),
            String::new(),
        );
        assert_eq!(film.rating_raw, "7,9");
        assert_eq!(film.rating_simplified_raw, "3,5");
        assert_eq!(film.watched_raw, "07/03/2021");
        assert_eq!(film.greatness_raw, "X");
    }

    #[test]
    fn test_greatness_boundary() {
        let at = FilmRecord::new("A".into(), None, Some(7.5), None, String::new(), None, String::new());
        let below = FilmRecord::new("B".into(), None, Some(7.4), None, String::new(), None, String::new());
        assert!(at.is_great());
        assert!(!below.is_great());
    }
}

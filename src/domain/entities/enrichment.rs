use serde::{Deserialize, Serialize};

use crate::domain::entities::FilmRecord;
use crate::domain::value_objects::{FilmKey, MovieMetadata};

/// Alternate-title lists are capped so one popular film cannot bloat
/// the side file.
pub const MAX_ALTERNATE_TITLES: usize = 10;

/// One row of the enrichment side file: a snapshot of the base columns
/// plus externally sourced metadata, joined to the base store by key.
/// Never written back into the base store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    pub film: FilmRecord,
    pub key: FilmKey,
    pub external_id: Option<u64>,
    pub external_url: String,
    pub genres: Vec<String>,
    pub production_countries: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub alternate_titles: Vec<String>,
}

impl EnrichmentRecord {
    pub fn from_lookup(film: &FilmRecord, metadata: MovieMetadata) -> Self {
        let mut alternate_titles = metadata.alternate_titles;
        alternate_titles.truncate(MAX_ALTERNATE_TITLES);

        Self {
            key: film.key(),
            film: film.clone(),
            external_id: Some(metadata.external_id),
            external_url: metadata.url,
            genres: metadata.genres,
            production_countries: metadata.production_countries,
            spoken_languages: metadata.spoken_languages,
            alternate_titles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_with_titles(count: usize) -> MovieMetadata {
        MovieMetadata {
            external_id: 603,
            url: "https://www.themoviedb.org/movie/603".into(),
            title: "The Matrix".into(),
            release_year: Some(1999),
            genres: vec!["Action".into(), "Science Fiction".into()],
            production_countries: vec!["United States of America".into()],
            spoken_languages: vec!["English".into()],
            alternate_titles: (0..count).map(|i| format!("Title {}", i)).collect(),
            popularity: 85.0,
        }
    }

    #[test]
    fn test_alternate_titles_are_capped() {
        let film = FilmRecord::new(
            "The Matrix".into(),
            Some(1999),
            Some(9.0),
            Some(136),
            "Wachowski".into(),
            None,
            String::new(),
        );
        let record = EnrichmentRecord::from_lookup(&film, metadata_with_titles(25));
        assert_eq!(record.alternate_titles.len(), MAX_ALTERNATE_TITLES);
        assert_eq!(record.key, film.key());
        assert_eq!(record.external_id, Some(603));
    }
}

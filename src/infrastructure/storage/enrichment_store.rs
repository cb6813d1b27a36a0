use std::path::{Path, PathBuf};

use crate::domain::entities::EnrichmentRecord;
use crate::domain::repositories::EnrichmentStore;
use crate::infrastructure::storage::csv_store::{CsvFilmStore, BASE_HEADERS};
use crate::infrastructure::storage::csv_util;
use crate::shared::errors::{AppError, AppResult};

const ENRICHMENT_HEADERS: [&str; 7] = [
    "Key",
    "TMDB ID",
    "TMDB URL",
    "Genres",
    "Countries",
    "Languages",
    "Alternate Titles",
];

/// List cells are comma-joined text.
const LIST_SEPARATOR: &str = ", ";

/// The enrichment side file: every base column followed by the
/// reconciliation key and the externally sourced columns.
pub struct CsvEnrichmentStore {
    path: PathBuf,
}

impl CsvEnrichmentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn all_headers() -> Vec<&'static str> {
        BASE_HEADERS
            .iter()
            .chain(ENRICHMENT_HEADERS.iter())
            .copied()
            .collect()
    }

    fn join_list(items: &[String]) -> String {
        items.join(LIST_SEPARATOR)
    }

    fn split_list(cell: &str) -> Vec<String> {
        cell.split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    fn record_from_row(row: &csv::StringRecord) -> EnrichmentRecord {
        let film = CsvFilmStore::record_from_row(row);
        let base = BASE_HEADERS.len();
        let cell = |i: usize| row.get(base + i).unwrap_or("").trim().to_string();

        // Derive the key from the base columns when the key cell is
        // garbled; the two must agree anyway
        let key = crate::domain::value_objects::FilmKey::parse(&cell(0))
            .unwrap_or_else(|| film.key());

        EnrichmentRecord {
            key,
            external_id: cell(1).parse().ok(),
            external_url: cell(2),
            genres: Self::split_list(&cell(3)),
            production_countries: Self::split_list(&cell(4)),
            spoken_languages: Self::split_list(&cell(5)),
            alternate_titles: Self::split_list(&cell(6)),
            film,
        }
    }

    fn row_from_record(record: &EnrichmentRecord) -> Vec<String> {
        let mut row = CsvFilmStore::row_from_record(&record.film);
        row.push(csv_util::sanitize_field(&record.key.to_string()));
        row.push(
            record
                .external_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        row.push(csv_util::sanitize_field(&record.external_url));
        for list in [
            &record.genres,
            &record.production_countries,
            &record.spoken_languages,
            &record.alternate_titles,
        ] {
            row.push(csv_util::sanitize_field(&Self::join_list(list)));
        }
        row
    }
}

impl EnrichmentStore for CsvEnrichmentStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AppResult<Vec<EnrichmentRecord>> {
        // The side store is optional; absent means nothing enriched yet
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = csv_util::read_lossy(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(csv_util::DELIMITER)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = Self::all_headers();
        csv_util::check_headers(reader.headers()?, &headers)?;

        let mut records = Vec::new();
        for row in reader.records() {
            match row {
                Ok(row) => records.push(Self::record_from_row(&row)),
                Err(e) => {
                    log::warn!("Skipping malformed row in {}: {}", self.path.display(), e);
                }
            }
        }

        log::info!(
            "Loaded {} enrichment records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn save(&self, records: &[EnrichmentRecord]) -> AppResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(csv_util::DELIMITER)
            .from_writer(Vec::new());

        writer.write_record(Self::all_headers())?;
        for record in records {
            writer.write_record(Self::row_from_record(record))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::StorageError(e.to_string()))?;
        csv_util::write_atomic(&self.path, &bytes)?;

        log::info!(
            "Saved {} enrichment records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FilmRecord;
    use crate::domain::value_objects::MovieMetadata;

    fn sample_record() -> EnrichmentRecord {
        let film = FilmRecord::new(
            "The Matrix".into(),
            Some(1999),
            Some(9.0),
            Some(136),
            "Wachowski".into(),
            None,
            String::new(),
        );
        EnrichmentRecord::from_lookup(
            &film,
            MovieMetadata {
                external_id: 603,
                url: "https://www.themoviedb.org/movie/603".into(),
                title: "The Matrix".into(),
                release_year: Some(1999),
                genres: vec!["Action".into(), "Science Fiction".into()],
                production_countries: vec!["United States of America".into()],
                spoken_languages: vec!["English".into()],
                alternate_titles: vec!["Matrix".into()],
                popularity: 85.0,
            },
        )
    }

    #[test]
    fn test_missing_side_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvEnrichmentStore::new(dir.path().join("enriched.csv"));
        assert_eq!(store.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvEnrichmentStore::new(dir.path().join("enriched.csv"));

        let record = sample_record();
        store.save(std::slice::from_ref(&record)).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].key, record.key);
        assert_eq!(reloaded[0].external_id, Some(603));
        assert_eq!(reloaded[0].genres, record.genres);
        assert_eq!(reloaded[0].film.title, "The Matrix");
    }
}

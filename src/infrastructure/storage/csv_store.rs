use std::path::{Path, PathBuf};

use crate::domain::entities::FilmRecord;
use crate::domain::repositories::FilmStore;
use crate::infrastructure::storage::csv_util;
use crate::shared::errors::AppResult;

/// Column order of the base file, fixed.
pub(crate) const BASE_HEADERS: [&str; 10] = [
    "Name",
    "Year",
    "Rating",
    "Rating 10",
    "Duration",
    "Director",
    "Watched Date",
    "Tag Diario",
    "Greatness",
    "Top",
];

/// The semicolon-delimited base store on disk.
pub struct CsvFilmStore {
    path: PathBuf,
}

impl CsvFilmStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn record_from_row(row: &csv::StringRecord) -> FilmRecord {
        let cell = |i: usize| row.get(i).unwrap_or("").to_string();
        FilmRecord::from_raw(
            cell(0),
            cell(1),
            cell(2),
            cell(3),
            cell(4),
            cell(5),
            cell(6),
            cell(7),
            cell(8),
            cell(9),
        )
    }

    pub(crate) fn row_from_record(record: &FilmRecord) -> Vec<String> {
        [
            &record.title,
            &record.year_raw,
            &record.rating_simplified_raw,
            &record.rating_raw,
            &record.duration_raw,
            &record.director,
            &record.watched_raw,
            &record.companion_tags,
            &record.greatness_raw,
            &record.top,
        ]
        .iter()
        .map(|field| csv_util::sanitize_field(field))
        .collect()
    }
}

impl FilmStore for CsvFilmStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AppResult<Vec<FilmRecord>> {
        let text = csv_util::read_lossy(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(csv_util::DELIMITER)
            .flexible(true)
            .from_reader(text.as_bytes());

        csv_util::check_headers(reader.headers()?, &BASE_HEADERS)?;

        let mut records = Vec::new();
        for row in reader.records() {
            match row {
                Ok(row) => records.push(Self::record_from_row(&row)),
                Err(e) => {
                    // One malformed row is not worth losing the table
                    log::warn!("Skipping malformed row in {}: {}", self.path.display(), e);
                }
            }
        }

        log::info!(
            "Loaded {} film records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn save(&self, records: &[FilmRecord]) -> AppResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(csv_util::DELIMITER)
            .from_writer(Vec::new());

        writer.write_record(BASE_HEADERS)?;
        for record in records {
            writer.write_record(Self::row_from_record(record))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| crate::shared::errors::AppError::StorageError(e.to_string()))?;
        csv_util::write_atomic(&self.path, &bytes)?;

        log::info!(
            "Saved {} film records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

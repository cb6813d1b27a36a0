use std::sync::Arc;

use crate::domain::entities::{EnrichmentRecord, FilmRecord};
use crate::domain::repositories::{EnrichmentStore, FilmStore};
use crate::domain::services::reconciler::{
    DuplicatePolicy, InsertOutcome, MergeReport, Reconciler,
};
use crate::domain::value_objects::simplified_rating;
use crate::infrastructure::storage::TableCache;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Workflows over the base store: cached reads, manual adds, bulk
/// imports, and the simplified-rating repair pass.
///
/// One render pass calls [`LibraryService::load`] once and works on
/// that snapshot; every write path saves atomically and invalidates
/// the cached table.
pub struct LibraryService {
    store: Arc<dyn FilmStore>,
    enrichment_store: Arc<dyn EnrichmentStore>,
    cache: TableCache,
}

impl LibraryService {
    pub fn new(store: Arc<dyn FilmStore>, enrichment_store: Arc<dyn EnrichmentStore>) -> Self {
        Self {
            store,
            enrichment_store,
            cache: TableCache::new(),
        }
    }

    /// The current table, served from cache while the file's mtime is
    /// unchanged.
    pub fn load(&self) -> AppResult<Arc<Vec<FilmRecord>>> {
        self.cache
            .get_or_load(self.store.path(), || self.store.load())
    }

    /// Like [`LibraryService::load`], but a load failure degrades to
    /// an empty table after logging. For callers that render something
    /// rather than die.
    pub fn load_or_empty(&self) -> Arc<Vec<FilmRecord>> {
        match self.load() {
            Ok(table) => table,
            Err(e) => {
                log::error!("Falling back to empty table: {}", e);
                Arc::new(Vec::new())
            }
        }
    }

    /// Manual single add. Validates the record, then refuses a
    /// duplicate key unless `allow_duplicate` is set; the refusal is a
    /// reported outcome, not an error.
    pub fn add_film(
        &self,
        record: FilmRecord,
        allow_duplicate: bool,
    ) -> AppResult<InsertOutcome> {
        Validator::validate_title(&record.title)?;
        if let Some(rating) = record.rating {
            Validator::validate_rating(rating)?;
        }

        let mut table = match self.store.load() {
            Ok(table) => table,
            // First add against a store that does not exist yet
            Err(crate::shared::errors::AppError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        let outcome = Reconciler::insert(&mut table, record, allow_duplicate);
        if let InsertOutcome::RejectedDuplicate(key) = &outcome {
            log::info!("Rejected duplicate manual insert for key '{}'", key);
            return Ok(outcome);
        }

        self.store.save(&table)?;
        self.cache.invalidate(self.store.path());
        Ok(outcome)
    }

    /// Bulk import under the given duplicate policy. Returns the merge
    /// report with {added, updated, skipped} counts.
    pub fn import_batch(
        &self,
        incoming: Vec<FilmRecord>,
        policy: DuplicatePolicy,
    ) -> AppResult<MergeReport> {
        for record in &incoming {
            Validator::validate_title(&record.title)?;
        }

        let existing = match self.store.load() {
            Ok(table) => table,
            Err(crate::shared::errors::AppError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        let (merged, report) = Reconciler::merge(existing, incoming, policy);
        self.store.save(&merged)?;
        self.cache.invalidate(self.store.path());

        log::info!(
            "Bulk import: {} added, {} updated, {} skipped",
            report.added,
            report.updated,
            report.skipped
        );
        Ok(report)
    }

    /// Rewrite the stored simplified-rating cell wherever it disagrees
    /// with the value recomputed from the raw rating. Only mismatched
    /// rows change; ordering and every other cell stay untouched.
    /// Returns how many rows were corrected.
    pub fn fix_simplified_ratings(&self) -> AppResult<usize> {
        let mut table = self.store.load()?;

        let mut corrected = 0;
        for record in table.iter_mut() {
            if simplified_rating::is_discrepant(&record.rating_simplified_raw, record.rating) {
                let expected = simplified_rating::simplify(record.rating)
                    .map(simplified_rating::format_simplified)
                    .unwrap_or_default();
                log::debug!(
                    "Correcting simplified rating for '{}': '{}' -> '{}'",
                    record.title,
                    record.rating_simplified_raw,
                    expected
                );
                record.rating_simplified_raw = expected;
                corrected += 1;
            }
        }

        if corrected > 0 {
            self.store.save(&table)?;
            self.cache.invalidate(self.store.path());
            log::info!("Corrected simplified ratings on {} rows", corrected);
        }
        Ok(corrected)
    }

    /// Base rows joined with their enrichment row by key. Base rows
    /// without one pair with `None`; a failing side-file load degrades
    /// to an unenriched view.
    pub fn merged_view(&self) -> AppResult<Vec<(FilmRecord, Option<EnrichmentRecord>)>> {
        let films = self.load()?;
        let enrichments = match self.enrichment_store.load() {
            Ok(enrichments) => enrichments,
            Err(e) => {
                log::warn!("Enrichment store unavailable, serving base only: {}", e);
                Vec::new()
            }
        };

        let by_key: std::collections::HashMap<_, _> = enrichments
            .into_iter()
            .map(|record| (record.key.clone(), record))
            .collect();

        Ok(films
            .iter()
            .map(|film| (film.clone(), by_key.get(&film.key()).cloned()))
            .collect())
    }

    /// Drop the cached table; writers outside this service can use
    /// this to force the next read to hit the disk.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate(self.store.path());
    }
}

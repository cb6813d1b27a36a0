use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{EnrichmentRecord, FilmRecord};
use crate::domain::repositories::{EnrichmentStore, MetadataProvider};
use crate::domain::services::reconciler::{DuplicatePolicy, Reconciler};
use crate::domain::value_objects::FilmKey;
use crate::shared::errors::AppResult;

/// Outcome of one enrichment batch. Per-record failures are reported
/// here; they never abort the rest of the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentReport {
    pub enriched: Vec<String>,
    pub not_found: Vec<String>,
    pub failed: Vec<EnrichmentFailure>,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentFailure {
    pub key: String,
    pub reason: String,
}

/// Looks up external metadata for base records that have no enrichment
/// row yet and upserts the results into the side store. The base store
/// is never written from here.
pub struct EnrichmentService {
    provider: Arc<dyn MetadataProvider>,
    store: Arc<dyn EnrichmentStore>,
}

impl EnrichmentService {
    pub fn new(provider: Arc<dyn MetadataProvider>, store: Arc<dyn EnrichmentStore>) -> Self {
        Self { provider, store }
    }

    /// Enrich every film in `films` that has no enrichment row yet.
    /// One blocking lookup at a time; a lookup error is recorded for
    /// that record and the batch continues.
    pub async fn enrich_missing(&self, films: &[FilmRecord]) -> AppResult<EnrichmentReport> {
        let existing = self.store.load()?;
        let known_keys: HashSet<FilmKey> = existing.iter().map(|r| r.key.clone()).collect();

        let pending: Vec<&FilmRecord> = films
            .iter()
            .filter(|film| !known_keys.contains(&film.key()))
            .collect();

        let mut report = EnrichmentReport {
            total: u32::try_from(pending.len()).unwrap_or(u32::MAX),
            ..Default::default()
        };
        let mut fresh: Vec<EnrichmentRecord> = Vec::new();

        for film in pending {
            let key = film.key();
            match self.provider.lookup(&film.title, film.year).await {
                Ok(Some(metadata)) => {
                    fresh.push(EnrichmentRecord::from_lookup(film, metadata));
                    report.enriched.push(key.to_string());
                }
                Ok(None) => {
                    report.not_found.push(key.to_string());
                }
                Err(e) => {
                    log::warn!("Enrichment lookup failed for '{}': {}", key, e);
                    report.failed.push(EnrichmentFailure {
                        key: key.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !fresh.is_empty() {
            let (merged, _) = Reconciler::merge(existing, fresh, DuplicatePolicy::Overwrite);
            self.store.save(&merged)?;
        }

        log::info!(
            "Enrichment batch: {} enriched, {} not found, {} failed of {}",
            report.enriched.len(),
            report.not_found.len(),
            report.failed.len(),
            report.total
        );
        Ok(report)
    }

    /// Re-run the lookup for one film and overwrite its enrichment
    /// row. Used after a base-row correction changes the key's data.
    pub async fn refresh(&self, film: &FilmRecord) -> AppResult<Option<EnrichmentRecord>> {
        let metadata = match self.provider.lookup(&film.title, film.year).await? {
            Some(metadata) => metadata,
            None => return Ok(None),
        };

        let record = EnrichmentRecord::from_lookup(film, metadata);
        let existing = self.store.load()?;
        let (merged, _) =
            Reconciler::merge(existing, vec![record.clone()], DuplicatePolicy::Overwrite);
        self.store.save(&merged)?;
        Ok(Some(record))
    }
}

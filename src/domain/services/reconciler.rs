//! Merges incoming batches into an existing table by reconciliation
//! key. One component serves both the manual single-insert path and
//! the bulk paths so the duplicate policies cannot drift apart.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{EnrichmentRecord, FilmRecord};
use crate::domain::value_objects::FilmKey;

/// How incoming rows whose key already exists are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Drop incoming rows with an existing key; append the rest.
    Skip,
    /// Remove the existing row(s) for the key, append the incoming one.
    Overwrite,
    /// Append everything; no key lookup at all.
    AllowDuplicates,
}

/// Counts reported by a bulk merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Outcome of a single manual insert. A duplicate refusal is a normal
/// result the caller must surface, not an error and not a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    RejectedDuplicate(FilmKey),
}

/// Anything mergeable by reconciliation key.
pub trait Keyed {
    fn key(&self) -> FilmKey;
}

impl Keyed for FilmRecord {
    fn key(&self) -> FilmKey {
        FilmRecord::key(self)
    }
}

impl Keyed for EnrichmentRecord {
    fn key(&self) -> FilmKey {
        self.key.clone()
    }
}

pub struct Reconciler;

impl Reconciler {
    /// Merge `incoming` into `existing` under the given policy.
    ///
    /// Rows whose key is not part of the incoming key-set are never
    /// touched; relative order is preserved within the untouched
    /// existing rows and within the appended rows (existing first,
    /// then new). Duplicate keys already present inside `existing`
    /// are treated as valid data and left alone.
    pub fn merge<T: Keyed>(
        existing: Vec<T>,
        incoming: Vec<T>,
        policy: DuplicatePolicy,
    ) -> (Vec<T>, MergeReport) {
        let mut report = MergeReport::default();

        match policy {
            DuplicatePolicy::AllowDuplicates => {
                report.added = incoming.len();
                let mut merged = existing;
                merged.extend(incoming);
                (merged, report)
            }
            DuplicatePolicy::Skip => {
                let mut seen: HashSet<FilmKey> = existing.iter().map(|r| r.key()).collect();
                let mut merged = existing;
                for record in incoming {
                    // Newly appended keys count as existing for the
                    // rest of the batch
                    if seen.insert(record.key()) {
                        merged.push(record);
                        report.added += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
                (merged, report)
            }
            DuplicatePolicy::Overwrite => {
                let incoming_keys: HashSet<FilmKey> = incoming.iter().map(|r| r.key()).collect();
                let existing_keys: HashSet<FilmKey> = existing.iter().map(|r| r.key()).collect();

                let mut merged: Vec<T> = existing
                    .into_iter()
                    .filter(|r| !incoming_keys.contains(&r.key()))
                    .collect();
                for record in incoming {
                    if existing_keys.contains(&record.key()) {
                        report.updated += 1;
                    } else {
                        report.added += 1;
                    }
                    merged.push(record);
                }
                (merged, report)
            }
        }
    }

    /// Manual single-insert. Refuses a duplicate key unless the caller
    /// explicitly allows it; on refusal the table is left untouched.
    pub fn insert<T: Keyed>(
        existing: &mut Vec<T>,
        record: T,
        allow_duplicate: bool,
    ) -> InsertOutcome {
        let key = record.key();
        if !allow_duplicate && existing.iter().any(|r| r.key() == key) {
            return InsertOutcome::RejectedDuplicate(key);
        }
        existing.push(record);
        InsertOutcome::Inserted
    }
}

use std::sync::Arc;

use cineteca::application::services::LibraryService;
use cineteca::domain::repositories::FilmStore;
use cineteca::infrastructure::storage::{CsvEnrichmentStore, CsvFilmStore};
use cineteca::{DuplicatePolicy, FilmKey, FilmRecord, InsertOutcome, MergeReport};

fn service_in(dir: &tempfile::TempDir) -> LibraryService {
    let _ = env_logger::builder().is_test(true).try_init();
    LibraryService::new(
        Arc::new(CsvFilmStore::new(dir.path().join("films.csv"))),
        Arc::new(CsvEnrichmentStore::new(dir.path().join("enriched.csv"))),
    )
}

fn film(title: &str, year: i32, rating: f64) -> FilmRecord {
    FilmRecord::new(
        title.into(),
        Some(year),
        Some(rating),
        Some(100),
        "Someone".into(),
        None,
        String::new(),
    )
}

#[test]
fn test_manual_add_then_duplicate_refusal_then_override() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    let outcome = service.add_film(film("The Matrix", 1999, 9.0), false).unwrap();
    assert_eq!(outcome, InsertOutcome::Inserted);

    // Same key, different casing: refused without override
    let outcome = service.add_film(film("the matrix ", 1999, 5.0), false).unwrap();
    assert_eq!(
        outcome,
        InsertOutcome::RejectedDuplicate(FilmKey::new("The Matrix", Some(1999)))
    );
    assert_eq!(service.load().unwrap().len(), 1);

    // Explicit override creates a second row
    let outcome = service.add_film(film("the matrix", 1999, 5.0), true).unwrap();
    assert_eq!(outcome, InsertOutcome::Inserted);
    assert_eq!(service.load().unwrap().len(), 2);
}

#[test]
fn test_manual_add_rejects_empty_title() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    assert!(service.add_film(film("  ", 1999, 7.0), false).is_err());
}

#[test]
fn test_bulk_import_policies_report_counts() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    service.add_film(film("A", 1999, 6.0), false).unwrap();

    let incoming = || vec![film("A", 1999, 9.9), film("B", 2020, 7.0)];

    let report = service.import_batch(incoming(), DuplicatePolicy::Skip).unwrap();
    assert_eq!(report, MergeReport { added: 1, updated: 0, skipped: 1 });
    let table = service.load().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].rating, Some(6.0)); // original kept

    let report = service
        .import_batch(incoming(), DuplicatePolicy::Overwrite)
        .unwrap();
    assert_eq!(report, MergeReport { added: 0, updated: 2, skipped: 0 });
    let table = service.load().unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.iter().any(|f| f.rating == Some(9.9)));

    let report = service
        .import_batch(incoming(), DuplicatePolicy::AllowDuplicates)
        .unwrap();
    assert_eq!(report, MergeReport { added: 2, updated: 0, skipped: 0 });
    assert_eq!(service.load().unwrap().len(), 4);
}

#[test]
fn test_cached_reads_see_writes() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    service.add_film(film("A", 1999, 6.0), false).unwrap();
    let first = service.load().unwrap();
    assert_eq!(first.len(), 1);

    // Second write invalidates the snapshot the first read cached
    service.add_film(film("B", 2001, 7.0), false).unwrap();
    let second = service.load().unwrap();
    assert_eq!(second.len(), 2);
}

#[test]
fn test_fix_simplified_ratings_touches_only_mismatched_rows() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvFilmStore::new(dir.path().join("films.csv"));

    // 7.9 should read "3,5": the second row's "4" is a discrepancy
    std::fs::write(
        store.path(),
        "Name;Year;Rating;Rating 10;Duration;Director;Watched Date;Tag Diario;Greatness;Top\n\
         Correct;1999;4;8,0;100;;;;;\n\
         Wrong;2001;4;7,9;100;;;;;\n\
         Unrated;2002;;;100;;;;note kept;\n",
    )
    .unwrap();

    let service = LibraryService::new(
        Arc::new(store),
        Arc::new(CsvEnrichmentStore::new(dir.path().join("enriched.csv"))),
    );

    let corrected = service.fix_simplified_ratings().unwrap();
    assert_eq!(corrected, 1);

    let table = service.load().unwrap();
    assert_eq!(table[0].rating_simplified_raw, "4");
    assert_eq!(table[1].rating_simplified_raw, "3,5");
    assert_eq!(table[2].companion_tags, "note kept");
    // Order untouched
    let titles: Vec<&str> = table.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["Correct", "Wrong", "Unrated"]);

    // Second pass finds nothing left to fix
    assert_eq!(service.fix_simplified_ratings().unwrap(), 0);
}

#[test]
fn test_load_failure_degrades_to_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    assert!(service.load().is_err());
    assert!(service.load_or_empty().is_empty());
}

//! cineteca — a personal movie-log library.
//!
//! Loads a semicolon-delimited, comma-decimal CSV of watched films,
//! derives cleaned typed fields, reconciles bulk/manual additions by
//! (normalized title, year) key, and optionally enriches records with
//! TMDB metadata kept in a separate side file.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use domain::entities::{EnrichmentRecord, FilmRecord};
pub use domain::services::reconciler::{DuplicatePolicy, InsertOutcome, MergeReport};
pub use domain::value_objects::FilmKey;
pub use shared::errors::{AppError, AppResult};

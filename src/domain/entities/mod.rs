mod enrichment;
mod film;

pub use enrichment::{EnrichmentRecord, MAX_ALTERNATE_TITLES};
pub use film::{FilmRecord, FEATURE_MIN_MINUTES, GREATNESS_THRESHOLD};

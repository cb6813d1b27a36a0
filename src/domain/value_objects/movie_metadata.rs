use serde::{Deserialize, Serialize};

/// Externally sourced descriptive metadata for one film, as returned
/// by a metadata provider lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub external_id: u64,
    pub url: String,
    pub title: String,
    pub release_year: Option<i32>,
    pub genres: Vec<String>,
    pub production_countries: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub alternate_titles: Vec<String>,
    pub popularity: f64,
}

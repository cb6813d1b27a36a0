use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::repositories::MetadataProvider;
use crate::domain::value_objects::MovieMetadata;
use crate::shared::errors::{AppError, AppResult};

use super::mapper;
use super::models::{AlternativeTitlesResponse, MovieDetails, MovieSearchResponse};

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB (The Movie Database) lookup client.
///
/// All requests share one bounded-timeout HTTP client; a slow or dead
/// service surfaces as an error for the current record, never a hang.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Cannot build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: TMDB_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Point the client at a different base URL (for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}?api_key={}", self.base_url, endpoint, self.api_key);
        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                404 => AppError::NotFound("External resource not found".to_string()),
                401 | 403 => {
                    AppError::Unauthorized("Not authorized to access TMDB".to_string())
                }
                429 => AppError::RateLimitError("Too many requests".to_string()),
                code => AppError::ApiError(format!("TMDB returned HTTP {}", code)),
            });
        }
        Ok(response.json().await?)
    }

    async fn search_movies(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> AppResult<MovieSearchResponse> {
        let mut params = vec![("query", title.to_string()), ("page", "1".to_string())];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        let url = self.build_url("/search/movie", &params);

        log::info!("TMDB: Searching for '{}' (year: {:?})", title, year);
        self.get_json(&url).await
    }

    async fn get_movie_details(&self, id: u64) -> AppResult<MovieDetails> {
        let url = self.build_url(&format!("/movie/{}", id), &[]);
        self.get_json(&url).await
    }

    async fn get_alternative_titles(&self, id: u64) -> AppResult<AlternativeTitlesResponse> {
        let url = self.build_url(&format!("/movie/{}/alternative_titles", id), &[]);
        self.get_json(&url).await
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn lookup(&self, title: &str, year: Option<i32>) -> AppResult<Option<MovieMetadata>> {
        // Year-constrained search first, falling back to title-only
        // when it finds nothing (the log's year is sometimes off)
        let mut search = self.search_movies(title, year).await?;
        if search.results.is_empty() && year.is_some() {
            search = self.search_movies(title, None).await?;
        }

        let best = match mapper::best_match(title, year, &search.results) {
            Some(best) => best,
            None => {
                log::info!("TMDB: No acceptable match for '{}'", title);
                return Ok(None);
            }
        };

        let details = match self.get_movie_details(best.id).await {
            Ok(details) => details,
            Err(AppError::NotFound(_)) => {
                log::info!("TMDB: Movie {} vanished between search and detail", best.id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        // Alternative titles are decoration; their failure should not
        // cost us the rest of the lookup
        let alternatives = match self.get_alternative_titles(best.id).await {
            Ok(alternatives) => alternatives,
            Err(e) => {
                log::warn!("TMDB: Alternative titles failed for {}: {}", best.id, e);
                AlternativeTitlesResponse { titles: Vec::new() }
            }
        };

        let metadata = mapper::map_metadata(details, alternatives);
        log::info!(
            "TMDB: Matched '{}' to {} ({})",
            title,
            metadata.title,
            metadata.external_id
        );
        Ok(Some(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_query() {
        let client = TmdbClient::new("key".into(), Duration::from_secs(5)).unwrap();
        let url = client.build_url("/search/movie", &[("query", "C'era una volta".to_string())]);
        assert!(url.starts_with("https://api.themoviedb.org/3/search/movie?api_key=key"));
        assert!(url.contains("query=C%27era%20una%20volta"));
    }
}

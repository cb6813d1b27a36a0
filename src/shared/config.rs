use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BASE_FILE: &str = "cosimo-film-visti-excel.csv";
const DEFAULT_ENRICHED_FILE: &str = "cosimo-film-visti-arricchito.csv";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Credentials and location for best-effort remote sync of the base file.
#[derive(Debug, Clone)]
pub struct GithubSyncConfig {
    /// "owner/repo" slug.
    pub repo: String,
    pub branch: String,
    pub token: String,
    /// Path of the base file inside the repository.
    pub remote_path: String,
}

/// Application configuration, loaded from environment-style keys.
///
/// Optional blocks (TMDB, GitHub sync) stay `None` when their keys are
/// absent; the corresponding workflows are simply unavailable then.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_file: PathBuf,
    pub enriched_file: PathBuf,
    pub tmdb_api_key: Option<String>,
    pub http_timeout: Duration,
    pub github: Option<GithubSyncConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // Load .env if present, ignore when missing
        dotenvy::dotenv().ok();

        let base_file = env::var("CINETECA_BASE_FILE")
            .unwrap_or_else(|_| DEFAULT_BASE_FILE.to_string())
            .into();
        let enriched_file = env::var("CINETECA_ENRICHED_FILE")
            .unwrap_or_else(|_| DEFAULT_ENRICHED_FILE.to_string())
            .into();

        let tmdb_api_key = env::var("TMDB_API_KEY").ok().filter(|k| !k.is_empty());

        let http_timeout = env::var("CINETECA_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));

        let github = match (env::var("GITHUB_REPO"), env::var("GITHUB_TOKEN")) {
            (Ok(repo), Ok(token)) if !repo.is_empty() && !token.is_empty() => {
                Some(GithubSyncConfig {
                    repo,
                    branch: env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string()),
                    token,
                    remote_path: env::var("GITHUB_FILE_PATH")
                        .unwrap_or_else(|_| DEFAULT_BASE_FILE.to_string()),
                })
            }
            _ => None,
        };

        Self {
            base_file,
            enriched_file,
            tmdb_api_key,
            http_timeout,
            github,
        }
    }
}

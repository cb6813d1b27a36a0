use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::repositories::RemoteSync;
use crate::infrastructure::storage::csv_util;
use crate::shared::config::GithubSyncConfig;
use crate::shared::errors::{AppError, AppResult};

const GITHUB_API: &str = "https://api.github.com";

/// Contents-API payloads are base64 with embedded newlines.
fn decode_remote_content(content: &str) -> AppResult<Vec<u8>> {
    let encoded: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(encoded)
        .map_err(|e| AppError::SerializationError(format!("Bad base64 from GitHub: {}", e)))
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    /// Base64 with embedded newlines, GitHub convention.
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

/// Keeps a copy of the base file in a GitHub repository through the
/// contents API. Best effort by contract: callers report failures and
/// carry on, the local file remains the source of truth.
pub struct GithubSync {
    http: reqwest::Client,
    api_base: String,
    config: GithubSyncConfig,
}

impl GithubSync {
    pub fn new(config: GithubSyncConfig, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("cineteca")
            .build()
            .map_err(|e| AppError::InternalError(format!("Cannot build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            api_base: GITHUB_API.to_string(),
            config,
        })
    }

    /// Point the client at a different API base (for testing).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_base, self.config.repo, self.config.remote_path
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
    }

    /// Fetch the current remote file, or `None` when it does not exist
    /// yet.
    async fn fetch_remote(&self) -> AppResult<Option<ContentsResponse>> {
        let url = format!("{}?ref={}", self.contents_url(), self.config.branch);
        let response = self.request(self.http.get(&url)).send().await?;
        match response.status().as_u16() {
            200 => Ok(Some(response.json().await?)),
            404 => Ok(None),
            401 | 403 => Err(AppError::Unauthorized(
                "GitHub token rejected".to_string(),
            )),
            code => Err(AppError::ApiError(format!("GitHub returned HTTP {}", code))),
        }
    }
}

#[async_trait]
impl RemoteSync for GithubSync {
    async fn push(&self, local: &Path, message: &str) -> AppResult<()> {
        let bytes = fs::read(local).map_err(|e| {
            AppError::StorageError(format!("Cannot read {}: {}", local.display(), e))
        })?;

        // Need the current blob sha to update an existing file
        let sha = self.fetch_remote().await?.map(|remote| remote.sha);

        let body = PutContentsRequest {
            message,
            content: BASE64.encode(&bytes),
            branch: &self.config.branch,
            sha,
        };
        let response = self
            .request(self.http.put(self.contents_url()).json(&body))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "GitHub push failed with HTTP {}",
                status.as_u16()
            )));
        }

        log::info!(
            "Pushed {} to {}/{}",
            local.display(),
            self.config.repo,
            self.config.remote_path
        );
        Ok(())
    }

    async fn pull(&self, local: &Path) -> AppResult<()> {
        let remote = self.fetch_remote().await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "{} not present in {}",
                self.config.remote_path, self.config.repo
            ))
        })?;

        let bytes = decode_remote_content(&remote.content)?;
        csv_util::write_atomic(local, &bytes)?;

        log::info!(
            "Pulled {}/{} into {}",
            self.config.repo,
            self.config.remote_path,
            local.display()
        );
        Ok(())
    }
}

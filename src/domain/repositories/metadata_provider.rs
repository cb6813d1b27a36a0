use async_trait::async_trait;

use crate::domain::value_objects::MovieMetadata;
use crate::shared::errors::AppResult;

/// External metadata lookup. Implementations apply their own
/// best-match heuristic and produce zero or one candidate; the core
/// only relies on that contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn lookup(&self, title: &str, year: Option<i32>) -> AppResult<Option<MovieMetadata>>;
}

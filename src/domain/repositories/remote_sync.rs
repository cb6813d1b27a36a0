use std::path::Path;

use async_trait::async_trait;

use crate::shared::errors::AppResult;

/// Best-effort remote copy of the base file. The local file stays the
/// durable source of truth; a failing push or pull is reported and
/// never blocks the local write path. Concurrent writers race with
/// last-writer-wins semantics, a documented limitation of the flat
/// file store.
#[async_trait]
pub trait RemoteSync: Send + Sync {
    /// Push the current local file to the configured remote location.
    async fn push(&self, local: &Path, message: &str) -> AppResult<()>;

    /// Replace the local file with the latest remote copy.
    async fn pull(&self, local: &Path) -> AppResult<()>;
}

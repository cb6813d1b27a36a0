use std::path::Path;

use crate::domain::entities::{EnrichmentRecord, FilmRecord};
use crate::shared::errors::AppResult;

/// Persistence seam for the base watched-film table.
///
/// `load` fails only when the underlying file is unreadable or its
/// header row is wrong; it never yields a silently truncated table.
/// `save` must be atomic: either the whole new file lands or the old
/// one stays intact.
pub trait FilmStore: Send + Sync {
    fn path(&self) -> &Path;
    fn load(&self) -> AppResult<Vec<FilmRecord>>;
    fn save(&self, records: &[FilmRecord]) -> AppResult<()>;
}

/// Persistence seam for the enrichment side table. Same contract as
/// [`FilmStore`]; a missing file loads as an empty table since the
/// side store is optional.
pub trait EnrichmentStore: Send + Sync {
    fn path(&self) -> &Path;
    fn load(&self) -> AppResult<Vec<EnrichmentRecord>>;
    fn save(&self, records: &[EnrichmentRecord]) -> AppResult<()>;
}

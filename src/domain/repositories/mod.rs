mod metadata_provider;
mod remote_sync;
mod store;

pub use metadata_provider::MetadataProvider;
pub use remote_sync::RemoteSync;
pub use store::{EnrichmentStore, FilmStore};

#[cfg(test)]
pub use metadata_provider::MockMetadataProvider;

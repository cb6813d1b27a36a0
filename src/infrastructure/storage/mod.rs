mod csv_store;
pub(crate) mod csv_util;
mod enrichment_store;
mod table_cache;

pub use csv_store::CsvFilmStore;
pub use enrichment_store::CsvEnrichmentStore;
pub use table_cache::TableCache;

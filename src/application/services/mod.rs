mod enrichment_service;
mod library_service;

pub use enrichment_service::{EnrichmentFailure, EnrichmentReport, EnrichmentService};
pub use library_service::LibraryService;

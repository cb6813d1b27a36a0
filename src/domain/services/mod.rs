pub mod director_resolver;
pub mod field_normalizer;
pub mod library_stats;
pub mod reconciler;

pub use director_resolver::DirectorResolver;
pub use reconciler::Reconciler;

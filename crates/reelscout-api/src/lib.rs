//! Catalog API library for reelscout.
//!
//! Defines the catalog capability consumed by the list and search
//! controllers, and provides a TMDB-backed implementation of it.

/// Catalog capability trait.
mod api;
/// Ordered filter sets.
mod filters;
/// Page and item types shared by every catalog implementation.
mod types;

/// TMDB API client.
pub mod tmdb;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
pub use filters::FilterSet;
pub use types::{MediaType, PageResponse, ResultItem};

//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use crate::filters::FilterSet;
use crate::types::PageResponse;

/// Catalog API trait.
///
/// The two capabilities the list and search controllers need from the
/// outside world. Abstracts the REST client for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait, which
/// is the variant implementors provide so fetches can run on spawned tasks.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches one page of a paginated resource.
    ///
    /// Calling this more than once for the same page must be safe.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn fetch_page(
        &self,
        resource: &str,
        filters: &FilterSet,
        page: u32,
    ) -> Result<PageResponse>;

    /// Runs a free-text search across movies, TV shows, and people.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn fetch_search(&self, query: &str) -> Result<PageResponse>;
}

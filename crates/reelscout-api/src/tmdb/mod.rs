//! TMDB API client module.
//!
//! Implements the catalog capability against the TMDB API v3:
//! paginated list resources and the `search/multi` endpoint.

mod client;
mod rate_limiter;

#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};

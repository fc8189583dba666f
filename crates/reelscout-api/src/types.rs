//! Catalog page and item types.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of a paginated catalog resource.
///
/// Mirrors the TMDB page envelope. Only `results` drives pagination;
/// `total_pages` is informational.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageResponse {
    /// Page number echoed back by the server.
    #[serde(default)]
    pub page: u32,
    /// Items on this page.
    #[serde(default)]
    pub results: Vec<ResultItem>,
    /// Total number of pages reported by the server.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results reported by the server.
    #[serde(default)]
    pub total_results: u32,
}

impl PageResponse {
    /// Builds a page holding the given items.
    #[must_use]
    pub const fn from_items(results: Vec<ResultItem>) -> Self {
        Self {
            page: 0,
            results,
            total_pages: 0,
            total_results: 0,
        }
    }
}

/// Kind of a catalog entry as reported by mixed-type endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// A movie.
    Movie,
    /// A TV series.
    Tv,
    /// A person (cast or crew).
    Person,
    /// Anything else the server may add later.
    #[serde(other)]
    Unknown,
}

impl MediaType {
    /// Lowercase name as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Person => "person",
            Self::Unknown => "unknown",
        }
    }
}

/// A catalog entry.
///
/// Only `id` carries meaning for pagination and search. Every other field
/// the server sends is retained in `fields` for presentation code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultItem {
    /// Catalog ID.
    pub id: u64,
    /// Entry kind (present on `search/multi` and `trending/all`).
    #[serde(default)]
    pub media_type: Option<MediaType>,
    /// Remaining upstream fields, untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ResultItem {
    /// Creates an item with only an ID.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            media_type: None,
            fields: Map::new(),
        }
    }

    /// Sets the media type.
    #[must_use]
    pub const fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    /// Sets an upstream field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns a string field, if present.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Returns a human-readable name: movie `title`, else TV/person `name`.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.str_field("title").or_else(|| self.str_field("name"))
    }
}

/// TMDB error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB status code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

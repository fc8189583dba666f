//! Screen presets.
//!
//! The browsing client has four list screens backed by the same
//! [`PagedListController`](crate::PagedListController). Each screen fixes the
//! resource it lists and the filter vocabulary it accepts.

use std::fmt;

use anyhow::{Result, bail};
use reelscout_api::FilterSet;

/// Filter name for the list category.
pub const CATEGORY: &str = "category";

/// Filter name for the trending time window.
pub const DURATION: &str = "duration";

/// A list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Movie lists (`movie/{category}`).
    Movie,
    /// TV series lists (`tv/{category}`).
    Tv,
    /// Trending titles (`trending/{category}/{duration}`).
    Trending,
    /// Popular people (`person/{category}`).
    People,
}

impl Screen {
    /// All screens, in navigation order.
    pub const ALL: [Self; 4] = [Self::Trending, Self::Movie, Self::Tv, Self::People];

    /// Catalog resource the screen lists.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Trending => "trending",
            Self::People => "person",
        }
    }

    /// Accepted category values; the first is the default.
    #[must_use]
    pub const fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Movie => &["popular", "now_playing", "top_rated", "upcoming"],
            Self::Tv => &["popular", "airing_today", "on_the_air", "top_rated"],
            Self::Trending => &["all", "movie", "tv"],
            Self::People => &["popular"],
        }
    }

    /// Accepted time windows; empty for screens without one.
    #[must_use]
    pub const fn durations(self) -> &'static [&'static str] {
        match self {
            Self::Trending => &["day", "week"],
            Self::Movie | Self::Tv | Self::People => &[],
        }
    }

    /// Filters the screen starts with.
    #[must_use]
    pub fn default_filters(self) -> FilterSet {
        let mut filters = FilterSet::new();
        if let Some(category) = self.categories().first() {
            filters.insert(CATEGORY, *category);
        }
        if let Some(duration) = self.durations().first() {
            filters.insert(DURATION, *duration);
        }
        filters
    }

    /// Builds a validated filter set, falling back to defaults for `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if `category` or `duration` is not accepted by this
    /// screen, or a duration is given for a screen without time windows.
    pub fn filters(self, category: Option<&str>, duration: Option<&str>) -> Result<FilterSet> {
        let mut filters = self.default_filters();
        if let Some(category) = category {
            if !self.categories().contains(&category) {
                bail!(
                    "unknown {self} category `{category}` (expected one of: {})",
                    self.categories().join(", ")
                );
            }
            filters.insert(CATEGORY, category);
        }
        if let Some(duration) = duration {
            if self.durations().is_empty() {
                bail!("{self} lists have no time window");
            }
            if !self.durations().contains(&duration) {
                bail!(
                    "unknown time window `{duration}` (expected one of: {})",
                    self.durations().join(", ")
                );
            }
            filters.insert(DURATION, duration);
        }
        Ok(filters)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Trending => "trending",
            Self::People => "people",
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_filters() {
        // Arrange & Act & Assert
        assert_eq!(
            Screen::Movie.default_filters(),
            FilterSet::new().with(CATEGORY, "popular")
        );
        assert_eq!(
            Screen::Trending.default_filters(),
            FilterSet::new().with(CATEGORY, "all").with(DURATION, "day")
        );
        assert_eq!(Screen::People.resource(), "person");
    }

    #[test]
    fn test_filters_override_defaults_in_place() {
        // Arrange & Act
        let filters = Screen::Trending.filters(None, Some("week")).unwrap();

        // Assert
        let pairs: Vec<_> = filters.iter().collect();
        assert_eq!(pairs, vec![(CATEGORY, "all"), (DURATION, "week")]);
    }

    #[test]
    fn test_filters_rejects_unknown_category() {
        // Arrange & Act
        let result = Screen::Tv.filters(Some("upcoming"), None);

        // Assert
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown tv category `upcoming`"));
        assert!(err.contains("on_the_air"));
    }

    #[test]
    fn test_filters_rejects_duration_without_time_window() {
        // Arrange & Act
        let result = Screen::Movie.filters(None, Some("day"));

        // Assert
        assert!(result.unwrap_err().to_string().contains("no time window"));
    }

    #[test]
    fn test_every_default_is_valid() {
        for screen in Screen::ALL {
            // Arrange
            let category = screen.default_filters().get(CATEGORY).map(String::from);

            // Act
            let filters = screen.filters(category.as_deref(), None).unwrap();

            // Assert
            assert_eq!(filters, screen.default_filters());
        }
    }
}

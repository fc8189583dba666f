//! Load status of a controller.

use std::fmt;

/// Observable status of a list or search controller.
///
/// `Idle` doubles as "ready for the next page".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A fetch is in flight for the current epoch.
    Loading,
    /// The last fetch for the current epoch failed.
    Error(String),
    /// The upstream returned an empty page; nothing more to load.
    Exhausted,
}

impl Status {
    /// Returns `true` while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the error message, if the last fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loading => f.write_str("loading"),
            Self::Error(message) => write!(f, "error: {message}"),
            Self::Exhausted => f.write_str("exhausted"),
        }
    }
}

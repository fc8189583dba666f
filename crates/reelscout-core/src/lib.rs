//! Client-side aggregation engines for reelscout.
//!
//! Two controllers own all stateful behaviour of the browsing client:
//!
//! - [`PagedListController`] accumulates a paginated, filterable list
//!   (Movie, TV, Trending, and People screens).
//! - [`SearchController`] turns keystrokes into debounced searches with a
//!   keyboard-navigable result list.
//!
//! Both discard responses that arrive after their state has moved on,
//! using the [`Epoch`] counter rather than request cancellation.

/// Debounce timer.
mod debounce;
/// Epoch fencing primitives.
mod epoch;
/// Paginated list aggregation.
pub mod paged;
/// Screen presets (resource and filter vocabulary).
pub mod screen;
/// Debounced search.
pub mod search;
/// Load status shared by both controllers.
mod status;

#[cfg(test)]
mod testing;

pub use debounce::Debouncer;
pub use epoch::{Epoch, Fenced};
pub use paged::{ListState, PagedListController};
pub use screen::Screen;
pub use search::{Direction, SearchController, SearchState};
pub use status::Status;

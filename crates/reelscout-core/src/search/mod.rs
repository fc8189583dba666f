//! Debounced type-ahead search.

mod controller;
mod state;

#[allow(clippy::module_name_repetitions)]
pub use controller::{DEFAULT_DEBOUNCE, SearchController};
#[allow(clippy::module_name_repetitions)]
pub use state::{Direction, RESULT_CAP, SearchState};

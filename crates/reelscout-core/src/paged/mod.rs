//! Paginated list aggregation.
//!
//! [`ListState`] is the pure state machine; [`PagedListController`] runs it
//! against a catalog on spawned tasks.

mod controller;
mod state;

#[allow(clippy::module_name_repetitions)]
pub use controller::PagedListController;
pub use state::{Applied, ListState, PageRequest};

//! Search box state machine.

use reelscout_api::ResultItem;

use crate::epoch::{Epoch, Fenced};
use crate::status::Status;

/// Maximum number of results kept per search.
pub const RESULT_CAP: usize = 10;

/// Cursor movement through the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the first result.
    Up,
    /// Towards the last result.
    Down,
}

/// State of the type-ahead search box.
#[derive(Debug, Clone, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchState {
    /// Text as typed.
    query: String,
    /// Results of the last accepted search.
    results: Vec<ResultItem>,
    /// Highlighted result (`None` = nothing highlighted).
    selected: Option<usize>,
    /// Current status.
    status: Status,
    /// Current epoch.
    epoch: Epoch,
}

impl SearchState {
    /// Creates an empty search state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current results (at most [`RESULT_CAP`]).
    #[must_use]
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// Highlighted result index.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Highlighted result.
    #[must_use]
    pub fn selected(&self) -> Option<&ResultItem> {
        self.results.get(self.selected?)
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Current epoch.
    #[must_use]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Returns `true` if the query holds nothing worth searching for.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Stores typed text.
    ///
    /// Blank text clears the results and fences off any in-flight search.
    /// Returns `true` if a search should be scheduled for the new text.
    pub fn set_query(&mut self, text: impl Into<String>) -> bool {
        self.query = text.into();
        if self.is_blank() {
            self.clear_results();
            return false;
        }
        true
    }

    /// Marks a search for the current query as loading and returns it.
    ///
    /// Returns `None` for a blank query.
    pub fn begin_search(&mut self) -> Option<Fenced<String>> {
        if self.is_blank() {
            return None;
        }
        let epoch = self.epoch.advance();
        self.status = Status::Loading;
        Some(epoch.fence(self.query.clone()))
    }

    /// Applies the outcome of a search issued by [`begin_search`](Self::begin_search).
    ///
    /// Returns `false` if the search was superseded and the outcome dropped.
    pub fn apply(
        &mut self,
        request: &Fenced<String>,
        outcome: Result<Vec<ResultItem>, String>,
    ) -> bool {
        if !request.is_current(self.epoch) {
            return false;
        }
        self.selected = None;
        match outcome {
            Ok(mut results) => {
                results.truncate(RESULT_CAP);
                self.results = results;
                self.status = Status::Idle;
            }
            Err(message) => {
                self.results.clear();
                self.status = Status::Error(message);
            }
        }
        true
    }

    /// Moves the highlight one step without wrapping.
    ///
    /// Down from no highlight selects the first result; Up from no highlight
    /// leaves it unset. Returns `true` if the highlight changed.
    pub fn move_selection(&mut self, direction: Direction) -> bool {
        let Some(last) = self.results.len().checked_sub(1) else {
            return false;
        };
        let next = match (direction, self.selected) {
            (Direction::Up, None) => None,
            (Direction::Up, Some(index)) => Some(index.saturating_sub(1)),
            (Direction::Down, None) => Some(0),
            (Direction::Down, Some(index)) => Some(index.saturating_add(1).min(last)),
        };
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    /// Takes the highlighted result and clears the search box.
    ///
    /// Returns `None` and leaves the state untouched when nothing valid is
    /// highlighted.
    pub fn commit_selection(&mut self) -> Option<ResultItem> {
        let index = self.selected?;
        if index >= self.results.len() {
            return None;
        }
        let item = self.results.swap_remove(index);
        self.query.clear();
        self.clear_results();
        Some(item)
    }

    /// Clears the query and results.
    pub fn dismiss(&mut self) {
        self.query.clear();
        self.clear_results();
    }

    /// Drops results and fences off any in-flight search.
    fn clear_results(&mut self) {
        self.epoch.advance();
        self.results.clear();
        self.selected = None;
        self.status = Status::Idle;
    }
}

//! `SearchController` - debounced type-ahead search.

use std::sync::Arc;
use std::time::Duration;

use reelscout_api::{CatalogApi, ResultItem};
use tokio::sync::watch;
use tracing::instrument;

use super::state::{Direction, SearchState};
use crate::debounce::Debouncer;

/// Quiet interval before typed text is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Turns keystrokes into debounced catalog searches.
///
/// Only the last keystroke of a burst reaches the catalog. Failed searches
/// are never retried automatically; the next keystroke or an explicit
/// [`retry`](Self::retry) is the only way to search again.
///
/// Operations must be called from within a tokio runtime. Dropping the
/// controller cancels a pending debounce; a search already sent is left to
/// finish and its response is ignored.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchController<A> {
    /// Catalog to search.
    api: Arc<A>,
    /// Shared state, written by this controller and its search tasks.
    state: Arc<watch::Sender<SearchState>>,
    /// Pending evaluation of the latest keystroke.
    debouncer: Debouncer,
}

impl<A> SearchController<A>
where
    A: CatalogApi + Sync + 'static,
{
    /// Creates a controller with the default 500ms debounce.
    pub fn new(api: Arc<A>) -> Self {
        Self::with_debounce(api, DEFAULT_DEBOUNCE)
    }

    /// Creates a controller with a custom debounce interval.
    pub fn with_debounce(api: Arc<A>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::new());
        Self {
            api,
            state: Arc::new(state),
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Returns `true` while a keystroke is waiting out the debounce interval.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Stores typed text and (re)starts the debounce timer.
    ///
    /// Blank text clears the results immediately and searches nothing.
    pub fn set_query(&mut self, text: impl Into<String>) {
        // Cancel before storing the text so the previous timer cannot fire
        // on the new query and search it twice.
        self.debouncer.cancel();
        let mut schedule = false;
        self.state.send_modify(|state| schedule = state.set_query(text));
        if !schedule {
            return;
        }
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        self.debouncer.schedule(move || {
            evaluate(&api, &state);
        });
    }

    /// Searches the current query right away, skipping the debounce.
    ///
    /// Returns `false` if the query is blank.
    pub fn retry(&mut self) -> bool {
        self.debouncer.cancel();
        evaluate(&self.api, &self.state)
    }

    /// Moves the highlight through the results.
    pub fn move_selection(&self, direction: Direction) {
        self.state
            .send_if_modified(|state| state.move_selection(direction));
    }

    /// Takes the highlighted result and clears the search box.
    ///
    /// Returns `None` and changes nothing when no result is highlighted.
    pub fn commit_selection(&mut self) -> Option<ResultItem> {
        let mut committed = None;
        self.state.send_if_modified(|state| {
            committed = state.commit_selection();
            committed.is_some()
        });
        if committed.is_some() {
            self.debouncer.cancel();
        }
        committed
    }

    /// Clears the search box and cancels a pending search.
    pub fn dismiss(&mut self) {
        self.debouncer.cancel();
        self.state.send_modify(SearchState::dismiss);
    }
}

/// Starts a search for the current query on a spawned task.
///
/// Returns `false` if the query is blank.
#[instrument(skip_all)]
fn evaluate<A>(api: &Arc<A>, state: &Arc<watch::Sender<SearchState>>) -> bool
where
    A: CatalogApi + Sync + 'static,
{
    let mut issued = None;
    state.send_if_modified(|s| {
        issued = s.begin_search();
        issued.is_some()
    });
    let Some(request) = issued else {
        return false;
    };

    tracing::debug!(query = %request.get(), epoch = %request.epoch(), "searching");
    let api = Arc::clone(api);
    let state = Arc::clone(state);
    tokio::spawn(async move {
        let outcome = api
            .fetch_search(request.get())
            .await
            .map(|response| response.results)
            .map_err(|err| format!("{err:#}"));
        if let Err(message) = &outcome {
            tracing::warn!(query = %request.get(), %message, "search failed");
        }
        if !state.send_if_modified(|s| s.apply(&request, outcome)) {
            tracing::debug!(
                query = %request.get(),
                epoch = %request.epoch(),
                "discarded stale search response"
            );
        }
    });
    true
}

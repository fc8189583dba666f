//! `PagedListController` - drives a [`ListState`] against a catalog.

use std::sync::Arc;

use reelscout_api::{CatalogApi, FilterSet};
use tokio::sync::watch;
use tracing::instrument;

use super::state::{Applied, ListState};

/// Accumulates one paginated, filterable catalog list.
///
/// Fetches run on spawned tokio tasks. State lives behind a
/// [`watch`] channel: observers [`subscribe`](Self::subscribe) to it, and
/// fetch tasks write their outcome back through it once resolved. Responses
/// from a superseded epoch are dropped on arrival.
///
/// Operations must be called from within a tokio runtime.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct PagedListController<A> {
    /// Catalog to fetch pages from.
    api: Arc<A>,
    /// Resource name passed to every `fetch_page` call.
    resource: String,
    /// Shared state, written by this controller and its fetch tasks.
    state: Arc<watch::Sender<ListState>>,
}

impl<A> PagedListController<A>
where
    A: CatalogApi + Sync + 'static,
{
    /// Creates a controller for `resource`. Nothing is fetched until the
    /// first [`reset`](Self::reset).
    pub fn new(api: Arc<A>, resource: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ListState::new());
        Self {
            api,
            resource: resource.into(),
            state: Arc::new(state),
        }
    }

    /// Resource this controller lists.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// Switches the list to `filters` and loads the first page.
    ///
    /// A no-op when `filters` equals the current filters, so re-applying
    /// unchanged filters never refetches.
    #[instrument(skip_all, fields(resource = %self.resource, filters = %filters))]
    pub fn reset(&self, filters: FilterSet) {
        if !self.state.send_if_modified(|state| state.reset(filters)) {
            tracing::debug!("filters unchanged, reset skipped");
            return;
        }
        tracing::debug!(epoch = %self.state.borrow().epoch(), "list reset");
        self.load_next_page();
    }

    /// Requests the next page.
    ///
    /// Returns `false` without fetching while a page is in flight, once the
    /// list is exhausted, or before the first reset.
    pub fn load_next_page(&self) -> bool {
        let mut issued = None;
        self.state.send_if_modified(|state| {
            issued = state.begin_load();
            issued.is_some()
        });
        let Some(request) = issued else {
            return false;
        };

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let resource = self.resource.clone();
        tracing::debug!(
            resource = %resource,
            page = request.get().page,
            epoch = %request.epoch(),
            "loading page"
        );
        tokio::spawn(async move {
            let page = request.get();
            let outcome = api
                .fetch_page(&resource, &page.filters, page.page)
                .await
                .map(|response| response.results)
                .map_err(|err| format!("{err:#}"));
            if let Err(message) = &outcome {
                tracing::warn!(
                    resource = %resource,
                    page = page.page,
                    %message,
                    "page load failed"
                );
            }
            let applied =
                state.send_if_modified(|s| s.apply(&request, outcome) == Applied::Accepted);
            if !applied {
                tracing::debug!(
                    resource = %resource,
                    page = request.get().page,
                    epoch = %request.epoch(),
                    "discarded stale page response"
                );
            }
        });
        true
    }

    /// Retries after a failed load. Same as [`load_next_page`](Self::load_next_page).
    pub fn retry(&self) -> bool {
        self.load_next_page()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::time::Duration;

    use super::*;
    use crate::status::Status;
    use crate::testing::{MockCatalog, items};

    fn popular() -> FilterSet {
        FilterSet::new().with("category", "popular")
    }

    fn ids(state: &ListState) -> Vec<u64> {
        state.items().iter().map(|item| item.id).collect()
    }

    async fn settle(controller: &PagedListController<MockCatalog>) -> ListState {
        let mut rx = controller.subscribe();
        rx.wait_for(|s| !s.status().is_loading())
            .await
            .unwrap()
            .clone()
    }

    #[tokio::test]
    async fn test_reset_loads_first_page() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        api.push_page(Ok(items(&[1, 2])));
        let controller = PagedListController::new(Arc::clone(&api), "movie");

        // Act
        controller.reset(popular());
        let state = settle(&controller).await;

        // Assert
        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.next_page(), 2);
        let calls = api.page_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].resource, "movie");
        assert_eq!(calls[0].filters, popular());
        assert_eq!(calls[0].page, 1);
    }

    #[tokio::test]
    async fn test_reset_with_same_filters_fetches_once() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        api.push_page(Ok(items(&[1])));
        let controller = PagedListController::new(Arc::clone(&api), "movie");

        // Act
        controller.reset(popular());
        controller.reset(popular());
        settle(&controller).await;
        controller.reset(popular());

        // Assert
        assert_eq!(api.page_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_pages_accumulate() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        api.push_page(Ok(items(&[1, 2])));
        api.push_page(Ok(items(&[3, 4])));
        let controller = PagedListController::new(Arc::clone(&api), "tv");

        // Act
        controller.reset(popular());
        settle(&controller).await;
        assert!(controller.load_next_page());
        let state = settle(&controller).await;

        // Assert
        assert_eq!(ids(&state), vec![1, 2, 3, 4]);
        assert_eq!(state.next_page(), 3);
        let pages: Vec<_> = api.page_calls().iter().map(|c| c.page).collect();
        assert_eq!(pages, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_overlap_is_deduplicated() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        api.push_page(Ok(items(&[1, 2])));
        api.push_page(Ok(items(&[2, 3])));
        let controller = PagedListController::new(Arc::clone(&api), "movie");

        // Act
        controller.reset(popular());
        settle(&controller).await;
        controller.load_next_page();
        let state = settle(&controller).await;

        // Assert
        assert_eq!(ids(&state), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_load_while_loading_is_ignored() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        let pending = api.defer_page();
        let controller = PagedListController::new(Arc::clone(&api), "movie");
        controller.reset(popular());

        // Act
        let issued = controller.load_next_page();
        pending.send(Ok(items(&[1]))).unwrap();
        settle(&controller).await;

        // Assert
        assert!(!issued);
        assert_eq!(api.page_calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        let old_page = api.defer_page();
        api.push_page(Ok(items(&[20, 21])));
        let controller = PagedListController::new(Arc::clone(&api), "movie");

        // Act
        controller.reset(popular());
        tokio::time::sleep(Duration::from_millis(1)).await;
        controller.reset(FilterSet::new().with("category", "upcoming"));
        settle(&controller).await;
        old_page.send(Ok(items(&[99]))).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Assert
        let state = controller.snapshot();
        assert_eq!(ids(&state), vec![20, 21]);
        assert_eq!(state.next_page(), 2);
        assert_eq!(state.status(), &Status::Idle);
        assert_eq!(api.page_calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_arriving_first_is_discarded() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        let old_page = api.defer_page();
        let new_page = api.defer_page();
        let controller = PagedListController::new(Arc::clone(&api), "movie");
        controller.reset(popular());
        tokio::time::sleep(Duration::from_millis(1)).await;
        controller.reset(FilterSet::new().with("category", "upcoming"));
        tokio::time::sleep(Duration::from_millis(1)).await;

        // Act
        old_page.send(Ok(items(&[99]))).unwrap();
        tokio::time::sleep(Duration::from_millis(1)).await;
        let while_pending = controller.snapshot();
        new_page.send(Ok(items(&[5]))).unwrap();
        let state = settle(&controller).await;

        // Assert
        assert!(while_pending.items().is_empty());
        assert!(while_pending.status().is_loading());
        assert_eq!(ids(&state), vec![5]);
    }

    #[tokio::test]
    async fn test_empty_page_exhausts() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        api.push_page(Ok(items(&[1])));
        api.push_page(Ok(Vec::new()));
        let controller = PagedListController::new(Arc::clone(&api), "person");

        // Act
        controller.reset(popular());
        settle(&controller).await;
        controller.load_next_page();
        let state = settle(&controller).await;
        let issued = controller.load_next_page();

        // Assert
        assert_eq!(state.status(), &Status::Exhausted);
        assert!(!issued);
        assert_eq!(api.page_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_page_is_requested_again() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        api.push_page(Ok(items(&[1])));
        api.push_page(Err(String::from("HTTP 500")));
        api.push_page(Ok(items(&[2])));
        let controller = PagedListController::new(Arc::clone(&api), "movie");
        controller.reset(popular());
        settle(&controller).await;

        // Act
        controller.load_next_page();
        let failed = settle(&controller).await;
        assert!(controller.retry());
        let recovered = settle(&controller).await;

        // Assert
        assert_eq!(failed.status().error(), Some("HTTP 500"));
        assert_eq!(failed.next_page(), 2);
        assert_eq!(ids(&failed), vec![1]);
        assert_eq!(ids(&recovered), vec![1, 2]);
        let pages: Vec<_> = api.page_calls().iter().map(|c| c.page).collect();
        assert_eq!(pages, vec![1, 2, 2]);
    }

    #[tokio::test]
    async fn test_reset_after_error_starts_over() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        api.push_page(Err(String::from("offline")));
        api.push_page(Ok(items(&[7])));
        let controller = PagedListController::new(Arc::clone(&api), "trending");
        controller.reset(
            FilterSet::new()
                .with("category", "all")
                .with("duration", "day"),
        );
        settle(&controller).await;

        // Act
        controller.reset(
            FilterSet::new()
                .with("category", "all")
                .with("duration", "week"),
        );
        let state = settle(&controller).await;

        // Assert
        assert_eq!(ids(&state), vec![7]);
        assert_eq!(state.status(), &Status::Idle);
        assert_eq!(api.page_calls()[1].page, 1);
    }

    #[tokio::test]
    async fn test_load_before_reset_is_noop() {
        // Arrange
        let api = Arc::new(MockCatalog::new());
        let controller = PagedListController::new(Arc::clone(&api), "movie");

        // Act
        let issued = controller.load_next_page();

        // Assert
        assert!(!issued);
        assert!(api.page_calls().is_empty());
        assert_eq!(controller.resource(), "movie");
    }
}

//! Paginated list state machine.

use std::collections::HashSet;

use reelscout_api::{FilterSet, ResultItem};

use crate::epoch::{Epoch, Fenced};
use crate::status::Status;

/// A page request issued under a specific epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Filters the page is requested for.
    pub filters: FilterSet,
    /// 1-based page number.
    pub page: u32,
}

/// Result of feeding a response back into [`ListState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response belonged to the current epoch and updated the state.
    Accepted,
    /// The response belonged to a superseded epoch and was dropped.
    Stale,
}

/// Accumulated state of one paginated list.
///
/// Pure state: it never performs I/O. [`begin_load`](Self::begin_load) hands
/// out a fenced [`PageRequest`], and the caller feeds the outcome back through
/// [`apply`](Self::apply).
#[derive(Debug, Clone)]
pub struct ListState {
    /// Filters of the current epoch (`None` until the first reset).
    filters: Option<FilterSet>,
    /// Accumulated items, append-only within an epoch.
    items: Vec<ResultItem>,
    /// IDs already present in `items`.
    seen: HashSet<u64>,
    /// Next page to request.
    next_page: u32,
    /// Whether the upstream may still have more pages.
    has_more: bool,
    /// Current status.
    status: Status,
    /// Current epoch.
    epoch: Epoch,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    /// Creates an empty state that has not been reset yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filters: None,
            items: Vec::new(),
            seen: HashSet::new(),
            next_page: 1,
            has_more: true,
            status: Status::Idle,
            epoch: Epoch::default(),
        }
    }

    /// Accumulated items.
    #[must_use]
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Next page number to request.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Whether more pages may exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
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

    /// Filters of the current epoch.
    #[must_use]
    pub const fn filters(&self) -> Option<&FilterSet> {
        self.filters.as_ref()
    }

    /// Starts a new epoch for `filters`.
    ///
    /// Returns `false` without touching anything when `filters` equals the
    /// current filters.
    pub fn reset(&mut self, filters: FilterSet) -> bool {
        if self.filters.as_ref() == Some(&filters) {
            return false;
        }
        self.epoch.advance();
        self.filters = Some(filters);
        self.items.clear();
        self.seen.clear();
        self.next_page = 1;
        self.has_more = true;
        self.status = Status::Idle;
        true
    }

    /// Marks the next page as loading and returns the request to issue.
    ///
    /// Returns `None` while a load is in flight, after exhaustion, or before
    /// the first reset.
    pub fn begin_load(&mut self) -> Option<Fenced<PageRequest>> {
        if self.status.is_loading() || !self.has_more {
            return None;
        }
        let filters = self.filters.clone()?;
        self.status = Status::Loading;
        Some(self.epoch.fence(PageRequest {
            filters,
            page: self.next_page,
        }))
    }

    /// Applies the outcome of a request issued by [`begin_load`](Self::begin_load).
    ///
    /// On success, new items are appended (IDs already present are skipped),
    /// the page counter advances, and an empty page marks the list exhausted.
    /// On failure, the status carries the message and the page counter stays
    /// put so the same page is requested again.
    pub fn apply(
        &mut self,
        request: &Fenced<PageRequest>,
        outcome: Result<Vec<ResultItem>, String>,
    ) -> Applied {
        if !request.is_current(self.epoch) {
            return Applied::Stale;
        }
        match outcome {
            Ok(items) => {
                self.has_more = !items.is_empty();
                for item in items {
                    if self.seen.insert(item.id) {
                        self.items.push(item);
                    }
                }
                self.next_page = request.get().page.saturating_add(1);
                self.status = if self.has_more {
                    Status::Idle
                } else {
                    Status::Exhausted
                };
            }
            Err(message) => {
                self.status = Status::Error(message);
            }
        }
        Applied::Accepted
    }
}

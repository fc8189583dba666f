//! Scripted catalog for controller tests.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use reelscout_api::{CatalogApi, FilterSet, PageResponse, ResultItem};
use tokio::sync::oneshot;

/// Items or an error message.
pub type Reply = std::result::Result<Vec<ResultItem>, String>;

/// A scripted response.
#[derive(Debug)]
enum Scripted {
    /// Resolves immediately.
    Ready(Reply),
    /// Resolves when the paired sender fires.
    Deferred(oneshot::Receiver<Reply>),
}

/// A recorded `fetch_page` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCall {
    pub resource: String,
    pub filters: FilterSet,
    pub page: u32,
}

/// Catalog that replays scripted responses in call order.
///
/// Unscripted calls resolve with an empty page.
#[derive(Debug, Default)]
pub struct MockCatalog {
    page_script: Mutex<VecDeque<Scripted>>,
    search_script: Mutex<VecDeque<Scripted>>,
    page_calls: Mutex<Vec<PageCall>>,
    search_calls: Mutex<Vec<String>>,
}

pub fn items(ids: &[u64]) -> Vec<ResultItem> {
    ids.iter().copied().map(ResultItem::new).collect()
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, reply: Reply) {
        self.page_script
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(reply));
    }

    pub fn defer_page(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.page_script
            .lock()
            .unwrap()
            .push_back(Scripted::Deferred(rx));
        tx
    }

    pub fn push_search(&self, reply: Reply) {
        self.search_script
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(reply));
    }

    pub fn defer_search(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.search_script
            .lock()
            .unwrap()
            .push_back(Scripted::Deferred(rx));
        tx
    }

    pub fn page_calls(&self) -> Vec<PageCall> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    async fn resolve(next: Option<Scripted>) -> Result<PageResponse> {
        let reply = match next {
            None => Ok(Vec::new()),
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(String::from("request dropped"))),
        };
        reply.map(PageResponse::from_items).map_err(|e| anyhow!(e))
    }
}

impl CatalogApi for MockCatalog {
    async fn fetch_page(
        &self,
        resource: &str,
        filters: &FilterSet,
        page: u32,
    ) -> Result<PageResponse> {
        self.page_calls.lock().unwrap().push(PageCall {
            resource: String::from(resource),
            filters: filters.clone(),
            page,
        });
        let next = self.page_script.lock().unwrap().pop_front();
        Self::resolve(next).await
    }

    async fn fetch_search(&self, query: &str) -> Result<PageResponse> {
        self.search_calls.lock().unwrap().push(String::from(query));
        let next = self.search_script.lock().unwrap().pop_front();
        Self::resolve(next).await
    }
}

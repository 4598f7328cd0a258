//! Book service boundary: wire model, reduction to summaries, and the
//! search trait the rest of the crate talks to.

mod client;
mod error;
pub mod types;

use async_trait::async_trait;
use tracing::warn;

pub use client::*;
pub use error::*;
pub use types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Relevance,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::Relevance => "relevance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub order_by: Option<OrderBy>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, max_results: usize) -> Self {
        Self {
            query: query.into(),
            max_results,
            order_by: None,
        }
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }
}

#[async_trait]
pub trait BookSearch: Send + Sync {
    /// Free-text search. Blank queries return no volumes without any I/O.
    async fn search(&self, req: &SearchRequest) -> Result<Vec<Volume>, BooksError>;

    /// Lookup by id; `Ok(None)` when the service has no such volume.
    async fn volume(&self, id: &str) -> Result<Option<Volume>, BooksError>;
}

/// Runs a search and reduces the hits to summaries. Failures are logged
/// and surface as an empty list.
pub async fn search_summaries(service: &dyn BookSearch, req: &SearchRequest) -> Vec<BookSummary> {
    match service.search(req).await {
        Ok(volumes) => volumes.iter().map(Volume::summarize).collect(),
        Err(e) => {
            warn!(query = %req.query, kind = ?e.kind(), err = %e, "book search failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory service: canned results per query, an optional per-query
    /// delay, and a log of every request made.
    #[derive(Default)]
    pub struct FakeBooks {
        results: Mutex<HashMap<String, Vec<Volume>>>,
        delays: Mutex<HashMap<String, Duration>>,
        failing: Mutex<bool>,
        pub requests: Mutex<Vec<SearchRequest>>,
    }

    pub fn volume(id: &str, title: &str) -> Volume {
        Volume {
            id: Some(id.to_string()),
            volume_info: VolumeInfo {
                title: Some(title.to_string()),
                authors: Some(vec![format!("{title} Author")]),
                ..VolumeInfo::default()
            },
        }
    }

    impl FakeBooks {
        pub fn with(self, query: &str, volumes: Vec<Volume>) -> Self {
            self.results
                .lock()
                .unwrap()
                .insert(query.to_string(), volumes);
            self
        }

        pub fn delayed(self, query: &str, delay: Duration) -> Self {
            self.delays.lock().unwrap().insert(query.to_string(), delay);
            self
        }

        pub fn failing(self) -> Self {
            *self.failing.lock().unwrap() = true;
            self
        }

        pub fn queries(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.query.clone())
                .collect()
        }
    }

    #[async_trait]
    impl BookSearch for FakeBooks {
        async fn search(&self, req: &SearchRequest) -> Result<Vec<Volume>, BooksError> {
            self.requests.lock().unwrap().push(req.clone());
            let delay = self.delays.lock().unwrap().get(&req.query).copied();
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            if *self.failing.lock().unwrap() {
                return Err(BooksError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".into(),
                });
            }
            let mut hits = self
                .results
                .lock()
                .unwrap()
                .get(&req.query)
                .cloned()
                .unwrap_or_default();
            hits.truncate(req.max_results);
            Ok(hits)
        }

        async fn volume(&self, id: &str) -> Result<Option<Volume>, BooksError> {
            if *self.failing.lock().unwrap() {
                return Err(BooksError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".into(),
                });
            }
            Ok(self
                .results
                .lock()
                .unwrap()
                .values()
                .flatten()
                .find(|v| v.id.as_deref() == Some(id))
                .cloned())
        }
    }

    #[tokio::test]
    async fn search_summaries_swallows_failures() {
        let books = FakeBooks::default().failing();
        let out = search_summaries(&books, &SearchRequest::new("dune", 5)).await;
        assert!(out.is_empty());
        assert_eq!(books.queries(), vec!["dune".to_string()]);
    }
}

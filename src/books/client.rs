use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::BooksError;
use super::types::{Volume, VolumeList};
use super::{BookSearch, SearchRequest};
use crate::config::HttpConfig;

/// Client for the Google Books `volumes` resource.
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    pub base_url: String,
    pub(crate) inner: reqwest::Client,
}

impl GoogleBooksClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BooksError> {
        let inner = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            inner,
        })
    }

    pub fn with_http_config(mut self, cfg: &HttpConfig) -> Self {
        let builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
            .timeout(Duration::from_millis(cfg.request_timeout_ms));
        // keep the default client if the builder rejects the settings
        match builder.build() {
            Ok(c) => self.inner = c,
            Err(e) => warn!(err = %e, "could not apply http config, using defaults"),
        }
        self
    }

    fn volume_url(&self, id: &str) -> Result<Url, BooksError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| BooksError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| BooksError::Url(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl BookSearch for GoogleBooksClient {
    async fn search(&self, req: &SearchRequest) -> Result<Vec<Volume>, BooksError> {
        let q = req.query.trim();
        if q.is_empty() {
            return Ok(Vec::new());
        }

        let mut params = vec![
            ("q", q.to_string()),
            ("maxResults", req.max_results.to_string()),
        ];
        if let Some(order) = req.order_by {
            params.push(("orderBy", order.as_str().to_string()));
        }
        debug!(query = %q, max_results = req.max_results, "searching volumes");

        let resp = self.inner.get(&self.base_url).query(&params).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(BooksError::Status { status, body });
        }
        let list: VolumeList = serde_json::from_str(&body)?;
        debug!(query = %q, returned = list.items.len(), total = list.total_items, "volumes received");
        Ok(list.items)
    }

    async fn volume(&self, id: &str) -> Result<Option<Volume>, BooksError> {
        let url = self.volume_url(id)?;
        debug!(%url, "fetching volume");
        let resp = self.inner.get(url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(BooksError::Status { status, body });
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}

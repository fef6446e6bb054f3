//! Remote product search.

use std::time::Duration;

use remount_platform::TaskPanic;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SearchResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid search url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("search worker failed: {0}")]
    Worker(#[from] TaskPanic),
}

/// Blocking product lookup. Runs on a worker thread.
pub trait ProductSource: Send + Sync {
    fn search(&self, query: &str) -> Result<SearchResponse, FetchError>;
}

pub struct HttpProductSource {
    client: reqwest::blocking::Client,
    url: reqwest::Url,
}

impl HttpProductSource {
    pub fn new(search_url: &str) -> Result<Self, FetchError> {
        let url =
            reqwest::Url::parse(search_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { client, url })
    }
}

impl ProductSource for HttpProductSource {
    fn search(&self, query: &str) -> Result<SearchResponse, FetchError> {
        log::debug!("search: GET {} q={query:?}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .query(&[("q", query)])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response.json::<SearchResponse>().map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Transport(e)
            }
        })
    }
}

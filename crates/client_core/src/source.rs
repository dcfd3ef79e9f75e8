//! Upstream listing fetch: URL construction and the reqwest-backed client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{CursorToken, Page, Post, Query},
    error::FetchError,
    protocol::ListingEnvelope,
};
use url::Url;

/// Items the upstream returns per page; sent as `count` on follow-up pages.
pub const PAGE_SIZE: u32 = 25;

pub const DEFAULT_BASE_URL: &str = "https://old.reddit.com";

/// One page the controller wants fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: Query,
    pub page: Page,
    pub cursor: Option<CursorToken>,
}

impl PageRequest {
    pub fn first(query: Query) -> Self {
        Self {
            query,
            page: Page::FIRST,
            cursor: None,
        }
    }
}

#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Post>, FetchError>;
}

/// Builds `{base}/r/{query}.json`, adding `count` and `after` for every page
/// past the first.
pub fn listing_url(base_url: &str, request: &PageRequest) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url).map_err(|err| FetchError::InvalidUrl(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::InvalidUrl(format!("{base_url} cannot be a base")))?
        .pop_if_empty()
        .push("r")
        .push(&format!("{}.json", request.query.as_str()));

    if !request.page.is_first() {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("count", &PAGE_SIZE.to_string());
        if let Some(cursor) = &request.cursor {
            pairs.append_pair("after", cursor.as_str());
        }
    }

    Ok(url)
}

pub struct RedditListingClient {
    http: Client,
    base_url: String,
}

impl RedditListingClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ListingSource for RedditListingClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Post>, FetchError> {
        let url = listing_url(&self.base_url, request)?;
        tracing::debug!(%url, page = request.page.0, "requesting listing page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        Ok(ListingEnvelope::from_slice(&body)?.into_posts())
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;

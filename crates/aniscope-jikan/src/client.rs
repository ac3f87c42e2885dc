//! The Jikan HTTP client: title search and paginated review collection.

use std::time::Duration;

use aniscope_core::{AnimeId, Review};
use reqwest::{Client, Url};

use crate::error::JikanError;
use crate::normalize::{normalize_review_text, passes_length_filter};
use crate::types::{ReviewEntry, ReviewsResponse, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

/// Client for the Jikan v4 REST API.
///
/// Manages the HTTP client, base URL, and the courtesy delay between
/// paginated requests. Use [`JikanClient::new`] for production or
/// [`JikanClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug)]
pub struct JikanClient {
    client: Client,
    base_url: Url,
    page_delay: Duration,
}

impl JikanClient {
    /// Creates a new client pointed at the production Jikan API.
    ///
    /// # Errors
    ///
    /// Returns [`JikanError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, page_delay_ms: u64) -> Result<Self, JikanError> {
        Self::with_base_url(timeout_secs, page_delay_ms, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`JikanError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`JikanError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        page_delay_ms: u64,
        base_url: &str,
    ) -> Result<Self, JikanError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("aniscope/0.1 (review-digest)")
            .build()?;

        // Normalise: a trailing slash makes Url::join extend the path instead
        // of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| JikanError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            page_delay: Duration::from_millis(page_delay_ms),
        })
    }

    /// Resolves a free-text title to its catalog id via the search endpoint.
    ///
    /// Requests a single best match (`limit=1`). Returns `Ok(None)` when the
    /// result set is empty; callers surface that as "not found" and halt.
    ///
    /// # Errors
    ///
    /// - [`JikanError::UnexpectedStatus`] on a non-2xx response.
    /// - [`JikanError::Http`] on network failure.
    /// - [`JikanError::Deserialize`] if the body does not match the expected shape.
    pub async fn search_anime(&self, title: &str) -> Result<Option<AnimeId>, JikanError> {
        let mut url = self.join("anime")?;
        url.query_pairs_mut()
            .append_pair("q", title)
            .append_pair("limit", "1");

        let body: SearchResponse = self.get_json(&url).await?;
        Ok(body.data.first().map(|entry| AnimeId(entry.mal_id)))
    }

    /// Fetches a single page of raw review entries for an anime.
    ///
    /// # Errors
    ///
    /// - [`JikanError::UnexpectedStatus`] on a non-2xx response.
    /// - [`JikanError::Http`] on network failure.
    /// - [`JikanError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_reviews_page(
        &self,
        id: AnimeId,
        page: u32,
    ) -> Result<Vec<ReviewEntry>, JikanError> {
        let mut url = self.join(&format!("anime/{id}/reviews"))?;
        url.query_pairs_mut().append_pair("page", &page.to_string());

        let body: ReviewsResponse = self.get_json(&url).await?;
        Ok(body.data)
    }

    /// Collects filtered, normalized reviews across `pages` pages.
    ///
    /// Spoiler-flagged entries are dropped when `filter_spoilers` is set, and
    /// entries whose normalized text is 50 characters or shorter are always
    /// dropped. A page that fails to fetch is logged and skipped; partial
    /// results are kept. Sleeps the configured delay between page requests as
    /// a rate-limit courtesy. The returned sequence preserves API order and
    /// may be empty.
    pub async fn collect_reviews(
        &self,
        id: AnimeId,
        pages: u32,
        filter_spoilers: bool,
    ) -> Vec<Review> {
        let mut reviews = Vec::new();

        for page in 1..=pages {
            match self.fetch_reviews_page(id, page).await {
                Ok(entries) => {
                    let before = reviews.len();
                    reviews.extend(entries.into_iter().filter_map(|entry| {
                        if filter_spoilers && entry.is_spoiler {
                            return None;
                        }
                        let text = normalize_review_text(&entry.review);
                        if !passes_length_filter(&text) {
                            return None;
                        }
                        Some(Review {
                            username: entry.user.username,
                            score: entry.score,
                            text,
                        })
                    }));
                    tracing::debug!(
                        anime_id = %id,
                        page,
                        kept = reviews.len() - before,
                        "collected review page"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        anime_id = %id,
                        page,
                        error = %e,
                        "review page fetch failed — skipping page"
                    );
                }
            }

            if page < pages {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        reviews
    }

    fn join(&self, path: &str) -> Result<Url, JikanError> {
        self.base_url
            .join(path)
            .map_err(|e| JikanError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T, JikanError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(JikanError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| JikanError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

//! Serde mappings for the Jikan v4 response envelopes.
//!
//! Only the fields the pipeline reads are mapped; everything else in the
//! payload is ignored. `data` defaults to empty so a missing array reads as
//! zero results rather than a deserialization error.

use serde::Deserialize;

/// Envelope for `GET /anime?q=...&limit=1`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SearchEntry {
    pub mal_id: i64,
}

/// Envelope for `GET /anime/{id}/reviews?page=N`.
#[derive(Debug, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub data: Vec<ReviewEntry>,
}

/// One raw review record as Jikan returns it, before any filtering.
#[derive(Debug, Deserialize)]
pub struct ReviewEntry {
    pub user: ReviewUser,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub is_spoiler: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReviewUser {
    pub username: String,
}

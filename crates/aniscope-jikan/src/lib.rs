//! HTTP client for the Jikan (MyAnimeList) v4 REST API.
//!
//! Covers the two endpoints the pipeline needs: anime search (title → id)
//! and paginated review listing. Wraps `reqwest` with typed response
//! deserialization and Jikan-specific error handling.

pub mod client;
pub mod error;
pub mod types;

mod normalize;

pub use client::JikanClient;
pub use error::JikanError;
pub use types::{ReviewEntry, ReviewUser, ReviewsResponse, SearchEntry, SearchResponse};

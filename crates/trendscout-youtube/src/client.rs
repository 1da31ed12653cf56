//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and surfacing of the API's JSON error payloads. Only the `/search` and
//! `/videos` endpoints are exposed; page-size policy lives with the callers.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Url};

use crate::error::YoutubeError;
use crate::profiles::{DurationBucket, Order};
use crate::types::{SearchPage, SearchResponse, VideoItem, VideoListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Page-size policy: at most this many ids per search page or details batch,
/// independent of any transport-imposed limit.
pub const MAX_PAGE_SIZE: usize = 50;

/// Parameters for one `/search` page request.
///
/// `max_results` is passed through as-is; callers cap it at the page-size
/// policy before building the request.
#[derive(Debug)]
pub struct SearchPageParams<'a> {
    pub query: &'a str,
    pub order: Order,
    pub max_results: usize,
    pub page_token: Option<&'a str>,
    pub published_after: DateTime<Utc>,
    pub video_duration: Option<DurationBucket>,
    pub video_category_id: Option<&'a str>,
}

/// Client for the `YouTube` Data API.
///
/// Manages the HTTP client, API key, and base URL. Use [`YoutubeClient::new`]
/// for production or [`YoutubeClient::with_base_url`] to point at a mock
/// server in tests. Credentials are injected here explicitly; rotating a key
/// means constructing a fresh client.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production `YouTube` Data API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trendscout/0.1 (content-discovery)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends endpoint segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YoutubeError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches one page of video search results.
    ///
    /// Items without a video id (channels, playlists) are dropped. Search is
    /// pinned to Russian-language relevance and the RU region, matching the
    /// audience the discovery profiles target.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] if the API returns an error payload.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_page(
        &self,
        params: &SearchPageParams<'_>,
    ) -> Result<SearchPage, YoutubeError> {
        let max_results = params.max_results.to_string();
        let published_after = params
            .published_after
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut pairs: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("order", params.order.as_param()),
            ("maxResults", &max_results),
            ("q", params.query),
            ("relevanceLanguage", "ru"),
            ("regionCode", "RU"),
            ("publishedAfter", &published_after),
            ("safeSearch", "none"),
        ];
        if let Some(token) = params.page_token {
            pairs.push(("pageToken", token));
        }
        if let Some(bucket) = params.video_duration {
            pairs.push(("videoDuration", bucket.as_param()));
        }
        if let Some(category) = params.video_category_id {
            pairs.push(("videoCategoryId", category));
        }

        let url = self.build_url("search", &pairs)?;
        let body = self.request_json(&url).await?;

        let response: SearchResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("search(q={})", params.query),
                source: e,
            })?;

        Ok(SearchPage {
            ids: response
                .items
                .into_iter()
                .filter_map(|item| item.id.video_id)
                .collect(),
            next_page_token: response.next_page_token,
        })
    }

    /// Fetches snippet, statistics, and content details for a batch of ids.
    ///
    /// The caller is responsible for chunking ids to the page-size policy.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] if the API returns an error payload.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoItem>, YoutubeError> {
        let joined = ids.join(",");
        let url = self.build_url(
            "videos",
            &[("part", "snippet,statistics,contentDetails"), ("id", &joined)],
        )?;
        let body = self.request_json(&url).await?;

        let response: VideoListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos(ids={})", ids.len()),
                source: e,
            })?;

        Ok(response.items)
    }

    /// Builds the full request URL with properly percent-encoded query parameters.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| YoutubeError::Api(format!("invalid endpoint '{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and parses the response body as JSON.
    ///
    /// Non-2xx responses are mapped to [`YoutubeError::Api`] carrying the
    /// API's `error.message` when the payload provides one.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(YoutubeError::Api(extract_api_error(&body, status)));
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: redact_key(url),
            source: e,
        })
    }
}

/// Pulls `error.message` out of an API error payload, falling back to the
/// HTTP status line when the body is not the expected JSON shape.
fn extract_api_error(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Drops the query string (which carries the API key) from error context.
fn redact_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

//! # spotydown.com Integration Module
//!
//! This module is the HTTP client for the unofficial spotydown.com API. It
//! resolves a Spotify track URL into track metadata and into a direct link to
//! the audio file.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, pipeline)
//!          ↓
//! spotydown Integration Layer
//!     ├── Metadata lookup    (POST /api/get-metadata)
//!     ├── Link resolution    (POST /api/download-track)
//!     └── Response decoding  (shared fallback chain)
//!          ↓
//! HTTP Layer (reqwest::blocking, serde_json)
//! ```
//!
//! ## Core Modules
//!
//! - [`decode`] - Turns a raw response body into JSON. The API is inconsistent
//!   about compression: it may announce `Content-Encoding: br` while the HTTP
//!   layer only inflates gzip and deflate, or declare a charset the body does
//!   not honour. The decoder tries several strategies in a fixed order.
//! - [`metadata`] - Fetches the first track record from `apiResponse.data`.
//! - [`resolve`] - Fetches the `file_url` of the audio file.
//!
//! ## Request Shape
//!
//! Both endpoints take the same body, `{"url": "<track url>"}`, where the URL
//! has its query string removed, and expect the browser-like headers the
//! site's own front-end sends.
//!
//! ## Error Handling
//!
//! Every call is attempted exactly once and is bounded by
//! [`Config::timeout`]. Failures are returned as [`FetchError`]; nothing in
//! this module panics or exits.
//!
//! ## Usage
//!
//! ```rust
//! let api = Spotydown::new(Config::default())?;
//! let track = api.fetch_metadata("https://open.spotify.com/track/abc123?si=xyz")?;
//! let link = api.resolve_download("https://open.spotify.com/track/abc123")?;
//! ```

pub mod decode;
pub mod metadata;
pub mod resolve;

use std::time::Duration;

use reqwest::{
    StatusCode,
    blocking::Client,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, ORIGIN, REFERER},
};

use crate::{
    Res,
    config::Config,
    error::FetchError,
    types::{TrackLocator, TrackRequest},
};

pub const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Mobile Safari/537.36 Edg/136.0.0.0";

/// A response whose body has been read but not interpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Blocking client for the spotydown API.
///
/// Holds one connection pool and the [`Config`] every call is bounded by.
/// Cheap to share by reference; calls do not mutate it.
pub struct Spotydown {
    http: Client,
    config: Config,
}

impl Spotydown {
    /// Creates a client for the given configuration.
    ///
    /// The underlying client has no overall timeout: each request sets its
    /// own from the configuration so that audio transfers can run longer than
    /// API calls.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the TLS backend cannot be
    /// initialised.
    pub fn new(config: Config) -> Res<Self> {
        config.validate()?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.timeout())
            .timeout(Option::<Duration>::None)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared HTTP client, used by the file streamer for the audio transfer.
    pub fn http(&self) -> &Client {
        &self.http
    }

    fn post_track(&self, endpoint: &str, locator: &TrackLocator) -> Result<RawResponse, FetchError> {
        let response = self
            .http
            .post(endpoint)
            .header(ACCEPT, "*/*")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(ORIGIN, self.config.api_base_url.as_str())
            .header(REFERER, format!("{}/", self.config.api_base_url))
            .json(&TrackRequest {
                url: locator.as_str(),
            })
            .timeout(self.config.timeout())
            .send()?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

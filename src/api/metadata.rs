use std::time::Instant;

use serde_json::Value;

use crate::{
    api::{Spotydown, decode::decode_json},
    error, info,
    error::FetchError,
    types::{TrackLocator, TrackMetadata},
};

impl Spotydown {
    /// Fetches metadata for a Spotify track.
    ///
    /// The query string is stripped from `track_url` before it is sent, so
    /// `https://open.spotify.com/track/abc123?si=xyz` and
    /// `https://open.spotify.com/track/abc123` are the same request.
    ///
    /// # Returns
    ///
    /// The first record of `apiResponse.data`, unmodified.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] for connection failures and timeouts
    /// - [`FetchError::Decode`] if no decoding strategy yields JSON
    /// - [`FetchError::Shape`] if `apiResponse.data` is missing or empty, or the
    ///   first record lacks a string `name` or `artist`
    /// - [`FetchError::Status`] if the shape check fails on a non-success response
    ///
    /// # Example
    ///
    /// ```
    /// let track = api.fetch_metadata("https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT")?;
    /// println!("{} - {}", track.name, track.artist);
    /// ```
    pub fn fetch_metadata(&self, track_url: &str) -> Result<TrackMetadata, FetchError> {
        let started = Instant::now();
        let locator = TrackLocator::parse(track_url);

        info!("Fetching track metadata...");
        let result = self
            .post_track(&self.config.metadata_endpoint(), &locator)
            .and_then(|raw| {
                let decoded = decode_json(&raw.body, &raw.headers)?;
                first_track(&decoded.value).map_err(|e| match e {
                    FetchError::Shape(_) if !raw.status.is_success() => {
                        FetchError::Status(raw.status)
                    }
                    other => other,
                })
            });

        match result {
            Ok(track) => {
                info!(
                    "Metadata fetched in {:.2} seconds",
                    started.elapsed().as_secs_f64()
                );
                Ok(track)
            }
            Err(e) => {
                error!("Failed to get track metadata for {}: {}", locator, e);
                Err(e)
            }
        }
    }
}

/// Extracts the first record of `apiResponse.data`.
pub fn first_track(value: &Value) -> Result<TrackMetadata, FetchError> {
    let data = value
        .get("apiResponse")
        .and_then(|response| response.get("data"))
        .and_then(Value::as_array)
        .ok_or(FetchError::Shape("apiResponse.data"))?;

    let first = data
        .first()
        .and_then(Value::as_object)
        .ok_or(FetchError::Shape("apiResponse.data[0]"))?;

    TrackMetadata::from_record(first.clone()).map_err(|key| {
        FetchError::Shape(if key == "name" {
            "apiResponse.data[0].name"
        } else {
            "apiResponse.data[0].artist"
        })
    })
}

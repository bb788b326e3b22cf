use std::time::Instant;

use serde_json::Value;

use crate::{
    api::{Spotydown, decode::decode_json},
    error, info,
    error::FetchError,
    types::{DownloadDescriptor, TrackLocator},
};

impl Spotydown {
    /// Asks the API for a direct link to the track's audio file.
    ///
    /// Sends the same request body as [`Spotydown::fetch_metadata`] to the
    /// download endpoint. Unlike the metadata lookup, a non-success status is
    /// a failure before the body is looked at.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] for connection failures and timeouts
    /// - [`FetchError::Status`] for a non-success status
    /// - [`FetchError::Decode`] if no decoding strategy yields JSON
    /// - [`FetchError::Shape`] if `file_url` is missing, empty or not a string
    pub fn resolve_download(&self, track_url: &str) -> Result<DownloadDescriptor, FetchError> {
        let started = Instant::now();
        let locator = TrackLocator::parse(track_url);

        info!("Getting download link...");
        let result = self
            .post_track(&self.config.resolve_endpoint(), &locator)
            .and_then(|raw| {
                if !raw.status.is_success() {
                    return Err(FetchError::Status(raw.status));
                }
                let decoded = decode_json(&raw.body, &raw.headers)?;
                file_url(&decoded.value)
            });

        match result {
            Ok(descriptor) => {
                info!(
                    "Download link obtained in {:.2} seconds",
                    started.elapsed().as_secs_f64()
                );
                Ok(descriptor)
            }
            Err(e) => {
                error!("Failed to get download link for {}: {}", locator, e);
                Err(e)
            }
        }
    }
}

pub fn file_url(value: &Value) -> Result<DownloadDescriptor, FetchError> {
    value
        .get("file_url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(|url| DownloadDescriptor {
            file_url: url.to_string(),
        })
        .ok_or(FetchError::Shape("file_url"))
}

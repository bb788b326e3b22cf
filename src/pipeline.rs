//! The direct-download path: metadata, then the download link, then the file.

use crate::{
    api::Spotydown,
    error::FetchError,
    info,
    management::{DownloadManager, ProgressObserver},
    types::{DownloadedFile, TrackLocator},
    utils,
};

/// Downloads a track in one step.
///
/// Runs the metadata lookup, link resolution and file download in order and
/// stops at the first stage that fails; later stages are never attempted.
/// The audio file is named after the sanitized `"<name> - <artist>"`.
///
/// # Example
///
/// ```
/// let file = download_track_direct(&api, "https://open.spotify.com/track/abc123?si=xyz", &mut ())?;
/// println!("saved {} bytes to {}", file.bytes_written, file.path.display());
/// ```
pub fn download_track_direct(
    api: &Spotydown,
    track_url: &str,
    progress: &mut dyn ProgressObserver,
) -> Result<DownloadedFile, FetchError> {
    let locator = TrackLocator::parse(track_url);
    info!("Processing Spotify track: {}", locator);

    let track = api.fetch_metadata(locator.as_str())?;
    let link = api.resolve_download(locator.as_str())?;
    let stem = utils::sanitize_filename(&track.display_name());

    DownloadManager::from_api(api).download(&link.file_url, &stem, progress)
}

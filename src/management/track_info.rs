use std::{fs, path::Path, path::PathBuf};

use crate::{error::FetchError, info, types::TrackMetadata, utils};

/// Writes the plain-text description that accompanies a downloaded track.
pub struct TrackInfoManager<'a> {
    track: &'a TrackMetadata,
}

impl<'a> TrackInfoManager<'a> {
    pub fn new(track: &'a TrackMetadata) -> Self {
        Self { track }
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", utils::sanitize_filename(&self.track.display_name()))
    }

    pub fn render(&self) -> String {
        let t = self.track;
        format!(
            "Track Name: {}\nArtist: {}\nAlbum: {}\nAlbum Artist: {}\nCover URL: {}\nSpotify URL: {}\n",
            t.name, t.artist, t.album_name, t.album_artist, t.cover_url, t.url
        )
    }

    pub fn persist(&self, output_dir: &Path) -> Result<PathBuf, FetchError> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(self.file_name());
        fs::write(&path, self.render())?;

        info!("Track information saved to {}", path.display());
        Ok(path)
    }
}

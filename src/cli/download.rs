use crate::{
    api::Spotydown,
    cli::{BarProgress, prompt_track_url, require_track},
    fatal, info, pipeline, success,
};

/// Downloads a track to the configured output directory.
///
/// Without a `url` the user is asked for one on stdin, the way the tool
/// behaves when started without arguments.
pub fn download(api: &Spotydown, url: Option<String>) {
    let input = match url {
        Some(url) => url,
        None => {
            info!("Spotify Track Information and Download Link");
            match prompt_track_url() {
                Ok(url) => url,
                Err(e) => fatal!("Cannot read track URL: {}", e),
            }
        }
    };
    let locator = require_track(&input);

    let mut progress = BarProgress::new();
    match pipeline::download_track_direct(api, locator.as_str(), &mut progress) {
        Ok(file) => success!("Track successfully downloaded to: {}", file.path.display()),
        Err(_) => fatal!("Failed to download track."),
    }
}

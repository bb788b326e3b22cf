use tabled::Table;

use crate::{
    api::Spotydown, cli::require_track, fatal, management::TrackInfoManager, success,
    types::TrackTableRow,
};

/// Prints a track's metadata as a table.
///
/// # Arguments
///
/// * `api` - Configured client
/// * `url` - Track URL or bare track id
/// * `save` - Also write `<name> - <artist>.txt` into the output directory
pub fn info(api: &Spotydown, url: String, save: bool) {
    let locator = require_track(&url);

    let track = match api.fetch_metadata(locator.as_str()) {
        Ok(track) => track,
        Err(_) => fatal!("Failed to get track information."),
    };

    println!("{}", Table::new(TrackTableRow::rows(&track)));

    if save {
        match TrackInfoManager::new(&track).persist(&api.config().output_dir) {
            Ok(path) => success!("Saved track information to {}", path.display()),
            Err(e) => fatal!("Cannot save track information: {}", e),
        }
    }
}

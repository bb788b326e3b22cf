use crate::{api::Spotydown, cli::require_track, fatal};

pub fn link(api: &Spotydown, url: String) {
    let locator = require_track(&url);

    match api.resolve_download(locator.as_str()) {
        // plain stdout so the link can be piped into other tools
        Ok(descriptor) => println!("{}", descriptor.file_url),
        Err(_) => fatal!("Failed to get download link."),
    }
}

//! # CLI Module
//!
//! This module provides the command-line interface layer for spotydown. It
//! implements the user-facing commands and translates the library's results
//! into console output, progress bars and exit codes.
//!
//! ## Commands
//!
//! - [`download`] - Fetches metadata and the download link, then saves the
//!   audio file. Prompts for the URL on stdin when none is given; this is also
//!   what runs when the binary is started without a subcommand.
//! - [`info`] - Shows the track's metadata as a table and optionally writes the
//!   `.txt` track info file.
//! - [`link`] - Prints the direct download URL without downloading.
//!
//! ## Input
//!
//! Every command accepts a full track URL (`https://open.spotify.com/track/<id>`,
//! with or without a query string) or a bare track id. Anything else is
//! rejected before a request is made.
//!
//! ## Error Handling
//!
//! The library reports failures as values and logs the details. Commands turn
//! a failure into a final red message and exit with status 1 via `fatal!`.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotydown                                        # interactive prompt
//! spotydown download https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT
//! spotydown info 4cOdK2wGLETKBW3PvgPWqT --save     # table + track info file
//! spotydown link https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT?si=x
//! spotydown --output-dir ~/Music download <url>
//! ```

mod download;
mod info;
mod link;
mod progress;

pub use download::download;
pub use info::info;
pub use link::link;
pub use progress::BarProgress;

use std::io::{self, Write};

use crate::{fatal, types::TrackLocator};

pub fn prompt_track_url() -> io::Result<String> {
    print!("Enter Spotify track URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Turns user input into a locator, accepting full URLs and bare track ids.
pub fn parse_track_input(input: &str) -> Option<TrackLocator> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let locator = if input.chars().all(|c| c.is_ascii_alphanumeric()) {
        TrackLocator::from_track_id(input)
    } else {
        TrackLocator::parse(input)
    };

    if locator.is_track_url() && locator.track_id().is_some() {
        Some(locator)
    } else {
        None
    }
}

fn require_track(input: &str) -> TrackLocator {
    match parse_track_input(input) {
        Some(locator) => locator,
        None => fatal!("Please provide a valid Spotify track URL."),
    }
}

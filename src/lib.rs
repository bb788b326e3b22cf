//! Spotydown Track Downloader Library
//!
//! This library fetches track metadata and audio files for Spotify tracks through
//! the unofficial spotydown.com API. It includes modules for API communication,
//! response decoding, file output, configuration management and the CLI flows
//! built on top of them.
//!
//! # Modules
//!
//! - `api` - spotydown.com API client implementation
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Failure taxonomy shared by the client and the file output
//! - `management` - Writing downloaded audio and track info files to disk
//! - `pipeline` - The direct-download sequence (metadata, link, file)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotydown::{api::Spotydown, config, pipeline};
//!
//! fn main() -> spotydown::Res<()> {
//!     config::load_env()?;
//!     let api = Spotydown::new(config::Config::from_env()?)?;
//!     let file = pipeline::download_track_direct(&api, "https://open.spotify.com/track/abc", &mut ())?;
//!     println!("{}", file.path.display());
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the application edge (client construction, CLI) where the exact
/// failure kind no longer matters. The core returns [`error::FetchError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppresses `info!` and `success!` output for the rest of the process.
///
/// Warnings and errors are always printed.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

#[doc(hidden)]
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Prints an informational message with a blue bullet point.
///
/// Used for progress updates such as "Fetching track metadata...". Silent
/// when quiet mode is enabled.
///
/// # Example
///
/// ```
/// info!("Fetching track metadata...");
/// info!("Metadata fetched in {:.2} seconds", elapsed);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    if !$crate::is_quiet() {
      println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
    }
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Track successfully downloaded to: {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    if !$crate::is_quiet() {
      println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
    }
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable conditions, e.g. a downloaded file that is smaller
/// than the size the server announced.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark.
///
/// Reports a terminal failure of an operation without stopping the program.
/// The library core uses this before handing the failure back to its caller.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the binary: code after this will not execute.
///
/// # Example
///
/// ```
/// fatal!("Failed to download track.");
/// ```
#[macro_export]
macro_rules! fatal {
  ($($arg:tt)*) => ({
    $crate::error!($($arg)*);
    std::process::exit(1);
  })
}

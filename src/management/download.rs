use std::{
    fs::{self, File},
    io::{ErrorKind, Read, Write},
    path::PathBuf,
    time::Instant,
};

use reqwest::{
    blocking::Client,
    header::{CONTENT_LENGTH, HeaderMap},
};

use crate::{
    api::Spotydown,
    config::Config,
    error, info,
    error::FetchError,
    types::{DownloadedFile, SizeShortfall},
    utils, warning,
};

/// Receives download progress from [`DownloadManager::download`].
///
/// All methods default to doing nothing; `()` is the silent observer.
pub trait ProgressObserver {
    fn started(&mut self, _expected: Option<u64>) {}
    fn advanced(&mut self, _downloaded: u64) {}
    fn finished(&mut self) {}
}

impl ProgressObserver for () {}

/// Streams a remote audio file into the configured output directory.
pub struct DownloadManager<'a> {
    http: &'a Client,
    config: &'a Config,
}

impl<'a> DownloadManager<'a> {
    pub fn new(http: &'a Client, config: &'a Config) -> Self {
        Self { http, config }
    }

    pub fn from_api(api: &'a Spotydown) -> Self {
        Self::new(api.http(), api.config())
    }

    /// `<output_dir>/<stem>.mp3`
    pub fn target_path(&self, stem: &str) -> PathBuf {
        self.config.output_dir.join(format!("{}.mp3", stem))
    }

    /// Size announced by a HEAD request, if probing is enabled and the server
    /// reports a non-zero `Content-Length`. Any failure yields `None`.
    pub fn expected_size(&self, url: &str) -> Option<u64> {
        if !self.config.probe_size {
            return None;
        }

        let response = self
            .http
            .head(url)
            .timeout(self.config.timeout())
            .send()
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        content_length(response.headers())
    }

    /// Downloads `url` to `<output_dir>/<stem>.mp3`.
    ///
    /// The body is written chunk by chunk as it arrives. When the expected
    /// size is known and the file ends up more than `size_tolerance` short,
    /// a warning is logged and recorded in [`DownloadedFile::shortfall`]; the
    /// file is kept either way.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and filesystem errors. A file
    /// that was partially written before the failure is left in place.
    pub fn download(
        &self,
        url: &str,
        stem: &str,
        progress: &mut dyn ProgressObserver,
    ) -> Result<DownloadedFile, FetchError> {
        let started = Instant::now();
        let path = self.target_path(stem);

        match self.transfer(url, path, progress) {
            Ok(file) => {
                info!(
                    "Download completed in {:.2} seconds: {}",
                    started.elapsed().as_secs_f64(),
                    file.path.display()
                );
                Ok(file)
            }
            Err(e) => {
                error!("Error downloading file: {}", e);
                Err(e)
            }
        }
    }

    fn transfer(
        &self,
        url: &str,
        path: PathBuf,
        progress: &mut dyn ProgressObserver,
    ) -> Result<DownloadedFile, FetchError> {
        fs::create_dir_all(&self.config.output_dir)?;
        info!("Downloading track to {}...", path.display());

        let probed = self.expected_size(url);
        match probed {
            Some(size) => info!("Expected file size: {:.2} MB", utils::megabytes(size)),
            None => info!("Expected file size unknown"),
        }

        let mut response = self
            .http
            .get(url)
            .timeout(self.config.download_timeout())
            .send()?
            .error_for_status()?;
        let expected = probed.or_else(|| content_length(response.headers()));

        let mut file = File::create(&path)?;
        let mut chunk = vec![0u8; self.config.chunk_size];
        let mut downloaded: u64 = 0;

        progress.started(expected);
        loop {
            let read = match response.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(FetchError::Transport(Box::new(e))),
            };
            file.write_all(&chunk[..read])?;
            downloaded += read as u64;
            progress.advanced(downloaded);
        }
        file.flush()?;
        drop(file);
        progress.finished();

        let actual = fs::metadata(&path)?.len();
        let shortfall = expected
            .filter(|&size| utils::is_short(actual, size, self.config.size_tolerance))
            .map(|size| SizeShortfall {
                expected: size,
                actual,
            });

        if let Some(short) = shortfall {
            warning!(
                "Downloaded file ({:.2} MB) is smaller than expected ({:.2} MB)",
                utils::megabytes(short.actual),
                utils::megabytes(short.expected)
            );
        }

        Ok(DownloadedFile {
            path,
            bytes_written: downloaded,
            expected_len: expected,
            shortfall,
        })
    }
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|&size| size > 0)
}

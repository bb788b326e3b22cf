mod download;
mod track_info;

pub use download::DownloadManager;
pub use download::ProgressObserver;
pub use track_info::TrackInfoManager;

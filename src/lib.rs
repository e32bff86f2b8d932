//! Enumerate Wayback Machine captures through the CDX index and download
//! their raw bytes.

pub mod batch;
pub mod cdx;
pub mod cli;
pub mod downloader;
pub mod error;
pub mod http;
pub mod input;
pub mod query;
pub mod types;

pub use batch::{BatchRunner, UrlOutcome};
pub use cdx::{parse_captures, CdxClient};
pub use downloader::Downloader;
pub use error::DownloaderError;
pub use query::CdxQuery;
pub use types::{CaptureRecord, DownloadReport, DownloadStatus, DownloadSummary};

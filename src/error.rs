use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloaderError {
    #[error("Failed to parse CDX response: {0}")]
    ParseError(String),

    #[error("Not found (404): {0}")]
    NotFound(String),

    #[error("HTTP Error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read URL file {}: {source}", .path.display())]
    UrlFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DownloaderError {
    /// Maps a non-success response status onto the not-found / other-status split.
    pub fn from_status(status: reqwest::StatusCode, url: &str) -> Self {
        if status == reqwest::StatusCode::NOT_FOUND {
            DownloaderError::NotFound(url.to_string())
        } else {
            DownloaderError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
        }
    }
}

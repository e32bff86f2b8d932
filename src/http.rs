use crate::error::DownloaderError;
use std::time::Duration;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by CDX queries and capture downloads.
/// Without a timeout a stalled connection holds its worker slot indefinitely.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, DownloaderError> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

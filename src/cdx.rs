use crate::error::DownloaderError;
use crate::query::CdxQuery;
use crate::types::CaptureRecord;
use log::{debug, info};
use reqwest::header::COOKIE;

pub const CDX_API_URL: &str = "http://web.archive.org/cdx/search/cdx";

pub struct CdxClient {
    client: reqwest::Client,
    endpoint: String,
    cookie: Option<String>,
}

impl CdxClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            cookie: None,
        }
    }

    /// Sends `cookie` verbatim as the `Cookie` header, e.g. `cdx-auth-token=...`.
    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn query_url(&self, query: &CdxQuery) -> String {
        query.to_url(&self.endpoint)
    }

    /// Runs the query and returns the response body exactly as served.
    pub async fn fetch(&self, query: &CdxQuery) -> Result<String, DownloaderError> {
        let url = self.query_url(query);
        info!("CDX request: {}", url);

        let mut request = self.client.get(&url);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(DownloaderError::from_status(resp.status(), &url));
        }

        Ok(resp.text().await?)
    }

    /// Lists every HTTP 200 capture of `url` as `(timestamp, original)` records.
    pub async fn captures(&self, url: &str) -> Result<Vec<CaptureRecord>, DownloaderError> {
        let body = self.fetch(&CdxQuery::captures(url)).await?;
        parse_captures(&body)
    }
}

/// Parses a JSON CDX response whose first row is the field-name header and
/// whose remaining rows are `[timestamp, original]`.
pub fn parse_captures(body: &str) -> Result<Vec<CaptureRecord>, DownloaderError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<Vec<String>> = serde_json::from_str(body)?;
    let mut records = Vec::with_capacity(rows.len().saturating_sub(1));

    for (index, row) in rows.into_iter().enumerate().skip(1) {
        let [timestamp, original_url]: [String; 2] = row.try_into().map_err(|row: Vec<String>| {
            DownloaderError::ParseError(format!(
                "row {} has {} fields, expected 2",
                index,
                row.len()
            ))
        })?;
        records.push(CaptureRecord {
            timestamp,
            original_url,
        });
    }

    debug!("Parsed {} capture records", records.len());
    Ok(records)
}

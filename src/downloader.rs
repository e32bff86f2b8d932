use crate::error::DownloaderError;
use crate::types::{CaptureRecord, DownloadReport, DownloadStatus, DownloadSummary, DownloadTask};
use futures::{StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use reqwest::header::CONTENT_TYPE;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

pub const ARCHIVE_ROOT: &str = "https://web.archive.org";

enum Fetched {
    Saved(u64),
    SkippedHtml(String),
}

#[derive(Clone)]
pub struct Downloader {
    threads: usize,
    client: reqwest::Client,
    archive_root: String,
    output_dir: PathBuf,
}

impl Downloader {
    pub fn new(
        client: reqwest::Client,
        threads: usize,
        archive_root: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            threads: threads.max(1),
            client,
            archive_root: archive_root.into().trim_end_matches('/').to_string(),
            output_dir: output_dir.into(),
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Downloads every capture with at most `threads` in flight, reporting
    /// each outcome as it completes. Returns once all tasks have finished.
    pub async fn download_all(&self, records: Vec<CaptureRecord>) -> DownloadSummary {
        let pb = self.create_progress_bar(records.len() as u64);
        let start_time = Instant::now();
        let mut summary = DownloadSummary::default();

        let mut completions = futures::stream::iter(records)
            .map(|record| {
                let task = self.create_task(record);
                pb.suspend(|| print_start(&task));
                let downloader = self.clone();
                tokio::spawn(async move { downloader.run_task(task).await })
            })
            .buffer_unordered(self.threads);

        while let Some(joined) = completions.next().await {
            match joined {
                Ok(report) => {
                    pb.suspend(|| print_report(&report));
                    summary.record(report);
                }
                Err(e) => {
                    error!("Download task did not complete: {}", e);
                    pb.suspend(|| println!("Error during download: {}", e));
                    summary.record_lost_task();
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        summary.total_duration = start_time.elapsed();
        summary
    }

    /// Probes and fetches one capture. Never fails: the outcome is on the report.
    pub async fn download_capture(&self, record: CaptureRecord) -> DownloadReport {
        self.run_task(self.create_task(record)).await
    }

    async fn run_task(&self, task: DownloadTask) -> DownloadReport {
        let start_time = Instant::now();
        info!(
            "Downloading raw file: {} -> {}",
            task.url,
            task.output_path.display()
        );

        let result = self.fetch_capture(&task).await;

        let duration = start_time.elapsed();
        let (status, bytes_downloaded, error) = match result {
            Ok(Fetched::Saved(bytes)) => (DownloadStatus::Saved, bytes, None),
            Ok(Fetched::SkippedHtml(content_type)) => {
                info!("Skipping {}: Content-Type is {}", task.url, content_type);
                (DownloadStatus::SkippedHtml, 0, None)
            }
            Err(DownloaderError::NotFound(_)) => {
                warn!("Capture not found: {}", task.url);
                (DownloadStatus::NotFound, 0, None)
            }
            Err(DownloaderError::HttpStatus { status, .. }) => {
                warn!("HTTP {} for {}", status, task.url);
                (DownloadStatus::HttpError(status), 0, None)
            }
            Err(e) => {
                error!("Download failed for {}: {}", task.url, e);
                (DownloadStatus::Failed, 0, Some(e.to_string()))
            }
        };

        DownloadReport {
            task,
            status,
            bytes_downloaded,
            duration,
            error,
        }
    }

    async fn fetch_capture(&self, task: &DownloadTask) -> Result<Fetched, DownloaderError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let head = self.client.head(&task.url).send().await?;
        if !head.status().is_success() {
            return Err(DownloaderError::from_status(head.status(), &task.url));
        }

        let content_type = head
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if is_html(content_type) {
            return Ok(Fetched::SkippedHtml(content_type.to_string()));
        }

        let resp = self.client.get(&task.url).send().await?;
        if !resp.status().is_success() {
            return Err(DownloaderError::from_status(resp.status(), &task.url));
        }

        let part_path = partial_path(&task.output_path);
        let stream = resp
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        let reader = StreamReader::new(stream);
        tokio::pin!(reader);

        let written = async {
            let mut file = File::create(&part_path).await?;
            let bytes = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            tokio::fs::rename(&part_path, &task.output_path).await?;
            Ok::<u64, io::Error>(bytes)
        }
        .await;

        match written {
            Ok(bytes) => Ok(Fetched::Saved(bytes)),
            Err(e) => {
                let _ = tokio::fs::remove_file(&part_path).await;
                Err(e.into())
            }
        }
    }

    pub fn create_task(&self, record: CaptureRecord) -> DownloadTask {
        let url = raw_capture_url(&self.archive_root, &record);
        let output_path = self
            .output_dir
            .join(capture_filename(&record.timestamp, &record.original_url));

        DownloadTask {
            record,
            url,
            output_path,
        }
    }

    fn create_progress_bar(&self, len: u64) -> ProgressBar {
        let pb = ProgressBar::new(len);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} captures",
        )
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

fn print_start(task: &DownloadTask) {
    println!(
        "Downloading raw file: {} -> {}",
        task.url,
        task.output_path.display()
    );
}

fn print_report(report: &DownloadReport) {
    use colored::Colorize;

    let line = report.to_string();
    match report.status {
        DownloadStatus::Saved => println!("{}", line.green()),
        DownloadStatus::SkippedHtml => println!("{}", line.yellow()),
        DownloadStatus::NotFound | DownloadStatus::HttpError(_) | DownloadStatus::Failed => {
            println!("{}", line.red())
        }
    }
}

/// `id_` asks the archive for the original bytes instead of the rewritten replay page.
pub fn raw_capture_url(archive_root: &str, record: &CaptureRecord) -> String {
    format!(
        "{}/web/{}id_/{}",
        archive_root.trim_end_matches('/'),
        record.timestamp,
        record.original_url
    )
}

/// `{timestamp}_{basename}`, with `file` appended when the basename is empty.
pub fn capture_filename(timestamp: &str, original_url: &str) -> String {
    let mut filename = format!("{}_{}", timestamp, url_basename(original_url));
    if filename.ends_with('_') {
        filename.push_str("file");
    }
    filename
}

/// Last segment of the URL path, taken verbatim (no percent re-encoding).
/// Inputs without a scheme are treated as a bare path.
fn url_basename(original_url: &str) -> &str {
    let without_query = original_url.split(|c| c == '?' || c == '#').next().unwrap_or("");
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => without_query,
    };
    path.rsplit('/').next().unwrap_or("")
}

/// Archive error placeholders come back as HTML; so do genuinely archived
/// HTML pages, which this check also skips.
pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One row of the CDX index: when the capture was taken and what URL it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub timestamp: String,
    pub original_url: String,
}

impl CaptureRecord {
    pub fn new(timestamp: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            original_url: original_url.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub record: CaptureRecord,
    pub url: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Saved,
    SkippedHtml,
    NotFound,
    HttpError(u16),
    Failed,
}

#[derive(Debug)]
pub struct DownloadReport {
    pub task: DownloadTask,
    pub status: DownloadStatus,
    pub bytes_downloaded: u64,
    pub duration: Duration,
    pub error: Option<String>,
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            DownloadStatus::Saved => {
                write!(f, "Saved raw file to: {}", self.task.output_path.display())
            }
            DownloadStatus::SkippedHtml => write!(
                f,
                "Skipping {}: Content-Type is HTML (likely error page)",
                self.task.url
            ),
            DownloadStatus::NotFound => write!(f, "Not found (404): {}", self.task.url),
            DownloadStatus::HttpError(code) => {
                write!(f, "HTTP Error {} for {}", code, self.task.url)
            }
            DownloadStatus::Failed => write!(
                f,
                "Failed to download {}: {}",
                self.task.url,
                self.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

/// Totals for one input URL's batch of captures.
#[derive(Debug, Default)]
pub struct DownloadSummary {
    pub total_downloads: usize,
    pub saved: usize,
    pub skipped: usize,
    pub not_found: usize,
    pub failed: usize,
    pub total_bytes_downloaded: u64,
    pub total_duration: Duration,
    pub reports: Vec<DownloadReport>,
}

impl DownloadSummary {
    pub fn record(&mut self, report: DownloadReport) {
        self.total_downloads += 1;
        match report.status {
            DownloadStatus::Saved => self.saved += 1,
            DownloadStatus::SkippedHtml => self.skipped += 1,
            DownloadStatus::NotFound => self.not_found += 1,
            DownloadStatus::HttpError(_) | DownloadStatus::Failed => self.failed += 1,
        }
        self.total_bytes_downloaded += report.bytes_downloaded;
        self.reports.push(report);
    }

    /// Counts a task that never produced a report (it panicked or was aborted).
    pub fn record_lost_task(&mut self) {
        self.total_downloads += 1;
        self.failed += 1;
    }
}

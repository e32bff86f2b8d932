use crate::cdx::CdxClient;
use crate::downloader::Downloader;
use crate::query::CdxQuery;
use crate::types::DownloadSummary;
use colored::*;
use log::{error, info};

#[derive(Debug)]
pub enum UrlOutcome {
    NoCaptures,
    Downloaded(DownloadSummary),
}

/// Processes input URLs one at a time: query the index, then download that
/// URL's captures through the worker pool before moving on.
pub struct BatchRunner {
    cdx: CdxClient,
    downloader: Downloader,
}

impl BatchRunner {
    pub fn new(cdx: CdxClient, downloader: Downloader) -> Self {
        Self { cdx, downloader }
    }

    pub async fn run(&self, urls: &[String]) -> Vec<UrlOutcome> {
        let mut outcomes = Vec::with_capacity(urls.len());
        for url in urls {
            let outcome = self.process_url(url).await;
            if let UrlOutcome::Downloaded(summary) = &outcome {
                print_summary(url, summary);
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    pub async fn process_url(&self, url: &str) -> UrlOutcome {
        println!("\n{} {}", "Processing URL:".bold(), url);
        println!(
            "Querying Wayback CDX API:\n{}",
            self.cdx.query_url(&CdxQuery::captures(url))
        );

        let records = match self.cdx.captures(url).await {
            Ok(records) => records,
            Err(e) => {
                error!("CDX query failed for {}: {}", url, e);
                println!("{} {}", "Error querying Wayback:".red(), e);
                Vec::new()
            }
        };

        if records.is_empty() {
            println!("No archived captures found for {}.", url);
            return UrlOutcome::NoCaptures;
        }

        println!("Found {} captures for {}.", records.len(), url);
        info!(
            "Submitting {} downloads with {} threads",
            records.len(),
            self.downloader.threads()
        );
        UrlOutcome::Downloaded(self.downloader.download_all(records).await)
    }
}

fn print_summary(url: &str, summary: &DownloadSummary) {
    println!("\n{} {}", "Download Summary:".bold(), url);
    println!("Total captures: {}", summary.total_downloads);
    println!("Saved: {}", summary.saved.to_string().green());
    println!("Skipped (HTML): {}", summary.skipped.to_string().yellow());
    println!("Not found: {}", summary.not_found.to_string().red());
    println!("Failed: {}", summary.failed.to_string().red());
    println!(
        "Total data transferred: {:.2} MB",
        summary.total_bytes_downloaded as f64 / 1_048_576.0
    );
    println!("Total duration: {:.2?}", summary.total_duration);
}

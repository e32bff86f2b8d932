use crate::cdx::CDX_API_URL;
use crate::downloader::ARCHIVE_ROOT;
use crate::query::{CdxQuery, MatchType, OutputFormat, DEFAULT_COLLAPSE, DEFAULT_FIELDS, DEFAULT_LIMIT};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Download all archived captures (raw files) from the Wayback Machine for given URL(s).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The original URL to look up in the Wayback Machine
    pub url: Option<String>,

    /// File containing URLs to look up, one per line
    #[arg(long)]
    pub url_file: Option<PathBuf>,

    /// Directory to save downloaded files
    #[arg(long, default_value = "downloads")]
    pub download_dir: PathBuf,

    /// Number of concurrent downloads
    #[arg(long, default_value_t = 8)]
    pub threads: usize,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// CDX search endpoint
    #[arg(long, default_value = CDX_API_URL)]
    pub cdx_url: String,

    /// Host serving raw captures
    #[arg(long, default_value = ARCHIVE_ROOT)]
    pub archive_root: String,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Query the Wayback CDX Server (defaults: limit=10000, collapse=urlkey, fl=original).
///
/// See https://archive.org/developers/wayback-cdx-server.html
/// Example dork: example.com/*
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct QueryCli {
    /// URL query (e.g. example.com/*)
    pub dork: String,

    /// Match type (the server defaults to exact)
    #[arg(long = "matchType", value_enum)]
    pub match_type: Option<MatchType>,

    /// Output format
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Comma separated list of fields to return
    #[arg(long, default_value = DEFAULT_FIELDS)]
    pub fl: String,

    /// Limit the number of results
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u64,

    /// Skip the first N results
    #[arg(long)]
    pub offset: Option<u64>,

    /// Page number for pagination
    #[arg(long)]
    pub page: Option<u64>,

    /// Page size for pagination
    #[arg(long = "pageSize")]
    pub page_size: Option<u64>,

    /// Return the total number of pages (pagination only)
    #[arg(long = "showNumPages")]
    pub show_num_pages: bool,

    /// Return the raw secondary index (pagination only)
    #[arg(long = "showPagedIndex")]
    pub show_paged_index: bool,

    /// Start date, inclusive
    #[arg(long = "from-date", alias = "from", value_name = "YYYYMMDDhhmmss")]
    pub from_date: Option<String>,

    /// End date, inclusive
    #[arg(long = "to-date", alias = "to", value_name = "YYYYMMDDhhmmss")]
    pub to_date: Option<String>,

    /// Filter in the form [!]<field>:<regex> (repeatable)
    #[arg(long)]
    pub filter: Vec<String>,

    /// Collapse in the form field[:N], added after the default urlkey (repeatable)
    #[arg(long)]
    pub collapse: Vec<String>,

    /// Do not send the default collapse=urlkey
    #[arg(long)]
    pub no_collapse: bool,

    /// Enable fastLatest mode
    #[arg(long = "fastLatest")]
    pub fast_latest: bool,

    /// Include resume key if available
    #[arg(long = "showResumeKey")]
    pub show_resume_key: bool,

    /// Resume key to continue a previous query
    #[arg(long = "resumeKey")]
    pub resume_key: Option<String>,

    /// Include duplicate count column
    #[arg(long = "showDupeCount")]
    pub show_dupe_count: bool,

    /// Include skip count column
    #[arg(long = "showSkipCount")]
    pub show_skip_count: bool,

    /// Include last skip timestamp
    #[arg(long = "lastSkipTimestamp")]
    pub last_skip_timestamp: bool,

    /// API key cookie (e.g. 'cdx-auth-token=API-Key-Secret')
    #[arg(long)]
    pub cookie: Option<String>,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// CDX search endpoint
    #[arg(long, default_value = CDX_API_URL)]
    pub cdx_url: String,
}

impl QueryCli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn to_query(&self) -> CdxQuery {
        let mut collapse = Vec::with_capacity(self.collapse.len() + 1);
        if !self.no_collapse {
            collapse.push(DEFAULT_COLLAPSE.to_string());
        }
        collapse.extend(self.collapse.iter().cloned());

        CdxQuery {
            url: self.dork.clone(),
            output: self.output,
            limit: Some(self.limit),
            fields: Some(self.fl.clone()),
            match_type: self.match_type,
            offset: self.offset,
            page: self.page,
            page_size: self.page_size,
            from: self.from_date.clone(),
            to: self.to_date.clone(),
            resume_key: self.resume_key.clone(),
            show_num_pages: self.show_num_pages,
            show_paged_index: self.show_paged_index,
            fast_latest: self.fast_latest,
            show_resume_key: self.show_resume_key,
            show_dupe_count: self.show_dupe_count,
            show_skip_count: self.show_skip_count,
            last_skip_timestamp: self.last_skip_timestamp,
            filters: self.filter.clone(),
            collapse,
        }
    }
}

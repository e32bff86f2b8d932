//! Typed CDX search parameters and their query-string encoding.

use clap::ValueEnum;

pub const DEFAULT_LIMIT: u64 = 10_000;
pub const DEFAULT_FIELDS: &str = "original";
pub const DEFAULT_COLLAPSE: &str = "urlkey";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchType {
    Exact,
    Prefix,
    Host,
    Domain,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Prefix => "prefix",
            MatchType::Host => "host",
            MatchType::Domain => "domain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

/// Parameters for one CDX search request. Unset options are left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdxQuery {
    pub url: String,
    pub output: Option<OutputFormat>,
    pub limit: Option<u64>,
    pub fields: Option<String>,
    pub match_type: Option<MatchType>,
    pub offset: Option<u64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub resume_key: Option<String>,
    pub show_num_pages: bool,
    pub show_paged_index: bool,
    pub fast_latest: bool,
    pub show_resume_key: bool,
    pub show_dupe_count: bool,
    pub show_skip_count: bool,
    pub last_skip_timestamp: bool,
    pub filters: Vec<String>,
    pub collapse: Vec<String>,
}

enum Param<'a> {
    Value(&'static str, Option<String>),
    Flag(&'static str, bool),
    List(&'static str, &'a [String]),
}

impl CdxQuery {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// The fixed query used for bulk downloads: every HTTP 200 capture as
    /// `[timestamp, original]` JSON rows.
    pub fn captures(url: impl Into<String>) -> Self {
        Self {
            output: Some(OutputFormat::Json),
            fields: Some("timestamp,original".to_string()),
            filters: vec!["statuscode:200".to_string()],
            ..Self::new(url)
        }
    }

    fn table(&self) -> [Param<'_>; 20] {
        [
            Param::Value("output", self.output.map(|o| o.as_str().to_string())),
            Param::Value("url", Some(self.url.clone())),
            Param::Value("limit", self.limit.map(|v| v.to_string())),
            Param::Value("fl", self.fields.clone()),
            Param::Value("matchType", self.match_type.map(|m| m.as_str().to_string())),
            Param::Value("offset", self.offset.map(|v| v.to_string())),
            Param::Value("page", self.page.map(|v| v.to_string())),
            Param::Value("pageSize", self.page_size.map(|v| v.to_string())),
            Param::Value("from", self.from.clone()),
            Param::Value("to", self.to.clone()),
            Param::Value("resumeKey", self.resume_key.clone()),
            Param::Flag("showNumPages", self.show_num_pages),
            Param::Flag("showPagedIndex", self.show_paged_index),
            Param::Flag("fastLatest", self.fast_latest),
            Param::Flag("showResumeKey", self.show_resume_key),
            Param::Flag("showDupeCount", self.show_dupe_count),
            Param::Flag("showSkipCount", self.show_skip_count),
            Param::Flag("lastSkipTimestamp", self.last_skip_timestamp),
            Param::List("filter", &self.filters),
            Param::List("collapse", &self.collapse),
        ]
    }

    /// Key/value pairs in wire order; list options repeat their key.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for param in self.table() {
            match param {
                Param::Value(key, Some(value)) => pairs.push((key, value)),
                Param::Value(_, None) => {}
                Param::Flag(key, true) => pairs.push((key, "true".to_string())),
                Param::Flag(_, false) => {}
                Param::List(key, values) => {
                    pairs.extend(values.iter().map(|v| (key, v.clone())));
                }
            }
        }
        pairs
    }

    pub fn query_string(&self) -> String {
        self.params()
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn to_url(&self, endpoint: &str) -> String {
        format!("{}?{}", endpoint, self.query_string())
    }
}

use crate::error::DownloaderError;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Where the URLs to process come from, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlInput {
    Argument(String),
    File(PathBuf),
    Stdin,
    None,
}

impl UrlInput {
    pub fn select(url: Option<&str>, url_file: Option<&Path>, stdin_is_terminal: bool) -> Self {
        if let Some(url) = url {
            UrlInput::Argument(url.to_string())
        } else if let Some(path) = url_file {
            UrlInput::File(path.to_path_buf())
        } else if !stdin_is_terminal {
            UrlInput::Stdin
        } else {
            UrlInput::None
        }
    }

    pub async fn read(&self) -> Result<Vec<String>, DownloaderError> {
        let urls = match self {
            UrlInput::Argument(url) => vec![url.clone()],
            UrlInput::File(path) => {
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| DownloaderError::UrlFile {
                        path: path.clone(),
                        source,
                    })?;
                parse_url_lines(&contents)
            }
            UrlInput::Stdin => {
                let mut contents = String::new();
                tokio::io::stdin().read_to_string(&mut contents).await?;
                parse_url_lines(&contents)
            }
            UrlInput::None => Vec::new(),
        };
        debug!("Read {} URLs from {:?}", urls.len(), self);
        Ok(urls)
    }
}

/// One URL per line; surrounding whitespace and blank lines are dropped.
pub fn parse_url_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn argument_wins_over_file_and_stdin() {
        let input = UrlInput::select(Some("example.com"), Some(Path::new("urls.txt")), false);
        assert_eq!(input, UrlInput::Argument("example.com".into()));
    }

    #[test]
    fn file_wins_over_stdin() {
        let input = UrlInput::select(None, Some(Path::new("urls.txt")), false);
        assert_eq!(input, UrlInput::File(PathBuf::from("urls.txt")));
    }

    #[test]
    fn piped_stdin_is_used_only_when_not_a_terminal() {
        assert_eq!(UrlInput::select(None, None, false), UrlInput::Stdin);
        assert_eq!(UrlInput::select(None, None, true), UrlInput::None);
    }

    #[test]
    fn lines_are_trimmed_and_blanks_skipped() {
        let urls = parse_url_lines("  example.com \n\n\texample.org/*\r\n   \n");
        assert_eq!(urls, vec!["example.com", "example.org/*"]);
    }

    #[tokio::test]
    async fn url_file_is_read_line_by_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "example.com\n\nexample.net").unwrap();

        let urls = UrlInput::File(file.path().to_path_buf()).read().await.unwrap();
        assert_eq!(urls, vec!["example.com", "example.net"]);
    }

    #[tokio::test]
    async fn missing_url_file_is_reported_with_its_path() {
        let err = UrlInput::File(PathBuf::from("/nonexistent/urls.txt"))
            .read()
            .await
            .unwrap_err();
        assert!(matches!(err, DownloaderError::UrlFile { .. }));
        assert!(err.to_string().contains("/nonexistent/urls.txt"));
    }
}

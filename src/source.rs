use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;

/// Published performance snapshot the dashboard reads when no source is given.
pub const DEFAULT_SOURCE: &str = "https://raw.githubusercontent.com/folefacb/DFIC-peformance-Tracker/refs/heads/main/performance_data_2025-04-05.csv";

/// Where the return CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    /// Fetch the whole resource as text.
    pub async fn fetch(&self) -> Result<String> {
        match self {
            DataSource::Url(url) => {
                let response = reqwest::get(url.as_str())
                    .await
                    .with_context(|| format!("Failed to fetch {}", url))?
                    .error_for_status()
                    .with_context(|| format!("Server rejected request for {}", url))?;
                response
                    .text()
                    .await
                    .with_context(|| format!("Failed to read response body from {}", url))
            }
            DataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::parse(DEFAULT_SOURCE)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

use anyhow::{Context, Result};
use filings_search::ARCHIVES_BASE_URL;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "filings-finder.toml";

pub const DEFAULT_INDEX_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/full-index/";

/// Runtime configuration for the finder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Directory holding `{year}_{QTRn}_company.idx` files
    pub data_dir: PathBuf,

    /// Prefix joined with a filing's `filename` to build its URL
    pub archive_base_url: String,

    /// Root of the quarterly full-index tree
    pub index_base_url: String,

    /// User-Agent sent with every download (the registry rejects anonymous clients)
    pub user_agent: String,

    /// Pause between download requests
    pub request_delay_ms: u64,

    /// Extra attempts per file after the first failure
    pub max_retries: u32,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            archive_base_url: ARCHIVES_BASE_URL.to_string(),
            index_base_url: DEFAULT_INDEX_BASE_URL.to_string(),
            user_agent: "filings-finder admin@example.com".to_string(),
            request_delay_ms: 1_000,
            max_retries: 2,
        }
    }
}

impl FinderConfig {
    /// Load from `path`, else from the default file if present, then apply env overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(dir) = env_non_empty("FILINGS_FINDER_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = env_non_empty("FILINGS_FINDER_ARCHIVE_URL") {
            self.archive_base_url = url;
        }
        if let Some(url) = env_non_empty("FILINGS_FINDER_INDEX_URL") {
            self.index_base_url = url;
        }
        if let Some(agent) = env_non_empty("FILINGS_FINDER_USER_AGENT") {
            self.user_agent = agent;
        }
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("finder.toml");
        fs::write(
            &path,
            "data_dir = \"/srv/edgar\"\nrequest_delay_ms = 250\n",
        )
        .unwrap();

        let config = FinderConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/edgar"));
        assert_eq!(config.request_delay_ms, 250);
        assert_eq!(config.archive_base_url, ARCHIVES_BASE_URL);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("finder.toml");
        fs::write(&path, "request_delay_ms = \"soon\"").unwrap();
        assert!(FinderConfig::from_file(&path).is_err());
    }
}

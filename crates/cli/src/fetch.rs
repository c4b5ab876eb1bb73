use crate::config::FinderConfig;
use anyhow::{Context, Result};
use filings_indexer::{index_file_name, Quarter};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// One quarterly index to download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchTarget {
    pub url: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchSummary {
    pub downloaded: Vec<PathBuf>,
    pub failed: Vec<FetchFailure>,
}

/// `{index_base}{year}/QTRn/company.idx` → `{dir}/{year}_QTRn_company.idx`, year then quarter
pub fn plan_targets(
    index_base_url: &str,
    start_year: i32,
    end_year: i32,
    quarters: &[Quarter],
    dir: &Path,
) -> Vec<FetchTarget> {
    let quarters: Vec<Quarter> = if quarters.is_empty() {
        Quarter::ALL.to_vec()
    } else {
        let mut sorted = quarters.to_vec();
        sorted.sort();
        sorted.dedup();
        sorted
    };
    let base = if index_base_url.ends_with('/') {
        index_base_url.to_string()
    } else {
        format!("{index_base_url}/")
    };

    let mut targets = Vec::new();
    for year in start_year..=end_year {
        for quarter in &quarters {
            targets.push(FetchTarget {
                url: format!("{base}{year}/{}/company.idx", quarter.label()),
                path: dir.join(index_file_name(year, *quarter)),
            });
        }
    }
    targets
}

/// Download every target sequentially, pausing between requests.
///
/// A file that keeps failing after the configured retries is recorded in the
/// summary; the batch always runs to the end.
pub async fn fetch_all(config: &FinderConfig, targets: &[FetchTarget]) -> Result<FetchSummary> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .build()
        .context("Failed to build HTTP client")?;
    let delay = Duration::from_millis(config.request_delay_ms);
    let mut summary = FetchSummary::default();

    for (i, target) in targets.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(delay).await;
        }
        log::info!("Attempting to download {}...", target.url);

        let mut attempt = 0;
        loop {
            match download(&client, target).await {
                Ok(bytes) => {
                    log::info!("Successfully downloaded {} ({bytes} bytes)", target.url);
                    summary.downloaded.push(target.path.clone());
                    break;
                }
                Err(err) if attempt < config.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "Download of {} failed ({err:#}), retry {attempt}/{}",
                        target.url,
                        config.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    log::warn!("Failed to download {}. Error: {err:#}", target.url);
                    summary.failed.push(FetchFailure {
                        url: target.url.clone(),
                        error: format!("{err:#}"),
                    });
                    break;
                }
            }
        }
    }

    Ok(summary)
}

/// Stream one file to a `.part` sibling, then move it into place
async fn download(client: &reqwest::Client, target: &FetchTarget) -> Result<u64> {
    let mut response = client
        .get(&target.url)
        .send()
        .await?
        .error_for_status()?;

    let partial = target.path.with_extension("idx.part");
    let mut file = tokio::fs::File::create(&partial)
        .await
        .with_context(|| format!("Failed to create {}", partial.display()))?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&partial, &target.path)
        .await
        .with_context(|| format!("Failed to move {} into place", partial.display()))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_year_then_quarter() {
        let targets = plan_targets(
            "https://www.sec.gov/Archives/edgar/full-index/",
            2022,
            2023,
            &[Quarter::Q2, Quarter::Q1],
            Path::new("idx"),
        );

        let urls: Vec<&str> = targets.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.sec.gov/Archives/edgar/full-index/2022/QTR1/company.idx",
                "https://www.sec.gov/Archives/edgar/full-index/2022/QTR2/company.idx",
                "https://www.sec.gov/Archives/edgar/full-index/2023/QTR1/company.idx",
                "https://www.sec.gov/Archives/edgar/full-index/2023/QTR2/company.idx",
            ]
        );
        assert_eq!(targets[3].path, Path::new("idx").join("2023_QTR2_company.idx"));
    }

    #[test]
    fn empty_quarter_list_means_all_and_base_gets_slash() {
        let targets = plan_targets("http://mirror/full-index", 2020, 2020, &[], Path::new("."));
        assert_eq!(targets.len(), 4);
        assert_eq!(targets[0].url, "http://mirror/full-index/2020/QTR1/company.idx");
    }

    #[test]
    fn inverted_range_plans_nothing() {
        assert!(plan_targets("http://x/", 2024, 2023, &[], Path::new(".")).is_empty());
    }
}

// src/fetch/client.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header;

use crate::archive::{file_name_for, PageKind};
use crate::config::ScrapeConfig;
use crate::utils::error::FetchError;
use crate::utils::AppError;

/// Ratings pages list 50 boxers each; the site pages by row offset.
const RATINGS_PAGE_SIZE: u64 = 50;
/// Career continuation pages start every 100 bouts.
const CAREER_PAGE_SIZE: u64 = 100;

/// Downloads pages into the archive, one request at a time.
pub struct Fetcher {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher with the configured User-Agent and request delay.
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// Site URL for one document key.
    pub fn page_url(&self, href: &str, key: &str, kind: PageKind) -> String {
        let path = match kind {
            PageKind::Fight => key.to_string(),
            PageKind::Ratings => match key.parse::<u64>() {
                Ok(page) => (page * RATINGS_PAGE_SIZE).to_string(),
                Err(_) => key.to_string(),
            },
            PageKind::Boxer => match key.split_once('-') {
                Some((boxer, page)) => match page.parse::<u64>() {
                    Ok(page) => format!("{}?&offset={}", boxer, page * CAREER_PAGE_SIZE),
                    Err(_) => key.to_string(),
                },
                None => key.to_string(),
            },
        };
        format!("{}{}{}", self.base_url, href, path)
    }

    /// Downloads one page after the fixed politeness delay.
    pub async fn download_page(&self, url: &str) -> Result<String, FetchError> {
        tracing::info!("Downloading page from: {}", url);
        tracing::debug!("Using User-Agent: {}", self.user_agent);

        tokio::time::sleep(self.delay).await;

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/html,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::FORBIDDEN {
                tracing::warn!("Received 403 Forbidden - the site is likely rate limiting this client.");
                return Err(FetchError::RateLimited);
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                tracing::warn!("Received 404 Not Found for URL: {}", url);
                return Err(FetchError::PageNotFound(url.to_string()));
            }
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Downloads each key's page and saves it under its archive file name.
    ///
    /// Failed downloads are logged and skipped; a rate-limit response stops
    /// the run since every later request would fail the same way.
    pub async fn fetch_into_archive(
        &self,
        href: &str,
        keys: &[String],
        kind: PageKind,
        archive_dir: &Path,
    ) -> Result<Vec<PathBuf>, AppError> {
        fs::create_dir_all(archive_dir)?;

        let mut saved = Vec::new();
        for (count, key) in keys.iter().enumerate() {
            let url = self.page_url(href, key, kind);
            match self.download_page(&url).await {
                Ok(body) => {
                    let path = archive_dir.join(file_name_for(key, kind));
                    fs::write(&path, body)?;
                    tracing::info!("Saved page {}/{} key={} to {}", count + 1, keys.len(), key, path.display());
                    saved.push(path);
                }
                Err(FetchError::RateLimited) => {
                    tracing::error!("Rate limited after {} pages, stopping", saved.len());
                    return Err(FetchError::RateLimited.into());
                }
                Err(e) => tracing::error!("Failed to download key={}: {}", key, e),
            }
        }
        Ok(saved)
    }
}

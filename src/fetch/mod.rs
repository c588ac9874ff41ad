// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Page carrying the monthly ranking tables.
pub const DEFAULT_URL: &str = "https://www.tiobe.com/tiobe-index/";

/// The site rejects obvious bots, so we present a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to fetch the ranking page.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default URL should parse"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// One blocking GET of the ranking page. Non-2xx statuses are errors.
#[instrument(level = "info", skip(config), fields(url = %config.url))]
pub fn fetch_page(config: &FetchConfig) -> Result<String> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .context("building HTTP client")?;

    info!("Request {}", config.url);
    let body = client
        .get(config.url.clone())
        .send()
        .with_context(|| format!("GET {} failed", config.url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", config.url))?
        .text()
        .with_context(|| format!("Reading text from {}", config.url))?;

    debug!(bytes = body.len(), "fetched page");
    Ok(body)
}

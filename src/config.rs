use std::time::Duration;

use anyhow::{Context, Result};
use dioxus::logger::tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_STATS_PAGE_LIMIT: u32 = 1000;
pub const DEFAULT_STATS_POLL_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_base_url: String,
    /// Rows per page in tables.
    pub page_limit: u32,
    /// Page size used when walking a whole collection for aggregate stats.
    pub stats_page_limit: u32,
    pub stats_poll_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            stats_page_limit: DEFAULT_STATS_PAGE_LIMIT,
            stats_poll_interval: Duration::from_secs(DEFAULT_STATS_POLL_SECS),
        }
    }
}

impl AppConfig {
    /// Reads the process environment, then values baked in at build time.
    ///
    /// The browser has no process environment, so web builds only ever see
    /// the `option_env!` values.
    pub fn from_env() -> Self {
        let lookup = |key: &str| std::env::var(key).ok().or_else(|| baked(key));
        match Self::from_lookup(lookup) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("[config] {e:#}; using defaults");
                Self::default()
            }
        }
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let api_base_url = lookup("DASHBOARD_API_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base_url);
        let page_limit = parse_positive(&lookup, "DASHBOARD_PAGE_LIMIT")?
            .map(|v| v as u32)
            .unwrap_or(defaults.page_limit);
        let stats_page_limit = parse_positive(&lookup, "DASHBOARD_STATS_PAGE_LIMIT")?
            .map(|v| v as u32)
            .unwrap_or(defaults.stats_page_limit);
        let stats_poll_interval = parse_positive(&lookup, "DASHBOARD_STATS_POLL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.stats_poll_interval);
        Ok(Self {
            api_base_url,
            page_limit,
            stats_page_limit,
            stats_poll_interval,
        })
    }
}

fn parse_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a positive integer, got {raw:?}"))?;
    if value == 0 || value > u32::MAX as u64 {
        anyhow::bail!("{key} out of range: {value}");
    }
    Ok(Some(value))
}

fn baked(key: &str) -> Option<String> {
    let value = match key {
        "DASHBOARD_API_URL" => option_env!("DASHBOARD_API_URL"),
        "DASHBOARD_PAGE_LIMIT" => option_env!("DASHBOARD_PAGE_LIMIT"),
        "DASHBOARD_STATS_PAGE_LIMIT" => option_env!("DASHBOARD_STATS_PAGE_LIMIT"),
        "DASHBOARD_STATS_POLL_SECS" => option_env!("DASHBOARD_STATS_POLL_SECS"),
        _ => None,
    };
    value.map(str::to_string)
}

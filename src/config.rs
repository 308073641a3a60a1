use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::scholar::client::{DEFAULT_SCHOLAR_BASE_URL, MAX_PAGE_SIZE};

/// Default pause between publication detail fetches.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;

/// Browser-like user agent; Scholar rejects obvious bot agents outright.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Central configuration loaded from environment variables.
///
/// Nothing here is required; every value has a default. The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scholar endpoint (SCHOLAR_BASE_URL). Override for mirrors or testing.
    pub scholar_base_url: String,
    /// Fixed courtesy delay between detail fetches (SCHOLAR_REQUEST_DELAY_MS).
    pub request_delay: Duration,
    /// Profile rows requested per page (SCHOLAR_PAGE_SIZE, max 100).
    pub page_size: usize,
    /// User-Agent header for every request (SCHOLAR_USER_AGENT).
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let delay_ms = match lookup("SCHOLAR_REQUEST_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SCHOLAR_REQUEST_DELAY_MS must be a whole number of milliseconds, got {raw:?}"))?,
            None => DEFAULT_REQUEST_DELAY_MS,
        };

        let page_size = match lookup("SCHOLAR_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("SCHOLAR_PAGE_SIZE must be a positive integer, got {raw:?}"))?,
            None => MAX_PAGE_SIZE,
        };
        if page_size == 0 {
            anyhow::bail!("SCHOLAR_PAGE_SIZE must be at least 1");
        }

        Ok(Self {
            scholar_base_url: lookup("SCHOLAR_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SCHOLAR_BASE_URL.to_string()),
            request_delay: Duration::from_millis(delay_ms),
            page_size: page_size.min(MAX_PAGE_SIZE),
            user_agent: lookup("SCHOLAR_USER_AGENT")
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

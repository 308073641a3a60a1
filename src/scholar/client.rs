// Google Scholar HTTP client: profile listing and citation detail pages.
//
// A thin reqwest wrapper with one generic HTML GET helper. Scholar serves
// these pages without authentication but throttles aggressive clients, so
// callers are expected to pace detail fetches (see pipeline::crawl).

use std::collections::HashSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::detail::parse_citation_page;
use super::profile::{parse_profile_page, ProfilePage};
use super::traits::{AuthorProfile, PublicationSource};
use crate::config::Config;
use crate::records::{RawPublication, UNKNOWN};

/// Default Scholar endpoint.
pub const DEFAULT_SCHOLAR_BASE_URL: &str = "https://scholar.google.com";

/// Largest page size Scholar accepts for profile listings.
pub const MAX_PAGE_SIZE: usize = 100;

/// Upper bound on profile pages fetched for one author.
pub const MAX_PROFILE_PAGES: usize = 100;

/// Unauthenticated client for Scholar citation pages.
pub struct ScholarClient {
    client: reqwest::Client,
    base_url: String,
    page_size: usize,
}

impl ScholarClient {
    /// Create a client for `base_url`. `page_size` is clamped to 1..=100.
    pub fn new(base_url: &str, user_agent: &str, page_size: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.scholar_base_url,
            &config.user_agent,
            config.page_size,
        )
    }

    /// GET `{base_url}{path}` with query parameters and return the body.
    async fn get_html(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);

        debug!(url = %url, "Scholar GET request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Scholar returned {status} for {url}");
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))
    }

    /// Fetch one page of an author's profile, starting at row `cstart`.
    pub async fn fetch_profile_page(&self, author_id: &str, cstart: usize) -> Result<ProfilePage> {
        let cstart = cstart.to_string();
        let page_size = self.page_size.to_string();
        let html = self
            .get_html(
                "/citations",
                &[
                    ("user", author_id),
                    ("hl", "en"),
                    ("cstart", cstart.as_str()),
                    ("pagesize", page_size.as_str()),
                ],
            )
            .await
            .with_context(|| format!("Failed to fetch profile page for {author_id}"))?;
        parse_profile_page(&html)
    }

    /// Fetch and parse the detail page for one citation ID.
    pub async fn fetch_citation(&self, citation_id: &str) -> Result<RawPublication> {
        let html = self
            .get_html(
                "/citations",
                &[
                    ("view_op", "view_citation"),
                    ("hl", "en"),
                    ("citation_for_view", citation_id),
                ],
            )
            .await
            .with_context(|| format!("Failed to fetch citation {citation_id}"))?;
        parse_citation_page(&html)
    }
}

#[async_trait]
impl PublicationSource for ScholarClient {
    async fn fetch_author(&self, author_id: &str) -> Result<AuthorProfile> {
        let mut name: Option<String> = None;
        let mut publications = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut cstart = 0;

        for page_number in 0..MAX_PROFILE_PAGES {
            let page = self.fetch_profile_page(author_id, cstart).await?;
            let rows = page.publications.len();

            if page_number == 0 {
                if page.name.is_none() && rows == 0 {
                    anyhow::bail!("No Google Scholar profile found for {author_id}");
                }
                name = page.name;
            }

            let collected_before = publications.len();
            let mut new_ids = 0;
            for stub in page.publications {
                match stub.str_field("author_pub_id") {
                    Some(id) if !seen_ids.insert(id.to_string()) => continue,
                    Some(_) => new_ids += 1,
                    None => {}
                }
                publications.push(stub);
            }

            debug!(
                cstart = cstart,
                page_rows = rows,
                added = publications.len() - collected_before,
                total_collected = publications.len(),
                "Fetched profile page for {}",
                author_id
            );

            if rows < self.page_size {
                break;
            }
            if new_ids == 0 {
                warn!(
                    author_id = author_id,
                    cstart = cstart,
                    "Profile page repeated earlier rows, stopping pagination"
                );
                break;
            }
            if page_number + 1 == MAX_PROFILE_PAGES {
                warn!(
                    author_id = author_id,
                    pages = MAX_PROFILE_PAGES,
                    "Profile page limit reached, stopping pagination"
                );
            }
            cstart += rows;
        }

        info!(
            count = publications.len(),
            author_id = author_id,
            "Collected publication stubs"
        );

        Ok(AuthorProfile {
            name: name.unwrap_or_else(|| UNKNOWN.to_string()),
            publications,
        })
    }

    async fn fill_publication(&self, publication: &RawPublication) -> Result<RawPublication> {
        let citation_id = publication
            .str_field("author_pub_id")
            .ok_or_else(|| anyhow::anyhow!("Publication has no citation ID to look up"))?;

        let detail = self.fetch_citation(citation_id).await?;
        let mut filled = publication.clone();
        filled.merge(detail);
        Ok(filled)
    }
}

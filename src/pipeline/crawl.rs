// Crawl pipeline: profile -> per-publication details -> normalized records.
//
// Strictly sequential. Each publication's detail page is fetched in turn
// with a fixed pause in between, because Scholar starts serving CAPTCHAs to
// clients that fetch too quickly. Failures on a single publication are logged
// and skipped; a failed profile lookup yields an empty outcome.

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::output::terminal::format_publication_line;
use crate::records::normalize::normalize;
use crate::records::{PublicationRecord, YearRange, UNKNOWN};
use crate::scholar::traits::PublicationSource;

/// Everything a crawl produced.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Author display name, or "Unknown" if the profile couldn't be fetched.
    pub author_name: String,
    /// Publications that passed the year filter, in profile order.
    pub publications: Vec<PublicationRecord>,
}

impl CrawlOutcome {
    fn empty() -> Self {
        Self {
            author_name: UNKNOWN.to_string(),
            publications: Vec::new(),
        }
    }
}

/// Run the crawl for one author.
///
/// `delay` is slept between successive detail fetches (not before the
/// first). Never fails: errors degrade to skipped items or an empty outcome.
pub async fn run(
    source: &dyn PublicationSource,
    author_id: &str,
    range: &YearRange,
    delay: Duration,
) -> CrawlOutcome {
    println!("Fetching author profile {author_id}...");

    let profile = match source.fetch_author(author_id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(author_id = author_id, error = %e, "Failed to fetch author profile");
            println!("  {} {e:#}", "Error fetching publications:".red());
            return CrawlOutcome::empty();
        }
    };

    println!("Author found: {}", profile.name.bold());
    println!("Total publications: {}", profile.publications.len());

    let pb = ProgressBar::new(profile.publications.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("  Details [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut publications = Vec::new();

    for (i, stub) in profile.publications.iter().enumerate() {
        let index = i + 1;
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let detail = match source.fill_publication(stub).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(index = index, error = %e, "Failed to fetch publication details, skipping");
                pb.inc(1);
                continue;
            }
        };

        match normalize(&detail, range) {
            Ok(Some(record)) => {
                print_above(&pb, &mut io::stdout(), &format_publication_line(index, &record));
                publications.push(record);
            }
            Ok(None) => {
                debug!(index = index, "Publication outside year range, skipping");
            }
            Err(e) => {
                warn!(index = index, error = %e, "Failed to process publication, skipping");
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        author = profile.name.as_str(),
        listed = profile.publications.len(),
        kept = publications.len(),
        "Crawl finished"
    );

    CrawlOutcome {
        author_name: profile.name,
        publications,
    }
}

/// Write a line to `out` with the bar cleared for the duration.
///
/// Unlike `ProgressBar::println`, this still writes when the bar is hidden
/// (stderr not a terminal), and the line lands on `out` rather than stderr.
fn print_above<W: Write>(pb: &ProgressBar, out: &mut W, line: &str) {
    if let Err(e) = pb.suspend(|| writeln!(out, "{line}")) {
        debug!(error = %e, "Failed to write progress line");
    }
}

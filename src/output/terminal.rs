// Colored terminal output for a crawl run.
//
// Everything the user reads while the tool runs goes through here; structured
// diagnostics go through tracing instead.

use std::path::Path;

use colored::Colorize;

use crate::records::{PublicationRecord, YearRange};
use crate::topics::keywords::KeywordFrequencyTable;

/// How many title characters a progress line shows.
const TITLE_PREVIEW_CHARS: usize = 50;

/// Print the run header: the author ID and the active year filter.
pub fn display_banner(author_id: &str, range: &YearRange) {
    let rule = "=".repeat(60);
    println!("{}", rule.dimmed());
    println!("{}", "GOOGLE SCHOLAR PUBLICATION CRAWLER".bold());
    println!("{}", rule.dimmed());
    println!("Scholar ID: {}", author_id.bold());
    if let Some(description) = range.describe() {
        println!("{description}");
    }
    println!();
}

/// One line per collected publication, e.g. `  [3] Deep learning for... (2021)`.
///
/// The title is cut at a character boundary, so non-ASCII titles are safe.
pub fn format_publication_line(index: usize, record: &PublicationRecord) -> String {
    let title: String = record.title.chars().take(TITLE_PREVIEW_CHARS).collect();
    let year = record
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "n.d.".to_string());
    format!("  [{index}] {title}... ({})", year.dimmed())
}

/// Print the most frequent keywords with their counts.
pub fn display_top_keywords(keywords: &KeywordFrequencyTable, n: usize) {
    let top = keywords.most_common(n);
    if top.is_empty() {
        return;
    }

    println!("\n{}", "Top keywords:".bold());
    let width = top.iter().map(|(word, _)| word.chars().count()).max().unwrap_or(0);
    for (word, count) in top {
        println!("  {word:<width$}  {}", count.to_string().cyan());
    }
}

/// Print the files a run produced.
pub fn display_artifacts(paths: &[&Path]) {
    println!("\n{}", "Done.".green().bold());
    println!("Generated files:");
    for path in paths {
        println!("  - {}", path.display());
    }
}

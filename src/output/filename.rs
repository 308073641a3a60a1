// Output filenames derived from the author's name and the year filter.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::records::{YearRange, UNKNOWN};

/// Default `--output` value; leaving it untouched asks for a generated name.
pub const DEFAULT_SPREADSHEET_NAME: &str = "output.xlsx";
/// Default `--wordcloud` value; same semantics as the spreadsheet default.
pub const DEFAULT_WORDCLOUD_NAME: &str = "wordcloud.png";

const FALLBACK_AUTHOR: &str = "unknown_author";
const MAX_AUTHOR_CHARS: usize = 50;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("invalid-char pattern is valid"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// `{base}_{author}{year_suffix}.{extension}`
pub fn generate_filename(
    base_name: &str,
    author_name: &str,
    start_year: Option<i32>,
    end_year: Option<i32>,
    extension: &str,
) -> String {
    let author = sanitize_author_name(author_name);
    let suffix = year_suffix(start_year, end_year);
    format!("{base_name}_{author}{suffix}.{extension}")
}

/// Reduce an author's display name to a lowercase, filename-safe token.
pub fn sanitize_author_name(name: &str) -> String {
    if name.is_empty() || name == UNKNOWN {
        return FALLBACK_AUTHOR.to_string();
    }

    let cleaned = INVALID_CHARS.replace_all(name, "");
    let cleaned = WHITESPACE_RUN.replace_all(&cleaned, "_");
    let ascii: String = cleaned
        .chars()
        .filter(char::is_ascii)
        .take(MAX_AUTHOR_CHARS)
        .collect();
    let trimmed = ascii.trim_matches('_');

    if trimmed.is_empty() {
        FALLBACK_AUTHOR.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// Only a differing start and end produce a span; an equal pair is
/// formatted like a start year alone.
pub fn year_suffix(start_year: Option<i32>, end_year: Option<i32>) -> String {
    match (start_year, end_year) {
        (Some(start), Some(end)) if start != end => format!("_{start}-{end}"),
        (Some(start), _) => format!("_{start}"),
        (None, Some(end)) => format!("_-{end}"),
        (None, None) => String::new(),
    }
}

/// Use `requested` unless it is still the CLI default, in which case
/// generate a name from the author and year range.
pub fn resolve_output_path(
    requested: &str,
    default: &str,
    base_name: &str,
    author_name: &str,
    range: &YearRange,
    extension: &str,
) -> PathBuf {
    if requested == default {
        PathBuf::from(generate_filename(
            base_name,
            author_name,
            range.start,
            range.end,
            extension,
        ))
    } else {
        PathBuf::from(requested)
    }
}

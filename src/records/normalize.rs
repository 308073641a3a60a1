// Record normalization: raw scraped document to PublicationRecord.
//
// Out-of-range records come back as Ok(None). Malformed ones (a title that
// isn't text, a citation count that isn't a number) are errors; callers log
// and skip them rather than aborting the run.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use super::venue::resolve_venue;
use super::year::extract_year;
use super::{PublicationRecord, RawPublication, YearRange, UNKNOWN};

/// Normalize one raw publication, applying the year filter first.
pub fn normalize(raw: &RawPublication, range: &YearRange) -> Result<Option<PublicationRecord>> {
    let year = extract_year(raw);
    if !range.contains(year) {
        return Ok(None);
    }

    let title = text_field(raw.bib_field("title")).context("Invalid title field")?;
    let authors = authors_field(raw.bib_field("author")).context("Invalid author field")?;
    let citation_count = citation_count(raw.field("num_citations"))
        .context("Invalid citation count")?;

    Ok(Some(PublicationRecord {
        title,
        venue: resolve_venue(raw),
        year,
        authors,
        citation_count,
    }))
}

/// Normalize a batch, logging and skipping records that fail to parse.
pub fn normalize_all(raws: &[RawPublication], range: &YearRange) -> Vec<PublicationRecord> {
    let mut records = Vec::with_capacity(raws.len());
    for (i, raw) in raws.iter().enumerate() {
        match normalize(raw, range) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => debug!(index = i + 1, "Publication outside year range, skipping"),
            Err(e) => warn!(index = i + 1, error = %e, "Failed to normalize publication, skipping"),
        }
    }
    records
}

/// A trimmed string, or "Unknown" when missing or blank. Non-string values
/// are rejected.
fn text_field(value: Option<&Value>) -> Result<String> {
    match value {
        None | Some(Value::Null) => Ok(UNKNOWN.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(UNKNOWN.to_string()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => anyhow::bail!("expected text, found {other}"),
    }
}

/// Authors as a single display string. Accepts either a preformatted string
/// or a list of names.
fn authors_field(value: Option<&Value>) -> Result<String> {
    match value {
        Some(Value::Array(names)) => {
            let names = names
                .iter()
                .map(|name| {
                    name.as_str()
                        .map(str::trim)
                        .ok_or_else(|| anyhow::anyhow!("expected author name, found {name}"))
                })
                .collect::<Result<Vec<_>>>()?;
            let joined = names.join(", ");
            if joined.is_empty() {
                Ok(UNKNOWN.to_string())
            } else {
                Ok(joined)
            }
        }
        other => text_field(other),
    }
}

fn citation_count(value: Option<&Value>) -> Result<u32> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| anyhow::anyhow!("not a citation count: {n}")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .with_context(|| format!("not a citation count: {s:?}")),
        Some(other) => anyhow::bail!("not a citation count: {other}"),
    }
}

// Venue resolution: find a journal/conference/publisher name for a record.
//
// Scholar's citation pages are inconsistent about which field carries the
// venue, and many entries carry none at all. We try the bibliographic fields
// first, then infer a publisher from the publication URL's host, then look
// for an arXiv eprint link.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{RawPublication, UNKNOWN};

/// `bib` fields checked for an explicit venue, highest priority first.
pub const VENUE_FIELDS: [&str; 5] = ["venue", "journal", "booktitle", "conference", "publisher"];

/// Host substrings mapped to canonical venue names. Checked in order, so
/// "sciencedirect" must stay ahead of "science".
pub const PUBLISHER_DOMAINS: &[(&str, &str)] = &[
    ("arxiv", "arXiv"),
    ("researchgate", "ResearchGate"),
    ("ieee", "IEEE"),
    ("acm", "ACM"),
    ("springer", "Springer"),
    ("elsevier", "Elsevier"),
    ("sciencedirect", "ScienceDirect"),
    ("wiley", "Wiley"),
    ("nature", "Nature"),
    ("science", "Science"),
    ("plos", "PLOS"),
    ("mdpi", "MDPI"),
    ("frontiers", "Frontiers"),
];

/// `\b` and `\d` are Unicode-aware: "2021é" is one word, not a year.
static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year token pattern is valid"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Resolve the venue for a raw publication. Never returns an empty string.
///
/// Free-text venues from `bib` go through [`clean_venue`]; canonical names
/// inferred from URLs are returned as listed in [`PUBLISHER_DOMAINS`].
pub fn resolve_venue(raw: &RawPublication) -> String {
    if let Some(venue) = venue_from_fields(raw) {
        return clean_venue(&venue);
    }

    raw.str_field("pub_url")
        .and_then(venue_from_url)
        .or_else(|| raw.str_field("eprint_url").and_then(venue_from_eprint))
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// First non-blank venue field from `bib`, trimmed.
pub fn venue_from_fields(raw: &RawPublication) -> Option<String> {
    VENUE_FIELDS
        .iter()
        .filter_map(|field| raw.bib_str(field))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Canonical publisher name for a publication URL, matched on its host.
///
/// URLs without a scheme have no host and never match.
pub fn venue_from_url(pub_url: &str) -> Option<&'static str> {
    let parsed = Url::parse(pub_url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    PUBLISHER_DOMAINS
        .iter()
        .find(|(needle, _)| host.contains(needle))
        .map(|(_, name)| *name)
}

/// "arXiv" if the eprint link points anywhere on arXiv.
pub fn venue_from_eprint(eprint_url: &str) -> Option<&'static str> {
    eprint_url
        .to_lowercase()
        .contains("arxiv")
        .then_some("arXiv")
}

/// Strip year tokens, collapse whitespace, and re-case.
///
/// Anything longer than three characters that isn't already fully
/// uppercase is title-cased. This also re-cases mixed-case names
/// ("IEEE Access" becomes "Ieee Access"); only all-caps acronyms survive.
pub fn clean_venue(venue: &str) -> String {
    let without_years = YEAR_TOKEN.replace_all(venue, "");
    let collapsed = WHITESPACE_RUN
        .replace_all(without_years.trim(), " ")
        .into_owned();

    if collapsed.is_empty() {
        return UNKNOWN.to_string();
    }

    if collapsed.chars().count() > 3 && collapsed.to_uppercase() != collapsed {
        title_case(&collapsed)
    } else {
        collapsed
    }
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

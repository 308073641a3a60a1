// Publication records: raw scraped documents and their normalized form.
//
// The fetcher hands us loosely-structured documents (whatever fields the
// citation page happened to expose). The normalizer turns each one into a
// flat PublicationRecord with a resolved venue, or skips it.

pub mod normalize;
pub mod raw;
pub mod venue;
pub mod year;

use serde::Serialize;

pub use raw::RawPublication;
pub use year::YearRange;

/// Sentinel used for any text field the source didn't provide.
pub const UNKNOWN: &str = "Unknown";

/// A single publication, flattened to the columns we report on.
///
/// Field renames double as the CSV/spreadsheet header names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRecord {
    #[serde(rename = "Title")]
    pub title: String,
    /// Never empty; falls back to [`UNKNOWN`].
    #[serde(rename = "Venue")]
    pub venue: String,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "Citations")]
    pub citation_count: u32,
}

impl PublicationRecord {
    /// Whether this record's title should feed the keyword corpus.
    pub fn has_title(&self) -> bool {
        self.title != UNKNOWN
    }
}

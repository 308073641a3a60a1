// Publication year extraction and inclusive year-range filtering.

use serde_json::Value;

use super::RawPublication;

/// Inclusive `[start, end]` filter. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    pub fn new(start: Option<i32>, end: Option<i32>) -> Self {
        Self { start, end }
    }

    /// Build a range from CLI flags. `year` is a convenience shorthand that
    /// only applies when neither explicit bound was given.
    pub fn from_cli(start: Option<i32>, end: Option<i32>, year: Option<i32>) -> Self {
        match (start, end, year) {
            (None, None, Some(year)) => Self::new(Some(year), Some(year)),
            _ => Self::new(start, end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether a publication with this year passes the filter.
    ///
    /// Publications without a known year are never filtered out.
    pub fn contains(&self, year: Option<i32>) -> bool {
        let Some(year) = year else {
            return true;
        };
        if self.start.is_some_and(|start| year < start) {
            return false;
        }
        if self.end.is_some_and(|end| year > end) {
            return false;
        }
        true
    }

    /// Human-readable description for the run banner, if any bound is set.
    pub fn describe(&self) -> Option<String> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(format!("Year range: {start}-{end}")),
            (Some(start), None) => Some(format!("Start year: {start}")),
            (None, Some(end)) => Some(format!("End year: {end}")),
            (None, None) => None,
        }
    }

    /// Annotation appended to the word-cloud title.
    pub fn title_suffix(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => format!(" ({start}-{end})"),
            (Some(start), None) => format!(" ({start}+)"),
            (None, Some(end)) => format!(" (-{end})"),
            (None, None) => String::new(),
        }
    }
}

/// Extract the publication year: top-level `pub_year` first, then
/// `bib.pub_year`. The first value that parses wins; unparseable values
/// count as absent.
pub fn extract_year(raw: &RawPublication) -> Option<i32> {
    raw.field("pub_year")
        .and_then(parse_year)
        .or_else(|| raw.bib_field("pub_year").and_then(parse_year))
}

fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// Title keyword extraction and frequency counting.
//
// All eligible titles are joined into one corpus, stripped down to lowercase
// words, and filtered against the stopword set. What remains is counted into
// a KeywordFrequencyTable that feeds the word cloud.

use std::collections::HashMap;

use super::stopwords::StopwordSet;
use crate::records::PublicationRecord;

/// Shortest token (in characters) that counts as a keyword.
pub const MIN_KEYWORD_LEN: usize = 4;

/// Word -> occurrence count, remembering first-occurrence order so that
/// ties in [`most_common`](Self::most_common) come out deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFrequencyTable {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl KeywordFrequencyTable {
    /// Count an already-filtered keyword sequence.
    pub fn from_keywords<I>(keywords: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut table = Self::default();
        for keyword in keywords {
            match table.counts.get_mut(&keyword) {
                Some(count) => *count += 1,
                None => {
                    table.order.push(keyword.clone());
                    table.counts.insert(keyword, 1);
                }
            }
        }
        table
    }

    /// Extract and count keywords from every titled publication.
    pub fn from_publications(publications: &[PublicationRecord], stopwords: &StopwordSet) -> Self {
        Self::from_keywords(keywords_from_publications(publications, stopwords))
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total keyword occurrences.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Up to `n` keywords, highest count first; ties keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }

    /// Keywords in first-seen order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order
            .iter()
            .map(|word| (word.as_str(), self.counts.get(word).copied().unwrap_or(0)))
    }
}

/// Keywords from the titles of `publications`, skipping "Unknown" titles.
pub fn keywords_from_publications(
    publications: &[PublicationRecord],
    stopwords: &StopwordSet,
) -> Vec<String> {
    extract_keywords(
        publications
            .iter()
            .filter(|p| p.has_title())
            .map(|p| p.title.as_str()),
        stopwords,
    )
}

/// Join titles, normalize, tokenize and filter. Order of the returned
/// keywords follows their order in the titles.
pub fn extract_keywords<'a, I>(titles: I, stopwords: &StopwordSet) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let corpus = titles.into_iter().collect::<Vec<_>>().join(" ");
    clean_text(&corpus)
        .split_whitespace()
        .filter(|token| is_keyword(token, stopwords))
        .map(str::to_string)
        .collect()
}

/// Lowercase, turn punctuation and digit runs into spaces, collapse
/// whitespace.
pub fn clean_text(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_numeric() {
                ' '
            } else if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_keyword(token: &str, stopwords: &StopwordSet) -> bool {
    token.chars().count() >= MIN_KEYWORD_LEN
        && !token.chars().all(|c| c.is_ascii_digit())
        && !stopwords.contains(token)
        && has_distinct_chars(token)
}

/// Rejects degenerate repeats like "aaaa".
fn has_distinct_chars(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => chars.any(|c| c != first),
        None => false,
    }
}

// Unit tests for title keyword extraction.
//
// Tests token filtering (length, digits, stopwords, degenerate repeats),
// exclusion of "Unknown" titles, and frequency counting.

use scholar_cloud::records::PublicationRecord;
use scholar_cloud::topics::keywords::{
    extract_keywords, keywords_from_publications, KeywordFrequencyTable, MIN_KEYWORD_LEN,
};
use scholar_cloud::topics::stopwords::StopwordSet;

fn record(title: &str) -> PublicationRecord {
    PublicationRecord {
        title: title.to_string(),
        venue: "Nature".to_string(),
        year: Some(2021),
        authors: "A. Author".to_string(),
        citation_count: 0,
    }
}

// ============================================================
// Token filtering
// ============================================================

#[test]
fn no_keyword_is_shorter_than_minimum() {
    let stopwords = StopwordSet::from_words(Vec::<String>::new());
    let keywords = extract_keywords(["A new IoT mesh for big sensor nets"], &stopwords);
    assert!(keywords.iter().all(|k| k.chars().count() >= MIN_KEYWORD_LEN));
    assert_eq!(keywords, vec!["mesh", "sensor", "nets"]);
}

#[test]
fn digits_never_survive() {
    let stopwords = StopwordSet::from_words(Vec::<String>::new());
    let keywords = extract_keywords(["COVID19 spread in 2020 and 2021: 12345 cases"], &stopwords);
    assert!(keywords.iter().all(|k| !k.chars().any(|c| c.is_ascii_digit())));
    assert_eq!(keywords, vec!["covid", "spread", "cases"]);
}

#[test]
fn stopwords_are_removed() {
    let stopwords = StopwordSet::new();
    let keywords = extract_keywords(
        [
            "A Survey of Deep Learning Approaches for Protein Folding",
            "Analisis sentimen menggunakan jaringan saraf tiruan",
        ],
        &stopwords,
    );
    assert!(keywords.iter().all(|k| !stopwords.contains(k)));
    assert!(keywords.contains(&"protein".to_string()));
    assert!(keywords.contains(&"folding".to_string()));
    assert!(keywords.contains(&"sentimen".to_string()));
    assert!(!keywords.contains(&"survey".to_string()));
    assert!(!keywords.contains(&"analisis".to_string()));
}

#[test]
fn single_repeated_character_is_rejected() {
    let stopwords = StopwordSet::from_words(Vec::<String>::new());
    let keywords = extract_keywords(["aaaa zzzzzz graph"], &stopwords);
    assert_eq!(keywords, vec!["graph"]);
}

#[test]
fn punctuation_splits_words() {
    let stopwords = StopwordSet::from_words(Vec::<String>::new());
    let keywords = extract_keywords(["Graph-based retrieval: (revisited)"], &stopwords);
    assert_eq!(keywords, vec!["graph", "based", "retrieval", "revisited"]);
}

#[test]
fn empty_input_yields_nothing() {
    let stopwords = StopwordSet::new();
    assert!(extract_keywords(Vec::<&str>::new(), &stopwords).is_empty());
    assert!(extract_keywords(["", "   "], &stopwords).is_empty());
}

// ============================================================
// Publication titles
// ============================================================

#[test]
fn unknown_titles_are_excluded() {
    let stopwords = StopwordSet::from_words(Vec::<String>::new());
    let publications = vec![record("Unknown"), record("Quantum annealing")];
    let keywords = keywords_from_publications(&publications, &stopwords);
    assert_eq!(keywords, vec!["quantum", "annealing"]);
}

#[test]
fn word_unknown_inside_a_real_title_is_kept() {
    let stopwords = StopwordSet::from_words(Vec::<String>::new());
    let publications = vec![record("Unknown unknowns")];
    let keywords = keywords_from_publications(&publications, &stopwords);
    assert_eq!(keywords, vec!["unknown", "unknowns"]);
}

// ============================================================
// Frequency table
// ============================================================

#[test]
fn counts_across_titles() {
    let stopwords = StopwordSet::from_words(["learning", "devices", "caching"]);
    let publications = vec![
        record("Federated learning on edge devices"),
        record("Privacy in federated learning"),
        record("Edge caching for federated inference"),
    ];
    let table = KeywordFrequencyTable::from_publications(&publications, &stopwords);

    assert_eq!(table.get("federated"), 3);
    assert_eq!(table.get("edge"), 2);
    assert_eq!(table.get("privacy"), 1);
    assert_eq!(table.get("missing"), 0);
    assert_eq!(table.most_common(1), vec![("federated", 3)]);
}

#[test]
fn table_total_matches_keyword_count() {
    let stopwords = StopwordSet::from_words(["neural"]);
    let publications = vec![record("Spiking neural networks"), record("Neural decoding")];
    let keywords = keywords_from_publications(&publications, &stopwords);
    let table = KeywordFrequencyTable::from_publications(&publications, &stopwords);
    assert_eq!(table.total(), keywords.len());
}

#[test]
fn most_common_caps_at_table_size() {
    let table = KeywordFrequencyTable::from_keywords(["graph".to_string()]);
    assert_eq!(table.most_common(10).len(), 1);
    assert!(KeywordFrequencyTable::default().most_common(10).is_empty());
}

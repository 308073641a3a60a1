// Composition tests: the crawl pipeline and reporters wired together.
//
// A fake PublicationSource stands in for Google Scholar so the full
// fetch -> normalize -> report path runs without a network. Output files go
// to temporary directories.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;
use tokio::time::Instant;

use scholar_cloud::output::spreadsheet::save_publications;
use scholar_cloud::output::wordcloud::{generate_word_cloud, CloudReport};
use scholar_cloud::pipeline::crawl;
use scholar_cloud::records::normalize::normalize_all;
use scholar_cloud::records::{PublicationRecord, RawPublication, YearRange, UNKNOWN};
use scholar_cloud::scholar::traits::{AuthorProfile, PublicationSource};
use scholar_cloud::topics::stopwords::StopwordSet;

// ============================================================
// Fake source
// ============================================================

/// In-memory source: stubs carry an `author_pub_id`, details are looked up
/// by that ID. A missing ID fails that one publication. Records when each
/// detail fetch happened.
struct FakeSource {
    profile: Option<AuthorProfile>,
    details: HashMap<String, RawPublication>,
    fill_times: Mutex<Vec<Instant>>,
}

impl FakeSource {
    fn new(name: &str, documents: Vec<serde_json::Value>) -> Self {
        let mut stubs = Vec::new();
        let mut details = HashMap::new();
        for (i, document) in documents.into_iter().enumerate() {
            let id = format!("pub{i}");
            let mut stub = RawPublication::new();
            stub.set_field("author_pub_id", id.clone());
            stubs.push(stub);
            details.insert(id, RawPublication::from(document));
        }
        Self {
            profile: Some(AuthorProfile {
                name: name.to_string(),
                publications: stubs,
            }),
            details,
            fill_times: Mutex::new(Vec::new()),
        }
    }

    fn offline() -> Self {
        Self {
            profile: None,
            details: HashMap::new(),
            fill_times: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PublicationSource for FakeSource {
    async fn fetch_author(&self, author_id: &str) -> Result<AuthorProfile> {
        self.profile
            .clone()
            .ok_or_else(|| anyhow!("no profile for {author_id}"))
    }

    async fn fill_publication(&self, publication: &RawPublication) -> Result<RawPublication> {
        self.fill_times.lock().unwrap().push(Instant::now());
        let id = publication
            .str_field("author_pub_id")
            .ok_or_else(|| anyhow!("stub without ID"))?;
        let detail = self
            .details
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("detail page for {id} unavailable"))?;
        let mut filled = publication.clone();
        filled.merge(detail);
        Ok(filled)
    }
}

fn three_documents() -> Vec<serde_json::Value> {
    vec![
        json!({
            "bib": { "title": "Old congestion control work", "pub_year": "2018", "journal": "ToN" }
        }),
        json!({
            "bib": {
                "title": "Programmable packet scheduling at line rate",
                "venue": "ACM SIGCOMM 2021",
                "pub_year": "2021",
                "author": "A. Author and B. Author"
            },
            "num_citations": 42
        }),
        json!({
            "bib": { "title": "Learned congestion control", "pub_year": 2022 },
            "pub_url": "https://arxiv.org/abs/2201.00001"
        }),
    ]
}

fn record(title: &str) -> PublicationRecord {
    PublicationRecord {
        title: title.to_string(),
        venue: "Nature".to_string(),
        year: Some(2020),
        authors: "A. Author, B. Author".to_string(),
        citation_count: 7,
    }
}

// ============================================================
// Normalization end to end
// ============================================================

#[test]
fn three_raw_records_normalize_to_two() {
    let raws: Vec<RawPublication> = three_documents()
        .into_iter()
        .map(RawPublication::from)
        .collect();
    let records = normalize_all(&raws, &YearRange::new(Some(2020), None));

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.venue != UNKNOWN));
    assert_eq!(records[0].venue, "ACM SIGCOMM");
    assert_eq!(records[0].citation_count, 42);
    assert_eq!(records[1].venue, "arXiv");
    assert_eq!(records[1].year, Some(2022));
}

// ============================================================
// Crawl pipeline
// ============================================================

#[tokio::test]
async fn crawl_filters_and_resolves_venues() {
    let source = FakeSource::new("Grace Hopper", three_documents());
    let range = YearRange::new(Some(2020), None);

    let outcome = crawl::run(&source, "XYZ", &range, Duration::ZERO).await;

    assert_eq!(outcome.author_name, "Grace Hopper");
    assert_eq!(outcome.publications.len(), 2);
    assert_eq!(outcome.publications[0].venue, "ACM SIGCOMM");
    assert_eq!(outcome.publications[0].authors, "A. Author and B. Author");
    assert_eq!(outcome.publications[1].venue, "arXiv");
    assert_eq!(outcome.publications[1].authors, UNKNOWN);
}

#[tokio::test]
async fn crawl_without_profile_is_empty_and_unknown() {
    let source = FakeSource::offline();
    let outcome = crawl::run(&source, "XYZ", &YearRange::default(), Duration::ZERO).await;

    assert_eq!(outcome.author_name, UNKNOWN);
    assert!(outcome.publications.is_empty());
}

#[tokio::test]
async fn failed_detail_skips_only_that_publication() {
    let mut source = FakeSource::new("Grace Hopper", three_documents());
    source.details.remove("pub1");

    let outcome = crawl::run(&source, "XYZ", &YearRange::default(), Duration::ZERO).await;

    let titles: Vec<&str> = outcome.publications.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Old congestion control work", "Learned congestion control"]
    );
}

#[tokio::test]
async fn malformed_record_is_skipped() {
    let source = FakeSource::new(
        "Grace Hopper",
        vec![
            json!({ "bib": { "title": ["not", "a", "string"] } }),
            json!({ "bib": { "title": "Fine record" } }),
        ],
    );

    let outcome = crawl::run(&source, "XYZ", &YearRange::default(), Duration::ZERO).await;

    assert_eq!(outcome.publications.len(), 1);
    assert_eq!(outcome.publications[0].title, "Fine record");
    assert_eq!(outcome.publications[0].venue, UNKNOWN);
}

#[tokio::test(start_paused = true)]
async fn courtesy_delay_separates_detail_fetches() {
    let source = FakeSource::new("Grace Hopper", three_documents());
    let delay = Duration::from_millis(30);
    let started = Instant::now();

    let outcome = crawl::run(&source, "XYZ", &YearRange::default(), delay).await;

    let elapsed = started.elapsed();
    assert_eq!(outcome.publications.len(), 3);
    assert!(elapsed >= delay * 2, "elapsed {elapsed:?}");
    assert!(elapsed < delay * 3, "elapsed {elapsed:?}");

    let times = source.fill_times.lock().unwrap().clone();
    assert_eq!(times.len(), 3);
    // No pause before the first fetch, one full pause before each later one
    assert!(times[0] - started < delay);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= delay);
    }
}

#[tokio::test(start_paused = true)]
async fn failed_fetches_still_pace_the_next_one() {
    let mut source = FakeSource::new("Grace Hopper", three_documents());
    source.details.remove("pub0");
    let delay = Duration::from_millis(30);

    crawl::run(&source, "XYZ", &YearRange::default(), delay).await;

    let times = source.fill_times.lock().unwrap().clone();
    assert_eq!(times.len(), 3);
    assert!(times[1] - times[0] >= delay);
}

#[tokio::test]
async fn empty_profile_yields_no_publications() {
    let source = FakeSource::new("Grace Hopper", Vec::new());
    let outcome = crawl::run(&source, "XYZ", &YearRange::default(), Duration::ZERO).await;

    assert_eq!(outcome.author_name, "Grace Hopper");
    assert!(outcome.publications.is_empty());
}

// ============================================================
// Word cloud
// ============================================================

#[test]
fn word_cloud_on_empty_list_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloud.png");

    let report =
        generate_word_cloud(&[], &StopwordSet::new(), &path, &YearRange::default()).unwrap();

    assert!(matches!(report, CloudReport::NothingToRender));
    assert!(!path.exists());
}

#[test]
fn word_cloud_without_keywords_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloud.png");
    let publications = vec![record("Unknown"), record("A study of the")];

    let report = generate_word_cloud(
        &publications,
        &StopwordSet::new(),
        &path,
        &YearRange::default(),
    )
    .unwrap();

    assert!(matches!(report, CloudReport::NoKeywords));
    assert!(!path.exists());
}

#[test]
fn word_cloud_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloud.png");
    let publications = vec![
        record("Quantum annealing for protein folding"),
        record("Protein structure prediction with quantum circuits"),
        record("Folding pathways under thermal noise"),
    ];

    let report = generate_word_cloud(
        &publications,
        &StopwordSet::new(),
        &path,
        &YearRange::new(Some(2019), Some(2021)),
    )
    .unwrap();

    match report {
        CloudReport::Rendered { placed, keywords } => {
            assert!(placed > 0);
            assert_eq!(keywords.get("protein"), 2);
        }
        other => panic!("expected a rendered cloud, got {other:?}"),
    }

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

// ============================================================
// Spreadsheet
// ============================================================

#[test]
fn csv_export_has_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pubs.csv");
    let mut undated = record("Routing, revisited");
    undated.year = None;

    save_publications(&[record("Packet scheduling"), undated], &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Title,Venue,Year,Authors,Citations");
    assert_eq!(lines[1], "Packet scheduling,Nature,2020,\"A. Author, B. Author\",7");
    assert_eq!(lines[2], "\"Routing, revisited\",Nature,,\"A. Author, B. Author\",7");
    assert_eq!(lines.len(), 3);
}

/// Read one part of an xlsx (zip) container as text.
fn xlsx_part(path: &Path, name: &str) -> String {
    let file = File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn xlsx_export_has_header_and_blank_missing_year() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pubs.xlsx");
    let undated = PublicationRecord {
        year: None,
        ..record("Routing revisited")
    };

    save_publications(&[record("Packet scheduling"), undated], &path).unwrap();

    let strings = xlsx_part(&path, "xl/sharedStrings.xml");
    for header in ["Title", "Venue", "Year", "Authors", "Citations"] {
        assert!(strings.contains(&format!("<t>{header}</t>")), "missing header {header}");
    }
    assert!(strings.contains("<t>Routing revisited</t>"));

    let sheet = xlsx_part(&path, "xl/worksheets/sheet1.xml");
    // Column C is Year: filled on row 2, absent on row 3
    assert!(sheet.contains(r#"r="C2""#));
    assert!(sheet.contains("<v>2020</v>"));
    assert!(!sheet.contains(r#"r="C3""#));
    assert!(sheet.contains(r#"r="D3""#));
    assert!(sheet.contains(r#"r="E3""#));
}

#[test]
fn export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("pubs.csv");

    assert!(save_publications(&[record("Packet scheduling")], &path).is_err());
}

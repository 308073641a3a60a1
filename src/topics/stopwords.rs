// Stopword set: English and Indonesian function words plus academic filler.
//
// Publication titles are dominated by words like "analysis", "approach" or
// "sistem" that say nothing about what an author actually works on. The
// language lists come from the `stop-words` crate; the academic list is
// fixed and compiled in.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

/// Generic research vocabulary (English and Indonesian) plus common
/// structural words that would otherwise dominate every word cloud.
pub const ACADEMIC_STOPWORDS: &[&str] = &[
    // English academic terms
    "using", "based", "approach", "study", "analysis", "method", "methods",
    "research", "paper", "article", "journal", "conference", "proceedings",
    "international", "national", "annual", "ieee", "acm", "springer",
    "publication", "published", "publisher", "vol", "volume", "issue",
    "page", "pages", "pp", "isbn", "issn", "doi", "abstract", "keywords",
    "introduction", "conclusion", "discussion", "results", "methodology",
    "literature", "review", "survey", "overview", "summary", "case",
    "cases", "example", "examples", "sample", "samples", "test", "tests",
    "testing", "evaluation", "experiment", "experiments", "experimental",
    "empirical", "theoretical", "practical", "application", "applications",
    "implementation", "development", "design", "framework", "model",
    "models", "modeling", "modelling", "algorithm", "algorithms",
    "technique", "techniques", "technology", "technologies", "system",
    "systems", "platform", "platforms", "tool", "tools", "software",
    "hardware", "computer", "computing", "digital", "electronic",
    "automatic", "automated", "manual", "performance", "efficiency",
    "effectiveness", "optimization", "optimal", "solution", "solutions",
    "problem", "problems", "issues", "challenge", "challenges",
    // Indonesian academic terms
    "penelitian", "studi", "analisis", "metode", "pendekatan", "kajian",
    "jurnal", "konferensi", "prosiding", "internasional", "nasional",
    "publikasi", "artikel", "makalah", "abstrak", "kata", "kunci",
    "pengantar", "pendahuluan", "kesimpulan", "diskusi", "hasil",
    "metodologi", "literatur", "tinjauan", "survei", "ringkasan",
    "contoh", "sampel", "uji", "pengujian", "evaluasi", "eksperimen",
    "empiris", "teoritis", "praktis", "aplikasi", "implementasi",
    "pengembangan", "desain", "kerangka", "algoritma",
    "teknik", "teknologi", "sistem", "alat", "perangkat",
    "lunak", "keras", "komputer", "komputasi", "elektronik",
    "otomatis", "kinerja", "efisiensi", "efektivitas",
    "optimasi", "solusi", "masalah", "isu", "tantangan",
    // Structural words
    "data", "dataset", "datasets", "database", "databases", "information",
    "knowledge", "content", "structure", "function", "functions", "process",
    "processes", "procedure", "procedures", "step", "steps", "stage",
    "stages", "phase", "phases", "level", "levels", "type", "types",
    "kind", "kinds", "form", "forms", "way", "ways", "manner", "means",
    "end", "ends", "goal", "goals", "objective", "objectives", "purpose",
    "purposes", "aim", "aims", "target", "targets", "focus", "scope",
    "range", "field", "fields", "area", "areas", "domain", "domains",
];

/// Immutable set of lowercase words excluded from keyword counting.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// English ∪ Indonesian ∪ [`ACADEMIC_STOPWORDS`].
    pub fn new() -> Self {
        let english = get(LANGUAGE::English);
        let indonesian = get(LANGUAGE::Indonesian);
        let academic = ACADEMIC_STOPWORDS.iter().map(|w| w.to_string());
        Self::from_words(english.into_iter().chain(indonesian).chain(academic))
    }

    /// Build a set from an arbitrary word list (lowercased).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::new()
    }
}

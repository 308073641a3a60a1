// Topic extraction: title keywords, stopword filtering and frequency counts.

pub mod keywords;
pub mod stopwords;

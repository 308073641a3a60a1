// Run pipeline: fetching and normalizing an author's publications.

pub mod crawl;

// Scholar Cloud: publication list and keyword word cloud for Google Scholar authors
//
// This is the library root. Each module corresponds to one stage of a run:
// fetching (scholar), normalizing (records), keyword counting (topics),
// reporting (output), and the crawl loop that ties the first two together
// (pipeline).

pub mod config;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod scholar;
pub mod topics;

// Output: spreadsheet export, word cloud rendering, filenames, terminal display.

pub mod filename;
pub mod spreadsheet;
pub mod terminal;
pub mod wordcloud;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::warn;

use scholar_cloud::config::Config;
use scholar_cloud::output::filename::{
    resolve_output_path, DEFAULT_SPREADSHEET_NAME, DEFAULT_WORDCLOUD_NAME,
};
use scholar_cloud::output::wordcloud::{generate_word_cloud, CloudReport};
use scholar_cloud::output::{spreadsheet, terminal};
use scholar_cloud::records::YearRange;
use scholar_cloud::scholar::client::ScholarClient;
use scholar_cloud::topics::stopwords::StopwordSet;

/// How many keywords to list after the word cloud is rendered.
const TOP_KEYWORDS: usize = 10;

/// Scholar Cloud: publication list and keyword word cloud for a Google
/// Scholar author.
///
/// Fetches every publication on the author's profile, keeps those inside the
/// requested year range, writes them to a spreadsheet and renders a word
/// cloud from the title keywords.
#[derive(Parser)]
#[command(name = "scholar-cloud", version, about)]
struct Cli {
    /// Google Scholar author ID (e.g. CJMh47UAAAAJ)
    author_id: String,

    /// First publication year to include
    #[arg(long)]
    start_year: Option<i32>,

    /// Last publication year to include
    #[arg(long)]
    end_year: Option<i32>,

    /// Single publication year (ignored when --start-year or --end-year is given)
    #[arg(long)]
    year: Option<i32>,

    /// Spreadsheet output path (.xlsx, or .csv); generated from the author name when left at the default
    #[arg(long, default_value = DEFAULT_SPREADSHEET_NAME)]
    output: String,

    /// Word cloud image path; generated from the author name when left at the default
    #[arg(long, default_value = DEFAULT_WORDCLOUD_NAME)]
    wordcloud: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scholar_cloud=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let range = YearRange::from_cli(cli.start_year, cli.end_year, cli.year);

    terminal::display_banner(&cli.author_id, &range);

    let client = ScholarClient::from_config(&config)?;
    let outcome =
        scholar_cloud::pipeline::crawl::run(&client, &cli.author_id, &range, config.request_delay)
            .await;

    if outcome.publications.is_empty() {
        println!("\n{}", "No publications found!".red().bold());
        return Ok(ExitCode::from(1));
    }

    println!(
        "\nCollected {} publications",
        outcome.publications.len().to_string().bold()
    );

    let spreadsheet_path = resolve_output_path(
        &cli.output,
        DEFAULT_SPREADSHEET_NAME,
        "publications",
        &outcome.author_name,
        &range,
        "xlsx",
    );
    let wordcloud_path = resolve_output_path(
        &cli.wordcloud,
        DEFAULT_WORDCLOUD_NAME,
        "wordcloud",
        &outcome.author_name,
        &range,
        "png",
    );

    // Reporting is best-effort: a failure in one artifact doesn't stop the
    // other or change the exit code.
    println!("\nSaving spreadsheet...");
    match spreadsheet::save_publications(&outcome.publications, &spreadsheet_path) {
        Ok(()) => println!(
            "  Saved {} publications to {}",
            outcome.publications.len(),
            spreadsheet_path.display()
        ),
        Err(e) => {
            warn!(error = %e, "Spreadsheet export failed");
            println!("  {} {e:#}", "Error saving spreadsheet:".red());
        }
    }

    println!("\nRendering word cloud...");
    let stopwords = StopwordSet::new();
    match generate_word_cloud(&outcome.publications, &stopwords, &wordcloud_path, &range) {
        Ok(CloudReport::Rendered { placed, keywords }) => {
            println!(
                "  Word cloud with {placed} keywords saved to {}",
                wordcloud_path.display()
            );
            terminal::display_top_keywords(&keywords, TOP_KEYWORDS);
        }
        Ok(CloudReport::NothingToRender) => {
            println!("  {}", "No publications to build a word cloud from".yellow());
        }
        Ok(CloudReport::NoKeywords) => {
            println!("  {}", "No keywords found in publication titles".yellow());
        }
        Err(e) => {
            warn!(error = %e, "Word cloud rendering failed");
            println!("  {} {e:#}", "Error rendering word cloud:".red());
        }
    }

    terminal::display_artifacts(&[spreadsheet_path.as_path(), wordcloud_path.as_path()]);

    Ok(ExitCode::SUCCESS)
}

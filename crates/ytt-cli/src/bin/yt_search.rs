//! Keyword search with language, country, and duration filters.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::error;

use ytt_pipeline::{save_search_results, search, SearchHit};
use ytt_sources::{ApiKey, DataApiClient, DurationCategory, SearchRequest};

#[derive(Parser)]
#[command(
    name = "yt-search",
    about = "Search YouTube with filters for language, country, and duration."
)]
struct Args {
    /// The search term or phrase
    query: String,

    /// ISO 639-1 two-letter language code (e.g. en, es, fr)
    language: String,

    /// Bias results to a country (ISO 3166-1 alpha-2 code, e.g. US, CA, GB)
    #[arg(short = 'c', long, value_name = "CODE")]
    country: Option<String>,

    /// Built-in duration category filter
    #[arg(short = 'd', long, value_enum, default_value_t = DurationArg::Any)]
    duration: DurationArg,

    /// Custom minimum video duration in MINUTES; overrides --duration
    #[arg(short = 'm', long = "min-duration", value_name = "MIN")]
    min_duration: Option<u64>,

    /// Number of results to return (1-50)
    #[arg(
        short = 'n',
        long = "max-results",
        default_value_t = 10,
        value_parser = clap::value_parser!(u8).range(1..=50)
    )]
    max_results: u8,

    /// Output filename (.txt or .json); prints to console if omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DurationArg {
    Any,
    Short,
    Medium,
    Long,
}

impl From<DurationArg> for DurationCategory {
    fn from(arg: DurationArg) -> Self {
        match arg {
            DurationArg::Any => DurationCategory::Any,
            DurationArg::Short => DurationCategory::Short,
            DurationArg::Medium => DurationCategory::Medium,
            DurationArg::Long => DurationCategory::Long,
        }
    }
}

fn describe(args: &Args) -> String {
    let mut description = format!("Searching for '{}' (lang: {}", args.query, args.language);
    if let Some(country) = &args.country {
        description.push_str(&format!(", country: {}", country.to_uppercase()));
    }
    if let Some(min) = args.min_duration {
        description.push_str(&format!(", min duration: {}m", min));
    } else {
        description.push_str(&format!(", duration: {}", DurationCategory::from(args.duration)));
    }
    description.push_str(&format!(", max: {})", args.max_results));
    description
}

fn print_results(hits: &[SearchHit]) {
    println!("\n--- Search Results ---");
    for hit in hits {
        println!("[{}] {} - ({})", hit.duration, hit.title, hit.channel);
        println!("    {}\n", hit.url);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    ytt_cli::init("info");
    let args = Args::parse();

    let api_key = ApiKey::from_env()
        .context("set YOUTUBE_API_KEY to a Data API key from the Google Cloud Console")?;
    let client = DataApiClient::new(api_key);

    println!("\n{}", describe(&args));

    // A custom minimum overrides the category: the filter happens locally
    let request = SearchRequest {
        query: args.query.clone(),
        language: args.language.clone(),
        region: args.country.clone(),
        duration_category: if args.min_duration.is_some() {
            DurationCategory::Any
        } else {
            args.duration.into()
        },
        max_results: usize::from(args.max_results),
    };
    let min_duration_secs = args.min_duration.map(|minutes| minutes * 60);

    let hits = search(&client, &request, min_duration_secs).await;
    if hits.is_empty() {
        println!("No results found matching the criteria.");
        return Ok(());
    }

    match &args.output {
        Some(path) => match save_search_results(path, &hits) {
            Ok(()) => println!(
                "\nSuccessfully saved {} results to '{}'.",
                hits.len(),
                path.display()
            ),
            Err(e) => {
                // Persistence failure is non-fatal; the results still print
                error!(error = %e, "Could not save results");
                print_results(&hits);
            }
        },
        None => print_results(&hits),
    }

    Ok(())
}

//! Aggregate watch time across videos, playlists, and channels via the
//! YouTube Data API.

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;

use ytt_models::{format_hms, AggregationResult};
use ytt_pipeline::{default_links_path, final_report, save_links, AggregateOptions, Aggregator};
use ytt_sources::{ApiKey, DataApiClient};

#[derive(Parser)]
#[command(
    name = "watchtime",
    about = "Calculate total watch time for a YouTube URL or a file of URLs."
)]
struct Args {
    /// A YouTube URL (channel, playlist, video) OR a path to a .txt file
    /// containing URLs (one per line)
    source: String,

    /// Minimum duration in MINUTES for a video to be included
    #[arg(short = 'm', long = "min-duration", default_value_t = 0)]
    min_duration: u64,

    /// Save the links of included videos to a timestamped .txt file
    #[arg(short = 's', long = "save-links")]
    save_links: bool,
}

/// Either the single URL given, or the non-blank lines of a .txt file.
fn read_sources(source: &str) -> anyhow::Result<Vec<String>> {
    let path = Path::new(source);
    if !(path.is_file() && source.to_ascii_lowercase().ends_with(".txt")) {
        return Ok(vec![source.to_string()]);
    }

    println!("Reading URLs from file: {}", source);
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("could not read source file '{}'", source))?;
    let urls: Vec<String> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if urls.is_empty() {
        bail!("file '{}' is empty or contains no valid lines", source);
    }
    Ok(urls)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    ytt_cli::init("info");
    let args = Args::parse();

    let api_key = ApiKey::from_env()
        .context("set YOUTUBE_API_KEY to a Data API key from the Google Cloud Console")?;
    let client = DataApiClient::new(api_key);

    let sources = read_sources(&args.source)?;
    println!("\nProcessing {} source(s)...", sources.len());

    let options = AggregateOptions {
        min_duration_secs: args.min_duration * 60,
        collect_links: args.save_links,
    };
    let aggregator = Aggregator::new(&client, options);

    let mut total = AggregationResult::default();
    for (index, raw) in sources.iter().enumerate() {
        println!("\n[{}/{}] Processing: {}", index + 1, sources.len(), raw);
        let report = aggregator.run_source(raw).await;
        if report.skipped {
            println!("--> Skipped (see warning above).");
            continue;
        }
        println!(
            "--> Found {} video(s). Added {} with a total duration of {}.",
            report.result.videos_found,
            report.result.videos_included,
            format_hms(report.result.total_secs)
        );
        total.merge(&report.result);
    }

    println!("\n{}", final_report(&total, args.min_duration));

    if args.save_links {
        if total.included_links.is_empty() {
            println!("No videos met the criteria to be saved to the links file.");
        } else {
            let path = default_links_path();
            save_links(&path, &total.included_links)?;
            println!(
                "Successfully saved {} video link(s) to '{}'",
                total.included_links.len(),
                path.display()
            );
        }
    }

    Ok(())
}

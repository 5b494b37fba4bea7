//! Playlist watch time via yt-dlp flat-playlist enumeration.
//!
//! No API key needed; yt-dlp must be on PATH.

use std::path::PathBuf;

use clap::Parser;
use tracing::error;

use ytt_models::format_hms;
use ytt_pipeline::{aggregate_records, save_links, summary_line, AggregateOptions};
use ytt_sources::FlatPlaylistLister;

#[derive(Parser)]
#[command(
    name = "playlist-time",
    about = "Calculate total duration of a YouTube playlist with optional filtering and link saving."
)]
struct Args {
    /// The full URL of the YouTube playlist (wrap it in quotes)
    url: String,

    /// Only include videos longer than this number of minutes
    #[arg(short = 'd', long = "min-duration", default_value_t = 0, value_name = "MINUTES")]
    min_duration: u64,

    /// Save the links of included videos to the given text file
    #[arg(short = 's', long = "save-file", value_name = "FILENAME")]
    save_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    ytt_cli::init("info");
    let args = Args::parse();

    println!("Fetching video list from playlist...");
    if args.min_duration > 0 {
        println!(
            "Filter active: Only including videos longer than {} minute(s).",
            args.min_duration
        );
    }

    let lister = FlatPlaylistLister;
    let records = match lister.list(&args.url).await {
        Ok(records) => records,
        Err(e) => {
            // Tool-not-found or a failed invocation is fatal for this run
            error!(error = %e, "Could not enumerate playlist");
            std::process::exit(1);
        }
    };

    println!("\nFound {} videos. Processing...", records.len());

    let options = AggregateOptions {
        min_duration_secs: args.min_duration * 60,
        collect_links: args.save_file.is_some(),
    };
    let result = aggregate_records(&records, &options);

    println!("\n{}", summary_line(&result, args.min_duration));

    if let Some(path) = &args.save_file {
        if result.included_links.is_empty() {
            println!("No video links to save.");
        } else {
            println!(
                "\nSaving {} video links to '{}'...",
                result.included_links.len(),
                path.display()
            );
            match save_links(path, &result.included_links) {
                Ok(()) => println!("File saved successfully."),
                Err(e) => error!(error = %e, "Could not write links file"),
            }
        }
    }

    println!("\n{}", "=".repeat(40));
    println!(
        "Total Duration of Included Videos: {}",
        format_hms(result.total_secs)
    );
    println!("{}", "=".repeat(40));

    Ok(())
}

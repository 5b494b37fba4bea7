//! Result persistence, selected by file extension.
//!
//! `.txt` gets a plain link list or formatted result blocks, `.json` a
//! pretty-printed array. Any other extension is a reported, non-fatal
//! error and no file is written.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::search::SearchHit;

/// Errors from result persistence.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("invalid output file format '{0}': use a '.txt' or '.json' extension")]
    UnsupportedExtension(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default path for a saved link list: `youtube_links_<timestamp>.txt`.
pub fn default_links_path() -> PathBuf {
    PathBuf::from(format!(
        "youtube_links_{}.txt",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Write one URL per line.
pub fn save_links(path: &Path, links: &[String]) -> Result<(), OutputError> {
    let mut body = String::new();
    for link in links {
        body.push_str(link);
        body.push('\n');
    }
    std::fs::write(path, body)?;
    Ok(())
}

/// Write search results in the format the path's extension selects.
pub fn save_search_results(path: &Path, hits: &[SearchHit]) -> Result<(), OutputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(hits)?;
            std::fs::write(path, json)?;
            Ok(())
        }
        "txt" => {
            let mut body = String::new();
            for hit in hits {
                body.push_str(&format!(
                    "[{}] {} - ({})\n    {}\n\n",
                    hit.duration, hit.title, hit.channel, hit.url
                ));
            }
            std::fs::write(path, body)?;
            Ok(())
        }
        other => Err(OutputError::UnsupportedExtension(other.to_string())),
    }
}

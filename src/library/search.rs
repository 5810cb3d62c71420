use std::fmt;
use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::library::metadata::{self, MetadataRecord};

/// A movie matching a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub movie: String,
    pub director: String,
    pub watched: bool,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = crate::watched_label(self.watched);
        let status = if self.watched { status.green() } else { status.yellow() };
        write!(f, "{} (Director: {}, {status})", self.movie, self.director)
    }
}

/// Find movies whose name contains `query`, ignoring case.
/// Director names are not matched.
#[must_use]
pub fn search_record(record: &MetadataRecord, query: &str) -> Vec<SearchResult> {
    let query = query.to_lowercase();
    record
        .iter()
        .flat_map(|(director, movies)| {
            movies.iter().map(move |(movie, details)| (director, movie, details.watched))
        })
        .filter(|(_, movie, _)| movie.to_lowercase().contains(&query))
        .map(|(director, movie, watched)| SearchResult {
            movie: movie.to_string(),
            director: director.to_string(),
            watched,
        })
        .collect()
}

/// Search the metadata record of `root` for movies matching `query`.
///
/// A missing or empty record gives no results.
///
/// # Errors
/// Returns an error if the metadata file exists but cannot be read or parsed.
pub fn search(root: &Path, query: &str) -> Result<Vec<SearchResult>> {
    let record = metadata::load_metadata(root)?;
    if record.is_empty() {
        println!("No metadata found. Run '--update-metadata' to initialize metadata.");
        return Ok(Vec::new());
    }
    Ok(search_record(&record, query))
}

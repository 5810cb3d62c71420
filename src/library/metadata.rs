//! Sidecar metadata record and its reconciliation against the directory tree.
//!
//! The record lives at `<root>/yaclum.json`:
//! ```json
//! {
//!     "Nolan": {
//!         "Inception": {
//!             "watched": false
//!         }
//!     }
//! }
//! ```
//! The directory tree decides which movies exist, the record decides whether they have been watched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, YaclumError};
use crate::library::ordered_map::OrderedMap;
use crate::print_warning;

/// File name of the sidecar metadata file inside the root folder.
pub const METADATA_FILE_NAME: &str = "yaclum.json";

/// Watched state of a single movie.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub watched: bool,
    /// Any other fields found in the file, written back unchanged.
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// Movies of one director keyed by movie folder name.
pub type MovieMap = OrderedMap<MovieRecord>;

/// Whole metadata record: director name -> movie name -> movie record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    directors: OrderedMap<MovieMap>,
}

/// Director and movie folder names found on disk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryTree {
    pub directors: Vec<(String, Vec<String>)>,
}

/// Entries added to a record by a merge.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeChanges {
    pub directors: Vec<String>,
    /// (director, movie) pairs.
    pub movies: Vec<(String, String)>,
}

/// Result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub record: MetadataRecord,
    /// True if an existing metadata file was loaded.
    pub loaded_existing: bool,
    pub changes: MergeChanges,
    /// True if the metadata file was written.
    pub saved: bool,
}

/// Result of toggling the watched status of a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Toggled { director: String, watched: bool },
    NotFound,
    /// The record is missing or empty, nothing was written.
    NoMetadata,
}

impl MovieRecord {
    #[must_use]
    pub fn new(watched: bool) -> Self {
        Self {
            watched,
            extra: serde_json::Map::new(),
        }
    }
}

impl MetadataRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directors.is_empty()
    }

    /// Number of movies across all directors.
    #[must_use]
    pub fn movie_count(&self) -> usize {
        self.directors.iter().map(|(_, movies)| movies.len()).sum()
    }

    #[must_use]
    pub fn director(&self, name: &str) -> Option<&MovieMap> {
        self.directors.get(name)
    }

    #[must_use]
    pub fn movie(&self, director: &str, movie: &str) -> Option<&MovieRecord> {
        self.directors.get(director).and_then(|movies| movies.get(movie))
    }

    /// Iterate directors and their movies in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MovieMap)> {
        self.directors.iter()
    }

    /// Set the watched state of a movie, adding the director and movie if needed.
    pub fn set_watched(&mut self, director: &str, movie: &str, watched: bool) {
        let (movies, _) = self.directors.get_or_insert_with(director, MovieMap::new);
        let (record, _) = movies.get_or_insert_with(movie, MovieRecord::default);
        record.watched = watched;
    }

    /// Add every director and movie from the tree that is missing from the record.
    /// Existing entries are left as they are.
    pub fn merge_tree(&mut self, tree: &DirectoryTree) -> MergeChanges {
        let mut changes = MergeChanges::default();
        for (director, movie_names) in &tree.directors {
            let (movies, new_director) = self.directors.get_or_insert_with(director, MovieMap::new);
            if new_director {
                changes.directors.push(director.clone());
            }
            for movie in movie_names {
                let (_, new_movie) = movies.get_or_insert_with(movie, MovieRecord::default);
                if new_movie {
                    changes.movies.push((director.clone(), movie.clone()));
                }
            }
        }
        changes
    }

    /// Flip the watched state of the first movie with the given name.
    /// Directors are checked in record order.
    ///
    /// Returns the director and the new state, or `None` if no director has the movie.
    pub fn toggle_watched(&mut self, movie: &str) -> Option<(String, bool)> {
        self.directors.iter_mut().find_map(|(director, movies)| {
            movies.get_mut(movie).map(|record| {
                record.watched = !record.watched;
                (director.to_string(), record.watched)
            })
        })
    }

    /// Serialize as pretty-printed JSON with 4-space indentation.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        // The serializer only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl MergeChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directors.is_empty() && self.movies.is_empty()
    }
}

impl Reconciliation {
    /// Print the entries added by this pass.
    pub fn print_changes(&self) {
        for director in &self.changes.directors {
            println!("  + Director: {director}");
        }
        for (director, movie) in &self.changes.movies {
            println!("  + Movie: {movie} ({director})");
        }
    }
}

/// Path of the metadata file for the given root folder.
#[must_use]
pub fn metadata_path(root: &Path) -> PathBuf {
    root.join(METADATA_FILE_NAME)
}

/// Read the metadata file for the given root folder.
///
/// Returns `None` if the file does not exist.
///
/// # Errors
/// Returns [`YaclumError::MalformedMetadata`] if the file cannot be parsed,
/// or [`YaclumError::Io`] if it cannot be read.
pub fn read_metadata(root: &Path) -> Result<Option<MetadataRecord>> {
    let path = metadata_path(root);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(YaclumError::io(path, error)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| YaclumError::MalformedMetadata { path, source })
}

/// Read the metadata file, or an empty record if there is none yet.
///
/// # Errors
/// Returns an error if an existing file cannot be read or parsed.
pub fn load_metadata(root: &Path) -> Result<MetadataRecord> {
    Ok(read_metadata(root)?.unwrap_or_default())
}

/// Rewrite the whole metadata file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_metadata(root: &Path, record: &MetadataRecord) -> Result<PathBuf> {
    let path = metadata_path(root);
    let content = record
        .to_json_string()
        .map_err(|error| YaclumError::io(&path, error.into()))?;
    fs::write(&path, content).map_err(|error| YaclumError::io(&path, error))?;
    Ok(path)
}

/// Collect director folders in the root and movie folders in each director.
/// Files are ignored. Names are sorted so new entries get a stable order.
///
/// # Errors
/// Returns an error if a directory cannot be read.
pub fn scan_directory_tree(root: &Path) -> Result<DirectoryTree> {
    let directors = subdirectories(root)?
        .into_iter()
        .map(|(name, path)| {
            let movies: Vec<String> = subdirectories(&path)?.into_iter().map(|(movie, _)| movie).collect();
            Ok((name, movies))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DirectoryTree { directors })
}

/// Bring the metadata record for `root` up to date with the directory tree.
///
/// Missing directors and movies are added, movies as unwatched.
/// Existing entries are never changed or removed.
/// The file is only written if something was added.
///
/// # Errors
/// Returns [`YaclumError::MalformedMetadata`] without writing anything if the existing file is invalid,
/// or an I/O error if the tree or the file cannot be accessed.
pub fn reconcile(root: &Path) -> Result<Reconciliation> {
    let path = metadata_path(root);
    let (mut record, loaded_existing) = match read_metadata(root)? {
        Some(record) => {
            println!("Loaded existing metadata.");
            (record, true)
        }
        None => {
            println!("No metadata file found. Creating a new one.");
            (MetadataRecord::new(), false)
        }
    };

    let tree = scan_directory_tree(root)?;
    let changes = record.merge_tree(&tree);

    let saved = !changes.is_empty();
    if saved {
        save_metadata(root, &record)?;
        println!("Metadata updated and saved to {}.", path.display());
    } else {
        println!("No new movies or directors to add. Metadata is already up to date.");
    }

    Ok(Reconciliation {
        record,
        loaded_existing,
        changes,
        saved,
    })
}

/// Toggle the watched status of the first movie named `movie`.
///
/// The record is read as is without reconciling first.
/// Unless the record is empty, it is written back even when the movie was not found.
///
/// # Errors
/// Returns an error if the metadata file cannot be read, parsed, or written.
pub fn toggle_watched(root: &Path, movie: &str) -> Result<ToggleOutcome> {
    let mut record = load_metadata(root)?;
    if record.is_empty() {
        println!("No metadata found. Run '--update-metadata' to initialize metadata.");
        return Ok(ToggleOutcome::NoMetadata);
    }

    let outcome = match record.toggle_watched(movie) {
        Some((director, watched)) => {
            println!(
                "Movie '{movie}' marked as {} (Director: {director}).",
                crate::watched_label(watched)
            );
            ToggleOutcome::Toggled { director, watched }
        }
        None => {
            println!("Movie '{movie}' not found in the metadata.");
            ToggleOutcome::NotFound
        }
    };

    save_metadata(root, &record)?;
    println!("Metadata updated successfully.");
    Ok(outcome)
}

/// Immediate subdirectories of `path` as (folder name, path), sorted by name.
///
/// Names are used exactly as stored on disk.
/// Folders whose name is not valid UTF-8 cannot be a JSON key and are skipped with a warning.
fn subdirectories(path: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(path).map_err(|error| YaclumError::io(path, error))? {
        let entry = entry.map_err(|error| YaclumError::io(path, error))?;
        let entry_path = entry.path();
        // Follows symlinks so linked director or movie folders count too
        if !entry_path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => dirs.push((name, entry_path)),
            Err(_) => {
                print_warning!("Skipping folder with a non UTF-8 name: {}", entry_path.display());
            }
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

//! Movie library operations.
//!
//! The root folder holds one folder per director, each holding one folder per movie.
//! Watched status is kept in a JSON sidecar file in the root folder and reconciled
//! against the folders whenever they change.

mod listing;
mod metadata;
mod ordered_map;
mod organizer;
mod search;

pub use listing::{list_movies, print_movies};
pub use metadata::{
    DirectoryTree, METADATA_FILE_NAME, MergeChanges, MetadataRecord, MovieMap, MovieRecord, Reconciliation,
    ToggleOutcome, load_metadata, metadata_path, read_metadata, reconcile, save_metadata, scan_directory_tree,
    toggle_watched,
};
pub use ordered_map::OrderedMap;
pub use organizer::{ensure_director_folder, ensure_movie_folder, ensure_movie_path, move_file_to_movie_folder};
pub use search::{SearchResult, search, search_record};

use std::path::Path;

use crate::error::Result;
use crate::library::metadata::{self, DirectoryTree};
use crate::print_bold;

/// Read directors and their movie folders straight from disk, sorted by name.
///
/// # Errors
/// Returns an error if the root or a director folder cannot be read.
pub fn list_movies(root: &Path) -> Result<DirectoryTree> {
    metadata::scan_directory_tree(root)
}

/// Print movies grouped by director.
///
/// # Errors
/// Returns an error if the folders cannot be read.
pub fn print_movies(root: &Path) -> Result<()> {
    let tree = list_movies(root)?;
    println!("Listing movies in root folder: {}\n", root.display());
    if tree.directors.is_empty() {
        println!("No director folders found.");
        return Ok(());
    }
    for (director, movies) in &tree.directors {
        print_bold!("Director: {director}");
        for movie in movies {
            println!("  - {movie}");
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod listing_tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn lists_only_folders_sorted() {
        let dir = tempdir().expect("tempdir");
        let root = dir.path();
        for path in ["Villeneuve/Dune", "Nolan/Tenet", "Nolan/Inception"] {
            fs::create_dir_all(root.join(path)).expect("create dir");
        }
        fs::write(root.join("Nolan").join("poster.jpg"), "").expect("write file");
        fs::write(root.join("yaclum.json"), "{}").expect("write file");

        let tree = list_movies(root).expect("should list");

        let directors: Vec<&str> = tree.directors.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(directors, vec!["Nolan", "Villeneuve"]);
        assert_eq!(tree.directors[0].1, vec!["Inception", "Tenet"]);
        assert_eq!(tree.directors[1].1, vec!["Dune"]);
    }

    #[test]
    fn missing_root_is_error() {
        let dir = tempdir().expect("tempdir");
        assert!(list_movies(&dir.path().join("missing")).is_err());
    }
}

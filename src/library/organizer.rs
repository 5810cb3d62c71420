//! Director and movie folder creation and moving files into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, YaclumError};
use crate::library::metadata;

/// Create the director folder under `root` if it does not exist yet.
/// Missing parents, including the root itself, are created too.
///
/// # Errors
/// Returns an error if the folder cannot be created.
pub fn ensure_director_folder(root: &Path, name: &str) -> Result<PathBuf> {
    let director_folder = root.join(name);
    if director_folder.is_dir() {
        println!("Director folder already exists: {}", director_folder.display());
    } else {
        fs::create_dir_all(&director_folder).map_err(|error| YaclumError::io(&director_folder, error))?;
        println!("Created director folder: {}", director_folder.display());
    }
    Ok(director_folder)
}

/// Create the movie folder under a director folder if it does not exist yet.
///
/// # Errors
/// Returns an error if the folder cannot be created.
pub fn ensure_movie_folder(director_folder: &Path, name: &str) -> Result<PathBuf> {
    let movie_folder = director_folder.join(name);
    if movie_folder.is_dir() {
        println!("Movie folder already exists: {}", movie_folder.display());
    } else {
        fs::create_dir_all(&movie_folder).map_err(|error| YaclumError::io(&movie_folder, error))?;
        println!("Created movie folder: {}", movie_folder.display());
    }
    Ok(movie_folder)
}

/// Ensure both the director and movie folders exist.
///
/// # Errors
/// Returns an error if either folder cannot be created.
pub fn ensure_movie_path(root: &Path, director: &str, movie: &str) -> Result<PathBuf> {
    let director_folder = ensure_director_folder(root, director)?;
    ensure_movie_folder(&director_folder, movie)
}

/// Move `source` into `<root>/<director>/<movie>/` and reconcile the metadata afterwards.
///
/// An existing file with the same name at the destination is replaced.
/// Nothing is created if the source does not exist.
///
/// # Errors
/// Returns [`YaclumError::SourceNotFound`] if the source is missing,
/// or an error from creating folders, moving the file, or reconciling.
pub fn move_file_to_movie_folder(root: &Path, source: &Path, director: &str, movie: &str) -> Result<PathBuf> {
    if !source.exists() {
        return Err(YaclumError::SourceNotFound(source.to_path_buf()));
    }
    let file_name = source.file_name().ok_or_else(|| {
        YaclumError::io(
            source,
            io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name"),
        )
    })?;

    let movie_folder = ensure_movie_path(root, director, movie)?;
    let destination = movie_folder.join(file_name);

    move_path(source, &destination)?;
    println!("Moved file '{}' to '{}'", source.display(), destination.display());

    metadata::reconcile(root)?;
    Ok(destination)
}

/// Rename, falling back to copy and remove when the destination is on another device.
fn move_path(source: &Path, destination: &Path) -> Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::CrossesDevices && source.is_file() => {
            fs::copy(source, destination).map_err(|error| YaclumError::io(destination, error))?;
            fs::remove_file(source).map_err(|error| YaclumError::io(source, error))
        }
        Err(error) => Err(YaclumError::io(source, error)),
    }
}

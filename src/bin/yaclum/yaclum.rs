use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use ::yaclum::config::{CONFIG_PATH, RootConfig};
use ::yaclum::error::YaclumError;
use ::yaclum::library::{self, ToggleOutcome};
use ::yaclum::{print_bold, print_error};

use crate::YaclumArgs;

/// Single command selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetRoot(PathBuf),
    ListMovies,
    AddDirector(String),
    AddMovie { director: String, movie: String },
    MoveFile { source: PathBuf, director: String, movie: String },
    UpdateMetadata,
    Search(String),
    ToggleWatched(String),
}

#[derive(Debug)]
pub struct Yaclum {
    action: Action,
    config_path: Option<PathBuf>,
    verbose: bool,
}

impl Action {
    /// Pick the action from parsed arguments, or `None` if no action flag was given.
    fn from_args(args: YaclumArgs) -> Option<Self> {
        if let Some(path) = args.set_root {
            return Some(Self::SetRoot(path));
        }
        if args.list_movies {
            return Some(Self::ListMovies);
        }
        if let Some(director) = args.add_director {
            return Some(Self::AddDirector(director));
        }
        if let Some([director, movie]) = args.add_movie.and_then(|values| <[String; 2]>::try_from(values).ok()) {
            return Some(Self::AddMovie { director, movie });
        }
        if let Some([source, director, movie]) =
            args.move_file.and_then(|values| <[String; 3]>::try_from(values).ok())
        {
            return Some(Self::MoveFile {
                source: PathBuf::from(source),
                director,
                movie,
            });
        }
        if args.update_metadata {
            return Some(Self::UpdateMetadata);
        }
        if let Some(query) = args.search {
            return Some(Self::Search(query));
        }
        args.toggle_watched.map(Self::ToggleWatched)
    }
}

impl Yaclum {
    pub fn from_args(args: YaclumArgs) -> Option<Self> {
        let verbose = args.verbose;
        Action::from_args(args).map(|action| Self::new(action, CONFIG_PATH.clone(), verbose))
    }

    pub const fn new(action: Action, config_path: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            action,
            config_path,
            verbose,
        }
    }

    /// Run the selected command.
    ///
    /// Expected failures such as a missing root folder are printed and do not fail the process.
    pub fn run(&self) -> Result<()> {
        match self.execute() {
            Err(error) if error.downcast_ref::<YaclumError>().is_some_and(YaclumError::is_expected) => {
                print_error!("{error}");
                Ok(())
            }
            result => result,
        }
    }

    fn execute(&self) -> Result<()> {
        match &self.action {
            Action::SetRoot(path) => self.set_root(path),
            Action::ListMovies => {
                let root = self.config()?.existing_root()?;
                library::print_movies(&root)?;
                Ok(())
            }
            Action::AddDirector(director) => {
                let root = self.config()?.root()?;
                library::ensure_director_folder(&root, director)?;
                Ok(())
            }
            Action::AddMovie { director, movie } => {
                let root = self.config()?.root()?;
                library::ensure_movie_path(&root, director, movie)?;
                Ok(())
            }
            Action::MoveFile {
                source,
                director,
                movie,
            } => {
                let root = self.config()?.root()?;
                library::move_file_to_movie_folder(&root, source, director, movie)?;
                Ok(())
            }
            Action::UpdateMetadata => self.update_metadata(),
            Action::Search(query) => self.search(query),
            Action::ToggleWatched(movie) => {
                let root = self.config()?.existing_root()?;
                if let ToggleOutcome::Toggled { director, watched } = library::toggle_watched(&root, movie)?
                    && self.verbose
                {
                    println!("{movie} ({director}): watched = {watched}");
                }
                Ok(())
            }
        }
    }

    fn config_path(&self) -> Result<&Path> {
        self.config_path
            .as_deref()
            .context("Failed to determine config file path: home directory not found")
    }

    fn config(&self) -> Result<RootConfig> {
        let path = self.config_path()?;
        if self.verbose {
            println!("Config file: {}", path.display());
        }
        Ok(RootConfig::read_or_default(path))
    }

    fn set_root(&self, path: &Path) -> Result<()> {
        let root = ::yaclum::absolute_path(path)?;
        RootConfig::set_root_folder(self.config_path()?, &root)?;
        println!("Root folder set to: {}", root.display());
        if !root.exists() {
            println!("Note: the folder does not exist yet. It is created when adding a director.");
        }
        Ok(())
    }

    fn update_metadata(&self) -> Result<()> {
        let root = self.config()?.existing_root()?;
        let reconciliation = library::reconcile(&root)?;
        if self.verbose {
            reconciliation.print_changes();
            println!(
                "{} directors, {} movies",
                reconciliation.record.iter().count(),
                reconciliation.record.movie_count()
            );
        }
        Ok(())
    }

    fn search(&self, query: &str) -> Result<()> {
        let root = self.config()?.existing_root()?;
        let results = library::search(&root, query)?;
        if results.is_empty() {
            println!("No results found for '{query}'.");
        } else {
            print_bold!("Search results for '{query}':");
            for result in &results {
                println!("  - {result}");
            }
        }
        Ok(())
    }
}

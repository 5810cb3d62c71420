mod yaclum;

use std::path::PathBuf;

use clap::{ArgGroup, CommandFactory, Parser};
use clap_complete::Shell;

use crate::yaclum::Yaclum;

#[derive(Parser)]
#[command(author, version, name = env!("CARGO_BIN_NAME"), about = "Yaclum: Your movie organizer CLI")]
#[command(group(ArgGroup::new("action").multiple(false)))]
struct YaclumArgs {
    /// Set the root folder for movies
    #[arg(long, group = "action", value_name = "PATH", value_hint = clap::ValueHint::DirPath)]
    set_root: Option<PathBuf>,

    /// List all movies by director
    #[arg(long, group = "action")]
    list_movies: bool,

    /// Add a director folder
    #[arg(long, group = "action", value_name = "DIRECTOR")]
    add_director: Option<String>,

    /// Add a movie folder
    #[arg(long, group = "action", num_args = 2, value_names = ["DIRECTOR", "MOVIE"])]
    add_movie: Option<Vec<String>>,

    /// Move a file to the specified director and movie folder
    #[arg(long, group = "action", num_args = 3, value_names = ["SOURCE", "DIRECTOR", "MOVIE"])]
    move_file: Option<Vec<String>>,

    /// Update the metadata file by scanning the directory structure and adding new movies
    #[arg(long, group = "action")]
    update_metadata: bool,

    /// Search for movies by name (case-insensitive, partial match)
    #[arg(long, group = "action", value_name = "QUERY")]
    search: Option<String>,

    /// Toggle the watched/unwatched status of a movie in the metadata
    #[arg(long, group = "action", value_name = "MOVIE_NAME")]
    toggle_watched: Option<String>,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = YaclumArgs::parse();
    if let Some(ref shell) = args.completion {
        ::yaclum::generate_shell_completion(*shell, YaclumArgs::command(), true, env!("CARGO_BIN_NAME"))
    } else if let Some(yaclum) = Yaclum::from_args(args) {
        yaclum.run()
    } else {
        YaclumArgs::command().print_help()?;
        Ok(())
    }
}

//! User config store holding the movie root folder.
//!
//! The config file is a small JSON object with a single recognized key:
//! ```json
//! {"root_folder": "/home/user/Movies"}
//! ```
//! Unrecognized keys are kept as is when the file is rewritten.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, YaclumError};
use crate::print_warning;

const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

/// Path to the user config file: `$HOME/.config/yaclum.conf`
///
/// Returns `None` if the home directory cannot be determined.
pub static CONFIG_PATH: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    let home_dir = dirs::home_dir()?;
    Some(home_dir.join(".config").join(format!("{PROJECT_NAME}.conf")))
});

/// Contents of the user config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<String>,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

impl RootConfig {
    /// Read config from the given file.
    /// A missing, unreadable or invalid file results in an empty config.
    #[must_use]
    pub fn read_or_default(path: &Path) -> Self {
        Self::read(path)
            .map_err(|error| {
                print_warning!("{error}");
            })
            .unwrap_or_default()
    }

    /// Read config from the given file. A missing file gives an empty config.
    ///
    /// # Errors
    /// Returns [`YaclumError::MalformedConfig`] if the file cannot be parsed,
    /// or [`YaclumError::Io`] if it cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let config_string = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => return Err(YaclumError::io(path, error)),
        };
        Self::from_json_str(&config_string).map_err(|source| YaclumError::MalformedConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid JSON object.
    pub fn from_json_str(json_str: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json_str)
    }

    /// Write the whole config to the given file, creating the parent directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| YaclumError::io(parent, error))?;
        }
        let content = serde_json::to_string(self).map_err(|error| YaclumError::io(path, error.into()))?;
        fs::write(path, content).map_err(|error| YaclumError::io(path, error))
    }

    /// Store the root folder in the config file at `path`.
    ///
    /// Other keys in the file are kept, so an existing file that cannot be parsed is left untouched.
    ///
    /// # Errors
    /// Returns an error if the existing config file is invalid or the file cannot be written.
    pub fn set_root_folder(path: &Path, root: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.root_folder = Some(crate::path_to_string(root));
        config.write(path)?;
        Ok(config)
    }

    /// The configured root folder.
    ///
    /// # Errors
    /// Returns [`YaclumError::RootNotSet`] if no root folder has been stored.
    pub fn root(&self) -> Result<PathBuf> {
        self.root_folder
            .as_deref()
            .map(str::trim)
            .filter(|root| !root.is_empty())
            .map(PathBuf::from)
            .ok_or(YaclumError::RootNotSet)
    }

    /// The configured root folder, which must also exist on disk.
    ///
    /// # Errors
    /// Returns [`YaclumError::RootNotSet`] or [`YaclumError::RootMissing`].
    pub fn existing_root(&self) -> Result<PathBuf> {
        let root = self.root()?;
        if root.exists() {
            Ok(root)
        } else {
            Err(YaclumError::RootMissing(root))
        }
    }
}

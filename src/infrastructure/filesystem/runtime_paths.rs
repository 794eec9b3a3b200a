use std::path::{Path, PathBuf};

use crate::common::error::GitsError;
use crate::common::result::GitsResult;

pub const CONFIG_DIR_NAME: &str = "gits";
pub const CONFIG_FILE_NAME: &str = "repository_locations.yml";

/// Locations resolved once at start-up and passed to everything that needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    pub home: PathBuf,
    pub config_file: PathBuf,
}

impl RuntimePaths {
    pub fn new(home: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            config_file: config_file.into(),
        }
    }

    /// Resolve from the process environment.
    ///
    /// An explicit config path wins; otherwise `$XDG_CONFIG_HOME` and then
    /// `<home>/.config` are used.
    pub fn resolve(config_override: Option<PathBuf>) -> GitsResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| GitsError::config_error("cannot determine the home directory", None))?;
        let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);

        let config_file = match config_override {
            Some(path) => path,
            None => default_config_file(&home, xdg.as_deref()),
        };
        Ok(Self::new(home, config_file))
    }
}

/// `<xdg>/gits/repository_locations.yml`, falling back to `<home>/.config`.
pub fn default_config_file(home: &Path, xdg_config_home: Option<&Path>) -> PathBuf {
    let base = match xdg_config_home {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => home.join(".config"),
    };
    base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

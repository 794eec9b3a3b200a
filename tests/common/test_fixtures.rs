//! On-disk fixtures: a fake home directory with a configuration file and
//! checkouts that look like git repositories.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use gits::application::services::ConfigResolver;
use gits::domain::entities::Inventory;
use gits::infrastructure::filesystem::ConfigStore;

pub struct HomeFixture {
    pub dir: TempDir,
}

impl HomeFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp home"),
        }
    }

    pub fn home(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.home().join("repository_locations.yml")
    }

    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::write(&path, yaml).expect("Failed to write config");
        path
    }

    /// Create `<home>/<relative>/.git` plus one tracked-looking file.
    pub fn checkout(&self, relative: &str) -> PathBuf {
        let path = self.home().join(relative);
        std::fs::create_dir_all(path.join(".git")).expect("Failed to create checkout");
        std::fs::write(path.join("README.md"), "# readme\n").expect("Failed to write file");
        path
    }

    /// A directory without a `.git` marker.
    pub fn plain_dir(&self, relative: &str) -> PathBuf {
        let path = self.home().join(relative);
        std::fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    pub fn inventory(&self) -> Inventory {
        ConfigResolver::new(self.home())
            .resolve_file(&ConfigStore::new(self.config_path()))
            .expect("Failed to resolve configuration")
    }
}

/// `tools` rooted at `<home>/tools` with the given aliases.
pub fn tools_config(aliases: &[&str]) -> String {
    let mut yaml = String::from("tools:\n  - root_dir: ~/tools\n  - repositories:\n");
    for alias in aliases {
        yaml.push_str(&format!(
            "      - alias: {alias}\n        url: https://example.com/{alias}.git\n"
        ));
    }
    yaml
}

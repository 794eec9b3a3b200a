use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::entities::repository::Repository;
use crate::domain::value_objects::target_path;

/// A named collection of repositories sharing a root directory convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    /// `root_dir` override, already `~`-expanded
    pub root_dir: Option<PathBuf>,
    /// Declared repositories first, then discovered ones
    pub repositories: Vec<Repository>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_dir: None,
            repositories: Vec::new(),
        }
    }

    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    /// Effective root directory of this group.
    pub fn root(&self, home: &Path) -> PathBuf {
        target_path::group_root(home, &self.name, self.root_dir.as_deref())
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.repositories.iter().any(|r| r.alias == alias)
    }

    pub fn declared(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.iter().filter(|r| !r.unlisted)
    }

    pub fn unlisted(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.iter().filter(|r| r.unlisted)
    }
}

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::domain::entities::{group::Group, repository::Repository};

/// One unit of work: a repository together with the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoTarget {
    pub group: String,
    pub repository: Repository,
}

impl RepoTarget {
    pub fn new(group: impl Into<String>, repository: Repository) -> Self {
        Self {
            group: group.into(),
            repository,
        }
    }

    pub fn alias(&self) -> &str {
        &self.repository.alias
    }

    pub fn path(&self) -> &Path {
        &self.repository.target_path
    }
}

/// Every group known to one invocation, in configuration order.
///
/// Built once at start-up and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    home: PathBuf,
    groups: Vec<Group>,
}

impl Inventory {
    pub fn new(home: impl Into<PathBuf>, groups: Vec<Group>) -> Self {
        Self {
            home: home.into(),
            groups,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.group(name).is_some()
    }

    /// Groups matching the filter; all groups when there is none.
    pub fn selected_groups<'a>(&'a self, filter: Option<&'a str>) -> impl Iterator<Item = &'a Group> {
        self.groups
            .iter()
            .filter(move |g| filter.map_or(true, |name| g.name == name))
    }

    /// Flatten into (group, repository) pairs, group order then declaration order.
    ///
    /// An unknown filter yields an empty list.
    pub fn filtered(&self, filter: Option<&str>) -> Vec<RepoTarget> {
        self.selected_groups(filter)
            .flat_map(|group| {
                group
                    .repositories
                    .iter()
                    .map(move |repo| RepoTarget::new(group.name.clone(), repo.clone()))
            })
            .collect()
    }

    /// Effective root directory of a group, if the group exists.
    pub fn group_root(&self, name: &str) -> Option<PathBuf> {
        self.group(name).map(|g| g.root(&self.home))
    }

    pub fn repository_count(&self) -> usize {
        self.groups.iter().map(|g| g.repositories.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.repository_count() == 0
    }
}

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::error::GitsError;
use crate::common::result::GitsResult;
use crate::domain::entities::{Group, Inventory, Repository};
use crate::domain::value_objects::target_path;
use crate::infrastructure::filesystem::{ConfigStore, GroupDeclaration};

/// Turns configuration declarations into a resolved [`Inventory`].
///
/// Declared repositories get their target path computed, and every
/// directory under a group root that no declaration covers is appended as
/// an unlisted repository.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    home: PathBuf,
}

impl ConfigResolver {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Load and resolve a configuration file. Any error is fatal.
    pub fn resolve_file(&self, store: &ConfigStore) -> GitsResult<Inventory> {
        let declarations = store.load()?;
        self.resolve(declarations, Some(store.path()))
    }

    pub fn resolve(
        &self,
        declarations: Vec<GroupDeclaration>,
        config_path: Option<&Path>,
    ) -> GitsResult<Inventory> {
        let groups = declarations
            .into_iter()
            .map(|declaration| self.resolve_group(declaration, config_path))
            .collect::<GitsResult<Vec<_>>>()?;

        // Every group's declarations are known before any directory is scanned
        let declared_paths: HashSet<PathBuf> = groups
            .iter()
            .flat_map(|group| group.declared())
            .filter_map(|r| std::fs::canonicalize(&r.target_path).ok())
            .collect();

        let groups = groups
            .into_iter()
            .map(|mut group| {
                let unlisted = discover_unlisted(&group, &self.home, &declared_paths);
                group.repositories.extend(unlisted);
                group
            })
            .collect();
        Ok(Inventory::new(self.home.clone(), groups))
    }

    fn resolve_group(
        &self,
        declaration: GroupDeclaration,
        config_path: Option<&Path>,
    ) -> GitsResult<Group> {
        let mut group = Group::new(declaration.name.clone());
        if let Some(raw) = &declaration.root_dir {
            group = group.with_root_dir(target_path::expand_home(raw, &self.home));
        }

        for entry in &declaration.repositories {
            let explicit = entry
                .target_path
                .as_deref()
                .map(|raw| target_path::expand_home(raw, &self.home));
            let (path, source) = target_path::path_for(
                &self.home,
                &group.name,
                group.root_dir.as_deref(),
                &entry.alias,
                explicit.as_deref(),
            );

            let repository = Repository::declared(entry, path, source).map_err(|e| {
                GitsError::config_error_with_source(
                    format!("group '{}': invalid repository '{}'", group.name, entry.alias),
                    config_path.map(Path::to_path_buf),
                    e,
                )
            })?;
            group = group.with_repository(repository);
        }

        Ok(group)
    }
}

/// Immediate child directories of the group root that are not declared,
/// in name order.
///
/// A directory is skipped when its name is an alias of this group or its
/// canonical path is the canonical path of a repository declared in any
/// group.
fn discover_unlisted(
    group: &Group,
    home: &Path,
    declared_paths: &HashSet<PathBuf>,
) -> Vec<Repository> {
    let root = group.root(home);
    let entries = match std::fs::read_dir(&root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut children: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    children.sort_by(|a, b| a.0.cmp(&b.0));

    children
        .into_iter()
        .filter_map(|(name, path)| {
            if group.contains_alias(&name) {
                return None;
            }
            let canonical = std::fs::canonicalize(&path).unwrap_or(path);
            if declared_paths.contains(&canonical) {
                debug!(group = %group.name, dir = %name, "discovered directory is a declared repository");
                return None;
            }
            debug!(group = %group.name, dir = %name, "unlisted repository discovered");
            Some(Repository::unlisted(name, canonical))
        })
        .collect()
}

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

use crate::common::error::GitsError;
use crate::common::result::{GitsResult, ResultExt};
use crate::common::templates;
use crate::domain::entities::repository::RepositoryEntry;
use crate::domain::value_objects::target_path;

const ROOT_DIR_KEY: &str = "root_dir";
const REPOSITORIES_KEY: &str = "repositories";
const TARGET_PATH_KEY: &str = "target_path";

/// One group as declared in the configuration file, before path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDeclaration {
    pub name: String,
    /// Raw `root_dir` value, not yet `~`-expanded
    pub root_dir: Option<String>,
    pub repositories: Vec<RepositoryEntry>,
}

/// A `target_path` that `materialize` added (or would add) to the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializedPath {
    pub group: String,
    pub alias: String,
    pub target_path: PathBuf,
}

/// Reads and writes the repository configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load every group declaration, in file order.
    pub fn load(&self) -> GitsResult<Vec<GroupDeclaration>> {
        let content = self.read_raw()?;
        Self::parse_str(&content, Some(self.path.as_path()))
    }

    /// Parse configuration text. `path` is only used in error messages.
    pub fn parse_str(content: &str, path: Option<&Path>) -> GitsResult<Vec<GroupDeclaration>> {
        let error_path = path.map(Path::to_path_buf);
        let document: Value = serde_yaml::from_str(content)
            .with_config_error("configuration is not valid YAML", error_path.clone())?;

        let mapping = match document {
            Value::Null => return Ok(Vec::new()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(GitsError::config_error(
                    "top level must be a mapping of group names",
                    error_path,
                ))
            }
        };

        let mut groups = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = key.as_str().map(str::to_string).ok_or_else(|| {
                GitsError::config_error(
                    format!("group name must be a string, found {:?}", key),
                    error_path.clone(),
                )
            })?;
            groups.push(parse_group(name, value, error_path.as_deref())?);
        }
        Ok(groups)
    }

    /// Write the commented template. Refuses to overwrite unless `force`.
    pub fn write_template(&self, force: bool) -> GitsResult<()> {
        if self.path.exists() && !force {
            return Err(GitsError::config_error(
                "configuration file already exists (use --force to overwrite)",
                Some(self.path.clone()),
            ));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_filesystem_error("cannot create configuration directory", Some(parent.to_path_buf()))?;
        }
        std::fs::write(&self.path, templates::get_config_template())
            .with_filesystem_error("cannot write configuration file", Some(self.path.clone()))
    }

    /// Add an explicit `target_path` to every declared repository lacking one.
    ///
    /// The file is rewritten only when something was added and `dry_run` is
    /// off. Comments in the original file are not preserved.
    pub fn materialize(
        &self,
        home: &Path,
        group_filter: Option<&str>,
        dry_run: bool,
    ) -> GitsResult<Vec<MaterializedPath>> {
        // Validate first so a broken file is never rewritten
        self.load()?;

        let content = self.read_raw()?;
        let mut document: Value = serde_yaml::from_str(&content)
            .with_config_error("configuration is not valid YAML", Some(self.path.clone()))?;

        let mut added = Vec::new();
        if let Value::Mapping(groups) = &mut document {
            for (key, value) in groups.iter_mut() {
                let Some(name) = key.as_str() else { continue };
                if group_filter.map_or(false, |filter| filter != name) {
                    continue;
                }
                if let Value::Sequence(entries) = value {
                    added.extend(materialize_group(name, entries, home));
                }
            }
        }

        if added.is_empty() || dry_run {
            return Ok(added);
        }

        let rendered = serde_yaml::to_string(&document)?;
        std::fs::write(&self.path, rendered)
            .with_filesystem_error("cannot write configuration file", Some(self.path.clone()))?;
        debug!(path = %self.path.display(), count = added.len(), "configuration rewritten");
        Ok(added)
    }

    fn read_raw(&self) -> GitsResult<String> {
        std::fs::read_to_string(&self.path).with_config_error(
            format!("cannot read configuration file {}", self.path.display()),
            Some(self.path.clone()),
        )
    }
}

fn parse_group(name: String, value: Value, path: Option<&Path>) -> GitsResult<GroupDeclaration> {
    let error = |message: String| GitsError::config_error(message, path.map(Path::to_path_buf));

    let entries = match value {
        Value::Null => Vec::new(),
        Value::Sequence(entries) => entries,
        _ => return Err(error(format!("group '{}' must be a list of entries", name))),
    };

    let mut group = GroupDeclaration {
        name,
        root_dir: None,
        repositories: Vec::new(),
    };

    for entry in entries {
        let Value::Mapping(entry) = entry else {
            debug!(group = %group.name, "ignoring non-mapping entry");
            continue;
        };

        if let Some(root) = entry.get(ROOT_DIR_KEY) {
            let root = root
                .as_str()
                .ok_or_else(|| error(format!("group '{}': root_dir must be a string", group.name)))?;
            if group.root_dir.is_some() {
                return Err(error(format!("group '{}' declares root_dir more than once", group.name)));
            }
            group.root_dir = Some(root.to_string());
        }

        if let Some(repositories) = entry.get(REPOSITORIES_KEY) {
            let parsed: Vec<RepositoryEntry> = match repositories {
                Value::Null => Vec::new(),
                other => serde_yaml::from_value(other.clone()).map_err(|e| {
                    GitsError::config_error_with_source(
                        format!("group '{}': invalid repository entry", group.name),
                        path.map(Path::to_path_buf),
                        e,
                    )
                })?,
            };
            for repository in &parsed {
                repository.validate().map_err(|e| {
                    GitsError::config_error_with_source(
                        format!("group '{}': invalid repository '{}'", group.name, repository.alias),
                        path.map(Path::to_path_buf),
                        e,
                    )
                })?;
            }
            group.repositories.extend(parsed);
        }
    }

    let mut seen = HashSet::new();
    for repository in &group.repositories {
        if !seen.insert(repository.alias.as_str()) {
            return Err(error(format!(
                "group '{}' declares alias '{}' more than once",
                group.name, repository.alias
            )));
        }
    }

    Ok(group)
}

fn materialize_group(name: &str, entries: &mut [Value], home: &Path) -> Vec<MaterializedPath> {
    let root_dir = entries.iter().find_map(|entry| {
        entry
            .get(ROOT_DIR_KEY)
            .and_then(Value::as_str)
            .map(|raw| target_path::expand_home(raw, home))
    });

    let mut added = Vec::new();
    for entry in entries.iter_mut() {
        let Some(Value::Sequence(repositories)) = entry.get_mut(REPOSITORIES_KEY) else {
            continue;
        };
        for repository in repositories.iter_mut() {
            let Value::Mapping(record) = repository else { continue };
            if record.contains_key(TARGET_PATH_KEY) {
                continue;
            }
            let Some(alias) = record.get("alias").and_then(Value::as_str).map(str::to_string) else {
                continue;
            };
            let (path, _) = target_path::path_for(home, name, root_dir.as_deref(), &alias, None);
            insert_target_path(record, &path);
            added.push(MaterializedPath {
                group: name.to_string(),
                alias,
                target_path: path,
            });
        }
    }
    added
}

fn insert_target_path(record: &mut Mapping, path: &Path) {
    record.insert(
        Value::String(TARGET_PATH_KEY.to_string()),
        Value::String(path.display().to_string()),
    );
}

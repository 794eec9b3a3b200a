use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::common::result::{GitsResult, OptionExt};

/// Raw repository record as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RepositoryEntry {
    /// Short name, unique inside its group
    #[validate(
        length(min = 1, message = "alias must not be empty"),
        custom(function = "validate_alias")
    )]
    pub alias: String,

    /// Clone URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: Option<String>,

    /// Explicit checkout location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,

    /// Protects the checkout from `delete`
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub do_not_delete: bool,
}

/// An alias becomes one path component under the group root.
fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    if alias == "." || alias == ".." || alias.contains('/') || alias.contains('\\') {
        let mut error = ValidationError::new("alias_path_component");
        error.message = Some(Cow::from(format!(
            "alias '{}' must be a single directory name",
            alias
        )));
        return Err(error);
    }
    Ok(())
}

impl RepositoryEntry {
    pub fn new(alias: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            url: Some(url.into()),
            target_path: None,
            do_not_delete: false,
        }
    }

    pub fn with_target_path(mut self, target_path: impl Into<String>) -> Self {
        self.target_path = Some(target_path.into());
        self
    }

    pub fn with_do_not_delete(mut self, do_not_delete: bool) -> Self {
        self.do_not_delete = do_not_delete;
        self
    }
}

/// Where a repository's target path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSource {
    /// `target_path` in the configuration
    Explicit,
    /// `<root_dir>/<alias>`
    RootDir,
    /// `<home>/<group>/<alias>`
    HomeDefault,
    /// Found on disk under the group root
    Discovered,
}

/// A repository under management, with its path fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub alias: String,
    pub url: Option<String>,
    pub target_path: PathBuf,
    pub path_source: PathSource,
    pub do_not_delete: bool,
    pub unlisted: bool,
}

impl Repository {
    /// Build a declared repository from its validated configuration record.
    pub fn declared(
        entry: &RepositoryEntry,
        target_path: PathBuf,
        path_source: PathSource,
    ) -> GitsResult<Self> {
        entry.validate()?;
        let url = entry
            .url
            .clone()
            .ok_or_validation_error("url", format!("repository '{}' has no url", entry.alias))?;

        Ok(Self {
            alias: entry.alias.clone(),
            url: Some(url),
            target_path,
            path_source,
            do_not_delete: entry.do_not_delete,
            unlisted: false,
        })
    }

    /// A directory found under a group root that no declaration covers.
    pub fn unlisted(alias: impl Into<String>, target_path: PathBuf) -> Self {
        Self {
            alias: alias.into(),
            url: None,
            target_path,
            path_source: PathSource::Discovered,
            do_not_delete: false,
            unlisted: true,
        }
    }

    /// Whether the working copy is present on disk right now.
    pub fn exists(&self) -> bool {
        self.target_path.exists()
    }

    /// Whether the working copy carries a `.git` marker.
    pub fn has_vcs_marker(&self) -> bool {
        self.target_path.join(".git").exists()
    }
}

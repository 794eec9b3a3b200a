use std::path::{Path, PathBuf};

use crate::domain::entities::repository::PathSource;

/// Expand a leading `~` against `home`. Other paths are returned unchanged.
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Effective root directory of a group: its override, or `<home>/<group>`.
pub fn group_root(home: &Path, group_name: &str, root_dir: Option<&Path>) -> PathBuf {
    match root_dir {
        Some(root) => root.to_path_buf(),
        None => home.join(group_name),
    }
}

/// Resolve where a repository lives.
///
/// Precedence is the explicit path, then `root_dir/alias`, then
/// `home/group_name/alias`. Pure: the filesystem is never consulted.
pub fn path_for(
    home: &Path,
    group_name: &str,
    root_dir: Option<&Path>,
    alias: &str,
    explicit: Option<&Path>,
) -> (PathBuf, PathSource) {
    if let Some(explicit) = explicit {
        return (explicit.to_path_buf(), PathSource::Explicit);
    }
    match root_dir {
        Some(root) => (root.join(alias), PathSource::RootDir),
        None => (home.join(group_name).join(alias), PathSource::HomeDefault),
    }
}

use serde::Serialize;
use std::path::PathBuf;

use crate::domain::entities::Inventory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedRepository {
    pub alias: String,
    pub path: PathBuf,
    pub unlisted: bool,
    pub do_not_delete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupListing {
    pub name: String,
    pub root: PathBuf,
    pub repositories: Vec<ListedRepository>,
}

/// Groups (and their repositories) selected by the filter, in order.
pub fn list_groups(inventory: &Inventory, group_filter: Option<&str>) -> Vec<GroupListing> {
    inventory
        .selected_groups(group_filter)
        .map(|group| GroupListing {
            name: group.name.clone(),
            root: group.root(inventory.home()),
            repositories: group
                .repositories
                .iter()
                .map(|r| ListedRepository {
                    alias: r.alias.clone(),
                    path: r.target_path.clone(),
                    unlisted: r.unlisted,
                    do_not_delete: r.do_not_delete,
                })
                .collect(),
        })
        .collect()
}

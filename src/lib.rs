//! # gits - bulk git operations over groups of repositories
//!
//! `gits` reads a YAML file that sorts repositories into named groups and
//! applies one operation (clone, pull, clean, delete, status, stash, pop,
//! convert) to every repository of one group or of all groups, a few at a
//! time.
//!
//! ## Configuration
//!
//! ```yaml
//! tools:
//!   - root_dir: ~/src/tools
//!   - repositories:
//!       - alias: example
//!         url: https://github.com/example/example.git
//!       - alias: dotfiles
//!         url: https://github.com/example/dotfiles.git
//!         target_path: ~/.dotfiles
//!         do_not_delete: true
//! ```
//!
//! A repository lives at its `target_path`, else at `<root_dir>/<alias>`, else
//! at `~/<group>/<alias>`. Directories found under a group root that no entry
//! claims are picked up as *unlisted* repositories.
//!
//! ## Architecture
//!
//! - [`domain`]: groups, repositories, the inventory and per-repository outcomes
//! - [`application`]: configuration resolution, the worker pool, the reporter
//!   and one use case per operation
//! - [`infrastructure`]: the configuration file, runtime paths and the `git` adapter
//! - [`presentation`]: the command-line interface
//! - [`common`]: error types and the configuration template
//!
//! ## Using the library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gits::application::services::{ConfigResolver, Dispatcher, Reporter};
//! use gits::application::use_cases::{BulkOperationUseCase, OperationContext, StatusOperation};
//! use gits::infrastructure::filesystem::{ConfigStore, RuntimePaths};
//! use gits::infrastructure::scm::GitScm;
//!
//! # async fn example() -> gits::Result<()> {
//! let paths = RuntimePaths::resolve(None)?;
//! let inventory = ConfigResolver::new(&paths.home)
//!     .resolve_file(&ConfigStore::new(&paths.config_file))?;
//!
//! let reporter = Arc::new(Reporter::new(false));
//! let context = OperationContext::new(Arc::new(GitScm::default()));
//! let summary = BulkOperationUseCase::new(Dispatcher::default(), context, reporter)
//!     .execute(&inventory, Some("tools"), Arc::new(StatusOperation))
//!     .await?;
//!
//! println!("{} repositories, {} failures", summary.total, summary.failures);
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use crate::common::error::GitsError;
pub use crate::common::result::GitsResult as Result;

//! # Package Documentation Builder
//!
//! This library clones package repositories and hands them to an external
//! documentation generator. It is designed to be used by the `package-docs`
//! command-line tool, but the orchestration is independent of the CLI and
//! every external collaborator sits behind a trait.
//!
//! ## Quick Example
//!
//! ```
//! use package_docs::store::{PackageStore, YamlPackageStore};
//!
//! let store = YamlPackageStore::from_yaml_str(r#"
//! packages:
//!   - id: 1
//!     name: widgets
//!     fqn: acme/widgets
//!     ssh_url: git@example.com:acme/widgets.git
//!     clone: { enabled: true }
//!     docs: { enabled: true, docs_path: /srv/docs }
//! "#).unwrap();
//!
//! let documented = store.find_documented().unwrap();
//! assert_eq!(documented.len(), 1);
//! assert_eq!(documented[0].fqn, "acme/widgets");
//! ```
//!
//! ## Core Concepts
//!
//! - **Packages (`model`, `store`)**: package records with their clone and
//!   doc configurations, read and updated through `PackageStore`.
//! - **Directory lifecycle (`directory`)**: emptying, removing and
//!   recreating per-package working directories.
//! - **Cloning (`repository`, `git`)**: `git clone` with output streamed line
//!   by line.
//! - **Documentation jobs (`job`)**: the external generator, invoked with a
//!   package id.
//! - **Orchestration (`build`)**: selection, guard checks and sequencing.
//!
//! ## Execution Flow
//!
//! For every selected package, `build::DocBuilder`:
//!
//! 1.  Checks that the package, its clone configuration and its doc
//!     configuration are enabled.
//! 2.  Resets `{cache_root}/cloned_project/{fqn}` and clones into it.
//! 3.  Stores the clone directory as the doc configuration's repository path.
//! 4.  Resets `{docs_path}/{fqn}/build/` and `{cache_root}/sami/{fqn}`.
//! 5.  Runs the documentation job.

pub mod build;
pub mod defaults;
pub mod directory;
pub mod error;
pub mod git;
pub mod job;
pub mod model;
pub mod output;
pub mod path;
pub mod repository;
pub mod settings;
pub mod store;

//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture that lays out a settings file, a package
//! store and a cache root inside a temporary directory.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_store(stores::SINGLE_ENABLED)
//!         .with_settings("generator:\n  program: \"true\"\n");
//!     fixture.command().arg("sami:build").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::init_source_repo;
    #[allow(unused_imports)]
    pub use super::stores;
    pub use super::TestFixture;
}

/// Package store documents. `$DOCS` is replaced with the fixture's docs
/// directory and `$URL` with a caller-supplied clone URL.
#[allow(dead_code)]
pub mod stores {
    /// One fully enabled package named `bar`.
    pub const SINGLE_ENABLED: &str = r#"
packages:
  - id: 1
    name: bar
    fqn: acme/bar
    ssh_url: "$URL"
    clone: { enabled: true }
    docs: { enabled: true, docs_path: "$DOCS" }
"#;

    /// Two enabled packages plus a disabled one.
    pub const BATCH: &str = r#"
packages:
  - id: 1
    name: bar
    fqn: acme/bar
    ssh_url: "$URL"
    clone: { enabled: true }
    docs: { enabled: true, docs_path: "$DOCS" }
  - id: 2
    name: off
    fqn: acme/off
    enabled: false
    ssh_url: "$URL"
    clone: { enabled: true }
    docs: { enabled: true, docs_path: "$DOCS" }
  - id: 3
    name: baz
    fqn: acme/baz
    ssh_url: "$URL"
    clone: { enabled: true }
    docs: { enabled: true, docs_path: "$DOCS" }
"#;

    /// A package that is disabled.
    pub const DISABLED: &str = r#"
packages:
  - id: 1
    name: bar
    fqn: acme/bar
    enabled: false
    ssh_url: "$URL"
    clone: { enabled: true }
    docs: { enabled: true, docs_path: "$DOCS" }
"#;
}

/// A temporary workspace with `package-docs.yaml`, `packages.yaml`,
/// `cache/` and `docs/`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    url: String,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            url: "git@example.com:acme/bar.git".to_string(),
        }
    }

    /// Use `url` as the clone URL of every package in the store.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Write the package store, substituting `$DOCS` and `$URL`.
    pub fn with_store(self, content: &str) -> Self {
        let content = content
            .replace("$DOCS", &self.docs_dir().to_string_lossy())
            .replace("$URL", &self.url);
        self.temp_dir
            .child("packages.yaml")
            .write_str(&content)
            .expect("Failed to write store file");
        self
    }

    /// Write the settings file.
    pub fn with_settings(self, content: &str) -> Self {
        self.temp_dir
            .child("package-docs.yaml")
            .write_str(content)
            .expect("Failed to write settings file");
        self
    }

    /// Settings whose generator appends each package id to `generated.log`.
    #[cfg(unix)]
    pub fn with_recording_generator(self, git: &str) -> Self {
        let settings = format!(
            r#"git: "{git}"
generator:
  program: sh
  args: ["-c", "echo \"$1\" >> generated.log", "sh", "{{id}}"]
"#
        );
        self.with_settings(&settings)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.path().join("cache")
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.path().join("docs")
    }

    pub fn store_path(&self) -> PathBuf {
        self.path().join("packages.yaml")
    }

    /// Package ids the recording generator was run with.
    pub fn generated_ids(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join("generated.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in the fixture directory against its cache.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("package-docs");
        cmd.current_dir(self.path())
            .env_remove("PACKAGE_DOCS_CONFIG")
            .env_remove("PACKAGE_DOCS_STORE")
            .env("PACKAGE_DOCS_CACHE", self.cache_dir())
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a git repository with one commit at `dir`.
#[allow(dead_code)]
pub fn init_source_repo(dir: &Path) {
    std::fs::create_dir_all(dir).expect("Failed to create source repo dir");
    let git = |args: &[&str]| {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    };
    git(&["init", "-q"]);
    std::fs::write(dir.join("README.md"), "# source\n").expect("Failed to write README");
    git(&["add", "README.md"]);
    git(&[
        "-c",
        "user.name=Test",
        "-c",
        "user.email=test@example.com",
        "commit",
        "-q",
        "-m",
        "initial",
    ]);
}

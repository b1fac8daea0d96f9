//! # Repository Cloning
//!
//! This module provides the `CloneOperations` trait, the seam between the
//! build orchestrator and the version-control tool that fetches a package's
//! sources.
//!
//! ## Design
//!
//! The orchestrator never calls git directly. It holds a
//! `Box<dyn CloneOperations>`, which in the application is
//! `DefaultCloneOperations` (a wrapper around the system `git` command) and
//! in tests is a mock that records the requested URL and target directory or
//! simulates a failed clone.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::error::Result;
use crate::git::{self, Stream};

/// Trait for clone operations - allows mocking in tests
pub trait CloneOperations {
    /// Clone `url` into `target_dir`, passing each line of tool output to
    /// `on_line` as it is produced.
    ///
    /// `target_dir` exists and is empty when this is called.
    fn clone_repository(
        &self,
        url: &str,
        target_dir: &Path,
        on_line: &mut dyn FnMut(Stream, &str),
    ) -> Result<()>;
}

/// The default implementation of `CloneOperations`, which runs
/// `git clone <url> <dir>`.
#[derive(Debug, Clone)]
pub struct DefaultCloneOperations {
    program: OsString,
}

impl DefaultCloneOperations {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }
}

impl Default for DefaultCloneOperations {
    fn default() -> Self {
        Self::new()
    }
}

impl CloneOperations for DefaultCloneOperations {
    fn clone_repository(
        &self,
        url: &str,
        target_dir: &Path,
        on_line: &mut dyn FnMut(Stream, &str),
    ) -> Result<()> {
        git::clone_streaming(&self.program, url, target_dir, on_line)
    }
}

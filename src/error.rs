//! # Error Handling
//!
//! This module defines the centralized error type for the `package-docs`
//! library. It uses the `thiserror` library to describe every failure mode of
//! a documentation build with enough context to act on it.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures the library can report. Variants
//!   carry the package name, URL or path involved.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Not every variant is fatal. The build orchestrator decides per variant
//! whether a failure aborts the invocation, aborts a single package, or is
//! reported as a skip:
//!
//! - `PackageNotFound` is fatal for the invocation.
//! - `CloneFailed` aborts the package it belongs to.
//! - `DocBuild` is caught and reported as a skip.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for package-docs operations
#[derive(Error, Debug)]
pub enum Error {
    /// A package named on the command line does not exist in the store.
    #[error("Package not found: {name}")]
    PackageNotFound { name: String },

    /// `git clone` could not be started or exited unsuccessfully.
    ///
    /// Includes the repository URL, the exit status when one is available,
    /// git's stderr tail and an optional hint for resolution.
    #[error("Unable to clone package from {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    CloneFailed {
        url: String,
        status: Option<i32>,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// The documentation job failed for a package.
    #[error("Documentation build failed for package {package_id}: {message}")]
    DocBuild { package_id: u64, message: String },

    /// The package store could not be read or written.
    #[error("Package store error ({}): {message}", path.display())]
    Store { path: PathBuf, message: String },

    /// The settings file is malformed or incomplete.
    #[error("Settings error: {message}")]
    Settings { message: String },

    /// A path derived from package data would escape its root.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

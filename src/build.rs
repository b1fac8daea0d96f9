//! # Documentation Build Orchestration
//!
//! `DocBuilder` drives the whole flow for one invocation:
//!
//! 1. **Selection**: either the single package named by the caller, or every
//!    enabled package with an enabled doc configuration.
//! 2. **Guards**: the package, its clone configuration and its doc
//!    configuration must all be enabled; otherwise the package is skipped
//!    with a notice.
//! 3. **Clone**: the clone directory is reset and the repository is cloned
//!    into it. The doc configuration's repository path is then persisted.
//! 4. **Clean**: stale documentation output and generator cache are reset.
//! 5. **Generate**: the documentation job runs with the package id.
//!
//! A failed job is reported and the package counts as skipped. A failed
//! clone aborts the package; in single-package mode it is returned as an
//! error, in batch mode it is recorded and the next package is processed.

use std::io::Write;

use log::{info, warn};

use crate::directory::reset_directory;
use crate::error::{Error, Result};
use crate::job::DocJob;
use crate::model::Package;
use crate::output::Reporter;
use crate::path::BuildPaths;
use crate::repository::CloneOperations;
use crate::store::PackageStore;

/// Why a package was not built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    PackageDisabled,
    CloneDisabled,
    DocsDisabled,
    /// The documentation job failed; carries its error message.
    DocBuildFailed(String),
}

/// Result of processing one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Built,
    Skipped(SkipReason),
    /// Processing stopped before the documentation job ran.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub name: String,
    pub outcome: BuildOutcome,
}

/// Outcomes of every package processed in one run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub packages: Vec<PackageReport>,
}

impl BuildReport {
    pub fn built(&self) -> usize {
        self.count(|o| matches!(o, BuildOutcome::Built))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, BuildOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, BuildOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&BuildOutcome) -> bool) -> usize {
        self.packages.iter().filter(|p| pred(&p.outcome)).count()
    }

    fn push(&mut self, package: &Package, outcome: BuildOutcome) {
        self.packages.push(PackageReport {
            name: package.name.clone(),
            outcome,
        });
    }
}

/// Clones packages and builds their documentation.
pub struct DocBuilder {
    store: Box<dyn PackageStore>,
    cloner: Box<dyn CloneOperations>,
    job: Box<dyn DocJob>,
    paths: BuildPaths,
}

impl DocBuilder {
    pub fn new(
        store: Box<dyn PackageStore>,
        cloner: Box<dyn CloneOperations>,
        job: Box<dyn DocJob>,
        paths: BuildPaths,
    ) -> Self {
        Self {
            store,
            cloner,
            job,
            paths,
        }
    }

    pub fn store(&self) -> &dyn PackageStore {
        self.store.as_ref()
    }

    pub fn paths(&self) -> &BuildPaths {
        &self.paths
    }

    /// Build one named package, or every documented package when `name` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// In single-package mode: `PackageNotFound`, or any error that aborted
    /// the package before its documentation job ran. Batch mode only fails
    /// when the package list itself cannot be read.
    pub fn run<W: Write>(
        &mut self,
        name: Option<&str>,
        reporter: &mut Reporter<W>,
    ) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        match name {
            Some(name) => {
                let package = self
                    .store
                    .find_by_name(name)?
                    .ok_or_else(|| Error::PackageNotFound {
                        name: name.to_string(),
                    })?;
                let outcome = self.build_package(&package, reporter)?;
                report.push(&package, outcome);
            }
            None => {
                let packages = self.store.find_documented()?;
                info!("Building documentation for {} package(s)", packages.len());

                for package in packages {
                    let outcome = match self.build_package(&package, reporter) {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            warn!("Package {} failed: {}", package.name, err);
                            reporter.error(&format!(
                                "Unable to process package {}: {}",
                                package.name, err
                            ));
                            BuildOutcome::Failed(err.to_string())
                        }
                    };
                    report.push(&package, outcome);
                }
            }
        }

        Ok(report)
    }

    /// Run the guard chain, clone, clean and generate steps for one package.
    ///
    /// Disabled packages and documentation job failures come back as
    /// `Ok(BuildOutcome::Skipped(_))`. Anything that stops the package
    /// earlier is an error.
    pub fn build_package<W: Write>(
        &mut self,
        package: &Package,
        reporter: &mut Reporter<W>,
    ) -> Result<BuildOutcome> {
        if !package.enabled {
            reporter.comment(&format!(
                "Package {} is disabled. Skipping...",
                package.name
            ));
            return Ok(BuildOutcome::Skipped(SkipReason::PackageDisabled));
        }

        let clone_enabled = self
            .store
            .clone_configuration(package.id)?
            .is_some_and(|c| c.enabled);
        if !clone_enabled {
            reporter.comment(&format!(
                "Package {} is not configured to be cloned. Skipping...",
                package.name
            ));
            return Ok(BuildOutcome::Skipped(SkipReason::CloneDisabled));
        }

        let mut doc_config = match self.store.doc_configuration(package.id)? {
            Some(config) if config.enabled => config,
            _ => {
                reporter.comment(&format!(
                    "Package {} is not configured to build documentation. Skipping...",
                    package.name
                ));
                return Ok(BuildOutcome::Skipped(SkipReason::DocsDisabled));
            }
        };

        // Derive every path up front so a bad fqn touches nothing.
        let clone_dir = self.paths.clone_dir(&package.fqn)?;
        let docs_dir = BuildPaths::docs_build_dir(&doc_config.docs_path, &package.fqn)?;
        let cache_dir = self.paths.generator_cache_dir(&package.fqn)?;

        info!("Cloning {} into {}", package.ssh_url, clone_dir.display());
        reset_directory(&clone_dir)?;
        self.cloner
            .clone_repository(&package.ssh_url, &clone_dir, &mut |_, line| {
                reporter.line(line)
            })?;

        doc_config.repository_path = Some(clone_dir);
        self.store
            .save_doc_configuration(package.id, &doc_config)?;

        if docs_dir.is_dir() {
            reporter.comment(&format!(
                "Removing old documentation from {}...",
                docs_dir.display()
            ));
        }
        reset_directory(&docs_dir)?;

        if cache_dir.is_dir() {
            reporter.comment(&format!(
                "Removing old cache from {}...",
                cache_dir.display()
            ));
        }
        reset_directory(&cache_dir)?;

        match self.job.run(package.id, doc_config.title.as_deref()) {
            Ok(()) => {
                info!("Built documentation for {}", package.name);
                Ok(BuildOutcome::Built)
            }
            Err(err) => {
                warn!("Documentation job for {} failed: {}", package.name, err);
                reporter.error(&format!(
                    "Unable to build documentation for {}. Skipping...",
                    package.name
                ));
                Ok(BuildOutcome::Skipped(SkipReason::DocBuildFailed(
                    err.to_string(),
                )))
            }
        }
    }
}

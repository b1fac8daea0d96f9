//! # Build Command Implementation
//!
//! This module implements the `sami:build` subcommand, which clones a
//! package's repository and builds its documentation.
//!
//! ## Functionality
//!
//! - **Single package**: `package-docs sami:build <package>` builds the named
//!   package. An unknown name, or a clone failure, ends the command with a
//!   non-zero exit status.
//!
//! - **All packages**: without an argument, every enabled package with an
//!   enabled doc configuration is processed. Each package is independent; a
//!   failure is reported and the next package is processed.
//!
//! - **Configuration**: the cache root and store location come from the
//!   flags below, their environment variables, the settings file, or the
//!   defaults, in that order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use package_docs::build::DocBuilder;
use package_docs::output::{emoji, OutputConfig, Reporter};
use package_docs::path::BuildPaths;
use package_docs::repository::DefaultCloneOperations;
use package_docs::settings::Settings;
use package_docs::store::YamlPackageStore;

/// Clone a package and build its documentation
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Package name. If left blank, all packages.
    #[arg(value_name = "PACKAGE")]
    pub package: Option<String>,

    /// The root directory for the clone and generator caches.
    ///
    /// If not provided, it defaults to `cache_root` from the settings file,
    /// then to the system's cache directory.
    #[arg(long, value_name = "DIR", env = "PACKAGE_DOCS_CACHE")]
    pub cache_root: Option<PathBuf>,

    /// The package store file.
    #[arg(long, value_name = "FILE", env = "PACKAGE_DOCS_STORE")]
    pub store: Option<PathBuf>,
}

/// Execute the `sami:build` command.
pub fn execute(args: BuildArgs, config_path: &Path, output: OutputConfig) -> Result<()> {
    let settings = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;

    let cache_root = args
        .cache_root
        .unwrap_or_else(|| settings.cache_root_or_default());
    let store_path = args.store.unwrap_or_else(|| settings.store_or_default());

    let job = settings.doc_job()?;
    let store = YamlPackageStore::open(&store_path)
        .with_context(|| format!("Failed to open package store {}", store_path.display()))?;
    let cloner = match &settings.git {
        Some(program) => DefaultCloneOperations::with_program(program),
        None => DefaultCloneOperations::new(),
    };

    log::debug!(
        "Using cache root {} and store {}",
        cache_root.display(),
        store_path.display()
    );

    let mut builder = DocBuilder::new(
        Box::new(store),
        Box::new(cloner),
        Box::new(job),
        BuildPaths::new(cache_root),
    );
    let mut reporter = Reporter::stdout(output.clone());

    let report = match args.package.as_deref() {
        Some(name) => builder
            .run(Some(name), &mut reporter)
            .with_context(|| format!("Failed to build documentation for {}", name))?,
        None => builder.run(None, &mut reporter)?,
    };

    if report.packages.is_empty() {
        println!("No packages are configured to build documentation.");
        return Ok(());
    }

    println!(
        "{} {} built, {} skipped, {} failed",
        emoji(&output, "📚", "[DONE]"),
        report.built(),
        report.skipped(),
        report.failed()
    );

    Ok(())
}

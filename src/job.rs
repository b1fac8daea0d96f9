//! Documentation job invocation

use std::path::PathBuf;
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};

/// Environment variable carrying the package id into the generator.
pub const PACKAGE_ID_ENV: &str = "PACKAGE_DOCS_PACKAGE_ID";

/// Environment variable carrying the documentation title, when one is set.
pub const TITLE_ENV: &str = "PACKAGE_DOCS_TITLE";

/// Placeholder replaced with the package id in generator arguments.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Placeholder replaced with the documentation title; empty when unset.
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// Generates documentation for one package.
///
/// Implementations get the package id and the display title from its doc
/// configuration, and look up anything else themselves. Failures are
/// returned, never panicked, so the caller can decide whether they abort
/// anything.
pub trait DocJob {
    fn run(&self, package_id: u64, title: Option<&str>) -> Result<()>;
}

/// Runs an external documentation generator and waits for it to exit.
#[derive(Debug, Clone)]
pub struct CommandDocJob {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandDocJob {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Arguments with every `{id}` replaced by `package_id` and every
    /// `{title}` by `title`.
    pub fn render_args(&self, package_id: u64, title: Option<&str>) -> Vec<String> {
        let id = package_id.to_string();
        let title = title.unwrap_or_default();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(ID_PLACEHOLDER, &id)
                    .replace(TITLE_PLACEHOLDER, title)
            })
            .collect()
    }
}

impl DocJob for CommandDocJob {
    fn run(&self, package_id: u64, title: Option<&str>) -> Result<()> {
        let args = self.render_args(package_id, title);
        info!(
            "Running documentation generator for package {}: {} {}",
            package_id,
            self.program,
            args.join(" ")
        );

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .env(PACKAGE_ID_ENV, package_id.to_string());
        match title {
            Some(title) => command.env(TITLE_ENV, title),
            None => command.env_remove(TITLE_ENV),
        };
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|e| Error::DocBuild {
            package_id,
            message: format!("failed to run {}: {}", self.program, e),
        })?;

        if !status.success() {
            return Err(Error::DocBuild {
                package_id,
                message: format!("{} exited with {}", self.program, status),
            });
        }

        debug!("Documentation generator finished for package {}", package_id);
        Ok(())
    }
}

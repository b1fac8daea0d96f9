//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use crate::commands;
use package_docs::defaults;
use package_docs::output::OutputConfig;

/// Package documentation builder - clone packages and generate their docs
#[derive(Parser, Debug)]
#[command(name = "package-docs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Settings file
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "PACKAGE_DOCS_CONFIG",
        default_value = defaults::SETTINGS_FILE
    )]
    config: PathBuf,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clones project and builds documentation.
    #[command(name = "sami:build")]
    Build(commands::build::BuildArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // RUST_LOG wins over --log-level when set
        env_logger::Builder::from_env(Env::default().default_filter_or(&self.log_level))
            .format_timestamp(None)
            .init();

        let output = OutputConfig::from_env_and_flag(&self.color);
        console::set_colors_enabled(output.use_color);
        console::set_colors_enabled_stderr(output.use_color);

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &self.config, output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

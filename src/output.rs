//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance and
//! the `Reporter` through which the build prints user-facing messages.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Message kinds
//!
//! Messages come in two flavours. *Comments* are notices such as skipped
//! packages or removed directories, printed in yellow. *Errors* are failures
//! the run recovered from, printed in red. Subprocess output is passed
//! through unstyled.

use std::env;
use std::io::{self, Write};

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Writes build messages to a terminal or any other sink.
#[derive(Debug)]
pub struct Reporter<W: Write = io::Stdout> {
    out: W,
    config: OutputConfig,
}

impl Reporter<io::Stdout> {
    pub fn stdout(config: OutputConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, config: OutputConfig) -> Self {
        Self { out, config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// A notice, e.g. a skipped package.
    pub fn comment(&mut self, message: &str) {
        let text = if self.config.use_color {
            style(message).yellow().to_string()
        } else {
            message.to_string()
        };
        self.write_line(&text);
    }

    /// A failure the run recovered from.
    pub fn error(&mut self, message: &str) {
        let text = if self.config.use_color {
            style(message).red().to_string()
        } else {
            message.to_string()
        };
        self.write_line(&text);
    }

    /// Plain output such as a line from a subprocess.
    pub fn line(&mut self, message: &str) {
        self.write_line(message);
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, text: &str) {
        // A closed stdout must not turn into a build failure.
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}

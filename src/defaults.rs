//! Default values for package-docs configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Settings file looked up in the working directory when `--config` is not
/// given.
pub const SETTINGS_FILE: &str = "package-docs.yaml";

/// Package store file used when the settings do not name one.
pub const STORE_FILE: &str = "packages.yaml";

/// Returns the default cache root directory.
///
/// Uses the platform-appropriate cache directory:
/// - Linux: `~/.cache/package-docs` (XDG Base Directory)
/// - macOS: `~/Library/Caches/package-docs`
/// - Windows: `{FOLDERID_LocalAppData}\package-docs`
///
/// Falls back to `.package-docs-cache` in the current directory if the
/// platform cache directory cannot be determined.
///
/// This can be overridden by the `--cache-root` CLI flag, the
/// `PACKAGE_DOCS_CACHE` environment variable or `cache_root` in the settings
/// file.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".package-docs-cache"))
        .join("package-docs")
}

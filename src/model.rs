//! Package records and their per-package configurations

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A unit of source code tracked by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: u64,
    pub name: String,
    /// Fully-qualified name, e.g. `acme/widgets`. Namespaces cache and
    /// output paths.
    pub fqn: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub ssh_url: String,
}

/// Whether a package's repository may be cloned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneConfiguration {
    #[serde(default)]
    pub enabled: bool,
}

/// How documentation is generated for a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocConfiguration {
    #[serde(default)]
    pub enabled: bool,
    /// Root under which `{fqn}/build/` receives generated output.
    pub docs_path: PathBuf,
    /// Where the repository was last cloned to. Written by the build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

fn default_enabled() -> bool {
    true
}

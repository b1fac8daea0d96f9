//! Path derivation for per-package cache and output directories

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Directory under the cache root that receives fresh clones.
pub const CLONE_DIR: &str = "cloned_project";

/// Directory under the cache root used by the documentation generator.
pub const GENERATOR_CACHE_DIR: &str = "sami";

/// Validate an fqn and return it as a relative path.
///
/// The fqn becomes part of several filesystem paths, so every `/`-separated
/// segment must be a plain name: no root, no empty segment, no `.` and no
/// `..`. The raw string is checked because `Path::components` drops interior
/// `.` segments.
pub fn fqn_path(fqn: &str) -> Result<PathBuf> {
    if fqn.trim().is_empty() {
        return Err(Error::Path {
            message: "Package fqn is empty".to_string(),
        });
    }

    let invalid = fqn
        .split(['/', '\\'])
        .any(|segment| matches!(segment, "" | "." | ".."));
    let path = Path::new(fqn);
    if invalid || path.components().any(|c| !matches!(c, Component::Normal(_))) {
        return Err(Error::Path {
            message: format!(
                "Package fqn '{}' must be a relative path without '.' or '..'",
                fqn
            ),
        });
    }

    Ok(path.to_path_buf())
}

/// Derived locations used while building one package.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    cache_root: PathBuf,
}

impl BuildPaths {
    pub fn new(cache_root: PathBuf) -> Self {
        Self { cache_root }
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// `{cache_root}/cloned_project/{fqn}`
    pub fn clone_dir(&self, fqn: &str) -> Result<PathBuf> {
        Ok(self.cache_root.join(CLONE_DIR).join(fqn_path(fqn)?))
    }

    /// `{cache_root}/sami/{fqn}`
    pub fn generator_cache_dir(&self, fqn: &str) -> Result<PathBuf> {
        Ok(self.cache_root.join(GENERATOR_CACHE_DIR).join(fqn_path(fqn)?))
    }

    /// `{docs_path}/{fqn}/build/`
    pub fn docs_build_dir(docs_path: &Path, fqn: &str) -> Result<PathBuf> {
        Ok(docs_path.join(fqn_path(fqn)?).join("build"))
    }
}

//! # Directory Lifecycle
//!
//! Helpers for clearing per-package working directories before a build.
//!
//! Removal walks the tree contents-first, so every file is unlinked before
//! its parent directory is removed. Symlinks are unlinked and never followed.
//!
//! Entries that vanish while the walk is in progress (for example because
//! another process cleaned the same cache) are treated as already removed.
//! Any other I/O failure is returned to the caller.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, trace};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Recursively delete `path` and everything below it.
///
/// Returns `true` when something was removed, `false` when the path did not
/// exist in the first place.
pub fn remove_directory(path: &Path) -> Result<bool> {
    let mut removed_any = false;

    let walker = WalkDir::new(path)
        .contents_first(true)
        .follow_links(false)
        .follow_root_links(false);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_not_found(err.io_error()) => {
                trace!("Skipping vanished entry under {}", path.display());
                continue;
            }
            Err(err) => {
                return Err(Error::Io(
                    err.into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory walk failed")),
                ))
            }
        };

        let result = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };

        match result {
            Ok(()) => removed_any = true,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(Error::Io(err)),
        }
    }

    if removed_any {
        debug!("Removed directory {}", path.display());
    }
    Ok(removed_any)
}

/// Empty and remove `path` if present, then recreate it (with parents).
///
/// Returns `true` when stale content was removed first.
pub fn reset_directory(path: &Path) -> Result<bool> {
    let had_content = if path.exists() || path.is_symlink() {
        remove_directory(path)?
    } else {
        false
    };

    fs::create_dir_all(path)?;
    Ok(had_content)
}

fn is_not_found(err: Option<&io::Error>) -> bool {
    err.is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

//! # Package Store
//!
//! Read access to package records and their clone/doc configurations, plus
//! the one write the build needs: persisting a doc configuration after its
//! repository path changes.
//!
//! `PackageStore` is the seam; `YamlPackageStore` is the file-backed
//! implementation used by the CLI. A store document looks like:
//!
//! ```yaml
//! packages:
//!   - id: 1
//!     name: widgets
//!     fqn: acme/widgets
//!     enabled: true
//!     ssh_url: git@github.com:acme/widgets.git
//!     clone:
//!       enabled: true
//!     docs:
//!       enabled: true
//!       docs_path: /srv/docs
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{CloneConfiguration, DocConfiguration, Package};

/// Persistence for packages and their configurations.
pub trait PackageStore {
    /// Look up a single package by its name.
    fn find_by_name(&self, name: &str) -> Result<Option<Package>>;

    /// All packages that are enabled and have an enabled doc configuration,
    /// in store order.
    fn find_documented(&self) -> Result<Vec<Package>>;

    fn clone_configuration(&self, package_id: u64) -> Result<Option<CloneConfiguration>>;

    fn doc_configuration(&self, package_id: u64) -> Result<Option<DocConfiguration>>;

    /// Replace and persist the doc configuration of a package.
    fn save_doc_configuration(&mut self, package_id: u64, config: &DocConfiguration)
        -> Result<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    packages: Vec<PackageRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PackageRecord {
    #[serde(flatten)]
    package: Package,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clone: Option<CloneConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    docs: Option<DocConfiguration>,
}

/// A `PackageStore` backed by a YAML document.
///
/// When opened from a file, every save rewrites that file and a relative
/// `docs_path` is read relative to the file's directory. Stores built from
/// a string only live in memory and leave paths as written.
#[derive(Debug, Clone)]
pub struct YamlPackageStore {
    path: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    document: StoreDocument,
}

impl YamlPackageStore {
    /// Load the store from `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Store {
            path: path.to_path_buf(),
            message: format!("cannot read store: {}", e),
        })?;
        let document = parse_document(&content, path)?;
        debug!(
            "Loaded {} package(s) from {}",
            document.packages.len(),
            path.display()
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            base_dir: path.parent().map(Path::to_path_buf),
            document,
        })
    }

    /// Build an in-memory store from YAML content.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document = parse_document(content, Path::new("<memory>"))?;
        Ok(Self {
            path: None,
            base_dir: None,
            document,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn record(&self, package_id: u64) -> Option<&PackageRecord> {
        self.document
            .packages
            .iter()
            .find(|r| r.package.id == package_id)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let yaml = serde_yaml::to_string(&self.document)?;
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, yaml).map_err(|e| Error::Store {
            path: path.clone(),
            message: format!("cannot write store: {}", e),
        })?;
        fs::rename(&tmp, path).map_err(|e| Error::Store {
            path: path.clone(),
            message: format!("cannot replace store: {}", e),
        })?;
        debug!("Wrote package store {}", path.display());
        Ok(())
    }
}

fn parse_document(content: &str, path: &Path) -> Result<StoreDocument> {
    let document: StoreDocument = if content.trim().is_empty() {
        StoreDocument::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| Error::Store {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for record in &document.packages {
        if !ids.insert(record.package.id) {
            return Err(Error::Store {
                path: path.to_path_buf(),
                message: format!("duplicate package id {}", record.package.id),
            });
        }
        if !names.insert(record.package.name.as_str()) {
            return Err(Error::Store {
                path: path.to_path_buf(),
                message: format!("duplicate package name '{}'", record.package.name),
            });
        }
    }

    Ok(document)
}

impl PackageStore for YamlPackageStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Package>> {
        Ok(self
            .document
            .packages
            .iter()
            .find(|r| r.package.name == name)
            .map(|r| r.package.clone()))
    }

    fn find_documented(&self) -> Result<Vec<Package>> {
        Ok(self
            .document
            .packages
            .iter()
            .filter(|r| r.package.enabled && r.docs.as_ref().is_some_and(|d| d.enabled))
            .map(|r| r.package.clone())
            .collect())
    }

    fn clone_configuration(&self, package_id: u64) -> Result<Option<CloneConfiguration>> {
        Ok(self.record(package_id).and_then(|r| r.clone.clone()))
    }

    fn doc_configuration(&self, package_id: u64) -> Result<Option<DocConfiguration>> {
        Ok(self.record(package_id).and_then(|r| r.docs.clone()).map(|mut docs| {
            docs.docs_path = self.resolve(&docs.docs_path);
            docs
        }))
    }

    fn save_doc_configuration(
        &mut self,
        package_id: u64,
        config: &DocConfiguration,
    ) -> Result<()> {
        let store_path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("<memory>"));
        let stored_docs_path = self
            .record(package_id)
            .ok_or_else(|| Error::Store {
                path: store_path,
                message: format!("no package with id {}", package_id),
            })?
            .docs
            .as_ref()
            .map(|d| d.docs_path.clone());

        // Keep the path as written when it still points at the same place.
        let mut config = config.clone();
        if let Some(stored) = stored_docs_path {
            if self.resolve(&stored) == config.docs_path {
                config.docs_path = stored;
            }
        }

        if let Some(record) = self
            .document
            .packages
            .iter_mut()
            .find(|r| r.package.id == package_id)
        {
            record.docs = Some(config);
        }
        self.flush()
    }
}

//! # Settings
//!
//! Tool configuration read from a YAML file:
//!
//! ```yaml
//! cache_root: /var/cache/packages
//! store: packages.yaml
//! git: /usr/bin/git
//! generator:
//!   program: sami
//!   args: ["update", "config/sami.php", "--package={id}"]
//!   working_dir: /srv/app
//! ```
//!
//! Every key is optional. Relative paths are resolved against the directory
//! containing the settings file. CLI flags and environment variables are
//! applied on top by the command layer.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::job::CommandDocJob;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Root for the clone and generator caches.
    #[serde(default)]
    pub cache_root: Option<PathBuf>,

    /// Package store file.
    #[serde(default)]
    pub store: Option<PathBuf>,

    /// git executable; `git` from `PATH` when unset.
    #[serde(default)]
    pub git: Option<String>,

    #[serde(default)]
    pub generator: Option<GeneratorSettings>,
}

/// The external documentation generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings {
    pub program: String,
    /// Arguments; `{id}` is replaced by the package id.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from YAML content.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(content).map_err(|e| Error::Settings {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from `path`, resolving relative paths against its
    /// directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Settings {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let settings = Self::parse(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(settings.resolve_relative_to(base))
    }

    /// Like `from_file`, but a missing file yields default settings.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    fn validate(&self) -> Result<()> {
        if let Some(generator) = &self.generator {
            if generator.program.trim().is_empty() {
                return Err(Error::Settings {
                    message: "generator.program must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    fn resolve_relative_to(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.cache_root = self.cache_root.map(resolve);
        self.store = self.store.map(resolve);
        if let Some(generator) = self.generator.as_mut() {
            generator.working_dir = generator.working_dir.take().map(resolve);
        }
        self
    }

    /// The configured cache root, or the platform default.
    pub fn cache_root_or_default(&self) -> PathBuf {
        self.cache_root
            .clone()
            .unwrap_or_else(defaults::default_cache_root)
    }

    /// The configured store, or `packages.yaml` in the working directory.
    pub fn store_or_default(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::STORE_FILE))
    }

    /// Build the documentation job described by `generator`.
    pub fn doc_job(&self) -> Result<CommandDocJob> {
        let generator = self.generator.as_ref().ok_or_else(|| Error::Settings {
            message: "no documentation generator configured (set `generator.program`)"
                .to_string(),
        })?;

        let job = CommandDocJob::new(generator.program.clone(), generator.args.clone());
        Ok(match &generator.working_dir {
            Some(dir) => job.with_working_dir(dir.clone()),
            None => job,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_settings() {
        let yaml = r#"
cache_root: /var/cache/packages
store: /srv/packages.yaml
git: /usr/bin/git
generator:
  program: sami
  args: ["update", "sami.php", "--package={id}"]
"#;
        let settings = Settings::parse(yaml).unwrap();
        assert_eq!(settings.cache_root, Some(PathBuf::from("/var/cache/packages")));
        assert_eq!(settings.git.as_deref(), Some("/usr/bin/git"));

        let job = settings.doc_job().unwrap();
        assert_eq!(job.render_args(9, None), vec!["update", "sami.php", "--package=9"]);
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.cache_root_or_default().ends_with("package-docs"));
        assert_eq!(settings.store_or_default(), PathBuf::from("packages.yaml"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Settings::parse("cache_dir: /tmp\n").unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
    }

    #[test]
    fn test_empty_generator_program_is_rejected() {
        let err = Settings::parse("generator:\n  program: \"\"\n").unwrap_err();
        assert!(err.to_string().contains("generator.program"));
    }

    #[test]
    fn test_doc_job_requires_generator() {
        let err = Settings::default().doc_job().unwrap_err();
        assert!(err.to_string().contains("no documentation generator configured"));
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package-docs.yaml");
        fs::write(
            &path,
            "cache_root: cache\nstore: data/packages.yaml\ngenerator:\n  program: sami\n  working_dir: app\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.cache_root, Some(temp.path().join("cache")));
        assert_eq!(settings.store, Some(temp.path().join("data/packages.yaml")));
        assert_eq!(
            settings.generator.unwrap().working_dir,
            Some(temp.path().join("app"))
        );
    }

    #[test]
    fn test_load_or_default_tolerates_missing_file() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load_or_default(temp.path().join("absent.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}

//! Upward search for a project's glint configuration.
//!
//! Each directory from the starting point up to the filesystem root (or an
//! optional stop directory) is checked against [`SEARCH_PLACES`] in order.
//! The first source found wins; a nearer directory always beats a farther one.

use crate::app::error::ConfigError;
use crate::app::fs::FileSystem;
use crate::app::path::{normalize_path, to_absolute};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const MANIFEST_KEY: &str = "glint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Loader {
    /// `package.json`, payload under the `glint` key.
    Manifest,
    Json,
    /// YAML, which also accepts JSON content.
    Yaml,
    Toml,
    /// JavaScript modules, which this crate cannot evaluate.
    Unsupported,
}

const SEARCH_PLACES: &[(&str, Loader)] = &[
    ("package.json", Loader::Manifest),
    (".glintrc", Loader::Yaml),
    (".glintrc.json", Loader::Json),
    (".glintrc.yaml", Loader::Yaml),
    (".glintrc.yml", Loader::Yaml),
    (".glintrc.toml", Loader::Toml),
    (".glintrc.js", Loader::Unsupported),
    (".glintrc.cjs", Loader::Unsupported),
    ("glint.config.js", Loader::Unsupported),
    ("glint.config.cjs", Loader::Unsupported),
];

/// A configuration source located on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovered {
    /// Directory holding the source; becomes the project root.
    pub root_dir: PathBuf,
    /// The file the payload was read from.
    pub source: PathBuf,
    pub payload: Value,
}

pub struct ConfigLocator<'a, F: FileSystem> {
    fs: &'a F,
    stop_dir: Option<PathBuf>,
}

impl<'a, F: FileSystem> ConfigLocator<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs, stop_dir: None }
    }

    /// Bounds the walk: `dir` is still searched, its ancestors are not.
    pub fn stop_at(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stop_dir = Some(dir.into());
        self
    }

    /// Returns `Ok(None)` when no source exists up to the filesystem root.
    pub fn search(&self, start_dir: &Path) -> Result<Option<Discovered>, ConfigError> {
        let start_dir = PathBuf::from(absolute_dir(&start_dir.to_string_lossy())?);
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            log::trace!("Searching {} for glint configuration", dir.display());

            if let Some(found) = self.search_dir(dir)? {
                log::debug!("Using glint configuration from {}", found.source.display());
                return Ok(Some(found));
            }

            if self.stop_dir.as_deref() == Some(dir) {
                log::debug!("Reached stop directory {}", dir.display());
                break;
            }
            current = dir.parent();
        }

        Ok(None)
    }

    fn search_dir(&self, dir: &Path) -> Result<Option<Discovered>, ConfigError> {
        let entries: HashSet<String> = match self.fs.read_dir(dir) {
            Ok(names) => names.into_iter().collect(),
            Err(err) => {
                log::trace!("Skipping unreadable directory {}: {}", dir.display(), err);
                return Ok(None);
            }
        };

        for (name, loader) in SEARCH_PLACES {
            if !entries.contains(*name) {
                continue;
            }

            let path = dir.join(name);
            if !self.fs.is_file(&path) {
                continue;
            }

            if let Some(payload) = self.load(&path, *loader)? {
                return Ok(Some(Discovered {
                    root_dir: dir.to_path_buf(),
                    source: path,
                    payload,
                }));
            }
        }

        Ok(None)
    }

    /// `Ok(None)` means the file does not count as a source (empty, or a
    /// manifest without the glint key).
    fn load(&self, path: &Path, loader: Loader) -> Result<Option<Value>, ConfigError> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        if content.trim().is_empty() {
            log::trace!("Ignoring empty {}", path.display());
            return Ok(None);
        }

        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match loader {
            Loader::Manifest => {
                let manifest: Value =
                    serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
                Ok(manifest.get(MANIFEST_KEY).cloned())
            }
            Loader::Json => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| parse_error(e.to_string())),
            Loader::Yaml => serde_yaml::from_str::<Value>(&content)
                .map(Some)
                .map_err(|e| parse_error(e.to_string())),
            Loader::Toml => toml::from_str::<Value>(&content)
                .map(Some)
                .map_err(|e| parse_error(e.to_string())),
            Loader::Unsupported => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// `dir` as an absolute, forward-slash path; relative input is taken from the
/// current directory.
pub(crate) fn absolute_dir(dir: &str) -> Result<String, ConfigError> {
    to_absolute(&normalize_path(dir)).map_err(|source| ConfigError::CurrentDir {
        path: PathBuf::from(dir),
        source,
    })
}

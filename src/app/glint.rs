//! Resolved project configuration and the membership query.

use crate::app::config::ConfigLocator;
use crate::app::error::ConfigError;
use crate::app::fs::{FileSystem, OsFileSystem};
use crate::app::matcher::{GlobEngine, GlobsetEngine, Matcher};
use crate::app::models::GlintConfigInput;
use crate::app::config::absolute_dir;
use crate::app::path::normalize_path;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Include/exclude rules rooted at a project directory.
///
/// Immutable once built; safe to query from several threads.
pub struct GlintConfig {
    root_dir: String,
    source: Option<PathBuf>,
    include_matchers: Vec<Box<dyn Matcher>>,
    exclude_matchers: Vec<Box<dyn Matcher>>,
}

impl GlintConfig {
    /// Builds a config from a raw payload using the `globset` engine.
    pub fn new(root_dir: &str, payload: &Value) -> Result<Self, ConfigError> {
        Self::with_engine(root_dir, payload, &GlobsetEngine)
    }

    /// Config with only the default patterns.
    pub fn with_defaults(root_dir: &str) -> Result<Self, ConfigError> {
        Self::new(root_dir, &Value::Null)
    }

    pub fn with_engine(
        root_dir: &str,
        payload: &Value,
        engine: &dyn GlobEngine,
    ) -> Result<Self, ConfigError> {
        let input = GlintConfigInput::from_payload(payload)?;
        let root_dir = absolute_dir(root_dir)?;

        let include_matchers = build_matchers(engine, &root_dir, &input.include_or_default())?;
        let exclude_matchers = build_matchers(engine, &root_dir, &input.exclude_or_default())?;

        Ok(Self {
            root_dir,
            source: None,
            include_matchers,
            exclude_matchers,
        })
    }

    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    /// The file this config was loaded from, if it was discovered.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn include_patterns(&self) -> Vec<&str> {
        self.include_matchers.iter().map(|m| m.pattern()).collect()
    }

    pub fn exclude_patterns(&self) -> Vec<&str> {
        self.exclude_matchers.iter().map(|m| m.pattern()).collect()
    }

    /// True when no exclude pattern matches and at least one include pattern does.
    pub fn includes_file(&self, raw_path: &str) -> bool {
        let path = normalize_path(raw_path);

        self.exclude_matchers.iter().all(|m| !m.matches(&path))
            && self.include_matchers.iter().any(|m| m.matches(&path))
    }
}

impl fmt::Debug for GlintConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlintConfig")
            .field("root_dir", &self.root_dir)
            .field("source", &self.source)
            .field("include", &self.include_patterns())
            .field("exclude", &self.exclude_patterns())
            .finish()
    }
}

fn build_matchers(
    engine: &dyn GlobEngine,
    root_dir: &str,
    patterns: &[String],
) -> Result<Vec<Box<dyn Matcher>>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| engine.compile(pattern, root_dir))
        .collect()
}

/// Loads the configuration governing `start_dir` from disk.
///
/// Falls back to the defaults rooted at `start_dir` when no source exists.
pub fn discover(start_dir: &Path) -> Result<GlintConfig, ConfigError> {
    discover_with(&ConfigLocator::new(&OsFileSystem), start_dir)
}

pub fn discover_with<F: FileSystem>(
    locator: &ConfigLocator<'_, F>,
    start_dir: &Path,
) -> Result<GlintConfig, ConfigError> {
    let start_dir = PathBuf::from(absolute_dir(&start_dir.to_string_lossy())?);

    match locator.search(&start_dir)? {
        Some(found) => {
            let mut config =
                GlintConfig::new(&found.root_dir.to_string_lossy(), &found.payload)?;
            config.source = Some(found.source);
            Ok(config)
        }
        None => {
            log::debug!(
                "No glint configuration above {}, using defaults",
                start_dir.display()
            );
            GlintConfig::with_defaults(&start_dir.to_string_lossy())
        }
    }
}

//! Locates a project's glint configuration and decides which files are in scope.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let config = glint_config::discover(Path::new("/work/app")).unwrap();
//! if config.includes_file("/work/app/src/index.ts") {
//!     println!("in scope under {}", config.root_dir());
//! }
//! ```

pub mod app;

pub use app::config::{ConfigLocator, Discovered};
pub use app::error::{ConfigError, InvalidField, ValidationError};
pub use app::fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use app::glint::{discover, discover_with, GlintConfig};
pub use app::matcher::{GlobEngine, GlobsetEngine, Matcher};
pub use app::models::GlintConfigInput;
pub use app::path::{normalize_path, normalize_with};

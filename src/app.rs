// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod fs;
pub mod glint;
pub mod matcher;
pub mod models;
pub mod path;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::config::ConfigLocator;
use self::formatter::OutputGenerator;
use self::fs::OsFileSystem;
use self::glint::{discover_with, GlintConfig};
use self::models::Membership;
use self::path::{normalize_path, resolve_path};
use self::scanner::Scanner;

/// Discovers the configuration and answers the requested queries.
///
/// Returns `false` when `--check` was given and some path is out of scope.
pub fn run() -> Result<bool> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Locate the starting directory
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let start_dir = match &args.from {
        Some(from) => PathBuf::from(absolutize(&current_dir, from)),
        None => current_dir.clone(),
    };

    // 3. Discover configuration
    let config = load_config(&start_dir, args.stop_at_home)?;

    if args.show_config {
        println!("{}", OutputGenerator::generate_config_summary(&config, args.json)?);
        if args.paths.is_empty() {
            return Ok(true);
        }
    }

    // 4. Membership queries
    if !args.paths.is_empty() {
        let results: Vec<Membership> = args
            .paths
            .iter()
            .map(|path| {
                Membership {
                    path: path.display().to_string(),
                    included: config.includes_file(&absolutize(&current_dir, path)),
                }
            })
            .collect();

        println!("{}", OutputGenerator::generate_memberships(&results, args.json)?);
        return Ok(!args.check || results.iter().all(|m| m.included));
    }

    // 5. Scan the project root
    let entries = Scanner::new(&config)
        .respect_gitignore(!args.no_ignore)
        .scan();

    if entries.is_empty() {
        log::warn!("No files in scope under {}", config.root_dir());
        return Ok(true);
    }

    let output = if args.tree {
        OutputGenerator::generate_tree(&entries)
    } else if args.json {
        OutputGenerator::generate_json(&entries)?
    } else {
        OutputGenerator::generate_list(&entries)
    };
    println!("{}", output);

    Ok(true)
}

fn load_config(start_dir: &Path, stop_at_home: bool) -> Result<GlintConfig> {
    let fs = OsFileSystem;
    let mut locator = ConfigLocator::new(&fs);

    if stop_at_home {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        locator = locator.stop_at(home);
    }

    discover_with(&locator, start_dir).with_context(|| {
        format!("Failed to load glint configuration for {}", start_dir.display())
    })
}

/// `path` made absolute against `base` and cleaned of `.`/`..` segments.
fn absolutize(base: &Path, path: &Path) -> String {
    resolve_path(
        &normalize_path(&base.to_string_lossy()),
        &normalize_path(&path.to_string_lossy()),
    )
}

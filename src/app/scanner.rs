use crate::app::glint::GlintConfig;
use crate::app::models::FileEntry;
use crate::app::path::normalize_path;
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};

/// Walks a project root and keeps the files a [`GlintConfig`] considers in scope.
pub struct Scanner<'a> {
    root: PathBuf,
    config: &'a GlintConfig,
    respect_gitignore: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a GlintConfig) -> Self {
        Self {
            root: PathBuf::from(config.root_dir()),
            config,
            respect_gitignore: true,
        }
    }

    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }

    pub fn scan(&self) -> Vec<FileEntry> {
        // Dotfiles are left to the config's own rules; only `.git` is pruned.
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .parents(self.respect_gitignore)
            .filter_entry(|entry| entry.file_name() != ".git")
            .build();

        let mut entries: Vec<FileEntry> = walker
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::debug!("Skipping unreadable entry under {}: {}", self.root.display(), err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|kind| kind.is_file()))
            .filter_map(|entry| self.to_entry(entry.path()))
            .collect();

        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        entries
    }

    fn to_entry(&self, path: &Path) -> Option<FileEntry> {
        if !self.config.includes_file(&path.to_string_lossy()) {
            log::trace!("Out of scope: {}", path.display());
            return None;
        }

        let relative = diff_paths(path, &self.root)?;

        Some(FileEntry {
            path: path.to_path_buf(),
            relative_path: normalize_path(&relative.to_string_lossy()),
            depth: relative.components().count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relative_paths(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.relative_path.as_str()).collect()
    }

    #[test]
    fn keeps_only_in_scope_files() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "src/a.ts");
        touch(tmp.path(), "src/a.spec.ts");
        touch(tmp.path(), "src/b.js");
        touch(tmp.path(), "node_modules/dep/index.ts");

        let config = GlintConfig::new(
            &tmp.path().to_string_lossy(),
            &json!({ "exclude": ["**/node_modules/**", "**/*.spec.ts"] }),
        )
        .unwrap();

        let entries = Scanner::new(&config).scan();
        assert_eq!(relative_paths(&entries), vec!["src/a.ts"]);
        assert_eq!(entries[0].depth, 2);
    }

    #[test]
    fn gitignored_files_are_skipped_unless_asked() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join(".gitignore"), "dist/\n").unwrap();
        touch(tmp.path(), "dist/out.ts");
        touch(tmp.path(), "index.ts");

        let config = GlintConfig::with_defaults(&tmp.path().to_string_lossy()).unwrap();

        let entries = Scanner::new(&config).scan();
        assert_eq!(relative_paths(&entries), vec!["index.ts"]);

        let entries = Scanner::new(&config).respect_gitignore(false).scan();
        assert_eq!(relative_paths(&entries), vec!["dist/out.ts", "index.ts"]);
    }

    #[test]
    fn dotfiles_follow_the_config() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), ".cache/a.ts");
        touch(tmp.path(), "src/.b.ts");
        touch(tmp.path(), "src/c.ts");

        let root = tmp.path().to_string_lossy().into_owned();
        let config = GlintConfig::with_defaults(&root).unwrap();
        assert_eq!(relative_paths(&Scanner::new(&config).scan()), vec!["src/c.ts"]);

        let config = GlintConfig::new(&root, &json!({ "include": [".cache/**/*.ts"] })).unwrap();
        assert_eq!(relative_paths(&Scanner::new(&config).scan()), vec![".cache/a.ts"]);
    }
}

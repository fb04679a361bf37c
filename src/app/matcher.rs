//! Glob compilation behind a small capability so the membership rules do not
//! depend on a particular matching engine.

use crate::app::error::ConfigError;
use crate::app::path::{normalize_path, resolve_path};
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

/// A compiled predicate over normalized paths.
pub trait Matcher: Send + Sync {
    fn matches(&self, path: &str) -> bool;

    /// The normalized, root-resolved pattern this matcher was built from.
    fn pattern(&self) -> &str;
}

pub trait GlobEngine {
    /// Compiles `pattern` resolved against `root_dir`.
    fn compile(&self, pattern: &str, root_dir: &str) -> Result<Box<dyn Matcher>, ConfigError>;
}

/// `globset` engine: `*` stays inside one segment, `**` spans any number,
/// matching is case-sensitive and covers the whole path.
///
/// Wildcards never match a segment starting with `.`; such a segment only
/// matches when the pattern spells out the leading dot (`.cache`, `.*.ts`).
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobsetEngine;

struct GlobsetMatcher {
    pattern: String,
    inner: GlobMatcher,
    /// Leading segments of the pattern without any wildcard.
    literal_prefix: usize,
    /// Pattern segments past the prefix that start with `.`.
    dot_segments: GlobSet,
}

impl GlobsetMatcher {
    fn dot_segments_allowed(&self, path: &str) -> bool {
        path.split('/')
            .skip(self.literal_prefix)
            .filter(|segment| segment.starts_with('.'))
            .all(|segment| self.dot_segments.is_match(segment))
    }
}

impl Matcher for GlobsetMatcher {
    fn matches(&self, path: &str) -> bool {
        self.inner.is_match(path) && self.dot_segments_allowed(path)
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl GlobEngine for GlobsetEngine {
    fn compile(&self, pattern: &str, root_dir: &str) -> Result<Box<dyn Matcher>, ConfigError> {
        let resolved = normalize_path(&resolve_path(root_dir, &normalize_path(pattern)));

        let glob = GlobBuilder::new(&resolved)
            .literal_separator(true)
            .case_insensitive(false)
            .backslash_escape(true)
            .build()
            .map_err(|source| ConfigError::InvalidGlob {
                pattern: pattern.to_string(),
                source,
            })?;

        let segments: Vec<&str> = resolved.split('/').collect();
        let literal_prefix = segments
            .iter()
            .position(|segment| has_wildcard(segment))
            .unwrap_or(segments.len());
        let dot_segments = build_segment_set(pattern, &segments[literal_prefix..])?;

        log::trace!("Compiled glob {} -> {}", pattern, resolved);

        Ok(Box::new(GlobsetMatcher {
            inner: glob.compile_matcher(),
            literal_prefix,
            dot_segments,
            pattern: resolved,
        }))
    }
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}

fn build_segment_set(pattern: &str, segments: &[&str]) -> Result<GlobSet, ConfigError> {
    let invalid = |source| ConfigError::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    };

    let mut builder = GlobSetBuilder::new();
    for segment in segments.iter().filter(|s| s.starts_with('.')) {
        builder.add(Glob::new(segment).map_err(invalid)?);
    }
    builder.build().map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> Box<dyn Matcher> {
        GlobsetEngine.compile(pattern, "/proj").unwrap()
    }

    #[test]
    fn star_stays_within_a_segment() {
        let matcher = compile("*.ts");
        assert!(matcher.matches("/proj/a.ts"));
        assert!(!matcher.matches("/proj/src/a.ts"));
    }

    #[test]
    fn globstar_spans_segments() {
        let matcher = compile("**/*.ts");
        assert!(matcher.matches("/proj/a.ts"));
        assert!(matcher.matches("/proj/src/deep/a.ts"));
        assert!(!matcher.matches("/other/a.ts"));
    }

    #[test]
    fn globstar_matches_zero_directories_in_the_middle() {
        let matcher = compile("**/node_modules/**");
        assert!(matcher.matches("/proj/node_modules/x/a.ts"));
        assert!(matcher.matches("/proj/packages/y/node_modules/x/a.ts"));
        assert!(!matcher.matches("/proj/src/a.ts"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let matcher = compile("src/*.ts");
        assert!(!matcher.matches("/proj/SRC/a.ts"));
        assert!(!matcher.matches("/proj/src/a.TS"));
    }

    #[test]
    fn no_partial_matches() {
        let matcher = compile("src/a.ts");
        assert!(matcher.matches("/proj/src/a.ts"));
        assert!(!matcher.matches("/proj/src/a.ts.bak"));
        assert!(!matcher.matches("/x/proj/src/a.ts"));
    }

    #[test]
    fn wildcards_skip_dot_segments() {
        let matcher = compile("**/*.ts");
        assert!(!matcher.matches("/proj/.cache/a.ts"));
        assert!(!matcher.matches("/proj/src/.a.ts"));
        assert!(matcher.matches("/proj/src/a.ts"));
    }

    #[test]
    fn explicit_dots_match_dot_segments() {
        assert!(compile(".cache/**/*.ts").matches("/proj/.cache/a.ts"));
        assert!(compile("**/.*.ts").matches("/proj/src/.a.ts"));
        assert!(compile("**/.github/*.yml").matches("/proj/x/.github/ci.yml"));
        assert!(!compile(".cache/**").matches("/proj/.cache/.tmp/a.ts"));
    }

    #[test]
    fn dots_in_the_root_are_literal() {
        let matcher = GlobsetEngine.compile("**/*.ts", "/home/.work/proj").unwrap();
        assert!(matcher.matches("/home/.work/proj/src/a.ts"));
    }

    #[test]
    fn pattern_is_reported_resolved() {
        assert_eq!(compile("./src/**").pattern(), "/proj/src/**");
    }

    #[test]
    fn broken_patterns_fail_to_compile() {
        let err = GlobsetEngine.compile("src/[a.ts", "/proj").err().unwrap();
        assert!(matches!(err, ConfigError::InvalidGlob { ref pattern, .. } if pattern == "src/[a.ts"));
    }
}

use std::env;
use std::io;
use std::path::MAIN_SEPARATOR;

/// Converts a platform path into the canonical forward-slash form.
///
/// On hosts where the native separator already is `/` the input is returned unchanged.
pub fn normalize_path(path: &str) -> String {
    normalize_with(path, MAIN_SEPARATOR)
}

/// [`normalize_path`] for an explicit native separator.
pub fn normalize_with(path: &str, separator: char) -> String {
    if separator != '/' {
        return path.replace(separator, "/");
    }

    path.to_string()
}

/// Makes a normalized path absolute against the current directory, cleaned
/// the same way as [`resolve_path`]. Absolute input never touches the environment.
pub fn to_absolute(path: &str) -> io::Result<String> {
    if is_absolute(path) {
        return Ok(resolve_path(path, ""));
    }

    let cwd = normalize_path(&env::current_dir()?.to_string_lossy());
    Ok(resolve_path(&cwd, path))
}

/// Returns true for `/foo`, `C:/foo` and `//server/share` style paths.
pub fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') {
        return true;
    }

    // Drive letters only carry meaning on Windows hosts.
    let bytes = path.as_bytes();
    cfg!(windows) && bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// Resolves `pattern` against `root_dir`, both already normalized.
///
/// Absolute patterns are used as-is. The result is cleaned lexically:
/// `.` segments are dropped and `..` pops the previous segment, never past the root.
pub fn resolve_path(root_dir: &str, pattern: &str) -> String {
    let joined = if is_absolute(pattern) {
        pattern.to_string()
    } else if pattern.is_empty() {
        root_dir.to_string()
    } else {
        format!("{}/{}", root_dir.trim_end_matches('/'), pattern)
    };

    clean(&joined)
}

fn clean(path: &str) -> String {
    let (prefix, rest) = split_prefix(path);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    if prefix.is_empty() && body.is_empty() {
        ".".to_string()
    } else {
        format!("{}{}", prefix, body)
    }
}

/// Splits off the part of an absolute path that `..` can never remove.
fn split_prefix(path: &str) -> (&str, &str) {
    if is_absolute(path) && !path.starts_with('/') {
        path.split_at(3)
    } else if path.starts_with('/') {
        path.split_at(1)
    } else {
        ("", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_slashes_pass_through() {
        assert_eq!(normalize_path("/proj/src/a.ts"), "/proj/src/a.ts");
    }

    #[test]
    fn native_separators_are_rewritten() {
        let native = ["proj", "src", "a.ts"].join(&MAIN_SEPARATOR.to_string());
        assert_eq!(normalize_path(&native), "proj/src/a.ts");
    }

    #[test]
    fn backslash_separators_are_rewritten() {
        assert_eq!(normalize_with(r"C:\proj\src\a.ts", '\\'), "C:/proj/src/a.ts");
        assert_eq!(normalize_with(r"\proj\src\a.ts", '\\'), "/proj/src/a.ts");
        assert_eq!(normalize_with(r"a\b.ts", '/'), r"a\b.ts");
    }

    #[test]
    fn absolute_paths_are_only_cleaned() {
        assert_eq!(to_absolute("/proj/./src/../lib").unwrap(), "/proj/lib");
        assert_eq!(to_absolute("/proj/").unwrap(), "/proj");
    }

    #[test]
    fn relative_paths_are_anchored_at_cwd() {
        let cwd = normalize_path(&env::current_dir().unwrap().to_string_lossy());
        assert_eq!(to_absolute(".").unwrap(), resolve_path(&cwd, ""));
        assert_eq!(to_absolute("src/a.ts").unwrap(), resolve_path(&cwd, "src/a.ts"));
        assert!(is_absolute(&to_absolute("src").unwrap()));
    }

    #[test]
    fn relative_patterns_join_root() {
        assert_eq!(resolve_path("/proj", "src/**/*.ts"), "/proj/src/**/*.ts");
        assert_eq!(resolve_path("/proj/", "**/*.ts"), "/proj/**/*.ts");
    }

    #[test]
    fn absolute_patterns_are_kept() {
        assert_eq!(resolve_path("/proj", "/other/**/*.ts"), "/other/**/*.ts");
    }

    #[test]
    fn dot_segments_are_cleaned() {
        assert_eq!(resolve_path("/proj/app", "./src/../lib/*.ts"), "/proj/app/lib/*.ts");
        assert_eq!(resolve_path("/proj", "../shared/*.ts"), "/shared/*.ts");
        assert_eq!(resolve_path("/", "../../x"), "/x");
    }

    #[test]
    fn empty_pattern_is_the_root() {
        assert_eq!(resolve_path("/proj", ""), "/proj");
    }
}

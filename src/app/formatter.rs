use crate::app::glint::GlintConfig;
use crate::app::models::{FileEntry, Membership};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FsNode {
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<FsNode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigSummary<'a> {
    root_dir: &'a str,
    source: Option<String>,
    include: Vec<&'a str>,
    exclude: Vec<&'a str>,
}

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_list(entries: &[FileEntry]) -> String {
        entries
            .iter()
            .map(|entry| entry.relative_path.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Indented tree; directories are drawn once, before their first file.
    pub fn generate_tree(entries: &[FileEntry]) -> String {
        let mut output = String::new();
        let mut printed: Vec<&str> = Vec::new();

        for entry in entries {
            let segments: Vec<&str> = entry.relative_path.split('/').collect();
            let (file_name, dirs) = match segments.split_last() {
                Some(split) => split,
                None => continue,
            };

            for (depth, dir) in dirs.iter().enumerate() {
                if printed.get(depth) != Some(dir) {
                    printed.truncate(depth);
                    printed.push(*dir);
                    output.push_str(&format!("{}{}/\n", "    ".repeat(depth), dir));
                }
            }
            printed.truncate(dirs.len());

            let indent = "    ".repeat(dirs.len());
            output.push_str(&format!("{}{}\n", indent, file_name));
        }

        output.trim_end().to_string()
    }

    pub fn generate_json(entries: &[FileEntry]) -> Result<String> {
        let mut root: BTreeMap<String, FsNode> = BTreeMap::new();
        for entry in entries {
            let segments: Vec<&str> = entry.relative_path.split('/').collect();
            insert_path(&mut root, &segments);
        }

        let tree: Vec<FsNode> = root.into_values().collect();
        Ok(serde_json::to_string_pretty(&tree)?)
    }

    pub fn generate_memberships(results: &[Membership], json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(results)?);
        }

        Ok(results
            .iter()
            .map(|m| format!("{}\t{}", if m.included { "in" } else { "out" }, m.path))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub fn generate_config_summary(config: &GlintConfig, json: bool) -> Result<String> {
        let summary = ConfigSummary {
            root_dir: config.root_dir(),
            source: config.source().map(|p| p.display().to_string()),
            include: config.include_patterns(),
            exclude: config.exclude_patterns(),
        };

        if json {
            return Ok(serde_json::to_string_pretty(&summary)?);
        }

        let mut lines = vec![format!("Root: {}", summary.root_dir)];
        lines.push(format!(
            "Config: {}",
            summary.source.as_deref().unwrap_or("(defaults)")
        ));
        lines.push(format!("Include: {}", summary.include.join(", ")));
        lines.push(format!("Exclude: {}", summary.exclude.join(", ")));
        Ok(lines.join("\n"))
    }
}

fn insert_path(level: &mut BTreeMap<String, FsNode>, segments: &[&str]) {
    let (name, rest) = match segments.split_first() {
        Some(split) => split,
        None => return,
    };

    let is_file = rest.is_empty();
    let node = level.entry(name.to_string()).or_insert_with(|| FsNode {
        name: name.to_string(),
        node_type: if is_file { "file" } else { "directory" }.to_string(),
        children: Vec::new(),
    });

    if !is_file {
        let mut children: BTreeMap<String, FsNode> = node
            .children
            .drain(..)
            .map(|n| (n.name.clone(), n))
            .collect();
        insert_path(&mut children, rest);
        node.children = children.into_values().collect();
    }
}

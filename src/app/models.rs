use crate::app::error::{InvalidField, ValidationError};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

pub const DEFAULT_INCLUDE: &str = "**/*.ts";
pub const DEFAULT_EXCLUDE: &str = "**/node_modules/**";

/// The `include`/`exclude` portion of a payload after its shape has been checked.
///
/// `None` means the field was absent (or `null`) and the default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlintConfigInput {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

impl GlintConfigInput {
    /// Checks the shape of an untyped payload. Keys other than `include` and
    /// `exclude` are left alone.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let object = match payload {
            Value::Null => return Ok(Self::default()),
            Value::Object(object) => object,
            _ => {
                return Err(ValidationError {
                    fields: vec![InvalidField::Payload],
                })
            }
        };

        let include = string_list(object.get("include"));
        let exclude = string_list(object.get("exclude"));

        let mut fields = Vec::new();
        if include.is_err() {
            fields.push(InvalidField::Include);
        }
        if exclude.is_err() {
            fields.push(InvalidField::Exclude);
        }
        if !fields.is_empty() {
            return Err(ValidationError { fields });
        }

        Ok(Self {
            include: include.unwrap_or_default(),
            exclude: exclude.unwrap_or_default(),
        })
    }

    pub fn include_or_default(&self) -> Vec<String> {
        self.include
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_INCLUDE.to_string()])
    }

    pub fn exclude_or_default(&self) -> Vec<String> {
        self.exclude
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_EXCLUDE.to_string()])
    }
}

fn string_list(value: Option<&Value>) -> Result<Option<Vec<String>>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(pattern)) => Ok(Some(vec![pattern.clone()])),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or(()))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(()),
    }
}

/// A file found while scanning the project root.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Forward-slash path relative to the project root.
    pub relative_path: String,
    pub depth: usize,
}

/// Answer to a single membership query, as reported by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct Membership {
    pub path: String,
    pub included: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_payload_uses_defaults() {
        let input = GlintConfigInput::from_payload(&json!({})).unwrap();
        assert_eq!(input.include_or_default(), vec!["**/*.ts"]);
        assert_eq!(input.exclude_or_default(), vec!["**/node_modules/**"]);
    }

    #[test]
    fn bare_string_is_wrapped() {
        let input = GlintConfigInput::from_payload(&json!({ "include": "src/**" })).unwrap();
        assert_eq!(input.include, Some(vec!["src/**".to_string()]));
        assert_eq!(input.exclude, None);
    }

    #[test]
    fn string_arrays_are_accepted() {
        let input = GlintConfigInput::from_payload(&json!({ "include": ["a", "b"] })).unwrap();
        assert_eq!(input.include, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let input =
            GlintConfigInput::from_payload(&json!({ "include": null, "exclude": null })).unwrap();
        assert_eq!(input, GlintConfigInput::default());
    }

    #[test]
    fn empty_array_means_no_patterns() {
        let input = GlintConfigInput::from_payload(&json!({ "include": [] })).unwrap();
        assert!(input.include_or_default().is_empty());
    }

    #[test]
    fn numbers_are_rejected() {
        let err = GlintConfigInput::from_payload(&json!({ "include": 123 })).unwrap_err();
        assert_eq!(err.fields, vec![InvalidField::Include]);
    }

    #[test]
    fn mixed_arrays_are_rejected() {
        let err = GlintConfigInput::from_payload(&json!({ "exclude": ["a", 1] })).unwrap_err();
        assert_eq!(err.fields, vec![InvalidField::Exclude]);
    }

    #[test]
    fn every_offending_field_is_reported() {
        let err =
            GlintConfigInput::from_payload(&json!({ "include": true, "exclude": {} })).unwrap_err();
        assert_eq!(err.fields, vec![InvalidField::Include, InvalidField::Exclude]);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let input = GlintConfigInput::from_payload(&json!({
            "environment": "ember-loose",
            "include": "app/**/*.ts"
        }))
        .unwrap();
        assert_eq!(input.include, Some(vec!["app/**/*.ts".to_string()]));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = GlintConfigInput::from_payload(&json!(["**/*.ts"])).unwrap_err();
        assert_eq!(err.fields, vec![InvalidField::Payload]);
    }
}

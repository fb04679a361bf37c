use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A payload field that does not have an accepted shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidField {
    /// The payload itself is not an object.
    Payload,
    Include,
    Exclude,
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidField::Payload => write!(f, "configuration must be an object"),
            InvalidField::Include => {
                write!(f, "if defined, `include` must be a string or array of strings")
            }
            InvalidField::Exclude => {
                write!(f, "if defined, `exclude` must be a string or array of strings")
            }
        }
    }
}

/// Raised while shaping a raw payload into a [`GlintConfigInput`](super::models::GlintConfigInput).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("glint-config: {}", join_fields(.fields))]
pub struct ValidationError {
    pub fields: Vec<InvalidField>,
}

fn join_fields(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("glint-config: failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("glint-config: {path} uses a configuration format that cannot be loaded")]
    UnsupportedFormat { path: PathBuf },

    #[error("glint-config: cannot resolve relative path {path}")]
    CurrentDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glint-config: failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glint-config: invalid glob pattern `{pattern}`")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

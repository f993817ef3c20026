use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single settings-to-XML translation run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Settings file is not valid JSON (line {line}, column {column}): {source}")]
    Parse {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings file has no `configurations` array")]
    MissingConfigurations,

    #[error(
        "Configuration #{index} ({}) is missing required field `{field}`",
        .name.as_deref().unwrap_or("unnamed")
    )]
    MissingField {
        index: usize,
        name: Option<String>,
        field: &'static str,
    },

    #[error(
        "Configuration #{index} ({}) has a non-string value for `{field}`",
        .name.as_deref().unwrap_or("unnamed")
    )]
    InvalidField {
        index: usize,
        name: Option<String>,
        field: &'static str,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(source: serde_json::Error) -> Self {
        ConvertError::Parse {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}

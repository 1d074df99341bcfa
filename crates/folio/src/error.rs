//! Error types for Folio.
//!
//! Component operations never fail from the caller's point of view; these
//! errors only cross the collaborator boundaries: clipboard access, markup
//! parsing, the style store and configuration files.

use std::path::PathBuf;

use folio_core::CoreError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at Folio's collaborator boundaries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The system clipboard could not be reached or held no usable data.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Rich markup could not be parsed into a fragment.
    #[error("markup error: {0}")]
    Markup(String),

    /// A style store query or mutation failed.
    #[error("style store error: {0}")]
    Store(String),

    /// Reading or writing a settings or store file failed.
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A style store file held malformed JSON.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// TOML configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// TOML configuration could not be written.
    #[error("failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl Error {
    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard(message.into())
    }

    pub fn markup(message: impl Into<String>) -> Self {
        Self::Markup(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// An I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

impl From<arboard::Error> for Error {
    fn from(err: arboard::Error) -> Self {
        Self::Clipboard(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::clipboard("no display").to_string(),
            "clipboard error: no display"
        );
        assert_eq!(
            Error::markup("unexpected end").to_string(),
            "markup error: unexpected end"
        );

        let err: Error = CoreError::invalid_value("font_size", "must be positive").into();
        assert_eq!(err.to_string(), "'font_size' rejected: must be positive");
    }
}

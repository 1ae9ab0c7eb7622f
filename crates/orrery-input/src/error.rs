//! Input error types.

use std::path::PathBuf;

/// Errors from key binding files, binding overrides, and input scripts.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Failed to read a file.
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed RON.
    #[error("failed to parse input file: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize to RON.
    #[error("failed to serialize input file: {0}")]
    SerializeError(#[source] ron::Error),

    /// A binding override names an action that does not exist.
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    /// A binding override names a key that is not supported.
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

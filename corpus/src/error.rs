//! Errors raised while loading a corpus or word-level map from disk.

/// Errors from the `readpath-corpus` loader.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// The file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file's contents are not valid JSON, or not shaped as expected.
    #[error("malformed corpus file '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but contained no entries.
    #[error("'{path}' contains no entries")]
    EmptyFile { path: String },
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CorpusError>;

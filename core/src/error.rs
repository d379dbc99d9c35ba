//! Error taxonomy for the path-generation engine.
//!
//! Every fallible entry point returns one of these variants. There is no
//! retry policy and no partial result on a fatal error: a call either
//! completes fully or returns `Err`.

/// Top-level error type for the `readpath-core` crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `LevelConfig` violates one of its construction invariants.
    #[error("invalid level configuration: {0}")]
    InvalidConfig(String),

    /// `PathGenerationParameters` is missing a required level entry or
    /// violates a range constraint.
    #[error("invalid path generation parameters: {0}")]
    InvalidParameters(String),

    /// A level name was referenced that is not part of the configuration.
    #[error("unknown level: {0}")]
    UnknownLevel(String),

    /// A book id was referenced that the analyzer has no analysis for.
    #[error("unknown book: {0}")]
    UnknownBook(String),

    /// The facade was constructed with zero books.
    #[error("corpus contains no books")]
    EmptyCorpus,
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! JSON file loading for book corpora and word-level maps.
//!
//! This is the only crate in the workspace that touches the filesystem;
//! `readpath-core` stays pure data-in, data-out.

pub mod error;
pub mod loader;
pub mod model;

pub use error::{CorpusError, Result};
pub use loader::{load_corpus, load_word_levels};
pub use model::{RawCorpus, RawWordLevels};

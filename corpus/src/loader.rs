//! Reads a book corpus and a word-level map from JSON files on disk.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{CorpusError, Result};
use crate::model::{RawCorpus, RawWordLevels};

/// Load `{"books": {...}}` from `path` into a book-id-sorted map.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] if the file cannot be read,
/// [`CorpusError::Malformed`] if it is not valid JSON in the expected
/// shape, or [`CorpusError::EmptyFile`] if it contains zero books.
pub fn load_corpus(path: &Path) -> Result<BTreeMap<String, HashSet<String>>> {
    let path_str = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path_str.clone(),
        source,
    })?;
    let raw: RawCorpus = serde_json::from_str(&content).map_err(|source| CorpusError::Malformed {
        path: path_str.clone(),
        source,
    })?;
    if raw.books.is_empty() {
        return Err(CorpusError::EmptyFile { path: path_str });
    }

    let books: BTreeMap<String, HashSet<String>> = raw.books.into_iter().collect();
    debug!(path = %path_str, book_count = books.len(), "loaded corpus");
    Ok(books)
}

/// Load `{"words": {...}}` from `path`.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] if the file cannot be read,
/// [`CorpusError::Malformed`] if it is not valid JSON in the expected
/// shape, or [`CorpusError::EmptyFile`] if it contains zero words.
pub fn load_word_levels(path: &Path) -> Result<HashMap<String, String>> {
    let path_str = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path_str.clone(),
        source,
    })?;
    let raw: RawWordLevels = serde_json::from_str(&content).map_err(|source| CorpusError::Malformed {
        path: path_str.clone(),
        source,
    })?;
    if raw.words.is_empty() {
        return Err(CorpusError::EmptyFile { path: path_str });
    }

    info!(path = %path_str, word_count = raw.words.len(), "loaded word-level map");
    Ok(raw.words)
}

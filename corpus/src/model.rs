//! On-disk shapes for a book corpus and a word-level map, as they arrive
//! from JSON before being handed to `readpath-core`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// `{"books": {book_id: [word, ...]}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCorpus {
    pub books: HashMap<String, HashSet<String>>,
}

/// `{"words": {word: level}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWordLevels {
    pub words: HashMap<String, String>,
}

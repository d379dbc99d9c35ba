//! The word→level source map and the per-level vocabulary partitions
//! derived from it.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::config::LevelConfig;
use crate::error::{Error, Result};

/// A validated mapping from word to level name.
///
/// Treated as read-only by everything downstream. Words not present in
/// the map (and the empty-string token, which is never a valid word) are
/// out-of-syllabus, not errors.
#[derive(Debug, Clone)]
pub struct WordLevelMap {
    words: HashMap<String, String>,
}

impl WordLevelMap {
    /// Validate `words` against `config` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLevel`] if any mapped level is not part of
    /// `config`.
    pub fn new(words: HashMap<String, String>, config: &LevelConfig) -> Result<Self> {
        for level in words.values() {
            if config.index_of(level).is_err() {
                return Err(Error::UnknownLevel(level.clone()));
            }
        }
        Ok(Self { words })
    }

    /// Iterate over `(word, level)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|(w, l)| (w.as_str(), l.as_str()))
    }

    /// Number of mapped words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Per-level word sets derived from a [`WordLevelMap`], plus their union
/// (the full set of "known", in-syllabus words).
///
/// Built once per `(WordLevelMap, LevelConfig)` pair and reused across
/// every book analyzed against that configuration; level definitions
/// changing invalidates it (see the crate-level caching note).
#[derive(Debug, Clone)]
pub struct LevelVocabulary {
    per_level: IndexMap<String, HashSet<String>>,
    known_words: HashSet<String>,
}

impl LevelVocabulary {
    /// Partition `map`'s words by level, in the order `config` defines.
    pub fn build(map: &WordLevelMap, config: &LevelConfig) -> Self {
        let mut per_level: IndexMap<String, HashSet<String>> = config
            .levels()
            .iter()
            .map(|level| (level.clone(), HashSet::new()))
            .collect();
        let mut known_words = HashSet::new();

        for (word, level) in map.iter() {
            if word.is_empty() {
                // A malformed (empty-string) word entry is treated as
                // unknown: it contributes to neither a level set nor the
                // known-words union.
                continue;
            }
            if let Some(set) = per_level.get_mut(level) {
                set.insert(word.to_string());
            }
            known_words.insert(word.to_string());
        }

        Self {
            per_level,
            known_words,
        }
    }

    /// The word set for `level`, or `None` if `level` is not configured.
    pub fn words_for(&self, level: &str) -> Option<&HashSet<String>> {
        self.per_level.get(level)
    }

    /// The union of every configured level's word set.
    pub fn known_words(&self) -> &HashSet<String> {
        &self.known_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cefr_map(pairs: &[(&str, &str)]) -> WordLevelMap {
        let config = LevelConfig::cefr();
        let words = pairs
            .iter()
            .map(|(w, l)| (w.to_string(), l.to_string()))
            .collect();
        WordLevelMap::new(words, &config).unwrap()
    }

    #[test]
    fn partitions_are_disjoint_and_cover_known_words() {
        let config = LevelConfig::cefr();
        let map = cefr_map(&[("a", "A1"), ("b", "A1"), ("c", "A2"), ("d", "B1")]);
        let vocab = LevelVocabulary::build(&map, &config);

        assert_eq!(vocab.words_for("A1").unwrap().len(), 2);
        assert_eq!(vocab.words_for("A2").unwrap().len(), 1);
        assert_eq!(vocab.words_for("B1").unwrap().len(), 1);
        assert_eq!(vocab.words_for("B2").unwrap().len(), 0);
        assert_eq!(vocab.known_words().len(), 4);

        for a in config.levels() {
            for b in config.levels() {
                if a != b {
                    let set_a = vocab.words_for(a).unwrap();
                    let set_b = vocab.words_for(b).unwrap();
                    assert!(set_a.is_disjoint(set_b));
                }
            }
        }
    }

    #[test]
    fn unmapped_word_is_not_known() {
        let config = LevelConfig::cefr();
        let map = cefr_map(&[("a", "A1")]);
        let vocab = LevelVocabulary::build(&map, &config);
        assert!(!vocab.known_words().contains("x"));
    }

    #[test]
    fn construction_rejects_unknown_level() {
        let config = LevelConfig::cefr();
        let words = HashMap::from([("a".to_string(), "Z9".to_string())]);
        assert!(matches!(
            WordLevelMap::new(words, &config),
            Err(Error::UnknownLevel(_))
        ));
    }

    #[test]
    fn empty_string_word_is_ignored() {
        let config = LevelConfig::cefr();
        let words = HashMap::from([(String::new(), "A1".to_string())]);
        let map = WordLevelMap::new(words, &config).unwrap();
        let vocab = LevelVocabulary::build(&map, &config);
        assert!(vocab.known_words().is_empty());
        assert!(vocab.words_for("A1").unwrap().is_empty());
    }
}

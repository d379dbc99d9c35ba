//! Per-book vocabulary analysis: turning a book's word set into a fully
//! populated [`BookAnalysis`] against a fixed [`LevelConfig`] and
//! [`LevelVocabulary`].

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::LevelConfig;
use crate::ser::sorted_string_set;
use crate::vocabulary::{LevelVocabulary, WordLevelMap};

/// Word counts, ratio, and weighted value for one level within one book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocabularyLevelStats {
    #[serde(serialize_with = "sorted_string_set")]
    pub words: HashSet<String>,
    pub count: usize,
    pub ratio: f64,
    pub weighted_value: f64,
}

/// The three difficulty bands a book can fall into.
///
/// Thresholds (2.0 / 4.0) are fixed absolute numbers regardless of
/// [`crate::config::ProgressionKind`] — see Open Question #2 in
/// `SPEC_FULL.md`. This keeps the category comparable across configs at
/// the cost of compressing under exponential progressions; that
/// trade-off is deliberate, not an oversight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyCategory {
    Beginner,
    Intermediate,
    Advanced,
}

/// A book's full vocabulary analysis against one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookAnalysis {
    pub book_id: String,
    pub total_words: usize,
    /// Keyed by configured level name, in configured order; does not
    /// include the sentinel (see [`Self::unknown_words`] /
    /// [`Self::unknown_count`] for that).
    pub level_distributions: IndexMap<String, VocabularyLevelStats>,
    #[serde(serialize_with = "sorted_string_set")]
    pub unknown_words: HashSet<String>,
    pub unknown_count: usize,
    pub unknown_ratio: f64,
    pub difficulty_score: f64,
    pub learning_value: f64,
    /// Keyed by configured level name, in configured order. Monotonically
    /// non-decreasing as the level index increases.
    pub suitability_scores: IndexMap<String, f64>,
    pub learning_words_ratio: f64,
}

impl BookAnalysis {
    /// The fixed-threshold difficulty band for this book.
    pub fn difficulty_category(&self) -> DifficultyCategory {
        if self.difficulty_score < 2.0 {
            DifficultyCategory::Beginner
        } else if self.difficulty_score < 4.0 {
            DifficultyCategory::Intermediate
        } else {
            DifficultyCategory::Advanced
        }
    }

    /// Every level this book is suitable for (suitability >= 0.6).
    pub fn recommended_levels(&self) -> Vec<&str> {
        self.suitability_scores
            .iter()
            .filter(|(_, score)| **score >= 0.6)
            .map(|(level, _)| level.as_str())
            .collect()
    }
}

/// Computes [`BookAnalysis`] records against one fixed configuration and
/// word-level map.
pub struct BookAnalyzer<'a> {
    config: &'a LevelConfig,
    vocabulary: LevelVocabulary,
}

impl<'a> BookAnalyzer<'a> {
    /// Derive the per-level vocabulary partition once, to be reused
    /// across every book analyzed against `config`/`word_level_map`.
    pub fn new(config: &'a LevelConfig, word_level_map: &WordLevelMap) -> Self {
        Self {
            config,
            vocabulary: LevelVocabulary::build(word_level_map, config),
        }
    }

    /// The derived per-level vocabulary partition.
    pub fn vocabulary(&self) -> &LevelVocabulary {
        &self.vocabulary
    }

    /// Analyze one book's vocabulary set.
    ///
    /// An empty `words` set yields a valid, all-zero analysis (`T == 0`);
    /// it is never a fatal error, only a book the generator will never
    /// select (see `§4.3` filtering in `SPEC_FULL.md`). A malformed
    /// empty-string word entry is not dropped: it still counts toward
    /// `total_words` and falls into the unknown bucket, since
    /// `LevelVocabulary` never maps the empty string to a level either.
    pub fn analyze_book(&self, book_id: &str, words: &HashSet<String>) -> BookAnalysis {
        let relevant_words: HashSet<&str> = words.iter().map(String::as_str).collect();
        let total_words = relevant_words.len();
        let total_f = total_words as f64;

        let mut level_distributions = IndexMap::with_capacity(self.config.level_count());
        let mut suitability_scores = IndexMap::with_capacity(self.config.level_count());
        let mut cumulative_count = 0usize;
        let mut difficulty_sum = 0.0;
        let mut learning_value_sum = 0.0;

        for level in self.config.levels() {
            let level_set = self
                .vocabulary
                .words_for(level)
                .cloned()
                .unwrap_or_default();
            let matched: HashSet<String> = relevant_words
                .iter()
                .filter(|w| level_set.contains(**w))
                .map(|w| (*w).to_string())
                .collect();
            let count = matched.len();
            let ratio = if total_words == 0 {
                0.0
            } else {
                count as f64 / total_f
            };
            // Weight/multiplier lookups cannot fail: `level` comes from
            // `self.config.levels()` itself.
            #[allow(clippy::expect_used)]
            let weight = self.config.weight(level).expect("level is configured");
            #[allow(clippy::expect_used)]
            let multiplier = self
                .config
                .difficulty_multiplier(level)
                .expect("level is configured");
            let weighted_value = count as f64 * weight;

            difficulty_sum += count as f64 * multiplier;
            learning_value_sum += weighted_value;
            cumulative_count += count;

            suitability_scores.insert(
                level.clone(),
                if total_words == 0 {
                    0.0
                } else {
                    cumulative_count as f64 / total_f
                },
            );
            level_distributions.insert(
                level.clone(),
                VocabularyLevelStats {
                    words: matched,
                    count,
                    ratio,
                    weighted_value,
                },
            );
        }

        let known = self.vocabulary.known_words();
        let unknown_words: HashSet<String> = relevant_words
            .iter()
            .filter(|w| !known.contains(**w))
            .map(|w| (*w).to_string())
            .collect();
        let unknown_count = unknown_words.len();
        let unknown_ratio = if total_words == 0 {
            0.0
        } else {
            unknown_count as f64 / total_f
        };

        #[allow(clippy::expect_used)]
        let sentinel_multiplier = self
            .config
            .difficulty_multiplier(self.config.sentinel())
            .expect("sentinel is always a valid multiplier key");
        difficulty_sum += unknown_count as f64 * sentinel_multiplier;

        let difficulty_score = if total_words == 0 {
            0.0
        } else {
            difficulty_sum / total_f
        };
        let learning_value = if total_words == 0 {
            0.0
        } else {
            learning_value_sum / total_f
        };
        let learning_words_ratio = if total_words == 0 {
            0.0
        } else {
            (total_words - unknown_count) as f64 / total_f
        };

        let analysis = BookAnalysis {
            book_id: book_id.to_string(),
            total_words,
            level_distributions,
            unknown_words,
            unknown_count,
            unknown_ratio,
            difficulty_score,
            learning_value,
            suitability_scores,
            learning_words_ratio,
        };

        debug!(
            book_id,
            total_words,
            difficulty_score,
            unknown_ratio,
            "analyzed book vocabulary"
        );

        analysis
    }

    /// Analyze every book in `books`, sequentially, keyed by book id.
    pub fn analyze_all_books(
        &self,
        books: &BTreeMap<String, HashSet<String>>,
    ) -> BTreeMap<String, BookAnalysis> {
        books
            .iter()
            .map(|(id, words)| (id.clone(), self.analyze_book(id, words)))
            .collect()
    }

    /// Analyze every book in `books` in parallel.
    ///
    /// Each book's analysis reads only the shared, immutable
    /// [`LevelVocabulary`] and [`LevelConfig`], so this is safe to
    /// parallelize; results are collected keyed by book id so the output
    /// is identical regardless of scheduling (see `SPEC_FULL.md` §5).
    pub fn analyze_all_books_parallel(
        &self,
        books: &BTreeMap<String, HashSet<String>>,
    ) -> BTreeMap<String, BookAnalysis> {
        books
            .par_iter()
            .map(|(id, words)| (id.clone(), self.analyze_book(id, words)))
            .collect()
    }
}

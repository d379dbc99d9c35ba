//! The single entry point most callers use: owns a corpus's analyses and
//! exposes path generation, alternatives, and per-book/per-level
//! inspection without requiring callers to wire the lower-level
//! components together themselves.

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use tracing::info;

use serde::Serialize;

use crate::analyzer::{BookAnalysis, BookAnalyzer, DifficultyCategory};
use crate::config::LevelConfig;
use crate::error::{Error, Result};
use crate::generator::{
    PathGenerationParameters, PathGenerator, ReadingPathResult, Strategy,
};
use crate::vocabulary::WordLevelMap;

/// The result of [`ReadingPathFacade::evaluate_book_for_level`]: one
/// book's suitability for one level, judged against the `standard`
/// preset's default filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BookEvaluation {
    pub suitability_score: f64,
    pub level_word_count: usize,
    pub level_word_ratio: f64,
    pub unknown_ratio: f64,
    pub difficulty_category: DifficultyCategory,
    pub meets_default_criteria_for_level: bool,
}

/// Owns a fixed `LevelConfig` and the eagerly-computed analysis of an
/// entire book corpus, and generates reading paths against it.
pub struct ReadingPathFacade {
    config: LevelConfig,
    analyses: BTreeMap<String, BookAnalysis>,
    target_vocabulary: HashMap<String, HashSet<String>>,
}

impl ReadingPathFacade {
    /// Analyze every book in `books` against `config`/`word_level_map`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCorpus`] if `books` has no entries.
    pub fn new(
        books: &BTreeMap<String, HashSet<String>>,
        word_level_map: &WordLevelMap,
        config: LevelConfig,
    ) -> Result<Self> {
        if books.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let analyzer = BookAnalyzer::new(&config, word_level_map);
        let analyses = analyzer.analyze_all_books_parallel(books);
        let target_vocabulary = config
            .levels()
            .iter()
            .map(|level| {
                (
                    level.clone(),
                    analyzer.vocabulary().words_for(level).cloned().unwrap_or_default(),
                )
            })
            .collect();

        info!(
            book_count = analyses.len(),
            level_count = config.level_count(),
            "built reading path facade"
        );

        Ok(Self {
            config,
            analyses,
            target_vocabulary,
        })
    }

    /// The configuration this facade was built with.
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Generate a reading path with `params`, or the `standard` preset if
    /// `params` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `params` (or the default
    /// preset, which cannot happen in practice) fails validation.
    pub fn create_reading_path(
        &self,
        params: Option<&PathGenerationParameters>,
    ) -> Result<ReadingPathResult> {
        let generator = PathGenerator::new(&self.config);
        let owned;
        let params = match params {
            Some(p) => p,
            None => {
                owned = PathGenerationParameters::standard(&self.config);
                &owned
            }
        };
        generator.create_progressive_reading_path(&self.analyses, &self.target_vocabulary, params)
    }

    /// Generate one reading path per named strategy, preserving the
    /// caller's requested order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] on the first unrecognized
    /// strategy name; no paths are generated for a request that fails
    /// partway through.
    pub fn get_alternative_paths(
        &self,
        strategy_names: &[&str],
    ) -> Result<IndexMap<String, ReadingPathResult>> {
        let strategies = strategy_names
            .iter()
            .map(|name| Strategy::parse(name))
            .collect::<Result<Vec<_>>>()?;

        let generator = PathGenerator::new(&self.config);
        let mut results = IndexMap::with_capacity(strategies.len());
        for strategy in strategies {
            let params = strategy.parameters(&self.config);
            let result = generator.create_progressive_reading_path(
                &self.analyses,
                &self.target_vocabulary,
                &params,
            )?;
            results.insert(strategy.canonical_name().to_string(), result);
        }
        Ok(results)
    }

    /// This book's suitability score, level distribution, and default
    /// filter verdict for `level` (`SPEC_FULL.md` §4.3 "Book evaluation").
    ///
    /// `meets_default_criteria_for_level` is judged against the
    /// `standard` preset's per-level criteria — the same filter the
    /// generator applies during selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBook`] if `book_id` has no analysis, or
    /// [`Error::UnknownLevel`] if `level` is not configured.
    pub fn evaluate_book_for_level(&self, book_id: &str, level: &str) -> Result<BookEvaluation> {
        self.config.index_of(level)?;
        let analysis = self
            .analyses
            .get(book_id)
            .ok_or_else(|| Error::UnknownBook(book_id.to_string()))?;

        let suitability_score = analysis.suitability_scores.get(level).copied().unwrap_or(0.0);
        let (level_word_count, level_word_ratio) = analysis
            .level_distributions
            .get(level)
            .map(|stats| (stats.count, stats.ratio))
            .unwrap_or((0, 0.0));

        let standard = PathGenerationParameters::standard(&self.config);
        let max_unknown_ratio = standard.max_unknown_ratio;
        let min_suitability_score = standard.min_relevant_ratio;
        let min_target_words = standard.min_target_level_words;
        let meets_default_criteria_for_level = analysis.unknown_ratio <= max_unknown_ratio
            && suitability_score >= min_suitability_score
            && level_word_count >= min_target_words;

        Ok(BookEvaluation {
            suitability_score,
            level_word_count,
            level_word_ratio,
            unknown_ratio: analysis.unknown_ratio,
            difficulty_category: analysis.difficulty_category(),
            meets_default_criteria_for_level,
        })
    }

    /// The full analysis for one book.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBook`] if `book_id` has no analysis.
    pub fn get_book_statistics(&self, book_id: &str) -> Result<&BookAnalysis> {
        self.analyses
            .get(book_id)
            .ok_or_else(|| Error::UnknownBook(book_id.to_string()))
    }

    /// The size of each level's target vocabulary, in configured order.
    pub fn get_level_vocabulary_stats(&self) -> IndexMap<String, usize> {
        self.config
            .levels()
            .iter()
            .map(|level| {
                let size = self.target_vocabulary.get(level).map_or(0, HashSet::len);
                (level.clone(), size)
            })
            .collect()
    }

    /// Every analyzed book, keyed by id.
    pub fn analyses(&self) -> &BTreeMap<String, BookAnalysis> {
        &self.analyses
    }
}

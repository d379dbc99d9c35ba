//! The layered greedy path generator: for each level, in configured
//! order, pick books that cover that level's target vocabulary under
//! quality constraints, while accumulating coverage and selection state
//! across the whole run.

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzer::BookAnalysis;
use crate::config::LevelConfig;
use crate::error::{Error, Result};
use crate::ser::sorted_string_set;

/// Parameters for one call to [`PathGenerator::create_progressive_reading_path`].
#[derive(Debug, Clone)]
pub struct PathGenerationParameters {
    pub max_books_per_level: IndexMap<String, usize>,
    pub target_coverage_per_level: IndexMap<String, f64>,
    pub max_unknown_ratio: f64,
    pub min_relevant_ratio: f64,
    pub min_target_level_words: usize,
}

impl PathGenerationParameters {
    /// The `conservative` preset: larger book budgets, high target
    /// coverage, tight unknown-word and suitability gates.
    ///
    /// Generalized across any level sequence by banding level index into
    /// thirds (early/mid/late), per `SPEC_FULL.md` §4.3.
    pub fn conservative(config: &LevelConfig) -> Self {
        let n = config.level_count();
        let mid = n.saturating_sub(1) / 2;
        let max_books_per_level = config
            .levels()
            .iter()
            .enumerate()
            .map(|(k, level)| {
                let books = if k <= mid { 4 } else { (4usize.saturating_sub(k - mid)).max(1) };
                (level.clone(), books)
            })
            .collect();
        let target_coverage_per_level = config
            .levels()
            .iter()
            .enumerate()
            .map(|(k, level)| (level.clone(), band_by_thirds(k, n, 0.90, 0.85, 0.80)))
            .collect();
        Self {
            max_books_per_level,
            target_coverage_per_level,
            max_unknown_ratio: 0.10,
            min_relevant_ratio: 0.60,
            min_target_level_words: 50,
        }
    }

    /// The `standard` preset: a front-loaded-then-tapering book budget,
    /// near-uniform high target coverage.
    pub fn standard(config: &LevelConfig) -> Self {
        let n = config.level_count();
        let mid_idx = n / 2;
        let last_third_start = (2 * n + 2) / 3;
        let max_books_per_level = config
            .levels()
            .iter()
            .enumerate()
            .map(|(k, level)| {
                let books = if k == mid_idx {
                    4
                } else if k >= last_third_start {
                    2
                } else {
                    3
                };
                (level.clone(), books)
            })
            .collect();
        let target_coverage_per_level = config
            .levels()
            .iter()
            .enumerate()
            .map(|(k, level)| {
                let coverage = if k == 0 { 0.85 } else { 0.90 };
                (level.clone(), coverage)
            })
            .collect();
        Self {
            max_books_per_level,
            target_coverage_per_level,
            max_unknown_ratio: 0.15,
            min_relevant_ratio: 0.40,
            min_target_level_words: 30,
        }
    }

    /// The `fast` preset: small, roughly uniform book budgets, coverage
    /// that decreases toward the harder levels, loose gates.
    pub fn fast(config: &LevelConfig) -> Self {
        let n = config.level_count();
        let max_books_per_level = config
            .levels()
            .iter()
            .enumerate()
            .map(|(k, level)| (level.clone(), if k == 0 { 3 } else { 2 }))
            .collect();
        let target_coverage_per_level = config
            .levels()
            .iter()
            .enumerate()
            .map(|(k, level)| {
                let coverage = if n <= 1 {
                    0.85
                } else {
                    0.85 - 0.10 * (k as f64 / (n - 1) as f64)
                };
                (level.clone(), coverage)
            })
            .collect();
        Self {
            max_books_per_level,
            target_coverage_per_level,
            max_unknown_ratio: 0.25,
            min_relevant_ratio: 0.30,
            min_target_level_words: 10,
        }
    }
}

fn band_by_thirds(k: usize, n: usize, low: f64, mid: f64, high: f64) -> f64 {
    if n <= 1 {
        return low;
    }
    let pos = k as f64 / (n - 1) as f64;
    if pos < 1.0 / 3.0 {
        low
    } else if pos < 2.0 / 3.0 {
        mid
    } else {
        high
    }
}

/// The three named parameter presets, accepting the synonyms
/// `"balanced"` (for `standard`) and `"aggressive"` (for `fast`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Conservative,
    Standard,
    Fast,
}

impl Strategy {
    /// Resolve a strategy name, accepting documented synonyms.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for any unrecognized name;
    /// there is no silent fallback to a default strategy.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "conservative" => Ok(Strategy::Conservative),
            "standard" | "balanced" => Ok(Strategy::Standard),
            "fast" | "aggressive" => Ok(Strategy::Fast),
            other => Err(Error::InvalidParameters(format!(
                "unrecognized strategy '{other}'"
            ))),
        }
    }

    /// Build this strategy's parameters for `config`.
    pub fn parameters(&self, config: &LevelConfig) -> PathGenerationParameters {
        match self {
            Strategy::Conservative => PathGenerationParameters::conservative(config),
            Strategy::Standard => PathGenerationParameters::standard(config),
            Strategy::Fast => PathGenerationParameters::fast(config),
        }
    }

    /// The canonical (non-synonym) name of this strategy.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Strategy::Conservative => "conservative",
            Strategy::Standard => "standard",
            Strategy::Fast => "fast",
        }
    }
}

/// Per-level filter thresholds derived from [`PathGenerationParameters`].
#[derive(Debug, Clone, Copy)]
pub struct BookSelectionCriteria {
    pub max_unknown_ratio: f64,
    pub min_suitability_score: f64,
    pub min_target_words: usize,
    pub prefer_high_coverage: bool,
}

/// Target-vocabulary size, covered-word count, and book count for one
/// level's selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelStats {
    pub target_words: usize,
    pub covered_words: usize,
    pub books_count: usize,
}

/// The outcome of greedily selecting books for one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSelectionResult {
    pub target_level: String,
    pub selected_books: Vec<String>,
    pub coverage: f64,
    #[serde(serialize_with = "sorted_string_set")]
    pub new_words_covered: HashSet<String>,
    pub level_stats: LevelStats,
}

/// `{covered, total, ratio}` snapshot for one level in the final summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalCoverage {
    pub covered: usize,
    pub total: usize,
    pub ratio: f64,
}

/// Aggregate statistics over a whole generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSummary {
    pub total_books: usize,
    pub books_per_level: IndexMap<String, usize>,
    pub final_coverage: IndexMap<String, FinalCoverage>,
    /// Ordered (configured level order) average difficulty score of the
    /// books selected for that level; 0.0 for a level with no selections.
    pub difficulty_progression: Vec<(String, f64)>,
}

/// The full result of one `create_progressive_reading_path` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingPathResult {
    pub levels: IndexMap<String, LevelSelectionResult>,
    pub total_books: Vec<String>,
    pub cumulative_coverage: IndexMap<String, f64>,
    pub summary: PathSummary,
}

/// Runs the layered greedy selection described in `SPEC_FULL.md` §4.3.
pub struct PathGenerator<'a> {
    config: &'a LevelConfig,
}

impl<'a> PathGenerator<'a> {
    pub fn new(config: &'a LevelConfig) -> Self {
        Self { config }
    }

    /// Validate `params` against `self.config` before any selection
    /// begins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if a configured level is
    /// missing from either per-level map, a ratio is out of `[0, 1]`,
    /// `max_unknown_ratio + min_relevant_ratio > 1`, a book budget is
    /// zero, or `min_target_level_words` is zero.
    pub fn validate_params(&self, params: &PathGenerationParameters) -> Result<()> {
        for level in self.config.levels() {
            let max_books = params.max_books_per_level.get(level).ok_or_else(|| {
                Error::InvalidParameters(format!("missing max_books_per_level for '{level}'"))
            })?;
            if *max_books == 0 {
                return Err(Error::InvalidParameters(format!(
                    "max_books_per_level for '{level}' must be > 0"
                )));
            }
            let coverage = params.target_coverage_per_level.get(level).ok_or_else(|| {
                Error::InvalidParameters(format!(
                    "missing target_coverage_per_level for '{level}'"
                ))
            })?;
            if !(0.0..=1.0).contains(coverage) {
                return Err(Error::InvalidParameters(format!(
                    "target_coverage_per_level for '{level}' must be within [0, 1]"
                )));
            }
        }
        if !(0.0..=1.0).contains(&params.max_unknown_ratio) {
            return Err(Error::InvalidParameters(
                "max_unknown_ratio must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&params.min_relevant_ratio) {
            return Err(Error::InvalidParameters(
                "min_relevant_ratio must be within [0, 1]".into(),
            ));
        }
        if params.max_unknown_ratio + params.min_relevant_ratio > 1.0 {
            return Err(Error::InvalidParameters(
                "max_unknown_ratio + min_relevant_ratio must be <= 1".into(),
            ));
        }
        if params.min_target_level_words == 0 {
            return Err(Error::InvalidParameters(
                "min_target_level_words must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Run the layered greedy selection over every configured level, in
    /// order, and assemble the final result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `params` fails validation;
    /// no selection work happens before that check runs.
    pub fn create_progressive_reading_path(
        &self,
        books_analyses: &BTreeMap<String, BookAnalysis>,
        target_vocabulary: &HashMap<String, HashSet<String>>,
        params: &PathGenerationParameters,
    ) -> Result<ReadingPathResult> {
        self.validate_params(params)?;

        let empty_set: HashSet<String> = HashSet::new();
        let mut cumulative_covered: HashSet<String> = HashSet::new();
        let mut already_selected: HashSet<String> = HashSet::new();
        let mut levels: IndexMap<String, LevelSelectionResult> = IndexMap::new();
        let mut total_books: Vec<String> = Vec::new();
        let mut cumulative_coverage: IndexMap<String, f64> = IndexMap::new();

        for (k, level) in self.config.levels().iter().enumerate() {
            let criteria = BookSelectionCriteria {
                max_unknown_ratio: params.max_unknown_ratio,
                min_suitability_score: params.min_relevant_ratio,
                min_target_words: params.min_target_level_words,
                prefer_high_coverage: true,
            };

            let target_words = target_vocabulary.get(level).unwrap_or(&empty_set);
            let target_total = target_words.len();

            let mut candidates: Vec<String> = books_analyses
                .keys()
                .filter(|id| !already_selected.contains(id.as_str()))
                .filter(|id| {
                    // Safe: id comes from books_analyses.keys() itself.
                    #[allow(clippy::indexing_slicing)]
                    let analysis = &books_analyses[id.as_str()];
                    analysis.unknown_ratio <= criteria.max_unknown_ratio
                        && analysis
                            .suitability_scores
                            .get(level)
                            .copied()
                            .unwrap_or(0.0)
                            >= criteria.min_suitability_score
                        && analysis
                            .level_distributions
                            .get(level)
                            .map(|s| s.count)
                            .unwrap_or(0)
                            >= criteria.min_target_words
                })
                .cloned()
                .collect();
            // Tie-break hint only — the scoring loop below is what
            // actually determines selection order.
            candidates.sort_by(|a, b| {
                let value_a = books_analyses[a].learning_value;
                let value_b = books_analyses[b].learning_value;
                value_b
                    .partial_cmp(&value_a)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            #[allow(clippy::expect_used)]
            let max_books = *params
                .max_books_per_level
                .get(level)
                .expect("validated above");
            #[allow(clippy::expect_used)]
            let target_coverage = *params
                .target_coverage_per_level
                .get(level)
                .expect("validated above");

            let mut remaining_words: HashSet<String> =
                target_words.difference(&cumulative_covered).cloned().collect();
            let mut newly_covered: HashSet<String> = HashSet::new();
            let mut selected: Vec<String> = Vec::new();
            let mut iteration: u32 = 0;

            loop {
                if selected.len() >= max_books {
                    break;
                }
                let coverage_so_far = if target_total == 0 {
                    0.0
                } else {
                    newly_covered.len() as f64 / target_total as f64
                };
                if target_total > 0 && coverage_so_far >= target_coverage {
                    break;
                }
                if remaining_words.is_empty() || candidates.is_empty() {
                    break;
                }

                iteration += 1;

                let mut best_idx: Option<usize> = None;
                let mut best_score = 0.0f64;
                for (idx, id) in candidates.iter().enumerate() {
                    let analysis = &books_analyses[id.as_str()];
                    let score = self.score(analysis, level, k, &remaining_words, iteration);
                    if score <= 0.0 {
                        continue;
                    }
                    let is_better = match best_idx {
                        None => true,
                        Some(current) => {
                            let current_id = &candidates[current];
                            let current_analysis = &books_analyses[current_id.as_str()];
                            Self::candidate_wins(
                                score,
                                analysis,
                                id,
                                best_score,
                                current_analysis,
                                current_id,
                            )
                        }
                    };
                    if is_better {
                        best_idx = Some(idx);
                        best_score = score;
                    }
                }

                let Some(idx) = best_idx else {
                    break;
                };
                let chosen_id = candidates.remove(idx);
                let analysis = &books_analyses[chosen_id.as_str()];
                let new_words_at_level: HashSet<String> = analysis
                    .level_distributions
                    .get(level)
                    .map(|stats| stats.words.intersection(&remaining_words).cloned().collect())
                    .unwrap_or_default();

                for word in &new_words_at_level {
                    remaining_words.remove(word);
                }
                newly_covered.extend(new_words_at_level);
                selected.push(chosen_id);
            }

            let coverage = if target_total == 0 {
                0.0
            } else {
                newly_covered.len() as f64 / target_total as f64
            };

            for book_id in &selected {
                let analysis = &books_analyses[book_id.as_str()];
                for stats in analysis.level_distributions.values() {
                    cumulative_covered.extend(stats.words.iter().cloned());
                }
                already_selected.insert(book_id.clone());
            }
            total_books.extend(selected.iter().cloned());

            let books_count = selected.len();
            debug!(
                level,
                books_count,
                coverage,
                "selected books for level"
            );

            levels.insert(
                level.clone(),
                LevelSelectionResult {
                    target_level: level.clone(),
                    selected_books: selected,
                    coverage,
                    level_stats: LevelStats {
                        target_words: target_total,
                        covered_words: newly_covered.len(),
                        books_count,
                    },
                    new_words_covered: newly_covered,
                },
            );
            cumulative_coverage.insert(level.clone(), coverage);
        }

        let summary = self.build_summary(&levels, &total_books, books_analyses);
        info!(
            total_books = total_books.len(),
            levels = levels.len(),
            "generated reading path"
        );

        Ok(ReadingPathResult {
            levels,
            total_books,
            cumulative_coverage,
            summary,
        })
    }

    /// Tie-break order when two candidates score equally: lower
    /// `unknown_count`, then higher `learning_value`, then lexicographic
    /// `book_id`.
    #[allow(clippy::too_many_arguments)]
    fn candidate_wins(
        score: f64,
        analysis: &BookAnalysis,
        id: &str,
        best_score: f64,
        best_analysis: &BookAnalysis,
        best_id: &str,
    ) -> bool {
        if score != best_score {
            return score > best_score;
        }
        if analysis.unknown_count != best_analysis.unknown_count {
            return analysis.unknown_count < best_analysis.unknown_count;
        }
        if analysis.learning_value != best_analysis.learning_value {
            return analysis.learning_value > best_analysis.learning_value;
        }
        id < best_id
    }

    /// The greedy-iteration scoring function (`SPEC_FULL.md` §4.3).
    fn score(
        &self,
        analysis: &BookAnalysis,
        level: &str,
        k: usize,
        remaining: &HashSet<String>,
        iteration: u32,
    ) -> f64 {
        let Some(stats) = analysis.level_distributions.get(level) else {
            return -1.0;
        };
        if stats.count == 0 {
            return -1.0;
        }
        let new_coverage = stats.words.intersection(remaining).count();
        if new_coverage == 0 {
            return -1.0;
        }

        let mut score = 10.0 * new_coverage as f64;

        for prior_level in &self.config.levels()[..k] {
            if let Some(prior_stats) = analysis.level_distributions.get(prior_level) {
                score += 0.5 * prior_stats.count as f64;
            }
        }

        if k + 1 < self.config.level_count() {
            let next_level = &self.config.levels()[k + 1];
            if let Some(next_stats) = analysis.level_distributions.get(next_level) {
                score += 0.1 * (next_stats.count as f64).min(100.0);
            }
        }

        score -= 0.8 * analysis.unknown_count as f64;

        if iteration > 2 && !remaining.is_empty() {
            score += 50.0 * (new_coverage as f64 / remaining.len() as f64);
        }

        score
    }

    fn build_summary(
        &self,
        levels: &IndexMap<String, LevelSelectionResult>,
        total_books: &[String],
        books_analyses: &BTreeMap<String, BookAnalysis>,
    ) -> PathSummary {
        let books_per_level = levels
            .iter()
            .map(|(level, result)| (level.clone(), result.selected_books.len()))
            .collect();
        let final_coverage = levels
            .iter()
            .map(|(level, result)| {
                (
                    level.clone(),
                    FinalCoverage {
                        covered: result.level_stats.covered_words,
                        total: result.level_stats.target_words,
                        ratio: result.coverage,
                    },
                )
            })
            .collect();
        let difficulty_progression = levels
            .iter()
            .map(|(level, result)| {
                let average = if result.selected_books.is_empty() {
                    0.0
                } else {
                    let sum: f64 = result
                        .selected_books
                        .iter()
                        .map(|id| books_analyses[id.as_str()].difficulty_score)
                        .sum();
                    sum / result.selected_books.len() as f64
                };
                (level.clone(), average)
            })
            .collect();

        PathSummary {
            total_books: total_books.len(),
            books_per_level,
            final_coverage,
            difficulty_progression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::BookAnalyzer;
    use crate::vocabulary::WordLevelMap;
    use std::collections::HashMap;

    fn cefr_setup() -> (LevelConfig, WordLevelMap) {
        let config = LevelConfig::cefr();
        let words = HashMap::from([
            ("a".to_string(), "A1".to_string()),
            ("b".to_string(), "A1".to_string()),
            ("c".to_string(), "A2".to_string()),
            ("d".to_string(), "B1".to_string()),
        ]);
        let map = WordLevelMap::new(words, &config).unwrap();
        (config, map)
    }

    fn uniform_params(config: &LevelConfig, max_books: usize, coverage: f64) -> PathGenerationParameters {
        let max_books_per_level = config.levels().iter().map(|l| (l.clone(), max_books)).collect();
        let target_coverage_per_level = config.levels().iter().map(|l| (l.clone(), coverage)).collect();
        PathGenerationParameters {
            max_books_per_level,
            target_coverage_per_level,
            max_unknown_ratio: 0.5,
            min_relevant_ratio: 0.0,
            min_target_level_words: 1,
        }
    }

    fn target_vocab_from_config(config: &LevelConfig, vocab: &crate::vocabulary::LevelVocabulary) -> HashMap<String, HashSet<String>> {
        config
            .levels()
            .iter()
            .map(|l| (l.clone(), vocab.words_for(l).cloned().unwrap_or_default()))
            .collect()
    }

    /// Scenario A from SPEC_FULL.md §8.
    #[test]
    fn scenario_a_cefr_trivial_corpus() {
        let (config, word_map) = cefr_setup();
        let analyzer = BookAnalyzer::new(&config, &word_map);
        let books = BTreeMap::from([
            ("book1".to_string(), ["a", "b"].iter().map(|s| s.to_string()).collect()),
            ("book2".to_string(), ["a", "c"].iter().map(|s| s.to_string()).collect()),
            ("book3".to_string(), ["c", "d", "x"].iter().map(|s| s.to_string()).collect()),
        ]);
        let analyses = analyzer.analyze_all_books(&books);
        let target = target_vocab_from_config(&config, analyzer.vocabulary());

        let max_books_per_level = IndexMap::from([
            ("A1".to_string(), 2),
            ("A2".to_string(), 1),
            ("B1".to_string(), 1),
            ("B2".to_string(), 1),
            ("C1".to_string(), 1),
        ]);
        let target_coverage_per_level = config.levels().iter().map(|l| (l.clone(), 1.0)).collect();
        let params = PathGenerationParameters {
            max_books_per_level,
            target_coverage_per_level,
            max_unknown_ratio: 0.5,
            min_relevant_ratio: 0.0,
            min_target_level_words: 1,
        };

        let generator = PathGenerator::new(&config);
        let result = generator
            .create_progressive_reading_path(&analyses, &target, &params)
            .unwrap();

        assert_eq!(result.levels["A1"].selected_books, vec!["book1".to_string()]);
        assert!((result.levels["A1"].coverage - 1.0).abs() < 1e-9);
        assert_eq!(result.levels["A2"].selected_books, vec!["book2".to_string()]);
        assert!((result.levels["A2"].coverage - 1.0).abs() < 1e-9);
        assert_eq!(result.levels["B1"].selected_books, vec!["book3".to_string()]);
        assert!((result.levels["B1"].coverage - 1.0).abs() < 1e-9);
        assert!(result.levels["B2"].selected_books.is_empty());
        assert!(result.levels["C1"].selected_books.is_empty());
        assert_eq!(
            result.total_books,
            vec!["book1".to_string(), "book2".to_string(), "book3".to_string()]
        );
    }

    /// Scenario B from SPEC_FULL.md §8: ties broken by lexicographic book id.
    #[test]
    fn scenario_b_determinism_under_ties() {
        let (config, word_map) = cefr_setup();
        let analyzer = BookAnalyzer::new(&config, &word_map);
        let books = BTreeMap::from([
            ("zeta".to_string(), ["a", "b"].iter().map(|s| s.to_string()).collect()),
            ("alpha".to_string(), ["a", "b"].iter().map(|s| s.to_string()).collect()),
        ]);
        let analyses = analyzer.analyze_all_books(&books);
        let target = target_vocab_from_config(&config, analyzer.vocabulary());
        let params = uniform_params(&config, 1, 1.0);
        let generator = PathGenerator::new(&config);

        let first = generator
            .create_progressive_reading_path(&analyses, &target, &params)
            .unwrap();
        let second = generator
            .create_progressive_reading_path(&analyses, &target, &params)
            .unwrap();

        assert_eq!(first.levels["A1"].selected_books, vec!["alpha".to_string()]);
        assert_eq!(first, second);
    }

    /// Scenario C from SPEC_FULL.md §8: unreachable coverage is reported
    /// truthfully, not an error.
    #[test]
    fn scenario_c_unreachable_coverage() {
        let (config, word_map) = cefr_setup();
        let analyzer = BookAnalyzer::new(&config, &word_map);
        let books = BTreeMap::from([(
            "book1".to_string(),
            ["a"].iter().map(|s| s.to_string()).collect(),
        )]);
        let analyses = analyzer.analyze_all_books(&books);
        let target = target_vocab_from_config(&config, analyzer.vocabulary());
        let params = uniform_params(&config, 1, 1.0);
        let generator = PathGenerator::new(&config);

        let result = generator
            .create_progressive_reading_path(&analyses, &target, &params)
            .unwrap();

        assert_eq!(result.levels["A1"].selected_books.len(), 1);
        assert!(result.levels["A1"].coverage < 1.0);
    }

    /// Scenario D from SPEC_FULL.md §8: the unknown-ratio gate excludes a
    /// book even when it is the only candidate.
    #[test]
    fn scenario_d_unknown_ratio_gate() {
        let (config, word_map) = cefr_setup();
        let analyzer = BookAnalyzer::new(&config, &word_map);
        let books = BTreeMap::from([(
            "book1".to_string(),
            ["a", "b", "b2", "x"].iter().map(|s| s.to_string()).collect(),
        )]);
        let analyses = analyzer.analyze_all_books(&books);
        assert!(analyses["book1"].unknown_ratio > 0.15);

        let target = target_vocab_from_config(&config, analyzer.vocabulary());
        let mut params = uniform_params(&config, 1, 1.0);
        params.max_unknown_ratio = 0.15;
        let generator = PathGenerator::new(&config);

        let result = generator
            .create_progressive_reading_path(&analyses, &target, &params)
            .unwrap();
        assert!(result.levels["A1"].selected_books.is_empty());
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let config = LevelConfig::cefr();
        let generator = PathGenerator::new(&config);
        let mut max_books_per_level = IndexMap::new();
        max_books_per_level.insert("A1".to_string(), 1);
        // Missing A2, B1, B2, C1.
        let target_coverage_per_level = config.levels().iter().map(|l| (l.clone(), 1.0)).collect();
        let params = PathGenerationParameters {
            max_books_per_level,
            target_coverage_per_level,
            max_unknown_ratio: 0.5,
            min_relevant_ratio: 0.0,
            min_target_level_words: 1,
        };
        let result = generator.create_progressive_reading_path(
            &BTreeMap::new(),
            &HashMap::new(),
            &params,
        );
        assert!(matches!(result, Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn rejects_unknown_ratio_plus_relevant_ratio_over_one() {
        let config = LevelConfig::cefr();
        let generator = PathGenerator::new(&config);
        let mut params = uniform_params(&config, 1, 1.0);
        params.max_unknown_ratio = 0.7;
        params.min_relevant_ratio = 0.5;
        assert!(matches!(
            generator.validate_params(&params),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn no_book_appears_twice_across_levels() {
        let (config, word_map) = cefr_setup();
        let analyzer = BookAnalyzer::new(&config, &word_map);
        let books = BTreeMap::from([
            ("book1".to_string(), ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect()),
        ]);
        let analyses = analyzer.analyze_all_books(&books);
        let target = target_vocab_from_config(&config, analyzer.vocabulary());
        let params = uniform_params(&config, 5, 1.0);
        let generator = PathGenerator::new(&config);

        let result = generator
            .create_progressive_reading_path(&analyses, &target, &params)
            .unwrap();

        let mut seen = HashSet::new();
        for id in &result.total_books {
            assert!(seen.insert(id.clone()), "book {id} appeared twice");
        }
    }

    #[test]
    fn empty_target_vocabulary_yields_zero_coverage_no_selection() {
        let (config, word_map) = cefr_setup();
        let analyzer = BookAnalyzer::new(&config, &word_map);
        let books = BTreeMap::from([
            ("book1".to_string(), ["a", "b"].iter().map(|s| s.to_string()).collect()),
        ]);
        let analyses = analyzer.analyze_all_books(&books);
        let params = uniform_params(&config, 5, 1.0);
        let generator = PathGenerator::new(&config);

        // No entries at all in target_vocabulary.
        let result = generator
            .create_progressive_reading_path(&analyses, &HashMap::new(), &params)
            .unwrap();

        for level_result in result.levels.values() {
            assert_eq!(level_result.coverage, 0.0);
            assert!(level_result.selected_books.is_empty());
        }
    }

    #[test]
    fn strategy_synonyms_produce_identical_parameters() {
        let config = LevelConfig::cefr();
        let standard = Strategy::parse("standard").unwrap();
        let balanced = Strategy::parse("balanced").unwrap();
        assert_eq!(standard, balanced);
        let fast = Strategy::parse("fast").unwrap();
        let aggressive = Strategy::parse("aggressive").unwrap();
        assert_eq!(fast, aggressive);

        let p1 = standard.parameters(&config);
        let p2 = balanced.parameters(&config);
        assert_eq!(p1.max_books_per_level, p2.max_books_per_level);
        assert_eq!(p1.target_coverage_per_level, p2.target_coverage_per_level);
    }

    #[test]
    fn unknown_strategy_name_errors() {
        assert!(matches!(Strategy::parse("ludicrous"), Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn preset_max_books_match_cefr_table_shape() {
        let config = LevelConfig::cefr();
        let standard = PathGenerationParameters::standard(&config);
        let books: Vec<usize> = config
            .levels()
            .iter()
            .map(|l| standard.max_books_per_level[l])
            .collect();
        assert_eq!(books, vec![3, 3, 4, 3, 2]);
    }

    #[test]
    fn conservative_covers_at_least_as_much_as_fast_on_seeded_corpus() {
        let (config, word_map) = cefr_setup();
        let analyzer = BookAnalyzer::new(&config, &word_map);
        let books = BTreeMap::from([
            ("book1".to_string(), ["a", "b"].iter().map(|s| s.to_string()).collect()),
            ("book2".to_string(), ["a", "c"].iter().map(|s| s.to_string()).collect()),
            ("book3".to_string(), ["c", "d"].iter().map(|s| s.to_string()).collect()),
        ]);
        let analyses = analyzer.analyze_all_books(&books);
        let target = target_vocab_from_config(&config, analyzer.vocabulary());
        let generator = PathGenerator::new(&config);

        let conservative = generator
            .create_progressive_reading_path(&analyses, &target, &PathGenerationParameters::conservative(&config))
            .unwrap();
        let fast = generator
            .create_progressive_reading_path(&analyses, &target, &PathGenerationParameters::fast(&config))
            .unwrap();

        for level in config.levels() {
            assert!(conservative.cumulative_coverage[level] >= fast.cumulative_coverage[level] - 1e-9);
        }
    }
}

//! Progressive reading path generation over a vocabulary-leveled book
//! corpus.
//!
//! Four components, built bottom-up: [`config`] defines the difficulty
//! space, [`vocabulary`] and [`analyzer`] turn raw book/word data into
//! per-book statistics against that space, [`generator`] greedily selects
//! books level by level, and [`facade`] wires the three together behind
//! one entry point. Nothing in this crate performs file or network I/O —
//! corpus loading lives one layer up, in `readpath-corpus`.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod facade;
pub mod generator;
mod ser;
pub mod vocabulary;

pub use analyzer::{BookAnalysis, BookAnalyzer, DifficultyCategory, VocabularyLevelStats};
pub use config::{LevelConfig, ProgressionKind};
pub use error::{Error, Result};
pub use facade::{BookEvaluation, ReadingPathFacade};
pub use generator::{
    BookSelectionCriteria, FinalCoverage, LevelSelectionResult, LevelStats,
    PathGenerationParameters, PathGenerator, PathSummary, ReadingPathResult, Strategy,
};
pub use vocabulary::{LevelVocabulary, WordLevelMap};

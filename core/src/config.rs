//! The difficulty model: an ordered sequence of levels, per-level
//! learning weights, and a progression curve that turns a level index
//! into a difficulty multiplier.
//!
//! A `LevelConfig` is validated once at construction and immutable
//! thereafter — every downstream component treats it as read-only shared
//! state (see the crate-level docs for the sharing policy).

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// The progression curve used to derive difficulty multipliers from
/// level index.
///
/// `Custom` carries its own multipliers rather than leaving them in an
/// optional side table: there is no "config that might have multipliers"
/// state, only the three fully-specified variants below.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionKind {
    /// multiplier(L_k) = k + 1
    Linear,
    /// multiplier(L_k) = 2^k
    Exponential,
    /// multiplier(L_k) = multipliers\[k\], strictly increasing in k.
    Custom(Vec<f64>),
}

/// The immutable description of the difficulty space.
#[derive(Debug, Clone)]
pub struct LevelConfig {
    levels: Vec<String>,
    weights: IndexMap<String, f64>,
    progression: ProgressionKind,
    sentinel: String,
    multipliers: Vec<f64>,
    sentinel_multiplier: f64,
}

impl LevelConfig {
    /// Construct and validate a level configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if level names are duplicated or
    /// empty, a weight is missing or negative, the sentinel collides with
    /// a configured level, or a custom progression's multipliers are
    /// missing or not strictly increasing.
    pub fn new(
        levels: Vec<String>,
        weights: IndexMap<String, f64>,
        progression: ProgressionKind,
        sentinel: String,
    ) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::InvalidConfig("at least one level is required".into()));
        }
        if levels.iter().any(|l| l.is_empty()) {
            return Err(Error::InvalidConfig("level names must be non-empty".into()));
        }
        let unique: HashSet<&str> = levels.iter().map(String::as_str).collect();
        if unique.len() != levels.len() {
            return Err(Error::InvalidConfig("level names must be unique".into()));
        }
        if sentinel.is_empty() {
            return Err(Error::InvalidConfig("sentinel name must be non-empty".into()));
        }
        if unique.contains(sentinel.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "sentinel '{sentinel}' collides with a configured level"
            )));
        }
        for level in &levels {
            let weight = weights.get(level).ok_or_else(|| {
                Error::InvalidConfig(format!("missing weight for level '{level}'"))
            })?;
            if *weight < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "weight for level '{level}' must be non-negative, got {weight}"
                )));
            }
        }

        let multipliers = match &progression {
            ProgressionKind::Linear => (1..=levels.len()).map(|k| k as f64).collect(),
            ProgressionKind::Exponential => {
                (0..levels.len()).map(|k| 2f64.powi(k as i32)).collect()
            }
            ProgressionKind::Custom(values) => {
                if values.len() != levels.len() {
                    return Err(Error::InvalidConfig(format!(
                        "custom progression needs {} multipliers, got {}",
                        levels.len(),
                        values.len()
                    )));
                }
                for window in values.windows(2) {
                    if window[1] <= window[0] {
                        return Err(Error::InvalidConfig(
                            "custom progression multipliers must be strictly increasing".into(),
                        ));
                    }
                }
                values.clone()
            }
        };

        let sentinel_multiplier = multipliers.iter().cloned().fold(f64::MIN, f64::max) + 1.0;

        Ok(Self {
            levels,
            weights,
            progression,
            sentinel,
            multipliers,
            sentinel_multiplier,
        })
    }

    /// The CEFR preset: A1..C1, linear progression, sentinel `BEYOND`.
    pub fn cefr() -> Self {
        let levels = vec!["A1", "A2", "B1", "B2", "C1"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let raw_weights = [1.5, 1.3, 1.1, 1.0, 0.9];
        let weights = levels
            .iter()
            .cloned()
            .zip(raw_weights)
            .collect::<IndexMap<_, _>>();
        // Construction cannot fail for a preset built from fixed, valid data.
        #[allow(clippy::expect_used)]
        Self::new(levels, weights, ProgressionKind::Linear, "BEYOND".into())
            .expect("CEFR preset is always valid")
    }

    /// The Grade preset: `Grade1..GradeN`, exponential progression,
    /// weights decreasing by 0.2 per grade with a floor of 0.8, sentinel
    /// `ADVANCED`.
    pub fn grade(n: u32) -> Self {
        let levels = (1..=n.max(1))
            .map(|i| format!("Grade{i}"))
            .collect::<Vec<_>>();
        let weights = levels
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, level)| (level, (2.0 - i as f64 * 0.2).max(0.8)))
            .collect::<IndexMap<_, _>>();
        #[allow(clippy::expect_used)]
        Self::new(levels, weights, ProgressionKind::Exponential, "ADVANCED".into())
            .expect("Grade preset is always valid")
    }

    /// The Frequency preset: HighFreq/MidFreq/LowFreq/Rare, linear
    /// progression, sentinel `UNKNOWN`.
    pub fn frequency() -> Self {
        let levels = vec!["HighFreq", "MidFreq", "LowFreq", "Rare"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let raw_weights = [1.8, 1.3, 1.0, 0.7];
        let weights = levels
            .iter()
            .cloned()
            .zip(raw_weights)
            .collect::<IndexMap<_, _>>();
        #[allow(clippy::expect_used)]
        Self::new(levels, weights, ProgressionKind::Linear, "UNKNOWN".into())
            .expect("Frequency preset is always valid")
    }

    /// The ordered level sequence, easiest first.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// The sentinel (out-of-syllabus) level name.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// The configured progression curve.
    pub fn progression(&self) -> &ProgressionKind {
        &self.progression
    }

    /// The index `k` such that `level == levels()[k]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLevel`] if `level` is not configured.
    pub fn index_of(&self, level: &str) -> Result<usize> {
        self.levels
            .iter()
            .position(|l| l == level)
            .ok_or_else(|| Error::UnknownLevel(level.to_string()))
    }

    /// The difficulty multiplier for `level`, or for the sentinel level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLevel`] if `level` is neither a configured
    /// level nor the sentinel.
    pub fn difficulty_multiplier(&self, level: &str) -> Result<f64> {
        if level == self.sentinel {
            return Ok(self.sentinel_multiplier);
        }
        let k = self.index_of(level)?;
        Ok(self.multipliers[k])
    }

    /// The configured learning weight for `level`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLevel`] if `level` is not configured.
    pub fn weight(&self, level: &str) -> Result<f64> {
        self.weights
            .get(level)
            .copied()
            .ok_or_else(|| Error::UnknownLevel(level.to_string()))
    }

    /// Number of configured levels (excludes the sentinel).
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

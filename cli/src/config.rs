//! Builds a [`LevelConfig`] from a CLI preset selection or a custom TOML
//! file, per `SPEC_FULL.md` §6's "TOML for `LevelConfig` overrides" note.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use readpath_core::{LevelConfig, ProgressionKind};
use serde::Deserialize;

use crate::{LevelPreset, LevelSource};

/// On-disk shape of a custom level configuration.
///
/// `progression` is one of `"linear"`, `"exponential"`, or `"custom"`;
/// `multipliers` is required (and must line up one-to-one with `levels`)
/// only for the `"custom"` case, mirroring [`ProgressionKind`]'s own
/// fully-specified variants.
#[derive(Debug, Deserialize)]
struct TomlLevelConfig {
    levels: Vec<String>,
    weights: HashMap<String, f64>,
    progression: String,
    multipliers: Option<Vec<f64>>,
    sentinel: String,
}

/// Resolve `source` into a validated [`LevelConfig`].
///
/// # Errors
///
/// Returns an error if a custom config file cannot be read or parsed, if
/// its `progression` tag is unrecognized, or if the resulting
/// configuration fails [`LevelConfig::new`]'s own validation.
pub fn build_level_config(source: &LevelSource) -> Result<LevelConfig> {
    match source {
        LevelSource::Preset(LevelPreset::Cefr) => Ok(LevelConfig::cefr()),
        LevelSource::Preset(LevelPreset::Grade { grades }) => Ok(LevelConfig::grade(*grades)),
        LevelSource::Preset(LevelPreset::Frequency) => Ok(LevelConfig::frequency()),
        LevelSource::Custom(path) => load_custom_level_config(path),
    }
}

fn load_custom_level_config(path: &Path) -> Result<LevelConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading level config '{}'", path.display()))?;
    let raw: TomlLevelConfig = toml::from_str(&content)
        .with_context(|| format!("parsing level config '{}'", path.display()))?;

    let progression = match raw.progression.to_ascii_lowercase().as_str() {
        "linear" => ProgressionKind::Linear,
        "exponential" => ProgressionKind::Exponential,
        "custom" => {
            let multipliers = raw.multipliers.ok_or_else(|| {
                anyhow::anyhow!("progression = \"custom\" requires a `multipliers` array")
            })?;
            ProgressionKind::Custom(multipliers)
        }
        other => bail!("unknown progression kind '{other}' (expected linear/exponential/custom)"),
    };

    let mut weights = IndexMap::with_capacity(raw.levels.len());
    for level in &raw.levels {
        let weight = *raw
            .weights
            .get(level)
            .ok_or_else(|| anyhow::anyhow!("missing weight for level '{level}'"))?;
        weights.insert(level.clone(), weight);
    }

    Ok(LevelConfig::new(raw.levels, weights, progression, raw.sentinel)?)
}

//! `readpath` — generates a progressive reading path over a vocabulary-
//! leveled book corpus.
//!
//! Loads a book corpus and a word-to-level map from JSON (via
//! `readpath-corpus`), builds a `LevelConfig` from a built-in preset or a
//! custom TOML file, and drives a `ReadingPathFacade` through one of four
//! subcommands, printing either a formatted table or JSON.

mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use readpath_core::{ReadingPathFacade, Strategy, WordLevelMap};
use tracing::info;

#[derive(Parser)]
#[command(name = "readpath")]
#[command(about = "Generate a progressive reading path over a vocabulary-leveled book corpus")]
struct Cli {
    /// Book corpus JSON file: {"books": {book_id: [word, ...]}}
    #[arg(short, long, global = true, env = "READPATH_CORPUS")]
    corpus: PathBuf,

    /// Word-to-level map JSON file: {"words": {word: level}}
    #[arg(short = 'w', long, global = true, env = "READPATH_WORD_LEVELS")]
    word_levels: PathBuf,

    /// Built-in difficulty model, or "custom" to load --level-config
    #[arg(long, value_enum, default_value = "cefr", global = true)]
    preset: LevelPresetArg,

    /// Number of grade levels (only used with --preset grade)
    #[arg(long, default_value_t = 6, global = true)]
    grades: u32,

    /// TOML file describing a custom LevelConfig (required with --preset custom)
    #[arg(long, global = true)]
    level_config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LevelPresetArg {
    Cefr,
    Grade,
    Frequency,
    Custom,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// The resolved level-configuration source, built from the CLI's preset
/// flag plus any preset-specific arguments.
pub enum LevelSource {
    Preset(LevelPreset),
    Custom(PathBuf),
}

pub enum LevelPreset {
    Cefr,
    Grade { grades: u32 },
    Frequency,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single reading path with one named strategy
    Generate {
        /// conservative | standard (balanced) | fast (aggressive)
        #[arg(long, default_value = "standard")]
        strategy: String,
    },
    /// Generate and compare several strategies side by side
    Alternatives {
        #[arg(long, value_delimiter = ',', default_value = "conservative,standard,fast")]
        strategies: Vec<String>,
    },
    /// Evaluate one book's suitability for one level
    Evaluate {
        book_id: String,
        level: String,
    },
    /// Print per-level vocabulary sizes and corpus size
    Stats,
}

/// `$XDG_CONFIG_HOME/readpath/level_config.toml` (or the platform
/// equivalent), if one has been dropped there and `--level-config` was
/// not passed explicitly.
fn default_level_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("readpath").join("level_config.toml");
    path.exists().then_some(path)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let books = readpath_corpus::load_corpus(&cli.corpus)?;
    let raw_words = readpath_corpus::load_word_levels(&cli.word_levels)?;

    let level_source = match cli.preset {
        LevelPresetArg::Cefr => LevelSource::Preset(LevelPreset::Cefr),
        LevelPresetArg::Grade => LevelSource::Preset(LevelPreset::Grade { grades: cli.grades }),
        LevelPresetArg::Frequency => LevelSource::Preset(LevelPreset::Frequency),
        LevelPresetArg::Custom => {
            let path = cli
                .level_config
                .clone()
                .or_else(default_level_config_path)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "--level-config is required when --preset is 'custom' \
                         (no default found under the user config directory)"
                    )
                })?;
            LevelSource::Custom(path)
        }
    };
    let level_config = config::build_level_config(&level_source)?;

    let word_map = WordLevelMap::new(raw_words, &level_config)?;
    let facade = ReadingPathFacade::new(&books, &word_map, level_config)?;

    info!(
        book_count = facade.analyses().len(),
        "readpath facade ready"
    );

    match cli.command {
        Commands::Generate { strategy } => {
            let strategy = Strategy::parse(&strategy)?;
            let params = strategy.parameters(facade.config());
            let result = facade.create_reading_path(Some(&params))?;
            output::render_path(&result, cli.format);
        }
        Commands::Alternatives { strategies } => {
            let names: Vec<&str> = strategies.iter().map(String::as_str).collect();
            let results = facade.get_alternative_paths(&names)?;
            output::render_alternatives(&results, cli.format);
        }
        Commands::Evaluate { book_id, level } => {
            let evaluation = facade.evaluate_book_for_level(&book_id, &level)?;
            output::render_evaluation(&book_id, &level, &evaluation, cli.format);
        }
        Commands::Stats => {
            let vocabulary_sizes = facade.get_level_vocabulary_stats();
            output::render_level_stats(&vocabulary_sizes, facade.analyses().len(), cli.format);
        }
    }

    Ok(())
}

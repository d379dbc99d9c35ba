//! Renders facade results as either a JSON document or a formatted table,
//! per `SPEC_FULL.md` §6's "JSON or a formatted table on stdout" note.

use indexmap::IndexMap;
use readpath_core::{BookEvaluation, ReadingPathResult};

use crate::OutputFormat;

pub fn render_path(result: &ReadingPathResult, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(result),
        OutputFormat::Table => print_path_table(result),
    }
}

pub fn render_alternatives(results: &IndexMap<String, ReadingPathResult>, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(results),
        OutputFormat::Table => {
            for (name, result) in results {
                println!("=== strategy: {name} ===");
                print_path_table(result);
                println!();
            }
        }
    }
}

pub fn render_evaluation(
    book_id: &str,
    level: &str,
    evaluation: &BookEvaluation,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "book_id": book_id,
                "level": level,
                "evaluation": evaluation,
            });
            print_json(&payload);
        }
        OutputFormat::Table => {
            println!("book:                  {book_id}");
            println!("level:                 {level}");
            println!("suitability:           {:.3}", evaluation.suitability_score);
            println!("level word count:      {}", evaluation.level_word_count);
            println!("level word ratio:      {:.3}", evaluation.level_word_ratio);
            println!("unknown ratio:         {:.3}", evaluation.unknown_ratio);
            println!("difficulty:            {:?}", evaluation.difficulty_category);
            println!(
                "meets default criteria: {}",
                evaluation.meets_default_criteria_for_level
            );
        }
    }
}

pub fn render_level_stats(
    vocabulary_sizes: &IndexMap<String, usize>,
    book_count: usize,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "book_count": book_count,
                "level_vocabulary_sizes": vocabulary_sizes,
            });
            print_json(&payload);
        }
        OutputFormat::Table => {
            println!("books analyzed: {book_count}");
            println!("{:<12}{:>10}", "level", "words");
            for (level, size) in vocabulary_sizes {
                println!("{level:<12}{size:>10}");
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize output: {err}"),
    }
}

fn print_path_table(result: &ReadingPathResult) {
    let difficulty: IndexMap<&str, f64> = result
        .summary
        .difficulty_progression
        .iter()
        .map(|(level, avg)| (level.as_str(), *avg))
        .collect();

    println!(
        "{:<10}{:>7}{:>11}{:>11}  books",
        "level", "books", "coverage", "avg diff"
    );
    for (level, level_result) in &result.levels {
        println!(
            "{:<10}{:>7}{:>10.1}%{:>11.2}  {}",
            level,
            level_result.selected_books.len(),
            level_result.coverage * 100.0,
            difficulty.get(level.as_str()).copied().unwrap_or(0.0),
            level_result.selected_books.join(", "),
        );
    }
    println!(
        "\n{} books selected across {} levels",
        result.summary.total_books,
        result.levels.len()
    );
}

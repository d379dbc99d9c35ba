//! End-to-end tests that run the compiled `readpath` binary against the
//! checked-in corpus fixtures, mirroring the teacher's own
//! `centotype-bin` end-to-end test style (exercise the whole wired-up
//! binary, not just individual crates).

use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("corpus")
        .join("fixtures")
        .join(name)
}

fn readpath() -> Command {
    Command::new(env!("CARGO_BIN_EXE_readpath"))
}

#[test]
fn generate_standard_path_as_json_includes_every_cefr_level() {
    let output = readpath()
        .arg("--corpus")
        .arg(fixture("sample_corpus.json"))
        .arg("--word-levels")
        .arg(fixture("sample_word_levels.json"))
        .arg("--format")
        .arg("json")
        .arg("generate")
        .arg("--strategy")
        .arg("standard")
        .output()
        .expect("failed to run readpath binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let levels = parsed["levels"].as_object().unwrap();
    for level in ["A1", "A2", "B1", "B2", "C1"] {
        assert!(levels.contains_key(level), "missing level {level} in output");
    }
}

#[test]
fn alternatives_accepts_strategy_synonyms() {
    let output = readpath()
        .arg("--corpus")
        .arg(fixture("sample_corpus.json"))
        .arg("--word-levels")
        .arg(fixture("sample_word_levels.json"))
        .arg("--format")
        .arg("json")
        .arg("alternatives")
        .arg("--strategies")
        .arg("balanced,aggressive")
        .output()
        .expect("failed to run readpath binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let results = parsed.as_object().unwrap();
    assert!(results.contains_key("standard"));
    assert!(results.contains_key("fast"));
}

#[test]
fn evaluate_unknown_book_fails_with_nonzero_exit() {
    let output = readpath()
        .arg("--corpus")
        .arg(fixture("sample_corpus.json"))
        .arg("--word-levels")
        .arg(fixture("sample_word_levels.json"))
        .arg("evaluate")
        .arg("no-such-book")
        .arg("A1")
        .output()
        .expect("failed to run readpath binary");

    assert!(!output.status.success());
}

#[test]
fn stats_table_lists_every_level() {
    let output = readpath()
        .arg("--corpus")
        .arg(fixture("sample_corpus.json"))
        .arg("--word-levels")
        .arg(fixture("sample_word_levels.json"))
        .arg("stats")
        .output()
        .expect("failed to run readpath binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    for level in ["A1", "A2", "B1", "B2", "C1"] {
        assert!(stdout.contains(level), "missing level {level} in stats output");
    }
}

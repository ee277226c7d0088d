//! Integration tests for the precis CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn precis() -> Command {
    Command::cargo_bin("precis").unwrap()
}

#[test]
fn test_prepare_text_output() {
    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Language: en"))
        .stdout(predicate::str::contains("Chunks: 1 (fixed-window, size 1200, overlap 200)"))
        .stdout(predicate::str::contains("--- Chunk 1 "))
        .stdout(predicate::str::contains("The lighthouse stood at the edge"))
        .stdout(predicate::str::contains("Coastal Lights").not())
        .stdout(predicate::str::contains("[1]").not())
        .stdout(predicate::str::contains("Page 2").not())
        .stdout(predicate::str::contains("1987").not());
}

#[test]
fn test_prepare_small_chunks() {
    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("--chunk-size")
        .arg("50")
        .arg("--overlap")
        .arg("10");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("size 50, overlap 10"))
        .stdout(predicate::str::contains("--- Chunk 4 (50 words, 10 overlapping) ---"));
}

#[test]
fn test_prepare_negative_overlap_is_clamped() {
    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("--chunk-size")
        .arg("60")
        .arg("--overlap")
        .arg("-5");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("size 60, overlap 0"))
        .stderr(predicate::str::contains("negative overlap -5 clamped to 0"));
}

#[test]
fn test_prepare_sentence_strategy_json() {
    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("-f")
        .arg("json")
        .arg("--chunk-size")
        .arg("80")
        .arg("--overlap")
        .arg("0")
        .arg("--strategy")
        .arg("sentences");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let document = &value[0]["document"];

    assert_eq!(value[0]["source"], fixture_path("sample-book.txt"));
    assert_eq!(document["language"], "en");
    assert_eq!(document["policy"]["strategy"], "sentence-packing");
    for chunk in document["chunks"].as_array().unwrap() {
        assert!(chunk["word_count"].as_u64().unwrap() <= 80);
        let text = chunk["text"].as_str().unwrap();
        assert!(text.ends_with('.'), "chunk does not end a sentence: {text}");
    }
}

#[test]
fn test_prepare_markdown_output() {
    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("--format")
        .arg("markdown");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("# tests/fixtures/sample-book.txt"))
        .stdout(predicate::str::contains("## Chunk 1"))
        .stdout(predicate::str::contains("*Total files: 1*"));
}

#[test]
fn test_keep_flags_disable_cleaning() {
    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("--keep-references")
        .arg("--keep-citations")
        .arg("--keep-footnotes")
        .arg("--keep-page-numbers");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Coastal Lights"))
        .stdout(predicate::str::contains("[1]"))
        .stdout(predicate::str::contains("Page 2"));
}

#[test]
fn test_prepare_rejects_short_input() {
    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("short-note.txt"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Processing error"))
        .stderr(predicate::str::contains("short-note.txt"))
        .stderr(predicate::str::contains("input too short"));
}

#[test]
fn test_summarize_rejects_short_input() {
    let mut cmd = precis();
    cmd.arg("summarize")
        .arg("-i")
        .arg(fixture_path("short-note.txt"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Processing error"))
        .stderr(predicate::str::contains("input too short"));
}

#[test]
fn test_zero_chunk_size_fails() {
    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("--chunk-size")
        .arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("chunk size must be greater than 0"));
}

#[test]
fn test_summarize_short_level() {
    let mut cmd = precis();
    cmd.arg("summarize")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("--level")
        .arg("short")
        .arg("--chunk-size")
        .arg("60")
        .arg("--overlap")
        .arg("10");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Summary (short, "))
        .stdout(predicate::str::contains("Keywords: "))
        .stdout(predicate::str::contains("Chunks summarized: 4"));
}

#[test]
fn test_summarize_json_report() {
    let mut cmd = precis();
    cmd.arg("summarize")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("-f")
        .arg("json")
        .arg("--lead-sentences")
        .arg("1");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let report = &value[0]["report"];

    assert_eq!(report["summary"]["level"], "medium");
    assert_eq!(report["chunk_summaries"].as_array().unwrap().len(), 1);
    assert!(report["summary"]["word_count"].as_u64().unwrap() <= 150);
    assert!(report["processing_time_secs"].is_number());
}

#[test]
fn test_summarize_unknown_level() {
    let mut cmd = precis();
    cmd.arg("summarize")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("--level")
        .arg("tiny");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown summary level"));
}

#[test]
fn test_stats_accepts_short_input() {
    let mut cmd = precis();
    cmd.arg("stats").arg("-i").arg(fixture_path("short-note.txt"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Words: 16 | Characters: 78 | Sentences: 2 | Avg sentence length: 8 | Read time: 0.08 min",
        ));
}

#[test]
fn test_glob_pattern() {
    let mut cmd = precis();
    cmd.arg("stats")
        .arg("-i")
        .arg(fixture_path("*.txt"))
        .arg("-f")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let sources: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["source"].as_str().unwrap())
        .collect();

    assert_eq!(
        sources,
        vec![
            fixture_path("sample-book.txt"),
            fixture_path("short-note.txt")
        ]
    );
}

#[test]
fn test_invalid_file() {
    let mut cmd = precis();
    cmd.arg("prepare").arg("-i").arg("nonexistent.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let pdf = temp_dir.path().join("scan.pdf");
    fs::write(&pdf, "%PDF-1.7").unwrap();

    let mut cmd = precis();
    cmd.arg("prepare").arg("-i").arg(&pdf);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported input format"));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("prepared.txt");

    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("-o")
        .arg(&output_file);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("The lighthouse stood at the edge"));
}

#[test]
fn test_generate_config_and_use_it() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("precis.toml");

    let mut cmd = precis();
    cmd.arg("generate-config").arg("-o").arg(&config_file);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration written to"));

    let content = fs::read_to_string(&config_file).unwrap();
    assert!(content.contains("chunk_size = 1200"));
    fs::write(
        &config_file,
        content
            .replace("chunk_size = 1200", "chunk_size = 70")
            .replace("overlap = 200", "overlap = 7"),
    )
    .unwrap();

    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("--config")
        .arg(&config_file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("size 70, overlap 7"))
        .stdout(predicate::str::contains("--- Chunk 3 "));
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("broken.toml");
    fs::write(&config_file, "[pipeline]\nchunk_size = \"many\"\n").unwrap();

    let mut cmd = precis();
    cmd.arg("prepare")
        .arg("-i")
        .arg(fixture_path("sample-book.txt"))
        .arg("-c")
        .arg(&config_file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_custom_rules_file() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("rules.toml");
    fs::write(
        &rules_file,
        "[metadata]\ncode = \"xx\"\nname = \"Bangs only\"\n\n[terminators]\nchars = [\"!\"]\n",
    )
    .unwrap();

    let mut cmd = precis();
    cmd.arg("stats")
        .arg("-i")
        .arg(fixture_path("short-note.txt"))
        .arg("--rules")
        .arg(&rules_file);

    // Without "." as a terminator the note is a single sentence
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sentences: 1 |"));
}

#[test]
fn test_invalid_rules_file() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("rules.toml");
    fs::write(&rules_file, "[metadata]\ncode = \"xx\"\n").unwrap();

    let mut cmd = precis();
    cmd.arg("stats")
        .arg("-i")
        .arg(fixture_path("short-note.txt"))
        .arg("--rules")
        .arg(&rules_file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("segmentation rules error"));
}

#[test]
fn test_help_command() {
    let mut cmd = precis();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("prepare"))
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("generate-config"));
}

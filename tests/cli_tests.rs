// Tests for the command-line interface
// Argument parsing, list files, and end-to-end runs against report files

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use filesum::cli::{self, Cli};
use filesum::encoding::OutputEncoding;
use filesum::hash::{HashAlgorithm, HashEngine, HashError, TextEncoding};

const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Parse a full argument vector, panicking on parse errors
fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_algorithm_is_required() {
    let result = Cli::try_parse_from(["filesum", "file.txt"]);

    match result {
        Err(err) => assert!(err.to_string().contains("--algorithm")),
        Ok(_) => panic!("Expected a missing-argument error"),
    }
}

#[test]
fn test_unknown_algorithm_is_rejected_at_parse_time() {
    let result = Cli::try_parse_from(["filesum", "-a", "crc32", "file.txt"]);

    match result {
        Err(err) => assert!(err.to_string().contains("Unsupported digest algorithm")),
        Ok(_) => panic!("Expected an invalid-value error"),
    }
}

#[test]
fn test_parse_defaults() {
    let cli = parse(&["filesum", "-a", "sha256", "file.txt"]);

    assert_eq!(cli.algorithm, Some(HashAlgorithm::Sha256));
    assert_eq!(cli.encoding, OutputEncoding::Hex);
    assert_eq!(cli.text_encoding, TextEncoding::Utf8);
    assert!(!cli.compare);
    assert!(!cli.json);
    assert!(!cli.progress);
    assert!(!cli.append);
    assert_eq!(cli.files, vec![PathBuf::from("file.txt")]);
}

#[test]
fn test_parse_encoding_tokens() {
    let cli = parse(&["filesum", "-a", "sha256", "-e", "bubbab", "file.txt"]);
    assert_eq!(cli.encoding, OutputEncoding::BubbleBabble);

    let cli = parse(&["filesum", "-a", "sha256", "--encoding", "hexcaps", "file.txt"]);
    assert_eq!(cli.encoding, OutputEncoding::HexUpper);

    // Identifiers are case-insensitive
    let cli = parse(&["filesum", "-a", "SHA256", "-e", "BASE64", "file.txt"]);
    assert_eq!(cli.algorithm, Some(HashAlgorithm::Sha256));
    assert_eq!(cli.encoding, OutputEncoding::Base64);
}

#[test]
fn test_append_requires_out() {
    let result = Cli::try_parse_from(["filesum", "-a", "sha256", "--append", "file.txt"]);

    match result {
        Err(_) => {}
        Ok(_) => panic!("Expected --append without --out to be rejected"),
    }
}

#[test]
fn test_text_conflicts_with_file_inputs() {
    // --text and --compare are mutually exclusive
    let result = Cli::try_parse_from(["filesum", "-a", "md5", "--text", "abc", "--compare"]);
    match result {
        Err(_) => {}
        Ok(_) => panic!("Expected --text with --compare to be rejected"),
    }

    // So are --text and positional files
    let result = Cli::try_parse_from(["filesum", "-a", "md5", "--text", "abc", "file.txt"]);
    match result {
        Err(_) => {}
        Ok(_) => panic!("Expected --text with file paths to be rejected"),
    }
}

#[test]
fn test_list_needs_no_algorithm() {
    let cli = parse(&["filesum", "--list"]);

    assert!(cli.list);
    assert_eq!(cli.algorithm, None);
}

#[test]
fn test_run_list_succeeds() {
    let cli = parse(&["filesum", "--list"]);
    cli::run(cli).unwrap();
}

#[test]
fn test_run_list_honors_out_file() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("algorithms.txt");

    let cli = parse(&["filesum", "--list", "--out", report.to_str().unwrap()]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    assert!(content.starts_with("Supported algorithms:"));
    assert!(content.contains("sha256"));

    // The JSON listing goes to the same destination
    let report = dir.path().join("algorithms.json");
    let cli = parse(&["filesum", "--list", "--json", "--out", report.to_str().unwrap()]);
    cli::run(cli).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 8);
}

#[test]
fn test_stdin_marker_is_an_ordinary_positional() {
    let cli = parse(&["filesum", "-a", "sha256", "-"]);
    assert_eq!(cli.files, vec![PathBuf::from("-")]);
}

#[test]
fn test_read_path_list_skips_blanks_and_comments() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("inputs.txt");
    fs::write(
        &list,
        "first.bin\n\n# a comment\n   # an indented comment\n  second.bin  \nthird.bin\n",
    )
    .unwrap();

    let paths = cli::read_path_list(&list).unwrap();

    assert_eq!(
        paths,
        vec![
            PathBuf::from("first.bin"),
            PathBuf::from("second.bin"),
            PathBuf::from("third.bin"),
        ]
    );
}

#[test]
fn test_read_path_list_missing_file() {
    let result = cli::read_path_list(Path::new("no_such_list.txt"));

    match result {
        Err(HashError::FileAccess { .. }) => {}
        _ => panic!("Expected FileAccess error"),
    }
}

#[test]
fn test_run_hash_writes_digest_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let report = dir.path().join("report.txt");
    fs::write(&input, "hello world").unwrap();

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--out",
        report.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    assert_eq!(content, format!("{}  {}\n", HELLO_SHA256, input.display()));
}

#[test]
fn test_run_hash_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    let report = dir.path().join("report.txt");
    fs::write(&first, "hello world").unwrap();
    fs::write(&second, "").unwrap();

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--out",
        report.to_str().unwrap(),
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(HELLO_SHA256));
    assert!(lines[1].starts_with(EMPTY_SHA256));
}

#[test]
fn test_run_compare_match_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.bin");
    let second = dir.path().join("b.bin");
    let report = dir.path().join("report.txt");
    fs::write(&first, "identical").unwrap();
    fs::write(&second, "identical").unwrap();

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--compare",
        "--out",
        report.to_str().unwrap(),
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    assert_eq!(content, "MATCH: 2 files compared with SHA-256\n");
}

#[test]
fn test_run_compare_mismatch_verdict_is_still_success() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.bin");
    let second = dir.path().join("b.bin");
    let report = dir.path().join("report.txt");
    fs::write(&first, "identical").unwrap();
    fs::write(&second, "not identical").unwrap();

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--compare",
        "--out",
        report.to_str().unwrap(),
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ]);

    // A mismatch is a reported verdict, not a failed run
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    assert_eq!(content, "MISMATCH: 2 files compared with SHA-256\n");
}

#[test]
fn test_run_compare_rejects_single_input() {
    let dir = tempfile::tempdir().unwrap();
    let only = dir.path().join("only.bin");
    fs::write(&only, "alone").unwrap();

    let cli = parse(&["filesum", "-a", "sha256", "--compare", only.to_str().unwrap()]);
    let result = cli::run(cli);

    match result {
        Err(err) => match err.downcast_ref::<HashError>() {
            Some(HashError::InsufficientInputs { supplied: 1 }) => {}
            _ => panic!("Expected InsufficientInputs for a single file"),
        },
        Ok(_) => panic!("Expected comparison of one file to fail"),
    }
}

#[test]
fn test_run_json_digest_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let report = dir.path().join("report.json");
    fs::write(&input, "hello world").unwrap();

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--json",
        "--out",
        report.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["algorithm"], "SHA-256");
    assert_eq!(entries[0]["encoding"], "hex");
    assert_eq!(entries[0]["digest"], HELLO_SHA256);
    assert_eq!(entries[0]["path"], input.to_str().unwrap());
}

#[test]
fn test_run_json_compare_report() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.bin");
    let second = dir.path().join("b.bin");
    let report = dir.path().join("report.json");
    fs::write(&first, "identical").unwrap();
    fs::write(&second, "identical").unwrap();

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--compare",
        "--json",
        "--out",
        report.to_str().unwrap(),
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(parsed["algorithm"], "SHA-256");
    assert_eq!(parsed["identical"], true);
    assert_eq!(parsed["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_run_append_accumulates_reports() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let report = dir.path().join("report.txt");
    fs::write(&input, "hello world").unwrap();

    // First run truncates, second run appends
    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--out",
        report.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let cli = parse(&[
        "filesum",
        "-a",
        "md5",
        "--out",
        report.to_str().unwrap(),
        "--append",
        input.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(HELLO_SHA256));
}

#[test]
fn test_run_list_file_entries_follow_positionals() {
    let dir = tempfile::tempdir().unwrap();
    let positional = dir.path().join("positional.txt");
    let listed = dir.path().join("listed.txt");
    let list = dir.path().join("inputs.txt");
    let report = dir.path().join("report.txt");
    fs::write(&positional, "hello world").unwrap();
    fs::write(&listed, "").unwrap();
    fs::write(&list, format!("{}\n", listed.display())).unwrap();

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--in",
        list.to_str().unwrap(),
        "--out",
        report.to_str().unwrap(),
        positional.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(HELLO_SHA256));
    assert!(lines[1].starts_with(EMPTY_SHA256));
}

#[test]
fn test_run_without_inputs_fails() {
    let cli = parse(&["filesum", "-a", "sha256"]);
    let result = cli::run(cli);

    match result {
        Err(err) => assert!(err.to_string().contains("no input files")),
        Ok(_) => panic!("Expected a run without inputs to fail"),
    }
}

#[test]
fn test_run_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.txt");

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--out",
        report.to_str().unwrap(),
        "no_such_input.bin",
    ]);
    let result = cli::run(cli);

    match result {
        Err(err) => match err.downcast_ref::<HashError>() {
            Some(HashError::FileAccess { .. }) => {}
            _ => panic!("Expected FileAccess for a missing input"),
        },
        Ok(_) => panic!("Expected a missing input file to fail"),
    }
}

#[test]
fn test_run_text_writes_digest_alone() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.txt");

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--text",
        "hello world",
        "--out",
        report.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    // Text mode has no path, so the line is the digest by itself
    let content = fs::read_to_string(&report).unwrap();
    assert_eq!(content, format!("{}\n", HELLO_SHA256));
}

#[test]
fn test_run_text_honors_text_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.txt");

    let cli = parse(&[
        "filesum",
        "-a",
        "sha256",
        "--text",
        "abc",
        "--text-encoding",
        "utf16le",
        "--out",
        report.to_str().unwrap(),
    ]);
    cli::run(cli).unwrap();

    let content = fs::read_to_string(&report).unwrap();
    let expected = HashEngine::new()
        .hash_text(HashAlgorithm::Sha256, "abc", TextEncoding::Utf16Le, OutputEncoding::Hex)
        .unwrap();
    assert_eq!(content, format!("{}\n", expected));
}

// Command-line interface
// Argument parsing, input collection and report output

mod reporter;

pub use reporter::ConsoleReporter;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use log::debug;
use serde::Serialize;

use crate::encoding::OutputEncoding;
use crate::hash::{HashAlgorithm, HashEngine, HashError, Outcome, TextEncoding};

/// Command-line options
#[derive(Parser, Debug)]
#[command(name = "filesum", version, about = "Compute and compare file and text digests")]
pub struct Cli {
    /// Digest algorithm (see --list for the supported set)
    #[arg(short, long, value_parser = parse_algorithm, required_unless_present = "list")]
    pub algorithm: Option<HashAlgorithm>,

    /// Digest output encoding: hex, hexcaps, base64 or bubbab
    #[arg(short, long, value_parser = parse_output_encoding, default_value = "hex")]
    pub encoding: OutputEncoding,

    /// Compare all inputs for identical content instead of printing digests
    #[arg(short, long)]
    pub compare: bool,

    /// Hash a literal text string instead of files
    #[arg(short, long, conflicts_with_all = ["compare", "files", "input_list"])]
    pub text: Option<String>,

    /// Character encoding applied to --text before hashing
    #[arg(long, value_parser = parse_text_encoding, default_value = "utf8")]
    pub text_encoding: TextEncoding,

    /// Read additional file paths from a list file (one per line, '#' comments)
    #[arg(long = "in", value_name = "LISTFILE")]
    pub input_list: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Append to the --out file instead of truncating it
    #[arg(long, requires = "out")]
    pub append: bool,

    /// Show a progress bar while hashing (interactive terminals only)
    #[arg(long)]
    pub progress: bool,

    /// Emit machine-readable JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    /// List the supported algorithms and exit
    #[arg(long)]
    pub list: bool,

    /// Files to process ('-' reads from stdin)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

fn parse_algorithm(value: &str) -> Result<HashAlgorithm, String> {
    HashAlgorithm::from_token(value).map_err(|e| e.to_string())
}

fn parse_output_encoding(value: &str) -> Result<OutputEncoding, String> {
    OutputEncoding::from_token(value)
        .ok_or_else(|| format!("unknown encoding '{}' (expected hex, hexcaps, base64 or bubbab)", value))
}

fn parse_text_encoding(value: &str) -> Result<TextEncoding, String> {
    TextEncoding::from_token(value)
        .ok_or_else(|| format!("unknown text encoding '{}' (expected utf8, utf16le or utf16be)", value))
}

/// One computed digest, as written to the report
#[derive(Debug, Clone, Serialize)]
pub struct DigestEntry {
    pub algorithm: String,
    pub encoding: String,
    pub digest: String,
    pub path: PathBuf,
}

/// Result of a comparison run
#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub algorithm: String,
    pub identical: bool,
    pub files: Vec<PathBuf>,
}

/// Execute the parsed command line
///
/// Both comparison verdicts count as success; the caller maps errors to the
/// process exit code.
pub fn run(cli: Cli) -> Result<()> {
    let mut writer = open_report_writer(cli.out.as_deref(), cli.append)?;

    if cli.list {
        print_algorithms(cli.json, writer.as_mut())?;
        writer.flush().context("failed to write report")?;
        return Ok(());
    }

    let algorithm = match cli.algorithm {
        Some(algorithm) => algorithm,
        None => bail!("--algorithm is required unless --list is given"),
    };

    let engine = HashEngine::new();

    if let Some(text) = cli.text.clone() {
        run_text(&cli, &engine, algorithm, &text, writer.as_mut())?;
    } else {
        let files = collect_files(&cli.files, cli.input_list.as_deref())?;
        if files.is_empty() {
            bail!("no input files given (pass file paths, '-' for stdin, or --text)");
        }

        if cli.compare {
            run_compare(&cli, &engine, algorithm, files, writer.as_mut())?;
        } else {
            run_hash(&cli, &engine, algorithm, &files, writer.as_mut())?;
        }
    }

    writer.flush().context("failed to write report")?;
    Ok(())
}

/// Read a list file: one path per line, blank lines and '#' comments skipped
pub fn read_path_list(path: &Path) -> Result<Vec<PathBuf>, HashError> {
    let content = fs::read_to_string(path)
        .map_err(|e| HashError::from_io_error(e, "reading list file", Some(path.to_path_buf())))?;

    let mut paths = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        paths.push(PathBuf::from(line));
    }

    debug!("read {} paths from list file {}", paths.len(), path.display());
    Ok(paths)
}

/// Merge positional paths with entries from the --in list file
fn collect_files(cli_files: &[PathBuf], list: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut files = cli_files.to_vec();

    if let Some(path) = list {
        files.extend(read_path_list(path)?);
    }

    Ok(files)
}

/// Open the report destination: stdout, a fresh file, or an appended file
fn open_report_writer(out: Option<&Path>, append: bool) -> Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            let file = if append {
                fs::OpenOptions::new().create(true).append(true).open(path)
            } else {
                File::create(path)
            }
            .map_err(|e| {
                HashError::from_io_error(e, "opening output file", Some(path.to_path_buf()))
            })?;

            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

fn run_text(
    cli: &Cli,
    engine: &HashEngine,
    algorithm: HashAlgorithm,
    text: &str,
    writer: &mut dyn Write,
) -> Result<()> {
    let digest = engine.hash_text(algorithm, text, cli.text_encoding, cli.encoding)?;

    if cli.json {
        let entry = DigestEntry {
            algorithm: algorithm.display_name().to_string(),
            encoding: cli.encoding.token().to_string(),
            digest,
            path: PathBuf::from("<text>"),
        };
        write_json(writer, &[entry])?;
    } else {
        writeln!(writer, "{}", digest).context("failed to write report")?;
    }

    Ok(())
}

fn run_hash(
    cli: &Cli,
    engine: &HashEngine,
    algorithm: HashAlgorithm,
    files: &[PathBuf],
    writer: &mut dyn Write,
) -> Result<()> {
    let mut entries = Vec::with_capacity(files.len());

    for path in files {
        let digest = if path.as_os_str() == "-" {
            engine.hash_reader(algorithm, &mut io::stdin().lock(), cli.encoding)?
        } else if cli.progress {
            hash_with_console_progress(engine, algorithm, path, cli.encoding)?
        } else {
            engine.hash_file(algorithm, path, cli.encoding)?
        };

        entries.push(DigestEntry {
            algorithm: algorithm.display_name().to_string(),
            encoding: cli.encoding.token().to_string(),
            digest,
            path: path.clone(),
        });
    }

    if cli.json {
        write_json(writer, &entries)?;
    } else {
        for entry in &entries {
            writeln!(writer, "{}  {}", entry.digest, entry.path.display())
                .context("failed to write report")?;
        }
    }

    Ok(())
}

fn run_compare(
    cli: &Cli,
    engine: &HashEngine,
    algorithm: HashAlgorithm,
    files: Vec<PathBuf>,
    writer: &mut dyn Write,
) -> Result<()> {
    if files.len() < 2 {
        return Err(HashError::InsufficientInputs { supplied: files.len() }.into());
    }

    let identical = if cli.progress {
        compare_with_console_progress(engine, algorithm, &files)?
    } else {
        engine.compare_files(algorithm, &files)?
    };

    if cli.json {
        let report = CompareReport {
            algorithm: algorithm.display_name().to_string(),
            identical,
            files,
        };
        write_json(writer, &report)?;
    } else {
        let verdict = if identical { "MATCH" } else { "MISMATCH" };
        if cli.out.is_some() {
            writeln!(writer, "{}: {} files compared with {}", verdict, files.len(), algorithm)
                .context("failed to write report")?;
        } else {
            let styled = if identical { verdict.green().bold() } else { verdict.red().bold() };
            writeln!(writer, "{}: {} files compared with {}", styled, files.len(), algorithm)
                .context("failed to write report")?;
        }
    }

    Ok(())
}

fn print_algorithms(json: bool, writer: &mut dyn Write) -> Result<()> {
    let algorithms = HashAlgorithm::list();

    if json {
        write_json(writer, &algorithms)?;
    } else {
        writeln!(writer, "Supported algorithms:").context("failed to write report")?;
        for info in algorithms {
            writeln!(writer, "  {:<12} {:>4} bits   token: {}", info.name, info.output_bits, info.token)
                .context("failed to write report")?;
        }
    }

    Ok(())
}

fn hash_with_console_progress(
    engine: &HashEngine,
    algorithm: HashAlgorithm,
    path: &Path,
    encoding: OutputEncoding,
) -> Result<String> {
    let reporter = match ConsoleReporter::new(&format!("Hashing {}", path.display())) {
        Some(reporter) => reporter,
        None => return Ok(engine.hash_file(algorithm, path, encoding)?),
    };

    let outcome = engine.hash_file_with_reporter(algorithm, path, encoding, &reporter);
    reporter.finish();

    match outcome? {
        Outcome::Completed(digest) => Ok(digest),
        Outcome::Cancelled => unreachable!("console reporter never requests cancellation"),
    }
}

fn compare_with_console_progress(
    engine: &HashEngine,
    algorithm: HashAlgorithm,
    files: &[PathBuf],
) -> Result<bool> {
    let reporter = match ConsoleReporter::new(&format!("Comparing {} files", files.len())) {
        Some(reporter) => reporter,
        None => return Ok(engine.compare_files(algorithm, files)?),
    };

    let outcome = engine.compare_files_with_reporter(algorithm, files, &reporter);
    reporter.finish();

    match outcome? {
        Outcome::Completed(identical) => Ok(identical),
        Outcome::Cancelled => unreachable!("console reporter never requests cancellation"),
    }
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).context("failed to encode JSON report")?;
    writeln!(writer).context("failed to write report")?;
    Ok(())
}

// Tests live in tests/cli_tests.rs

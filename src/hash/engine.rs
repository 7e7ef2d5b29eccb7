// Hash engine
// Streams files, text, and readers through a digest with progress and cancellation

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use super::algorithm::HashAlgorithm;
use super::error::HashError;
use super::progress::{NullReporter, ProgressReporter};
use super::text::TextEncoding;
use crate::encoding::OutputEncoding;

/// Terminal state of a cancellable operation
///
/// Cancellation is a normal outcome, not an error; the error channel stays
/// reserved for real failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation ran to completion
    Completed(T),
    /// The reporter requested cancellation before the operation finished
    Cancelled,
}

/// Hash engine with streaming I/O
///
/// Synchronous and blocking. Each operation owns its hasher and file handle;
/// nothing is shared between calls.
pub struct HashEngine {
    chunk_size: usize,
}

impl HashEngine {
    /// Create a new HashEngine with the default chunk size (1MB)
    pub fn new() -> Self {
        Self {
            chunk_size: 1024 * 1024,
        }
    }

    /// Create a new HashEngine with a custom chunk size (zero is clamped to one)
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Compute a file digest and return it in the requested encoding
    pub fn hash_file(
        &self,
        algorithm: HashAlgorithm,
        path: &Path,
        encoding: OutputEncoding,
    ) -> Result<String, HashError> {
        match self.hash_file_with_reporter(algorithm, path, encoding, &NullReporter)? {
            Outcome::Completed(digest) => Ok(digest),
            Outcome::Cancelled => unreachable!("NullReporter never requests cancellation"),
        }
    }

    /// Compute a file digest with progress reporting and cancellation
    ///
    /// The file is streamed in fixed-size chunks. After each chunk the
    /// reporter receives the percentage of bytes consumed; before each read
    /// the cancellation flag is polled. On cancellation all partial state is
    /// discarded and `Outcome::Cancelled` is returned.
    pub fn hash_file_with_reporter(
        &self,
        algorithm: HashAlgorithm,
        path: &Path,
        encoding: OutputEncoding,
        reporter: &dyn ProgressReporter,
    ) -> Result<Outcome<String>, HashError> {
        match self.digest_file(algorithm, path, reporter, true)? {
            Outcome::Completed(digest) => Ok(Outcome::Completed(encoding.encode(&digest))),
            Outcome::Cancelled => Ok(Outcome::Cancelled),
        }
    }

    /// Compute the digest of a text string
    ///
    /// The string is converted to bytes with the given text encoding first;
    /// an empty string hashes zero bytes.
    pub fn hash_text(
        &self,
        algorithm: HashAlgorithm,
        text: &str,
        text_encoding: TextEncoding,
        output: OutputEncoding,
    ) -> Result<String, HashError> {
        let mut hasher = algorithm.hasher();
        hasher.update(&text_encoding.encode_str(text));
        Ok(output.encode(&hasher.finalize()))
    }

    /// Compute the digest of an arbitrary reader (stdin, pipes)
    ///
    /// The total size is unknown here, so no percentage is reported.
    pub fn hash_reader<R: Read>(
        &self,
        algorithm: HashAlgorithm,
        reader: &mut R,
        encoding: OutputEncoding,
    ) -> Result<String, HashError> {
        let mut hasher = algorithm.hasher();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| HashError::from_io_error(e, "reading input stream", None))?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(encoding.encode(&hasher.finalize()))
    }

    /// Check whether all files have identical content
    pub fn compare_files(
        &self,
        algorithm: HashAlgorithm,
        paths: &[PathBuf],
    ) -> Result<bool, HashError> {
        match self.compare_files_with_reporter(algorithm, paths, &NullReporter)? {
            Outcome::Completed(identical) => Ok(identical),
            Outcome::Cancelled => unreachable!("NullReporter never requests cancellation"),
        }
    }

    /// Check whether all files have identical content, with progress
    ///
    /// Fewer than two paths is a definite "not identical" and touches no
    /// files. Otherwise the first file's digest becomes the reference and the
    /// remaining files are hashed sequentially in input order; the first
    /// mismatch ends the comparison and later files are never read. Raw
    /// digest bytes are compared, never their encoded forms. Progress counts
    /// fully processed files; any unreadable file fails the whole comparison.
    pub fn compare_files_with_reporter(
        &self,
        algorithm: HashAlgorithm,
        paths: &[PathBuf],
        reporter: &dyn ProgressReporter,
    ) -> Result<Outcome<bool>, HashError> {
        if paths.len() < 2 {
            return Ok(Outcome::Completed(false));
        }

        let total = paths.len();

        let reference = match self.digest_file(algorithm, &paths[0], reporter, false)? {
            Outcome::Completed(digest) => digest,
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
        };
        reporter.report_percent((100 / total) as u8);

        for (index, path) in paths.iter().enumerate().skip(1) {
            let digest = match self.digest_file(algorithm, path, reporter, false)? {
                Outcome::Completed(digest) => digest,
                Outcome::Cancelled => return Ok(Outcome::Cancelled),
            };
            reporter.report_percent(((index + 1) * 100 / total) as u8);

            if digest != reference {
                debug!("digest mismatch at {}, remaining files skipped", path.display());
                return Ok(Outcome::Completed(false));
            }
        }

        Ok(Outcome::Completed(true))
    }

    /// Stream one file through a fresh hasher and return the raw digest
    fn digest_file(
        &self,
        algorithm: HashAlgorithm,
        path: &Path,
        reporter: &dyn ProgressReporter,
        report_percent: bool,
    ) -> Result<Outcome<Vec<u8>>, HashError> {
        let mut hasher = algorithm.hasher();

        let mut file = File::open(path)
            .map_err(|e| HashError::from_io_error(e, "opening", Some(path.to_path_buf())))?;

        let total_bytes = file
            .metadata()
            .map_err(|e| {
                HashError::from_io_error(e, "reading metadata for", Some(path.to_path_buf()))
            })?
            .len();

        let mut buffer = vec![0u8; self.chunk_size];
        let mut bytes_processed = 0u64;
        let mut last_percent = 0u8;

        loop {
            if reporter.is_cancelled() {
                debug!("hashing {} cancelled after {} bytes", path.display(), bytes_processed);
                return Ok(Outcome::Cancelled);
            }

            let bytes_read = file
                .read(&mut buffer)
                .map_err(|e| HashError::from_io_error(e, "reading", Some(path.to_path_buf())))?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
            bytes_processed += bytes_read as u64;

            if report_percent && total_bytes > 0 {
                let percent = (bytes_processed * 100 / total_bytes).min(100) as u8;
                if percent > last_percent {
                    reporter.report_percent(percent);
                    last_percent = percent;
                }
            }
        }

        // Natural completion always lands on exactly 100, empty files included
        if report_percent && last_percent < 100 {
            reporter.report_percent(100);
        }

        Ok(Outcome::Completed(hasher.finalize()))
    }
}

impl Default for HashEngine {
    fn default() -> Self {
        Self::new()
    }
}

// Tests live in tests/engine_tests.rs and tests/compare_tests.rs

use crate::analysis::backend::AnalysisBackend;
use crate::analysis::prompts;
use crate::config::AnalysisConfig;
use crate::errors::CoreError;
use crate::models::{FileOutcome, ScanSummary};
use crate::reader;
use crate::report::Reporter;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// List regular files directly under `dir`, sorted by path.
///
/// Symlinks are followed: a link to a file is listed, a link to a directory
/// or a dangling link is not. Subdirectories are never descended into.
pub fn list_regular_files<O: Write, E: Write>(
    dir: &Path,
    reporter: &mut Reporter<O, E>,
) -> Result<Vec<PathBuf>, CoreError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| CoreError::Io(format!("reading directory {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                reporter.warn(&format!("skipping unreadable entry in {}: {e}", dir.display()));
                continue;
            }
        };
        let path = entry.path();

        // The entry type comes from the listing itself, so a directory we
        // can list but not search still yields its files
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                reporter.warn(&format!("skipping {}: {e}", path.display()));
                continue;
            }
        };

        if file_type.is_file() {
            files.push(path);
        } else if file_type.is_symlink() {
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => reporter.verbose(&format!("not a regular file: {}", path.display())),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    reporter.verbose(&format!("dangling symlink: {}", path.display()))
                }
                Err(e) => reporter.warn(&format!("skipping symlink {}: {e}", path.display())),
            }
        } else {
            reporter.verbose(&format!("not a regular file: {}", path.display()));
        }
    }

    files.sort();
    Ok(files)
}

/// Run the read → build → send → report cycle for every regular file in `dir`.
///
/// Per-file failures become outcomes; only an unreadable `dir` is an error.
pub fn scan_directory<B, O, E>(
    dir: &Path,
    analysis: &AnalysisConfig,
    backend: &B,
    reporter: &mut Reporter<O, E>,
    dry_run: bool,
) -> Result<ScanSummary, CoreError>
where
    B: AnalysisBackend + ?Sized,
    O: Write,
    E: Write,
{
    let files = list_regular_files(dir, reporter)?;
    reporter.verbose(&format!("{} files in {}", files.len(), dir.display()));

    let mut summary = ScanSummary {
        files_found: files.len(),
        outcomes: Vec::with_capacity(files.len()),
    };

    for path in &files {
        let outcome = process_file(path, analysis, backend, reporter, dry_run);
        summary.outcomes.push(outcome);
    }

    Ok(summary)
}

/// Process a single file. Always yields exactly one outcome.
pub fn process_file<B, O, E>(
    path: &Path,
    analysis: &AnalysisConfig,
    backend: &B,
    reporter: &mut Reporter<O, E>,
    dry_run: bool,
) -> FileOutcome
where
    B: AnalysisBackend + ?Sized,
    O: Write,
    E: Write,
{
    let log = match reader::read_log_file(path) {
        Ok(log) => log,
        Err(e) => {
            let outcome = FileOutcome::ReadFailed {
                path: path.to_path_buf(),
                error: e.to_string(),
            };
            reporter.report_failure(&outcome);
            return outcome;
        }
    };

    let payload = prompts::build_request(&log.content, analysis).to_payload();
    reporter.verbose(&format!(
        "{}: {} bytes read, {} byte payload",
        path.display(),
        log.content.len(),
        payload.len()
    ));

    if dry_run {
        reporter.report_skipped(path, payload.len());
        return FileOutcome::Skipped {
            path: path.to_path_buf(),
            payload_bytes: payload.len(),
        };
    }

    match backend.send(&payload) {
        Ok(body) => reporter.report_response(path, &body),
        Err(e) => {
            let outcome = FileOutcome::TransportFailed {
                path: path.to_path_buf(),
                error: e.to_string(),
            };
            reporter.report_failure(&outcome);
            outcome
        }
    }
}

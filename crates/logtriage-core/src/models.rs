use std::path::{Path, PathBuf};

// ── Pipeline types ──

/// One log file read from disk.
#[derive(Debug, Clone)]
pub struct LogFile {
    pub path: PathBuf,
    pub content: String,
}

/// Payload sent to the analysis endpoint. Built once per log file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub prompt: String,
    pub max_tokens: u32,
}

// ── Outcome types ──

/// What happened to one enumerated file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Response parsed and printed.
    Reported { path: PathBuf },
    /// File could not be read.
    ReadFailed { path: PathBuf, error: String },
    /// HTTP exchange did not complete.
    TransportFailed { path: PathBuf, error: String },
    /// Response body was not valid JSON.
    ParseFailed { path: PathBuf, error: String },
    /// Dry run: payload built, nothing sent.
    Skipped { path: PathBuf, payload_bytes: usize },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Reported { path }
            | Self::ReadFailed { path, .. }
            | Self::TransportFailed { path, .. }
            | Self::ParseFailed { path, .. }
            | Self::Skipped { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ReadFailed { .. } | Self::TransportFailed { .. } | Self::ParseFailed { .. }
        )
    }
}

impl std::fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reported { .. } => write!(f, "reported"),
            Self::ReadFailed { .. } => write!(f, "read_failed"),
            Self::TransportFailed { .. } => write!(f, "transport_failed"),
            Self::ParseFailed { .. } => write!(f, "parse_failed"),
            Self::Skipped { .. } => write!(f, "skipped"),
        }
    }
}

/// Result of a scan run.
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub files_found: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl ScanSummary {
    pub fn reported(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Reported { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(FileOutcome::is_failure)
    }

    fn count<F: Fn(&FileOutcome) -> bool>(&self, pred: F) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

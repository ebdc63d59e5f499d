//! Outcome of a substitution run.

use crate::error::SubstituteError;
use std::path::PathBuf;

/// A file that was written to the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub replacements: usize,
}

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: SubstituteError,
}

#[derive(Debug, Default)]
pub struct SubstitutionReport {
    pub files: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
}

impl SubstitutionReport {
    pub fn total_replacements(&self) -> usize {
        self.files.iter().map(|f| f.replacements).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record_failure(&mut self, path: PathBuf, error: SubstituteError) {
        self.failures.push(FileFailure { path, error });
    }
}

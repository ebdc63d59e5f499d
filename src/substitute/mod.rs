//! Placeholder substitution across a file tree.
//!
//! Every regular file under the source path is read once, has all known
//! placeholders replaced in a single pass, and is written once to the
//! destination. Per-file failures are collected rather than aborting.

pub mod engine;
pub mod format;
pub mod report;
pub mod walk;

pub use engine::Substituter;
pub use format::PlaceholderFormat;
pub use report::{FileFailure, FileOutcome, SubstitutionReport};
pub use walk::{collect_files, destination_for, OutputLayout};

use crate::error::{Result, SubstituteError};
use crate::secrets::SecretSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What to substitute and where to write it.
#[derive(Debug, Clone)]
pub struct SubstituteOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub format: PlaceholderFormat,
    pub layout: OutputLayout,
}

/// Substitute `secrets` into every file under `options.source`.
///
/// Returns `Err` only for run-level problems (missing source, destination
/// cannot be created). File-level problems land in the report.
pub fn substitute_tree(
    options: &SubstituteOptions,
    secrets: &SecretSet,
) -> Result<SubstitutionReport> {
    let files = collect_files(&options.source, Some(&options.destination))?;
    info!(
        "Found {} file(s) under {}",
        files.len(),
        options.source.display()
    );

    std::fs::create_dir_all(&options.destination)
        .map_err(|e| SubstituteError::file(&options.destination, e))?;

    let substituter = Substituter::new(secrets, options.format)?;
    let mut report = SubstitutionReport::default();
    let mut written: HashSet<PathBuf> = HashSet::new();

    for file in files {
        let target = destination_for(
            &options.source,
            &file,
            &options.destination,
            options.layout,
        );

        if !written.insert(target.clone()) {
            report.record_failure(
                file.clone(),
                SubstituteError::file(
                    &file,
                    std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        format!(
                            "another source file was already written to '{}'",
                            target.display()
                        ),
                    ),
                ),
            );
            continue;
        }

        match substitute_file(&substituter, &file, &target) {
            Ok(replacements) => {
                debug!(
                    "{} -> {} ({replacements} replacement(s))",
                    file.display(),
                    target.display()
                );
                report.files.push(FileOutcome {
                    source: file,
                    destination: target,
                    replacements,
                });
            }
            Err(e) => report.record_failure(file, e),
        }
    }

    info!(
        "Substitution complete: {} file(s) written, {} replacement(s), {} failure(s)",
        report.files.len(),
        report.total_replacements(),
        report.failures.len()
    );

    Ok(report)
}

/// Read `source`, replace placeholders, and write the result to `target`.
pub fn substitute_file(substituter: &Substituter, source: &Path, target: &Path) -> Result<usize> {
    let input = std::fs::read(source).map_err(|e| SubstituteError::file(source, e))?;
    let (output, replacements) = substituter.apply(&input);

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SubstituteError::file(parent, e))?;
    }
    std::fs::write(target, output.as_ref()).map_err(|e| SubstituteError::file(target, e))?;

    Ok(replacements)
}

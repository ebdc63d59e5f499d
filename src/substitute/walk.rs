//! Source tree enumeration and destination path mapping.

use crate::error::{Result, SubstituteError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// How source files are laid out under the destination directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLayout {
    /// Keep each file's path relative to the source root.
    #[default]
    Preserve,
    /// Keep only the file name.
    Flatten,
}

/// Recursively list the regular files under `source`, sorted by path.
///
/// Symlinks are followed, so a link to a file is listed under the link's
/// path. Unreadable entries, broken links and link loops are logged and
/// skipped. A `source` that is itself a file yields just that file. The
/// `exclude` directory (usually the destination) is never descended into.
pub fn collect_files(source: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    if !source.exists() {
        return Err(SubstituteError::Config(format!(
            "source path '{}' does not exist",
            source.display()
        )));
    }

    // Only an existing directory can hold earlier outputs.
    let exclude = exclude.and_then(|dir| dir.canonicalize().ok());

    let walker = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, exclude.as_deref()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        } else if !entry.file_type().is_dir() {
            warn!("Skipping {}: not a regular file", entry.path().display());
        }
    }

    Ok(files)
}

fn is_excluded(entry: &DirEntry, exclude: Option<&Path>) -> bool {
    let Some(exclude) = exclude else {
        return false;
    };
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let skip = entry
        .path()
        .canonicalize()
        .map(|p| p == exclude)
        .unwrap_or(false);
    if skip {
        debug!("Not descending into destination {}", entry.path().display());
    }
    skip
}

/// Compute where `file` (found under `source`) is written in `destination`.
pub fn destination_for(
    source: &Path,
    file: &Path,
    destination: &Path,
    layout: OutputLayout,
) -> PathBuf {
    match layout {
        OutputLayout::Flatten => destination.join(file_name(file)),
        OutputLayout::Preserve => match file.strip_prefix(source) {
            Ok(relative) if !relative.as_os_str().is_empty() => destination.join(relative),
            // `source` is the file itself.
            _ => destination.join(file_name(file)),
        },
    }
}

fn file_name(file: &Path) -> &Path {
    file.file_name().map(Path::new).unwrap_or(file)
}

//! Folder scanning and file reading.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, RunError};

/// Files directly inside `folder` with one of `extensions`, sorted.
///
/// Extensions may be given with or without the leading dot. Matching is
/// case-sensitive and hidden files are skipped. A folder with no matching
/// files is an error.
pub fn scan_folder(folder: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(RunError::NotADirectory(folder.to_path_buf()));
    }
    let root = folder
        .to_str()
        .ok_or_else(|| RunError::InvalidPath(folder.to_path_buf()))?;
    let root = glob::Pattern::escape(root);
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut files = BTreeSet::new();
    for ext in extensions {
        let ext = ext.trim().trim_start_matches('.');
        if ext.is_empty() {
            continue;
        }
        let pattern = format!("{root}/*.{ext}");
        let entries = match glob::glob_with(&pattern, options) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping extension {ext:?}: {e}");
                continue;
            }
        };
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry: {e}"),
            }
        }
    }

    if files.is_empty() {
        return Err(RunError::NoFiles {
            folder: folder.to_path_buf(),
            extensions: extensions.join(", "),
        });
    }
    Ok(files.into_iter().collect())
}

/// Read a text file, dropping a leading UTF-8 byte order mark.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let text = std::fs::read_to_string(path)?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// File name used to label a file in reports.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{PipelineError, Result};

/// `yyyy-mm-dd` or `yyyymmdd` at the start of a name.
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-?\d{2}-?\d{2}").expect("valid date pattern"));

/// How the frames of a sample were ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    /// Names start with a calendar date; plain name order is chronological.
    DatePrefixed,
    /// Ordered by the number formed from the digits in each name.
    Numeric,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatePrefixed => write!(f, "date prefix"),
            Self::Numeric => write!(f, "numeric"),
        }
    }
}

/// True if `path` has extension `ext` (with or without a leading dot, any case).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    let ext = ext.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Find every folder under `root` that directly holds raw frames.
///
/// Output folders are skipped. The root is excluded when any sub-folder holds
/// frames, and is the only candidate when none does. `only`, when not empty,
/// keeps just the folders with those names.
pub fn discover_samples(
    root: &Path,
    extension: &str,
    output_dir_name: &str,
    only: &[String],
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(PipelineError::MissingFolder(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(e.file_type().is_dir() && e.file_name() == output_dir_name));

    let mut folders = BTreeSet::new();
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }
        let Some(parent) = entry.path().parent() else {
            continue;
        };
        let name = folder_name(parent);
        if only.is_empty() || only.iter().any(|o| *o == name) {
            folders.insert(parent.to_path_buf());
        }
    }

    folders.remove(root);
    if folders.is_empty() {
        if !only.is_empty() {
            warn!(root = %root.display(), ?only, "No sample folder matches the allow-list");
            return Ok(Vec::new());
        }
        folders.insert(root.to_path_buf());
    }

    debug!(count = folders.len(), root = %root.display(), "Discovered sample folders");
    Ok(folders.into_iter().collect())
}

/// Base name of a folder, used as the sample name.
pub fn folder_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}

/// Raw frame file names directly inside `folder`, in name order.
pub fn list_frames(folder: &Path, extension: &str) -> Result<Vec<String>> {
    if !folder.is_dir() {
        return Err(PipelineError::MissingFolder(folder.to_path_buf()));
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, extension) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Order frame names chronologically.
///
/// If the first name (up to its first `_`) starts with a date, name order is
/// kept. Otherwise names are ordered by the number made of all their digits,
/// so `1, 2, 10, 20` does not sort as `1, 10, 2, 20`.
pub fn sort_frames(mut names: Vec<String>) -> (Vec<String>, SortMode) {
    names.sort();
    let date_prefixed = names
        .first()
        .and_then(|n| n.split('_').next())
        .is_some_and(|prefix| DATE_PREFIX.is_match(prefix));

    if date_prefixed {
        return (names, SortMode::DatePrefixed);
    }

    debug!(first = ?names.first(), "Non-date names, sorting by numeric content");
    names.sort_by_cached_key(|n| (numeric_key(n), n.clone()));
    (names, SortMode::Numeric)
}

fn numeric_key(name: &str) -> Option<u128> {
    let digits: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

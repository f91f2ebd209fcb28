use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{TIMELINE_COLUMN_NAMES, TIMELINE_EXTENSIONS};
use crate::error::{PipelineError, Result};

/// How fractional hours become integer labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    #[default]
    /// Nearest hour, ties to even.
    Nearest,
    Ceil,
}

impl Rounding {
    fn apply(self, v: f64) -> i64 {
        match self {
            Self::Nearest => v.round_ties_even() as i64,
            Self::Ceil => v.ceil() as i64,
        }
    }
}

/// Elapsed-time labels (hours) of a sample, one per frame in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub path: PathBuf,
    pub hours: Vec<i64>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<i64> {
        self.hours.get(index).copied()
    }

    /// Fail unless there is a time point for each of `frames` frames.
    pub fn check_covers(&self, frames: usize) -> Result<()> {
        if self.hours.len() < frames {
            return Err(PipelineError::TimelineTooShort {
                path: self.path.clone(),
                rows: self.hours.len(),
                frames,
            });
        }
        Ok(())
    }

    /// Widest printed label among the first `frames` entries.
    pub fn max_label_width(&self, frames: usize) -> usize {
        self.hours
            .iter()
            .take(frames)
            .map(|h| h.to_string().len())
            .max()
            .unwrap_or(0)
    }
}

/// Find the timeline file for a sample: first in the sample folder, then in
/// its parent. The stem match ignores case.
pub fn locate_timeline(sample_folder: &Path, stem: &str) -> Result<PathBuf> {
    let dirs = std::iter::once(sample_folder).chain(sample_folder.parent());
    for dir in dirs {
        let mut candidates = timeline_candidates(dir, stem)?;
        match candidates.len() {
            0 => continue,
            1 => return Ok(candidates.remove(0)),
            _ => {
                return Err(PipelineError::TimelineAmbiguous {
                    dir: dir.to_path_buf(),
                    candidates: candidates
                        .iter()
                        .filter_map(|p| p.file_name())
                        .map(|n| n.to_string_lossy().into_owned())
                        .collect(),
                });
            }
        }
    }
    Err(PipelineError::TimelineMissing {
        folder: sample_folder.to_path_buf(),
        stem: stem.to_string(),
    })
}

fn timeline_candidates(dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let stem_ok = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.eq_ignore_ascii_case(stem));
        let ext_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| TIMELINE_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)));
        if stem_ok && ext_ok {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Load a JSON, CSV or TXT timeline and round the values to whole hours.
pub fn load_timeline(path: &Path, rounding: Rounding) -> Result<Timeline> {
    let text = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let values = match ext.as_str() {
        "json" => parse_json(&text).map_err(|reason| parse_error(path, reason))?,
        _ => parse_delimited(&text).map_err(|reason| parse_error(path, reason))?,
    };

    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(parse_error(path, format!("non-finite value {bad}")));
    }

    let hours: Vec<i64> = values.into_iter().map(|v| rounding.apply(v)).collect();
    debug!(path = %path.display(), rows = hours.len(), "Loaded timeline");
    Ok(Timeline {
        path: path.to_path_buf(),
        hours,
    })
}

fn parse_error(path: &Path, reason: String) -> PipelineError {
    PipelineError::TimelineParse {
        path: path.to_path_buf(),
        reason,
    }
}

/// Shapes a JSON timeline comes in: a plain list, a list of rows, named
/// columns, or a column-oriented table with string row indices.
#[derive(Deserialize)]
#[serde(untagged)]
enum TimelineDocument {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
    Columns(BTreeMap<String, Vec<f64>>),
    IndexedColumns(BTreeMap<String, BTreeMap<String, f64>>),
}

fn parse_json(text: &str) -> std::result::Result<Vec<f64>, String> {
    let doc: TimelineDocument = serde_json::from_str(text)
        .map_err(|e| format!("unsupported JSON layout ({e})"))?;
    match doc {
        TimelineDocument::Flat(values) => Ok(values),
        TimelineDocument::Rows(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.first().copied().ok_or(format!("row {i} is empty")))
            .collect(),
        TimelineDocument::Columns(columns) => pick_column(columns),
        TimelineDocument::IndexedColumns(columns) => {
            let ordered = columns
                .into_iter()
                .map(|(name, cells)| {
                    let mut cells: Vec<(u64, f64)> = cells
                        .into_iter()
                        .map(|(k, v)| k.parse::<u64>().map(|k| (k, v)))
                        .collect::<std::result::Result<_, _>>()
                        .map_err(|_| format!("column '{name}' has a non-numeric row index"))?;
                    cells.sort_by_key(|(k, _)| *k);
                    Ok((name, cells.into_iter().map(|(_, v)| v).collect()))
                })
                .collect::<std::result::Result<BTreeMap<String, Vec<f64>>, String>>()?;
            pick_column(ordered)
        }
    }
}

fn pick_column(mut columns: BTreeMap<String, Vec<f64>>) -> std::result::Result<Vec<f64>, String> {
    if columns.len() == 1 {
        return Ok(columns.into_values().next().unwrap_or_default());
    }
    TIMELINE_COLUMN_NAMES
        .iter()
        .find_map(|name| columns.remove(*name))
        .ok_or_else(|| {
            format!(
                "{} columns and none named {}",
                columns.len(),
                TIMELINE_COLUMN_NAMES.join("/")
            )
        })
}

/// First field of each non-empty line; a non-numeric first line is a header.
fn parse_delimited(text: &str) -> std::result::Result<Vec<f64>, String> {
    let mut values = Vec::new();
    let mut seen_row = false;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let field = line
            .split([',', '\t', ';'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches('"');
        match field.parse::<f64>() {
            Ok(v) => values.push(v),
            Err(_) if !seen_row => {}
            Err(_) => return Err(format!("line {}: '{field}' is not a number", lineno + 1)),
        }
        seen_row = true;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_layouts() {
        assert_eq!(parse_json("[0, 1.4, 2.6]").unwrap(), vec![0.0, 1.4, 2.6]);
        assert_eq!(parse_json("[[0], [5]]").unwrap(), vec![0.0, 5.0]);
        assert_eq!(parse_json(r#"{"Hours": [1, 2]}"#).unwrap(), vec![1.0, 2.0]);
        assert_eq!(
            parse_json(r#"{"0": {"1": 24, "0": 0, "10": 240, "2": 48}}"#).unwrap(),
            vec![0.0, 24.0, 48.0, 240.0]
        );
        assert_eq!(
            parse_json(r#"{"hours": [3], "note": [9]}"#).unwrap(),
            vec![3.0]
        );
        assert!(parse_json(r#"{"a": [1], "b": [2]}"#).is_err());
        assert!(parse_json(r#""text""#).is_err());
    }

    #[test]
    fn delimited_with_header_and_blank_lines() {
        let text = "Hours,Comment\n0,start\n\n12.5,mid\n24;x\n";
        assert_eq!(parse_delimited(text).unwrap(), vec![0.0, 12.5, 24.0]);
        assert!(parse_delimited("0\nNA\n").is_err());
    }

    #[test]
    fn rounding_modes() {
        assert_eq!(Rounding::Nearest.apply(1.4), 1);
        assert_eq!(Rounding::Nearest.apply(1.5), 2);
        assert_eq!(Rounding::Nearest.apply(0.5), 0);
        assert_eq!(Rounding::Nearest.apply(2.5), 2);
        assert_eq!(Rounding::Nearest.apply(3.5), 4);
        assert_eq!(Rounding::Ceil.apply(1.1), 2);
    }

    #[test]
    fn label_width_covers_used_rows_only() {
        let t = Timeline {
            path: PathBuf::from("Timeline.json"),
            hours: vec![0, 5, 100, 10000],
        };
        assert_eq!(t.max_label_width(3), 3);
        assert!(t.check_covers(4).is_ok());
        assert!(matches!(
            t.check_covers(5),
            Err(PipelineError::TimelineTooShort { rows: 4, frames: 5, .. })
        ));
    }
}

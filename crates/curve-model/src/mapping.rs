//! Channel name mapping.
//!
//! A mapping file is a small CSV that retargets capture channel names onto
//! the morph targets of a particular rig:
//!
//! ```text
//! ARKit,Targets
//! jawOpen,Jaw_Open
//! mouthSmileLeft,Mouth_Smile_L|Cheek_Raise_L
//! ```
//!
//! The header is optional. Keys match case-insensitively and a target cell
//! may list several names separated by `|`.

use std::collections::HashMap;
use std::path::Path;

/// Case-insensitive source channel to target list mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelMapping {
    entries: HashMap<String, String>,
}

/// Errors that can occur when loading a mapping file.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl ChannelMapping {
    /// Parse mapping text.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let mut entries = HashMap::new();
        let Some(first) = lines.first() else {
            return Self { entries };
        };

        let header = split_cells(first);
        let find = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
        let (source_idx, target_idx, start) = match (find("arkit"), find("targets")) {
            (Some(s), Some(t)) => (s, t, 1),
            _ => (0, 1, 0),
        };

        for line in &lines[start..] {
            let cells = split_cells(line);
            if cells.len() < 2 {
                continue;
            }
            let (Some(source), Some(targets)) = (cells.get(source_idx), cells.get(target_idx))
            else {
                continue;
            };
            if source.is_empty() || targets.is_empty() {
                continue;
            }
            entries.insert(source.to_lowercase(), targets.to_string());
        }

        Self { entries }
    }

    /// Load and parse a mapping file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MappingError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw target cell for `channel`, if mapped.
    pub fn get(&self, channel: &str) -> Option<&str> {
        self.entries.get(&channel.to_lowercase()).map(String::as_str)
    }

    /// Lower-cased target names for `channel`; unmapped channels map to themselves.
    pub fn targets_for(&self, channel: &str) -> Vec<String> {
        self.get(channel)
            .unwrap_or(channel)
            .split('|')
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(',').map(|cell| unquote(cell.trim())).collect()
}

fn unquote(cell: &str) -> &str {
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    cell.strip_suffix('"').unwrap_or(cell)
}

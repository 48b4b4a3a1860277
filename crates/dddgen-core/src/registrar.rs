use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RegisterError;

/// A code fragment to place immediately before a marker comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub marker: String,
    pub fragment: String,
}

/// One registration step: a set of insertions into a single aggregator file.
///
/// Insertions are attempted independently; any that succeed are saved even if
/// a sibling fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Short name used in reports, e.g. `route`.
    pub label: String,
    /// Aggregator file, relative to the project root.
    pub path: PathBuf,
    pub insertions: Vec<Insertion>,
}

impl Registration {
    /// Apply all insertions to the file under `root`. Returns every failure.
    pub fn apply(&self, root: &Path) -> Vec<RegisterError> {
        let mut file = match MarkerFile::open(&root.join(&self.path)) {
            Ok(file) => file,
            Err(e) => return vec![e],
        };

        let mut errors: Vec<RegisterError> = self
            .insertions
            .iter()
            .filter_map(|ins| file.insert_before(&ins.marker, &ins.fragment).err())
            .collect();

        if let Err(e) = file.save() {
            errors.push(e);
        }
        for e in &errors {
            log::warn!("{} registration: {e}", self.label);
        }
        errors
    }
}

/// An aggregator file loaded into memory for marker-anchored edits.
#[derive(Debug, Clone)]
pub struct MarkerFile {
    path: PathBuf,
    original: String,
    content: String,
}

impl MarkerFile {
    pub fn open(path: &Path) -> Result<Self, RegisterError> {
        let content = fs::read_to_string(path).map_err(|source| RegisterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_content(path, content))
    }

    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            original: content.clone(),
            content,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_modified(&self) -> bool {
        self.content != self.original
    }

    /// Insert `fragment` right before the only occurrence of `marker`.
    ///
    /// Fragment lines after the first are indented like the marker's line, and
    /// the marker keeps its own indentation so later insertions line up.
    pub fn insert_before(&mut self, marker: &str, fragment: &str) -> Result<(), RegisterError> {
        let count = self.content.matches(marker).count();
        let pos = match (count, self.content.find(marker)) {
            (1, Some(pos)) => pos,
            (0, _) | (_, None) => {
                return Err(RegisterError::MarkerNotFound {
                    path: self.path.clone(),
                    marker: marker.to_string(),
                });
            }
            (count, _) => {
                return Err(RegisterError::DuplicateMarker {
                    path: self.path.clone(),
                    marker: marker.to_string(),
                    count,
                });
            }
        };
        if fragment.is_empty() {
            return Ok(());
        }

        let block = indent_fragment(
            fragment,
            line_indent(&self.content, pos),
            line_ending(&self.content, pos),
        );
        let mut updated = String::with_capacity(self.content.len() + block.len());
        updated.push_str(&self.content[..pos]);
        updated.push_str(&block);
        updated.push_str(&self.content[pos..]);

        let after = updated.matches(marker).count();
        if after != 1 {
            return Err(RegisterError::MarkerCorrupted {
                path: self.path.clone(),
                marker: marker.to_string(),
                count: after,
            });
        }

        log::debug!(
            "inserted {} bytes before marker in {}",
            block.len(),
            self.path.display()
        );
        self.content = updated;
        Ok(())
    }

    /// Write the file back if any insertion succeeded. Returns whether it wrote.
    pub fn save(&self) -> Result<bool, RegisterError> {
        if !self.is_modified() {
            return Ok(false);
        }
        fs::write(&self.path, &self.content).map_err(|source| RegisterError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(true)
    }
}

/// Leading whitespace of the line containing `pos`, or nothing if the marker
/// does not start its line.
fn line_indent(content: &str, pos: usize) -> &str {
    let line_start = content[..pos].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &content[line_start..pos];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

/// The line terminator used by the line containing `pos`.
fn line_ending(content: &str, pos: usize) -> &'static str {
    match content[pos..].find('\n') {
        Some(i) if content[..pos + i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

fn indent_fragment(fragment: &str, indent: &str, newline: &str) -> String {
    let mut out = String::with_capacity(fragment.len() + indent.len() * 8);
    for (i, line) in fragment.lines().enumerate() {
        if i > 0 && !line.is_empty() {
            out.push_str(indent);
        }
        out.push_str(line);
        out.push_str(newline);
    }
    out.push_str(indent);
    out
}

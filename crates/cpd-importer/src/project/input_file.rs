use std::path::{Path, PathBuf};

use crate::vfs::FileId;

// ── InputFile ───────────────────────────────────────────────────────────────

/// Snapshot of a project input file, as far as range checks need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    id: FileId,
    path: PathBuf,
    /// Length of each line in UTF-16 code units, line terminator excluded.
    line_lengths: Vec<u32>,
}

impl InputFile {
    pub fn from_text(
        id: FileId,
        path: PathBuf,
        text: &str,
    ) -> Self {
        let line_lengths = Self::compute_line_lengths(text);
        Self {
            id,
            path,
            line_lengths,
        }
    }

    /// Read the file at `path` from disk. Invalid UTF-8 is replaced, not rejected.
    pub fn load(
        id: FileId,
        path: PathBuf,
    ) -> std::io::Result<Self> {
        let bytes = std::fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(Self::from_text(id, path, &text))
    }

    // ── queries ─────────────────────────────────────────────────────────

    pub fn id(&self) -> &FileId {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines; an empty file has one empty line.
    pub fn line_count(&self) -> usize {
        self.line_lengths.len()
    }

    /// Length of a 1-based line, or `None` past the end of the file.
    pub fn line_length(
        &self,
        line: usize,
    ) -> Option<u32> {
        line.checked_sub(1).and_then(|index| self.line_lengths.get(index)).copied()
    }

    // ── internals ───────────────────────────────────────────────────────

    /// Lines end at `\r\n`, `\r` or `\n`. A leading BOM is not part of line 1.
    fn compute_line_lengths(text: &str) -> Vec<u32> {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        let mut lengths = Vec::new();
        let mut current = 0u32;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    chars.next_if_eq(&'\n');
                    lengths.push(current);
                    current = 0;
                },
                '\n' => {
                    lengths.push(current);
                    current = 0;
                },
                other => current += other.len_utf16() as u32,
            }
        }
        lengths.push(current);
        lengths
    }
}

#[cfg(test)]
#[path = "../../tests/src/project/input_file_tests.rs"]
mod tests;

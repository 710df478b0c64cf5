use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Project-relative, `/`-separated identifier of an input file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(String);

impl FileId {
    pub fn from_relative_path(path: &Path) -> Self {
        Self(normalize_report_path(&path.to_string_lossy()))
    }

    pub fn from_report_path(path: &str) -> Option<Self> {
        let normalized = normalize_report_path(path);
        if normalized.is_empty() {
            return None;
        }
        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl std::fmt::Display for FileId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn normalized_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Normalize a path as written by the analyzer.
///
/// Backslashes become `/`, empty and `.` segments are dropped and `..`
/// folds the previous segment. A leading `/` or drive prefix (`C:`) is
/// preserved so absolute paths stay recognizable.
pub fn normalize_report_path(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                match segments.last() {
                    Some(&last) if last != ".." && !is_drive_prefix(last) => {
                        segments.pop();
                    },
                    _ if absolute => {},
                    _ => segments.push(".."),
                }
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Returns the part of `path` below `root`, both already normalized.
///
/// Drive prefixes compare case-insensitively. A `root` length that falls
/// inside a multi-byte character of `path` never matches.
pub fn strip_root<'a>(
    path: &'a str,
    root: &str,
) -> Option<&'a str> {
    let root = root.trim_end_matches('/');
    if root.is_empty() || path.len() <= root.len() {
        return None;
    }
    if !path.is_char_boundary(root.len()) {
        return None;
    }
    let (head, rest) = path.split_at(root.len());
    let head_matches = if starts_with_drive(root) {
        head.eq_ignore_ascii_case(root)
    } else {
        head == root
    };
    if !head_matches {
        return None;
    }
    rest.strip_prefix('/').filter(|rest| !rest.is_empty())
}

/// True for `/abs` and `C:/abs` style paths.
pub fn is_absolute_report_path(path: &str) -> bool {
    path.starts_with('/') || starts_with_drive(path)
}

fn starts_with_drive(path: &str) -> bool {
    path.split('/').next().is_some_and(is_drive_prefix)
}

fn is_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
#[path = "../../tests/src/vfs/vfs_tests.rs"]
mod tests;

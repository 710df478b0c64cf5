use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::InputFile;
use crate::{
    config::ProjectSettings,
    vfs::{FileId, is_absolute_report_path, normalize_report_path, normalized_path, strip_root},
};

/// Maps a path written by the analyzer to a project input file.
///
/// Path normalization is the resolver's job: callers pass the raw string.
pub trait FileResolver {
    fn resolve(
        &self,
        path: &str,
    ) -> Option<Arc<InputFile>>;
}

impl<F> FileResolver for F
where
    F: Fn(&str) -> Option<Arc<InputFile>>,
{
    fn resolve(
        &self,
        path: &str,
    ) -> Option<Arc<InputFile>> {
        self(path)
    }
}

#[derive(Debug, Clone)]
struct FileEntry {
    id: FileId,
    path: PathBuf,
}

/// Index of the input files below a project root.
///
/// The set of files is fixed when the index is built; file contents are
/// loaded on first resolution and cached. All lookups take `&self` so one
/// index can serve several import sessions at once.
#[derive(Debug)]
pub struct ProjectFiles {
    root: PathBuf,
    root_keys: Vec<String>,
    case_sensitive: bool,
    entries: HashMap<String, FileEntry>,
    loaded: DashMap<FileId, Arc<InputFile>>,
}

impl ProjectFiles {
    /// Walk `root` and index every file accepted by `settings`.
    pub fn scan(
        root: &Path,
        settings: &ProjectSettings,
    ) -> std::io::Result<Self> {
        let mut index = Self::empty(root, settings.case_sensitive);
        let max_size = settings.max_file_size_bytes();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !should_skip_entry(entry, root, settings));

        for entry in walker {
            let entry = entry.map_err(std::io::Error::other)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let accepted = path.extension().and_then(|e| e.to_str()).is_some_and(|e| settings.accepts_extension(e));
            if !accepted {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > max_size {
                debug!("Not indexing {} ({size} bytes exceeds the size limit)", path.display());
                continue;
            }
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            index.insert_entry(FileId::from_relative_path(relative), path.to_path_buf());
        }

        debug!("Indexed {} project file(s) under {}", index.len(), root.display());
        Ok(index)
    }

    /// Build an index over files that are already in memory.
    pub fn from_files(
        root: &Path,
        case_sensitive: bool,
        files: impl IntoIterator<Item = InputFile>,
    ) -> Self {
        let mut index = Self::empty(root, case_sensitive);
        for file in files {
            index.insert_entry(file.id().clone(), file.path().to_path_buf());
            index.loaded.insert(file.id().clone(), Arc::new(file));
        }
        index
    }

    fn empty(
        root: &Path,
        case_sensitive: bool,
    ) -> Self {
        let mut root_keys = vec![normalize_report_path(&root.to_string_lossy())];
        let canonical = normalize_report_path(&normalized_path(root).to_string_lossy());
        if !root_keys.contains(&canonical) {
            root_keys.push(canonical);
        }
        Self {
            root: root.to_path_buf(),
            root_keys,
            case_sensitive,
            entries: HashMap::new(),
            loaded: DashMap::new(),
        }
    }

    fn insert_entry(
        &mut self,
        id: FileId,
        path: PathBuf,
    ) {
        let key = self.lookup_key(id.as_str());
        self.entries.insert(
            key,
            FileEntry {
                id,
                path,
            },
        );
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All indexed file ids, sorted.
    pub fn file_ids(&self) -> Vec<FileId> {
        let mut ids: Vec<FileId> = self.entries.values().map(|entry| entry.id.clone()).collect();
        ids.sort();
        ids
    }

    fn lookup_key(
        &self,
        path: &str,
    ) -> String {
        if self.case_sensitive {
            path.to_string()
        } else {
            path.to_lowercase()
        }
    }

    /// Turn an analyzer path into the root-relative lookup key.
    fn relative_key(
        &self,
        raw: &str,
    ) -> Option<String> {
        let normalized = self.lookup_key(&normalize_report_path(raw));
        if normalized.is_empty() {
            return None;
        }
        if !is_absolute_report_path(&normalized) {
            return Some(normalized);
        }
        self.root_keys
            .iter()
            .find_map(|root| strip_root(&normalized, &self.lookup_key(root)))
            .map(str::to_string)
    }

    fn load(
        &self,
        entry: &FileEntry,
    ) -> Option<Arc<InputFile>> {
        if let Some(file) = self.loaded.get(&entry.id) {
            return Some(file.value().clone());
        }
        match InputFile::load(entry.id.clone(), entry.path.clone()) {
            Ok(file) => {
                let file = self.loaded.entry(entry.id.clone()).or_insert_with(|| Arc::new(file)).value().clone();
                Some(file)
            },
            Err(error) => {
                debug!("Cannot read indexed file {}: {error}", entry.path.display());
                None
            },
        }
    }
}

impl FileResolver for ProjectFiles {
    fn resolve(
        &self,
        path: &str,
    ) -> Option<Arc<InputFile>> {
        let key = self.relative_key(path)?;
        let entry = self.entries.get(&key)?;
        self.load(entry)
    }
}

fn should_skip_entry(
    entry: &DirEntry,
    root: &Path,
    settings: &ProjectSettings,
) -> bool {
    if entry.file_type().is_dir() {
        let name = entry.file_name().to_str().unwrap_or("");
        if should_exclude_dir(name) {
            return true;
        }
    }
    match entry.path().strip_prefix(root) {
        Ok(relative) => settings.is_excluded(FileId::from_relative_path(relative).as_str()),
        Err(_) => false,
    }
}

/// Hidden directories and .NET build output never hold analyzed sources.
fn should_exclude_dir(name: &str) -> bool {
    if name.starts_with('.') {
        return true;
    }
    matches!(name, "bin" | "obj" | "node_modules" | "packages" | "TestResults")
}

#[cfg(test)]
#[path = "../../tests/src/project/project_files_tests.rs"]
mod tests;

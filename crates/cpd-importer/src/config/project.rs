use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::vfs::normalize_report_path;

pub const MIN_MAX_FILE_SIZE_KB: u64 = 16;
pub const MAX_MAX_FILE_SIZE_KB: u64 = 1024 * 64;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSettings {
    /// Extensions (without the dot) of files indexed as project inputs.
    pub extensions: Vec<String>,
    /// Root-relative prefixes that are never indexed.
    pub exclude_paths: Vec<String>,
    pub max_file_size_kb: u64,
    /// When false, report paths match project files regardless of case.
    pub case_sensitive: bool,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            extensions: ["cs", "vb", "razor", "cshtml"].iter().map(|e| e.to_string()).collect(),
            exclude_paths: Vec::new(),
            max_file_size_kb: 4096,
            case_sensitive: true,
        }
    }
}

impl ProjectSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: ProjectSettingsPatch,
    ) {
        if let Some(v) = patch.extensions {
            self.extensions = v;
        }
        if let Some(v) = patch.exclude_paths {
            self.exclude_paths = v;
        }
        if let Some(v) = patch.max_file_size_kb {
            self.max_file_size_kb = v;
        }
        if let Some(v) = patch.case_sensitive {
            self.case_sensitive = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.extensions = self
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .filter(|e| seen.insert(e.clone()))
            .collect();

        let mut seen = HashSet::new();
        self.exclude_paths = self
            .exclude_paths
            .iter()
            .map(|p| normalize_report_path(p).trim_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();

        self.max_file_size_kb = self.max_file_size_kb.clamp(MIN_MAX_FILE_SIZE_KB, MAX_MAX_FILE_SIZE_KB);
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }

    pub fn accepts_extension(
        &self,
        extension: &str,
    ) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// True when the root-relative `path` lies under an excluded prefix.
    pub fn is_excluded(
        &self,
        path: &str,
    ) -> bool {
        self.exclude_paths.iter().any(|prefix| {
            path == prefix || path.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct ProjectSettingsPatch {
    pub(crate) extensions: Option<Vec<String>>,
    pub(crate) exclude_paths: Option<Vec<String>>,
    pub(crate) max_file_size_kb: Option<u64>,
    pub(crate) case_sensitive: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}

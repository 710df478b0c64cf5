use std::collections::HashMap;

use serde::Deserialize;

pub const DEFAULT_REPORT_FILE_NAME: &str = "token-cpd.pb";
pub const MIN_MAX_MESSAGE_SIZE_KB: u64 = 1;
pub const MAX_MAX_MESSAGE_SIZE_KB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSettings {
    /// File name searched for when a report directory is given.
    pub report_file_name: String,
    /// Upper bound for a single length-delimited message.
    pub max_message_size_kb: u64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            report_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
            max_message_size_kb: 64 * 1024,
        }
    }
}

impl ImportSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: ImportSettingsPatch,
    ) {
        if let Some(v) = patch.report_file_name {
            self.report_file_name = v;
        }
        if let Some(v) = patch.max_message_size_kb {
            self.max_message_size_kb = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.report_file_name = self.report_file_name.trim().to_string();
        if self.report_file_name.is_empty() {
            self.report_file_name = DEFAULT_REPORT_FILE_NAME.to_string();
        }
        self.max_message_size_kb = self.max_message_size_kb.clamp(MIN_MAX_MESSAGE_SIZE_KB, MAX_MAX_MESSAGE_SIZE_KB);
    }

    pub fn max_message_size_bytes(&self) -> u64 {
        self.max_message_size_kb.saturating_mul(1024)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct ImportSettingsPatch {
    pub(crate) report_file_name: Option<String>,
    pub(crate) max_message_size_kb: Option<u64>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}

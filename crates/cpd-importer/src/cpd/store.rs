use dashmap::{DashMap, mapref::entry::Entry};
use thiserror::Error;
use tracing::debug;

use super::CpdToken;
use crate::vfs::FileId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("tokens for {path} were already saved")]
    AlreadySaved { path: String },
}

/// Receiver of finalized token lists; stands for the host's duplication engine.
pub trait CpdSink {
    fn save(
        &self,
        file: &FileId,
        tokens: Vec<CpdToken>,
    ) -> Result<(), SinkError>;
}

/// Thread-safe in-memory [`CpdSink`].
///
/// Each file can be saved once; several import sessions may share one store.
#[derive(Debug)]
pub struct CpdTokenStore {
    files: DashMap<FileId, Vec<CpdToken>>,
}

impl CpdTokenStore {
    pub fn new() -> Self {
        Self {
            files: DashMap::new(),
        }
    }

    /// Return a clone of the tokens saved for `file`.
    pub fn tokens_for(
        &self,
        file: &FileId,
    ) -> Option<Vec<CpdToken>> {
        self.files.get(file).map(|r| r.value().clone())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn token_count(&self) -> usize {
        self.files.iter().map(|r| r.value().len()).sum()
    }

    /// All files with saved tokens, sorted.
    pub fn files(&self) -> Vec<FileId> {
        let mut files: Vec<FileId> = self.files.iter().map(|r| r.key().clone()).collect();
        files.sort();
        files
    }
}

impl Default for CpdTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CpdSink for CpdTokenStore {
    fn save(
        &self,
        file: &FileId,
        tokens: Vec<CpdToken>,
    ) -> Result<(), SinkError> {
        match self.files.entry(file.clone()) {
            Entry::Occupied(_) => Err(SinkError::AlreadySaved {
                path: file.to_string(),
            }),
            Entry::Vacant(slot) => {
                debug!("Saved {} CPD token(s) for {file}", tokens.len());
                slot.insert(tokens);
                Ok(())
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/cpd/store_tests.rs"]
mod tests;

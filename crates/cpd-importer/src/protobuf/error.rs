use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an import session.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The stream is not a valid sequence of length-delimited messages.
    #[error("corrupt protobuf stream at byte {offset}: {reason}")]
    CorruptStream { offset: u64, reason: String },

    /// A second record named a file that was already dispatched.
    #[error("duplicate record for {path} at byte {offset}")]
    DuplicateFileRecord { path: String, offset: u64 },

    /// The consumer rejected a record; this is a reporting defect, not bad data.
    #[error("consumer failed for {path}: {source}")]
    Consumer {
        path: String,
        #[source]
        source: super::importer::BoxError,
    },

    #[error("I/O error at byte {offset}: {source}")]
    Io {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open report {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    /// Byte offset in the stream where the session stopped, when known.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::CorruptStream {
                offset, ..
            }
            | Self::DuplicateFileRecord {
                offset, ..
            }
            | Self::Io {
                offset, ..
            } => Some(*offset),
            Self::Consumer {
                ..
            }
            | Self::Open {
                ..
            } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

//! Length-delimited protobuf report streams.

pub(crate) mod error;
pub(crate) mod importer;
pub mod messages;
pub(crate) mod stream;

pub use error::ImportError;
pub use importer::{
    BoxError, DEFAULT_MAX_MESSAGE_LEN, ImportSession, ImportStats, RecordConsumer, RecordImporter, SessionState,
};
pub use messages::{CopyPasteTokenInfo, TextRange, TokenInfo};

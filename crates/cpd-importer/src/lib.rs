pub mod config;
pub mod cpd;
pub mod project;
pub mod protobuf;
pub mod report;
pub mod text_range;
pub mod vfs;

pub use config::ImporterSettings;
pub use cpd::{CpdSink, CpdToken, CpdTokenStore, CpdTokensConsumer, NewCpdTokens, SinkError};
pub use project::{FileResolver, InputFile, ProjectFiles};
pub use protobuf::{ImportError, ImportSession, ImportStats, RecordConsumer, RecordImporter, SessionState};
pub use report::{ImportReport, ImportSummary, find_report_files, import_cpd_report, import_cpd_reports};
pub use text_range::{MalformedRecordError, TextPointer, TextRange, to_text_range};
pub use vfs::FileId;

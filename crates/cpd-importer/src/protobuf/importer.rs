use std::{collections::HashSet, io::Read, marker::PhantomData};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    error::{ImportError, Result},
    stream::DelimitedReader,
};
use crate::{
    project::{FileResolver, InputFile},
    vfs::FileId,
};

/// Default bound on a single message: 64 MiB.
pub const DEFAULT_MAX_MESSAGE_LEN: u64 = 64 * 1024 * 1024;

/// Error type of closures used as consumers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Receives every record whose file resolved, in stream order.
pub trait RecordConsumer<M> {
    type Error: Into<BoxError>;

    fn consume(
        &mut self,
        file: &InputFile,
        message: M,
    ) -> std::result::Result<(), Self::Error>;
}

impl<M, F> RecordConsumer<M> for F
where
    F: FnMut(&InputFile, M) -> std::result::Result<(), BoxError>,
{
    type Error = BoxError;

    fn consume(
        &mut self,
        file: &InputFile,
        message: M,
    ) -> std::result::Result<(), BoxError> {
        self(file, message)
    }
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// Messages decoded from the stream.
    pub messages: usize,
    /// Messages handed to the consumer.
    pub dispatched: usize,
    /// Messages skipped because their file is not part of the project.
    pub unresolved: usize,
    pub bytes_read: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Reading,
    Closed,
    Aborted,
}

impl SessionState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Closed | Self::Aborted)
    }
}

/// Imports one kind of length-delimited report message.
///
/// The importer owns no stream; each call to [`RecordImporter::session`]
/// or [`RecordImporter::run`] starts a fresh [`ImportSession`]. `path_of`
/// extracts the analyzer-written file path from a decoded message.
pub struct RecordImporter<M, P> {
    kind: &'static str,
    path_of: P,
    max_message_len: u64,
    _message: PhantomData<fn() -> M>,
}

impl<M, P> RecordImporter<M, P>
where
    M: prost::Message + Default,
    P: Fn(&M) -> &str,
{
    pub fn new(
        kind: &'static str,
        path_of: P,
    ) -> Self {
        Self {
            kind,
            path_of,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            _message: PhantomData,
        }
    }

    pub fn with_max_message_len(
        mut self,
        max_message_len: u64,
    ) -> Self {
        self.max_message_len = max_message_len;
        self
    }

    pub fn session<'a, R, F>(
        &'a self,
        stream: R,
        resolver: &'a F,
    ) -> ImportSession<'a, M, P, R, F>
    where
        R: Read,
        F: FileResolver + ?Sized,
    {
        ImportSession {
            importer: self,
            reader: DelimitedReader::new(stream, self.max_message_len),
            resolver,
            state: SessionState::Open,
            stats: ImportStats::default(),
            dispatched_files: HashSet::new(),
        }
    }

    /// Read `stream` to the end, dispatching each resolved record to `consumer`.
    pub fn run<R, F, C>(
        &self,
        stream: R,
        resolver: &F,
        consumer: &mut C,
    ) -> Result<ImportStats>
    where
        R: Read,
        F: FileResolver + ?Sized,
        C: RecordConsumer<M>,
    {
        self.session(stream, resolver).run(consumer)
    }
}

/// One pass over one stream.
///
/// `Open → Reading → Closed | Aborted`. A finished session never reads again.
pub struct ImportSession<'a, M, P, R, F: ?Sized> {
    importer: &'a RecordImporter<M, P>,
    reader: DelimitedReader<R>,
    resolver: &'a F,
    state: SessionState,
    stats: ImportStats,
    dispatched_files: HashSet<FileId>,
}

impl<M, P, R, F> ImportSession<'_, M, P, R, F>
where
    M: prost::Message + Default,
    P: Fn(&M) -> &str,
    R: Read,
    F: FileResolver + ?Sized,
{
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    /// Process the remaining stream.
    pub fn run<C>(
        mut self,
        consumer: &mut C,
    ) -> Result<ImportStats>
    where
        C: RecordConsumer<M>,
    {
        while self.step(consumer)? {}
        Ok(self.stats)
    }

    /// Process one message. Returns `Ok(false)` once the session is finished.
    pub fn step<C>(
        &mut self,
        consumer: &mut C,
    ) -> Result<bool>
    where
        C: RecordConsumer<M>,
    {
        if self.state.is_finished() {
            return Ok(false);
        }
        self.state = SessionState::Reading;

        let next = self.reader.next_message::<M>();
        self.stats.bytes_read = self.reader.offset();
        let (offset, message) = match next {
            Ok(Some(next)) => next,
            Ok(None) => {
                self.close();
                return Ok(false);
            },
            Err(error) => return Err(self.abort(error)),
        };
        self.stats.messages += 1;

        let kind = self.importer.kind;
        let path = (self.importer.path_of)(&message);
        let Some(file) = self.resolver.resolve(path) else {
            debug!("Skipping {kind} record at byte {offset}: '{path}' is not a project file");
            self.stats.unresolved += 1;
            return Ok(true);
        };

        if !self.dispatched_files.insert(file.id().clone()) {
            let error = ImportError::DuplicateFileRecord {
                path: file.id().to_string(),
                offset,
            };
            return Err(self.abort(error));
        }

        if let Err(source) = consumer.consume(&file, message) {
            let error = ImportError::Consumer {
                path: file.id().to_string(),
                source: source.into(),
            };
            return Err(self.abort(error));
        }
        self.stats.dispatched += 1;
        Ok(true)
    }

    fn close(&mut self) {
        self.state = SessionState::Closed;
        let ImportStats {
            messages,
            dispatched,
            unresolved,
            bytes_read,
        } = self.stats;
        info!(
            "Imported {dispatched} of {messages} {} record(s) ({bytes_read} bytes, {unresolved} for unresolved files)",
            self.importer.kind
        );
    }

    fn abort(
        &mut self,
        error: ImportError,
    ) -> ImportError {
        self.state = SessionState::Aborted;
        warn!("Aborting {} import after {} record(s): {error}", self.importer.kind, self.stats.messages);
        error
    }
}

#[cfg(test)]
#[path = "../../tests/src/protobuf/importer_tests.rs"]
mod tests;

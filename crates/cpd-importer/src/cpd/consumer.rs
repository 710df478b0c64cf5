use tracing::warn;

use super::{CpdSink, NewCpdTokens, SinkError};
use crate::{
    project::InputFile,
    protobuf::{CopyPasteTokenInfo, RecordConsumer},
    text_range::{MalformedRecordError, to_text_range},
};

/// Registers the tokens of each record on its file and saves them.
///
/// One record carries the full token list of one file, so the list is
/// finalized as soon as the record's tokens are registered. Tokens whose
/// range does not fit the file are dropped with a warning. A file the sink
/// already holds (saved by an earlier report) is skipped with a warning.
pub struct CpdTokensConsumer<'s, S: ?Sized> {
    sink: &'s S,
    saved_files: usize,
    saved_tokens: usize,
    skipped_files: usize,
    skipped_tokens: usize,
}

impl<'s, S> CpdTokensConsumer<'s, S>
where
    S: CpdSink + ?Sized,
{
    pub fn new(sink: &'s S) -> Self {
        Self {
            sink,
            saved_files: 0,
            saved_tokens: 0,
            skipped_files: 0,
            skipped_tokens: 0,
        }
    }

    pub fn saved_files(&self) -> usize {
        self.saved_files
    }

    pub fn saved_tokens(&self) -> usize {
        self.saved_tokens
    }

    /// Records dropped because the sink already held tokens for their file.
    pub fn skipped_files(&self) -> usize {
        self.skipped_files
    }

    /// Tokens dropped because their range was malformed.
    pub fn skipped_tokens(&self) -> usize {
        self.skipped_tokens
    }
}

impl<S> RecordConsumer<CopyPasteTokenInfo> for CpdTokensConsumer<'_, S>
where
    S: CpdSink + ?Sized,
{
    type Error = SinkError;

    fn consume(
        &mut self,
        file: &InputFile,
        message: CopyPasteTokenInfo,
    ) -> Result<(), SinkError> {
        let mut cpd_tokens = NewCpdTokens::on_file(file);

        for token in message.token_info {
            let registered = token
                .text_range
                .as_ref()
                .ok_or(MalformedRecordError::MissingRange)
                .and_then(|raw| to_text_range(file, raw))
                .and_then(|range| cpd_tokens.add_token(range, token.token_value.as_str()));
            if let Err(error) = registered {
                warn!("Skipping CPD token '{}' in {}: {error}", token.token_value, file.id());
                self.skipped_tokens += 1;
            }
        }

        let count = match cpd_tokens.save(self.sink) {
            Ok(count) => count,
            Err(SinkError::AlreadySaved {
                path,
            }) => {
                warn!("Skipping CPD tokens for {path}: already saved by an earlier report");
                self.skipped_files += 1;
                return Ok(());
            },
        };
        self.saved_tokens += count;
        self.saved_files += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src/cpd/consumer_tests.rs"]
mod tests;

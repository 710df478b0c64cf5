use serde::Serialize;

use super::store::{CpdSink, SinkError};
use crate::{
    project::InputFile,
    text_range::{MalformedRecordError, TextPointer, TextRange},
    vfs::FileId,
};

/// One normalized token as the duplication engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpdToken {
    pub range: TextRange,
    pub value: String,
}

/// Token list being built for one file.
///
/// Tokens have to arrive in file order: each one starts at or after the
/// end of the previous one. Nothing reaches the sink until [`save`].
///
/// [`save`]: NewCpdTokens::save
#[derive(Debug)]
pub struct NewCpdTokens {
    file: FileId,
    tokens: Vec<CpdToken>,
    last_end: Option<TextPointer>,
}

impl NewCpdTokens {
    pub fn on_file(file: &InputFile) -> Self {
        Self {
            file: file.id().clone(),
            tokens: Vec::new(),
            last_end: None,
        }
    }

    pub fn add_token(
        &mut self,
        range: TextRange,
        value: impl Into<String>,
    ) -> Result<(), MalformedRecordError> {
        if let Some(previous_end) = self.last_end
            && range.start < previous_end
        {
            return Err(MalformedRecordError::OutOfOrder {
                range,
                previous_end,
            });
        }
        self.last_end = Some(range.end);
        self.tokens.push(CpdToken {
            range,
            value: value.into(),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Submit the list. Returns the number of tokens handed over.
    pub fn save<S>(
        self,
        sink: &S,
    ) -> Result<usize, SinkError>
    where
        S: CpdSink + ?Sized,
    {
        let count = self.tokens.len();
        sink.save(&self.file, self.tokens)?;
        Ok(count)
    }
}

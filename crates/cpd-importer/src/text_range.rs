//! Conversion of wire ranges into ranges checked against an input file.

use serde::Serialize;
use thiserror::Error;

use crate::{project::InputFile, protobuf::messages};

/// A position in a file: 1-based line, 0-based offset in UTF-16 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TextPointer {
    pub line: u32,
    pub line_offset: u32,
}

impl TextPointer {
    pub fn new(
        line: u32,
        line_offset: u32,
    ) -> Self {
        Self {
            line,
            line_offset,
        }
    }
}

impl std::fmt::Display for TextPointer {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.line_offset)
    }
}

/// Half-open span `[start, end)` inside one file. `start` is always before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextRange {
    pub start: TextPointer,
    pub end: TextPointer,
}

impl TextRange {
    pub fn new(
        start: TextPointer,
        end: TextPointer,
    ) -> Self {
        Self {
            start,
            end,
        }
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "[{}-{}]", self.start, self.end)
    }
}

/// A decoded record whose contents do not fit the file it names.
///
/// Recoverable: the offending token is dropped and the session goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecordError {
    #[error("token has no text range")]
    MissingRange,

    #[error("negative position {line}:{offset}")]
    NegativePosition { line: i32, offset: i32 },

    #[error("line {line} is out of range, file has {lines} line(s)")]
    LineOutOfBounds { line: u32, lines: usize },

    #[error("offset {offset} is out of range for line {line} of length {length}")]
    OffsetOutOfBounds { line: u32, offset: u32, length: u32 },

    #[error("start {start} must be before end {end}")]
    EmptyOrInverted { start: TextPointer, end: TextPointer },

    #[error("token {range} starts before the previous token ends at {previous_end}")]
    OutOfOrder { range: TextRange, previous_end: TextPointer },
}

/// Convert a wire range into a [`TextRange`] valid for `file`.
pub fn to_text_range(
    file: &InputFile,
    raw: &messages::TextRange,
) -> Result<TextRange, MalformedRecordError> {
    let start = pointer(file, raw.start_line, raw.start_offset)?;
    let end = pointer(file, raw.end_line, raw.end_offset)?;
    if start >= end {
        return Err(MalformedRecordError::EmptyOrInverted {
            start,
            end,
        });
    }
    Ok(TextRange::new(start, end))
}

fn pointer(
    file: &InputFile,
    line: i32,
    offset: i32,
) -> Result<TextPointer, MalformedRecordError> {
    let (Ok(line_u), Ok(offset_u)) = (u32::try_from(line), u32::try_from(offset)) else {
        return Err(MalformedRecordError::NegativePosition {
            line,
            offset,
        });
    };
    let Some(length) = file.line_length(line_u as usize) else {
        return Err(MalformedRecordError::LineOutOfBounds {
            line: line_u,
            lines: file.line_count(),
        });
    };
    if offset_u > length {
        return Err(MalformedRecordError::OffsetOutOfBounds {
            line: line_u,
            offset: offset_u,
            length,
        });
    }
    Ok(TextPointer::new(line_u, offset_u))
}

#[cfg(test)]
#[path = "../tests/src/text_range_tests.rs"]
mod tests;

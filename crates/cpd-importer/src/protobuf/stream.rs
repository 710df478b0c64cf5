use std::io::{BufReader, ErrorKind, Read};

use prost::encoding::decode_varint;

use super::error::{ImportError, Result};

/// Longest valid varint encoding of a `u64`.
const MAX_VARINT_LEN: usize = 10;

/// Reads varint-length-prefixed messages one at a time.
///
/// Tracks the byte offset of everything consumed so errors can point at
/// the message that broke the stream.
pub(crate) struct DelimitedReader<R> {
    reader: BufReader<R>,
    offset: u64,
    max_message_len: u64,
}

impl<R: Read> DelimitedReader<R> {
    pub(crate) fn new(
        reader: R,
        max_message_len: u64,
    ) -> Self {
        Self {
            reader: BufReader::new(reader),
            offset: 0,
            max_message_len,
        }
    }

    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    /// Decode the next message, returning its start offset.
    ///
    /// `Ok(None)` means the stream ended cleanly between two messages.
    pub(crate) fn next_message<M>(&mut self) -> Result<Option<(u64, M)>>
    where
        M: prost::Message + Default,
    {
        let start = self.offset;
        let Some(len) = self.read_length_prefix(start)? else {
            return Ok(None);
        };

        if len > self.max_message_len {
            return Err(ImportError::CorruptStream {
                offset: start,
                reason: format!("declared message length {len} exceeds the limit of {} bytes", self.max_message_len),
            });
        }

        let body = self.read_body(start, len)?;
        let message = M::decode(body.as_slice()).map_err(|error| ImportError::CorruptStream {
            offset: start,
            reason: error.to_string(),
        })?;
        Ok(Some((start, message)))
    }

    /// Pull the prefix bytes one at a time so no body byte is consumed, then
    /// let `prost` decode them.
    fn read_length_prefix(
        &mut self,
        start: u64,
    ) -> Result<Option<u64>> {
        let mut prefix = [0u8; MAX_VARINT_LEN];
        let mut len = 0;
        while len < MAX_VARINT_LEN {
            let Some(byte) = self.read_byte()? else {
                if len == 0 {
                    return Ok(None);
                }
                return Err(ImportError::CorruptStream {
                    offset: start,
                    reason: "stream ends inside a length prefix".to_string(),
                });
            };
            prefix[len] = byte;
            len += 1;
            if byte & 0x80 == 0 {
                break;
            }
        }

        decode_varint(&mut &prefix[..len]).map(Some).map_err(|_| ImportError::CorruptStream {
            offset: start,
            reason: "length prefix is not a valid varint".to_string(),
        })
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(buf[0]));
                },
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(ImportError::Io {
                        offset: self.offset,
                        source,
                    });
                },
            }
        }
    }

    fn read_body(
        &mut self,
        start: u64,
        len: u64,
    ) -> Result<Vec<u8>> {
        // Grow as data arrives rather than trusting the prefix up front.
        let mut body = Vec::with_capacity(len.min(64 * 1024) as usize);
        let read = (&mut self.reader).take(len).read_to_end(&mut body).map_err(|source| ImportError::Io {
            offset: self.offset,
            source,
        })?;
        self.offset += read as u64;
        if (read as u64) < len {
            return Err(ImportError::CorruptStream {
                offset: start,
                reason: format!("message truncated: expected {len} bytes, found {read}"),
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
#[path = "../../tests/src/protobuf/stream_tests.rs"]
mod tests;

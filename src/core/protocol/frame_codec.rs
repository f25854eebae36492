// src/core/protocol/frame_codec.rs

//! Implements delimiter-based framing and the corresponding `Encoder` and
//! `Decoder` for network communication.
//!
//! The wire format has no header: a frame is every byte up to a single
//! configured delimiter byte. Empty frames are skipped, and a frame only
//! becomes visible once its delimiter has arrived, so the decoder yields the
//! same frames no matter how the byte stream was fragmented.

use crate::core::ChatError;
use bytes::{BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// The default frame delimiter.
pub const DEFAULT_DELIMITER: u8 = b';';

/// The default cap on bytes buffered while waiting for a delimiter (10 MiB).
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// A `tokio_util::codec` implementation for delimiter-terminated frames.
#[derive(Debug, Clone)]
pub struct FrameCodec {
    delimiter: u8,
    max_buffer_size: usize,
    /// Offset up to which the buffer is already known to contain no delimiter.
    next_index: usize,
}

impl FrameCodec {
    pub fn new(delimiter: u8, max_buffer_size: usize) -> Self {
        Self {
            delimiter,
            max_buffer_size,
            next_index: 0,
        }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn max_buffer_size(&self) -> usize {
        self.max_buffer_size
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, DEFAULT_MAX_BUFFER_SIZE)
    }
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = ChatError;

    /// Extracts the next non-empty frame from `src`, consuming the frame and its delimiter.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let search_from = self.next_index.min(src.len());
            let Some(offset) = src[search_from..]
                .iter()
                .position(|b| *b == self.delimiter)
            else {
                if src.len() > self.max_buffer_size {
                    return Err(ChatError::FrameTooLong {
                        limit: self.max_buffer_size,
                    });
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let end = search_from + offset;
            self.next_index = 0;
            let mut frame = src.split_to(end + 1);
            frame.truncate(end);

            // Consecutive delimiters produce empty frames, which are dropped here.
            if !frame.is_empty() {
                return Ok(Some(frame.freeze()));
            }
        }
    }

    /// At end of stream, bytes without a trailing delimiter never form a frame.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None => {
                src.clear();
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}

impl Encoder<Bytes> for FrameCodec {
    type Error = ChatError;

    /// Writes the payload followed by exactly one delimiter.
    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(item.len() + 1);
        dst.extend_from_slice(&item);
        dst.put_u8(self.delimiter);
        Ok(())
    }
}

//! Data chunk search.

use std::io::{Read, Seek};

use tracing::{trace, warn};

use super::WaveDecoder;
use crate::error::{DecodeError, DecodeResult};
use crate::header::FourCc;

/// Location of the resolved data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunk {
    /// Offset of the `data` tag.
    pub tag_offset: u64,
    /// Offset of the first payload byte.
    pub payload_offset: u64,
    /// Declared payload size in bytes (never zero).
    pub size: u32,
}

impl<R: Read + Seek> WaveDecoder<R> {
    /// Finds the first `data` chunk at or after `start` with a non-zero size.
    ///
    /// A `data` tag followed by a zero size field is a placeholder; the scan
    /// resumes right after its size field. Leaves the cursor at the payload.
    pub fn locate_data_chunk(&mut self, start: u64) -> DecodeResult<DataChunk> {
        let not_found = || DecodeError::DataChunkNotFound {
            searched_from: start,
        };
        let mut from = start;

        loop {
            let Some(size_offset) = self.find_data_tag(from)? else {
                return Err(not_found());
            };

            let mut size = [0u8; 4];
            if self.read_up_to(&mut size)? < size.len() {
                return Err(not_found());
            }
            let data_size = u32::from_le_bytes(size);
            let tag_offset = size_offset - 4;

            if data_size != 0 {
                trace!(tag_offset, data_size, "found data chunk");
                return Ok(DataChunk {
                    tag_offset,
                    payload_offset: self.position,
                    size: data_size,
                });
            }

            warn!(tag_offset, "skipping zero-length data chunk marker");
            from = self.position;
        }
    }

    /// Scans forward one byte at a time for the `data` tag.
    ///
    /// Overlapping matches are found because the window slides by one byte.
    /// Returns the offset just past the tag, or `None` at end of source.
    fn find_data_tag(&mut self, from: u64) -> DecodeResult<Option<u64>> {
        self.seek_to(from)?;

        let target = FourCc::DATA;
        let mut window = [0u8; 4];
        let mut filled = 0usize;
        let mut byte = [0u8; 1];

        loop {
            if self.read_up_to(&mut byte)? == 0 {
                return Ok(None);
            }
            if filled < window.len() {
                window[filled] = byte[0];
                filled += 1;
            } else {
                window.copy_within(1.., 0);
                window[3] = byte[0];
            }

            if filled == window.len() && &window == target.as_bytes() {
                return Ok(Some(self.position));
            }
        }
    }
}

//! Tolerant WAV decoder.
//!
//! The decoder reads the fixed 36-byte RIFF/fmt header at fixed offsets, then
//! scans byte by byte for a `data` tag whose size field is non-zero, and
//! finally streams the payload one frame at a time into [`SampleBuffers`].
//!
//! It does not walk the chunk list. Files with misaligned chunks, duplicate
//! `data` markers, or zero-length placeholder chunks in front of the real
//! payload still decode, at the cost of trusting the fixed header offsets.

mod search;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, warn};

use crate::buffers::SampleBuffers;
use crate::config::DecodeConfig;
use crate::error::{DecodeError, DecodeResult};
use crate::header::{FourCc, WaveHeader};
use crate::sample::FrameFormat;

pub use search::DataChunk;

/// Length of the fixed RIFF + fmt header.
pub const HEADER_LEN: usize = 36;

/// Upper bound on the up-front buffer reservation, in frames.
const MAX_RESERVED_FRAMES: u64 = 1 << 20;

/// Stateful scanner over a seekable byte source.
#[derive(Debug)]
pub struct WaveDecoder<R> {
    reader: BufReader<R>,
    config: DecodeConfig,
    position: u64,
}

impl WaveDecoder<File> {
    /// Opens a file for decoding.
    pub fn open(path: impl AsRef<Path>, config: DecodeConfig) -> DecodeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            DecodeError::unopenable(format!("opened ({})", path.display()), e)
        })?;
        Ok(Self::new(file, config))
    }
}

impl<R: Read + Seek> WaveDecoder<R> {
    /// Wraps a byte source.
    pub fn new(source: R, config: DecodeConfig) -> Self {
        Self {
            reader: BufReader::new(source),
            config,
            position: 0,
        }
    }

    /// Decode policy in use.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Decodes the whole source into fresh buffers.
    pub fn decode(&mut self, header: &mut WaveHeader) -> DecodeResult<SampleBuffers> {
        let mut buffers = SampleBuffers::new();
        self.decode_into(header, &mut buffers)?;
        Ok(buffers)
    }

    /// Decodes the whole source, clearing and refilling `buffers`.
    ///
    /// On success every file-backed field of `header` is overwritten. On
    /// failure `header` and `buffers` may hold partial results.
    pub fn decode_into(
        &mut self,
        header: &mut WaveHeader,
        buffers: &mut SampleBuffers,
    ) -> DecodeResult<()> {
        buffers.clear();
        self.seek_to(0)?;
        self.read_fixed_header(header)?;

        let chunk = self.locate_data_chunk(HEADER_LEN as u64)?;
        header.data_id = FourCc::DATA;
        header.data_size = chunk.size;
        header.sample_size = header.block_align;

        let frames = self.read_frames(header, chunk.size, buffers)?;
        header.number_of_samples = frames;
        header.duration = duration_seconds(frames, header.sample_rate);

        debug!(
            frames,
            retained = buffers.len(),
            data_offset = chunk.tag_offset,
            data_size = chunk.size,
            duration = header.duration,
            "decoded wave payload"
        );
        Ok(())
    }

    /// Reads bytes 0..36 and fills the RIFF and fmt fields of `header`.
    fn read_fixed_header(&mut self, header: &mut WaveHeader) -> DecodeResult<()> {
        let mut raw = [0u8; HEADER_LEN];
        let read = self.read_up_to(&mut raw)?;
        if read < HEADER_LEN {
            return Err(DecodeError::TruncatedHeader {
                expected: HEADER_LEN,
                actual: read,
            });
        }

        header.riff_id = tag_at(&raw, 0);
        header.chunk_size = u32_at(&raw, 4);
        header.format = tag_at(&raw, 8);
        header.fmt_id = tag_at(&raw, 12);
        header.fmt_size = u32_at(&raw, 16);
        header.audio_format = u16_at(&raw, 20);
        header.channels = u16_at(&raw, 22);
        header.sample_rate = u32_at(&raw, 24);
        header.byte_rate = u32_at(&raw, 28);
        header.block_align = u16_at(&raw, 32);
        header.bits_per_sample = u16_at(&raw, 34);

        if self.config.strict && header.format != FourCc::WAVE {
            return Err(DecodeError::InvalidFormatTag {
                found: header.format,
            });
        }

        let format = FrameFormat::from_block_align(header.block_align);
        if self.config.reject_unsupported_block_align && !format.is_supported() {
            return Err(DecodeError::UnsupportedBlockAlign {
                block_align: header.block_align,
            });
        }

        let expected_align = u32::from(header.channels) * u32::from(header.bits_per_sample / 8);
        if expected_align != u32::from(header.block_align) {
            warn!(
                block_align = header.block_align,
                channels = header.channels,
                bits_per_sample = header.bits_per_sample,
                "block align does not match channels and bit depth"
            );
        }
        if u64::from(header.sample_rate) * u64::from(header.block_align)
            != u64::from(header.byte_rate)
        {
            warn!(
                byte_rate = header.byte_rate,
                sample_rate = header.sample_rate,
                block_align = header.block_align,
                "byte rate does not match sample rate and block align"
            );
        }

        Ok(())
    }

    /// Streams frames from the current position.
    ///
    /// Stops after `data_size` bytes or at end of source, whichever comes
    /// first. Returns the 1-based ordinal of the last frame consumed.
    fn read_frames(
        &mut self,
        header: &WaveHeader,
        data_size: u32,
        buffers: &mut SampleBuffers,
    ) -> DecodeResult<u64> {
        let frame_len = usize::from(header.block_align);
        if frame_len == 0 {
            warn!("block align is zero, payload skipped");
            return Ok(0);
        }

        let format = FrameFormat::from_block_align(header.block_align);
        if !format.is_supported() {
            warn!(
                block_align = header.block_align,
                "unsupported block align, frames yield no samples"
            );
        }

        let decimation = self.config.effective_decimation();
        let time_axis = self.config.time_axis;
        let reserve = (u64::from(data_size) / frame_len as u64 / decimation).min(MAX_RESERVED_FRAMES);
        if format.is_supported() {
            buffers.channel1.reserve(reserve as usize);
            buffers.channel2.reserve(reserve as usize);
            buffers.time.reserve(reserve as usize);
        }

        let mut frame = vec![0u8; frame_len];
        let mut remaining = u64::from(data_size);
        let mut ordinal = 0u64;

        while remaining >= frame_len as u64 {
            if self.read_up_to(&mut frame)? < frame_len {
                break;
            }
            remaining -= frame_len as u64;
            ordinal += 1;

            if ordinal % decimation != 0 {
                continue;
            }
            if let Some((channel1, channel2)) = format.decode_frame(&frame) {
                buffers.push(channel1, channel2, time_axis.value(ordinal, header.sample_rate));
            }
        }

        Ok(ordinal)
    }

    fn seek_to(&mut self, offset: u64) -> DecodeResult<()> {
        self.reader.seek(SeekFrom::Start(offset))?;
        self.position = offset;
        Ok(())
    }

    /// Fills as much of `buf` as the source allows; returns bytes read.
    fn read_up_to(&mut self, buf: &mut [u8]) -> DecodeResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }
}

/// Decodes a seekable byte source.
pub fn decode<R: Read + Seek>(
    source: R,
    header: &mut WaveHeader,
    config: &DecodeConfig,
) -> DecodeResult<SampleBuffers> {
    WaveDecoder::new(source, config.clone()).decode(header)
}

/// Decodes an in-memory WAV image.
pub fn decode_bytes(
    bytes: &[u8],
    header: &mut WaveHeader,
    config: &DecodeConfig,
) -> DecodeResult<SampleBuffers> {
    decode(Cursor::new(bytes), header, config)
}

/// Opens and decodes a WAV file.
pub fn decode_file(
    path: impl AsRef<Path>,
    header: &mut WaveHeader,
    config: &DecodeConfig,
) -> DecodeResult<SampleBuffers> {
    WaveDecoder::open(path, config.clone())?.decode(header)
}

/// Seconds covered by `frames` at `sample_rate`; zero when the rate is zero.
pub fn duration_seconds(frames: u64, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    frames as f64 / f64::from(sample_rate)
}

fn tag_at(raw: &[u8; HEADER_LEN], offset: usize) -> FourCc {
    FourCc::new([raw[offset], raw[offset + 1], raw[offset + 2], raw[offset + 3]])
}

fn u16_at(raw: &[u8; HEADER_LEN], offset: usize) -> u16 {
    u16::from_le_bytes([raw[offset], raw[offset + 1]])
}

fn u32_at(raw: &[u8; HEADER_LEN], offset: usize) -> u32 {
    u32::from_le_bytes([
        raw[offset],
        raw[offset + 1],
        raw[offset + 2],
        raw[offset + 3],
    ])
}

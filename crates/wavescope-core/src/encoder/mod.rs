//! Test-tone WAV encoder.
//!
//! Writes a stereo RIFF/WAVE file in a single streaming pass. The two size
//! fields (`RIFF` size at offset 4 and the `data` size just before the
//! payload) are written as placeholders, then patched once the payload length
//! is known by seeking back to their recorded positions.

mod tone;


use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::decoder::duration_seconds;
use crate::error::{EncodeError, EncodeResult};
use crate::header::{FourCc, WaveHeader};

pub use tone::ToneGenerator;

/// Default sample rate for generated tones.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default tone length in seconds.
pub const DEFAULT_DURATION: f64 = 2.0;
/// Default peak amplitude, in 16-bit units.
pub const DEFAULT_MAX_AMPLITUDE: i32 = 32760;
/// Default tone frequency in Hz.
pub const DEFAULT_FREQUENCY: f64 = 250.0;

/// Written where a size field will be patched later.
const SIZE_PLACEHOLDER: [u8; 4] = *b"----";

/// Length of everything before the payload.
const PREAMBLE_LEN: u64 = 44;

/// On-disk sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleEncoding {
    Pcm16,
    Pcm24,
    Float32,
}

impl SampleEncoding {
    fn from_bits(bits_per_sample: u16) -> Option<Self> {
        match bits_per_sample {
            16 => Some(SampleEncoding::Pcm16),
            24 => Some(SampleEncoding::Pcm24),
            32 => Some(SampleEncoding::Float32),
            _ => None,
        }
    }

    fn audio_format(self) -> u16 {
        match self {
            SampleEncoding::Pcm16 | SampleEncoding::Pcm24 => 1,
            SampleEncoding::Float32 => 3,
        }
    }

    fn bytes_per_sample(self) -> u16 {
        match self {
            SampleEncoding::Pcm16 => 2,
            SampleEncoding::Pcm24 => 3,
            SampleEncoding::Float32 => 4,
        }
    }

    /// Writes one sample given in 16-bit units.
    fn write<W: Write>(self, writer: &mut W, value: f64) -> EncodeResult<()> {
        match self {
            SampleEncoding::Pcm16 => {
                let sample = value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i32;
                write_int_le(writer, sample, 2)
            }
            SampleEncoding::Pcm24 => {
                let sample = (value * 256.0).round().clamp(-8_388_608.0, 8_388_607.0) as i32;
                write_int_le(writer, sample, 3)
            }
            SampleEncoding::Float32 => {
                let sample = (value / 32768.0) as f32;
                writer.write_all(&sample.to_le_bytes())?;
                Ok(())
            }
        }
    }
}

/// Writes the low `width` bytes of `value`, least significant first.
fn write_int_le<W: Write>(writer: &mut W, value: i32, width: usize) -> EncodeResult<()> {
    let bytes = value.to_le_bytes();
    writer.write_all(&bytes[..width])?;
    Ok(())
}

/// Checks the template and returns its encoding, byte rate and frame count.
fn validate_template(template: &WaveHeader) -> EncodeResult<(SampleEncoding, u32, u64)> {
    if template.channels != 2 {
        return Err(EncodeError::invalid_template(
            "channels",
            format!("tone files are stereo, got {} channels", template.channels),
        ));
    }
    if template.sample_rate == 0 {
        return Err(EncodeError::invalid_template("sample_rate", "must be non-zero"));
    }
    let encoding = SampleEncoding::from_bits(template.bits_per_sample).ok_or_else(|| {
        EncodeError::invalid_template(
            "bits_per_sample",
            format!("expected 16, 24 or 32, got {}", template.bits_per_sample),
        )
    })?;
    if !template.duration.is_finite() || template.duration < 0.0 {
        return Err(EncodeError::invalid_template(
            "duration",
            format!("must be a non-negative number of seconds, got {}", template.duration),
        ));
    }
    if !template.frequency.is_finite() || template.frequency < 0.0 {
        return Err(EncodeError::invalid_template(
            "frequency",
            format!("must be a non-negative frequency, got {}", template.frequency),
        ));
    }
    if !(0..=i32::from(i16::MAX)).contains(&template.max_amplitude) {
        return Err(EncodeError::invalid_template(
            "max_amplitude",
            format!("must be within 0..=32767, got {}", template.max_amplitude),
        ));
    }

    let block_align = 2 * encoding.bytes_per_sample();
    let byte_rate = template
        .sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| {
            EncodeError::invalid_template(
                "sample_rate",
                format!(
                    "byte rate of {} Hz at {} bytes per frame does not fit in 32 bits",
                    template.sample_rate, block_align
                ),
            )
        })?;

    let frames = (f64::from(template.sample_rate) * template.duration).round() as u64;
    let frame_len = u64::from(block_align);
    let max_payload = u64::from(u32::MAX) - (PREAMBLE_LEN - 8);
    if frames.saturating_mul(frame_len) > max_payload {
        return Err(EncodeError::invalid_template(
            "duration",
            "payload would not fit in a 32-bit size field",
        ));
    }

    Ok((encoding, byte_rate, frames))
}

/// Streams a test-tone WAV file into `writer`.
///
/// The template supplies the sample rate, bit depth (16, 24 or 32-bit float),
/// duration, frequency and peak amplitude. Derived fields in the template are
/// ignored and recomputed. Returns the header of the file that was written.
///
/// # Arguments
/// * `writer` - Seekable output, positioned where the file should start
/// * `template` - Tone parameters
pub fn encode<W: Write + Seek>(writer: &mut W, template: &WaveHeader) -> EncodeResult<WaveHeader> {
    let (encoding, byte_rate, frames) = validate_template(template)?;

    let channels = 2u16;
    let block_align = channels * encoding.bytes_per_sample();

    let start = writer.stream_position()?;

    // RIFF chunk
    writer.write_all(FourCc::RIFF.as_bytes())?;
    let riff_size_pos = writer.stream_position()?;
    writer.write_all(&SIZE_PLACEHOLDER)?;
    writer.write_all(FourCc::WAVE.as_bytes())?;

    // fmt sub-chunk
    writer.write_all(FourCc::FMT.as_bytes())?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&encoding.audio_format().to_le_bytes())?;
    writer.write_all(&channels.to_le_bytes())?;
    writer.write_all(&template.sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&template.bits_per_sample.to_le_bytes())?;

    // data sub-chunk
    writer.write_all(FourCc::DATA.as_bytes())?;
    let data_size_pos = writer.stream_position()?;
    writer.write_all(&SIZE_PLACEHOLDER)?;
    let payload_start = writer.stream_position()?;

    let tone = ToneGenerator::new(
        template.sample_rate,
        template.frequency,
        template.max_amplitude,
        frames,
    );
    for (channel1, channel2) in tone {
        encoding.write(writer, channel1)?;
        encoding.write(writer, channel2)?;
    }
    let end = writer.stream_position()?;

    let data_size = size_field(end - payload_start)?;
    let riff_size = size_field(end - start - 8)?;

    writer.seek(SeekFrom::Start(data_size_pos))?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.seek(SeekFrom::Start(riff_size_pos))?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.seek(SeekFrom::Start(end))?;
    writer.flush()?;

    debug!(frames, data_size, riff_size, "encoded test tone");

    Ok(WaveHeader {
        riff_id: FourCc::RIFF,
        chunk_size: riff_size,
        format: FourCc::WAVE,
        fmt_id: FourCc::FMT,
        fmt_size: 16,
        audio_format: encoding.audio_format(),
        channels,
        sample_rate: template.sample_rate,
        byte_rate,
        block_align,
        bits_per_sample: template.bits_per_sample,
        data_id: FourCc::DATA,
        data_size,
        sample_size: block_align,
        number_of_samples: frames,
        duration: duration_seconds(frames, template.sample_rate),
        max_amplitude: template.max_amplitude,
        frequency: template.frequency,
    })
}

fn size_field(len: u64) -> EncodeResult<u32> {
    u32::try_from(len).map_err(|_| {
        EncodeError::invalid_template("duration", "payload would not fit in a 32-bit size field")
    })
}

/// Encodes a test tone into a byte vector.
pub fn encode_to_vec(template: &WaveHeader) -> EncodeResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    encode(&mut cursor, template)?;
    Ok(cursor.into_inner())
}

/// Encodes a test tone into a file, creating or truncating it.
pub fn encode_file(path: impl AsRef<Path>, template: &WaveHeader) -> EncodeResult<WaveHeader> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer, template)
}

/// Template for the default 2-second 250 Hz test tone.
pub fn default_tone_template() -> WaveHeader {
    WaveHeader::tone_template(
        DEFAULT_SAMPLE_RATE,
        DEFAULT_DURATION,
        DEFAULT_FREQUENCY,
        DEFAULT_MAX_AMPLITUDE,
    )
}

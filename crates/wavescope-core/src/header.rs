//! Wave header model.
//!
//! [`WaveHeader`] is a plain value type holding the RIFF/WAVE header fields
//! and the metadata derived from them. It has no parsing behavior of its own:
//! the decoder populates it in place and the encoder reads it as a template.

use std::fmt;

use serde::{Serialize, Serializer};

/// A four-character chunk tag such as `RIFF` or `data`.
///
/// The all-zero value is the empty tag used by a reset header.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FourCc([u8; 4]);

impl FourCc {
    /// `RIFF` container tag.
    pub const RIFF: FourCc = FourCc(*b"RIFF");
    /// `WAVE` form type.
    pub const WAVE: FourCc = FourCc(*b"WAVE");
    /// `fmt ` sub-chunk tag.
    pub const FMT: FourCc = FourCc(*b"fmt ");
    /// `data` sub-chunk tag.
    pub const DATA: FourCc = FourCc(*b"data");

    /// Wraps four raw bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Builds a tag from the first four bytes of `bytes`.
    ///
    /// Returns `None` if fewer than four bytes are given.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let tag: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        Some(Self(tag))
    }

    /// Raw tag bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Whether this is the empty (all-zero) tag.
    pub fn is_empty(&self) -> bool {
        self.0 == [0; 4]
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        for &byte in &self.0 {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc(\"{}\")", self)
    }
}

impl Serialize for FourCc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parsed or templated WAV header plus derived metadata.
///
/// A default-constructed header is the reset state: every number is zero and
/// every tag is empty. A successful decode overwrites every file-backed field.
/// After a failed decode the header may be partially written and should be
/// discarded (see [`crate::WaveSession`] for a wrapper that does this).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaveHeader {
    // RIFF chunk
    /// Container tag, `RIFF` in a well-formed file.
    pub riff_id: FourCc,
    /// Overall chunk size (file length minus 8).
    pub chunk_size: u32,
    /// Form type, `WAVE` in a well-formed file.
    pub format: FourCc,

    // fmt sub-chunk
    /// Format sub-chunk tag, `fmt ` in a well-formed file.
    pub fmt_id: FourCc,
    /// Format sub-chunk size, 16 for PCM.
    pub fmt_size: u32,
    /// Audio format code (1 = integer PCM, 3 = IEEE float).
    pub audio_format: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per frame across all channels.
    pub block_align: u16,
    /// Bits per sample per channel.
    pub bits_per_sample: u16,

    // data sub-chunk
    /// Data sub-chunk tag, `data` once located.
    pub data_id: FourCc,
    /// Payload length in bytes.
    pub data_size: u32,

    // Derived
    /// Bytes per frame.
    pub sample_size: u16,
    /// Frames consumed from the payload.
    pub number_of_samples: u64,
    /// Duration in seconds.
    pub duration: f64,

    // Tone synthesis (encoder templates only)
    /// Peak amplitude of the synthesized tone, in 16-bit sample units.
    pub max_amplitude: i32,
    /// Frequency of the synthesized tone in Hz.
    pub frequency: f64,
}

impl WaveHeader {
    /// Creates an empty header in the reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores every field to zero/empty.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the header is in the reset state.
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }

    /// Creates an encoder template for a 16-bit stereo test tone.
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `duration` - Length of the tone in seconds
    /// * `frequency` - Tone frequency in Hz
    /// * `max_amplitude` - Peak amplitude in 16-bit units
    pub fn tone_template(sample_rate: u32, duration: f64, frequency: f64, max_amplitude: i32) -> Self {
        Self {
            audio_format: 1,
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
            duration,
            max_amplitude,
            frequency,
            ..Self::default()
        }
    }

    /// Returns the template with a different sample depth (16, 24 or 32).
    pub fn with_bits_per_sample(mut self, bits_per_sample: u16) -> Self {
        self.bits_per_sample = bits_per_sample;
        self
    }
}

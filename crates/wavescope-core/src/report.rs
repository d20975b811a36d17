//! Header field dump.

use serde::Serialize;

use crate::buffers::SampleBuffers;
use crate::header::WaveHeader;

/// Display-ready summary of a decoded file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderReport {
    /// RIFF tag as read.
    pub riff_id: String,
    /// RIFF size field.
    pub chunk_size: u32,
    /// Format tag, `WAVE` in well-formed files.
    pub format: String,
    /// fmt sub-chunk tag.
    pub fmt_id: String,
    /// fmt sub-chunk size.
    pub fmt_size: u32,
    /// Audio format code.
    pub audio_format: u16,
    /// Channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per frame.
    pub block_align: u16,
    /// Bits per sample per channel.
    pub bits_per_sample: u16,
    /// Data sub-chunk tag.
    pub data_id: String,
    /// Declared payload size in bytes.
    pub data_size: u32,
    /// Bytes per frame used while decoding.
    pub sample_size: u16,
    /// Frames consumed from the payload.
    pub number_of_samples: u64,
    /// Duration in seconds.
    pub duration_seconds: f64,
    /// Frames kept after decimation.
    pub retained_samples: usize,
    /// Largest absolute channel 1 amplitude.
    pub peak_channel1: f32,
    /// Largest absolute channel 2 amplitude.
    pub peak_channel2: f32,
}

impl HeaderReport {
    /// Builds a report from a header and its decoded samples.
    pub fn new(header: &WaveHeader, samples: &SampleBuffers) -> Self {
        Self {
            riff_id: header.riff_id.to_string(),
            chunk_size: header.chunk_size,
            format: header.format.to_string(),
            fmt_id: header.fmt_id.to_string(),
            fmt_size: header.fmt_size,
            audio_format: header.audio_format,
            channels: header.channels,
            sample_rate: header.sample_rate,
            byte_rate: header.byte_rate,
            block_align: header.block_align,
            bits_per_sample: header.bits_per_sample,
            data_id: header.data_id.to_string(),
            data_size: header.data_size,
            sample_size: header.sample_size,
            number_of_samples: header.number_of_samples,
            duration_seconds: header.duration,
            retained_samples: samples.len(),
            peak_channel1: samples.peak_channel1(),
            peak_channel2: samples.peak_channel2(),
        }
    }

    /// `(label, value)` rows in file order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("RIFF id", self.riff_id.clone()),
            ("Chunk size", self.chunk_size.to_string()),
            ("Format", self.format.clone()),
            ("Subchunk1 id", self.fmt_id.clone()),
            ("Subchunk1 size", self.fmt_size.to_string()),
            ("Audio format", audio_format_label(self.audio_format)),
            ("Num channels", self.channels.to_string()),
            ("Sample rate", format!("{} Hz", self.sample_rate)),
            ("Byte rate", self.byte_rate.to_string()),
            ("Block align", self.block_align.to_string()),
            ("Bits per sample", self.bits_per_sample.to_string()),
            ("Subchunk2 id", self.data_id.clone()),
            ("Subchunk2 size (bytes)", self.data_size.to_string()),
            ("Sample size", self.sample_size.to_string()),
            ("Number of samples", self.number_of_samples.to_string()),
            ("Duration", format!("{:.6} s", self.duration_seconds)),
            ("Retained samples", self.retained_samples.to_string()),
            ("Peak (channel 1)", format!("{}", self.peak_channel1)),
            ("Peak (channel 2)", format!("{}", self.peak_channel2)),
        ]
    }
}

fn audio_format_label(code: u16) -> String {
    match code {
        1 => "1 (PCM)".to_string(),
        3 => "3 (IEEE float)".to_string(),
        other => other.to_string(),
    }
}

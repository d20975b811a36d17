//! Decode configuration.
//!
//! One [`DecodeConfig`] value covers every decode policy knob: decimation,
//! tag strictness, handling of unknown frame layouts, and the unit of the
//! time-index sequence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit of the values written to the time-index sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeAxis {
    /// 1-based ordinal of the frame within the payload.
    #[default]
    FrameOrdinal,
    /// Frame ordinal divided by the sample rate.
    Seconds,
}

impl TimeAxis {
    /// Time value for a 1-based frame ordinal.
    pub fn value(self, ordinal: u64, sample_rate: u32) -> f32 {
        match self {
            TimeAxis::FrameOrdinal => ordinal as f32,
            TimeAxis::Seconds if sample_rate == 0 => 0.0,
            TimeAxis::Seconds => (ordinal as f64 / sample_rate as f64) as f32,
        }
    }
}

impl FromStr for TimeAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frame_ordinal" | "ordinal" => Ok(TimeAxis::FrameOrdinal),
            "seconds" => Ok(TimeAxis::Seconds),
            other => Err(format!("unknown time axis '{}'", other)),
        }
    }
}

/// Decoder policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Keep only frames whose 1-based ordinal is divisible by this value.
    /// Zero is treated as 1.
    pub decimation: u32,
    /// Fail with `InvalidFormatTag` unless bytes 8..12 read "WAVE".
    pub strict: bool,
    /// Fail with `UnsupportedBlockAlign` instead of yielding no samples.
    pub reject_unsupported_block_align: bool,
    /// Unit of the time-index sequence.
    pub time_axis: TimeAxis,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            decimation: 1,
            strict: false,
            reject_unsupported_block_align: false,
            time_axis: TimeAxis::FrameOrdinal,
        }
    }
}

impl DecodeConfig {
    /// Decimation applied by the preview profile.
    pub const PREVIEW_DECIMATION: u32 = 4;

    /// Full-resolution tolerant decode.
    pub fn full() -> Self {
        Self::default()
    }

    /// Decimated decode for plotting large files.
    pub fn preview() -> Self {
        Self {
            decimation: Self::PREVIEW_DECIMATION,
            ..Self::default()
        }
    }

    /// Full-resolution decode that rejects bad tags and unknown layouts.
    pub fn strict() -> Self {
        Self {
            strict: true,
            reject_unsupported_block_align: true,
            ..Self::default()
        }
    }

    /// Sets the decimation factor, normalizing 0 to 1.
    pub fn with_decimation(mut self, decimation: u32) -> Self {
        self.decimation = decimation.max(1);
        self
    }

    /// Sets the WAVE tag check.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the time-index unit.
    pub fn with_time_axis(mut self, time_axis: TimeAxis) -> Self {
        self.time_axis = time_axis;
        self
    }

    /// Effective decimation factor (never zero).
    pub fn effective_decimation(&self) -> u64 {
        u64::from(self.decimation.max(1))
    }
}

/// Named decode profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeProfile {
    /// See [`DecodeConfig::full`].
    #[default]
    Full,
    /// See [`DecodeConfig::preview`].
    Preview,
    /// See [`DecodeConfig::strict`].
    Strict,
}

impl DecodeProfile {
    /// Profile names accepted by [`FromStr`].
    pub const NAMES: [&'static str; 3] = ["full", "preview", "strict"];

    /// Builds the configuration for this profile.
    pub fn config(self) -> DecodeConfig {
        match self {
            DecodeProfile::Full => DecodeConfig::full(),
            DecodeProfile::Preview => DecodeConfig::preview(),
            DecodeProfile::Strict => DecodeConfig::strict(),
        }
    }

    /// Profile name.
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeProfile::Full => "full",
            DecodeProfile::Preview => "preview",
            DecodeProfile::Strict => "strict",
        }
    }
}

impl fmt::Display for DecodeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecodeProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(DecodeProfile::Full),
            "preview" => Ok(DecodeProfile::Preview),
            "strict" => Ok(DecodeProfile::Strict),
            other => Err(format!(
                "unknown profile '{}', expected one of: {}",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

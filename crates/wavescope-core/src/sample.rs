//! Frame layouts and little-endian sample assembly.
//!
//! Each function turns a fixed number of little-endian bytes into a number
//! without reinterpreting memory.

/// Assembles a signed 16-bit sample.
pub fn i16_from_le(bytes: [u8; 2]) -> i16 {
    i16::from_le_bytes(bytes)
}

/// Assembles a signed 24-bit sample as `low | mid << 8 | high << 16`,
/// sign-extended to 32 bits.
pub fn i24_from_le(bytes: [u8; 3]) -> i32 {
    let raw = (bytes[0] as i32) | ((bytes[1] as i32) << 8) | ((bytes[2] as i32) << 16);
    (raw << 8) >> 8
}

/// Assembles an IEEE-754 single-precision sample.
pub fn f32_from_le(bytes: [u8; 4]) -> f32 {
    f32::from_le_bytes(bytes)
}

/// Stereo frame layouts, keyed by block align.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// 4-byte frames: two signed 16-bit integers.
    Pcm16Stereo,
    /// 6-byte frames: two signed 24-bit integers.
    Pcm24Stereo,
    /// 8-byte frames: two 32-bit floats.
    Float32Stereo,
    /// Any other block align; frames yield no samples.
    Unsupported(u16),
}

impl FrameFormat {
    /// Picks the layout for a block align.
    pub fn from_block_align(block_align: u16) -> Self {
        match block_align {
            4 => FrameFormat::Pcm16Stereo,
            6 => FrameFormat::Pcm24Stereo,
            8 => FrameFormat::Float32Stereo,
            other => FrameFormat::Unsupported(other),
        }
    }

    /// Whether frames of this layout produce samples.
    pub fn is_supported(&self) -> bool {
        !matches!(self, FrameFormat::Unsupported(_))
    }

    /// Decodes one frame into `(channel1, channel2)`.
    ///
    /// The frame is split at its midpoint. Returns `None` for unsupported
    /// layouts or when `frame` is shorter than the layout requires.
    pub fn decode_frame(&self, frame: &[u8]) -> Option<(f32, f32)> {
        match self {
            FrameFormat::Pcm16Stereo => {
                let left = i16_from_le(frame.get(0..2)?.try_into().ok()?);
                let right = i16_from_le(frame.get(2..4)?.try_into().ok()?);
                Some((left as f32, right as f32))
            }
            FrameFormat::Pcm24Stereo => {
                let left = i24_from_le(frame.get(0..3)?.try_into().ok()?);
                let right = i24_from_le(frame.get(3..6)?.try_into().ok()?);
                Some((left as f32, right as f32))
            }
            FrameFormat::Float32Stereo => {
                let left = f32_from_le(frame.get(0..4)?.try_into().ok()?);
                let right = f32_from_le(frame.get(4..8)?.try_into().ok()?);
                Some((left, right))
            }
            FrameFormat::Unsupported(_) => None,
        }
    }
}

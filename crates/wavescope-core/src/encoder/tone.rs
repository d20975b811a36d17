//! Ramped stereo sine generator.

use std::f64::consts::TAU;

/// Iterator over synthesized stereo frames, in 16-bit sample units.
///
/// Channel 1 is a sine whose amplitude ramps linearly from 0 up to
/// `max_amplitude`; channel 2 uses the inverse ramp.
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    sample_rate: f64,
    frequency: f64,
    max_amplitude: f64,
    total_frames: u64,
    index: u64,
}

impl ToneGenerator {
    /// Creates a generator for `total_frames` frames.
    pub fn new(sample_rate: u32, frequency: f64, max_amplitude: i32, total_frames: u64) -> Self {
        Self {
            sample_rate: f64::from(sample_rate),
            frequency,
            max_amplitude: f64::from(max_amplitude),
            total_frames,
            index: 0,
        }
    }

    fn frame(&self, i: u64) -> (f64, f64) {
        let ramp = i as f64 / self.total_frames as f64 * self.max_amplitude;
        let value = (TAU * self.frequency * i as f64 / self.sample_rate).sin();
        (ramp * value, (self.max_amplitude - ramp) * value)
    }
}

impl Iterator for ToneGenerator {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total_frames {
            return None;
        }
        let frame = self.frame(self.index);
        self.index += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_frames - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ToneGenerator {}

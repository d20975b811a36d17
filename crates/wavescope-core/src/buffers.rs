//! Decoded sample sequences.

use serde::Serialize;

/// Per-channel samples and the matching time index.
///
/// The three sequences always have the same length: entry `i` of each
/// belongs to the same retained frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleBuffers {
    /// Channel 1 amplitudes.
    pub channel1: Vec<f32>,
    /// Channel 2 amplitudes.
    pub channel2: Vec<f32>,
    /// Time index of each retained frame.
    pub time: Vec<f32>,
}

impl SampleBuffers {
    /// Creates empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties all three sequences.
    pub fn clear(&mut self) {
        self.channel1.clear();
        self.channel2.clear();
        self.time.clear();
    }

    /// Number of retained frames.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether no frames were retained.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub(crate) fn push(&mut self, channel1: f32, channel2: f32, time: f32) {
        self.channel1.push(channel1);
        self.channel2.push(channel2);
        self.time.push(time);
    }

    /// Largest absolute amplitude on channel 1.
    pub fn peak_channel1(&self) -> f32 {
        peak(&self.channel1)
    }

    /// Largest absolute amplitude on channel 2.
    pub fn peak_channel2(&self) -> f32 {
        peak(&self.channel2)
    }

    /// Iterates `(time, channel1, channel2)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        self.time
            .iter()
            .zip(&self.channel1)
            .zip(&self.channel2)
            .map(|((&t, &c1), &c2)| (t, c1, c2))
    }
}

fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .filter(|s| s.is_finite())
        .fold(0.0f32, |acc, &s| acc.max(s.abs()))
}

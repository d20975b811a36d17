//! Generate command implementation
//!
//! Writes a stereo test tone that exercises every decoder format path.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use wavescope_core::{encode_file, WaveHeader};

/// Tone parameters from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneParams {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Length in seconds
    pub duration: f64,
    /// Tone frequency in Hz
    pub frequency: f64,
    /// Peak amplitude in 16-bit units
    pub amplitude: i32,
    /// Bits per sample (16, 24 or 32)
    pub bits: u16,
}

impl ToneParams {
    /// Encoder template for these parameters.
    pub fn template(&self) -> WaveHeader {
        WaveHeader::tone_template(self.sample_rate, self.duration, self.frequency, self.amplitude)
            .with_bits_per_sample(self.bits)
    }
}

/// Run the generate command
///
/// # Arguments
/// * `output_path` - Path of the WAV file to write
/// * `params` - Tone parameters
pub fn run(output_path: &str, params: &ToneParams) -> Result<ExitCode> {
    let header = encode_file(output_path, &params.template())
        .with_context(|| format!("Failed to generate tone: {}", output_path))?;

    println!("{} {}", "Generated:".green().bold(), output_path);
    println!(
        "  {} frames, {} Hz, {}-bit, {} bytes of samples",
        header.number_of_samples, header.sample_rate, header.bits_per_sample, header.data_size
    );

    Ok(ExitCode::SUCCESS)
}

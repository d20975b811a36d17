//! Export command implementation
//!
//! Writes the decoded plot data as CSV with one row per retained frame.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

use wavescope_core::{decode_file, SampleBuffers, WaveHeader};

use super::options::DecodeArgs;

/// CSV header row.
pub const CSV_HEADER: &str = "time,channel1,channel2";

/// Run the export command
///
/// # Arguments
/// * `input_path` - Path to the WAV file
/// * `output_path` - Path of the CSV file to write
/// * `options` - Decode profile and overrides
pub fn run(input_path: &str, output_path: &str, options: &DecodeArgs) -> Result<ExitCode> {
    let config = options.resolve()?;

    let mut header = WaveHeader::new();
    let samples = decode_file(input_path, &mut header, &config)
        .with_context(|| format!("Failed to decode: {}", input_path))?;

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, &samples)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write to: {}", output_path))?;

    println!(
        "{} {} of {} frames to {}",
        "Exported".green().bold(),
        samples.len(),
        header.number_of_samples,
        output_path
    );

    Ok(ExitCode::SUCCESS)
}

/// Writes `time,channel1,channel2` rows.
pub fn write_csv<W: Write>(writer: &mut W, samples: &SampleBuffers) -> std::io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for (time, channel1, channel2) in samples.rows() {
        writeln!(writer, "{},{},{}", time, channel1, channel2)?;
    }
    Ok(())
}

//! Inspect command implementation
//!
//! Decodes a WAV file and prints its header field dump, either as colored
//! text or as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use wavescope_core::WaveSession;

use super::json_output::{error_codes, InspectOutput, InspectResult, JsonError};
use super::options::DecodeArgs;

/// Run the inspect command
///
/// # Arguments
/// * `input_path` - Path to the WAV file
/// * `options` - Decode profile and overrides
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input_path: &str, options: &DecodeArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input_path, options)
    } else {
        run_human(input_path, options)
    }
}

/// Run inspect with human-readable (colored) output
fn run_human(input_path: &str, options: &DecodeArgs) -> Result<ExitCode> {
    let config = options.resolve()?;

    println!("{} {}", "Inspecting:".cyan().bold(), input_path);

    let input_hash =
        hash_file(input_path).with_context(|| format!("Failed to read file: {}", input_path))?;
    println!("{} {}", "Hash:".dimmed(), &input_hash[..16]);

    let mut session = WaveSession::new();
    session
        .load_file(input_path, &config)
        .with_context(|| format!("Failed to decode: {}", input_path))?;

    let rows = session.report().rows();
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    println!();
    for (label, value) in rows {
        println!("  {}  {}", format!("{:<width$}", label).dimmed(), value);
    }

    Ok(ExitCode::SUCCESS)
}

/// Run inspect with machine-readable JSON output
fn run_json(input_path: &str, options: &DecodeArgs) -> Result<ExitCode> {
    let output = inspect_output(input_path, options);
    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Builds the JSON document for `inspect --json`.
pub fn inspect_output(input_path: &str, options: &DecodeArgs) -> InspectOutput {
    let config = match options.resolve() {
        Ok(config) => config,
        Err(e) => {
            let error = JsonError::new(error_codes::INVALID_CONFIG, format!("{:#}", e));
            return InspectOutput::failure(vec![error]);
        }
    };

    let input_hash = match hash_file(input_path) {
        Ok(hash) => hash,
        Err(e) => {
            let error = JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read file: {}", e),
            )
            .with_file(input_path);
            return InspectOutput::failure(vec![error]);
        }
    };

    let mut session = WaveSession::new();
    if let Err(e) = session.load_file(input_path, &config) {
        let error = JsonError::from_decode(&e).with_file(input_path);
        return InspectOutput::failure(vec![error]);
    }

    InspectOutput::success(InspectResult {
        input: input_path.to_string(),
        input_hash,
        config,
        header: session.report(),
    })
}

/// BLAKE3 hash of a file, streamed rather than read into memory.
pub fn hash_file(path: impl AsRef<Path>) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    hasher.update_reader(File::open(path)?)?;
    Ok(hasher.finalize().to_hex().to_string())
}

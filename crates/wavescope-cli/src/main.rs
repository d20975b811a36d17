//! Wavescope CLI - Command-line interface for tolerant WAV inspection
//!
//! This binary inspects WAV headers, exports decoded samples for plotting,
//! and generates test tones.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use wavescope_cli::commands;
use wavescope_cli::commands::generate::ToneParams;
use wavescope_cli::commands::options::DecodeArgs;
use wavescope_cli::logging;
use wavescope_core::encoder::{
    DEFAULT_DURATION, DEFAULT_FREQUENCY, DEFAULT_MAX_AMPLITUDE, DEFAULT_SAMPLE_RATE,
};

/// Wavescope - Tolerant WAV decoding and inspection
#[derive(Parser)]
#[command(name = "wavescope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (WAVESCOPE_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a WAV file and print its header fields
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Decode a WAV file and write its samples as CSV
    Export {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Path of the CSV file to write
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Write a stereo test tone
    Generate {
        /// Path of the WAV file to write
        #[arg(short, long)]
        output: String,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Length in seconds
        #[arg(long, default_value_t = DEFAULT_DURATION)]
        duration: f64,

        /// Tone frequency in Hz
        #[arg(long, default_value_t = DEFAULT_FREQUENCY)]
        frequency: f64,

        /// Peak amplitude in 16-bit units
        #[arg(long, default_value_t = DEFAULT_MAX_AMPLITUDE)]
        amplitude: i32,

        /// Bits per sample (16, 24 or 32 for float)
        #[arg(long, default_value_t = 16)]
        bits: u16,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Inspect {
            input,
            json,
            decode,
        } => commands::inspect::run(&input, &decode, json),
        Commands::Export {
            input,
            output,
            decode,
        } => commands::export::run(&input, &output, &decode),
        Commands::Generate {
            output,
            sample_rate,
            duration,
            frequency,
            amplitude,
            bits,
        } => commands::generate::run(
            &output,
            &ToneParams {
                sample_rate,
                duration,
                frequency,
                amplitude,
                bits,
            },
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

//! Wavescope Core
//!
//! Tolerant RIFF/WAVE decoding for waveform viewers, plus a small test-tone
//! encoder for fixtures.
//!
//! # Overview
//!
//! The decoder is built for files that a strict chunk walker would reject:
//!
//! - **Displaced `data` chunks** - the payload is located by a byte-by-byte
//!   scan, so misaligned chunk boundaries are not a problem
//! - **Placeholder chunks** - a `data` tag with a zero size is skipped and the
//!   scan continues to the real payload
//! - **Several depths** - 16-bit and 24-bit integer PCM and 32-bit float
//!   stereo frames decode to `f32` channel sequences
//!
//! Output is a populated [`WaveHeader`] and a [`SampleBuffers`] holding
//! channel 1, channel 2 and a time index, optionally decimated for plotting.
//!
//! # Example
//!
//! ```no_run
//! use wavescope_core::{decode_file, DecodeConfig, WaveHeader};
//!
//! let mut header = WaveHeader::new();
//! let samples = decode_file("music.wav", &mut header, &DecodeConfig::preview())?;
//!
//! println!("{} Hz, {} frames", header.sample_rate, header.number_of_samples);
//! println!("plotting {} points", samples.len());
//! # Ok::<(), wavescope_core::DecodeError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`header`] - Wave header model
//! - [`decoder`] - Tolerant decoder and data chunk search
//! - [`encoder`] - Test-tone encoder with size-field backpatching
//! - [`sample`] - Frame layouts and little-endian sample assembly
//! - [`config`] - Decode policy and named profiles
//! - [`session`] - Owned header/samples with reset semantics
//! - [`report`] - Header field dump

pub mod buffers;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod header;
pub mod report;
pub mod sample;
pub mod session;

// Re-export main types at crate root
pub use buffers::SampleBuffers;
pub use config::{DecodeConfig, DecodeProfile, TimeAxis};
pub use decoder::{decode, decode_bytes, decode_file, WaveDecoder};
pub use encoder::{encode, encode_file, encode_to_vec, ToneGenerator};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use header::{FourCc, WaveHeader};
pub use report::HeaderReport;
pub use session::WaveSession;

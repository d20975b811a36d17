//! Owned header and sample buffers for a viewer.
//!
//! A [`WaveSession`] is what a front end holds between redraws: it never
//! exposes a partially decoded header, because a failed load resets it.

use std::io::{Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::buffers::SampleBuffers;
use crate::config::DecodeConfig;
use crate::decoder::WaveDecoder;
use crate::error::DecodeResult;
use crate::header::WaveHeader;
use crate::report::HeaderReport;

/// Header and samples of the currently loaded file.
#[derive(Debug, Clone, Default)]
pub struct WaveSession {
    header: WaveHeader,
    samples: SampleBuffers,
    loaded: bool,
}

impl WaveSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `source`, replacing whatever was loaded.
    pub fn load<R: Read + Seek>(&mut self, source: R, config: &DecodeConfig) -> DecodeResult<()> {
        let decoder = WaveDecoder::new(source, config.clone());
        self.load_with(decoder)
    }

    /// Opens and decodes a file, replacing whatever was loaded.
    pub fn load_file(&mut self, path: impl AsRef<Path>, config: &DecodeConfig) -> DecodeResult<()> {
        // Clears the previous file even when `open` fails below.
        self.reset();
        let decoder = WaveDecoder::open(path, config.clone())?;
        self.load_with(decoder)
    }

    fn load_with<R: Read + Seek>(&mut self, mut decoder: WaveDecoder<R>) -> DecodeResult<()> {
        self.reset();
        match decoder.decode_into(&mut self.header, &mut self.samples) {
            Ok(()) => {
                self.loaded = true;
                debug!(frames = self.samples.len(), "session loaded");
                Ok(())
            }
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    /// Clears the header and all sample sequences.
    pub fn reset(&mut self) {
        self.header.reset();
        self.samples.clear();
        self.loaded = false;
    }

    /// Whether a file is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Header of the loaded file (reset when nothing is loaded).
    pub fn header(&self) -> &WaveHeader {
        &self.header
    }

    /// Samples of the loaded file (empty when nothing is loaded).
    pub fn samples(&self) -> &SampleBuffers {
        &self.samples
    }

    /// Field dump of the loaded file.
    pub fn report(&self) -> HeaderReport {
        HeaderReport::new(&self.header, &self.samples)
    }
}

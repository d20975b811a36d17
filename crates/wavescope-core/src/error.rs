//! Error types for decoding and encoding.

use std::io;

use thiserror::Error;

use crate::header::FourCc;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encode operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while decoding a WAV byte source.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source ended before the fixed 36-byte header.
    #[error("truncated header: expected {expected} bytes, found {actual}")]
    TruncatedHeader {
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// Strict mode found something other than "WAVE" at bytes 8..12.
    #[error("invalid format tag: expected \"WAVE\", found \"{found}\"")]
    InvalidFormatTag {
        /// The tag that was read.
        found: FourCc,
    },

    /// The scan reached the end of the source without a non-empty "data" chunk.
    #[error("no non-empty data chunk found (search started at byte {searched_from})")]
    DataChunkNotFound {
        /// Offset the first scan started from.
        searched_from: u64,
    },

    /// The source could not be opened or read.
    #[error("source could not be {context}: {source}")]
    UnopenableSource {
        /// What was being attempted.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The frame layout is not one the decoder understands.
    #[error("unsupported block align: {block_align} bytes per frame")]
    UnsupportedBlockAlign {
        /// Block align read from the header.
        block_align: u16,
    },
}

impl DecodeError {
    /// Creates an unopenable-source error with context.
    pub fn unopenable(context: impl Into<String>, source: io::Error) -> Self {
        Self::UnopenableSource {
            context: context.into(),
            source,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::TruncatedHeader { .. } => "WAV_001",
            DecodeError::InvalidFormatTag { .. } => "WAV_002",
            DecodeError::DataChunkNotFound { .. } => "WAV_003",
            DecodeError::UnopenableSource { .. } => "WAV_004",
            DecodeError::UnsupportedBlockAlign { .. } => "WAV_005",
        }
    }

    /// Error category.
    pub fn category(&self) -> &'static str {
        "decode"
    }
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        Self::unopenable("read", err)
    }
}

/// Errors that can occur while synthesizing a WAV file.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A template field cannot be encoded.
    #[error("invalid template field '{field}': {message}")]
    InvalidTemplate {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl EncodeError {
    /// Creates an invalid template error.
    pub fn invalid_template(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            EncodeError::InvalidTemplate { .. } => "WAV_101",
            EncodeError::Io(_) => "WAV_102",
        }
    }

    /// Error category.
    pub fn category(&self) -> &'static str {
        "encode"
    }
}

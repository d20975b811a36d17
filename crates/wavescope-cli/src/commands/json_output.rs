//! JSON output types for machine-readable CLI output.
//!
//! Used by `inspect --json`. Decode failures keep the library's stable
//! `WAV_xxx` codes; CLI-level failures use `CLI_xxx`.

use serde::Serialize;
use wavescope_core::{DecodeConfig, DecodeError, HeaderReport};

/// Error codes for CLI operations.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Decode options (profile, config file, overrides) were invalid
    pub const INVALID_CONFIG: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "WAV_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Wraps a decoder error, keeping its code.
    pub fn from_decode(error: &DecodeError) -> Self {
        Self::new(error.code(), error.to_string())
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Result payload of a successful `inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResult {
    /// Input file path
    pub input: String,
    /// BLAKE3 hash of the input file
    pub input_hash: String,
    /// Decode policy that was applied
    pub config: DecodeConfig,
    /// Header field dump
    pub header: HeaderReport,
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    /// Whether the file was decoded
    pub success: bool,
    /// Errors encountered while inspecting
    pub errors: Vec<JsonError>,
    /// Inspection result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
}

impl InspectOutput {
    /// Creates a successful output.
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

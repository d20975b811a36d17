//! CLI command implementations

pub mod export;
pub mod generate;
pub mod inspect;
pub mod json_output;
pub mod options;

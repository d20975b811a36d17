//! Decode options shared by `inspect` and `export`.
//!
//! The effective [`DecodeConfig`] is built in three layers: the named
//! profile, then the fields present in a `--config` JSON file, then the
//! individual flags.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::fs;
use tracing::debug;

use wavescope_core::{DecodeConfig, DecodeProfile, TimeAxis};

/// Decode policy flags.
#[derive(Debug, Clone, Default, Args)]
pub struct DecodeArgs {
    /// Decode profile (full, preview, strict)
    #[arg(long, value_parser = DecodeProfile::NAMES)]
    pub profile: Option<String>,

    /// JSON file with decode config fields to apply over the profile
    #[arg(long)]
    pub config: Option<String>,

    /// Keep every Nth frame (0 keeps every frame)
    #[arg(long)]
    pub decimate: Option<u32>,

    /// Require the WAVE tag and reject unsupported frame layouts
    #[arg(long)]
    pub strict: bool,

    /// Unit of the time column (frame_ordinal, seconds)
    #[arg(long, value_parser = ["frame_ordinal", "seconds"])]
    pub time_axis: Option<String>,
}

impl DecodeArgs {
    /// Builds the effective decode config.
    pub fn resolve(&self) -> Result<DecodeConfig> {
        let mut config = match &self.profile {
            Some(name) => name
                .parse::<DecodeProfile>()
                .map_err(anyhow::Error::msg)?
                .config(),
            None => DecodeConfig::default(),
        };

        if let Some(path) = &self.config {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            config = overlay_config(&config, &text)
                .with_context(|| format!("Invalid config file: {}", path))?;
        }

        if let Some(decimation) = self.decimate {
            config = config.with_decimation(decimation);
        }
        if self.strict {
            config = config.with_strict(true);
            config.reject_unsupported_block_align = true;
        }
        if let Some(axis) = &self.time_axis {
            let axis = axis.parse::<TimeAxis>().map_err(anyhow::Error::msg)?;
            config = config.with_time_axis(axis);
        }

        debug!(?config, "resolved decode config");
        Ok(config)
    }
}

/// Applies the fields of a JSON object over `base`.
///
/// Fields absent from the object keep their value from `base`.
pub fn overlay_config(base: &DecodeConfig, text: &str) -> Result<DecodeConfig> {
    let overlay: Value = serde_json::from_str(text).context("config is not valid JSON")?;
    let Value::Object(fields) = overlay else {
        anyhow::bail!("config must be a JSON object");
    };

    let mut merged = serde_json::to_value(base)?;
    if let Value::Object(target) = &mut merged {
        target.extend(fields);
    }

    let config: DecodeConfig = serde_json::from_value(merged)?;
    let decimation = config.decimation;
    Ok(config.with_decimation(decimation))
}

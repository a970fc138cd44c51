//! Configuration file loading and validation.
//!
//! Every section is optional; missing values fall back to the library
//! defaults. Files ending in `.json` are read as JSON, anything else as TOML.

use anyhow::{Context, Result};
use lib_dsp::polyfit::PolyfitOptions;
use lib_dsp::unstair::{UnstairMethod, DEFAULT_UNSTAIR_TOLERANCE};
use lib_electronics::crystal::{DEFAULT_PIN_CAPACITANCE, DEFAULT_STRAY_CAPACITANCE};
use lib_engio::EngineerIo;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level engcalc configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngConfig {
    pub unstair: UnstairConfig,
    pub polyfit: PolyfitOptions,
    pub crystal: CrystalConfig,
    pub engineer_io: EngineerIoConfig,
}

impl EngConfig {
    /// Parser/formatter with the configured extra units.
    pub fn engineer_io(&self) -> Result<EngineerIo> {
        EngineerIo::instance()
            .with_extra_units(self.engineer_io.extra_units.iter().cloned())
            .context("Invalid engineer_io.extra_units")
    }
}

/// Parser settings for the `parse` and `format` commands.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineerIoConfig {
    /// Units accepted in addition to the built-in ones, e.g. `"Wh"`.
    pub extra_units: Vec<String>,
}

/// Defaults for the `unstair` command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnstairConfig {
    pub method: UnstairMethod,
    pub tolerance: f64,
}

impl Default for UnstairConfig {
    fn default() -> Self {
        Self {
            method: UnstairMethod::default(),
            tolerance: DEFAULT_UNSTAIR_TOLERANCE,
        }
    }
}

/// Board parasitics used by the `crystal` commands, in engineering notation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalConfig {
    pub pin_capacitance: String,
    pub stray_capacitance: String,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            pin_capacitance: DEFAULT_PIN_CAPACITANCE.to_string(),
            stray_capacitance: DEFAULT_STRAY_CAPACITANCE.to_string(),
        }
    }
}

/// Load configuration from a file.
pub fn load_config(path: &Path) -> Result<EngConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: EngConfig = if path.extension().map_or(false, |e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config as JSON: {:?}", path))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config as TOML: {:?}", path))?
    };

    validate_config(&config)?;
    Ok(config)
}

/// Load the given file, or the defaults if no file was given.
pub fn load_or_default(path: Option<&Path>) -> Result<EngConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from {:?}", path);
            load_config(path)
        }
        None => Ok(EngConfig::default()),
    }
}

/// Validate configuration.
fn validate_config(config: &EngConfig) -> Result<()> {
    if config.unstair.tolerance.is_nan() || config.unstair.tolerance < 0.0 {
        anyhow::bail!(
            "unstair.tolerance must be non-negative, got {}",
            config.unstair.tolerance
        );
    }

    let polyfit = &config.polyfit;
    if polyfit.min_degree > polyfit.max_degree {
        anyhow::bail!(
            "polyfit.min_degree ({}) exceeds polyfit.max_degree ({})",
            polyfit.min_degree,
            polyfit.max_degree
        );
    }

    for (name, value) in [
        ("crystal.pin_capacitance", &config.crystal.pin_capacitance),
        ("crystal.stray_capacitance", &config.crystal.stray_capacitance),
    ] {
        let parsed =
            lib_engio::normalize(value).with_context(|| format!("Invalid {name}: {value:?}"))?;
        if parsed.value < 0.0 {
            anyhow::bail!("{name} must not be negative, got {value}");
        }
    }

    config.engineer_io()?;
    Ok(())
}

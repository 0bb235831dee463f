use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::{
    scenario::ScenarioPresets,
    timeline::ProjectionRates,
    unit::{standard_catalog, UnitMixConfig, UnitMixRules, UnitType},
    zoning::ZoningRules,
};
use crate::errors::{FeasibilityError, Result};
use crate::utils::{app_data_dir, config_file_in};

const TMP_SUFFIX: &str = "tmp";

/// Defaults a caller hands to the engine when a request leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub zoning: ZoningRules,
    pub unit_mix_rules: UnitMixRules,
    pub unit_mix: UnitMixConfig,
    pub catalog: Vec<UnitType>,
    pub rates: ProjectionRates,
    pub scenarios: ScenarioPresets,
    /// Pricing snapshots older than this (relative to the start date) are flagged.
    pub pricing_staleness_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoning: ZoningRules::default(),
            unit_mix_rules: UnitMixRules::default(),
            unit_mix: UnitMixConfig::default(),
            catalog: standard_catalog(),
            rates: ProjectionRates::default(),
            scenarios: ScenarioPresets::default(),
            pricing_staleness_days: 90,
        }
    }
}

impl EngineConfig {
    /// Checks the values that would otherwise fail deep inside a calculation.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(FeasibilityError::Configuration(
                "unit catalog cannot be empty".into(),
            ));
        }
        for unit in &self.catalog {
            if !unit.typical_net_area.is_finite() || unit.typical_net_area <= 0.0 {
                return Err(FeasibilityError::Configuration(format!(
                    "unit type `{}` needs a positive typical size",
                    unit.code
                )));
            }
        }
        if self.pricing_staleness_days < 0 {
            return Err(FeasibilityError::Configuration(
                "pricing staleness window cannot be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Loads and stores [`EngineConfig`] as JSON on disk.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    /// Returns defaults when no configuration file exists yet.
    pub fn load(&self) -> Result<EngineConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(EngineConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: EngineConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &EngineConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "engine configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

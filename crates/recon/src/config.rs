use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level compute config
// ---------------------------------------------------------------------------

/// One computation run: region, package selection, quantity, rebate, and an
/// optional override source.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputeConfig {
    /// Partner region name; also the partner-store key.
    pub region: String,
    /// Installation-type section label, exact text.
    pub block: String,
    /// Distance column label, exact text.
    pub distance: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_rebate")]
    pub rebate_fraction: f64,
    /// Item ids to include; omitted = every item of the package.
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub r#override: Option<OverrideConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverrideConfig {
    pub mode: OverrideMode,
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideMode {
    LineItem,
    PackageTotal,
}

fn default_quantity() -> u32 {
    1
}

fn default_rebate() -> f64 {
    0.05
}

impl ComputeConfig {
    pub fn from_toml(data: &str) -> Result<Self, ReconError> {
        let config: ComputeConfig =
            toml::from_str(data).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.region.trim().is_empty() {
            return Err(ReconError::ConfigValidation("region must not be empty".into()));
        }
        if self.block.trim().is_empty() || self.distance.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "block and distance must not be empty".into(),
            ));
        }
        if self.quantity == 0 {
            return Err(ReconError::ConfigValidation(
                "quantity must be a positive integer".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.rebate_fraction) {
            return Err(ReconError::ConfigValidation(format!(
                "rebate_fraction must be within 0..=1, got {}",
                self.rebate_fraction
            )));
        }
        if let Some(include) = &self.include {
            if include.is_empty() {
                return Err(ReconError::ConfigValidation(
                    "include list, when present, must name at least one item".into(),
                ));
            }
        }
        Ok(())
    }
}

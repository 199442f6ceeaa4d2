use serde::Deserialize;

use crate::error::ReconError;
use crate::extract::{Dialect, DEFAULT_MARKER};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MergeConfig {
    pub name: String,
    pub canonical: CanonicalConfig,
    /// Vendor tiers, highest priority first.
    #[serde(default)]
    pub tiers: Vec<TierConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CanonicalConfig {
    pub file: String,
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

/// Files sharing one vendor dialect, processed in listed order.
#[derive(Debug, Clone, Deserialize)]
pub struct TierConfig {
    pub dialect: Dialect,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub file: Option<String>,
}

/// One vendor file in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRef<'a> {
    pub tier: usize,
    pub dialect: Dialect,
    pub file: &'a str,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MergeConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: MergeConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        if self.canonical.file.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "canonical.file must not be empty".into(),
            ));
        }

        if self.canonical.marker.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "canonical.marker must not be empty".into(),
            ));
        }

        for (idx, tier) in self.tiers.iter().enumerate() {
            let n = idx + 1;
            if !tier.dialect.is_vendor() {
                return Err(ReconError::ConfigValidation(format!(
                    "tier {n}: dialect '{}' is reserved for the canonical source",
                    tier.dialect
                )));
            }
            if tier.files.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "tier {n}: at least one file is required"
                )));
            }
            if tier.files.iter().any(|f| f.trim().is_empty()) {
                return Err(ReconError::ConfigValidation(format!(
                    "tier {n}: file paths must not be empty"
                )));
            }
        }

        if let Some(ref file) = self.output.file {
            if file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(
                    "output.file must not be empty when set".into(),
                ));
            }
        }

        Ok(())
    }

    /// Vendor files flattened into processing order: tier order, then
    /// file order within a tier.
    pub fn sources(&self) -> Vec<SourceRef<'_>> {
        self.tiers
            .iter()
            .enumerate()
            .flat_map(|(tier, cfg)| {
                cfg.files.iter().map(move |file| SourceRef {
                    tier,
                    dialect: cfg.dialect,
                    file: file.as_str(),
                })
            })
            .collect()
    }
}

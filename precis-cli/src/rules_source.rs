//! Where segmentation rules come from

use crate::error::CliError;
use anyhow::{Context, Result};
use precis_core::SegmentationRules;
use std::fs;
use std::path::PathBuf;

/// Source of segmentation rules
#[derive(Debug, Clone, Default)]
pub enum RulesSource {
    /// Embedded English rules
    #[default]
    BuiltIn,
    /// User-supplied TOML rules file
    External {
        /// Path to the rules file
        path: PathBuf,
    },
}

impl RulesSource {
    /// Rules file from `--rules`, or the built-in rules
    pub fn from_arg(path: Option<&PathBuf>) -> Self {
        match path {
            Some(path) => Self::External { path: path.clone() },
            None => Self::BuiltIn,
        }
    }

    /// Get the display name for the rules source
    pub fn display_name(&self) -> String {
        match self {
            RulesSource::BuiltIn => {
                format!("Built-in: {}", SegmentationRules::english().name())
            }
            RulesSource::External { path } => format!("External: {}", path.display()),
        }
    }

    /// Load the rules
    pub fn load(&self) -> Result<SegmentationRules> {
        match self {
            RulesSource::BuiltIn => Ok(SegmentationRules::english().clone()),
            RulesSource::External { path } => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
                let rules = SegmentationRules::from_toml_str(&content).map_err(|e| {
                    CliError::ConfigError(format!("{} ({})", e, path.display()))
                })?;
                log::info!("loaded {} segmentation rules from {}", rules.name(), path.display());
                Ok(rules)
            }
        }
    }
}

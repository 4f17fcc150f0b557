//! Top-level configuration loaded from `fence.toml`.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LimitsConfig, ScopeConfig, WorkspaceConfig};
use crate::errors::ConfigError;

/// Complete configuration for one repository.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FenceConfig {
    pub workspace: WorkspaceConfig,
    pub limits: LimitsConfig,
    pub scope: ScopeConfig,
}

impl FenceConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, &path.display().to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(content, "<inline>")?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Reject configs that would make resolution ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for (i, pkg) in self.workspace.packages.iter().enumerate() {
            if pkg.name.is_empty() || pkg.name.contains('/') || pkg.name.contains(':') {
                return Err(ConfigError::ValidationFailed {
                    field: format!("workspace.packages[{i}].name"),
                    message: format!("'{}' is not a valid package name", pkg.name),
                });
            }
            if !seen.insert(pkg.name.to_lowercase()) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("workspace.packages[{i}].name"),
                    message: format!("duplicate package '{}'", pkg.name),
                });
            }
            if Path::new(&pkg.root).is_absolute() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("workspace.packages[{i}].root"),
                    message: "must be relative to the repository root".to_string(),
                });
            }
        }
        for (i, pattern) in self.scope.exclude.iter().enumerate() {
            if let Err(e) = glob::Pattern::new(pattern) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("scope.exclude[{i}]"),
                    message: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

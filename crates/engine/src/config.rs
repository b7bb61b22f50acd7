// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! memory_budget = "256M"
//! placement = "host"
//! reshape_policy = "materialize"   # or "reject"
//! enable_stats = true
//! ```
//!
//! Every key except `memory_budget` may be omitted.

use crate::EngineError;
use buffer_pool::MemoryBudget;
use std::path::Path;
use tensor_core::{Placement, ReshapePolicy};

/// Configuration for an [`crate::Engine`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Ceiling on live tensor storage (human-readable, e.g. `"256M"`).
    pub memory_budget: String,
    /// Where tensors live. Only `"host"` exists.
    #[serde(default)]
    pub placement: Placement,
    /// How reshape treats non-canonically strided input.
    #[serde(default)]
    pub reshape_policy: ReshapePolicy,
    /// Whether the engine reports allocation statistics.
    #[serde(default = "default_true")]
    pub enable_stats: bool,
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str)
            .map_err(|e| EngineError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self)
            .map_err(|e| EngineError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Parses the memory budget string into a [`MemoryBudget`].
    pub fn parse_budget(&self) -> Result<MemoryBudget, EngineError> {
        MemoryBudget::parse(&self.memory_budget)
            .map_err(|e| EngineError::ConfigError(format!("invalid budget: {e}")))
    }

    /// Default configuration with a different budget.
    pub fn with_budget(budget: impl Into<String>) -> Self {
        Self {
            memory_budget: budget.into(),
            ..Default::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memory_budget: "256M".to_string(),
            placement: Placement::Host,
            reshape_policy: ReshapePolicy::Materialize,
            enable_stats: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = EngineConfig::default();
        assert_eq!(c.memory_budget, "256M");
        assert_eq!(c.placement, Placement::Host);
        assert_eq!(c.reshape_policy, ReshapePolicy::Materialize);
        assert!(c.enable_stats);
    }

    #[test]
    fn test_parse_budget() {
        let c = EngineConfig::with_budget("64M");
        assert_eq!(c.parse_budget().unwrap().as_mb(), 64);

        let bad = EngineConfig::with_budget("lots");
        assert!(matches!(
            bad.parse_budget(),
            Err(EngineError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
memory_budget = "1G"
placement = "host"
reshape_policy = "reject"
enable_stats = false
"#;
        let c = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(c.memory_budget, "1G");
        assert_eq!(c.reshape_policy, ReshapePolicy::Reject);
        assert!(!c.enable_stats);
    }

    #[test]
    fn test_from_toml_defaults() {
        let c = EngineConfig::from_toml(r#"memory_budget = "4K""#).unwrap();
        assert_eq!(c.placement, Placement::Host);
        assert_eq!(c.reshape_policy, ReshapePolicy::Materialize);
        assert!(c.enable_stats);
    }

    #[test]
    fn test_from_toml_rejects_unknown_values() {
        assert!(EngineConfig::from_toml(
            "memory_budget = \"1M\"\nplacement = \"gpu\"\n"
        )
        .is_err());
        assert!(EngineConfig::from_toml(
            "memory_budget = \"1M\"\nreshape_policy = \"guess\"\n"
        )
        .is_err());
        assert!(EngineConfig::from_toml("enable_stats = true\n").is_err());
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = EngineConfig {
            reshape_policy: ReshapePolicy::Reject,
            ..Default::default()
        };
        let toml = c.to_toml().unwrap();
        assert!(toml.contains("reshape_policy = \"reject\""));
        let back = EngineConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("engine-config-{}.toml", std::process::id()));
        std::fs::write(&path, "memory_budget = \"2M\"\n").unwrap();
        let c = EngineConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(c.parse_budget().unwrap().as_mb(), 2);

        let missing = EngineConfig::from_file(Path::new("/nonexistent/engine.toml"));
        assert!(matches!(missing, Err(EngineError::ConfigError(_))));
    }
}

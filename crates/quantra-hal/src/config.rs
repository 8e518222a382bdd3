//! Execution configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QUANTRA_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backend::BackendConfig;
use crate::error::{HalError, HalResult};
use crate::profile;

/// Settings for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Shots per execution.
    #[serde(default = "default_shots")]
    pub shots: usize,

    /// RNG seed for reproducible sampling.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Hardware profile to validate and transpile against.
    #[serde(default)]
    pub target: Option<String>,

    /// Backend pool.
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendConfig>,
}

fn default_shots() -> usize {
    1024
}

fn default_backends() -> Vec<BackendConfig> {
    vec![BackendConfig::new("local-simulator", "simulator")]
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            seed: None,
            target: None,
            backends: default_backends(),
        }
    }
}

impl ExecutionConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> HalResult<Self> {
        let config: ExecutionConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| HalError::Configuration(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HalResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            HalError::Configuration(format!(
                "Failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> HalResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge `QUANTRA_*` environment variables into this configuration.
    pub fn merge_env(self) -> HalResult<Self> {
        self.merge_from(|key| std::env::var(key).ok())
    }

    /// Merge overrides from `lookup`, keyed by environment variable name.
    ///
    /// Only keys that resolve override values; a value that fails to parse is
    /// a configuration error.
    pub fn merge_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> HalResult<Self> {
        if let Some(v) = lookup("QUANTRA_SHOTS") {
            self.shots = v
                .parse()
                .map_err(|_| HalError::Configuration(format!("QUANTRA_SHOTS: invalid value '{v}'")))?;
        }
        if let Some(v) = lookup("QUANTRA_SEED") {
            self.seed = Some(
                v.parse()
                    .map_err(|_| HalError::Configuration(format!("QUANTRA_SEED: invalid value '{v}'")))?,
            );
        }
        if let Some(v) = lookup("QUANTRA_TARGET") {
            self.target = Some(v);
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> HalResult<()> {
        if self.shots == 0 {
            return Err(HalError::Configuration("shots must be at least 1".into()));
        }
        if let Some(target) = &self.target {
            if profile::lookup(target).is_none() {
                return Err(HalError::Configuration(format!(
                    "Unknown target profile '{target}' (known: {})",
                    profile::profile_keys().join(", ")
                )));
            }
        }
        if self.backends.is_empty() {
            return Err(HalError::Configuration("at least one backend is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
shots: 256
seed: 7
target: ionq.simulator
backends:
  - name: sim
    kind: simulator
    max_qubits: 12
  - name: dwave
    kind: annealer
    num_reads: 50
";

    #[test]
    fn test_defaults() {
        let config = ExecutionConfig::default();
        assert_eq!(config.shots, 1024);
        assert!(config.seed.is_none());
        assert_eq!(config.backends.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml() {
        let config = ExecutionConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.shots, 256);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.target.as_deref(), Some("ionq.simulator"));
        assert_eq!(config.backends[0].extra_u64("max_qubits").unwrap(), Some(12));
        assert_eq!(config.backends[1].kind, "annealer");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ExecutionConfig::from_yaml_str("seed: 3\n").unwrap();
        assert_eq!(config.shots, 1024);
        assert_eq!(config.backends[0].kind, "simulator");
    }

    #[test]
    fn test_env_overrides_file() {
        let config = ExecutionConfig::from_yaml_str(SAMPLE)
            .unwrap()
            .merge_from(|key| match key {
                "QUANTRA_SHOTS" => Some("64".into()),
                "QUANTRA_TARGET" => Some("IonQ Hardware".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.shots, 64);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.target.as_deref(), Some("IonQ Hardware"));
    }

    #[test]
    fn test_bad_env_value() {
        let result = ExecutionConfig::default().merge_from(|key| {
            (key == "QUANTRA_SEED").then(|| "not-a-number".to_string())
        });
        assert!(matches!(result, Err(HalError::Configuration(_))));
    }

    #[test]
    fn test_validation() {
        assert!(ExecutionConfig::from_yaml_str("shots: 0\n").is_err());
        assert!(ExecutionConfig::from_yaml_str("target: nowhere\n").is_err());
        assert!(ExecutionConfig::from_yaml_str("backends: []\n").is_err());
    }
}

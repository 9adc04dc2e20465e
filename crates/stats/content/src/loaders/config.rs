//! Stat configuration loader.

use std::path::Path;

use stat_core::StatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for stat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing StatConfig
    ///
    /// # Returns
    ///
    /// Returns a StatConfig, or an error when `critical_threshold` lies
    /// outside `[0, 1]`.
    pub fn load(path: &Path) -> LoadResult<StatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text already in memory.
    pub fn parse(content: &str) -> LoadResult<StatConfig> {
        let config: StatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(0.0..=1.0).contains(&config.critical_threshold) {
            anyhow::bail!(
                "critical_threshold must be within [0, 1], got {}",
                config.critical_threshold
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("critical_threshold = 0.4\n").unwrap();
        assert_eq!(config.critical_threshold, 0.4);
        assert!(config.enforce_ranges);
        assert!(config.seed_defaults);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), StatConfig::default());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        assert!(ConfigLoader::parse("critical_threshold = 1.5").is_err());
        assert!(ConfigLoader::parse("seed_defaults = \"yes\"").is_err());
    }
}

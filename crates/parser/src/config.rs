use std::env;

pub use common::Environment;
use common::env_or;

use crate::{
    tensor::NetworkInfo,
    thresholds::{ClassThresholds, DEFAULT_NUM_CLASSES},
};

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub environment: Environment,
    pub log_level: Option<String>,
    pub network: NetworkInfo,
    pub thresholds: ClassThresholds,
}

impl ParserConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::from_env();
        let log_level = env::var("LOG_LEVEL").ok();

        let network = NetworkInfo::new(
            env_or("NETWORK_WIDTH", 640),
            env_or("NETWORK_HEIGHT", 640),
        );

        let confidence_threshold = env_or("CONFIDENCE_THRESHOLD", 0.5f32);
        let num_classes = env_or("NUM_CLASSES", DEFAULT_NUM_CLASSES);

        let mut thresholds = ClassThresholds::uniform(confidence_threshold, num_classes);
        if let Ok(overrides) = env::var("CLASS_THRESHOLDS") {
            thresholds = thresholds.parse_overrides(&overrides)?;
        }

        Ok(Self {
            environment,
            log_level,
            network,
            thresholds,
        })
    }

    /// Create default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            environment: Environment::Development,
            log_level: None,
            network: NetworkInfo::new(640, 640),
            thresholds: ClassThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 6] = [
        "NETWORK_WIDTH",
        "NETWORK_HEIGHT",
        "CONFIDENCE_THRESHOLD",
        "NUM_CLASSES",
        "CLASS_THRESHOLDS",
        "LOG_LEVEL",
    ];

    fn clear_env() {
        for key in KEYS {
            unsafe { env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = ParserConfig::from_env().unwrap();
        let defaults = ParserConfig::test_default();
        assert_eq!(config.network, defaults.network);
        assert_eq!(config.thresholds, defaults.thresholds);
        assert_eq!(config.log_level, None);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            env::set_var("NETWORK_WIDTH", "1280");
            env::set_var("NETWORK_HEIGHT", "736");
            env::set_var("CONFIDENCE_THRESHOLD", "0.25");
            env::set_var("NUM_CLASSES", "3");
            env::set_var("CLASS_THRESHOLDS", "1:0.7");
            env::set_var("LOG_LEVEL", "debug");
        }
        let config = ParserConfig::from_env().unwrap();
        assert_eq!(config.network, NetworkInfo::new(1280, 736));
        assert_eq!(config.thresholds.as_slice(), &[0.25f32, 0.7, 0.25]);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_overrides() {
        clear_env();
        unsafe { env::set_var("CLASS_THRESHOLDS", "1=0.7") };
        assert!(
            ParserConfig::from_env().is_err(),
            "Malformed overrides must fail loudly"
        );
        clear_env();
    }
}

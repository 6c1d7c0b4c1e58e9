use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn from_env() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when the
/// variable is unset or does not parse.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        unsafe { env::set_var("ENVIRONMENT", "PROD") };
        assert_eq!(Environment::from_env(), Environment::Production);

        unsafe { env::set_var("ENVIRONMENT", "production") };
        assert_eq!(Environment::from_env(), Environment::Production);

        unsafe { env::set_var("ENVIRONMENT", "staging") };
        assert_eq!(
            Environment::from_env(),
            Environment::Development,
            "Unknown values should fall back to development"
        );

        unsafe { env::remove_var("ENVIRONMENT") };
        assert_eq!(Environment::from_env(), Environment::Development);
        assert_eq!(Environment::Development.as_str(), "development");
    }

    #[test]
    #[serial]
    fn test_env_or_parses_and_falls_back() {
        unsafe { env::set_var("COMMON_TEST_WIDTH", " 1280 ") };
        assert_eq!(env_or("COMMON_TEST_WIDTH", 640u32), 1280);

        unsafe { env::set_var("COMMON_TEST_WIDTH", "wide") };
        assert_eq!(
            env_or("COMMON_TEST_WIDTH", 640u32),
            640,
            "Unparseable values should use the default"
        );

        unsafe { env::remove_var("COMMON_TEST_WIDTH") };
        assert_eq!(env_or("COMMON_TEST_WIDTH", 0.25f32), 0.25);
    }
}

use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with pretty formatting for development
/// and JSON formatting for production.
///
/// Uses RUST_LOG environment variable for filtering, then `log_level`, then "info".
///
/// Returns an error when a global subscriber is already installed. Callers that
/// live inside a host process (the DeepStream plugin) are expected to ignore it.
pub fn setup_logging(log_level: Option<String>, environment: Environment) -> anyhow::Result<()> {
    let fallback = log_level.unwrap_or_else(|| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| "info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    match environment {
        Environment::Production => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        Environment::Development => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_ansi(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

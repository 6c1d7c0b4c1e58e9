use crate::config::ParserConfig;

pub fn setup_logging(config: &ParserConfig) -> anyhow::Result<()> {
    common::setup_logging(config.log_level.clone(), config.environment)
}

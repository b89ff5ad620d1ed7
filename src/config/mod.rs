use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_range, Validate};
use clap::Parser;

/// Runtime configuration. Every flag is optional; the defaults reproduce
/// the documented filter behavior, so `source-enrich < in.json > out.json`
/// needs no arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "source-enrich")]
#[command(about = "Enrich missing or generic source URLs via web research and live validation")]
pub struct CliConfig {
    /// Wall-clock timeout per research query, in seconds. Research involves
    /// live web search, so this is on the order of minutes.
    #[arg(long, default_value = "1200")]
    pub research_timeout: u64,

    /// Timeout per validation fetch, in seconds.
    #[arg(long, default_value = "10")]
    pub fetch_timeout: u64,

    /// Ceiling on concurrent impact-enrichment workers.
    #[arg(long, default_value = "100")]
    pub concurrency: usize,

    /// Directory for the timestamped run log.
    #[arg(long, default_value = "logs")]
    pub log_dir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system resource monitoring")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn research_timeout_secs(&self) -> u64 {
        self.research_timeout
    }

    fn fetch_timeout_secs(&self) -> u64 {
        self.fetch_timeout
    }

    fn max_concurrency(&self) -> usize {
        self.concurrency
    }

    fn log_dir(&self) -> &str {
        &self.log_dir
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("research_timeout", self.research_timeout as usize, 1)?;
        validate_positive_number("fetch_timeout", self.fetch_timeout as usize, 1)?;
        validate_range("concurrency", self.concurrency, 1, 1000)?;
        validate_path("log_dir", &self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> CliConfig {
        CliConfig {
            research_timeout: 1200,
            fetch_timeout: 10,
            concurrency: 100,
            log_dir: "logs".to_string(),
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(default_config().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let config = CliConfig {
            concurrency: 0,
            ..default_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_is_rejected() {
        let config = CliConfig {
            log_dir: String::new(),
            ..default_config()
        };
        assert!(config.validate().is_err());
    }
}

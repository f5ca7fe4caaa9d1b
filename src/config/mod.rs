pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://countries.trevorblades.com/";
pub const DEFAULT_SINK_BASE_URL: &str = "https://jsonplaceholder.typicode.com/";
pub const DEFAULT_CSV_FILE: &str = "countries.csv";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "country-relay")]
#[command(about = "Fetch countries from GraphQL, forward one to a REST sink and save the list as CSV")]
pub struct CliConfig {
    /// TOML configuration file; when given it replaces the flags below
    #[arg(long, env = "COUNTRY_RELAY_CONFIG")]
    pub config: Option<String>,

    #[arg(long, env = "GRAPHQL_API_LINK", default_value = DEFAULT_GRAPHQL_ENDPOINT)]
    pub graphql_endpoint: String,

    #[arg(long, env = "COUNTRY_POST_LINK", default_value = DEFAULT_SINK_BASE_URL)]
    pub sink_base_url: String,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_CSV_FILE)]
    pub csv_file: String,

    #[arg(long, env = "COUNTRY_RELAY_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    #[arg(long, default_value = "3")]
    pub max_attempts: u32,

    #[arg(long, default_value = "1000")]
    pub backoff_base_ms: u64,

    #[arg(long, default_value = "30")]
    pub request_timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn graphql_endpoint(&self) -> &str {
        &self.graphql_endpoint
    }

    fn sink_base_url(&self) -> &str {
        &self.sink_base_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn csv_file(&self) -> &str {
        &self.csv_file
    }

    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub(crate) fn validate_provider(config: &dyn ConfigProvider) -> Result<()> {
    validation::validate_url("graphql_endpoint", config.graphql_endpoint())?;
    validation::validate_url("sink_base_url", config.sink_base_url())?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_path("csv_file", config.csv_file())?;
    validation::validate_non_empty_string("bind", config.bind_address())?;
    validation::validate_range("max_attempts", config.max_attempts(), 1, 10)?;
    validation::validate_positive_number(
        "request_timeout_seconds",
        config.request_timeout().as_secs(),
        1,
    )?;
    Ok(())
}

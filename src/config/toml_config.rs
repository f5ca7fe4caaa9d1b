use crate::config::{
    validate_provider, DEFAULT_BIND_ADDRESS, DEFAULT_CSV_FILE, DEFAULT_GRAPHQL_ENDPOINT,
    DEFAULT_SINK_BASE_URL,
};
use crate::core::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub graphql_endpoint: String,
    pub sink_base_url: String,
    pub request_timeout_seconds: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            sink_base_url: DEFAULT_SINK_BASE_URL.to_string(),
            request_timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: Option<u32>,
    pub base_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub csv_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            csv_file: DEFAULT_CSV_FILE.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GRAPHQL_API_LINK})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn graphql_endpoint(&self) -> &str {
        &self.upstream.graphql_endpoint
    }

    fn sink_base_url(&self) -> &str {
        &self.upstream.sink_base_url
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn csv_file(&self) -> &str {
        &self.output.csv_file
    }

    fn bind_address(&self) -> &str {
        &self.server.bind
    }

    fn max_attempts(&self) -> u32 {
        self.retry.max_attempts.unwrap_or(3)
    }

    fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.retry.base_delay_ms.unwrap_or(1000))
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.request_timeout_seconds.unwrap_or(30))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:8080"

[upstream]
graphql_endpoint = "https://countries.example.com/graphql"
sink_base_url = "https://sink.example.com/"
request_timeout_seconds = 5

[retry]
max_attempts = 3
base_delay_ms = 250

[output]
path = "./exports"
csv_file = "all_countries.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.graphql_endpoint(), "https://countries.example.com/graphql");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.backoff_base(), Duration::from_millis(250));
        assert_eq!(config.csv_file(), "all_countries.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_tables_use_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.graphql_endpoint(), DEFAULT_GRAPHQL_ENDPOINT);
        assert_eq!(config.sink_base_url(), DEFAULT_SINK_BASE_URL);
        assert_eq!(config.output_path(), ".");
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.backoff_base(), Duration::from_secs(1));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_COUNTRY_SINK_URL", "https://sink.test.com/");

        let toml_content = r#"
[upstream]
graphql_endpoint = "https://countries.trevorblades.com/"
sink_base_url = "${TEST_COUNTRY_SINK_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.sink_base_url(), "https://sink.test.com/");

        std::env::remove_var("TEST_COUNTRY_SINK_URL");
    }

    #[test]
    fn test_unresolved_placeholder_fails_validation() {
        let toml_content = r#"
[upstream]
graphql_endpoint = "${COUNTRY_RELAY_UNSET_VARIABLE}"
sink_base_url = "https://sink.example.com/"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = TomlConfig::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, AppError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[output]
path = "./from-file"
csv_file = "countries.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./from-file");
    }
}

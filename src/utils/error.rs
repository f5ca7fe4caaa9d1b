use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl AppError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::IoError(e) => format!("無法讀取或寫入檔案: {}", e),
            AppError::HttpClientError(e) => format!("無法建立 HTTP 客戶端: {}", e),
            AppError::ConfigError { message } => format!("配置錯誤: {}", message),
            AppError::ConfigValidationError { field, message } => {
                format!("配置欄位 '{}' 無效: {}", field, message)
            }
            AppError::InvalidConfigValueError { field, value, reason } => {
                format!("配置欄位 '{}' 的值 '{}' 無效: {}", field, value, reason)
            }
            AppError::MissingConfigError { field } => format!("缺少必要配置: {}", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::IoError(_) => "Check that the config file exists and is readable",
            AppError::HttpClientError(_) => "Check the TLS setup and request timeout",
            AppError::ConfigError { .. } | AppError::ConfigValidationError { .. } => {
                "Fix the configuration file and restart"
            }
            AppError::InvalidConfigValueError { .. } => {
                "Use an http(s) URL and a non-empty output path"
            }
            AppError::MissingConfigError { .. } => "Provide the value via CLI flag or environment",
        }
    }
}

/// Failure of the GraphQL country query.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("GraphQL endpoint returned status {0}")]
    UpstreamStatus(u16),

    #[error("GraphQL request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("GraphQL response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Terminal failure of a forward to the REST sink.
#[derive(Error, Debug)]
pub enum ForwardError {
    /// 403 from the sink. Never retried.
    #[error("REST sink rejected the request with 403 Forbidden, skipped")]
    Forbidden,

    #[error("REST sink kept returning 500 after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("REST sink request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("REST sink returned status {0}")]
    UnexpectedStatus(u16),
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of an endpoint operation that did not produce a result.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("No countries found.")]
    NotFound,

    #[error("Failed to fetch countries: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to post country details: {0}")]
    Forward(#[from] ForwardError),

    #[error("Failed to post country details: REST sink returned no id")]
    MissingPostId,
}

impl RelayError {
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::NotFound => 404,
            _ => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RelayError::NotFound => "not_found",
            RelayError::Fetch(FetchError::UpstreamStatus(_)) => "upstream_status",
            RelayError::Fetch(FetchError::Transport(_)) => "upstream_transport",
            RelayError::Fetch(FetchError::Decode(_)) => "upstream_decode",
            RelayError::Forward(ForwardError::Forbidden) => "forward_skipped",
            RelayError::Forward(ForwardError::RetriesExhausted { .. }) => {
                "forward_retries_exhausted"
            }
            RelayError::Forward(ForwardError::Transport(_)) => "forward_transport",
            RelayError::Forward(ForwardError::UnexpectedStatus(_)) => "forward_status",
            RelayError::MissingPostId => "missing_post_id",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

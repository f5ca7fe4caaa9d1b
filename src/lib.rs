pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{relay::CountryRelay, retry::RetryPolicy, Country};
pub use utils::error::{AppError, Result};

use clap::Parser;
use country_relay::api::{self, AppState};
use country_relay::core::ConfigProvider;
use country_relay::utils::logger;
use country_relay::utils::validation::Validate;
use country_relay::{app, CliConfig, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting country-relay");

    // 載入配置：有指定 TOML 檔時以檔案為準
    let config: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => Box::new(config),
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => Box::new(cli.clone()),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("🔗 GraphQL endpoint: {}", config.graphql_endpoint());
    tracing::info!("🔗 REST sink base: {}", config.sink_base_url());

    let client = app::build_http_client(config.as_ref())?;
    let relay = app::build_relay(config.as_ref(), client);

    api::start_api_server(AppState::new(Arc::new(relay)), config.bind_address()).await?;

    Ok(())
}

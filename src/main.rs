use std::sync::Arc;

use clap::Parser;
use csv_json_service::http::{self, state::AppState};
use csv_json_service::utils::error::ErrorSeverity;
use csv_json_service::utils::{logger, validation::Validate};
use csv_json_service::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting csv-json-server");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證配置
    let settings = match config.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            let exit_code = match e.severity() {
                ErrorSeverity::Critical => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    };

    let state = Arc::new(AppState::from_settings(&settings));
    let app = http::build_app(state, settings.max_upload_bytes());

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        %addr,
        output_path = %settings.output_path,
        default_csv = settings.default_csv.as_deref().unwrap_or("-"),
        "🚀 csv-json-server listening"
    );

    http::serve(listener, app).await?;

    tracing::info!("✅ Server stopped");
    Ok(())
}

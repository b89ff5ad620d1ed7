use anyhow::Context;
use clap::Parser;
use source_enrich::utils::{logger, validation::Validate};
use source_enrich::{CliConfig, ClaudeCli, ConfigProvider, Dataset, Enricher, HttpValidator};
use std::io::Read;
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 驗證配置
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    // 初始化日誌：stderr + 帶時間戳的 run log 檔
    let log_path = match logger::init_enrich_logger(Path::new(config.log_dir()), config.verbose) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("❌ Failed to set up logging: {}", e);
            std::process::exit(2);
        }
    };

    tracing::info!("📝 Logging to: {}", log_path.display());
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    tracing::info!("📖 Reading JSON from stdin...");
    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        tracing::error!("❌ Failed to read stdin: {}", e);
        std::process::exit(1);
    }

    // 輸入錯誤是唯一的致命錯誤：不產生任何輸出
    let dataset: Dataset = match serde_json::from_str(&input) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!("❌ Invalid JSON on stdin: {}", e);
            std::process::exit(1);
        }
    };

    let agent = ClaudeCli::new(Duration::from_secs(config.research_timeout_secs()));
    let validator = match HttpValidator::new(Duration::from_secs(config.fetch_timeout_secs()))
        .context("failed to build the validation HTTP client")
    {
        Ok(validator) => validator,
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let enricher = Enricher::new_with_monitoring(agent, validator, config, monitor_enabled);
    let enriched = enricher.run(dataset).await;

    tracing::info!("💾 Writing enriched JSON to stdout...");
    match serde_json::to_string_pretty(&enriched) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("❌ Failed to serialize output: {}", e);
            std::process::exit(1);
        }
    }

    tracing::info!("✅ Done!");
}

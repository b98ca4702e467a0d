use clap::Parser;
use tweet_etl::utils::{logger, validation::Validate};
use tweet_etl::{BatchProcessor, CliConfig, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting tweet-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 建立儲存與批次處理器
    let storage = LocalStorage::new(config.datasets_root.clone());
    let processor = BatchProcessor::new(storage, config).with_monitoring(monitor_enabled);

    match processor.run().await {
        Ok(summary) => {
            if let Ok(json) = summary.to_json() {
                tracing::debug!("Batch summary: {}", json);
            }
            tracing::info!(
                "✅ All datasets processed: {} cleaned, {} skipped, {} failed",
                summary.processed.len(),
                summary.skipped.len(),
                summary.failed.len()
            );
            println!(
                "✅ All datasets processed: {} cleaned, {} skipped, {} failed",
                summary.processed.len(),
                summary.skipped.len(),
                summary.failed.len()
            );

            if !summary.failed.is_empty() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Batch run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                tweet_etl::utils::error::ErrorSeverity::Low => 0,
                tweet_etl::utils::error::ErrorSeverity::Medium => 2,
                tweet_etl::utils::error::ErrorSeverity::High => 1,
                tweet_etl::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

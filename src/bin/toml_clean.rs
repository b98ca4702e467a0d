use anyhow::Context;
use clap::Parser;
use tweet_etl::config::toml_config::TomlConfig;
use tweet_etl::core::ConfigProvider;
use tweet_etl::utils::{logger, validation::Validate};
use tweet_etl::{BatchProcessor, LocalStorage};

#[derive(Parser)]
#[command(name = "toml-clean")]
#[command(about = "Dataset cleaning driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "tweet-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override normalization setting from config
    #[arg(long)]
    normalize: Option<bool>,

    /// Dry run - list the files that would be processed without cleaning
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置（日誌格式由配置決定，因此先載入）
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    logger::init_logger(args.verbose, config.json_logs());

    tracing::info!("🚀 Starting TOML-driven dataset cleaning");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(normalize) = args.normalize {
        config.transform.normalize = Some(normalize);
        tracing::info!("🔧 Normalization overridden to: {}", normalize);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 建立儲存與批次處理器
    let storage = LocalStorage::new(config.datasets_root().to_string());
    let processor = BatchProcessor::new(storage, config).with_monitoring(monitor_enabled);

    let summary = processor.run().await?;

    tracing::info!(
        "✅ Cleaning completed: {} cleaned, {} skipped, {} failed",
        summary.processed.len(),
        summary.skipped.len(),
        summary.failed.len()
    );
    println!(
        "✅ Cleaning completed: {} cleaned, {} skipped, {} failed",
        summary.processed.len(),
        summary.skipped.len(),
        summary.failed.len()
    );

    if !summary.failed.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Pipeline: {} v{}", config.pipeline.name, config.pipeline.version);
    tracing::info!("📂 Datasets root: {}", config.datasets_root());
    tracing::info!(
        "🔧 normalize: {}, derive_stats: {}, output: {}/<name>{}.csv",
        config.normalize(),
        config.derive_stats(),
        config.clean_dir(),
        config.clean_suffix()
    );
}

// 只列出會被處理的檔案
fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let root = std::path::Path::new(config.datasets_root());
    let mut total = 0usize;

    for dataset in std::fs::read_dir(root)
        .with_context(|| format!("cannot read datasets root '{}'", root.display()))?
    {
        let dataset = dataset?;
        if !dataset.path().is_dir() {
            continue;
        }
        for file in std::fs::read_dir(dataset.path())? {
            let file = file?;
            let name = file.file_name().to_string_lossy().into_owned();
            if file.path().is_file() && name.to_lowercase().ends_with(".csv") {
                tracing::info!(
                    "📄 Would process: {}/{}",
                    dataset.file_name().to_string_lossy(),
                    name
                );
                total += 1;
            }
        }
    }

    tracing::info!("🔍 Dry run finished: {} file(s) would be processed", total);
    Ok(())
}

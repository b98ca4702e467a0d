use crate::core::etl::EtlEngine;
use crate::core::pipeline::CleanFilePipeline;
use crate::core::{ConfigProvider, Storage};
use crate::utils::error::{EtlError, Result};
use crate::utils::monitor::SystemMonitor;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// 整批執行結果摘要
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub execution_id: String,
    pub started_at: DateTime<Utc>,
    pub processed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
    pub duration: Duration,
}

impl BatchSummary {
    pub fn total_files(&self) -> usize {
        self.processed.len() + self.skipped.len() + self.failed.len()
    }

    /// 轉成可序列化的摘要（記錄於 debug log）
    pub fn to_summary_map(&self) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();
        summary.insert(
            "execution_id".to_string(),
            serde_json::Value::String(self.execution_id.clone()),
        );
        summary.insert(
            "started_at".to_string(),
            serde_json::Value::String(self.started_at.to_rfc3339()),
        );
        summary.insert(
            "total_files".to_string(),
            serde_json::Value::Number(self.total_files().into()),
        );
        summary.insert(
            "processed".to_string(),
            serde_json::Value::Number(self.processed.len().into()),
        );
        summary.insert(
            "skipped".to_string(),
            serde_json::Value::Array(
                self.skipped
                    .iter()
                    .map(|f| serde_json::Value::String(f.clone()))
                    .collect(),
            ),
        );
        summary.insert(
            "failed".to_string(),
            serde_json::Value::Array(
                self.failed
                    .iter()
                    .map(|f| serde_json::Value::String(f.clone()))
                    .collect(),
            ),
        );
        summary.insert(
            "duration_ms".to_string(),
            serde_json::Value::Number((self.duration.as_millis() as u64).into()),
        );
        summary
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_summary_map())?)
    }
}

/// Walks the immediate subdirectories of the datasets root and runs the
/// cleaning pipeline over every `.csv` file directly inside them. Never
/// recurses, so `analysis/` and previously produced `clean/` folders are
/// left alone.
pub struct BatchProcessor<S: Storage + Clone, C: ConfigProvider + Clone> {
    storage: S,
    config: C,
    monitor: Option<SystemMonitor>,
}

impl<S: Storage + Clone, C: ConfigProvider + Clone> BatchProcessor<S, C> {
    /// `storage` must be rooted at `config.datasets_root()` so that the
    /// per-file pipelines see dataset-relative paths.
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            monitor: None,
        }
    }

    /// 啟用或停用系統監控
    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = enabled.then(|| SystemMonitor::new(true));
        self
    }

    pub async fn run(&self) -> Result<BatchSummary> {
        let started_at = Utc::now();
        let execution_id = format!("clean-{}", started_at.format("%Y%m%d-%H%M%S"));
        let batch_start = Instant::now();

        if let Some(monitor) = &self.monitor {
            monitor.log_stats("Batch started");
        }

        let mut processed = Vec::new();
        let mut skipped = Vec::new();
        let mut failed = Vec::new();

        for dataset in sorted_entries(Path::new(self.config.datasets_root()))? {
            if !dataset.path().is_dir() {
                continue;
            }
            let dataset_name = dataset.file_name().to_string_lossy().into_owned();
            tracing::info!("📂 Processing dataset directory: {}", dataset_name);

            let files = match sorted_entries(&dataset.path()) {
                Ok(files) => files,
                Err(e) => {
                    tracing::error!("❌ Cannot list {}: {}", dataset_name, e);
                    continue;
                }
            };

            for file in files {
                let file_name = file.file_name().to_string_lossy().into_owned();
                if !file.path().is_file() || !file_name.to_lowercase().ends_with(".csv") {
                    continue;
                }

                let relative_path = format!("{}/{}", dataset_name, file_name);
                tracing::info!("📄 Processing file: {}", relative_path);

                let pipeline = CleanFilePipeline::new(
                    self.storage.clone(),
                    self.config.clone(),
                    relative_path.clone(),
                );
                let engine = EtlEngine::new(pipeline);

                let file_start = Instant::now();
                match engine.run().await {
                    Ok(output_path) => {
                        tracing::info!(
                            "✅ {} -> {} ({:?})",
                            relative_path,
                            output_path,
                            file_start.elapsed()
                        );
                        processed.push(relative_path);
                    }
                    Err(e @ EtlError::MissingTextColumn { .. }) => {
                        tracing::warn!("⏭️ {}", e.user_friendly_message());
                        skipped.push(relative_path);
                    }
                    Err(e) => {
                        tracing::error!("❌ Failed to process {}: {}", relative_path, e);
                        tracing::debug!("💡 {}", e.recovery_suggestion());
                        failed.push(relative_path);
                    }
                }
            }
        }

        if let Some(monitor) = &self.monitor {
            monitor.log_stats("Batch finished");
        }

        Ok(BatchSummary {
            execution_id,
            started_at,
            processed,
            skipped,
            failed,
            duration: batch_start.elapsed(),
        })
    }
}

// Deterministic walk order regardless of the underlying filesystem.
fn sorted_entries(path: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(path)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

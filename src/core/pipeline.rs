use crate::core::{ConfigProvider, Pipeline, Record, Storage, Table, TransformResult};
use crate::text::TextPipeline;
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Column names that may hold the tweet text, in lookup order.
pub const TEXT_COLUMN_CANDIDATES: [&str; 3] = ["tweet_text", "text", "Tweet_Content"];

/// ETL for one delimited file: parse, clean the text column row-wise, write
/// the augmented table to the dataset's `clean/` subdirectory.
pub struct CleanFilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    file_path: String,
    text: TextPipeline,
}

impl<S: Storage, C: ConfigProvider> CleanFilePipeline<S, C> {
    /// `file_path` is relative to the storage root, e.g.
    /// `hurricane_maria/all_tweets.csv`.
    pub fn new(storage: S, config: C, file_path: String) -> Self {
        let text = TextPipeline::new(config.normalize());
        Self {
            storage,
            config,
            file_path,
            text,
        }
    }

    // 依副檔名決定分隔符：.tsv 用 tab，其餘用逗號
    fn delimiter(&self) -> u8 {
        if self.file_path.to_lowercase().ends_with(".tsv") {
            b'\t'
        } else {
            b','
        }
    }

    /// Configured override first, then the candidate list.
    fn resolve_text_column(&self, table: &Table) -> Option<String> {
        if let Some(column) = self.config.text_column() {
            if table.has_column(column) {
                return Some(column.to_string());
            }
            tracing::warn!(
                "⚠️ Configured text column '{}' not present in {}, falling back to candidates",
                column,
                self.file_path
            );
        }

        TEXT_COLUMN_CANDIDATES
            .iter()
            .find(|c| table.has_column(c))
            .map(|c| c.to_string())
    }

    fn output_path(&self) -> String {
        let path = Path::new(&self.file_path);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_path);
        let file_name = format!("{}{}.csv", stem, self.config.clean_suffix());

        match path.parent() {
            Some(parent) if parent != Path::new("") => parent
                .join(self.config.clean_dir())
                .join(file_name)
                .to_string_lossy()
                .into_owned(),
            _ => format!("{}/{}", self.config.clean_dir(), file_name),
        }
    }

    fn serialize_csv(&self, table: &Table) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&table.headers)?;

        for record in &table.records {
            let row: Vec<&str> = table
                .headers
                .iter()
                .map(|h| record.get(h).unwrap_or(""))
                .collect();
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| EtlError::ProcessingError {
                message: format!("CSV writer flush failed: {}", e),
            })?;
        String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
            message: format!("Generated CSV is not valid UTF-8: {}", e),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CleanFilePipeline<S, C> {
    async fn extract(&self) -> Result<Table> {
        let bytes = self.storage.read_file(&self.file_path).await?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter())
            .flexible(true)
            .from_reader(bytes.as_slice());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            // 短列留空、多出的儲存格丟棄
            let mut data = HashMap::new();
            for (header, value) in headers.iter().zip(row.iter()) {
                data.insert(header.clone(), value.to_string());
            }
            records.push(Record { data });
        }

        Ok(Table { headers, records })
    }

    async fn transform(&self, data: Table) -> Result<TransformResult> {
        let text_column =
            self.resolve_text_column(&data)
                .ok_or_else(|| EtlError::MissingTextColumn {
                    file: self.file_path.clone(),
                    candidates: TEXT_COLUMN_CANDIDATES.join(", "),
                })?;

        let mut headers = data.headers.clone();
        headers.push("clean_text".to_string());
        if self.config.derive_stats() {
            headers.push("text_length".to_string());
            headers.push("token_count".to_string());
        }

        let mut cleaned_rows = 0;
        let mut empty_rows = 0;
        let mut records = Vec::with_capacity(data.records.len());

        for mut record in data.records {
            let raw = record.get(&text_column).map(str::to_string);
            let tokens = self.text.tokens(raw.as_deref());
            let clean_text = tokens.join(" ");

            cleaned_rows += 1;
            if clean_text.is_empty() {
                empty_rows += 1;
            }

            if self.config.derive_stats() {
                let text_length = raw.as_deref().map(|t| t.chars().count()).unwrap_or(0);
                record
                    .data
                    .insert("text_length".to_string(), text_length.to_string());
                record
                    .data
                    .insert("token_count".to_string(), tokens.len().to_string());
            }
            record.data.insert("clean_text".to_string(), clean_text);
            records.push(record);
        }

        let table = Table { headers, records };
        let csv_output = self.serialize_csv(&table)?;

        Ok(TransformResult {
            table,
            text_column,
            cleaned_rows,
            empty_rows,
            csv_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.output_path();
        self.storage
            .write_file(&output_path, result.csv_output.as_bytes())
            .await?;
        Ok(output_path)
    }
}

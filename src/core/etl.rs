use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        // Extract
        let table = self.pipeline.extract().await?;
        tracing::debug!("📥 Extracted {} rows", table.len());

        // Transform
        let result = self.pipeline.transform(table).await?;
        tracing::debug!(
            "🔄 Cleaned {} rows ({} came out empty) using column '{}'",
            result.cleaned_rows,
            result.empty_rows,
            result.text_column
        );

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::debug!("💾 Saved cleaned file to: {}", output_path);

        Ok(output_path)
    }
}

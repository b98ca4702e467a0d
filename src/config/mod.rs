pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tweet-etl")]
#[command(about = "An ETL tool for cleaning disaster tweet datasets")]
pub struct CliConfig {
    /// Directory containing one subdirectory per dataset
    #[arg(long, default_value = "./datasets")]
    pub datasets_root: String,

    /// Column holding the tweet text (otherwise resolved from known names)
    #[arg(long)]
    pub text_column: Option<String>,

    /// Lemmatize English tokens / stem Spanish tokens
    #[arg(long)]
    pub normalize: bool,

    /// Also derive text_length and token_count columns
    #[arg(long)]
    pub derive_stats: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn datasets_root(&self) -> &str {
        &self.datasets_root
    }

    fn text_column(&self) -> Option<&str> {
        self.text_column.as_deref()
    }

    fn normalize(&self) -> bool {
        self.normalize
    }

    fn derive_stats(&self) -> bool {
        self.derive_stats
    }

    fn clean_dir(&self) -> &str {
        "clean"
    }

    fn clean_suffix(&self) -> &str {
        "_clean"
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_path("datasets_root", &self.datasets_root)?;
        if let Some(column) = &self.text_column {
            validation::validate_non_empty_string("text_column", column)?;
        }
        Ok(())
    }
}

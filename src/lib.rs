pub mod config;
pub mod core;
pub mod domain;
pub mod text;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use crate::core::batch::{BatchProcessor, BatchSummary};
pub use crate::core::{etl::EtlEngine, pipeline::CleanFilePipeline};
pub use text::TextPipeline;
pub use utils::error::{EtlError, Result};

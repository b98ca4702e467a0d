use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Local filesystem storage rooted at the datasets directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    // Writes go to a temp file first; the output appears atomically on rename.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = full_path.with_extension("csv.tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &full_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let root = TempDir::new().unwrap();
        let storage = LocalStorage::new(root.path().to_str().unwrap().to_string());

        storage
            .write_file("maria/clean/tweets_clean.csv", b"text,clean_text\n")
            .await
            .unwrap();

        let written = storage.read_file("maria/clean/tweets_clean.csv").await.unwrap();
        assert_eq!(written, b"text,clean_text\n");
        // 不留下暫存檔
        assert!(!root.path().join("maria/clean/tweets_clean.csv.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let root = TempDir::new().unwrap();
        let storage = LocalStorage::new(root.path().to_str().unwrap().to_string());

        assert!(storage.read_file("absent.csv").await.is_err());
    }
}

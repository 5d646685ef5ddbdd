use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Largest process description accepted from disk.
pub const MAX_INPUT_BYTES: u64 = 1024 * 1024;

pub struct FileReader;

impl FileReader {
    /// Read a plain-text process description (`.txt` or `.md`).
    pub async fn read_file(path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if !matches!(extension.as_str(), "txt" | "md") {
            anyhow::bail!("Unsupported file format: {}", extension);
        }

        let size = fs::metadata(path)
            .await
            .with_context(|| format!("Failed to stat file: {:?}", path))?
            .len();
        if size > MAX_INPUT_BYTES {
            anyhow::bail!("{:?} is {} bytes, limit is {}", path, size, MAX_INPUT_BYTES);
        }

        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_reads_text_file() {
        let path = std::env::temp_dir().join(format!("{}.txt", Uuid::new_v4()));
        fs::write(&path, "The clerk signs it.").await.unwrap();

        let content = FileReader::read_file(&path).await.unwrap();
        fs::remove_file(&path).await.unwrap();

        assert_eq!(content, "The clerk signs it.");
    }

    #[tokio::test]
    async fn test_extension_is_case_insensitive() {
        let path = std::env::temp_dir().join(format!("{}.MD", Uuid::new_v4()));
        fs::write(&path, "# Refunds").await.unwrap();

        let content = FileReader::read_file(&path).await;
        fs::remove_file(&path).await.unwrap();

        assert_eq!(content.unwrap(), "# Refunds");
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let err = FileReader::read_file(Path::new("/nonexistent/process.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("process.txt"));
    }

    #[tokio::test]
    async fn test_rejects_unsupported_extension() {
        let err = FileReader::read_file(Path::new("process.pdf")).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported file format: pdf"));
    }
}

//! Real file system implementation.

use std::path::{Path, PathBuf};

use restdocs_application::ports::{FileSystem, FileSystemError};
use tokio::fs;

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn map_io(path: &Path, e: std::io::Error) -> FileSystemError {
    match e.kind() {
        std::io::ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => {
            FileSystemError::PermissionDenied(path.to_path_buf())
        }
        _ => FileSystemError::Io(e),
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path).await.map_err(|e| map_io(path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, contents).await.map_err(|e| map_io(path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::create_dir_all(path).await.map_err(FileSystemError::Io)
    }

    async fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_dir())
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FileSystemError::NotFound(path.to_path_buf())
            } else {
                FileSystemError::Io(e)
            }
        })?;

        while let Some(entry) = dir.next_entry().await? {
            entries.push(entry.path());
        }

        entries.sort(); // Deterministic ordering
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_creates_parents_and_reads_back() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("a/b/c.txt");
        let fs = TokioFileSystem::new();

        fs.write_file(&path, b"hello").await.expect("write");

        assert_eq!(fs.read_file_string(&path).await.expect("read"), "hello");
        assert!(fs.is_dir(&dir.path().join("a/b")).await);
    }

    #[tokio::test]
    async fn test_read_dir_is_sorted() {
        let dir = tempdir().expect("temp dir");
        let fs = TokioFileSystem::new();
        fs.write_file(&dir.path().join("b.adoc"), b"").await.expect("write");
        fs.write_file(&dir.path().join("a.adoc"), b"").await.expect("write");

        let entries = fs.read_dir(dir.path()).await.expect("list");

        assert_eq!(entries, vec![dir.path().join("a.adoc"), dir.path().join("b.adoc")]);
    }

    #[tokio::test]
    async fn test_missing_file_maps_to_not_found() {
        let dir = tempdir().expect("temp dir");
        let result = TokioFileSystem::new()
            .read_file_string(&dir.path().join("missing"))
            .await;
        assert!(matches!(result, Err(FileSystemError::NotFound(_))));
    }
}

// src/core/storage/file_store.rs

//! A thin asynchronous wrapper over the file system, rooted at one directory.
//!
//! Names passed in are expected to have been validated as plain relative
//! paths by the command layer; the store only joins them onto its root.

use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Size and modification time of a stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub size: u64,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub async fn exists(&self, name: &str) -> bool {
        fs::try_exists(self.resolve(name)).await.unwrap_or(false)
    }

    /// Creates an empty file, failing with `AlreadyExists` if it is present.
    pub async fn create_new(&self, name: &str) -> io::Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(name))
            .await?;
        Ok(())
    }

    /// Replaces the file's content, creating it if needed.
    pub async fn write(&self, name: &str, content: &[u8]) -> io::Result<()> {
        fs::write(self.resolve(name), content).await
    }

    /// Appends to the file, creating it if needed.
    pub async fn append(&self, name: &str, content: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.resolve(name))
            .await?;
        file.write_all(content).await?;
        file.flush().await
    }

    pub async fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(name)).await
    }

    pub async fn remove(&self, name: &str) -> io::Result<()> {
        fs::remove_file(self.resolve(name)).await
    }

    pub async fn rename(&self, from: &str, to: &str) -> io::Result<()> {
        fs::rename(self.resolve(from), self.resolve(to)).await
    }

    /// Names of the visible regular files directly under the root, sorted
    /// case-insensitively. Dotfiles are hidden.
    pub async fn list(&self) -> io::Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !entry.file_type().await?.is_file() {
                continue;
            }
            names.push(name);
        }
        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        Ok(names)
    }

    pub async fn stat(&self, name: &str) -> io::Result<FileInfo> {
        let metadata = fs::metadata(self.resolve(name)).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{name}' is not a regular file"),
            ));
        }
        Ok(FileInfo {
            size: metadata.len(),
            modified: DateTime::<Utc>::from(metadata.modified()?),
        })
    }
}

//! Local disk storage for post images.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// URL prefix under which stored files are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write `data` under a fresh random name (32 hex chars, no extension)
    /// and return that name.
    pub async fn save(&self, data: &[u8]) -> io::Result<String> {
        let name = Uuid::new_v4().simple().to_string();
        tokio::fs::write(self.dir.join(&name), data).await?;
        Ok(name)
    }

    pub async fn discard(&self, name: &str) -> io::Result<()> {
        tokio::fs::remove_file(self.dir.join(name)).await
    }

    pub fn url_for(name: &str) -> String {
        format!("{UPLOAD_URL_PREFIX}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn saves_under_generated_name() {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::new(tmp.path());

        let name = store.save(b"png bytes").await.unwrap();
        assert_eq!(name.len(), 32);
        assert!(name.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(std::fs::read(tmp.path().join(&name)).unwrap(), b"png bytes");

        store.discard(&name).await.unwrap();
        assert!(!tmp.path().join(&name).exists());
    }

    #[tokio::test]
    async fn ensure_dir_creates_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::new(tmp.path().join("a").join("b"));

        store.ensure_dir().await.unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn urls_use_the_fixed_prefix() {
        assert_eq!(UploadStore::url_for("abc"), "/uploads/abc");
    }
}

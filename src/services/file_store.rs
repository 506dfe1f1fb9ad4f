use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Upload storage. Handles are generated file names inside `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the directory if it does not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let handle = generate_handle(original_name);
        let path = self.root.join(&handle);

        tokio::fs::write(&path, bytes).await?;
        log::info!(
            "Stored upload '{}' as '{}' ({} bytes)",
            original_name,
            handle,
            bytes.len()
        );

        Ok(handle)
    }

    pub async fn resolve(&self, handle: &str) -> AppResult<PathBuf> {
        if handle.contains(['/', '\\']) || handle.contains("..") {
            return Err(AppError::InvalidInput(format!(
                "'{}' is not a valid file handle",
                handle
            )));
        }

        let path = self.root.join(handle);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(AppError::NotFound(format!("File '{}' not found", handle))),
        }
    }

    pub async fn read(&self, handle: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(handle).await?;
        Ok(tokio::fs::read(path).await?)
    }
}

/// `<uuid>.<ext>` with the original extension lower-cased. Characters other
/// than ASCII letters and digits become `_`, so every handle resolves.
fn generate_handle(original_name: &str) -> String {
    let id = Uuid::new_v4();
    match file_extension(original_name) {
        Some(ext) => {
            let ext: String = ext
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            format!("{}.{}", id, ext)
        }
        None => id.to_string(),
    }
}

/// Lower-cased extension of a file name, if it has one.
pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileStore::new(dir.path().join("uploads")).expect("store");
        (dir, store)
    }

    #[test]
    fn new_creates_missing_directory() {
        let (_dir, store) = temp_store();
        assert!(store.root().is_dir());
    }

    #[actix_web::test]
    async fn save_then_read_returns_identical_bytes() {
        let (_dir, store) = temp_store();
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

        let handle = store.save("lecture.pdf", &bytes).await.unwrap();
        let read_back = store.read(&handle).await.unwrap();

        assert_eq!(read_back, bytes);
    }

    #[actix_web::test]
    async fn handle_preserves_lowercased_extension() {
        let (_dir, store) = temp_store();

        let handle = store.save("Scan.JPEG", b"img").await.unwrap();
        assert!(handle.ends_with(".jpeg"));
        assert!(Uuid::parse_str(handle.trim_end_matches(".jpeg")).is_ok());

        let bare = store.save("README", b"text").await.unwrap();
        assert!(Uuid::parse_str(&bare).is_ok());
    }

    #[actix_web::test]
    async fn uploads_of_the_same_name_never_collide() {
        let (_dir, store) = temp_store();

        let first = store.save("notes.png", b"one").await.unwrap();
        let second = store.save("notes.png", b"two").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.read(&first).await.unwrap(), b"one");
        assert_eq!(store.read(&second).await.unwrap(), b"two");
    }

    #[actix_web::test]
    async fn resolve_missing_handle_is_not_found() {
        let (_dir, store) = temp_store();

        let err = store.resolve("missing.pdf").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn resolve_rejects_path_traversal() {
        let (_dir, store) = temp_store();

        for handle in ["../secret.pdf", "a/b.pdf", "..", "a\\b.png"] {
            let err = store.resolve(handle).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{handle}");
        }
    }

    #[actix_web::test]
    async fn unusual_extension_characters_still_give_a_resolvable_handle() {
        let (_dir, store) = temp_store();

        let handle = store.save("scan.p\\df", b"%PDF").await.unwrap();

        assert!(handle.ends_with(".p_df"), "{handle}");
        assert!(store.resolve(&handle).await.is_ok());
    }

    #[test]
    fn file_extension_handles_edge_cases() {
        assert_eq!(file_extension("a.PDF").as_deref(), Some("pdf"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension(".hidden"), None);
    }
}

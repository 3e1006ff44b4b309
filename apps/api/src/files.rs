//! # Product Image File Store
//!
//! Local-disk blob store for uploaded product images.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         File Store                                      │
//! │                                                                         │
//! │  Upload (POST /api/files/product)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  is_allowed(mimetype)? ── no ──► 400, nothing written                  │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  generate_name() ── UUID v4 + original extension                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save(name, bytes) ── one write under the configured root              │
//! │                                                                         │
//! │  Download (GET /api/files/product/{name})                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  open(name) ── rejects path separators, then tokio::fs::File           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store never interprets file contents; the accept-list is enforced on
//! the declared mimetype only.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// Mimetype subtypes accepted for upload.
const ALLOWED_SUBTYPES: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Local-disk blob store rooted at a configured directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`. Call [`ensure_root`](Self::ensure_root)
    /// before serving traffic.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    /// Creates the root directory (and parents) if absent.
    pub async fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Whether the declared mimetype is accepted for upload.
    ///
    /// Strict accept-list: the type must be `image` and the subtype one of
    /// [`ALLOWED_SUBTYPES`]. Empty or malformed mimetypes are rejected.
    pub fn is_allowed(mimetype: &str) -> bool {
        match mimetype.split_once('/') {
            Some(("image", subtype)) => ALLOWED_SUBTYPES.contains(&subtype),
            _ => false,
        }
    }

    /// The file extension for an accepted mimetype.
    pub fn extension_for(mimetype: &str) -> Option<&str> {
        match mimetype.split_once('/') {
            Some(("image", subtype)) if ALLOWED_SUBTYPES.contains(&subtype) => Some(subtype),
            _ => None,
        }
    }

    /// Generates a stored name for an accepted mimetype: UUID v4 plus the
    /// original extension. Returns `None` when the mimetype is rejected.
    pub fn generate_name(mimetype: &str) -> Option<String> {
        Self::extension_for(mimetype).map(|ext| format!("{}.{}", Uuid::new_v4(), ext))
    }

    /// The content type to serve a stored name with, inferred from its
    /// extension.
    pub fn content_type(name: &str) -> &'static str {
        match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        }
    }

    /// Whether a client-supplied name is safe to resolve under the root.
    ///
    /// Names are flat: anything that could traverse out of the root
    /// (separators, `..`, empty) is refused before touching the filesystem.
    fn is_safe_name(name: &str) -> bool {
        !name.is_empty()
            && !name.contains('/')
            && !name.contains('\\')
            && !name.contains("..")
    }

    /// Writes `bytes` under the root as `name`.
    pub async fn save(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        if !Self::is_safe_name(name) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "unsafe file name"));
        }
        let path = self.root.join(name);
        fs::write(&path, bytes).await?;
        debug!(name, size = bytes.len(), "Stored uploaded file");
        Ok(())
    }

    /// Opens a stored file for reading.
    ///
    /// ## Returns
    /// * `Ok(File)` - Open handle, ready to stream
    /// * `Err(NotFound)` - No such stored name (unsafe names included)
    pub async fn open(&self, name: &str) -> io::Result<fs::File> {
        if !Self::is_safe_name(name) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "unsafe file name"));
        }
        fs::File::open(self.root.join(name)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_list() {
        assert!(FileStore::is_allowed("image/png"));
        assert!(FileStore::is_allowed("image/jpeg"));
        assert!(FileStore::is_allowed("image/jpg"));
        assert!(FileStore::is_allowed("image/gif"));

        assert!(!FileStore::is_allowed("image/bmp"));
        assert!(!FileStore::is_allowed("application/pdf"));
        assert!(!FileStore::is_allowed("png"));
        assert!(!FileStore::is_allowed(""));
        assert!(!FileStore::is_allowed("image/"));
    }

    #[test]
    fn test_generated_name_keeps_extension() {
        let name = FileStore::generate_name("image/png").unwrap();
        assert!(name.ends_with(".png"));
        // UUID portion parses back
        let stem = name.strip_suffix(".png").unwrap();
        assert!(Uuid::parse_str(stem).is_ok());

        assert!(FileStore::generate_name("image/bmp").is_none());
    }

    #[test]
    fn test_content_type_inference() {
        assert_eq!(FileStore::content_type("a.png"), "image/png");
        assert_eq!(FileStore::content_type("a.jpg"), "image/jpeg");
        assert_eq!(FileStore::content_type("a.jpeg"), "image/jpeg");
        assert_eq!(FileStore::content_type("a.gif"), "image/gif");
        assert_eq!(FileStore::content_type("a"), "application/octet-stream");
    }

    #[test]
    fn test_unsafe_names_rejected() {
        assert!(!FileStore::is_safe_name("../etc/passwd"));
        assert!(!FileStore::is_safe_name("a/b.png"));
        assert!(!FileStore::is_safe_name("a\\b.png"));
        assert!(!FileStore::is_safe_name(""));
        assert!(FileStore::is_safe_name("cafe.png"));
    }

    #[tokio::test]
    async fn test_save_then_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.ensure_root().await.unwrap();

        store.save("test.png", b"not really a png").await.unwrap();

        let mut file = store.open("test.png").await.unwrap();
        let mut contents = Vec::new();
        use tokio::io::AsyncReadExt;
        file.read_to_end(&mut contents).await.unwrap();
        assert_eq!(contents, b"not really a png");
    }

    #[tokio::test]
    async fn test_open_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.open("missing.png").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let err = store.open("../outside.png").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

//! Shared application state.
//!
//! Dependencies are passed explicitly through axum's state extractor; there
//! is no global registry. Everything here is cheap to clone (`Database`
//! wraps a pooled handle, `Config` sits behind an `Arc`).

use std::sync::Arc;

use tienda_db::Database;

use crate::config::Config;
use crate::files::FileStore;

/// State handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle (connection pool + repositories).
    pub db: Database,

    /// Local-disk store for uploaded product images.
    pub files: FileStore,

    /// Loaded configuration.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, files: FileStore, config: Config) -> Self {
        AppState {
            db,
            files,
            config: Arc::new(config),
        }
    }
}

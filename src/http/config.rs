//! HTTP server configuration
//!
//! Values are fixed for this deployment. There are no environment or
//! command-line overrides.

use std::path::{Path, PathBuf};

use crate::storage::NOTES_DB;

/// Port the service listens on.
pub const DEFAULT_PORT: u16 = 3001;

/// Request body cap. Large enough for images embedded as data URIs.
pub const BODY_LIMIT: usize = 50 * 1024 * 1024;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 3001)
    pub port: u16,

    /// Directory holding the database file and the static assets
    pub root_dir: PathBuf,

    /// Maximum accepted request body, in bytes
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            root_dir: service_root(),
            body_limit: BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Config rooted at `root_dir` instead of the executable's directory
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path of the SQLite database file
    pub fn db_path(&self) -> PathBuf {
        self.root_dir.join(NOTES_DB)
    }

    /// Directory static files are served from
    pub fn static_dir(&self) -> &Path {
        &self.root_dir
    }
}

/// Directory containing the running executable, falling back to the
/// working directory.
fn service_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.body_limit, 50 * 1024 * 1024);
        assert_eq!(config.socket_addr(), "0.0.0.0:3001");
    }

    #[test]
    fn test_paths_are_under_root() {
        let config = ServerConfig::with_root("/srv/snow");
        assert_eq!(config.db_path(), PathBuf::from("/srv/snow/notes.db"));
        assert_eq!(config.static_dir(), Path::new("/srv/snow"));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}

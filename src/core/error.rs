use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModkitError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("malformed statuses file {}: {source}", .path.display())]
    MalformedStatuses {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("malformed config file {}: {source}", .path.display())]
    MalformedConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("malformed module manifest {}: {source}", .path.display())]
    MalformedManifest {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("module not found: {0}")]
    ModuleNotFound(String),
    #[error("file already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),
    #[error("validation error: {0}")]
    ValidationError(String),
}

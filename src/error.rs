//! Error types for css-watch.
//!
//! Startup failures (`InputNotFound`, `WatcherInit`) are fatal; everything
//! else is confined to a single rebuild and the watch loop keeps running.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for css-watch operations
pub type WatchResult<T> = Result<T, WatchError>;

/// Main error type for css-watch operations
#[derive(Error, Debug)]
pub enum WatchError {
    /// Input file missing at startup
    #[error("input file {} does not exist", path.display())]
    InputNotFound { path: PathBuf },

    /// The file-system watcher could not attach to the watch root
    #[error("failed to start watching {}: {message}", path.display())]
    WatcherInit { path: PathBuf, message: String },

    /// Input unreadable at rebuild time
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stylesheet compiler rejected the input
    #[error("compile error: {message}")]
    Compile { message: String },

    /// Minification failed
    #[error("minify error: {message}")]
    Minify { message: String },

    /// Source map serialization failed
    #[error("source map error: {message}")]
    SourceMap { message: String },

    /// Output path unwritable
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

//! css-watch - recompiles a CSS bundle when the entry stylesheet or the
//! directory tree around it changes.
//!
//! The pipeline: watch the entry point's directory recursively, filter
//! events down to qualifying stylesheet files, and run
//! read -> compile -> (minify) -> write for each one. Compilation and
//! minification are delegated to `lightningcss`.

pub mod compiler;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reporter;
pub mod watcher;

// Re-exports for convenience
pub use config::WatchConfig;
pub use error::{WatchError, WatchResult};
pub use pipeline::{rebuild, RebuildResult};
pub use reporter::Reporter;
pub use watcher::{start, ChangeEvent, ChangeKind, Trigger, WatchEvent, WatcherHandle};

//! Watch event types and the NDJSON records emitted in `--json` mode.

use std::path::{Path, PathBuf};

/// The three event kinds surfaced to the rebuild pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Changed,
    Deleted,
}

impl ChangeKind {
    /// Fixed label used on rebuild report lines.
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Created => "file created",
            ChangeKind::Changed => "file changed",
            ChangeKind::Deleted => "file deleted",
        }
    }
}

/// A qualifying file-system event. Produced by the watcher, consumed once
/// by the rebuild pipeline, then discarded.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Absolute path of the affected file.
    pub path: PathBuf,
}

/// What caused a rebuild.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// The `--compile` rebuild that runs once at startup.
    Startup,
    /// A qualifying file-system event.
    Change(ChangeEvent),
}

impl Trigger {
    pub fn label(&self) -> &'static str {
        match self {
            Trigger::Startup => "compile on run",
            Trigger::Change(event) => event.kind.label(),
        }
    }

    /// The affected path, if the trigger carries one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Trigger::Startup => None,
            Trigger::Change(event) => Some(&event.path),
        }
    }
}

/// Watch event records for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        input: String,
        output: String,
        source_map: bool,
        compile_on_run: bool,
        minify: bool,
    },
    RebuildStarted {
        trigger: String,
        path: Option<String>,
    },
    RebuildComplete,
    Error {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

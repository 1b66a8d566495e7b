//! Watcher construction and raw event classification.

use std::sync::mpsc::{channel, Receiver};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::WatchConfig;
use crate::error::{WatchError, WatchResult};

use super::event::{ChangeEvent, ChangeKind};

/// Keeps the OS watcher alive; dropping it stops watching.
#[derive(Debug)]
pub struct WatcherHandle {
    _watcher: RecommendedWatcher,
}

/// Start watching the config's watch root recursively.
///
/// Qualifying events arrive on the returned receiver. Fails without
/// starting if the backend cannot attach to the root.
pub fn start(config: &WatchConfig) -> WatchResult<(WatcherHandle, Receiver<ChangeEvent>)> {
    let (tx, rx) = channel();

    let filter = config.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            let Ok(event) = res else { return };
            let Some(kind) = classify(&event.kind) else { return };
            for path in event.paths {
                if filter.is_qualifying(&path) {
                    // A send failure means the receiver is gone and the
                    // process is shutting down.
                    let _ = tx.send(ChangeEvent { kind, path });
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| WatchError::WatcherInit {
        path: config.watch_root.clone(),
        message: e.to_string(),
    })?;

    watcher
        .watch(&config.watch_root, RecursiveMode::Recursive)
        .map_err(|e| WatchError::WatcherInit {
            path: config.watch_root.clone(),
            message: e.to_string(),
        })?;

    Ok((WatcherHandle { _watcher: watcher }, rx))
}

/// Map raw backend event kinds to the three-valued [`ChangeKind`]. Access
/// notifications and catch-all kinds never reach the pipeline.
fn classify(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Modify(_) => Some(ChangeKind::Changed),
        EventKind::Remove(_) => Some(ChangeKind::Deleted),
        _ => None,
    }
}

//! Directory watching filtered to qualifying stylesheet files.
//!
//! [`start`] attaches a recursive `notify` subscription to the watch root
//! and surfaces classified [`ChangeEvent`]s over a channel; everything
//! non-qualifying is suppressed before it reaches the rebuild pipeline.

mod event;
mod watch;

pub use event::{ChangeEvent, ChangeKind, Trigger, WatchEvent};
pub use watch::{start, WatcherHandle};

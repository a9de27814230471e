//! MPD Remote - protocol client core
//!
//! Talks to a Music Player Daemon over its line-oriented text protocol:
//! - One short-lived TCP connection per command, with `OK`/`ACK` framing
//! - Typed parsing of `status` and `playlistinfo` into a [`Snapshot`]
//! - An `idle` long-poll watcher that signals when the snapshot is stale
//! - Intent operations (play, pause, delete, move, seek) on the current snapshot

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod snapshot;
pub mod watcher;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{MpdError, Result};
pub use model::{PlaybackState, Snapshot, Track};
pub use protocol::{CommandExecutor, MpdClient};
pub use snapshot::{fetch_snapshot, refresh_snapshot};
pub use watcher::{spawn_watcher, ChangeNotification, WatcherHandle};

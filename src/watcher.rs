//! Idle watcher: long-polls MPD and tells the caller when to refresh
//!
//! MPD's `idle` command blocks until a subsystem changes. The watcher issues it
//! in a loop on its own task and connection, sending a [`ChangeNotification`]
//! whenever the queue or the player changed. It never retries: the first
//! failed `idle` ends the task, and restarting it is the caller's decision.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::protocol::parse::{changed_subsystems, is_relevant_change};
use crate::protocol::CommandExecutor;

/// Capacity of the notification channel
pub const NOTIFICATION_BUFFER: usize = 1;

/// "Rebuild your snapshot now." Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNotification;

/// A running watcher task and the receiving end of its notifications
pub struct WatcherHandle {
    pub notifications: mpsc::Receiver<ChangeNotification>,
    /// Resolves with the error that stopped the watcher, or `Ok` on shutdown.
    pub task: JoinHandle<Result<()>>,
}

/// Spawn the watcher loop on a dedicated task.
pub fn spawn_watcher<E>(executor: E, shutdown: CancellationToken) -> WatcherHandle
where
    E: CommandExecutor + 'static,
{
    let (tx, rx) = mpsc::channel(NOTIFICATION_BUFFER);
    let task = tokio::spawn(async move { run_watcher(&executor, tx, shutdown).await });

    WatcherHandle {
        notifications: rx,
        task,
    }
}

/// Issue `idle` until it fails, the token is cancelled, or nobody listens anymore.
///
/// At most one notification is sent per `idle` response.
pub async fn run_watcher<E>(
    executor: &E,
    notify: mpsc::Sender<ChangeNotification>,
    shutdown: CancellationToken,
) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    info!("Idle watcher started");

    loop {
        let changes = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Idle watcher received shutdown signal");
                return Ok(());
            }
            result = executor.execute("idle") => match result {
                Ok(changes) => changes,
                Err(e) => {
                    warn!("Idle watcher stopped: {}", e);
                    return Err(e);
                }
            },
        };

        debug!(changed = ?changed_subsystems(&changes), "MPD idle returned");

        if !is_relevant_change(&changes) {
            continue;
        }

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Idle watcher received shutdown signal");
                return Ok(());
            }
            sent = notify.send(ChangeNotification) => {
                if sent.is_err() {
                    info!("Idle watcher stopped: notification receiver dropped");
                    return Ok(());
                }
            }
        }
    }
}

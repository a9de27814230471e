//! MPD Remote - prints the player snapshot and reprints it on every change.

use mpd_remote::{
    config, fetch_snapshot, refresh_snapshot, spawn_watcher, ChangeNotification, MpdClient,
    Snapshot,
};

use anyhow::Result;
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_snapshot(snapshot: &Snapshot) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mpd_remote=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        "Starting MPD Remote v{} ({})",
        env!("MPD_REMOTE_VERSION"),
        env!("MPD_REMOTE_GIT_SHA")
    );

    let config = config::load_config()?;
    let client = MpdClient::from_config(&config);
    tracing::info!("Using MPD at {}", client.address());

    let mut snapshot = fetch_snapshot(&client).await?;
    print_snapshot(&snapshot)?;

    let shutdown = CancellationToken::new();
    let mut watcher = spawn_watcher(client.clone(), shutdown.clone());

    let outcome = watch_loop(&client, &mut snapshot, &mut watcher.notifications).await;

    // Stop the watcher on every exit path before reporting the outcome
    shutdown.cancel();
    watcher.task.await??;
    outcome
}

async fn watch_loop(
    client: &MpdClient,
    snapshot: &mut Snapshot,
    notifications: &mut mpsc::Receiver<ChangeNotification>,
) -> Result<()> {
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                return Ok(());
            }
            notification = notifications.recv() => {
                if notification.is_none() {
                    return Ok(());
                }
                match refresh_snapshot(client, snapshot).await {
                    Ok(()) => print_snapshot(snapshot)?,
                    Err(e) => tracing::warn!("Snapshot refresh failed, keeping last: {}", e),
                }
            }
        }
    }
}

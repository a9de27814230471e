//! Builds a full [`Snapshot`] from `status` + `playlistinfo`
//!
//! The two commands use separate connections, so the queue and the status may
//! describe slightly different moments if the server changes in between.

use tracing::debug;

use crate::error::Result;
use crate::model::Snapshot;
use crate::protocol::parse::{parse_elapsed, parse_playback_state, parse_queue, parse_song_id};
use crate::protocol::CommandExecutor;

/// Fetch a fresh snapshot. Any failing step aborts the whole build.
///
/// `highlighted` starts at 0; carrying the cursor over is up to the caller.
pub async fn fetch_snapshot<E>(executor: &E) -> Result<Snapshot>
where
    E: CommandExecutor + ?Sized,
{
    let status = executor.execute("status").await?;
    let playback_state = parse_playback_state(&status)?;
    let elapsed = parse_elapsed(&status)?;
    let active_song_id = parse_song_id(&status)?;

    let listing = executor.execute("playlistinfo").await?;
    let queue = parse_queue(&listing)?;

    debug!(
        state = ?playback_state,
        queue_len = queue.len(),
        "Snapshot fetched"
    );

    Ok(Snapshot {
        playback_state,
        elapsed,
        active_song_id,
        queue,
        highlighted: 0,
    })
}

/// Replace `current` with a fresh snapshot, keeping its cursor.
///
/// On failure `current` is left untouched, so a caller can keep showing it.
pub async fn refresh_snapshot<E>(executor: &E, current: &mut Snapshot) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    let mut fresh = fetch_snapshot(executor).await?;
    fresh.carry_highlight(current.highlighted);
    *current = fresh;
    Ok(())
}

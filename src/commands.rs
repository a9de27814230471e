//! User-intent operations, each issuing at most one MPD command
//!
//! These run on their own connections and never go through the idle watcher.
//! State changes they cause reach the UI through the watcher's next notification.

use tracing::debug;

use crate::error::{MpdError, Result};
use crate::model::{PlaybackState, Snapshot, Track};
use crate::protocol::CommandExecutor;

fn track_id(track: &Track) -> Result<u32> {
    track.id.ok_or_else(|| MpdError::MissingTrackId {
        uri: track.uri.clone(),
    })
}

/// Start playback at the highlighted queue entry. No-op on an empty queue.
pub async fn play_highlighted<E>(executor: &E, snapshot: &Snapshot) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    let Some(track) = snapshot.highlighted_track() else {
        return Ok(());
    };
    executor.execute(&format!("playid {}", track_id(track)?)).await?;
    Ok(())
}

/// Pause when playing, resume when paused, nothing when stopped.
pub async fn toggle_pause<E>(executor: &E, snapshot: &Snapshot) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    let command = match snapshot.playback_state {
        PlaybackState::Playing => "pause 1",
        PlaybackState::Paused => "pause 0",
        PlaybackState::Stopped => return Ok(()),
    };
    executor.execute(command).await?;
    Ok(())
}

/// Remove the highlighted entry from the queue. No-op on an empty queue.
pub async fn delete_highlighted<E>(executor: &E, snapshot: &Snapshot) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    let Some(track) = snapshot.highlighted_track() else {
        return Ok(());
    };
    executor.execute(&format!("deleteid {}", track_id(track)?)).await?;
    Ok(())
}

/// Swap the highlighted entry with the one above it, keeping the cursor on it.
///
/// The cursor only moves once the server accepted the move.
pub async fn move_highlighted_up<E>(executor: &E, snapshot: &mut Snapshot) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    let from = snapshot.highlighted;
    if from == 0 {
        return Ok(());
    }
    executor.execute(&format!("move {} {}", from, from - 1)).await?;
    snapshot.highlighted = from - 1;
    Ok(())
}

/// Swap the highlighted entry with the one below it, keeping the cursor on it.
pub async fn move_highlighted_down<E>(executor: &E, snapshot: &mut Snapshot) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    let from = snapshot.highlighted;
    if from + 1 >= snapshot.queue.len() {
        return Ok(());
    }
    executor.execute(&format!("move {} {}", from, from + 1)).await?;
    snapshot.highlighted = from + 1;
    Ok(())
}

pub async fn seek_backward<E>(executor: &E, seconds: u32) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    executor.execute(&format!("seekcur -{}", seconds)).await?;
    Ok(())
}

/// Seek forward in the current track.
///
/// MPD answers "Decoder failed to seek" when the target lies past the end of
/// the track; that case counts as success.
pub async fn seek_forward<E>(executor: &E, seconds: u32) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    match executor.execute(&format!("seekcur +{}", seconds)).await {
        Ok(_) => Ok(()),
        Err(e) if e.is_seek_past_end() => {
            debug!(seconds, "Seek past end of track ignored");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

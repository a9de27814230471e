//! Typed playback state built from MPD responses

use serde::{Deserialize, Serialize};

/// Player state as reported by the `state:` line of `status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Stopped,
    Paused,
}

/// One entry of the play queue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    /// Server-assigned queue id. Only valid while the track stays queued.
    pub id: Option<u32>,
    /// Length in seconds
    pub duration: Option<f32>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track_number: Option<u32>,
}

/// Everything the UI shows, rebuilt from scratch on each refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub playback_state: PlaybackState,
    pub elapsed: Option<f32>,
    pub active_song_id: Option<u32>,
    pub queue: Vec<Track>,
    /// Cursor position in `queue`. Owned by the caller, never by the server.
    pub highlighted: usize,
}

impl Snapshot {
    pub fn highlighted_track(&self) -> Option<&Track> {
        self.queue.get(self.highlighted)
    }

    /// The queue entry currently loaded by the player
    pub fn active_track(&self) -> Option<&Track> {
        let id = self.active_song_id?;
        self.queue.iter().find(|t| t.id == Some(id))
    }

    /// Move a cursor from a previous snapshot onto this one, clamped to the queue.
    pub fn carry_highlight(&mut self, previous: usize) {
        self.highlighted = previous.min(self.queue.len().saturating_sub(1));
    }
}

//! Parsers for `status`, `playlistinfo` and `idle` response payloads
//!
//! Payloads are `key: value` lines. Keys are matched with the exact case MPD
//! emits (`Title`, not `title`); servers that vary the case will not match.

use std::str::FromStr;

use crate::error::{MpdError, Result};
use crate::model::{PlaybackState, Track};

/// Split a response line on the first `": "`.
///
/// A bare `key:` line yields the key with no value.
fn split_field(line: &str) -> (&str, Option<&str>) {
    match line.split_once(": ") {
        Some((key, value)) => (key, Some(value)),
        None => (line.strip_suffix(':').unwrap_or(line), None),
    }
}

/// Value of the first line starting with `prefix`, if it has any text after it.
fn status_value<'a>(status: &'a str, prefix: &str) -> Option<&'a str> {
    status
        .lines()
        .filter_map(|line| line.strip_prefix(prefix))
        .find(|value| !value.is_empty())
}

fn parse_number<T: FromStr>(value: &str, what: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| MpdError::parse(format!("could not parse {}: {}", what, e)))
}

/// Playback state from a `status` payload. A missing or unknown `state:` line is an error.
pub fn parse_playback_state(status: &str) -> Result<PlaybackState> {
    status
        .lines()
        .filter_map(|line| line.strip_prefix("state: "))
        .find_map(|word| match word {
            "play" => Some(PlaybackState::Playing),
            "stop" => Some(PlaybackState::Stopped),
            "pause" => Some(PlaybackState::Paused),
            _ => None,
        })
        .ok_or_else(|| MpdError::parse("mpdState not found"))
}

/// Seconds into the current track, absent when nothing is loaded.
pub fn parse_elapsed(status: &str) -> Result<Option<f32>> {
    status_value(status, "elapsed: ")
        .map(|v| parse_number(v, "elapsed"))
        .transpose()
}

/// Queue id of the current track, absent when nothing is loaded.
pub fn parse_song_id(status: &str) -> Result<Option<u32>> {
    status_value(status, "songid: ")
        .map(|v| parse_number(v, "songid"))
        .transpose()
}

/// Line-by-line accumulator for a `playlistinfo` listing.
///
/// Each `file:` line starts a new track; the previous one is flushed first.
#[derive(Debug, Default)]
pub struct QueueParser {
    queue: Vec<Track>,
    current: Track,
}

impl QueueParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) -> Result<()> {
        let (key, value) = split_field(line);

        match (key, value) {
            ("file", value) => {
                self.flush();
                match value {
                    Some(uri) if !uri.is_empty() => self.current.uri = uri.to_string(),
                    _ => return Err(MpdError::parse("encountered empty URI")),
                }
            }
            ("Id", Some(v)) => self.current.id = Some(parse_number(v, "songid")?),
            ("duration", Some(v)) => self.current.duration = Some(parse_number(v, "duration")?),
            ("Title", Some(v)) => self.current.title = Some(v.to_string()),
            ("Artist", Some(v)) => self.current.artist = Some(v.to_string()),
            ("Album", Some(v)) => self.current.album = Some(v.to_string()),
            ("Track", Some(v)) => self.current.track_number = Some(parse_number(v, "track")?),
            _ => {}
        }
        Ok(())
    }

    /// Push the in-progress track onto the queue if it has a URI.
    ///
    /// Fields seen before any `file:` line stay with the next track.
    fn flush(&mut self) {
        if !self.current.uri.is_empty() {
            self.queue.push(std::mem::take(&mut self.current));
        }
    }

    pub fn finish(mut self) -> Vec<Track> {
        self.flush();
        self.queue
    }
}

/// Decode a `playlistinfo` payload into queue order.
pub fn parse_queue(listing: &str) -> Result<Vec<Track>> {
    let mut parser = QueueParser::new();
    for line in listing.lines() {
        parser.feed(line)?;
    }
    Ok(parser.finish())
}

/// Subsystems named by `changed:` lines of an `idle` response
pub fn changed_subsystems(idle: &str) -> Vec<&str> {
    idle.lines()
        .filter_map(|line| match split_field(line) {
            ("changed", Some(name)) => Some(name),
            _ => None,
        })
        .collect()
}

/// Whether an `idle` response mentions the queue or the player.
pub fn is_relevant_change(idle: &str) -> bool {
    idle.lines()
        .any(|line| line.contains("playlist") || line.contains("player"))
}

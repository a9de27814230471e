//! Error taxonomy for the MPD client

use thiserror::Error;

/// ACK text MPD returns when a relative seek runs past the end of a track
const SEEK_PAST_END: &str = "Decoder failed to seek";

/// Errors that can occur while talking to the daemon.
#[derive(Error, Debug)]
pub enum MpdError {
    /// The server could not be reached, or did not greet like an MPD server.
    #[error("cannot connect to {addr}: {reason}")]
    Connect { addr: String, reason: String },

    /// I/O failure in the middle of a command exchange.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The server answered with an `ACK` line. Carries that line verbatim.
    #[error("received mpd error {0}")]
    Protocol(String),

    /// Well-framed response whose content is not what we expected.
    #[error("could not parse response: {0}")]
    Parse(String),

    #[error("invalid command {0:?}")]
    InvalidCommand(String),

    /// A queue entry needed for a command was listed without an `Id`.
    #[error("track {uri} has no id")]
    MissingTrackId { uri: String },
}

impl MpdError {
    pub(crate) fn connect(addr: &str, reason: impl ToString) -> Self {
        MpdError::Connect {
            addr: addr.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        MpdError::Parse(message.into())
    }

    /// Raw `ACK ...` line for protocol errors
    pub fn ack_text(&self) -> Option<&str> {
        match self {
            MpdError::Protocol(line) => Some(line),
            _ => None,
        }
    }

    /// Whether this is the error MPD reports when seeking beyond the end of a track.
    pub fn is_seek_past_end(&self) -> bool {
        self.ack_text()
            .is_some_and(|line| line.contains(SEEK_PAST_END))
    }
}

pub type Result<T> = std::result::Result<T, MpdError>;

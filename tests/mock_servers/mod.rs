//! Mock servers for integration testing
//!
//! Simulates the MPD daemon so the client can be exercised end to end
//! without a real music server.

pub mod mpd;

pub use mpd::MockMpdServer;

//! MPD wire protocol: connections, command execution and response parsing

pub mod connection;
pub mod executor;
pub mod parse;

pub use connection::{Connection, DEFAULT_GREETING_PREFIX};
pub use executor::{CommandExecutor, MpdClient};

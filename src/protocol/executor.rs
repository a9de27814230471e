//! Request/response command execution, one connection per command

use async_trait::async_trait;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{MpdError, Result};
use crate::protocol::connection::{Connection, DEFAULT_GREETING_PREFIX};

/// Anything that can run a single MPD command and return its response payload.
///
/// Snapshot building, the command façade and the idle watcher only need this,
/// which keeps them testable without a server.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &str) -> Result<String>;
}

/// TCP client. Holds only the address; every command dials a fresh connection.
#[derive(Debug, Clone)]
pub struct MpdClient {
    address: String,
    greeting_prefix: String,
}

impl MpdClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            greeting_prefix: DEFAULT_GREETING_PREFIX.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.address.clone()).with_greeting_prefix(config.greeting_prefix.clone())
    }

    /// Override the greeting prefix expected from the server
    pub fn with_greeting_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.greeting_prefix = prefix.into();
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Open and greet a connection without sending anything.
    pub async fn connect(&self) -> Result<Connection> {
        Connection::open(&self.address, &self.greeting_prefix).await
    }
}

#[async_trait]
impl CommandExecutor for MpdClient {
    /// No timeout is applied. `idle` blocks here until the server reports a change.
    async fn execute(&self, command: &str) -> Result<String> {
        validate_command(command)?;

        let mut conn = self.connect().await?;
        debug!(command, addr = %self.address, "MPD request");

        // `conn` drops when this returns, closing the socket on every path
        conn.exchange(command).await
    }
}

fn validate_command(command: &str) -> Result<()> {
    if command.trim().is_empty() || command.contains(['\n', '\r']) {
        return Err(MpdError::InvalidCommand(command.to_string()));
    }
    Ok(())
}

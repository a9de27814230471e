//! In-memory executor used by unit tests

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{MpdError, Result};
use crate::protocol::CommandExecutor;

/// Replays canned responses in order and records every command it receives.
///
/// Once the script runs out, every call fails with a transport error.
pub(crate) struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<String>>>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub(crate) fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, command: &str) -> Result<String> {
        self.commands.lock().unwrap().push(command.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(MpdError::Transport(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "script exhausted",
                )))
            })
    }
}

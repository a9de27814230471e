#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Mock MPD for testing
//!
//! Speaks the line protocol on a random local port: greets each connection,
//! answers commands from a response table, and replays scripted `idle`
//! results. Records every command and every client-side close.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub const GREETING: &str = "OK MPD 0.23.5\n";

/// Mock MPD state
#[derive(Debug, Default)]
struct MockMpdState {
    /// Raw response (including the OK/ACK terminator) per command line
    responses: HashMap<String, String>,
    /// Commands that get a partial response followed by a hang-up
    hang_up: HashMap<String, String>,
    /// Responses handed out to successive `idle` commands
    idle_script: VecDeque<String>,
    commands: Vec<String>,
    accepted: usize,
    closed: usize,
}

/// Mock MPD server
pub struct MockMpdServer {
    addr: SocketAddr,
    state: Arc<RwLock<MockMpdState>>,
    handle: JoinHandle<()>,
}

impl MockMpdServer {
    /// Start a mock MPD on a random port
    pub async fn start() -> Self {
        Self::start_with_greeting(GREETING).await
    }

    /// Start a server that sends `greeting` instead of the MPD one
    pub async fn start_with_greeting(greeting: &'static str) -> Self {
        let state = Arc::new(RwLock::new(MockMpdState::default()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state_clone = state.clone();
        let handle = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, _)) => {
                        state_clone.write().await.accepted += 1;
                        let state = state_clone.clone();
                        tokio::spawn(async move {
                            handle_connection(stream, greeting, state).await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Set the raw response for a command, terminator included
    pub async fn set_response(&self, command: &str, response: &str) {
        self.state
            .write()
            .await
            .responses
            .insert(command.to_string(), response.to_string());
    }

    /// Answer `command` with `partial` and then close the socket
    pub async fn hang_up_on(&self, command: &str, partial: &str) {
        self.state
            .write()
            .await
            .hang_up
            .insert(command.to_string(), partial.to_string());
    }

    /// Queue the `changed:` payload for the next `idle`. Unscripted idles block.
    pub async fn push_idle(&self, changes: &str) {
        self.state
            .write()
            .await
            .idle_script
            .push_back(format!("{}OK\n", changes));
    }

    pub async fn commands(&self) -> Vec<String> {
        self.state.read().await.commands.clone()
    }

    pub async fn accepted_connections(&self) -> usize {
        self.state.read().await.accepted
    }

    /// Wait until the client has closed `count` connections
    pub async fn wait_for_closed(&self, count: usize) -> bool {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.state.read().await.closed < count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .is_ok()
    }

    /// Stop the mock server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

/// Handle a single client connection
async fn handle_connection(
    stream: TcpStream,
    greeting: &'static str,
    state: Arc<RwLock<MockMpdState>>,
) {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    if writer.write_all(greeting.as_bytes()).await.is_err() {
        return;
    }

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => {
                state.write().await.closed += 1;
                break;
            }
            Ok(_) => {
                let command = line.trim_end().to_string();
                match next_reply(&command, &state).await {
                    Reply::Respond(response) => {
                        if writer.write_all(response.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                    Reply::HangUp(partial) => {
                        let _ = writer.write_all(partial.as_bytes()).await;
                        break;
                    }
                    // Idle with nothing to report: keep the client waiting
                    Reply::Block => {}
                }
            }
        }
    }
}

enum Reply {
    Respond(String),
    HangUp(String),
    Block,
}

async fn next_reply(command: &str, state: &Arc<RwLock<MockMpdState>>) -> Reply {
    let mut state = state.write().await;
    state.commands.push(command.to_string());

    if let Some(partial) = state.hang_up.get(command) {
        return Reply::HangUp(partial.clone());
    }
    if command == "idle" {
        return match state.idle_script.pop_front() {
            Some(response) => Reply::Respond(response),
            None => Reply::Block,
        };
    }
    Reply::Respond(
        state
            .responses
            .get(command)
            .cloned()
            .unwrap_or_else(|| "OK\n".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn mock_mpd_greets_and_answers() {
        let server = MockMpdServer::start().await;
        server.set_response("status", "state: stop\nOK\n").await;

        let mut stream = TcpStream::connect(server.addr()).await.unwrap();
        stream.write_all(b"status\n").await.unwrap();

        let expected = format!("{}state: stop\nOK\n", GREETING);
        let mut response = vec![0u8; expected.len()];
        stream.read_exact(&mut response).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&response), expected);

        server.stop().await;
    }
}

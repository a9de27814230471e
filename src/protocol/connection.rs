//! Single-use TCP connection to the daemon
//!
//! MPD greets every new client with `OK MPD <version>`, then answers each
//! request line with zero or more `key: value` lines followed by either
//! `OK` or `ACK <error>`.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::{MpdError, Result};

/// Greeting prefix sent by MPD on connect (followed by the protocol version)
pub const DEFAULT_GREETING_PREFIX: &str = "OK MPD ";

const OK_LINE: &str = "OK\n";
const ACK_PREFIX: &str = "ACK ";

/// An open, greeted connection. The socket closes when this value is dropped.
pub struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    greeting: String,
    prefix_len: usize,
}

impl Connection {
    /// Dial `addr` (host:port) and validate the greeting line.
    pub async fn open(addr: &str, greeting_prefix: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| MpdError::connect(addr, e))?;

        let (read_half, writer) = stream.into_split();
        let mut reader = BufReader::new(read_half);
        let greeting = read_greeting(&mut reader, addr, greeting_prefix).await?;

        debug!(addr, greeting = greeting.trim_end(), "MPD connection opened");

        Ok(Self {
            reader,
            writer,
            greeting,
            prefix_len: greeting_prefix.len(),
        })
    }

    /// Protocol version announced in the greeting, e.g. `0.23.5`
    pub fn server_version(&self) -> Option<&str> {
        let version = self.greeting.get(self.prefix_len..)?.trim();
        (!version.is_empty()).then_some(version)
    }

    /// Send one command line and collect its framed response.
    pub async fn exchange(&mut self, command: &str) -> Result<String> {
        self.writer.write_all(command.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        read_response(&mut self.reader).await
    }
}

/// Read the first line from a fresh connection and check it is an MPD greeting.
pub(crate) async fn read_greeting<R>(reader: &mut R, addr: &str, prefix: &str) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let line = read_protocol_line(reader)
        .await
        .map_err(|e| MpdError::connect(addr, e))?;

    if !line.starts_with(prefix) {
        return Err(MpdError::connect(
            addr,
            format!("no mpd server found (greeting {:?})", line.trim_end()),
        ));
    }
    Ok(line)
}

/// Read response lines until `OK` or `ACK`.
///
/// On success the lines before `OK` are returned as-is, newlines included.
/// Lines read before an `ACK` are discarded.
pub async fn read_response<R>(reader: &mut R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut payload = String::new();

    loop {
        let line = read_protocol_line(reader).await?;

        if line == OK_LINE {
            debug!(bytes = payload.len(), "MPD response OK");
            return Ok(payload);
        }
        if line.starts_with(ACK_PREFIX) {
            let ack = line.trim_end().to_string();
            debug!(ack = %ack, "MPD response ACK");
            return Err(MpdError::Protocol(ack));
        }
        payload.push_str(&line);
    }
}

/// Read one complete `\n`-terminated line. EOF, even mid-line, is a transport error.
///
/// A line that is not valid UTF-8 arrived intact, so it is a parse error.
async fn read_protocol_line<R>(reader: &mut R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let n = reader.read_line(&mut line).await.map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => MpdError::parse(format!("response is not UTF-8: {}", e)),
        _ => MpdError::Transport(e),
    })?;

    if n == 0 || !line.ends_with('\n') {
        return Err(MpdError::Transport(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed by server",
        )));
    }
    Ok(line)
}

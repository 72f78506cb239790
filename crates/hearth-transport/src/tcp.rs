//! Telnet-over-TCP transport.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::inbox::{EventSender, Inbox, TransportEvent};
use crate::line::{DEFAULT_MAX_LINE_LEN, LineBuffer};
use crate::telnet::IacFilter;
use crate::{CommandLine, ConnectionId, Transport, TransportError};

/// A line-oriented [`Transport`] for telnet clients.
///
/// Binding spawns an accept loop; each accepted socket gets its own task
/// that frames input into [`CommandLine`]s and writes queued output with
/// a trailing `\r\n`.
pub struct TelnetTransport {
    local_addr: SocketAddr,
    inbox: Inbox,
    accept_task: JoinHandle<()>,
}

impl TelnetTransport {
    /// Binds a listener on `addr` and starts accepting connections.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        Self::bind_with_limit(addr, DEFAULT_MAX_LINE_LEN).await
    }

    /// Like [`bind`](Self::bind) with a custom per-line byte limit.
    pub async fn bind_with_limit(
        addr: &str,
        max_line_len: usize,
    ) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| TransportError::bind(addr, e))?;
        let local_addr =
            listener.local_addr().map_err(TransportError::LocalAddr)?;
        tracing::info!(%local_addr, "telnet transport listening");

        let (inbox, events) = Inbox::new();
        let accept_task =
            tokio::spawn(accept_loop(listener, events, max_line_len));

        Ok(Self {
            local_addr,
            inbox,
            accept_task,
        })
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for TelnetTransport {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

impl Transport for TelnetTransport {
    fn update(&mut self) {
        self.inbox.pump();
    }

    fn poll_new_connections(&mut self) -> Vec<ConnectionId> {
        self.inbox.take_connected()
    }

    fn poll_disconnections(&mut self) -> Vec<ConnectionId> {
        self.inbox.take_disconnected()
    }

    fn poll_commands(&mut self) -> Vec<(ConnectionId, CommandLine)> {
        self.inbox.take_commands()
    }

    fn send(&mut self, conn_id: ConnectionId, text: &str) {
        self.inbox.send(conn_id, text);
    }

    fn owns(&self, conn_id: ConnectionId) -> bool {
        self.inbox.owns(conn_id)
    }
}

async fn accept_loop(
    listener: TcpListener,
    events: EventSender,
    max_line_len: usize,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let id = ConnectionId::next();
                tracing::debug!(%id, %addr, "accepted telnet connection");
                tokio::spawn(serve(stream, id, events.clone(), max_line_len));
            }
            Err(e) => {
                tracing::error!(error = %e, "accept failed");
            }
        }
    }
}

/// Runs one connection until either side closes it, then reports the
/// disconnection.
async fn serve(
    stream: TcpStream,
    id: ConnectionId,
    events: EventSender,
    max_line_len: usize,
) {
    let (outbox, mut outgoing) = mpsc::unbounded_channel::<String>();
    if events.send(TransportEvent::Connected(id, outbox)).is_err() {
        return;
    }

    if let Err(e) = pump_connection(stream, id, &events, &mut outgoing, max_line_len).await {
        tracing::debug!(%id, error = %e, "connection ended with error");
    } else {
        tracing::debug!(%id, "connection closed");
    }

    let _ = events.send(TransportEvent::Disconnected(id));
}

async fn pump_connection(
    stream: TcpStream,
    id: ConnectionId,
    events: &EventSender,
    outgoing: &mut mpsc::UnboundedReceiver<String>,
    max_line_len: usize,
) -> Result<(), TransportError> {
    let (mut reader, mut writer) = stream.into_split();
    let mut lines = LineBuffer::new(max_line_len);
    let mut iac = IacFilter::new();
    let mut chunk = [0u8; 1024];

    loop {
        tokio::select! {
            read = reader.read(&mut chunk) => {
                let n = read.map_err(TransportError::ReceiveFailed)?;
                if n == 0 {
                    return Ok(());
                }
                let filtered = iac.filter(&chunk[..n]);
                if !filtered.replies.is_empty() {
                    writer
                        .write_all(&filtered.replies)
                        .await
                        .map_err(TransportError::SendFailed)?;
                }
                lines.extend(&filtered.data);
                while let Some(line) = lines.next_line()? {
                    if let Some(cmd) = CommandLine::parse(&line) {
                        if events.send(TransportEvent::Command(id, cmd)).is_err() {
                            return Ok(());
                        }
                    }
                }
            }
            msg = outgoing.recv() => {
                let Some(mut text) = msg else {
                    return Ok(());
                };
                text.push_str("\r\n");
                writer
                    .write_all(text.as_bytes())
                    .await
                    .map_err(TransportError::SendFailed)?;
            }
        }
    }
}

//! WebSocket transport implementation using `tokio-tungstenite`.
//!
//! Each text (or binary) frame carries one or more input lines; each
//! outgoing message is sent as a single text frame. Lines are held to
//! the same byte limit as telnet input.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;

use crate::inbox::{EventSender, Inbox, TransportEvent};
use crate::line::DEFAULT_MAX_LINE_LEN;
use crate::{CommandLine, ConnectionId, Transport, TransportError};

/// Lines a single frame may carry before the frame itself is refused.
const MAX_LINES_PER_FRAME: usize = 16;

/// A WebSocket-based [`Transport`] for browser clients.
pub struct WebSocketTransport {
    local_addr: SocketAddr,
    inbox: Inbox,
    accept_task: JoinHandle<()>,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
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
        tracing::info!(%local_addr, "WebSocket transport listening");

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

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

impl Transport for WebSocketTransport {
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
    let max_message = max_line_len.saturating_mul(MAX_LINES_PER_FRAME);
    let config = WebSocketConfig::default()
        .max_message_size(Some(max_message))
        .max_frame_size(Some(max_message));
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "accept failed");
                continue;
            }
        };
        let events = events.clone();
        tokio::spawn(async move {
            let ws = match tokio_tungstenite::accept_async_with_config(stream, Some(config)).await
            {
                Ok(ws) => ws,
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "WebSocket handshake failed");
                    return;
                }
            };
            let id = ConnectionId::next();
            tracing::debug!(%id, %addr, "accepted WebSocket connection");
            serve(ws, id, events, max_line_len).await;
        });
    }
}

async fn serve(
    ws: tokio_tungstenite::WebSocketStream<TcpStream>,
    id: ConnectionId,
    events: EventSender,
    max_line_len: usize,
) {
    let (outbox, mut outgoing) = mpsc::unbounded_channel::<String>();
    if events.send(TransportEvent::Connected(id, outbox)).is_err() {
        return;
    }

    let (mut sink, mut stream) = ws.split();
    loop {
        tokio::select! {
            frame = stream.next() => {
                let text = match frame {
                    Some(Ok(Message::Text(text))) => text.as_str().to_string(),
                    Some(Ok(Message::Binary(data))) => {
                        String::from_utf8_lossy(&data).into_owned()
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue, // ping/pong/frame
                    Some(Err(e)) => {
                        tracing::debug!(%id, error = %e, "WebSocket receive failed");
                        break;
                    }
                };
                if let Some(line) = text.lines().find(|l| l.len() > max_line_len) {
                    let e = TransportError::LineTooLong(max_line_len);
                    tracing::debug!(%id, len = line.len(), error = %e, "closing connection");
                    break;
                }
                for cmd in text.lines().filter_map(CommandLine::parse) {
                    if events.send(TransportEvent::Command(id, cmd)).is_err() {
                        return;
                    }
                }
            }
            msg = outgoing.recv() => {
                let Some(text) = msg else {
                    break;
                };
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    tracing::debug!(%id, error = %e, "WebSocket send failed");
                    break;
                }
            }
        }
    }

    let _ = events.send(TransportEvent::Disconnected(id));
}

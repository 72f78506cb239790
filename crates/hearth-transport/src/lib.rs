//! Transport layer for Hearth.
//!
//! The game engine never touches sockets. It sees a [`Transport`]: four
//! polling operations it calls once per tick, plus a fire-and-forget
//! `send`. Concrete transports run their socket I/O in background tasks
//! and buffer events until the engine asks for them.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket transport via `tokio-tungstenite`

mod error;
mod inbox;
mod line;
mod memory;
mod multi;
mod tcp;
mod telnet;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
pub use inbox::{EventSender, Outbox, TransportEvent};
pub use line::{CommandLine, DEFAULT_MAX_LINE_LEN, LineBuffer};
pub use memory::MemoryTransport;
pub use multi::MultiTransport;
pub use tcp::TelnetTransport;
pub use telnet::{Filtered, IacFilter};
#[cfg(feature = "websocket")]
pub use websocket::WebSocketTransport;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a connection.
///
/// Ordering follows allocation order, so a map keyed by `ConnectionId`
/// iterates players in the order they connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocates a fresh, process-wide unique id.
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// The four operations the game loop consumes, polled once per tick.
///
/// Each `poll_*` call hands out the events gathered by the last
/// [`update`](Self::update); an event is never delivered twice.
pub trait Transport: Send + 'static {
    /// Collects everything that arrived since the previous call. The game
    /// loop calls this exactly once at the start of each tick, so the
    /// three polls of one tick see a consistent batch.
    fn update(&mut self) {}

    /// Connections opened since the last update.
    fn poll_new_connections(&mut self) -> Vec<ConnectionId>;

    /// Connections closed since the last update.
    fn poll_disconnections(&mut self) -> Vec<ConnectionId>;

    /// Input lines received since the last update, in arrival order.
    fn poll_commands(&mut self) -> Vec<(ConnectionId, CommandLine)>;

    /// Queues `text` for delivery. Best effort: text for an unknown or
    /// closed connection is dropped.
    fn send(&mut self, conn_id: ConnectionId, text: &str);

    /// Whether this transport currently carries `conn_id`.
    fn owns(&self, _conn_id: ConnectionId) -> bool {
        false
    }
}

//! Running several transports behind one [`Transport`].

use crate::{CommandLine, ConnectionId, Transport};

/// Merges the events of several transports and routes each `send` to the
/// transport that owns the connection.
///
/// Connection ids are allocated process-wide, so they never collide
/// between the parts.
#[derive(Default)]
pub struct MultiTransport {
    parts: Vec<Box<dyn Transport>>,
}

impl MultiTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transport. Events are merged in the order parts were added.
    pub fn with(mut self, transport: impl Transport) -> Self {
        self.parts.push(Box::new(transport));
        self
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Transport for MultiTransport {
    fn update(&mut self) {
        for part in &mut self.parts {
            part.update();
        }
    }

    fn poll_new_connections(&mut self) -> Vec<ConnectionId> {
        self.parts
            .iter_mut()
            .flat_map(|p| p.poll_new_connections())
            .collect()
    }

    fn poll_disconnections(&mut self) -> Vec<ConnectionId> {
        self.parts
            .iter_mut()
            .flat_map(|p| p.poll_disconnections())
            .collect()
    }

    fn poll_commands(&mut self) -> Vec<(ConnectionId, CommandLine)> {
        self.parts
            .iter_mut()
            .flat_map(|p| p.poll_commands())
            .collect()
    }

    fn send(&mut self, conn_id: ConnectionId, text: &str) {
        if let Some(part) = self.parts.iter_mut().find(|p| p.owns(conn_id)) {
            part.send(conn_id, text);
        }
    }

    fn owns(&self, conn_id: ConnectionId) -> bool {
        self.parts.iter().any(|p| p.owns(conn_id))
    }
}

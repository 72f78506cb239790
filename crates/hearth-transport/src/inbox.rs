//! Event plumbing between connection tasks and the polling side.
//!
//! Every connection task reports to one unbounded channel. The game loop
//! side never touches the channel directly: [`Inbox::pump`] drains it
//! once per tick and sorts events into three queues, which the `poll_*`
//! methods then hand out. Outgoing text goes through a per-connection
//! [`Outbox`] registered by the `Connected` event itself, so no map is
//! shared between tasks.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::{CommandLine, ConnectionId};

/// Sender half of a connection's outgoing text queue.
pub type Outbox = mpsc::UnboundedSender<String>;

/// What a connection task reports.
#[derive(Debug)]
pub enum TransportEvent {
    /// A new connection is ready; text for it goes to the outbox.
    Connected(ConnectionId, Outbox),
    /// The connection is gone. Sent exactly once per connection.
    Disconnected(ConnectionId),
    /// A non-blank input line.
    Command(ConnectionId, CommandLine),
}

/// Cloneable handle connection tasks use to report events.
pub type EventSender = mpsc::UnboundedSender<TransportEvent>;

/// Polling-side state shared by the concrete transports.
#[derive(Debug)]
pub(crate) struct Inbox {
    events: mpsc::UnboundedReceiver<TransportEvent>,
    outboxes: HashMap<ConnectionId, Outbox>,
    connected: Vec<ConnectionId>,
    disconnected: Vec<ConnectionId>,
    commands: Vec<(ConnectionId, CommandLine)>,
}

impl Inbox {
    pub(crate) fn new() -> (Self, EventSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let inbox = Self {
            events: rx,
            outboxes: HashMap::new(),
            connected: Vec::new(),
            disconnected: Vec::new(),
            commands: Vec::new(),
        };
        (inbox, tx)
    }

    /// Drains every event queued so far into the per-kind queues.
    pub(crate) fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                TransportEvent::Connected(id, outbox) => {
                    self.outboxes.insert(id, outbox);
                    self.connected.push(id);
                }
                TransportEvent::Disconnected(id) => {
                    self.outboxes.remove(&id);
                    self.disconnected.push(id);
                }
                TransportEvent::Command(id, line) => {
                    self.commands.push((id, line));
                }
            }
        }
    }

    pub(crate) fn take_connected(&mut self) -> Vec<ConnectionId> {
        std::mem::take(&mut self.connected)
    }

    pub(crate) fn take_disconnected(&mut self) -> Vec<ConnectionId> {
        std::mem::take(&mut self.disconnected)
    }

    pub(crate) fn take_commands(&mut self) -> Vec<(ConnectionId, CommandLine)> {
        std::mem::take(&mut self.commands)
    }

    /// Queues text for a connection. Unknown or closed connections are
    /// silently skipped.
    pub(crate) fn send(&self, id: ConnectionId, text: &str) {
        match self.outboxes.get(&id) {
            Some(outbox) => {
                if outbox.send(text.to_string()).is_err() {
                    tracing::trace!(%id, "outbox closed, dropping message");
                }
            }
            None => tracing::trace!(%id, "no outbox for connection"),
        }
    }

    pub(crate) fn owns(&self, id: ConnectionId) -> bool {
        self.outboxes.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> ConnectionId {
        ConnectionId::new(n)
    }

    #[test]
    fn test_pump_sorts_events_by_kind() {
        let (mut inbox, tx) = Inbox::new();
        let (out_tx, _out_rx) = mpsc::unbounded_channel();
        tx.send(TransportEvent::Connected(id(1), out_tx)).unwrap();
        tx.send(TransportEvent::Command(
            id(1),
            CommandLine::parse("look").unwrap(),
        ))
        .unwrap();
        tx.send(TransportEvent::Disconnected(id(2))).unwrap();

        inbox.pump();

        assert_eq!(inbox.take_connected(), vec![id(1)]);
        assert_eq!(inbox.take_disconnected(), vec![id(2)]);
        let commands = inbox.take_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].1.verb(), "look");
    }

    #[test]
    fn test_take_consumes_queue() {
        let (mut inbox, tx) = Inbox::new();
        tx.send(TransportEvent::Disconnected(id(3))).unwrap();
        inbox.pump();
        assert_eq!(inbox.take_disconnected(), vec![id(3)]);
        assert!(inbox.take_disconnected().is_empty());
    }

    #[test]
    fn test_send_reaches_registered_outbox() {
        let (mut inbox, tx) = Inbox::new();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        tx.send(TransportEvent::Connected(id(1), out_tx)).unwrap();
        inbox.pump();

        inbox.send(id(1), "hello");
        assert_eq!(out_rx.try_recv().unwrap(), "hello");
        assert!(inbox.owns(id(1)));
    }

    #[test]
    fn test_disconnect_drops_outbox() {
        let (mut inbox, tx) = Inbox::new();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        tx.send(TransportEvent::Connected(id(1), out_tx)).unwrap();
        tx.send(TransportEvent::Disconnected(id(1))).unwrap();
        inbox.pump();

        inbox.send(id(1), "too late");
        assert!(!inbox.owns(id(1)));
        assert!(out_rx.try_recv().is_err());
    }
}

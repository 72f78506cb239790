//! In-process transport for tests, bots and local tools.

use std::collections::BTreeSet;

use crate::{CommandLine, ConnectionId, Transport};

/// A [`Transport`] with no sockets behind it.
///
/// The owner plays the part of the clients: [`connect`](Self::connect),
/// [`input`](Self::input) and [`disconnect`](Self::disconnect) stage
/// events, which become visible to the polls at the next
/// [`update`](Transport::update). Everything sent to an open connection
/// is recorded.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    open: BTreeSet<ConnectionId>,
    staged_connected: Vec<ConnectionId>,
    staged_disconnected: Vec<ConnectionId>,
    staged_commands: Vec<(ConnectionId, CommandLine)>,
    connected: Vec<ConnectionId>,
    disconnected: Vec<ConnectionId>,
    commands: Vec<(ConnectionId, CommandLine)>,
    sent: Vec<(ConnectionId, String)>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a connection with a fresh id.
    pub fn connect(&mut self) -> ConnectionId {
        let id = ConnectionId::next();
        self.open.insert(id);
        self.staged_connected.push(id);
        id
    }

    /// Closes a connection. Text sent to it afterwards is dropped.
    pub fn disconnect(&mut self, id: ConnectionId) {
        self.open.remove(&id);
        self.staged_disconnected.push(id);
    }

    /// Stages a line of input. Blank lines are dropped, as a real
    /// transport would.
    pub fn input(&mut self, id: ConnectionId, line: &str) {
        if let Some(cmd) = CommandLine::parse(line) {
            self.staged_commands.push((id, cmd));
        }
    }

    /// Removes and returns everything sent so far.
    pub fn take_sent(&mut self) -> Vec<(ConnectionId, String)> {
        std::mem::take(&mut self.sent)
    }

    /// Removes and returns the messages sent to one connection, leaving
    /// the rest in place.
    pub fn take_sent_to(&mut self, id: ConnectionId) -> Vec<String> {
        let (mine, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.sent).into_iter().partition(|(to, _)| *to == id);
        self.sent = rest;
        mine.into_iter().map(|(_, text)| text).collect()
    }

    /// Everything sent so far, without consuming it.
    pub fn sent(&self) -> &[(ConnectionId, String)] {
        &self.sent
    }
}

impl Transport for MemoryTransport {
    fn update(&mut self) {
        self.connected.append(&mut self.staged_connected);
        self.disconnected.append(&mut self.staged_disconnected);
        self.commands.append(&mut self.staged_commands);
    }

    fn poll_new_connections(&mut self) -> Vec<ConnectionId> {
        std::mem::take(&mut self.connected)
    }

    fn poll_disconnections(&mut self) -> Vec<ConnectionId> {
        std::mem::take(&mut self.disconnected)
    }

    fn poll_commands(&mut self) -> Vec<(ConnectionId, CommandLine)> {
        std::mem::take(&mut self.commands)
    }

    fn send(&mut self, conn_id: ConnectionId, text: &str) {
        if self.open.contains(&conn_id) {
            self.sent.push((conn_id, text.to_string()));
        }
    }

    fn owns(&self, conn_id: ConnectionId) -> bool {
        self.open.contains(&conn_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_appear_after_update() {
        let mut t = MemoryTransport::new();
        let a = t.connect();
        t.input(a, "look");
        assert!(t.poll_new_connections().is_empty());

        t.update();
        assert_eq!(t.poll_new_connections(), vec![a]);
        let cmds = t.poll_commands();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].1.verb(), "look");
        assert!(t.poll_commands().is_empty());
    }

    #[test]
    fn test_send_to_closed_connection_is_dropped() {
        let mut t = MemoryTransport::new();
        let a = t.connect();
        t.send(a, "one");
        t.disconnect(a);
        t.send(a, "two");
        assert_eq!(t.take_sent_to(a), vec!["one".to_string()]);
    }

    #[test]
    fn test_take_sent_to_leaves_other_messages() {
        let mut t = MemoryTransport::new();
        let a = t.connect();
        let b = t.connect();
        t.send(a, "for a");
        t.send(b, "for b");
        assert_eq!(t.take_sent_to(a), vec!["for a".to_string()]);
        assert_eq!(t.sent(), &[(b, "for b".to_string())]);
    }

    #[test]
    fn test_blank_input_is_dropped() {
        let mut t = MemoryTransport::new();
        let a = t.connect();
        t.input(a, "   ");
        t.update();
        assert!(t.poll_commands().is_empty());
    }
}

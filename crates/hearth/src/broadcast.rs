//! Message delivery: turns audiences into sends.

use hearth_players::{Player, PlayerRegistry};
use hearth_protocol::{Audience, Outbound};
use hearth_transport::{ConnectionId, Transport};

/// Sends text to players through a transport.
///
/// Audiences are resolved against the registry when a message is
/// delivered, never earlier. Delivery is fire-and-forget: a send to a
/// connection that has gone away is the transport's to drop.
pub struct Broadcaster<'a, T: Transport + ?Sized> {
    transport: &'a mut T,
    players: &'a PlayerRegistry,
}

impl<'a, T: Transport + ?Sized> Broadcaster<'a, T> {
    pub fn new(transport: &'a mut T, players: &'a PlayerRegistry) -> Self {
        Self { transport, players }
    }

    /// Sends to one connection.
    pub fn send(&mut self, conn_id: ConnectionId, text: &str) {
        self.transport.send(conn_id, text);
    }

    /// Sends to every player matching `predicate`, in connection order.
    /// Returns how many players were sent to.
    pub fn broadcast(&mut self, predicate: impl Fn(&Player) -> bool, text: &str) -> usize {
        let mut sent = 0;
        for (conn_id, player) in self.players.all() {
            if predicate(player) {
                self.transport.send(conn_id, text);
                sent += 1;
            }
        }
        sent
    }

    /// Delivers one message to its audience.
    pub fn deliver(&mut self, msg: &Outbound) -> usize {
        let text = msg.text.as_str();
        match &msg.audience {
            Audience::Player(conn_id) => {
                self.send(*conn_id, text);
                1
            }
            Audience::All => self.broadcast(|_| true, text),
            Audience::Room(room) => self.broadcast(|p| p.is_in(room), text),
            Audience::RoomExcept(room, excluded) => {
                self.broadcast(|p| p.is_in(room) && p.conn_id != *excluded, text)
            }
        }
    }

    /// Delivers messages in order.
    pub fn deliver_all<'m>(&mut self, msgs: impl IntoIterator<Item = &'m Outbound>) {
        for msg in msgs {
            self.deliver(msg);
        }
    }
}

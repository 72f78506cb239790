//! Outbound message plans.

use hearth_transport::ConnectionId;

/// Who should receive a message.
///
/// An audience is a predicate, not a list: it is resolved against the
/// player registry at the moment the message is delivered, so it always
/// reflects current room membership.
///
/// Rooms are named by identifier so this crate stays independent of the
/// world model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// One specific player.
    Player(ConnectionId),

    /// Every connected player, named or not.
    All,

    /// Every player currently in the room.
    Room(String),

    /// Every player currently in the room except one.
    /// Used for "X left" / "X arrived" notices the actor should not see.
    RoomExcept(String, ConnectionId),
}

/// One message the engine wants delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub audience: Audience,
    pub text: String,
}

impl Outbound {
    pub fn new(audience: Audience, text: impl Into<String>) -> Self {
        Self {
            audience,
            text: text.into(),
        }
    }

    /// A private message to one player.
    pub fn to_player(id: ConnectionId, text: impl Into<String>) -> Self {
        Self::new(Audience::Player(id), text)
    }

    /// A message to everyone.
    pub fn to_all(text: impl Into<String>) -> Self {
        Self::new(Audience::All, text)
    }

    /// `true` if only a single player can ever receive this.
    pub fn is_private(&self) -> bool {
        matches!(self.audience, Audience::Player(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_constructor() {
        let id = ConnectionId::new(3);
        let msg = Outbound::to_player(id, "hi");
        assert_eq!(msg.audience, Audience::Player(id));
        assert_eq!(msg.text, "hi");
        assert!(msg.is_private());
    }

    #[test]
    fn test_broadcasts_are_not_private() {
        assert!(!Outbound::to_all("x").is_private());
        assert!(!Outbound::new(Audience::Room("Washroom".into()), "x").is_private());
        assert!(
            !Outbound::new(
                Audience::RoomExcept("Washroom".into(), ConnectionId::new(1)),
                "x"
            )
            .is_private()
        );
    }
}

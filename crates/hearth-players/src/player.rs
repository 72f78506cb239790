//! Player types: the state kept for one connected player.

use hearth_transport::ConnectionId;

/// Label used for a player who disconnects before choosing a name.
const UNNAMED_LABEL: &str = "Someone";

// ---------------------------------------------------------------------------
// PlayerName
// ---------------------------------------------------------------------------

/// Whether a player has told us who they are yet.
///
/// ```text
///   Unnamed ──(first line of input)──→ Named
/// ```
///
/// There is no way back: a name, once chosen, stays for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerName {
    Unnamed,
    Named(String),
}

impl PlayerName {
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Unnamed => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerTemplate
// ---------------------------------------------------------------------------

/// Starting equipment and purse for new players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTemplate {
    pub weapon: String,
    pub armor: String,
    pub gold: u64,
    pub backpack: String,
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            weapon: "Fist".to_string(),
            armor: "Cloth Clothing".to_string(),
            gold: 0,
            backpack: "Empty".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// The connection this player arrived on.
    pub conn_id: ConnectionId,

    pub name: PlayerName,

    /// Identifier of the room the player stands in. Always a room that
    /// exists in the loaded world.
    pub room: String,

    /// Identifier of the equipped weapon.
    pub weapon: String,

    pub armor: String,

    pub gold: u64,

    pub backpack: String,
}

impl Player {
    pub(crate) fn new(
        conn_id: ConnectionId,
        room: &str,
        template: &PlayerTemplate,
    ) -> Self {
        Self {
            conn_id,
            name: PlayerName::Unnamed,
            room: room.to_string(),
            weapon: template.weapon.clone(),
            armor: template.armor.clone(),
            gold: template.gold,
            backpack: template.backpack.clone(),
        }
    }

    /// The name other players see, or a neutral label if none was chosen.
    pub fn display_name(&self) -> &str {
        self.name.as_str().unwrap_or(UNNAMED_LABEL)
    }

    pub fn is_named(&self) -> bool {
        self.name.is_named()
    }

    pub fn is_in(&self, room: &str) -> bool {
        self.room == room
    }
}

//! The player registry: every player currently connected.
//!
//! # Concurrency note
//!
//! `PlayerRegistry` is a plain map with no locking. It is owned by the
//! game loop task, which is the only code that reads or writes it, so a
//! tick always sees a consistent registry: one command's changes and the
//! broadcasts they trigger complete before the next command is looked at.

use std::collections::BTreeMap;

use hearth_transport::ConnectionId;

use crate::{Player, PlayerError, PlayerName, PlayerTemplate};

/// Maps connections to players.
///
/// ## Lifecycle
///
/// ```text
/// create() ──→ name() ──→ move_to() / equip() ... ──→ remove()
///    │            │
///    ▼            ▼
/// [Unnamed]    [Named]
/// ```
///
/// Iteration follows connection order, which is also join order.
#[derive(Debug)]
pub struct PlayerRegistry {
    players: BTreeMap<ConnectionId, Player>,
    starting_room: String,
    template: PlayerTemplate,
}

impl PlayerRegistry {
    /// Creates an empty registry placing new players in `starting_room`.
    pub fn new(starting_room: impl Into<String>) -> Self {
        Self::with_template(starting_room, PlayerTemplate::default())
    }

    /// Like [`new`](Self::new) with custom starting equipment.
    pub fn with_template(
        starting_room: impl Into<String>,
        template: PlayerTemplate,
    ) -> Self {
        Self {
            players: BTreeMap::new(),
            starting_room: starting_room.into(),
            template,
        }
    }

    /// Registers an unnamed player for a fresh connection.
    ///
    /// # Errors
    /// [`PlayerError::AlreadyRegistered`] if the connection already has a
    /// player; the existing entry is left untouched.
    pub fn create(
        &mut self,
        conn_id: ConnectionId,
    ) -> Result<ConnectionId, PlayerError> {
        if self.players.contains_key(&conn_id) {
            return Err(PlayerError::AlreadyRegistered(conn_id));
        }
        let player = Player::new(conn_id, &self.starting_room, &self.template);
        self.players.insert(conn_id, player);
        tracing::info!(%conn_id, room = %self.starting_room, "player created");
        Ok(conn_id)
    }

    /// Removes a player. Unknown connections are a no-op: disconnects can
    /// race with earlier removals or arrive for connections never registered.
    pub fn remove(&mut self, conn_id: ConnectionId) -> Option<Player> {
        let removed = self.players.remove(&conn_id);
        match &removed {
            Some(p) => {
                tracing::info!(%conn_id, name = p.display_name(), "player removed");
            }
            None => tracing::trace!(%conn_id, "remove of unknown connection ignored"),
        }
        removed
    }

    pub fn get(&self, conn_id: ConnectionId) -> Option<&Player> {
        self.players.get(&conn_id)
    }

    pub fn get_mut(&mut self, conn_id: ConnectionId) -> Option<&mut Player> {
        self.players.get_mut(&conn_id)
    }

    pub fn contains(&self, conn_id: ConnectionId) -> bool {
        self.players.contains_key(&conn_id)
    }

    /// Gives an unnamed player its name.
    ///
    /// Any string is accepted; there is no uniqueness check.
    ///
    /// # Errors
    /// - [`PlayerError::NotFound`]: no such player
    /// - [`PlayerError::AlreadyNamed`]: the player already has a name
    pub fn name(
        &mut self,
        conn_id: ConnectionId,
        name: impl Into<String>,
    ) -> Result<&Player, PlayerError> {
        let player = self
            .players
            .get_mut(&conn_id)
            .ok_or(PlayerError::NotFound(conn_id))?;
        if player.is_named() {
            return Err(PlayerError::AlreadyNamed(conn_id));
        }
        player.name = PlayerName::Named(name.into());
        tracing::info!(%conn_id, name = player.display_name(), "player named");
        Ok(player)
    }

    /// Moves a player to another room. The caller guarantees the room exists.
    pub fn move_to(
        &mut self,
        conn_id: ConnectionId,
        room: impl Into<String>,
    ) -> Result<(), PlayerError> {
        let player = self
            .players
            .get_mut(&conn_id)
            .ok_or(PlayerError::NotFound(conn_id))?;
        player.room = room.into();
        tracing::debug!(%conn_id, room = %player.room, "player moved");
        Ok(())
    }

    /// Sets the player's equipped weapon.
    pub fn equip(
        &mut self,
        conn_id: ConnectionId,
        weapon: impl Into<String>,
    ) -> Result<(), PlayerError> {
        let player = self
            .players
            .get_mut(&conn_id)
            .ok_or(PlayerError::NotFound(conn_id))?;
        player.weapon = weapon.into();
        Ok(())
    }

    /// Every player, in connection order.
    pub fn all(&self) -> impl Iterator<Item = (ConnectionId, &Player)> {
        self.players.iter().map(|(id, p)| (*id, p))
    }

    /// Players standing in `room`, in connection order.
    pub fn in_room<'a>(
        &'a self,
        room: &'a str,
    ) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.values().filter(move |p| p.is_in(room))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn starting_room(&self) -> &str {
        &self.starting_room
    }
}

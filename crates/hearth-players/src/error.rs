//! Error types for the player registry.

use hearth_transport::ConnectionId;

/// Errors from registry operations that require a particular player state.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// No player is registered for the connection.
    #[error("no player for connection {0}")]
    NotFound(ConnectionId),

    /// The connection already has a player.
    #[error("connection {0} already has a player")]
    AlreadyRegistered(ConnectionId),

    /// The player already chose a name; names are set once.
    #[error("player on connection {0} is already named")]
    AlreadyNamed(ConnectionId),
}

//! Player registry for Hearth.
//!
//! This crate owns every connected player's state for the lifetime of
//! its connection:
//!
//! 1. **Creation**: a player appears, unnamed, when its connection opens
//! 2. **Naming**: its first line of input becomes its name
//! 3. **Play**: room changes and equipment updates
//! 4. **Removal**: the entry goes away when the connection closes
//!
//! # How it fits in the stack
//!
//! ```text
//! Engine (above)  ← dispatches commands, resolves audiences against the registry
//!     ↕
//! Players (this crate)  ← who is connected, what they are called, where they are
//!     ↕
//! Transport (below)  ← provides ConnectionId
//! ```

mod error;
mod player;
mod registry;

pub use error::PlayerError;
pub use player::{Player, PlayerName, PlayerTemplate};
pub use registry::PlayerRegistry;

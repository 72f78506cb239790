//! The in-game protocol for Hearth.
//!
//! This crate defines what players can say to the engine and how the
//! engine describes what it wants said back:
//!
//! - **Verbs** ([`Verb`]): the fixed command table and its aliases.
//! - **Audiences** ([`Audience`]): who a message is for, resolved
//!   against the player registry only when the message is delivered.
//! - **Outbound plans** ([`Outbound`]): the text plus its audience.
//!
//! ```text
//! Transport (lines) → Protocol (Verb) → Engine → Protocol (Outbound) → Transport
//! ```

mod message;
mod verb;

pub use message::{Audience, Outbound};
pub use verb::{HELP_LINES, Verb};

pub use hearth_transport::{CommandLine, ConnectionId};

//! # Hearth
//!
//! A tick-driven multi-user text game engine.
//!
//! Players connect over telnet (or WebSocket), choose a name, and then
//! walk a small world of rooms, talk to whoever shares their room and
//! equip weapons they find lying around. All game state lives in one
//! [`Engine`] that is driven by a fixed-rate tick; the transports do
//! their I/O on their own tasks and hand the engine a batch of events
//! each tick.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hearth::prelude::*;
//!
//! # async fn start() -> Result<(), HearthError> {
//! let server = HearthServer::builder()
//!     .bind("0.0.0.0:1234")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod broadcast;
mod config;
mod dispatch;
mod engine;
mod error;
mod server;

pub use broadcast::Broadcaster;
pub use config::ServerConfig;
pub use dispatch::dispatch;
pub use engine::{Engine, NAME_PROMPT, TickReport};
pub use error::HearthError;
pub use server::{HearthServer, HearthServerBuilder};

pub use hearth_players as players;
pub use hearth_protocol as protocol;
pub use hearth_tick as tick;
pub use hearth_transport as transport;
pub use hearth_world as world;

/// The types most servers need.
pub mod prelude {
    pub use crate::{Engine, HearthError, HearthServer, HearthServerBuilder, ServerConfig};
    pub use hearth_players::{Player, PlayerName, PlayerRegistry};
    pub use hearth_protocol::{Audience, Outbound, Verb};
    pub use hearth_tick::{TickConfig, TickPolicy, TickScheduler};
    pub use hearth_transport::{
        CommandLine, ConnectionId, MemoryTransport, TelnetTransport, Transport,
    };
    pub use hearth_world::{World, WorldDef};
}

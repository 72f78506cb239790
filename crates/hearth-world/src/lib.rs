//! World model for Hearth: the room graph and the item catalog.
//!
//! A world is loaded once at startup and never changes afterwards.
//! Loading is all-or-nothing: [`World::from_def`] checks every exit and
//! item reference and refuses the whole definition if anything dangles,
//! so the engine can treat a missing room as a bug rather than a
//! runtime condition.
//!
//! # Key types
//!
//! - [`WorldDef`]: the serializable definition (what a world file holds)
//! - [`World`]: the validated, indexed world
//! - [`Room`], [`Exit`], [`RoomItem`], [`Item`]: its contents

mod def;
mod error;
mod world;

pub use def::{AttackType, ItemDef, RoomDef, WorldDef};
pub use error::WorldError;
pub use world::{Exit, Item, Room, RoomItem, World};

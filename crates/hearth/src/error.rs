//! Unified error type for Hearth.

use hearth_transport::TransportError;
use hearth_world::WorldError;

/// Top-level error wrapping every crate-specific error.
///
/// Users of the `hearth` crate deal with this one type; `?` converts the
/// sub-crate errors through the generated `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum HearthError {
    /// Binding or serving a listener failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The world could not be read, parsed or validated.
    #[error(transparent)]
    World(#[from] WorldError),
}

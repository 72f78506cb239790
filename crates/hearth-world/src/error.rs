//! Error types for the world model.

use std::path::PathBuf;

/// Errors raised while loading a world. All of them are fatal: a world
/// that fails to load is never partially used.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The world file could not be read.
    #[error("cannot read world file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The world definition is not valid JSON for a [`WorldDef`](crate::WorldDef).
    #[error("cannot parse world definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// The definition parsed but references things that do not exist.
    /// Every problem found is listed.
    #[error("invalid world: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_lists_every_problem() {
        let err = WorldError::Invalid(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid world: a; b");
    }
}

//! Error types for resource loading and lookup.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::resources::loadstate::LoadState;

/// The four asset categories owned by the
/// [`ResourceManager`](crate::resources::resourcemanager::ResourceManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Font,
    Image,
    Sound,
    Music,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Font => "font",
            AssetKind::Image => "image",
            AssetKind::Sound => "sound",
            AssetKind::Music => "music",
        };
        f.write_str(name)
    }
}

/// Everything that can go wrong while loading, registering, or looking up
/// game resources. None of these are recoverable inside the resource manager;
/// the caller decides whether to abort startup.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The backend could not load the file at the resolved path.
    #[error("asset not found at {path:?}: {reason}")]
    AssetNotFound { path: PathBuf, reason: String },

    /// A name was registered twice in the same store.
    #[error("{kind} '{name}' is already registered")]
    DuplicateRegistration { kind: AssetKind, name: String },

    /// An accessor was called with a name that was never registered.
    #[error("no {kind} registered as '{name}'")]
    LookupMiss { kind: AssetKind, name: String },

    /// A lifecycle operation was called from the wrong state.
    #[error("cannot {operation} while resources are {state}")]
    InvalidState {
        operation: &'static str,
        state: LoadState,
    },

    /// The asset manifest could not be read or parsed.
    #[error("invalid asset manifest: {0}")]
    Manifest(String),
}

pub type Result<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_message_names_kind_and_key() {
        let err = ResourceError::LookupMiss {
            kind: AssetKind::Sound,
            name: "Kaboom".into(),
        };
        assert_eq!(err.to_string(), "no sound registered as 'Kaboom'");
    }

    #[test]
    fn test_invalid_state_message() {
        let err = ResourceError::InvalidState {
            operation: "load resources",
            state: LoadState::Ready,
        };
        assert_eq!(
            err.to_string(),
            "cannot load resources while resources are ready"
        );
    }
}

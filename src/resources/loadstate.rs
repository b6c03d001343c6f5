//! Lifecycle of the resource manager.
//!
//! Transitions are one-directional:
//! `Uninitialized -> Loading -> Ready -> Freed`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing loaded yet.
    #[default]
    Uninitialized,
    /// `load_resources` is running (or stopped on an error).
    Loading,
    /// Every manifest entry is registered; accessors are usable.
    Ready,
    /// `free_resources` has released every handle.
    Freed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadState::Uninitialized => "uninitialized",
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
            LoadState::Freed => "freed",
        };
        f.write_str(name)
    }
}

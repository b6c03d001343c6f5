//! Battleships resource library.
//!
//! This module exposes the game's media layer, resource manager, and title
//! screen systems for use by the binary and integration tests.

pub mod error;
pub mod media;
pub mod resources;
pub mod systems;

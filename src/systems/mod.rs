//! ECS systems run by the game loop once resources are loaded.
//!
//! Overview
//! - `titlescreen` – draws the title screen and starts the background music
pub mod titlescreen;

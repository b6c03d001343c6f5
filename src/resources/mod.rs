//! Game resources and their lifecycle.
//!
//! Overview
//! - `gameconfig` – window, resource root, and loading-screen settings
//! - `handlestore` – name-keyed store of media handles of one kind
//! - `loadingscreen` – splash, intro animation, and progress bar
//! - `loadstate` – lifecycle states of the resource manager
//! - `manifest` – the list of assets registered at startup
//! - `resourcemanager` – loads, looks up, and frees all game assets
//! - `resourceroot` – resolves asset file names to paths by kind
pub mod gameconfig;
pub mod handlestore;
pub mod loadingscreen;
pub mod loadstate;
pub mod manifest;
pub mod resourcemanager;
pub mod resourceroot;

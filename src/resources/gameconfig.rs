//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! title = Battleships
//! target_fps = 60
//!
//! [resources]
//! root = ./Resources
//! manifest = ./Resources/manifest.json
//!
//! [loading]
//! pacing = true
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::resourceroot::{DEFAULT_RESOURCE_ROOT, ResourceRoot};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TITLE: &str = "Battleships";
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_PACING: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores the window settings, where assets are found, and whether the
/// loading screen is paced for humans or runs flat out.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Window title.
    pub title: String,
    /// Target frames per second.
    pub target_fps: u32,
    /// Base directory of the fonts/images/sounds tree.
    pub resource_root: PathBuf,
    /// Optional JSON manifest replacing the built-in asset list.
    pub manifest_path: Option<PathBuf>,
    /// Insert the loading screen's animation delays.
    pub pacing: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
            resource_root: PathBuf::from(DEFAULT_RESOURCE_ROOT),
            manifest_path: None,
            pacing: DEFAULT_PACING,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [resources] section
        if let Some(root) = config.get("resources", "root") {
            self.resource_root = PathBuf::from(root);
        }
        if let Some(manifest) = config.get("resources", "manifest") {
            self.manifest_path = Some(PathBuf::from(manifest));
        }

        // [loading] section
        if let Some(pacing) = config.getbool("loading", "pacing").ok().flatten() {
            self.pacing = pacing;
        }

        info!(
            "Loaded config: {}x{} window '{}', fps={}, resources={:?}, manifest={:?}, pacing={}",
            self.window_width,
            self.window_height,
            self.title,
            self.target_fps,
            self.resource_root,
            self.manifest_path,
            self.pacing
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "title", Some(self.title.clone()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [resources] section
        config.set(
            "resources",
            "root",
            Some(self.resource_root.display().to_string()),
        );
        if let Some(manifest) = &self.manifest_path {
            config.set("resources", "manifest", Some(manifest.display().to_string()));
        }

        // [loading] section
        config.set("loading", "pacing", Some(self.pacing.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// The resource root as a path resolver.
    pub fn resource_root(&self) -> ResourceRoot {
        ResourceRoot::new(self.resource_root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (800, 600));
        assert_eq!(config.title, "Battleships");
        assert!(config.pacing);
        assert!(config.manifest_path.is_none());
        assert_eq!(config.resource_root(), ResourceRoot::default());
    }

    #[test]
    fn test_load_missing_file_keeps_defaults() {
        let mut config = GameConfig::with_path("/no/such/dir/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.window_size(), (800, 600));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "battleships-config-test-{}.ini",
            std::process::id()
        ));
        let mut config = GameConfig::with_path(&path);
        config.window_width = 1024;
        config.window_height = 768;
        config.resource_root = PathBuf::from("/opt/battleships/Resources");
        config.manifest_path = Some(PathBuf::from("manifest.json"));
        config.pacing = false;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.window_size(), (1024, 768));
        assert_eq!(loaded.resource_root, PathBuf::from("/opt/battleships/Resources"));
        assert_eq!(loaded.manifest_path, Some(PathBuf::from("manifest.json")));
        assert!(!loaded.pacing);
    }
}

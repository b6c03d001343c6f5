//! Asset manifest.
//!
//! The list of every font, image, sound, and music track the game registers
//! at startup. [`AssetManifest::default`] holds the built-in list; a JSON file
//! with the same shape can replace it:
//!
//! ```json
//! {
//!   "fonts":  [{ "name": "Courier", "file": "cour.ttf", "size": 14 }],
//!   "images": [{ "name": "Menu", "file": "main_page.jpg" },
//!              { "name": "Splash", "file": "splash.png",
//!                "transparent_color": { "r": 255, "g": 0, "b": 255 } }],
//!   "sounds": [{ "name": "Hit", "file": "hit.wav" }],
//!   "music":  [{ "name": "Background", "file": "horrordrone.mp3" }]
//! }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, Result};
use crate::media::Rgba;

/// Number of ship sizes; each has a horizontal and a vertical deploy image.
const SHIP_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontEntry {
    pub name: String,
    pub file: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub name: String,
    pub file: String,
    /// Colour to key out as transparent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_color: Option<Rgba>,
}

/// A sound effect or music track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
    #[serde(default)]
    pub sounds: Vec<AssetEntry>,
    #[serde(default)]
    pub music: Vec<AssetEntry>,
}

fn font(name: &str, file: &str, size: u32) -> FontEntry {
    FontEntry {
        name: name.into(),
        file: file.into(),
        size,
    }
}

fn image(name: impl Into<String>, file: impl Into<String>) -> ImageEntry {
    ImageEntry {
        name: name.into(),
        file: file.into(),
        transparent_color: None,
    }
}

fn asset(name: &str, file: &str) -> AssetEntry {
    AssetEntry {
        name: name.into(),
        file: file.into(),
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        let fonts = vec![
            font("ArialLarge", "arial.ttf", 80),
            font("Courier", "cour.ttf", 14),
            font("CourierSmall", "cour.ttf", 8),
            font("Menu", "ffaccess.ttf", 8),
        ];

        let mut images = vec![
            // Backgrounds
            image("Menu", "main_page.jpg"),
            image("Discovery", "discover.jpg"),
            image("Deploy", "deploy.jpg"),
            // Deployment
            image("LeftRightButton", "deploy_dir_button_horiz.png"),
            image("UpDownButton", "deploy_dir_button_vert.png"),
            image("SelectedShip", "deploy_button_hl.png"),
            image("PlayButton", "deploy_play_button.png"),
            image("RandomButton", "deploy_randomize_button.png"),
        ];
        for i in 1..=SHIP_COUNT {
            images.push(image(format!("ShipLR{i}"), format!("ship_deploy_horiz_{i}.png")));
            images.push(image(format!("ShipUD{i}"), format!("ship_deploy_vert_{i}.png")));
        }
        // Explosions
        images.push(image("Explosion", "explosion.png"));
        images.push(image("Splash", "splash.png"));

        let sounds = vec![
            asset("Error", "error.wav"),
            asset("Hit", "hit.wav"),
            asset("Sink", "sink.wav"),
            asset("Siren", "siren.wav"),
            asset("Miss", "watershot.wav"),
            asset("Winner", "winner.wav"),
            asset("Lose", "lose.wav"),
        ];

        let music = vec![asset("Background", "horrordrone.mp3")];

        Self {
            fonts,
            images,
            sounds,
            music,
        }
    }
}

impl AssetManifest {
    /// Parse a manifest from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ResourceError::Manifest(e.to_string()))
    }

    /// Read and parse a manifest file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::Manifest(format!("{}: {}", path.display(), e)))?;
        let manifest = Self::from_json_str(&json)?;
        info!(
            "Loaded manifest {:?}: {} fonts, {} images, {} sounds, {} music",
            path,
            manifest.fonts.len(),
            manifest.images.len(),
            manifest.sounds.len(),
            manifest.music.len()
        );
        Ok(manifest)
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.fonts.len() + self.images.len() + self.sounds.len() + self.music.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fonts() {
        let manifest = AssetManifest::default();
        let names: Vec<&str> = manifest.fonts.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["ArialLarge", "Courier", "CourierSmall", "Menu"]);
        assert_eq!(manifest.fonts[0].size, 80);
    }

    #[test]
    fn test_default_images_include_both_orientations_of_every_ship() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.images.len(), 8 + 2 * 5 + 2);
        for i in 1..=5 {
            let lr = format!("ShipLR{i}");
            let ud = format!("ShipUD{i}");
            let horiz = format!("ship_deploy_horiz_{i}.png");
            assert!(manifest.images.iter().any(|e| e.name == lr && e.file == horiz));
            assert!(manifest.images.iter().any(|e| e.name == ud));
        }
        assert!(manifest.images.iter().all(|e| e.transparent_color.is_none()));
    }

    #[test]
    fn test_default_miss_sound_is_watershot() {
        let manifest = AssetManifest::default();
        let miss = manifest.sounds.iter().find(|s| s.name == "Miss").unwrap();
        assert_eq!(miss.file, "watershot.wav");
        assert_eq!(manifest.music, vec![asset("Background", "horrordrone.mp3")]);
    }

    #[test]
    fn test_from_json_str_with_transparent_image() {
        let json = r#"{
            "fonts": [{ "name": "Courier", "file": "cour.ttf", "size": 14 }],
            "images": [{ "name": "Splash", "file": "splash.png",
                         "transparent_color": { "r": 255, "g": 0, "b": 255 } }]
        }"#;
        let manifest = AssetManifest::from_json_str(json).unwrap();
        assert_eq!(manifest.fonts.len(), 1);
        assert_eq!(
            manifest.images[0].transparent_color,
            Some(Rgba::rgb(255, 0, 255))
        );
        assert!(manifest.sounds.is_empty());
        assert!(manifest.music.is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        let err = AssetManifest::from_json_str("{ fonts: nope").unwrap_err();
        assert!(matches!(err, ResourceError::Manifest(_)));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = AssetManifest::from_json_file("/no/such/manifest.json").unwrap_err();
        assert!(matches!(err, ResourceError::Manifest(_)));
    }
}

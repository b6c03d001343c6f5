//! Resource manager resource.
//!
//! Owns every font, image, sound, and music handle the game uses, keyed by
//! name. [`ResourceManager::load_resources`] registers the whole
//! [`AssetManifest`] behind the loading screen; the `game_*` accessors look
//! handles up by name; [`ResourceManager::free_resources`] gives everything
//! back to the backend at shutdown.
//!
//! The manager holds only handles, so it is a plain (send) ECS resource. The
//! backend that owns the underlying assets is passed in by the caller.

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use crate::error::{AssetKind, ResourceError, Result};
use crate::media::{BitmapHandle, FontHandle, MediaBackend, MusicHandle, Rgba, SoundHandle};
use crate::resources::gameconfig::GameConfig;
use crate::resources::handlestore::{FontStore, ImageStore, MusicStore, SoundStore};
use crate::resources::loadingscreen::{LoadingScreen, Pacing, PROGRESS_STEPS};
use crate::resources::loadstate::LoadState;
use crate::resources::manifest::AssetManifest;
use crate::resources::resourceroot::{ResourceKind, ResourceRoot};

const DEFAULT_SCREEN_WIDTH: u32 = 800;
const DEFAULT_SCREEN_HEIGHT: u32 = 600;
/// Pause after each category so the progress bar can be seen.
const STEP_DELAY_MS: u32 = 100;

#[derive(Resource, Debug)]
pub struct ResourceManager {
    root: ResourceRoot,
    manifest: AssetManifest,
    screen_size: (u32, u32),
    pacing: Pacing,
    state: LoadState,
    fonts: FontStore,
    images: ImageStore,
    sounds: SoundStore,
    music: MusicStore,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new(ResourceRoot::default(), AssetManifest::default())
    }
}

impl ResourceManager {
    /// Create an empty manager that will load `manifest` from under `root`.
    pub fn new(root: ResourceRoot, manifest: AssetManifest) -> Self {
        Self {
            root,
            manifest,
            screen_size: (DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT),
            pacing: Pacing::default(),
            state: LoadState::Uninitialized,
            fonts: FontStore::new(AssetKind::Font),
            images: ImageStore::new(AssetKind::Image),
            sounds: SoundStore::new(AssetKind::Sound),
            music: MusicStore::new(AssetKind::Music),
        }
    }

    /// Create a manager using the root, screen size, and pacing of `config`.
    pub fn from_config(config: &GameConfig, manifest: AssetManifest) -> Self {
        Self::new(config.resource_root(), manifest)
            .with_screen_size(config.window_width, config.window_height)
            .with_pacing(Pacing::from_enabled(config.pacing))
    }

    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_size = (width, height);
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn root(&self) -> &ResourceRoot {
        &self.root
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn fonts(&self) -> &FontStore {
        &self.fonts
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn sounds(&self) -> &SoundStore {
        &self.sounds
    }

    pub fn music(&self) -> &MusicStore {
        &self.music
    }

    /// Size the screen, show the loading screen, and register every asset in
    /// the manifest.
    ///
    /// Can only run once, from [`LoadState::Uninitialized`]. On error the
    /// loading screen's own assets are released and the manager stays in
    /// [`LoadState::Loading`]; whatever was registered before the failure is
    /// still released by [`free_resources`](Self::free_resources).
    pub fn load_resources<B: MediaBackend>(&mut self, backend: &mut B) -> Result<()> {
        if self.state != LoadState::Uninitialized {
            return Err(ResourceError::InvalidState {
                operation: "load resources",
                state: self.state,
            });
        }
        self.state = LoadState::Loading;
        info!(
            "Loading {} resources from {:?}",
            self.manifest.len(),
            self.root.root()
        );

        let (width, height) = self.screen_size;
        backend.change_screen_size(width, height);

        let screen = LoadingScreen::show(backend, &self.root, self.pacing)?;
        if let Err(e) = self.load_categories(backend, &screen) {
            screen.release(backend);
            return Err(e);
        }
        screen.end(backend, width, height);

        self.state = LoadState::Ready;
        info!(
            "Resources ready: {} fonts, {} images, {} sounds, {} music",
            self.fonts.len(),
            self.images.len(),
            self.sounds.len(),
            self.music.len()
        );
        Ok(())
    }

    fn load_categories<B: MediaBackend>(
        &mut self,
        backend: &mut B,
        screen: &LoadingScreen,
    ) -> Result<()> {
        let manifest = self.manifest.clone();

        screen.show_message(backend, "Loading fonts...", 0);
        self.load_fonts(backend, &manifest)?;
        self.pacing.pause(backend, STEP_DELAY_MS);

        screen.show_message(backend, "Loading images...", 1);
        self.load_images(backend, &manifest)?;
        self.pacing.pause(backend, STEP_DELAY_MS);

        screen.show_message(backend, "Loading sounds...", 2);
        self.load_sounds(backend, &manifest)?;
        self.pacing.pause(backend, STEP_DELAY_MS);

        screen.show_message(backend, "Loading music...", 3);
        self.load_music(backend, &manifest)?;
        self.pacing.pause(backend, STEP_DELAY_MS);

        self.pacing.pause(backend, STEP_DELAY_MS);
        screen.show_message(backend, "Game loaded...", PROGRESS_STEPS);
        self.pacing.pause(backend, STEP_DELAY_MS);
        Ok(())
    }

    fn load_fonts<B: MediaBackend>(&mut self, backend: &mut B, manifest: &AssetManifest) -> Result<()> {
        for entry in manifest.fonts.iter() {
            self.new_font(backend, &entry.name, &entry.file, entry.size)?;
        }
        Ok(())
    }

    fn load_images<B: MediaBackend>(
        &mut self,
        backend: &mut B,
        manifest: &AssetManifest,
    ) -> Result<()> {
        for entry in manifest.images.iter() {
            match entry.transparent_color {
                Some(color) => {
                    self.new_transparent_color_image(backend, &entry.name, &entry.file, color)?
                }
                None => self.new_image(backend, &entry.name, &entry.file)?,
            }
        }
        Ok(())
    }

    fn load_sounds<B: MediaBackend>(
        &mut self,
        backend: &mut B,
        manifest: &AssetManifest,
    ) -> Result<()> {
        for entry in manifest.sounds.iter() {
            self.new_sound(backend, &entry.name, &entry.file)?;
        }
        Ok(())
    }

    fn load_music<B: MediaBackend>(&mut self, backend: &mut B, manifest: &AssetManifest) -> Result<()> {
        for entry in manifest.music.iter() {
            self.new_music(backend, &entry.name, &entry.file)?;
        }
        Ok(())
    }

    /// Load `file` from the fonts directory at `size` points and register it
    /// as `name`.
    pub fn new_font<B: MediaBackend>(
        &mut self,
        backend: &mut B,
        name: &str,
        file: &str,
        size: u32,
    ) -> Result<()> {
        self.fonts.ensure_vacant(name)?;
        let font = backend.load_font(&self.root.path_to(ResourceKind::Font, file), size)?;
        debug!("font '{}' <- {} @{}", name, file, size);
        self.fonts.add(name, font)
    }

    /// Load `file` from the images directory and register it as `name`.
    pub fn new_image<B: MediaBackend>(&mut self, backend: &mut B, name: &str, file: &str) -> Result<()> {
        self.images.ensure_vacant(name)?;
        let image = backend.load_bitmap(&self.root.path_to(ResourceKind::Bitmap, file), None)?;
        debug!("image '{}' <- {}", name, file);
        self.images.add(name, image)
    }

    /// Like [`new_image`](Self::new_image), with every pixel of
    /// `transparent_color` keyed out.
    pub fn new_transparent_color_image<B: MediaBackend>(
        &mut self,
        backend: &mut B,
        name: &str,
        file: &str,
        transparent_color: Rgba,
    ) -> Result<()> {
        self.images.ensure_vacant(name)?;
        let image = backend.load_bitmap(
            &self.root.path_to(ResourceKind::Bitmap, file),
            Some(transparent_color),
        )?;
        debug!("image '{}' <- {} keyed {:?}", name, file, transparent_color);
        self.images.add(name, image)
    }

    /// Load `file` from the sounds directory and register it as `name`.
    pub fn new_sound<B: MediaBackend>(&mut self, backend: &mut B, name: &str, file: &str) -> Result<()> {
        self.sounds.ensure_vacant(name)?;
        let sound = backend.load_sound(&self.root.path_to(ResourceKind::Sound, file))?;
        debug!("sound '{}' <- {}", name, file);
        self.sounds.add(name, sound)
    }

    /// Load `file` from the sounds directory as a music stream and register it
    /// as `name`.
    pub fn new_music<B: MediaBackend>(&mut self, backend: &mut B, name: &str, file: &str) -> Result<()> {
        self.music.ensure_vacant(name)?;
        let music = backend.load_music(&self.root.path_to(ResourceKind::Sound, file))?;
        debug!("music '{}' <- {}", name, file);
        self.music.add(name, music)
    }

    pub fn game_font(&self, name: &str) -> Result<FontHandle> {
        self.fonts.get(name)
    }

    pub fn game_image(&self, name: &str) -> Result<BitmapHandle> {
        self.images.get(name)
    }

    pub fn game_sound(&self, name: &str) -> Result<SoundHandle> {
        self.sounds.get(name)
    }

    pub fn game_music(&self, name: &str) -> Result<MusicHandle> {
        self.music.get(name)
    }

    /// Release every registered handle and pump events once.
    ///
    /// Entries are removed as they are released, so calling this again frees
    /// nothing. Valid from any state; always ends in [`LoadState::Freed`].
    pub fn free_resources<B: MediaBackend>(&mut self, backend: &mut B) {
        let released = self.fonts.len() + self.images.len() + self.sounds.len() + self.music.len();
        self.free_fonts(backend);
        self.free_images(backend);
        self.free_music(backend);
        self.free_sounds(backend);
        backend.process_events();
        if self.state != LoadState::Freed {
            info!("Released {} resources", released);
        }
        self.state = LoadState::Freed;
    }

    fn free_fonts<B: MediaBackend>(&mut self, backend: &mut B) {
        for font in self.fonts.drain() {
            backend.free_font(font);
        }
    }

    fn free_images<B: MediaBackend>(&mut self, backend: &mut B) {
        for image in self.images.drain() {
            backend.free_bitmap(image);
        }
    }

    fn free_sounds<B: MediaBackend>(&mut self, backend: &mut B) {
        for sound in self.sounds.drain() {
            backend.free_sound(sound);
        }
    }

    fn free_music<B: MediaBackend>(&mut self, backend: &mut B) {
        for music in self.music.drain() {
            backend.free_music(music);
        }
    }
}

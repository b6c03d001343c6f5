//! The multimedia layer the game is built on.
//!
//! Everything that touches a window, a GPU texture, or the audio device goes
//! through [`MediaBackend`]. Assets are referred to by small opaque handles
//! that the backend hands out on load and takes back on free.
//!
//! Overview
//! - `headless` – records every call; used by tests and `--headless` runs
//! - `rlbackend` – the real window and audio device, backed by raylib

use std::num::NonZeroU32;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod headless;
pub mod rlbackend;

macro_rules! media_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Wrap a backend-assigned id.
            pub fn from_raw(id: NonZeroU32) -> Self {
                Self(id)
            }

            /// The backend-assigned id.
            pub fn raw(self) -> NonZeroU32 {
                self.0
            }
        }
    };
}

media_handle!(
    /// A loaded font at a fixed point size.
    FontHandle
);
media_handle!(
    /// A loaded bitmap (texture).
    BitmapHandle
);
media_handle!(
    /// A short sound effect, fully decoded in memory.
    SoundHandle
);
media_handle!(
    /// A streamed music track.
    MusicHandle
);

/// Integer rectangle in screen or bitmap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Horizontal alignment of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Window, drawing, and audio operations consumed by the resource manager and
/// the game screens.
///
/// Drawing calls accumulate on the current screen; nothing becomes visible
/// until [`refresh_screen`](MediaBackend::refresh_screen). Loads return
/// [`ResourceError::AssetNotFound`](crate::error::ResourceError::AssetNotFound)
/// when the file is missing or cannot be decoded.
pub trait MediaBackend {
    fn change_screen_size(&mut self, width: u32, height: u32);

    fn load_font(&mut self, path: &Path, size: u32) -> Result<FontHandle>;
    /// Load a bitmap. With `transparent` set, pixels of that colour become
    /// fully transparent.
    fn load_bitmap(&mut self, path: &Path, transparent: Option<Rgba>) -> Result<BitmapHandle>;
    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle>;
    fn load_music(&mut self, path: &Path) -> Result<MusicHandle>;

    fn free_font(&mut self, font: FontHandle);
    fn free_bitmap(&mut self, bitmap: BitmapHandle);
    fn free_sound(&mut self, sound: SoundHandle);
    fn free_music(&mut self, music: MusicHandle);

    fn draw_bitmap(&mut self, bitmap: BitmapHandle, x: i32, y: i32);
    /// Draw the `src` region of `bitmap` with its top-left corner at `(x, y)`.
    fn draw_bitmap_part(&mut self, bitmap: BitmapHandle, src: Rect, x: i32, y: i32);
    fn draw_text(
        &mut self,
        text: &str,
        color: Rgba,
        font: FontHandle,
        align: TextAlign,
        area: Rect,
    );
    fn clear_screen(&mut self);
    fn refresh_screen(&mut self);

    fn play_sound(&mut self, sound: SoundHandle);
    fn play_music(&mut self, music: MusicHandle, looped: bool);

    /// Pump the window's event queue once.
    fn process_events(&mut self);
    /// Block for `ms` milliseconds.
    fn delay(&mut self, ms: u32);
    fn window_should_close(&self) -> bool;
}

//! A windowless [`MediaBackend`] that records every call.
//!
//! Used by the test suite and by the binary's `--headless` mode, which checks
//! an asset tree without opening a window. Delays are recorded but never
//! slept.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::error::{AssetKind, ResourceError, Result};
use crate::media::{
    BitmapHandle, FontHandle, MediaBackend, MusicHandle, Rect, Rgba, SoundHandle, TextAlign,
};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaOp {
    ChangeScreenSize { width: u32, height: u32 },
    LoadFont { font: FontHandle, path: PathBuf, size: u32 },
    LoadBitmap { bitmap: BitmapHandle, path: PathBuf, transparent: Option<Rgba> },
    LoadSound { sound: SoundHandle, path: PathBuf },
    LoadMusic { music: MusicHandle, path: PathBuf },
    FreeFont(FontHandle),
    FreeBitmap(BitmapHandle),
    FreeSound(SoundHandle),
    FreeMusic(MusicHandle),
    DrawBitmap { bitmap: BitmapHandle, x: i32, y: i32 },
    DrawBitmapPart { bitmap: BitmapHandle, src: Rect, x: i32, y: i32 },
    DrawText { text: String, color: Rgba, font: FontHandle, align: TextAlign, area: Rect },
    ClearScreen,
    RefreshScreen,
    PlaySound(SoundHandle),
    PlayMusic { music: MusicHandle, looped: bool },
    ProcessEvents,
    Delay(u32),
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    ops: Vec<MediaOp>,
    next_id: u32,
    live: FxHashSet<(AssetKind, NonZeroU32)>,
    invalid_frees: usize,
    verify_files: bool,
    missing: FxHashSet<String>,
    screen: (u32, u32),
    close_requested: bool,
}

impl HeadlessBackend {
    /// A backend that accepts every load without touching the disk.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that only accepts loads of files that exist on disk.
    pub fn verifying() -> Self {
        Self {
            verify_files: true,
            ..Self::default()
        }
    }

    /// Make loads of any file with this file name fail.
    pub fn with_missing(mut self, file_name: impl Into<String>) -> Self {
        self.missing.insert(file_name.into());
        self
    }

    /// Every call made so far, in order.
    pub fn ops(&self) -> &[MediaOp] {
        &self.ops
    }

    /// Forget the recorded calls. Live handles are kept.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of handles loaded and not yet freed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of frees of handles that were not live (double frees or
    /// foreign handles).
    pub fn invalid_frees(&self) -> usize {
        self.invalid_frees
    }

    /// Current screen size as last requested.
    pub fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn check_file(&self, path: &Path) -> Result<()> {
        let listed_missing = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.missing.contains(name));
        if listed_missing {
            return Err(ResourceError::AssetNotFound {
                path: path.to_path_buf(),
                reason: "marked missing".into(),
            });
        }
        if self.verify_files && !path.is_file() {
            return Err(ResourceError::AssetNotFound {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            });
        }
        Ok(())
    }

    fn allocate(&mut self, kind: AssetKind) -> NonZeroU32 {
        self.next_id += 1;
        // next_id starts at 0 and is incremented first, so it is never zero
        let id = NonZeroU32::new(self.next_id).unwrap_or(NonZeroU32::MIN);
        self.live.insert((kind, id));
        id
    }

    fn release(&mut self, kind: AssetKind, id: NonZeroU32) {
        if !self.live.remove(&(kind, id)) {
            warn!("[headless] free of {} handle {} that is not live", kind, id);
            self.invalid_frees += 1;
        }
    }
}

impl MediaBackend for HeadlessBackend {
    fn change_screen_size(&mut self, width: u32, height: u32) {
        self.screen = (width, height);
        self.ops.push(MediaOp::ChangeScreenSize { width, height });
    }

    fn load_font(&mut self, path: &Path, size: u32) -> Result<FontHandle> {
        self.check_file(path)?;
        let font = FontHandle::from_raw(self.allocate(AssetKind::Font));
        debug!("[headless] font {:?} size={} -> {:?}", path, size, font);
        self.ops.push(MediaOp::LoadFont {
            font,
            path: path.to_path_buf(),
            size,
        });
        Ok(font)
    }

    fn load_bitmap(&mut self, path: &Path, transparent: Option<Rgba>) -> Result<BitmapHandle> {
        self.check_file(path)?;
        let bitmap = BitmapHandle::from_raw(self.allocate(AssetKind::Image));
        debug!("[headless] bitmap {:?} -> {:?}", path, bitmap);
        self.ops.push(MediaOp::LoadBitmap {
            bitmap,
            path: path.to_path_buf(),
            transparent,
        });
        Ok(bitmap)
    }

    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle> {
        self.check_file(path)?;
        let sound = SoundHandle::from_raw(self.allocate(AssetKind::Sound));
        self.ops.push(MediaOp::LoadSound {
            sound,
            path: path.to_path_buf(),
        });
        Ok(sound)
    }

    fn load_music(&mut self, path: &Path) -> Result<MusicHandle> {
        self.check_file(path)?;
        let music = MusicHandle::from_raw(self.allocate(AssetKind::Music));
        self.ops.push(MediaOp::LoadMusic {
            music,
            path: path.to_path_buf(),
        });
        Ok(music)
    }

    fn free_font(&mut self, font: FontHandle) {
        self.release(AssetKind::Font, font.raw());
        self.ops.push(MediaOp::FreeFont(font));
    }

    fn free_bitmap(&mut self, bitmap: BitmapHandle) {
        self.release(AssetKind::Image, bitmap.raw());
        self.ops.push(MediaOp::FreeBitmap(bitmap));
    }

    fn free_sound(&mut self, sound: SoundHandle) {
        self.release(AssetKind::Sound, sound.raw());
        self.ops.push(MediaOp::FreeSound(sound));
    }

    fn free_music(&mut self, music: MusicHandle) {
        self.release(AssetKind::Music, music.raw());
        self.ops.push(MediaOp::FreeMusic(music));
    }

    fn draw_bitmap(&mut self, bitmap: BitmapHandle, x: i32, y: i32) {
        self.ops.push(MediaOp::DrawBitmap { bitmap, x, y });
    }

    fn draw_bitmap_part(&mut self, bitmap: BitmapHandle, src: Rect, x: i32, y: i32) {
        self.ops.push(MediaOp::DrawBitmapPart { bitmap, src, x, y });
    }

    fn draw_text(
        &mut self,
        text: &str,
        color: Rgba,
        font: FontHandle,
        align: TextAlign,
        area: Rect,
    ) {
        self.ops.push(MediaOp::DrawText {
            text: text.to_string(),
            color,
            font,
            align,
            area,
        });
    }

    fn clear_screen(&mut self) {
        self.ops.push(MediaOp::ClearScreen);
    }

    fn refresh_screen(&mut self) {
        self.ops.push(MediaOp::RefreshScreen);
    }

    fn play_sound(&mut self, sound: SoundHandle) {
        self.ops.push(MediaOp::PlaySound(sound));
    }

    fn play_music(&mut self, music: MusicHandle, looped: bool) {
        self.ops.push(MediaOp::PlayMusic { music, looped });
    }

    fn process_events(&mut self) {
        self.ops.push(MediaOp::ProcessEvents);
    }

    fn delay(&mut self, ms: u32) {
        self.ops.push(MediaOp::Delay(ms));
    }

    fn window_should_close(&self) -> bool {
        self.close_requested
    }
}

//! Splash and progress screen shown while resources load.
//!
//! The loading screen owns its own small set of assets (background, intro
//! animation sheet, progress bar strips, font, and start-up jingle). They are
//! loaded by [`LoadingScreen::show`] and released by [`LoadingScreen::end`]
//! and are never visible to the rest of the game.

use log::debug;

use crate::error::Result;
use crate::media::{
    BitmapHandle, FontHandle, MediaBackend, Rect, Rgba, SoundHandle, TextAlign,
};
use crate::resources::resourceroot::{ResourceKind, ResourceRoot};

const BACKGROUND_FILE: &str = "SplashBack.png";
const ANIMATION_FILE: &str = "SwinGameAni.jpg";
const LOADER_FULL_FILE: &str = "loader_full.png";
const LOADER_EMPTY_FILE: &str = "loader_empty.png";
const FONT_FILE: &str = "arial.ttf";
const FONT_SIZE: u32 = 12;
const START_SOUND_FILE: &str = "SwinGameStart.ogg";

// Intro animation: cells are laid out column-major in a sheet six cells tall.
pub const ANI_X: i32 = 143;
pub const ANI_Y: i32 = 134;
pub const ANI_W: i32 = 546;
pub const ANI_H: i32 = 327;
pub const ANI_V_CELL_COUNT: u32 = 6;
pub const ANI_CELL_COUNT: u32 = 11;

// Progress bar and message box.
pub const BAR_X: i32 = 279;
pub const BAR_Y: i32 = 453;
pub const BAR_W: i32 = 260;
pub const BAR_H: i32 = 66;
pub const PROGRESS_STEPS: u32 = 5;
pub const MESSAGE_AREA: Rect = Rect::new(310, 493, 200, 25);

/// Whether the loading screen waits between frames so a human can see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    #[default]
    Paced,
    /// No delays at all; used by tests and headless runs.
    Immediate,
}

impl Pacing {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Pacing::Paced } else { Pacing::Immediate }
    }

    pub fn pause<B: MediaBackend>(self, backend: &mut B, ms: u32) {
        if self == Pacing::Paced {
            backend.delay(ms);
        }
    }
}

/// Width in pixels of the filled part of the progress bar after `step` of
/// [`PROGRESS_STEPS`].
pub fn progress_fill_width(step: u32) -> i32 {
    BAR_W * step.min(PROGRESS_STEPS) as i32 / PROGRESS_STEPS as i32
}

/// Source rectangle of intro frame `index` within the animation sheet.
pub fn intro_frame_source(index: u32) -> Rect {
    let col = (index / ANI_V_CELL_COUNT) as i32;
    let row = (index % ANI_V_CELL_COUNT) as i32;
    Rect::new(col * ANI_W, row * ANI_H, ANI_W, ANI_H)
}

#[derive(Debug, Clone, Copy)]
enum Transient {
    Bitmap(BitmapHandle),
    Font(FontHandle),
    Sound(SoundHandle),
}

impl Transient {
    fn release<B: MediaBackend>(self, backend: &mut B) {
        match self {
            Transient::Bitmap(bitmap) => backend.free_bitmap(bitmap),
            Transient::Font(font) => backend.free_font(font),
            Transient::Sound(sound) => backend.free_sound(sound),
        }
    }
}

fn load_bitmap<B: MediaBackend>(
    backend: &mut B,
    root: &ResourceRoot,
    file: &str,
    loaded: &mut Vec<Transient>,
) -> Result<BitmapHandle> {
    let handle = backend.load_bitmap(&root.path_to(ResourceKind::Bitmap, file), None)?;
    loaded.push(Transient::Bitmap(handle));
    Ok(handle)
}

#[derive(Debug)]
pub struct LoadingScreen {
    background: BitmapHandle,
    animation: BitmapHandle,
    loader_full: BitmapHandle,
    loader_empty: BitmapHandle,
    font: FontHandle,
    start_sound: SoundHandle,
    pacing: Pacing,
}

impl LoadingScreen {
    /// Load the loading screen's assets, draw the background, and play the
    /// intro animation. If any asset fails to load, the ones already loaded
    /// are released before the error is returned.
    pub fn show<B: MediaBackend>(
        backend: &mut B,
        root: &ResourceRoot,
        pacing: Pacing,
    ) -> Result<Self> {
        let mut loaded = Vec::new();
        match Self::load(backend, root, pacing, &mut loaded) {
            Ok(screen) => {
                screen.play_intro(backend);
                Ok(screen)
            }
            Err(e) => {
                for transient in loaded {
                    transient.release(backend);
                }
                Err(e)
            }
        }
    }

    fn load<B: MediaBackend>(
        backend: &mut B,
        root: &ResourceRoot,
        pacing: Pacing,
        loaded: &mut Vec<Transient>,
    ) -> Result<Self> {
        let background = load_bitmap(backend, root, BACKGROUND_FILE, loaded)?;
        backend.draw_bitmap(background, 0, 0);
        backend.refresh_screen();
        backend.process_events();

        let animation = load_bitmap(backend, root, ANIMATION_FILE, loaded)?;
        let font = backend.load_font(&root.path_to(ResourceKind::Font, FONT_FILE), FONT_SIZE)?;
        loaded.push(Transient::Font(font));
        let start_sound = backend.load_sound(&root.path_to(ResourceKind::Sound, START_SOUND_FILE))?;
        loaded.push(Transient::Sound(start_sound));

        let loader_full = load_bitmap(backend, root, LOADER_FULL_FILE, loaded)?;
        let loader_empty = load_bitmap(backend, root, LOADER_EMPTY_FILE, loaded)?;

        Ok(Self {
            background,
            animation,
            loader_full,
            loader_empty,
            font,
            start_sound,
            pacing,
        })
    }

    fn play_intro<B: MediaBackend>(&self, backend: &mut B) {
        backend.play_sound(self.start_sound);
        self.pacing.pause(backend, 200);

        for i in 0..ANI_CELL_COUNT {
            backend.draw_bitmap(self.background, 0, 0);
            backend.draw_bitmap_part(self.animation, intro_frame_source(i), ANI_X, ANI_Y);
            self.pacing.pause(backend, 20);
            backend.refresh_screen();
            backend.process_events();
        }

        self.pacing.pause(backend, 1500);
    }

    /// Draw the progress bar filled to `step` with `message` underneath.
    pub fn show_message<B: MediaBackend>(&self, backend: &mut B, message: &str, step: u32) {
        debug!("loading screen: '{}' ({}/{})", message, step, PROGRESS_STEPS);
        let full_w = progress_fill_width(step);
        backend.draw_bitmap(self.loader_empty, BAR_X, BAR_Y);
        backend.draw_bitmap_part(self.loader_full, Rect::new(0, 0, full_w, BAR_H), BAR_X, BAR_Y);
        backend.draw_text(
            message,
            Rgba::WHITE,
            self.font,
            TextAlign::Center,
            MESSAGE_AREA,
        );
        backend.refresh_screen();
        backend.process_events();
    }

    /// Clear the screen, release the loading screen's assets, and resize the
    /// screen for the game.
    pub fn end<B: MediaBackend>(self, backend: &mut B, width: u32, height: u32) {
        backend.process_events();
        self.pacing.pause(backend, 500);
        backend.clear_screen();
        backend.refresh_screen();
        self.release(backend);
        backend.change_screen_size(width, height);
    }

    /// Release the loading screen's assets without touching the screen.
    pub fn release<B: MediaBackend>(self, backend: &mut B) {
        for transient in self.transients() {
            transient.release(backend);
        }
    }

    fn transients(&self) -> [Transient; 6] {
        [
            Transient::Font(self.font),
            Transient::Bitmap(self.background),
            Transient::Bitmap(self.animation),
            Transient::Bitmap(self.loader_empty),
            Transient::Bitmap(self.loader_full),
            Transient::Sound(self.start_sound),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::headless::{HeadlessBackend, MediaOp};
    use rustc_hash::FxHashSet;

    #[test]
    fn test_progress_fill_width_steps() {
        assert_eq!(progress_fill_width(0), 0);
        assert_eq!(progress_fill_width(1), 52);
        assert_eq!(progress_fill_width(3), 156);
        assert_eq!(progress_fill_width(5), 260);
    }

    #[test]
    fn test_progress_fill_width_is_monotonic() {
        let widths: Vec<i32> = (0..=PROGRESS_STEPS).map(progress_fill_width).collect();
        assert!(widths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_progress_fill_width_clamps_past_last_step() {
        assert_eq!(progress_fill_width(9), BAR_W);
    }

    #[test]
    fn test_intro_frames_cover_distinct_cells() {
        let cells: FxHashSet<(i32, i32)> = (0..ANI_CELL_COUNT)
            .map(intro_frame_source)
            .map(|r| (r.x / ANI_W, r.y / ANI_H))
            .collect();
        assert_eq!(cells.len(), ANI_CELL_COUNT as usize);
        assert!(cells.iter().all(|&(_, row)| (0..6).contains(&row)));
        assert_eq!(intro_frame_source(0), Rect::new(0, 0, ANI_W, ANI_H));
        assert_eq!(intro_frame_source(5), Rect::new(0, 5 * ANI_H, ANI_W, ANI_H));
        assert_eq!(intro_frame_source(6), Rect::new(ANI_W, 0, ANI_W, ANI_H));
        assert_eq!(intro_frame_source(10), Rect::new(ANI_W, 4 * ANI_H, ANI_W, ANI_H));
    }

    #[test]
    fn test_show_plays_eleven_frames_and_sound_once() {
        let mut backend = HeadlessBackend::new();
        let screen =
            LoadingScreen::show(&mut backend, &ResourceRoot::default(), Pacing::Immediate).unwrap();

        let frames = backend
            .ops()
            .iter()
            .filter(|op| {
                matches!(op, MediaOp::DrawBitmapPart { bitmap, .. } if *bitmap == screen.animation)
            })
            .count();
        assert_eq!(frames, ANI_CELL_COUNT as usize);
        let sounds = backend
            .ops()
            .iter()
            .filter(|op| matches!(op, MediaOp::PlaySound(_)))
            .count();
        assert_eq!(sounds, 1);
        assert!(!backend.ops().iter().any(|op| matches!(op, MediaOp::Delay(_))));
        assert_eq!(backend.live_count(), 6);
    }

    #[test]
    fn test_paced_intro_delays() {
        let mut backend = HeadlessBackend::new();
        LoadingScreen::show(&mut backend, &ResourceRoot::default(), Pacing::Paced).unwrap();
        let delays: Vec<u32> = backend
            .ops()
            .iter()
            .filter_map(|op| match op {
                MediaOp::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays.len(), 1 + ANI_CELL_COUNT as usize + 1);
        assert_eq!(delays[0], 200);
        assert_eq!(*delays.last().unwrap(), 1500);
    }

    #[test]
    fn test_show_message_draws_partial_bar_and_text() {
        let mut backend = HeadlessBackend::new();
        let screen =
            LoadingScreen::show(&mut backend, &ResourceRoot::default(), Pacing::Immediate).unwrap();
        backend.clear_ops();
        screen.show_message(&mut backend, "Loading images...", 1);

        assert_eq!(
            backend.ops()[1],
            MediaOp::DrawBitmapPart {
                bitmap: screen.loader_full,
                src: Rect::new(0, 0, 52, BAR_H),
                x: BAR_X,
                y: BAR_Y,
            }
        );
        assert!(matches!(
            &backend.ops()[2],
            MediaOp::DrawText { text, align: TextAlign::Center, area, .. }
                if text == "Loading images..." && *area == MESSAGE_AREA
        ));
        assert_eq!(backend.ops()[3], MediaOp::RefreshScreen);
    }

    #[test]
    fn test_end_releases_everything_and_resizes() {
        let mut backend = HeadlessBackend::new();
        let screen =
            LoadingScreen::show(&mut backend, &ResourceRoot::default(), Pacing::Immediate).unwrap();
        screen.end(&mut backend, 1024, 768);
        assert_eq!(backend.live_count(), 0);
        assert_eq!(backend.invalid_frees(), 0);
        assert_eq!(backend.screen_size(), (1024, 768));
        assert_eq!(
            backend.ops().last(),
            Some(&MediaOp::ChangeScreenSize { width: 1024, height: 768 })
        );
    }

    #[test]
    fn test_failed_show_releases_partial_loads() {
        let mut backend = HeadlessBackend::new().with_missing(LOADER_EMPTY_FILE);
        let result = LoadingScreen::show(&mut backend, &ResourceRoot::default(), Pacing::Immediate);
        assert!(result.is_err());
        assert_eq!(backend.live_count(), 0);
        assert_eq!(backend.invalid_frees(), 0);
    }
}

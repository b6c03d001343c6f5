//! raylib implementation of [`MediaBackend`].
//!
//! raylib redraws the whole frame between `BeginDrawing`/`EndDrawing`, while
//! the game draws incrementally and refreshes when it wants the result shown.
//! The backend bridges the two by queueing draw calls until the next
//! [`clear_screen`](MediaBackend::clear_screen) and replaying the queue on
//! every [`refresh_screen`](MediaBackend::refresh_screen).
//!
//! Note: raylib handles must be used from the main thread only, so this
//! backend is inserted as a non-send resource.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use raylib::ffi;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::{ResourceError, Result};
use crate::media::{
    BitmapHandle, FontHandle, MediaBackend, MusicHandle, Rect, Rgba, SoundHandle, TextAlign,
};

const TEXT_SPACING: f32 = 1.0;

struct LoadedFont {
    font: Font,
    size: f32,
}

enum DrawCmd {
    Bitmap {
        id: NonZeroU32,
        x: i32,
        y: i32,
    },
    BitmapPart {
        id: NonZeroU32,
        src: Rect,
        x: i32,
        y: i32,
    },
    Text {
        text: String,
        color: Rgba,
        font: NonZeroU32,
        align: TextAlign,
        area: Rect,
    },
}

fn to_color(c: Rgba) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| ResourceError::AssetNotFound {
        path: path.to_path_buf(),
        reason: "path is not valid UTF-8".into(),
    })
}

fn not_found(path: &Path, e: impl ToString) -> ResourceError {
    ResourceError::AssetNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn measure_text_width(font: &Font, text: &str, size: f32) -> f32 {
    let Ok(c_text) = CString::new(text) else {
        return 0.0;
    };
    let measured = unsafe { ffi::MeasureTextEx(**font, c_text.as_ptr(), size, TEXT_SPACING) };
    measured.x
}

pub struct RaylibBackend {
    // Asset maps are declared before the handle so they unload while the
    // window and audio device are still open.
    fonts: FxHashMap<NonZeroU32, LoadedFont>,
    bitmaps: FxHashMap<NonZeroU32, Texture2D>,
    sounds: FxHashMap<NonZeroU32, Sound<'static>>,
    musics: FxHashMap<NonZeroU32, Music<'static>>,
    looped_music: Option<NonZeroU32>,
    frame: Vec<DrawCmd>,
    next_id: u32,
    audio: &'static RaylibAudio,
    rl: RaylibHandle,
    thread: RaylibThread,
}

impl RaylibBackend {
    /// Open the window and the audio device.
    pub fn open(width: u32, height: u32, title: &str, target_fps: u32) -> Result<Self> {
        let (mut rl, thread) = raylib::init()
            .size(width as i32, height as i32)
            .title(title)
            .build();
        rl.set_target_fps(target_fps);
        // Disable ESC to exit
        rl.set_exit_key(None);

        let audio = RaylibAudio::init_audio_device().map_err(|e| ResourceError::AssetNotFound {
            path: "audio device".into(),
            reason: e.to_string(),
        })?;
        // Sounds borrow the device, and the device lives as long as the game.
        let audio: &'static RaylibAudio = Box::leak(Box::new(audio));
        info!("raylib window {}x{} '{}' opened", width, height, title);

        Ok(Self {
            fonts: FxHashMap::default(),
            bitmaps: FxHashMap::default(),
            sounds: FxHashMap::default(),
            musics: FxHashMap::default(),
            looped_music: None,
            frame: Vec::new(),
            next_id: 0,
            audio,
            rl,
            thread,
        })
    }

    fn allocate(&mut self) -> NonZeroU32 {
        self.next_id += 1;
        NonZeroU32::new(self.next_id).unwrap_or(NonZeroU32::MIN)
    }

    fn pump_music(&self) {
        for (id, music) in self.musics.iter() {
            if music.is_stream_playing() {
                music.update_stream();
            } else if self.looped_music == Some(*id) {
                music.seek_stream(0.0);
                music.play_stream();
            }
        }
    }
}

impl MediaBackend for RaylibBackend {
    fn change_screen_size(&mut self, width: u32, height: u32) {
        self.rl.set_window_size(width as i32, height as i32);
    }

    fn load_font(&mut self, path: &Path, size: u32) -> Result<FontHandle> {
        let font = self
            .rl
            .load_font_ex(&self.thread, path_str(path)?, size as i32, None)
            .map_err(|e| not_found(path, e))?;
        let id = self.allocate();
        debug!("loaded font {:?} size={} id={}", path, size, id);
        self.fonts.insert(
            id,
            LoadedFont {
                font,
                size: size as f32,
            },
        );
        Ok(FontHandle::from_raw(id))
    }

    fn load_bitmap(&mut self, path: &Path, transparent: Option<Rgba>) -> Result<BitmapHandle> {
        let texture = match transparent {
            Some(key) => {
                let mut image = Image::load_image(path_str(path)?).map_err(|e| not_found(path, e))?;
                image.color_replace(to_color(key), Color::BLANK);
                self.rl
                    .load_texture_from_image(&self.thread, &image)
                    .map_err(|e| not_found(path, e))?
            }
            None => self
                .rl
                .load_texture(&self.thread, path_str(path)?)
                .map_err(|e| not_found(path, e))?,
        };
        let id = self.allocate();
        debug!("loaded bitmap {:?} id={}", path, id);
        self.bitmaps.insert(id, texture);
        Ok(BitmapHandle::from_raw(id))
    }

    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle> {
        let sound = self
            .audio
            .new_sound(path_str(path)?)
            .map_err(|e| not_found(path, e))?;
        let id = self.allocate();
        self.sounds.insert(id, sound);
        Ok(SoundHandle::from_raw(id))
    }

    fn load_music(&mut self, path: &Path) -> Result<MusicHandle> {
        let music = self
            .audio
            .new_music(path_str(path)?)
            .map_err(|e| not_found(path, e))?;
        let id = self.allocate();
        self.musics.insert(id, music);
        Ok(MusicHandle::from_raw(id))
    }

    fn free_font(&mut self, font: FontHandle) {
        if self.fonts.remove(&font.raw()).is_none() {
            warn!("free of unknown font id={}", font.raw());
        }
    }

    fn free_bitmap(&mut self, bitmap: BitmapHandle) {
        if self.bitmaps.remove(&bitmap.raw()).is_none() {
            warn!("free of unknown bitmap id={}", bitmap.raw());
        }
    }

    fn free_sound(&mut self, sound: SoundHandle) {
        if self.sounds.remove(&sound.raw()).is_none() {
            warn!("free of unknown sound id={}", sound.raw());
        }
    }

    fn free_music(&mut self, music: MusicHandle) {
        if self.looped_music == Some(music.raw()) {
            self.looped_music = None;
        }
        match self.musics.remove(&music.raw()) {
            Some(track) => track.stop_stream(),
            None => warn!("free of unknown music id={}", music.raw()),
        }
    }

    fn draw_bitmap(&mut self, bitmap: BitmapHandle, x: i32, y: i32) {
        self.frame.push(DrawCmd::Bitmap {
            id: bitmap.raw(),
            x,
            y,
        });
    }

    fn draw_bitmap_part(&mut self, bitmap: BitmapHandle, src: Rect, x: i32, y: i32) {
        self.frame.push(DrawCmd::BitmapPart {
            id: bitmap.raw(),
            src,
            x,
            y,
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        color: Rgba,
        font: FontHandle,
        align: TextAlign,
        area: Rect,
    ) {
        self.frame.push(DrawCmd::Text {
            text: text.to_string(),
            color,
            font: font.raw(),
            align,
            area,
        });
    }

    fn clear_screen(&mut self) {
        self.frame.clear();
    }

    fn refresh_screen(&mut self) {
        self.pump_music();

        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);
        for cmd in self.frame.iter() {
            match cmd {
                DrawCmd::Bitmap { id, x, y } => {
                    if let Some(tex) = self.bitmaps.get(id) {
                        d.draw_texture(tex, *x, *y, Color::WHITE);
                    }
                }
                DrawCmd::BitmapPart { id, src, x, y } => {
                    if let Some(tex) = self.bitmaps.get(id) {
                        let source = Rectangle {
                            x: src.x as f32,
                            y: src.y as f32,
                            width: src.w as f32,
                            height: src.h as f32,
                        };
                        let position = Vector2 {
                            x: *x as f32,
                            y: *y as f32,
                        };
                        d.draw_texture_rec(tex, source, position, Color::WHITE);
                    }
                }
                DrawCmd::Text {
                    text,
                    color,
                    font,
                    align,
                    area,
                } => {
                    let Some(loaded) = self.fonts.get(font) else {
                        continue;
                    };
                    let width = measure_text_width(&loaded.font, text, loaded.size);
                    let x = match align {
                        TextAlign::Left => area.x as f32,
                        TextAlign::Center => area.x as f32 + (area.w as f32 - width) * 0.5,
                        TextAlign::Right => (area.x + area.w) as f32 - width,
                    };
                    let position = Vector2 {
                        x,
                        y: area.y as f32,
                    };
                    d.draw_text_ex(
                        &loaded.font,
                        text,
                        position,
                        loaded.size,
                        TEXT_SPACING,
                        to_color(*color),
                    );
                }
            }
        }
    }

    fn play_sound(&mut self, sound: SoundHandle) {
        match self.sounds.get(&sound.raw()) {
            Some(s) => s.play(),
            None => warn!("play of unknown sound id={}", sound.raw()),
        }
    }

    fn play_music(&mut self, music: MusicHandle, looped: bool) {
        let Some(track) = self.musics.get(&music.raw()) else {
            warn!("play of unknown music id={}", music.raw());
            return;
        };
        track.seek_stream(0.0);
        track.play_stream();
        self.looped_music = looped.then_some(music.raw());
    }

    fn process_events(&mut self) {
        unsafe { ffi::PollInputEvents() };
    }

    fn delay(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }

    fn window_should_close(&self) -> bool {
        self.rl.window_should_close()
    }
}

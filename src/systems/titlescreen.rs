//! Title screen systems.
//!
//! The first screen after loading: the menu background with the game title
//! and the background music looping. Both systems are generic over the
//! [`MediaBackend`] so they run the same against raylib and in tests.

use bevy_ecs::prelude::*;
use log::error;

use crate::media::{MediaBackend, Rect, Rgba, TextAlign};
use crate::resources::gameconfig::GameConfig;
use crate::resources::resourcemanager::ResourceManager;

pub const TITLE_BACKGROUND: &str = "Menu";
pub const TITLE_FONT: &str = "Courier";
pub const TITLE_MUSIC: &str = "Background";

const CAPTION_HEIGHT: i32 = 20;
const CAPTION_MARGIN: i32 = 40;

/// Start the background music the first time it runs.
pub fn start_background_music<B: MediaBackend + 'static>(
    resources: Res<ResourceManager>,
    mut backend: NonSendMut<B>,
    mut started: Local<bool>,
) {
    if *started {
        return;
    }
    *started = true;
    match resources.game_music(TITLE_MUSIC) {
        Ok(music) => backend.play_music(music, true),
        Err(e) => error!("Cannot start title music: {}", e),
    }
}

/// Draw the title screen and present it.
pub fn render_title_screen<B: MediaBackend + 'static>(
    resources: Res<ResourceManager>,
    config: Res<GameConfig>,
    mut backend: NonSendMut<B>,
) {
    let background = match resources.game_image(TITLE_BACKGROUND) {
        Ok(image) => image,
        Err(e) => {
            error!("Skipping title frame: {}", e);
            return;
        }
    };
    let font = match resources.game_font(TITLE_FONT) {
        Ok(font) => font,
        Err(e) => {
            error!("Skipping title frame: {}", e);
            return;
        }
    };

    let (w, h) = config.window_size();
    let caption = Rect::new(0, h as i32 - CAPTION_MARGIN, w as i32, CAPTION_HEIGHT);

    backend.clear_screen();
    backend.draw_bitmap(background, 0, 0);
    backend.draw_text(&config.title, Rgba::WHITE, font, TextAlign::Center, caption);
    backend.refresh_screen();
    backend.process_events();
}

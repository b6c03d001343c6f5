//! Battleships main entry point.
//!
//! Opens the game window, loads every game resource behind the loading
//! screen, shows the title screen until the window is closed, and releases
//! the resources on the way out.
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run -- --headless --resources ./Resources
//! ```
//!
//! `--headless` loads and frees the whole asset list without opening a window,
//! checking that every file exists. It exits non-zero if any is missing.

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use battleships_resources::error::ResourceError;
use battleships_resources::media::MediaBackend;
use battleships_resources::media::headless::HeadlessBackend;
use battleships_resources::media::rlbackend::RaylibBackend;
use battleships_resources::resources::gameconfig::GameConfig;
use battleships_resources::resources::loadingscreen::Pacing;
use battleships_resources::resources::manifest::AssetManifest;
use battleships_resources::resources::resourcemanager::ResourceManager;
use battleships_resources::systems::titlescreen::{render_title_screen, start_background_music};
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Battleships
#[derive(Parser)]
#[command(version, about = "Battleships: load the game's resources and show the title screen.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Resource root directory (overrides the config file).
    #[arg(long, value_name = "DIR")]
    resources: Option<PathBuf>,

    /// JSON asset manifest replacing the built-in asset list.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Load and free every resource without opening a window, then exit.
    #[arg(long)]
    headless: bool,
}

fn build_schedule<B: MediaBackend + 'static>() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems((start_background_music::<B>, render_title_screen::<B>).chain());
    update
}

/// Load resources, run the title screen until the backend asks to close (or
/// for `max_frames` frames), then free everything.
fn run<B: MediaBackend + 'static>(
    mut backend: B,
    mut resources: ResourceManager,
    config: GameConfig,
    max_frames: Option<u32>,
) -> Result<(), ResourceError> {
    if let Err(e) = resources.load_resources(&mut backend) {
        resources.free_resources(&mut backend);
        return Err(e);
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(resources);
    world.insert_non_send_resource(backend);

    let mut update = build_schedule::<B>();

    // --------------- Main loop ---------------
    let mut frames = 0;
    while !world.non_send_resource::<B>().window_should_close()
        && max_frames.is_none_or(|max| frames < max)
    {
        update.run(&mut world);
        frames += 1;
    }
    log::info!("Title screen closed after {} frames", frames);

    if let (Some(mut resources), Some(mut backend)) = (
        world.remove_resource::<ResourceManager>(),
        world.remove_non_send_resource::<B>(),
    ) {
        resources.free_resources(&mut backend);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(root) = cli.resources {
        config.resource_root = root;
    }
    if let Some(manifest) = cli.manifest {
        config.manifest_path = Some(manifest);
    }

    let manifest = match &config.manifest_path {
        Some(path) => match AssetManifest::from_json_file(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => AssetManifest::default(),
    };

    let result = if cli.headless {
        let resources =
            ResourceManager::from_config(&config, manifest).with_pacing(Pacing::Immediate);
        let count = resources.manifest().len();
        let result = run(HeadlessBackend::verifying(), resources, config, Some(1));
        if result.is_ok() {
            println!("All {} resources loaded and released", count);
        }
        result
    } else {
        let (w, h) = config.window_size();
        match RaylibBackend::open(w, h, &config.title, config.target_fps) {
            Ok(backend) => {
                let resources = ResourceManager::from_config(&config, manifest);
                run(backend, resources, config, None)
            }
            Err(e) => Err(e),
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

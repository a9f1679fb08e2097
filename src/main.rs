//! Application entry point: composes the Bevy runtime, the window and the maze game plugins.
//!
//! The window is sized from `LayoutConfig` (map plus HUD strip) and cannot be resized, so one world
//! unit is always one screen pixel. Everything else is delegated to `MazeGamePlugin` in `app.rs`.

mod app;
mod art;
mod camera;
mod collision;
mod config;
mod grid;
mod hud;
mod level;
mod movement;
mod player;
mod state;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod wasm;

use app::MazeGamePlugin;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::render::texture::ImagePlugin;
use bevy::window::{Window, WindowResolution};
use config::LayoutConfig;

fn main() {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    wasm::set_panic_hook();

    let layout = LayoutConfig::default();
    let window_size = layout.window_size();

    let primary_window = Window {
        title: "Maze Levels".to_string(),
        resolution: WindowResolution::new(window_size.x, window_size.y),
        resizable: false,
        canvas: cfg!(all(target_arch = "wasm32", feature = "web"))
            .then(|| "#bevy-canvas".to_owned()),
        ..default()
    };

    // Nearest-neighbour sampling keeps the 64px tiles crisp.
    let default_plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(primary_window),
            ..default()
        })
        .set(ImagePlugin::default_nearest())
        .set(AssetPlugin {
            file_path: "assets".to_owned(),
            ..default()
        });

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.39, 0.58, 0.93)))
        .insert_resource(layout)
        .add_plugins(default_plugins)
        .add_plugins(MazeGamePlugin)
        .run();
}

//! High-level plugin composition.
//!
//! `MazeGamePlugin` glues together the domain plugins (art, camera, levels, player, movement, HUD)
//! and fixes the order of one gameplay step. Gameplay runs in `FixedUpdate` at a steady rate so a
//! player speed of 5 means five pixels per step regardless of the display's refresh rate.

use bevy::prelude::*;

use crate::art::ArtPlugin;
use crate::camera::CameraPlugin;
use crate::config::LayoutConfig;
use crate::hud::HudPlugin;
use crate::level::LevelPlugin;
use crate::movement::MovementPlugin;
use crate::player::PlayerPlugin;
use crate::state::{GameSet, SessionStats};

const STEPS_PER_SECOND: f64 = 60.0;

/// Bundles every gameplay plugin into a single unit that can be added to the Bevy `App`.
pub struct MazeGamePlugin;

impl Plugin for MazeGamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LayoutConfig>() // Kept if `main` already inserted one.
            .init_resource::<SessionStats>()
            .insert_resource(Time::<Fixed>::from_hz(STEPS_PER_SECOND))
            .add_plugins((
                ArtPlugin,      // Texture handles + missing-art fallback.
                CameraPlugin,   // Fixed camera over map and HUD.
                LevelPlugin,    // Level state machine, walls, background.
                PlayerPlugin,   // Player entity and sprite sync.
                MovementPlugin, // Input + movement/collision.
                HudPlugin,      // Score/health/lives/level text.
            ))
            // Level → Input → Status → Movement → Objects, once per fixed step. Rendering reads the
            // results afterward in `Update`/`PostUpdate`.
            .configure_sets(
                FixedUpdate,
                (
                    GameSet::Level,
                    GameSet::Input,
                    GameSet::Status,
                    GameSet::Movement,
                    GameSet::Objects,
                )
                    .chain(),
            );
    }
}

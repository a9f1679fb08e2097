//! Level layouts and the level manager.
//!
//! Each level is an authored grid of cell codes. The manager is a two-state machine: while a level
//! is `Uninitialized` it builds the map and wall registry once, moves the player to the start cell
//! and becomes `Built`. It stays there until an `AdvanceLevel` event bumps the level number.
//! Wall sprites are derived from the registry and respawned whenever it is replaced.

use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;

use crate::art::MazeArt;
use crate::camera::screen_to_world;
use crate::collision::WallSet;
use crate::config::LayoutConfig;
use crate::grid::{CellCode, GridMap, LayoutError};
use crate::player::{Player, PlayerBody};
use crate::state::{GameSet, SessionStats};

const BACKGROUND_Z: f32 = 0.0;
const WALL_Z: f32 = 1.0;

/// Registers the level state machine, the advance hotkey and the map sprites.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelManager>()
            .init_resource::<WallSet>()
            .init_resource::<ActiveMap>()
            .add_event::<AdvanceLevel>()
            .add_systems(Startup, spawn_background)
            .add_systems(
                FixedUpdate,
                (advance_level, manage_level).chain().in_set(GameSet::Level),
            )
            .add_systems(
                Update,
                (
                    request_next_level,
                    refresh_wall_sprites.run_if(resource_changed::<WallSet>),
                ),
            );
    }
}

const LEVEL_ONE: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 0, 0, 0, 0, 2, 0, 1],
    &[1, 0, 1, 1, 0, 1, 1, 0, 1],
    &[1, 2, 1, 1, 0, 1, 1, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 0],
    &[1, 0, 1, 1, 0, 1, 1, 0, 1],
    &[1, 0, 1, 1, 0, 1, 1, 0, 1],
    &[1, 0, 0, 0, 2, 0, 0, 0, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const LEVEL_TWO: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 2, 0, 0, 0, 0, 0, 1],
    &[1, 0, 1, 1, 0, 1, 1, 0, 1],
    &[1, 0, 1, 1, 0, 1, 1, 0, 1],
    &[1, 0, 0, 0, 0, 0, 0, 0, 1],
    &[1, 0, 1, 1, 0, 1, 1, 0, 1],
    &[1, 0, 1, 1, 0, 1, 1, 0, 1],
    &[1, 2, 0, 0, 0, 0, 0, 2, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Authored layout for `level`, if there is one.
pub fn level_layout(level: u32) -> Option<&'static [&'static [u8]]> {
    match level {
        1 => Some(LEVEL_ONE),
        2 => Some(LEVEL_TWO),
        _ => None,
    }
}

/// Builds the map for `level` and appends its walls to `walls`.
///
/// Unsupported levels are a no-op and return `Ok(None)` with `walls` untouched. Existing walls are
/// never removed, so building into the same registry twice accumulates walls; callers wanting a
/// clean level pass a fresh registry.
pub fn build_level(
    level: u32,
    config: &LayoutConfig,
    walls: &mut WallSet,
) -> Result<Option<GridMap>, LayoutError> {
    let Some(layout) = level_layout(level) else {
        return Ok(None);
    };

    let map = GridMap::from_rows(config, layout)?;
    walls.extend_from_grid(&map, config);
    Ok(Some(map))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelPhase {
    #[default]
    Uninitialized,
    Built {
        level: u32,
    },
}

#[derive(Resource, Debug, Default)]
pub struct LevelManager {
    pub phase: LevelPhase,
}

/// Map of the level currently in play.
#[derive(Resource, Debug, Default, Deref)]
pub struct ActiveMap(pub Option<GridMap>);

/// Moves the session on to the next level number. Ignored on the last authored level, so the HUD
/// never shows a level that has no map.
#[derive(Event, Debug, Clone, Copy)]
pub struct AdvanceLevel;

#[derive(Component)]
pub struct WallSprite;

fn request_next_level(keyboard: Res<ButtonInput<KeyCode>>, mut advance: EventWriter<AdvanceLevel>) {
    if keyboard.just_pressed(KeyCode::KeyN) {
        advance.send(AdvanceLevel);
    }
}

fn advance_level(
    mut events: EventReader<AdvanceLevel>,
    mut stats: ResMut<SessionStats>,
    mut manager: ResMut<LevelManager>,
) {
    for _ in events.read() {
        let next = stats.level.saturating_add(1);
        if level_layout(next).is_none() {
            debug!("Level {} has no layout; staying on level {}.", next, stats.level);
            continue;
        }

        stats.level = next;
        manager.phase = LevelPhase::Uninitialized;
    }
}

/// Builds the current level once. The wall registry and map are replaced wholesale; unsupported
/// level numbers leave everything as it was.
fn manage_level(
    mut manager: ResMut<LevelManager>,
    stats: Res<SessionStats>,
    config: Res<LayoutConfig>,
    mut walls: ResMut<WallSet>,
    mut active_map: ResMut<ActiveMap>,
    mut players: Query<&mut PlayerBody, With<Player>>,
    mut exit: EventWriter<AppExit>,
) {
    if manager.phase != LevelPhase::Uninitialized {
        return;
    }

    let mut fresh = WallSet::default();
    let map = match build_level(stats.level, &config, &mut fresh) {
        Ok(Some(map)) => map,
        Ok(None) => return,
        Err(err) => {
            error!("Level {} layout is malformed: {}", stats.level, err);
            exit.send(AppExit::error());
            return;
        }
    };

    info!(
        "Built level {} with {} walls and {} item markers.",
        stats.level,
        fresh.len(),
        map.count(CellCode::Item)
    );

    if fresh.is_empty() {
        warn!("Level {} has no walls; nothing keeps the player on the map.", stats.level);
    }

    *walls = fresh;
    active_map.0 = Some(map);

    if let Ok(mut body) = players.get_single_mut() {
        body.speed = config.player_speed;
        body.position = config.player_start();
    }

    manager.phase = LevelPhase::Built { level: stats.level };
}

fn spawn_background(mut commands: Commands, config: Res<LayoutConfig>, art: Res<MazeArt>) {
    for row in 0..config.rows {
        for column in 0..config.columns {
            let position = config.cell_position(column, row);
            commands.spawn((
                Name::new(format!("Floor ({column}, {row})")),
                SpriteBundle {
                    texture: art.background_tile.texture.clone(),
                    sprite: Sprite {
                        color: art.background_tile.color(),
                        custom_size: Some(config.cell_size),
                        ..default()
                    },
                    transform: Transform::from_translation(screen_to_world(
                        position,
                        config.cell_size,
                        BACKGROUND_Z,
                    )),
                    ..default()
                },
            ));
        }
    }

    let info_area_size = Vec2::new(config.map_size().x, config.hud_height);
    commands.spawn((
        Name::new("InfoArea"),
        SpriteBundle {
            texture: art.background_info_area.texture.clone(),
            sprite: Sprite {
                color: art.background_info_area.color(),
                custom_size: Some(info_area_size),
                ..default()
            },
            transform: Transform::from_translation(screen_to_world(
                config.hud_origin(),
                info_area_size,
                BACKGROUND_Z,
            )),
            ..default()
        },
    ));
}

fn refresh_wall_sprites(
    mut commands: Commands,
    walls: Res<WallSet>,
    art: Res<MazeArt>,
    existing: Query<Entity, With<WallSprite>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    for wall in walls.iter() {
        commands.spawn((
            WallSprite,
            SpriteBundle {
                texture: art.wall.texture.clone(),
                sprite: Sprite {
                    color: art.wall.color(),
                    custom_size: Some(wall.size),
                    ..default()
                },
                transform: Transform::from_translation(screen_to_world(
                    wall.position,
                    wall.size,
                    WALL_Z,
                )),
                ..default()
            },
        ));
    }
}

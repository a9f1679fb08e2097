//! Player entity. `PlayerBody` holds the pure geometry the collision engine works on; the sprite
//! attached to the same entity only mirrors it during the rendering pass.

use bevy::math::Rect;
use bevy::prelude::*;
use bevy::transform::TransformSystem;
use serde::{Deserialize, Serialize};

use crate::art::MazeArt;
use crate::camera::screen_to_world;
use crate::config::LayoutConfig;

const PLAYER_Z: f32 = 2.0;

/// Spawns the player and keeps its sprite in step with its body.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player)
            .add_systems(
                PostUpdate,
                sync_player_sprite.before(TransformSystem::TransformPropagate),
            );
    }
}

/// Marker used by queries that need the player entity.
#[derive(Component)]
pub struct Player;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

/// Position (top-left, screen space), size, facing and per-step speed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub position: Vec2,
    pub size: Vec2,
    pub direction: Direction,
    pub speed: Vec2,
}

impl PlayerBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            direction: Direction::default(),
            speed: Vec2::ZERO,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }

    /// One step of displacement in the facing direction.
    pub fn step(&self) -> Vec2 {
        match self.direction {
            Direction::Right => Vec2::new(self.speed.x, 0.0),
            Direction::Left => Vec2::new(-self.speed.x, 0.0),
            Direction::Up => Vec2::new(0.0, -self.speed.y),
            Direction::Down => Vec2::new(0.0, self.speed.y),
        }
    }
}

fn spawn_player(mut commands: Commands, config: Res<LayoutConfig>, art: Res<MazeArt>) {
    let body = PlayerBody::new(config.player_start(), config.player_size);

    commands.spawn((
        Name::new("Player"),
        Player,
        body,
        SpriteBundle {
            texture: art.player.texture.clone(),
            sprite: Sprite {
                color: art.player.color(),
                custom_size: Some(body.size),
                ..default()
            },
            transform: Transform::from_translation(screen_to_world(
                body.position,
                body.size,
                PLAYER_Z,
            )),
            ..default()
        },
    ));
}

fn sync_player_sprite(
    mut query: Query<(&PlayerBody, &mut Transform, &mut Sprite), (With<Player>, Changed<PlayerBody>)>,
) {
    for (body, mut transform, mut sprite) in &mut query {
        transform.translation = screen_to_world(body.position, body.size, PLAYER_Z);
        sprite.flip_x = body.direction == Direction::Left;
    }
}

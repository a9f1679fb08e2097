//! Fixed camera. Gameplay works in screen space (top-left origin, y grows downward, one unit per
//! pixel); the camera is parked so that this space lines up with the window and the helpers below
//! convert screen rectangles into Bevy world translations.

use bevy::prelude::*;

use crate::config::LayoutConfig;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Centres the camera on the window so world `(x, -y)` is screen pixel `(x, y)`.
fn setup_camera(mut commands: Commands, config: Res<LayoutConfig>) {
    let mut camera = Camera2dBundle::default();
    let center = camera_center(&config);
    camera.transform.translation.x = center.x;
    camera.transform.translation.y = center.y;

    commands.spawn((Name::new("MainCamera"), camera, MainCamera));
}

pub fn camera_center(config: &LayoutConfig) -> Vec2 {
    let window = config.window_size();
    Vec2::new(window.x * 0.5, -window.y * 0.5)
}

/// World translation of the centre of a screen-space rectangle.
pub fn screen_to_world(top_left: Vec2, size: Vec2, z: f32) -> Vec3 {
    Vec3::new(top_left.x + size.x * 0.5, -(top_left.y + size.y * 0.5), z)
}

/// World translation of a screen-space point.
pub fn screen_point_to_world(point: Vec2, z: f32) -> Vec3 {
    Vec3::new(point.x, -point.y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_centre_maps_below_origin() {
        let translation = screen_to_world(Vec2::new(64.0, 64.0), Vec2::splat(64.0), 1.0);
        assert_eq!(translation, Vec3::new(96.0, -96.0, 1.0));
    }

    #[test]
    fn camera_covers_map_and_hud() {
        let center = camera_center(&LayoutConfig::default());
        assert_eq!(center, Vec2::new(288.0, -384.0));
    }
}

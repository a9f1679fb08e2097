//! Static layout configuration. Cell size, map dimensions, HUD height and the player's starting
//! parameters live in a single immutable resource that the builders receive explicitly, so no
//! gameplay code reaches for process-wide constants.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// How the collision engine picks the final position when a move hits more than one wall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampPolicy {
    /// Clamp against every intersecting wall in registry order; the last one wins.
    #[default]
    LastIntersecting,
    /// Collect every intersecting wall and clamp to the edge needing the smallest correction.
    Nearest,
}

/// Layout and tuning values shared by the level builder, the player and the renderer. Cloning is
/// cheap because every field is a plain value.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub cell_size: Vec2,
    pub rows: usize,
    pub columns: usize,
    pub hud_height: f32,
    pub player_size: Vec2,
    /// Starting cell as (column, row).
    pub player_start_cell: UVec2,
    pub player_speed: Vec2,
    pub clamp_policy: ClampPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: Vec2::new(64.0, 64.0),
            rows: 9,
            columns: 9,
            hud_height: 192.0,
            player_size: Vec2::new(64.0, 64.0),
            player_start_cell: UVec2::new(1, 1),
            player_speed: Vec2::new(5.0, 5.0),
            clamp_policy: ClampPolicy::LastIntersecting,
        }
    }
}

impl LayoutConfig {
    /// Pixel size of the playfield (the map only, without the HUD strip).
    pub fn map_size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.cell_size.x,
            self.rows as f32 * self.cell_size.y,
        )
    }

    /// Window dimensions: the map plus the HUD strip underneath it.
    pub fn window_size(&self) -> Vec2 {
        self.map_size() + Vec2::new(0.0, self.hud_height)
    }

    /// Top-left corner of the HUD info area in screen space.
    pub fn hud_origin(&self) -> Vec2 {
        Vec2::new(0.0, self.map_size().y)
    }

    /// Top-left screen position of a cell.
    pub fn cell_position(&self, column: usize, row: usize) -> Vec2 {
        Vec2::new(
            column as f32 * self.cell_size.x,
            row as f32 * self.cell_size.y,
        )
    }

    pub fn player_start(&self) -> Vec2 {
        self.cell_position(
            self.player_start_cell.x as usize,
            self.player_start_cell.y as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_includes_hud_strip() {
        let config = LayoutConfig::default();
        assert_eq!(config.window_size(), Vec2::new(576.0, 768.0));
        assert_eq!(config.hud_origin(), Vec2::new(0.0, 576.0));
    }

    #[test]
    fn player_starts_one_cell_in() {
        let config = LayoutConfig::default();
        assert_eq!(config.player_start(), Vec2::new(64.0, 64.0));
    }
}

//! Wall geometry. Walls are plain axis-aligned rectangles in screen space (top-left origin, y grows
//! downward); the sprites that draw them are owned separately by the level module.

use bevy::math::Rect;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::grid::{CellCode, GridMap};

/// A single solid cell. `position` is the top-left corner in screen space and `size` is normally the
/// layout's cell size, so neighbouring walls share edges without overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub position: Vec2,
    pub size: Vec2,
}

impl Wall {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Screen-space rectangle covered by the wall, suitable for [`intersects`].
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }
}

/// Every wall of the active level, in row-major build order. Iteration order matters to the
/// `LastIntersecting` clamp policy.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct WallSet {
    walls: Vec<Wall>,
}

impl WallSet {
    /// Fresh registry holding exactly the walls of `map`.
    pub fn from_grid(map: &GridMap, config: &LayoutConfig) -> Self {
        let mut set = Self::default();
        set.extend_from_grid(map, config);
        set
    }

    /// Appends one wall per wall-coded cell. Existing walls are kept.
    pub fn extend_from_grid(&mut self, map: &GridMap, config: &LayoutConfig) {
        let walls = map
            .iter()
            .filter(|(_, _, code)| *code == CellCode::Wall)
            .map(|(column, row, _)| Wall::new(config.cell_position(column, row), config.cell_size));
        self.walls.extend(walls);
    }

    /// Walls in the order they were added.
    pub fn iter(&self) -> std::slice::Iter<'_, Wall> {
        self.walls.iter()
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

impl FromIterator<Wall> for WallSet {
    fn from_iter<I: IntoIterator<Item = Wall>>(iter: I) -> Self {
        Self {
            walls: iter.into_iter().collect(),
        }
    }
}

/// Strict overlap test: rectangles that only share an edge do not intersect.
///
/// The player is routinely flush against a wall after a clamp, so counting shared edges as overlap
/// would make every later step collide again. Both rectangles must be in the same coordinate space;
/// the y direction does not matter as long as `min` holds the smaller coordinates.
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

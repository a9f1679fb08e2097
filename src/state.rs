//! Session-wide state: the per-step system ordering and the counters shown on the HUD.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Stages of one gameplay step, chained in this order inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Level transitions and one-shot level builds.
    Level,
    /// Keyboard state resolved into the step's action.
    Input,
    /// Status bookkeeping. Nothing is scheduled here yet.
    Status,
    /// Movement and wall collision.
    Movement,
    /// Interactions between the player and map objects. Nothing is scheduled here yet.
    Objects,
}

/// Counters displayed on the HUD. Only `level` changes during play, through `AdvanceLevel`;
/// health, lives and score are never modified by any rule.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub level: u32,
    pub health: u32,
    pub lives: u32,
    pub score: u32,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            level: 1,
            health: 100,
            lives: 5,
            score: 0,
        }
    }
}

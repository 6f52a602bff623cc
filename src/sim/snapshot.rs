//! Read-only view of the simulation for rendering

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Position of one live entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    /// Bottom-left corner, y up
    pub pos: Vec2,
}

/// Owned copy of the state a frame needs. Nothing in here aliases the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Seed of the run, so a replay can be reproduced
    pub seed: u64,
    pub player_x: f32,
    pub projectiles: Vec<EntityView>,
    pub blocks: Vec<EntityView>,
    pub score: u64,
    pub phase: GamePhase,
    pub tick: u64,
}

impl Snapshot {
    pub fn show_tilt_hint(&self) -> bool {
        self.phase == GamePhase::NotStarted
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

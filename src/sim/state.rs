//! Game state and core simulation types
//!
//! `GameState` is the single owner of every live entity. Presentation code
//! never touches it directly; it reads a [`Snapshot`] instead.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::snapshot::{EntityView, Snapshot};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh game, nothing fired or spawned yet ("tilt to move" hint shown)
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// A block reached the player; only restart is accepted
    GameOver,
}

/// The player's avatar. Only `x` ever changes; the vertical position and size
/// come from [`Tuning`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
}

/// A projectile travelling upward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Bottom-left corner
    pub pos: Vec2,
}

impl Projectile {
    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.pos, tuning.projectile_size())
    }
}

/// A block falling toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Bottom-left corner
    pub pos: Vec2,
}

impl Block {
    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.pos, tuning.block_size())
    }
}

/// Notable things that happened since the last drain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: u32 },
    BlockSpawned { id: u32 },
    BlockDestroyed {
        block_id: u32,
        projectile_id: u32,
        score: u64,
    },
    GameOver { score: u64 },
    Restarted,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Blocks destroyed this run
    pub score: u64,
    /// Simulation ticks since construction
    pub time_ticks: u64,
    pub player: Player,
    /// Live projectiles, in creation order
    pub projectiles: Vec<Projectile>,
    /// Live blocks, in creation order
    pub blocks: Vec<Block>,
    events: Vec<GameEvent>,
    /// Next entity ID (shared by projectiles and blocks, never reused)
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed. Out-of-range tuning
    /// values are repaired first.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let player = Player {
            x: tuning.player_start_x(),
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::NotStarted,
            score: 0,
            time_ticks: 0,
            player,
            projectiles: Vec::new(),
            blocks: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Apply a raw tilt reading to the player position.
    ///
    /// The signal is scaled by the tilt sensitivity and subtracted from the
    /// current x, then clamped to the screen. Non-finite readings are ignored.
    pub fn set_horizontal_input(&mut self, signal: f32) {
        if !signal.is_finite() {
            log::trace!("Ignoring non-finite tilt signal {}", signal);
            return;
        }
        let target = self.player.x - signal * self.tuning.tilt_sensitivity;
        // A finite signal times a large sensitivity can still overflow to ±inf,
        // which clamp handles; NaN cannot occur here.
        self.player.x = target.clamp(0.0, self.tuning.player_max_x());
    }

    /// Fire a projectile from the player's center.
    ///
    /// Returns the new projectile's ID, or `None` after game over.
    pub fn fire(&mut self) -> Option<u32> {
        if self.phase == GamePhase::GameOver {
            return None;
        }
        if self.phase == GamePhase::NotStarted {
            log::info!("Game started (fire)");
            self.phase = GamePhase::Playing;
        }

        let id = self.next_entity_id();
        let x = self.player.x + (self.tuning.player_width - self.tuning.projectile_width) / 2.0;
        let y = self.tuning.projectile_spawn_y();
        self.projectiles.push(Projectile {
            id,
            pos: Vec2::new(x, y),
        });
        self.push_event(GameEvent::ProjectileFired { id });
        Some(id)
    }

    /// Spawn a block at the top of the screen at the given x (clamped on-screen).
    ///
    /// Does not touch the phase; the spawn timer in `tick` does that.
    pub fn spawn_block_at(&mut self, x: f32) -> u32 {
        let max_x = (self.tuning.screen_width - self.tuning.block_width).max(0.0);
        let x = if x.is_finite() { x.clamp(0.0, max_x) } else { 0.0 };
        let id = self.next_entity_id();
        self.blocks.push(Block {
            id,
            pos: Vec2::new(x, self.tuning.screen_height),
        });
        self.push_event(GameEvent::BlockSpawned { id });
        log::debug!("Block {} spawned at x={:.1}", id, x);
        id
    }

    /// Reset to a fresh, not-yet-started game. Safe to call in any phase.
    pub fn restart(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.projectiles.clear();
        self.blocks.clear();
        self.player.x = self.tuning.player_start_x();
        self.events.clear();
        self.push_event(GameEvent::Restarted);
        log::info!("Game restarted");
    }

    /// Immutable copy of everything the presentation layer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            player_x: self.player.x,
            projectiles: self
                .projectiles
                .iter()
                .map(|p| EntityView { id: p.id, pos: p.pos })
                .collect(),
            blocks: self
                .blocks
                .iter()
                .map(|b| EntityView { id: b.id, pos: b.pos })
                .collect(),
            score: self.score,
            phase: self.phase,
            tick: self.time_ticks,
        }
    }

    /// Take all events recorded since the previous call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(42, Tuning::default())
    }

    #[test]
    fn test_new_state_centered_and_idle() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.player.x, 170.0);
        assert!(state.projectiles.is_empty());
        assert!(state.blocks.is_empty());
    }

    #[test]
    fn test_tilt_moves_opposite_to_signal() {
        let mut state = new_state();
        state.set_horizontal_input(0.5);
        assert_eq!(state.player.x, 170.0 - 35.0);
        state.set_horizontal_input(-1.0);
        assert_eq!(state.player.x, 170.0 - 35.0 + 70.0);
    }

    #[test]
    fn test_tilt_clamps_to_screen() {
        let mut state = new_state();
        state.set_horizontal_input(1000.0);
        assert_eq!(state.player.x, 0.0);
        state.set_horizontal_input(-1000.0);
        assert_eq!(state.player.x, 340.0);
        state.set_horizontal_input(f32::MAX);
        assert_eq!(state.player.x, 0.0);
    }

    #[test]
    fn test_non_finite_tilt_ignored() {
        let mut state = new_state();
        state.set_horizontal_input(f32::NAN);
        state.set_horizontal_input(f32::INFINITY);
        state.set_horizontal_input(f32::NEG_INFINITY);
        assert_eq!(state.player.x, 170.0);
    }

    #[test]
    fn test_fire_starts_game_and_centers_projectile() {
        let mut state = new_state();
        let id = state.fire().expect("fire should spawn");
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.projectiles.len(), 1);
        let p = state.projectiles[0];
        assert_eq!(p.id, id);
        // Center of the projectile lines up with the center of the player
        assert_eq!(p.pos.x + 5.0, 195.0);
        assert_eq!(p.pos.y, 50.0);
    }

    #[test]
    fn test_fire_ignored_after_game_over() {
        let mut state = new_state();
        state.phase = GamePhase::GameOver;
        assert_eq!(state.fire(), None);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_ids_unique_across_kinds() {
        let mut state = new_state();
        let a = state.fire().unwrap();
        let b = state.spawn_block_at(10.0);
        let c = state.fire().unwrap();
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn test_spawn_block_clamped() {
        let mut state = new_state();
        state.spawn_block_at(10_000.0);
        state.spawn_block_at(f32::NAN);
        assert_eq!(state.blocks[0].pos, Vec2::new(350.0, 800.0));
        assert_eq!(state.blocks[1].pos.x, 0.0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = new_state();
        state.fire();
        state.spawn_block_at(100.0);
        state.set_horizontal_input(1.0);
        state.score = 7;
        state.phase = GamePhase::GameOver;

        state.restart();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.blocks.is_empty());
        assert_eq!(state.player.x, 170.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_restart_idempotent() {
        let mut once = new_state();
        once.fire();
        once.restart();
        let mut twice = once.clone();
        twice.restart();
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn test_new_repairs_tuning() {
        let tuning = Tuning {
            block_step: -5.0,
            projectile_step: 0.0,
            ..Default::default()
        };
        let state = GameState::new(1, tuning);
        assert_eq!(state.tuning.block_step, 5.0);
        assert_eq!(state.tuning.projectile_step, 15.0);
    }

    #[test]
    fn test_snapshot_carries_seed() {
        let state = GameState::new(1234, Tuning::default());
        assert_eq!(state.snapshot().seed, 1234);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = new_state();
        let id = state.fire().unwrap();
        assert_eq!(state.drain_events(), vec![GameEvent::ProjectileFired { id }]);
        assert!(state.drain_events().is_empty());
    }
}

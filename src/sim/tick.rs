//! Fixed timestep simulation tick
//!
//! Each timer that comes due sets one flag in [`TickInput`]; the tick applies
//! them in a fixed order so coincident timers resolve the same way every run.

use rand::Rng;

use super::collision::pair_hits;
use super::state::{GameEvent, GamePhase, GameState};

/// Which periodic actions are due this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move every projectile up one step
    pub advance_projectiles: bool,
    /// Move every block down one step
    pub advance_blocks: bool,
    /// Spawn a new block at the top of the screen
    pub spawn_due: bool,
}

impl TickInput {
    /// Both motion timers due, optionally with a spawn
    pub fn motion(spawn_due: bool) -> Self {
        Self {
            advance_projectiles: true,
            advance_blocks: true,
            spawn_due,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.advance_projectiles && !self.advance_blocks && !self.spawn_due
    }
}

/// Advance the game state by one step.
///
/// Order: projectiles move, spawn, blocks move, collisions, game-over check.
/// Does nothing once the game is over.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    if input.advance_projectiles {
        advance_projectiles(state);
    }

    if input.spawn_due {
        spawn_block(state);
        if state.phase == GamePhase::NotStarted {
            log::info!("Game started (first block)");
        }
        state.phase = GamePhase::Playing;
    }

    if input.advance_blocks {
        advance_blocks(state);
    }

    resolve_collisions(state);

    check_game_over(state);
}

fn advance_projectiles(state: &mut GameState) {
    let step = state.tuning.projectile_step;
    let exit_y = state.tuning.projectile_exit_y();
    for projectile in &mut state.projectiles {
        projectile.pos.y += step;
    }
    state.projectiles.retain(|p| p.pos.y < exit_y);
}

fn advance_blocks(state: &mut GameState) {
    let step = state.tuning.block_step;
    let exit_y = state.tuning.block_exit_y();
    for block in &mut state.blocks {
        block.pos.y -= step;
    }
    state.blocks.retain(|b| b.pos.y > exit_y);
}

/// Spawn a block at a uniformly random x across the screen
pub fn spawn_block(state: &mut GameState) -> u32 {
    let max_x = state.tuning.screen_width - state.tuning.block_width;
    let x = if max_x > 0.0 {
        state.rng().random_range(0.0..max_x)
    } else {
        0.0
    };
    state.spawn_block_at(x)
}

/// Remove every paired block/projectile and score one point per pair
fn resolve_collisions(state: &mut GameState) {
    let hits = pair_hits(&state.blocks, &state.projectiles, &state.tuning);
    if hits.is_empty() {
        return;
    }

    state
        .blocks
        .retain(|b| !hits.iter().any(|h| h.block_id == b.id));
    state
        .projectiles
        .retain(|p| !hits.iter().any(|h| h.projectile_id == p.id));

    for hit in hits {
        state.score += 1;
        log::debug!(
            "Block {} destroyed by projectile {} (score {})",
            hit.block_id,
            hit.projectile_id,
            state.score
        );
        let score = state.score;
        state.push_event(GameEvent::BlockDestroyed {
            block_id: hit.block_id,
            projectile_id: hit.projectile_id,
            score,
        });
    }
}

fn check_game_over(state: &mut GameState) {
    let threshold = state.tuning.game_over_y();
    if state.blocks.iter().any(|b| b.pos.y <= threshold) {
        state.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", state.score);
        let score = state.score;
        state.push_event(GameEvent::GameOver { score });
    }
}

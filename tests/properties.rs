//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;

use tilt_shooter::Tuning;
use tilt_shooter::sim::{GamePhase, GameState, TickInput, tick};

fn new_state(seed: u64) -> GameState {
    GameState::new(seed, Tuning::default())
}

#[derive(Debug, Clone)]
enum Action {
    Tilt(f32),
    Fire,
    Tick { spawn: bool },
    Restart,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        prop::num::f32::ANY.prop_map(Action::Tilt),
        Just(Action::Fire),
        any::<bool>().prop_map(|spawn| Action::Tick { spawn }),
        Just(Action::Restart),
    ]
}

fn apply(state: &mut GameState, action: &Action) {
    match action {
        Action::Tilt(signal) => state.set_horizontal_input(*signal),
        Action::Fire => {
            state.fire();
        }
        Action::Tick { spawn } => tick(state, &TickInput::motion(*spawn)),
        Action::Restart => state.restart(),
    }
}

proptest! {
    #[test]
    fn player_stays_on_screen(signals in prop::collection::vec(prop::num::f32::ANY, 1..64)) {
        let mut state = new_state(1);
        let max_x = state.tuning.screen_width - state.tuning.player_width;
        for signal in signals {
            state.set_horizontal_input(signal);
            prop_assert!(state.player.x >= 0.0 && state.player.x <= max_x);
        }
    }

    #[test]
    fn n_fires_make_n_projectiles(n in 0usize..64) {
        let mut state = new_state(2);
        for _ in 0..n {
            prop_assert!(state.fire().is_some());
        }
        prop_assert_eq!(state.projectiles.len(), n);
        let mut ids: Vec<u32> = state.projectiles.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), n);
    }

    #[test]
    fn score_counts_one_to_one_pairs(
        blocks in prop::collection::vec((0.0f32..350.0, 100.0f32..400.0), 0..8),
        projectiles in prop::collection::vec((0.0f32..380.0, 100.0f32..400.0), 0..8),
    ) {
        let mut state = new_state(3);
        for (x, y) in &blocks {
            state.spawn_block_at(*x);
            if let Some(block) = state.blocks.last_mut() {
                block.pos.y = *y;
            }
        }
        for (x, y) in &projectiles {
            state.fire();
            if let Some(projectile) = state.projectiles.last_mut() {
                projectile.pos = Vec2::new(*x, *y);
            }
        }

        tick(&mut state, &TickInput::default());

        let score = state.score as usize;
        prop_assert_eq!(blocks.len() - state.blocks.len(), score);
        prop_assert_eq!(projectiles.len() - state.projectiles.len(), score);
        prop_assert!(score <= blocks.len().min(projectiles.len()));
    }

    #[test]
    fn invariants_hold_under_random_play(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 0..200),
    ) {
        let mut state = new_state(seed);
        let max_x = state.tuning.screen_width - state.tuning.player_width;
        let mut last_score = 0;

        for action in &actions {
            let was_over = state.phase == GamePhase::GameOver;
            let before = state.snapshot();
            apply(&mut state, action);

            prop_assert!(state.player.x >= 0.0 && state.player.x <= max_x);

            if matches!(action, Action::Restart) {
                prop_assert_eq!(state.score, 0);
            } else {
                prop_assert!(state.score >= last_score);
            }
            last_score = state.score;

            // Game over is sticky and freezes entities until restart
            if was_over && !matches!(action, Action::Restart) {
                let after = state.snapshot();
                prop_assert_eq!(after.phase, GamePhase::GameOver);
                prop_assert_eq!(&after.blocks, &before.blocks);
                prop_assert_eq!(&after.projectiles, &before.projectiles);
            }

            let mut ids: Vec<u32> = state
                .projectiles
                .iter()
                .map(|p| p.id)
                .chain(state.blocks.iter().map(|b| b.id))
                .collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }
    }

    #[test]
    fn restart_is_idempotent(actions in prop::collection::vec(action(), 0..100)) {
        let mut state = new_state(9);
        for action in &actions {
            apply(&mut state, action);
        }
        state.restart();
        let once = state.snapshot();
        state.restart();
        prop_assert_eq!(state.snapshot(), once);
    }
}

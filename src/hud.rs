//! HUD text model
//!
//! Score line, start hint and game-over overlay, derived from a [`Snapshot`]
//! so every platform shows the same thing.

use crate::sim::Snapshot;

pub const TILT_HINT: &str = "Tilt your phone to move";
pub const GAME_OVER_TITLE: &str = "GAME OVER";
pub const RESTART_LABEL: &str = "Restart";

/// Game-over overlay contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverOverlay {
    pub title: &'static str,
    pub final_score: String,
    pub restart_label: &'static str,
}

/// Text elements of the HUD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudModel {
    pub score: String,
    /// Shown only before the first shot or spawn
    pub hint: Option<&'static str>,
    /// Shown only after game over
    pub game_over: Option<GameOverOverlay>,
}

impl HudModel {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let game_over = snapshot.is_game_over().then(|| GameOverOverlay {
            title: GAME_OVER_TITLE,
            final_score: format!("Your Score: {}", snapshot.score),
            restart_label: RESTART_LABEL,
        });
        Self {
            score: format!("Score: {}", snapshot.score),
            hint: snapshot.show_tilt_hint().then_some(TILT_HINT),
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, GameState, TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_hint_only_before_start() {
        let mut state = GameState::new(1, Tuning::default());
        let hud = HudModel::from_snapshot(&state.snapshot());
        assert_eq!(hud.hint, Some(TILT_HINT));
        assert_eq!(hud.score, "Score: 0");
        assert!(hud.game_over.is_none());

        state.fire();
        let hud = HudModel::from_snapshot(&state.snapshot());
        assert_eq!(hud.hint, None);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = GameState::new(1, Tuning::default());
        state.score = 12;
        state.spawn_block_at(0.0);
        state.blocks[0].pos.y = 60.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let hud = HudModel::from_snapshot(&state.snapshot());
        let overlay = hud.game_over.expect("overlay shown");
        assert_eq!(overlay.title, "GAME OVER");
        assert_eq!(overlay.final_score, "Your Score: 12");
        assert_eq!(overlay.restart_label, "Restart");
        assert_eq!(hud.hint, None);
    }
}

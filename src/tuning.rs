//! Data-driven game balance
//!
//! Every dimension, speed and timer interval the simulation uses lives here so
//! it can be overridden from settings without touching gameplay code.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::consts::*;

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Fixed vertical position of the player's bottom edge
    pub player_y: f32,

    pub projectile_width: f32,
    pub projectile_height: f32,
    pub block_width: f32,
    pub block_height: f32,

    /// Upward distance per projectile advance
    pub projectile_step: f32,
    /// Downward distance per block advance
    pub block_step: f32,
    pub projectile_exit_margin: f32,
    pub block_exit_margin: f32,

    /// Tilt signal to pixels
    pub tilt_sensitivity: f32,

    pub tilt_sample_interval_ms: u64,
    pub projectile_interval_ms: u64,
    pub block_interval_ms: u64,
    pub spawn_interval_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_y: PLAYER_Y,
            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            projectile_step: PROJECTILE_STEP,
            block_step: BLOCK_STEP,
            projectile_exit_margin: PROJECTILE_EXIT_MARGIN,
            block_exit_margin: BLOCK_EXIT_MARGIN,
            tilt_sensitivity: TILT_SENSITIVITY,
            tilt_sample_interval_ms: TILT_SAMPLE_INTERVAL.as_millis() as u64,
            projectile_interval_ms: MOTION_INTERVAL.as_millis() as u64,
            block_interval_ms: MOTION_INTERVAL.as_millis() as u64,
            spawn_interval_ms: SPAWN_INTERVAL.as_millis() as u64,
        }
    }
}

impl Tuning {
    /// Tuning for a specific screen size, everything else at reference values
    pub fn for_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
        .validated()
    }

    /// Replace nonsensical values with defaults, field by field
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        fn fix_positive(name: &str, value: &mut f32, fallback: f32) {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Invalid tuning {}={}, using {}", name, value, fallback);
                *value = fallback;
            }
        }
        fn fix_non_negative(name: &str, value: &mut f32, fallback: f32) {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("Invalid tuning {}={}, using {}", name, value, fallback);
                *value = fallback;
            }
        }
        fn fix_interval(name: &str, value: &mut u64, fallback: u64) {
            if *value == 0 {
                log::warn!("Invalid tuning {}=0ms, using {}ms", name, fallback);
                *value = fallback;
            }
        }

        fix_positive("screen_width", &mut self.screen_width, defaults.screen_width);
        fix_positive("screen_height", &mut self.screen_height, defaults.screen_height);
        fix_positive("player_width", &mut self.player_width, defaults.player_width);
        fix_positive("player_height", &mut self.player_height, defaults.player_height);
        fix_non_negative("player_y", &mut self.player_y, defaults.player_y);
        fix_positive("projectile_width", &mut self.projectile_width, defaults.projectile_width);
        fix_positive("projectile_height", &mut self.projectile_height, defaults.projectile_height);
        fix_positive("block_width", &mut self.block_width, defaults.block_width);
        fix_positive("block_height", &mut self.block_height, defaults.block_height);
        fix_positive("projectile_step", &mut self.projectile_step, defaults.projectile_step);
        fix_positive("block_step", &mut self.block_step, defaults.block_step);
        fix_non_negative(
            "projectile_exit_margin",
            &mut self.projectile_exit_margin,
            defaults.projectile_exit_margin,
        );
        fix_non_negative(
            "block_exit_margin",
            &mut self.block_exit_margin,
            defaults.block_exit_margin,
        );
        if !self.tilt_sensitivity.is_finite() {
            log::warn!("Invalid tuning tilt_sensitivity, using default");
            self.tilt_sensitivity = defaults.tilt_sensitivity;
        }

        fix_interval(
            "tilt_sample_interval_ms",
            &mut self.tilt_sample_interval_ms,
            defaults.tilt_sample_interval_ms,
        );
        fix_interval(
            "projectile_interval_ms",
            &mut self.projectile_interval_ms,
            defaults.projectile_interval_ms,
        );
        fix_interval("block_interval_ms", &mut self.block_interval_ms, defaults.block_interval_ms);
        fix_interval("spawn_interval_ms", &mut self.spawn_interval_ms, defaults.spawn_interval_ms);

        // Entities must fit on screen horizontally
        let widest = self
            .player_width
            .max(self.block_width)
            .max(self.projectile_width);
        if widest > self.screen_width {
            log::warn!(
                "Screen width {} narrower than widest entity {}, widening",
                self.screen_width,
                widest
            );
            self.screen_width = widest;
        }

        self
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    pub fn projectile_size(&self) -> Vec2 {
        Vec2::new(self.projectile_width, self.projectile_height)
    }

    pub fn block_size(&self) -> Vec2 {
        Vec2::new(self.block_width, self.block_height)
    }

    /// Rightmost allowed player x
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        (self.screen_width - self.player_width).max(0.0)
    }

    /// Player x at rest (horizontally centered)
    #[inline]
    pub fn player_start_x(&self) -> f32 {
        self.player_max_x() / 2.0
    }

    /// Projectile y at spawn: top-aligned with the player box
    #[inline]
    pub fn projectile_spawn_y(&self) -> f32 {
        self.player_y + self.player_height - self.projectile_height
    }

    /// Projectiles at or above this y are gone
    #[inline]
    pub fn projectile_exit_y(&self) -> f32 {
        self.screen_height + self.projectile_exit_margin
    }

    /// Blocks at or below this y are gone
    #[inline]
    pub fn block_exit_y(&self) -> f32 {
        -self.block_exit_margin
    }

    /// A block at or below this y has reached the player's band
    #[inline]
    pub fn game_over_y(&self) -> f32 {
        self.player_y + self.player_height
    }

    pub fn tilt_sample_interval(&self) -> Duration {
        Duration::from_millis(self.tilt_sample_interval_ms)
    }

    pub fn projectile_interval(&self) -> Duration {
        Duration::from_millis(self.projectile_interval_ms)
    }

    pub fn block_interval(&self) -> Duration {
        Duration::from_millis(self.block_interval_ms)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_geometry() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_start_x(), 170.0);
        assert_eq!(tuning.projectile_spawn_y(), 50.0);
        assert_eq!(tuning.game_over_y(), 70.0);
        assert_eq!(tuning.projectile_exit_y(), 850.0);
        assert_eq!(tuning.block_exit_y(), -60.0);
    }

    #[test]
    fn test_validated_repairs_bad_values() {
        let tuning = Tuning {
            screen_width: f32::NAN,
            block_step: -3.0,
            spawn_interval_ms: 0,
            ..Default::default()
        }
        .validated();
        assert_eq!(tuning.screen_width, SCREEN_WIDTH);
        assert_eq!(tuning.block_step, BLOCK_STEP);
        assert_eq!(tuning.spawn_interval(), SPAWN_INTERVAL);
    }

    #[test]
    fn test_narrow_screen_widened_to_fit() {
        let tuning = Tuning::for_screen(30.0, 600.0);
        assert_eq!(tuning.screen_width, BLOCK_WIDTH.max(PLAYER_WIDTH));
        assert_eq!(tuning.player_max_x(), 0.0);
    }
}

//! Tilt Shooter - A falling-block arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `scheduler`: Cancellable fixed-interval tasks that drive the simulation
//! - `input`: Tilt input port
//! - `hud`: Presentation model built from simulation snapshots
//! - `renderer`: Screen-space shapes and the canvas painter
//! - `platform`: Browser bindings (sensor, tap, DOM HUD)
//! - `tuning`: Data-driven game balance

pub mod hud;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use scheduler::{Scheduler, TaskKind};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Reference logical screen size (a typical phone in portrait)
    pub const SCREEN_WIDTH: f32 = 390.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Distance from the bottom edge to the player's bottom edge
    pub const PLAYER_Y: f32 = 20.0;

    /// Projectile box
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;

    /// Falling block box
    pub const BLOCK_WIDTH: f32 = 40.0;
    pub const BLOCK_HEIGHT: f32 = 40.0;

    /// Pixels per projectile advance (upward)
    pub const PROJECTILE_STEP: f32 = 15.0;
    /// Pixels per block advance (downward)
    pub const BLOCK_STEP: f32 = 5.0;
    /// Projectiles survive until this far above the top edge
    pub const PROJECTILE_EXIT_MARGIN: f32 = 50.0;
    /// Blocks survive until this far below the bottom edge
    pub const BLOCK_EXIT_MARGIN: f32 = 60.0;

    /// Player displacement per unit of tilt signal
    pub const TILT_SENSITIVITY: f32 = 70.0;

    /// Reference timer intervals
    pub const TILT_SAMPLE_INTERVAL: Duration = Duration::from_millis(50);
    pub const MOTION_INTERVAL: Duration = Duration::from_millis(60);
    pub const SPAWN_INTERVAL: Duration = Duration::from_millis(1000);

    /// Longest frame the scheduler will catch up on (prevents spiral of death)
    pub const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

    /// Standard gravity, for converting m/s² sensor readings to g
    pub const STANDARD_GRAVITY: f32 = 9.81;
}

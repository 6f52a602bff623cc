//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete steps only (timers live in `scheduler`)
//! - Seeded RNG only
//! - Stable iteration order (entity creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Hit, Rect, pair_hits};
pub use snapshot::{EntityView, Snapshot};
pub use state::{Block, GameEvent, GamePhase, GameState, Player, Projectile};
pub use tick::{TickInput, spawn_block, tick};

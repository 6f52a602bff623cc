//! Shape generation for 2D primitives
//!
//! Turns a snapshot into boxes in screen space (origin top-left, y down).
//! Simulation positions are bottom-left corners with y up.

use glam::Vec2;

use crate::sim::Snapshot;
use crate::tuning::Tuning;

/// What a drawn box represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Player,
    Projectile,
    Block,
}

/// A box in screen coordinates (top-left corner, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub kind: ShapeKind,
    pub top_left: Vec2,
    pub size: Vec2,
}

pub const BACKGROUND: &str = "#000000";

/// CSS fill color for a shape
pub fn fill_color(kind: ShapeKind, high_contrast: bool) -> &'static str {
    match (kind, high_contrast) {
        (_, false) => "#FFFFFF",
        (ShapeKind::Player, true) => "#FFFF00",
        (ShapeKind::Projectile, true) => "#00FFFF",
        (ShapeKind::Block, true) => "#FF00FF",
    }
}

/// Flip a bottom-left, y-up simulation box into a top-left, y-down screen box
fn to_screen(kind: ShapeKind, pos: Vec2, size: Vec2, screen_height: f32) -> DrawRect {
    DrawRect {
        kind,
        top_left: Vec2::new(pos.x, screen_height - pos.y - size.y),
        size,
    }
}

/// Every box to paint this frame, back to front
pub fn draw_list(snapshot: &Snapshot, tuning: &Tuning) -> Vec<DrawRect> {
    let h = tuning.screen_height;
    let mut rects = Vec::with_capacity(1 + snapshot.projectiles.len() + snapshot.blocks.len());

    let block_size = tuning.block_size();
    rects.extend(
        snapshot
            .blocks
            .iter()
            .map(|b| to_screen(ShapeKind::Block, b.pos, block_size, h)),
    );
    let projectile_size = tuning.projectile_size();
    rects.extend(
        snapshot
            .projectiles
            .iter()
            .map(|p| to_screen(ShapeKind::Projectile, p.pos, projectile_size, h)),
    );
    rects.push(to_screen(
        ShapeKind::Player,
        Vec2::new(snapshot.player_x, tuning.player_y),
        tuning.player_size(),
        h,
    ));

    rects
}

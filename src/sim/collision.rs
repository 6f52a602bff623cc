//! Collision detection between projectiles and blocks
//!
//! Everything is an axis-aligned box, so overlap is four comparisons. The
//! interesting part is pairing: one projectile can overlap several blocks in
//! the same tick (and vice versa), but each entity may be credited once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Block, Projectile};
use crate::tuning::Tuning;

/// Axis-aligned rectangle anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap test; rectangles that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// A resolved block/projectile pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub block_id: u32,
    pub projectile_id: u32,
}

/// Pair overlapping blocks and projectiles one-to-one.
///
/// Blocks are visited in slice order (creation order); each takes the first
/// overlapping projectile, also in creation order, that no earlier block has
/// claimed. The result is deterministic for a given input.
pub fn pair_hits(blocks: &[Block], projectiles: &[Projectile], tuning: &Tuning) -> Vec<Hit> {
    let mut hits = Vec::new();
    if blocks.is_empty() || projectiles.is_empty() {
        return hits;
    }

    let projectile_rects: Vec<Rect> = projectiles.iter().map(|p| p.rect(tuning)).collect();
    let mut consumed = vec![false; projectiles.len()];

    for block in blocks {
        let block_rect = block.rect(tuning);
        let found = projectile_rects
            .iter()
            .enumerate()
            .find(|(i, rect)| !consumed[*i] && rect.overlaps(&block_rect))
            .map(|(i, _)| i);

        if let Some(i) = found {
            consumed[i] = true;
            hits.push(Hit {
                block_id: block.id,
                projectile_id: projectiles[i].id,
            });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: u32, x: f32, y: f32) -> Block {
        Block {
            id,
            pos: Vec2::new(x, y),
        }
    }

    fn projectile(id: u32, x: f32, y: f32) -> Projectile {
        Projectile {
            id,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let above = Rect::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
    }

    #[test]
    fn test_pair_single_hit() {
        let tuning = Tuning::default();
        let hits = pair_hits(
            &[block(1, 100.0, 300.0)],
            &[projectile(2, 110.0, 290.0)],
            &tuning,
        );
        assert_eq!(
            hits,
            vec![Hit {
                block_id: 1,
                projectile_id: 2
            }]
        );
    }

    #[test]
    fn test_pair_miss() {
        let tuning = Tuning::default();
        let hits = pair_hits(
            &[block(1, 100.0, 300.0)],
            &[projectile(2, 190.0, 300.0)],
            &tuning,
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_one_projectile_two_blocks_credits_first_block_only() {
        let tuning = Tuning::default();
        // Two side-by-side blocks straddled by a single projectile
        let blocks = [block(1, 60.0, 300.0), block(2, 100.0, 300.0)];
        let projectiles = [projectile(3, 95.0, 310.0)];
        let hits = pair_hits(&blocks, &projectiles, &tuning);
        assert_eq!(
            hits,
            vec![Hit {
                block_id: 1,
                projectile_id: 3
            }]
        );
    }

    #[test]
    fn test_two_projectiles_one_block_consumes_one() {
        let tuning = Tuning::default();
        let blocks = [block(1, 100.0, 300.0)];
        let projectiles = [projectile(2, 105.0, 300.0), projectile(3, 120.0, 300.0)];
        let hits = pair_hits(&blocks, &projectiles, &tuning);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].projectile_id, 2);
    }

    #[test]
    fn test_pairs_are_one_to_one() {
        let tuning = Tuning::default();
        let blocks = [block(1, 100.0, 300.0), block(2, 120.0, 300.0)];
        let projectiles = [projectile(3, 125.0, 305.0), projectile(4, 130.0, 310.0)];
        let hits = pair_hits(&blocks, &projectiles, &tuning);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].projectile_id, 3);
        assert_eq!(hits[1].projectile_id, 4);
    }
}

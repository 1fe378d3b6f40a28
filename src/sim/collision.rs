//! Collision queries and steering for box-shaped entities
//!
//! Every entity is an axis-aligned box, so collision is a plain overlap test.

use glam::Vec2;

use super::state::Zombie;
use crate::{Aabb, direction_to};

/// Displacement that moves `from` toward `to` by `speed`.
///
/// `None` when the centers coincide; the mover stays put this tick.
pub fn steer_toward(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    direction_to(from, to).map(|dir| dir * speed)
}

/// Index of the first live zombie overlapping `bounds`
pub fn first_live_overlap(bounds: &Aabb, zombies: &[Zombie]) -> Option<usize> {
    zombies
        .iter()
        .position(|z| !z.is_dead() && bounds.overlaps(&z.bounds()))
}

/// Indices of every live zombie overlapping `bounds`, in iteration order
pub fn live_overlaps<'a>(bounds: &'a Aabb, zombies: &'a [Zombie]) -> impl Iterator<Item = usize> + 'a {
    zombies
        .iter()
        .enumerate()
        .filter(move |(_, z)| !z.is_dead() && bounds.overlaps(&z.bounds()))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ZombieKind;

    fn zombie_at(x: f32, y: f32, hp: f32) -> Zombie {
        Zombie {
            id: 0,
            kind: ZombieKind::Normal,
            pos: Vec2::new(x, y),
            size: Vec2::splat(32.0),
            hp,
            speed: 1.0,
            damage: 1,
            color: 0,
        }
    }

    #[test]
    fn test_steer_toward_scales_by_speed() {
        let step = steer_toward(Vec2::ZERO, Vec2::new(0.0, 100.0), 2.5).unwrap();
        assert!((step - Vec2::new(0.0, 2.5)).length() < 1e-5);
    }

    #[test]
    fn test_steer_toward_same_point() {
        assert!(steer_toward(Vec2::ONE, Vec2::ONE, 3.0).is_none());
    }

    #[test]
    fn test_first_live_overlap_skips_dead() {
        let zombies = vec![zombie_at(0.0, 0.0, -1.0), zombie_at(5.0, 5.0, 1.0)];
        let bullet = Aabb::new(Vec2::new(10.0, 10.0), Vec2::splat(6.0));
        assert_eq!(first_live_overlap(&bullet, &zombies), Some(1));
    }

    #[test]
    fn test_live_overlaps_preserves_order() {
        let zombies = vec![
            zombie_at(0.0, 0.0, 1.0),
            zombie_at(500.0, 500.0, 1.0),
            zombie_at(10.0, 0.0, 1.0),
        ];
        let player = Aabb::new(Vec2::new(20.0, 0.0), Vec2::splat(32.0));
        let hits: Vec<_> = live_overlaps(&player, &zombies).collect();
        assert_eq!(hits, vec![0, 2]);
    }
}

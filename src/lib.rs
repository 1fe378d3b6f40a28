//! Zombie Survivor - A top-down wave survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, waves, rewards)
//! - `driver`: Frame-driven game loop and render snapshot
//! - `persistence`: Unlocked-weapon storage port
//! - `settings`: Runtime configuration

pub mod driver;
pub mod error;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use driver::{FrameSnapshot, Game};
pub use error::StorageError;
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_START_HP: u32 = 3;
    pub const PLAYER_MAX_HP: u32 = 5;
    pub const PLAYER_START_AMMO: u32 = 60;

    /// Projectiles
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_SIZE: f32 = 6.0;
    /// Bullets survive this far past the arena edge before despawning
    pub const BULLET_CULL_MARGIN: f32 = 50.0;

    pub const ZOMBIE_SIZE: f32 = 32.0;
    pub const PICKUP_SIZE: f32 = 24.0;
    pub const PARTICLE_SIZE: f32 = 4.0;

    /// Timers (ticks)
    pub const INVULN_TICKS: u32 = 60;
    pub const POWERUP_TICKS: u32 = 600;
    pub const SHAKE_TICKS: u32 = 20;
    pub const WAVE_TRANSITION_TICKS: u32 = 100;
    /// Minimum shoot cooldown regardless of fire-rate upgrades
    pub const MIN_SHOOT_COOLDOWN: f32 = 2.0;

    /// Screen shake amplitude in pixels while the shake timer runs
    pub const SHAKE_AMPLITUDE: f32 = 6.0;
}

/// Unit vector pointing from `from` to `to`.
///
/// Returns `None` when the points coincide, so callers can skip movement
/// instead of dividing by zero.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Rotate a vector by `angle` radians (counter-clockwise in math coords)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Axis-aligned bounding box (top-left origin, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

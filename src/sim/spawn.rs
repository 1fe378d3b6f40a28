//! Spawn director
//!
//! Decides when and what to spawn based on the current wave.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Zombie, ZombieKind};
use crate::consts::*;

/// Spawn interval on wave 1 (ticks)
pub const FIRST_WAVE_SPAWN_TICKS: i32 = 120;
/// Fastest possible spawn interval
pub const MIN_SPAWN_TICKS: i32 = 15;
/// Waves below this are eased (weaker, slower zombies)
pub const EASY_WAVE_LIMIT: u32 = 3;
/// FAST zombies appear after this wave
pub const FAST_AFTER_WAVE: u32 = 2;
/// TANK zombies appear after this wave
pub const TANK_AFTER_WAVE: u32 = 4;

/// Spawn countdown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Ticks until the next spawn; spawns when this reaches <= 0
    pub timer: i32,
}

impl SpawnDirector {
    /// Count down one tick. Returns true when a spawn is due (timer re-armed).
    pub fn step(&mut self, wave: u32) -> bool {
        self.timer -= 1;
        if self.timer <= 0 {
            self.timer = spawn_interval(wave);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0;
    }
}

/// Ticks between spawns for a wave (shrinks with wave number, floored)
pub fn spawn_interval(wave: u32) -> i32 {
    if wave <= 1 {
        FIRST_WAVE_SPAWN_TICKS
    } else {
        let wave = wave.min(i32::MAX as u32 / 5) as i32;
        (80 - wave * 5).max(MIN_SPAWN_TICKS)
    }
}

/// (hp, speed) multipliers for a wave. Speed scales more gently than hp.
pub fn wave_multipliers(wave: u32) -> (f32, f32) {
    if wave < EASY_WAVE_LIMIT {
        (0.8, 0.9)
    } else {
        let w = wave as f32;
        (1.0 + w * 0.1, 1.0 + w * 0.03)
    }
}

/// Map a uniform roll in [0, 1) to a zombie type for this wave
pub fn choose_kind(roll: f32, wave: u32) -> ZombieKind {
    if roll < 0.1 && wave > TANK_AFTER_WAVE {
        ZombieKind::Tank
    } else if roll < 0.25 && wave > FAST_AFTER_WAVE {
        ZombieKind::Fast
    } else {
        ZombieKind::Normal
    }
}

/// Random point just outside one of the four arena edges
pub fn edge_position<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let side = rng.random_range(0..4u8);
    match side {
        0 => Vec2::new(rng.random::<f32>() * ARENA_WIDTH, -ZOMBIE_SIZE),
        1 => Vec2::new(ARENA_WIDTH + ZOMBIE_SIZE, rng.random::<f32>() * ARENA_HEIGHT),
        2 => Vec2::new(rng.random::<f32>() * ARENA_WIDTH, ARENA_HEIGHT + ZOMBIE_SIZE),
        _ => Vec2::new(-ZOMBIE_SIZE, rng.random::<f32>() * ARENA_HEIGHT),
    }
}

/// Spawn one zombie of `kind` scaled for the current wave
pub fn spawn_zombie(state: &mut GameState, kind: ZombieKind, pos: Vec2) {
    let stats = kind.stats();
    let (hp_mult, speed_mult) = wave_multipliers(state.wave);
    let id = state.next_entity_id();
    state.zombies.push(Zombie {
        id,
        kind,
        pos,
        size: Vec2::splat(ZOMBIE_SIZE),
        hp: stats.hp * hp_mult,
        speed: stats.speed * speed_mult,
        damage: stats.damage,
        color: stats.color,
    });
    log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
}

/// Run the spawn countdown for one tick, spawning at most one zombie
pub fn update(state: &mut GameState) {
    if !state.spawner.step(state.wave) {
        return;
    }
    let roll = state.rng.random::<f32>();
    let kind = choose_kind(roll, state.wave);
    let pos = edge_position(&mut state.rng);
    spawn_zombie(state, kind, pos);
}

/// Wave is cleared once the kill quota is met and nothing is left alive
pub fn wave_cleared(state: &GameState) -> bool {
    state.kills_this_wave >= state.wave_target() && state.zombies.is_empty()
}

//! Frame-driven game loop
//!
//! [`Game`] owns the simulation, advances it exactly one tick per frame
//! callback, persists weapon unlocks outside the tick, and exposes a
//! read-only [`FrameSnapshot`] for whatever renders the frame.

use std::cmp::Ordering;

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::persistence::{UnlockStore, load_unlocks, save_unlocks};
use crate::settings::Settings;
use crate::sim::{
    ArenaTheme, Bullet, GameEvent, GameState, GameStatus, Particle, Pickup, Player, RewardOption,
    TickInput, WeaponKind, Zombie, tick,
};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Serialize)]
pub struct FrameSnapshot<'a> {
    pub status: GameStatus,
    pub wave: u32,
    pub message: &'a str,
    /// Shake amplitude in pixels (0 when calm or disabled)
    pub screen_shake: f32,
    pub arena_theme: ArenaTheme,
    pub player: &'a Player,
    pub zombies: &'a [Zombie],
    pub bullets: &'a [Bullet],
    pub pickups: &'a [Pickup],
    pub particles: &'a [Particle],
    pub reward_offers: &'a [RewardOption],
    pub unlocked: &'a [WeaponKind],
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    settings: Settings,
    store: Box<dyn UnlockStore>,
    frames: u64,
}

impl Game {
    /// Read unlocks from `store` and set up the title screen
    pub fn new(settings: Settings, store: Box<dyn UnlockStore>) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let unlocked = load_unlocks(store.as_ref());
        let mut state = GameState::with_unlocks(seed, unlocked);
        state.max_particles = settings.max_particles();
        log::info!("Game created (seed {seed})");

        Self {
            state,
            settings,
            store,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Frames advanced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one tick with this frame's input snapshot.
    ///
    /// Returns the events raised during the tick. New unlocks are written
    /// to the store before returning.
    pub fn frame(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input);
        self.frames += 1;

        let events = self.state.drain_events();
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::WeaponUnlocked { .. }))
        {
            save_unlocks(self.store.as_mut(), &self.state.unlocked);
        }
        events
    }

    /// Read-only view of the post-tick state
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        let state = &self.state;
        let shaking = state.shake_ticks > 0 && self.settings.effective_screen_shake();
        FrameSnapshot {
            status: state.status,
            wave: state.wave,
            message: &state.message,
            screen_shake: if shaking { SHAKE_AMPLITUDE } else { 0.0 },
            arena_theme: state.arena_theme,
            player: &state.player,
            zombies: &state.zombies,
            bullets: &state.bullets,
            pickups: &state.pickups,
            particles: &state.particles,
            reward_offers: &state.reward_offers,
            unlocked: state.unlocked.as_slice(),
        }
    }
}

/// Distance at which the demo pilot backs off instead of closing in
const PANIC_DISTANCE: f32 = 56.0;
/// Pickups are only chased when the nearest zombie is farther than this
const SAFE_DISTANCE: f32 = 180.0;

/// Attract-mode input: plays the game without a human.
///
/// Starts runs, takes the first reward, grabs pickups when nothing is
/// close, otherwise faces the nearest zombie and keeps firing.
pub fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    match state.status {
        GameStatus::Start | GameStatus::GameOver => {
            input.start = true;
            return input;
        }
        GameStatus::RewardSelect => {
            input.reward_choice = Some(0);
            return input;
        }
        GameStatus::WaveTransition => return input,
        GameStatus::Playing => {}
    }

    let me = state.player.center();
    let by_distance = |a: &Vec2, b: &Vec2| {
        a.distance_squared(me)
            .partial_cmp(&b.distance_squared(me))
            .unwrap_or(Ordering::Equal)
    };
    let nearest_zombie = state.zombies.iter().map(|z| z.center()).min_by(by_distance);
    let nearest_pickup = state
        .pickups
        .iter()
        .map(|p| p.bounds().center())
        .min_by(by_distance);
    let danger = nearest_zombie.map_or(f32::INFINITY, |z| z.distance(me));

    let heading = match (nearest_zombie, nearest_pickup) {
        (Some(z), _) if danger < PANIC_DISTANCE => me - z,
        (_, Some(p)) if danger > SAFE_DISTANCE => p - me,
        (Some(z), _) => z - me,
        (None, None) => Vec2::ZERO,
        (None, Some(p)) => p - me,
    };

    // Quantize to the 8 key directions, ignoring tiny offsets
    let deadzone = 8.0;
    input.left = heading.x < -deadzone;
    input.right = heading.x > deadzone;
    input.up = heading.y < -deadzone;
    input.down = heading.y > deadzone;

    input.fire_held = nearest_zombie.is_some();
    input.fire_pressed = input.fire_held
        && !state.player.weapon.auto_fire()
        && state.player.shoot_cooldown <= 1.0;
    input
}

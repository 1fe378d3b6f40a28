//! Fixed timestep simulation tick
//!
//! Progression state machine: decides which subsystems run each tick and
//! when wave and reward transitions happen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{ArenaTheme, GameEvent, GameState, GameStatus, Player};
use super::{combat, reward, spawn, weapon};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire key is held (auto-fire weapons keep shooting)
    pub fire_held: bool,
    /// Fire key went down this tick (fires any weapon)
    pub fire_pressed: bool,
    /// Start/restart a run (title or game over screen)
    pub start: bool,
    /// Index into the current reward offers
    pub reward_choice: Option<usize>,
}

impl TickInput {
    /// Raw movement direction from held keys (not normalized)
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Every second wave starting at wave 3 opens the reward screen
pub fn is_reward_wave(wave: u32) -> bool {
    wave > 1 && (wave - 1) % 2 == 0
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start && start_run(state) {
        return;
    }
    if let Some(choice) = input.reward_choice {
        if select_reward(state, choice) {
            return;
        }
    }

    match state.status {
        // Frozen until an explicit action arrives
        GameStatus::Start | GameStatus::RewardSelect | GameStatus::GameOver => {}
        GameStatus::WaveTransition => {
            state.time_ticks += 1;
            state.wave_timer = state.wave_timer.saturating_sub(1);
            if state.wave_timer == 0 {
                state.status = GameStatus::Playing;
                state.message.clear();
            }
        }
        GameStatus::Playing => play(state, input),
    }
}

/// One PLAYING tick: input, spawning, combat, then transition checks
fn play(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    state.player.apply_movement(input.movement());
    state.player.tick_timers();
    let wants_fire =
        input.fire_pressed || (input.fire_held && state.player.weapon.auto_fire());
    if wants_fire {
        weapon::try_fire(state);
    }

    spawn::update(state);
    combat::resolve(state);

    state.shake_ticks = state.shake_ticks.saturating_sub(1);

    if state.status == GameStatus::Playing && spawn::wave_cleared(state) {
        let next = state.wave + 1;
        begin_wave(state, next);
    }
}

/// Start a fresh run from the title or game over screen.
///
/// Clears every entity, restores player defaults (unlocks are kept) and
/// begins wave 1. Returns false, changing nothing, from any other state.
pub fn start_run(state: &mut GameState) -> bool {
    if !matches!(state.status, GameStatus::Start | GameStatus::GameOver) {
        return false;
    }

    state.clear_entities();
    state.player = Player::default();
    state.spawner.reset();
    state.shake_ticks = 0;
    state.reward_offers.clear();
    state.wave = 1;
    state.kills_this_wave = 0;
    state.push_event(GameEvent::RunStarted);
    change_arena(state);
    state.push_event(GameEvent::WaveStarted { wave: 1 });
    state.status = GameStatus::Playing;
    state.message = "WAVE 1".to_string();

    log::info!("Run started (seed {})", state.seed);
    true
}

/// Move to `wave`, through the reward screen on reward waves
fn begin_wave(state: &mut GameState, wave: u32) {
    state.wave = wave;
    state.kills_this_wave = 0;
    change_arena(state);
    state.push_event(GameEvent::WaveStarted { wave });

    if is_reward_wave(wave) {
        state.reward_offers =
            reward::draw_offers(&state.unlocked, state.player.weapon, &mut state.rng);
        state.status = GameStatus::RewardSelect;
        state.message = "CHOOSE REWARD".to_string();
        log::info!("Wave {} reached, {} rewards offered", wave, state.reward_offers.len());
    } else {
        enter_transition(state);
        log::info!("Wave {} incoming", wave);
    }
}

fn enter_transition(state: &mut GameState) {
    state.status = GameStatus::WaveTransition;
    state.wave_timer = WAVE_TRANSITION_TICKS;
    state.message = format!("WAVE {}", state.wave);
}

fn change_arena(state: &mut GameState) {
    let idx = state.rng.random_range(0..ArenaTheme::ALL.len());
    state.arena_theme = ArenaTheme::ALL[idx];
    state.push_event(GameEvent::ArenaChanged {
        theme: state.arena_theme,
    });
}

/// Take reward `choice` from the current offers and resume via the wave
/// transition countdown. Rejected outside `RewardSelect` or for a bad index.
pub fn select_reward(state: &mut GameState, choice: usize) -> bool {
    if state.status != GameStatus::RewardSelect {
        return false;
    }
    let Some(option) = state.reward_offers.get(choice).copied() else {
        return false;
    };

    if let Some(weapon) = option.apply(&mut state.player, &mut state.unlocked) {
        log::info!("Unlocked {}", weapon.name());
        state.push_event(GameEvent::WeaponUnlocked { weapon });
    }
    log::info!("Reward chosen: {}", option.title());

    state.reward_offers.clear();
    enter_transition(state);
    true
}

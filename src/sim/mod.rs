//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only (owned by `GameState`)
//! - Entities mutated only inside `tick`
//! - No rendering, input device or storage dependencies

pub mod collision;
pub mod combat;
pub mod reward;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use reward::{RewardOption, StatUpgrade};
pub use spawn::SpawnDirector;
pub use state::{
    ArenaTheme, Bullet, GameEvent, GameState, GameStatus, Particle, Pickup, PickupKind, Player,
    Upgrades, Zombie, ZombieKind,
};
pub use tick::{TickInput, is_reward_wave, select_reward, start_run, tick};
pub use weapon::{UnlockedWeapons, WeaponKind, WeaponStats, try_fire};

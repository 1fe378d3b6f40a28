//! Game state and core simulation types
//!
//! Owns every mutable entity collection plus the single player record.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::reward::RewardOption;
use super::spawn::SpawnDirector;
use super::weapon::{UnlockedWeapons, WeaponKind};
use crate::Aabb;
use crate::consts::*;

/// Top-level progression state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen, nothing simulated yet
    Start,
    /// Active gameplay
    Playing,
    /// Frozen countdown before the next wave begins
    WaveTransition,
    /// Paused until a reward is chosen
    RewardSelect,
    /// Run ended, waiting for restart
    GameOver,
}

/// Permanent per-run stat multipliers (all start at 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Upgrades {
    pub fire_rate: f32,
    pub damage: f32,
    pub speed: f32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            fire_rate: 1.0,
            damage: 1.0,
            speed: 1.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    pub speed: f32,
    pub ammo: u32,
    /// Facing direction (unit vector), updated only while moving
    pub last_dir: Vec2,
    pub score: u64,
    /// Damage immunity ticks remaining after a hit
    pub invuln_ticks: u32,
    /// Double-damage buff ticks remaining
    pub powerup_ticks: u32,
    pub weapon: WeaponKind,
    /// Ticks until the weapon can fire again (fractional with fire-rate upgrades)
    pub shoot_cooldown: f32,
    pub upgrades: Upgrades,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                ARENA_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
                ARENA_HEIGHT / 2.0 - PLAYER_SIZE / 2.0,
            ),
            size: Vec2::splat(PLAYER_SIZE),
            hp: PLAYER_START_HP,
            max_hp: PLAYER_MAX_HP,
            speed: PLAYER_SPEED,
            ammo: PLAYER_START_AMMO,
            last_dir: Vec2::new(0.0, -1.0),
            score: 0,
            invuln_ticks: 0,
            powerup_ticks: 0,
            weapon: WeaponKind::Pistol,
            shoot_cooldown: 0.0,
            upgrades: Upgrades::default(),
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn powerup_active(&self) -> bool {
        self.powerup_ticks > 0
    }

    /// Heal without exceeding max hp
    pub fn heal(&mut self, amount: u32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Subtract damage, clamped at zero. Returns true if the player died.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }

    /// Apply one tick of movement from a raw (unnormalized) direction
    pub fn apply_movement(&mut self, raw_dir: Vec2) {
        if let Some(dir) = raw_dir.try_normalize() {
            self.last_dir = dir;
            self.pos += dir * self.speed * self.upgrades.speed;
        }
        self.pos.x = self.pos.x.clamp(0.0, ARENA_WIDTH - self.size.x);
        self.pos.y = self.pos.y.clamp(0.0, ARENA_HEIGHT - self.size.y);
    }

    /// Count down invulnerability, powerup and shoot cooldown by one tick
    pub fn tick_timers(&mut self) {
        self.invuln_ticks = self.invuln_ticks.saturating_sub(1);
        self.powerup_ticks = self.powerup_ticks.saturating_sub(1);
        self.shoot_cooldown = (self.shoot_cooldown - 1.0).max(0.0);
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZombieKind {
    Normal,
    Fast,
    Tank,
}

/// Base stats for a zombie archetype before wave scaling
#[derive(Debug, Clone, Copy)]
pub struct ZombieStats {
    pub hp: f32,
    pub speed: f32,
    pub damage: u32,
    pub color: u32,
}

impl ZombieKind {
    pub fn stats(self) -> ZombieStats {
        match self {
            ZombieKind::Normal => ZombieStats {
                hp: 1.5,
                speed: 1.2,
                damage: 1,
                color: 0x4d7c0f,
            },
            ZombieKind::Fast => ZombieStats {
                hp: 1.0,
                speed: 2.4,
                damage: 1,
                color: 0x84cc16,
            },
            ZombieKind::Tank => ZombieStats {
                hp: 7.0,
                speed: 0.7,
                damage: 2,
                color: 0x14532d,
            },
        }
    }

    /// Score awarded for a kill
    pub fn bounty(self) -> u64 {
        match self {
            ZombieKind::Normal => 25,
            ZombieKind::Fast => 50,
            ZombieKind::Tank => 100,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub id: u32,
    pub kind: ZombieKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Dead at <= 0; removed during cleanup of the tick that killed it
    pub hp: f32,
    pub speed: f32,
    /// Contact damage dealt to the player
    pub damage: u32,
    pub color: u32,
}

impl Zombie {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// A projectile (never pierces)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub damage: f32,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// True once the bullet has left the arena plus the cull margin
    pub fn is_out_of_bounds(&self) -> bool {
        !(self.pos.x > -BULLET_CULL_MARGIN
            && self.pos.x < ARENA_WIDTH + BULLET_CULL_MARGIN
            && self.pos.y > -BULLET_CULL_MARGIN
            && self.pos.y < ARENA_HEIGHT + BULLET_CULL_MARGIN)
    }
}

/// Pickup types dropped by dead zombies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Ammo,
    PowerUp,
}

impl PickupKind {
    /// Map a uniform roll in [0, 1) to a pickup: 25% health, 10% powerup, rest ammo
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.25 {
            PickupKind::Health
        } else if roll < 0.35 {
            PickupKind::PowerUp
        } else {
            PickupKind::Ammo
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Pickup {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A particle for visual effects (blood spray)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: f32,
    pub color: u32,
    pub size: f32,
}

/// Default particle cap
pub const MAX_PARTICLES: usize = 512;

/// Cosmetic arena backdrop, regenerated by the renderer at each wave start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaTheme {
    Street,
    Lab,
    Wasteland,
    Bunker,
}

impl ArenaTheme {
    pub const ALL: [ArenaTheme; 4] = [
        ArenaTheme::Street,
        ArenaTheme::Lab,
        ArenaTheme::Wasteland,
        ArenaTheme::Bunker,
    ];
}

/// Notable things that happened during a tick, drained by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    WaveStarted { wave: u32 },
    ArenaChanged { theme: ArenaTheme },
    PlayerHit { damage: u32, hp: u32 },
    ZombieKilled { kind: ZombieKind, bounty: u64 },
    PickupCollected { kind: PickupKind },
    WeaponUnlocked { weapon: WeaponKind },
    GameOver { score: u64, wave: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single source of randomness for every draw in the simulation
    pub rng: Pcg32,
    pub status: GameStatus,
    /// Current wave (0 before the first run)
    pub wave: u32,
    /// Zombies killed during the current wave
    pub kills_this_wave: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub zombies: Vec<Zombie>,
    pub bullets: Vec<Bullet>,
    pub pickups: Vec<Pickup>,
    pub particles: Vec<Particle>,
    pub spawner: SpawnDirector,
    /// Screen shake ticks remaining
    pub shake_ticks: u32,
    /// Wave transition countdown (ticks)
    pub wave_timer: u32,
    /// Banner text shown by the renderer
    pub message: String,
    pub arena_theme: ArenaTheme,
    /// Weapons unlocked across runs (mirrors the persisted set)
    pub unlocked: UnlockedWeapons,
    /// Rewards on offer while in `RewardSelect`
    pub reward_offers: Vec<RewardOption>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Particle cap; oldest particles are evicted first
    pub max_particles: usize,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed, sitting on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            status: GameStatus::Start,
            wave: 0,
            kills_this_wave: 0,
            time_ticks: 0,
            player: Player::default(),
            zombies: Vec::new(),
            bullets: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            spawner: SpawnDirector::default(),
            shake_ticks: 0,
            wave_timer: 0,
            message: String::new(),
            arena_theme: ArenaTheme::Street,
            unlocked: UnlockedWeapons::default(),
            reward_offers: Vec::new(),
            events: Vec::new(),
            max_particles: MAX_PARTICLES,
            next_id: 1,
        }
    }

    /// Same as `new`, with a previously persisted unlock set
    pub fn with_unlocks(seed: u64, unlocked: UnlockedWeapons) -> Self {
        Self {
            unlocked,
            ..Self::new(seed)
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2, damage: f32) {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos,
            size: Vec2::splat(BULLET_SIZE),
            vel,
            damage,
        });
    }

    pub fn spawn_pickup(&mut self, kind: PickupKind, pos: Vec2) {
        let id = self.next_entity_id();
        self.pickups.push(Pickup {
            id,
            kind,
            pos,
            size: Vec2::splat(PICKUP_SIZE),
        });
    }

    pub fn spawn_particle(&mut self, pos: Vec2, vel: Vec2, life: f32, color: u32) {
        self.spawn_particles([(pos, vel, life)], color);
    }

    /// Add a burst of `(pos, vel, life)` particles, then evict the oldest
    /// past the cap in a single pass
    pub fn spawn_particles(
        &mut self,
        burst: impl IntoIterator<Item = (Vec2, Vec2, f32)>,
        color: u32,
    ) {
        if self.max_particles == 0 {
            return;
        }
        for (pos, vel, life) in burst {
            let id = self.next_entity_id();
            self.particles.push(Particle {
                id,
                pos,
                vel,
                life,
                color,
                size: PARTICLE_SIZE,
            });
        }
        let excess = self.particles.len().saturating_sub(self.max_particles);
        if excess > 0 {
            self.particles.drain(..excess);
        }
    }

    /// Drop every entity (player untouched)
    pub fn clear_entities(&mut self) {
        self.zombies.clear();
        self.bullets.clear();
        self.pickups.clear();
        self.particles.clear();
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current kill quota to clear the wave
    pub fn wave_target(&self) -> u32 {
        5 + 5 * self.wave
    }
}

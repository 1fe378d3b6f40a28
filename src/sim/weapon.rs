//! Weapon model
//!
//! Static firing stats per weapon, projectile generation, and the gated
//! fire action that spends ammo and arms the cooldown.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, Upgrades};
use crate::consts::*;
use crate::rotate;

/// Weapon identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    Uzi,
}

/// Immutable firing stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub name: &'static str,
    /// Base ticks between shots
    pub cooldown: f32,
    pub damage: f32,
    /// Total cone width in radians
    pub spread: f32,
    pub bullets_per_shot: u32,
}

/// One projectile produced by a trigger pull
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub vel: Vec2,
    pub damage: f32,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Shotgun, WeaponKind::Uzi];

    pub fn stats(self) -> WeaponStats {
        match self {
            WeaponKind::Pistol => WeaponStats {
                name: "PISTOL",
                cooldown: 18.0,
                damage: 2.0,
                spread: 0.0,
                bullets_per_shot: 1,
            },
            WeaponKind::Shotgun => WeaponStats {
                name: "SHOTGUN",
                cooldown: 40.0,
                damage: 1.5,
                spread: 0.35,
                bullets_per_shot: 6,
            },
            WeaponKind::Uzi => WeaponStats {
                name: "UZI",
                cooldown: 5.0,
                damage: 0.9,
                spread: 0.12,
                bullets_per_shot: 1,
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.stats().name
    }

    /// Whether holding the trigger keeps firing (shotgun needs a fresh press)
    pub fn auto_fire(self) -> bool {
        matches!(self, WeaponKind::Pistol | WeaponKind::Uzi)
    }
}

impl WeaponStats {
    /// Produce `bullets_per_shot` projectiles around `direction`.
    ///
    /// Each projectile gets its own uniform spread angle in
    /// [-spread/2, +spread/2]. Damage includes the damage upgrade and
    /// doubles while a powerup is active.
    pub fn fire<R: Rng + ?Sized>(
        &self,
        direction: Vec2,
        upgrades: &Upgrades,
        powerup_active: bool,
        rng: &mut R,
    ) -> Vec<Shot> {
        let damage = self.damage * upgrades.damage * if powerup_active { 2.0 } else { 1.0 };
        (0..self.bullets_per_shot)
            .map(|_| {
                let angle = (rng.random::<f32>() - 0.5) * self.spread;
                Shot {
                    vel: rotate(direction, angle) * BULLET_SPEED,
                    damage,
                }
            })
            .collect()
    }

    /// Cooldown after a shot, floored so fire can never repeat instantly
    pub fn cooldown_with(&self, upgrades: &Upgrades) -> f32 {
        (self.cooldown / upgrades.fire_rate).max(MIN_SHOOT_COOLDOWN)
    }
}

/// Fire the player's equipped weapon.
///
/// Rejected (no state change) when out of ammo or still cooling down.
/// One ammo unit is spent per trigger pull regardless of pellet count.
pub fn try_fire(state: &mut GameState) -> bool {
    let player = &state.player;
    if player.ammo == 0 || player.shoot_cooldown > 0.0 {
        return false;
    }

    let stats = player.weapon.stats();
    let shots = stats.fire(
        player.last_dir,
        &player.upgrades,
        player.powerup_active(),
        &mut state.rng,
    );
    let origin = player.center() - Vec2::splat(BULLET_SIZE / 2.0);
    let cooldown = stats.cooldown_with(&player.upgrades);

    for shot in shots {
        state.spawn_bullet(origin, shot.vel, shot.damage);
    }

    state.player.ammo -= 1;
    state.player.shoot_cooldown = cooldown;
    true
}

/// Weapons unlocked across runs.
///
/// Ordered, de-duplicated, only ever grows. The pistol is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockedWeapons(Vec<WeaponKind>);

impl Default for UnlockedWeapons {
    fn default() -> Self {
        Self(vec![WeaponKind::Pistol])
    }
}

impl UnlockedWeapons {
    /// Build from a stored list, dropping duplicates and restoring the pistol
    pub fn from_list(list: impl IntoIterator<Item = WeaponKind>) -> Self {
        let mut unlocked = Self::default();
        for weapon in list {
            unlocked.unlock(weapon);
        }
        unlocked
    }

    pub fn contains(&self, weapon: WeaponKind) -> bool {
        self.0.contains(&weapon)
    }

    /// Add a weapon. Returns true if it was not already unlocked.
    pub fn unlock(&mut self, weapon: WeaponKind) -> bool {
        if self.contains(weapon) {
            return false;
        }
        self.0.push(weapon);
        true
    }

    pub fn as_slice(&self) -> &[WeaponKind] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_state() -> GameState {
        GameState::new(42)
    }

    #[test]
    fn test_pistol_fire_single_bullet() {
        let mut state = playing_state();
        assert!(try_fire(&mut state));

        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].damage, 2.0);
        assert_eq!(state.player.ammo, 59);
        assert_eq!(state.player.shoot_cooldown, 18.0);
        // Facing up by default
        let vel = state.bullets[0].vel;
        assert!(vel.x.abs() < 1e-5);
        assert!((vel.y + BULLET_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_shotgun_spends_one_ammo_for_six_pellets() {
        let mut state = playing_state();
        state.player.weapon = WeaponKind::Shotgun;
        assert!(try_fire(&mut state));

        assert_eq!(state.bullets.len(), 6);
        assert_eq!(state.player.ammo, 59);
        let facing = state.player.last_dir;
        for bullet in &state.bullets {
            let angle = facing.angle_to(bullet.vel).abs();
            assert!(angle <= 0.175 + 1e-4, "pellet outside cone: {angle}");
            assert!((bullet.vel.length() - BULLET_SPEED).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cooldown_blocks_second_shot() {
        let mut state = playing_state();
        assert!(try_fire(&mut state));
        assert!(!try_fire(&mut state));
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.player.ammo, 59);
    }

    #[test]
    fn test_cooldown_floor() {
        let upgrades = Upgrades {
            fire_rate: 10.0,
            ..Default::default()
        };
        assert_eq!(WeaponKind::Uzi.stats().cooldown_with(&upgrades), 2.0);
        assert_eq!(
            WeaponKind::Pistol.stats().cooldown_with(&Upgrades::default()),
            18.0
        );
    }

    #[test]
    fn test_powerup_and_upgrade_scale_damage() {
        let mut rng = Pcg32::seed_from_u64(1);
        let upgrades = Upgrades {
            damage: 1.4,
            ..Default::default()
        };
        let shots = WeaponKind::Pistol
            .stats()
            .fire(Vec2::X, &upgrades, true, &mut rng);
        assert_eq!(shots.len(), 1);
        assert!((shots[0].damage - 2.0 * 1.4 * 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_unlocked_defaults_to_pistol() {
        let unlocked = UnlockedWeapons::from_list([]);
        assert_eq!(unlocked.as_slice(), &[WeaponKind::Pistol]);
    }

    #[test]
    fn test_unlocked_dedups_and_keeps_order() {
        let unlocked = UnlockedWeapons::from_list([
            WeaponKind::Uzi,
            WeaponKind::Pistol,
            WeaponKind::Uzi,
            WeaponKind::Shotgun,
        ]);
        assert_eq!(
            unlocked.as_slice(),
            &[WeaponKind::Pistol, WeaponKind::Uzi, WeaponKind::Shotgun]
        );
    }

    proptest! {
        #[test]
        fn prop_fire_without_ammo_is_noop(cooldown in 0.0f32..50.0, weapon in 0usize..3) {
            let mut state = playing_state();
            state.player.ammo = 0;
            state.player.weapon = WeaponKind::ALL[weapon];
            state.player.shoot_cooldown = cooldown;

            prop_assert!(!try_fire(&mut state));
            prop_assert_eq!(state.player.ammo, 0);
            prop_assert!(state.bullets.is_empty());
            prop_assert_eq!(state.player.shoot_cooldown, cooldown);
        }

        #[test]
        fn prop_unlock_is_idempotent(picks in proptest::collection::vec(0usize..3, 0..10)) {
            let mut once = UnlockedWeapons::default();
            let mut twice = UnlockedWeapons::default();
            for &i in &picks {
                once.unlock(WeaponKind::ALL[i]);
                twice.unlock(WeaponKind::ALL[i]);
                twice.unlock(WeaponKind::ALL[i]);
            }
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.contains(WeaponKind::Pistol));
        }
    }
}

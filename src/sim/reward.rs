//! Between-wave rewards
//!
//! Offers are drawn once when a run enters `RewardSelect` and stay fixed
//! until one is chosen.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::state::Player;
use super::weapon::{UnlockedWeapons, WeaponKind};

/// Maximum offers shown at once
pub const MAX_OFFERS: usize = 3;

/// Permanent stat upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatUpgrade {
    FireRate,
    Damage,
    Speed,
}

impl StatUpgrade {
    pub const ALL: [StatUpgrade; 3] = [StatUpgrade::FireRate, StatUpgrade::Damage, StatUpgrade::Speed];

    /// Amount added to the matching multiplier
    pub fn increment(self) -> f32 {
        match self {
            StatUpgrade::FireRate => 0.3,
            StatUpgrade::Damage => 0.4,
            StatUpgrade::Speed => 0.2,
        }
    }
}

/// A single reward choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardOption {
    /// First-time unlock (also equips)
    Unlock(WeaponKind),
    /// Switch to an already unlocked weapon
    Equip(WeaponKind),
    Upgrade(StatUpgrade),
}

impl RewardOption {
    /// Menu title
    pub fn title(&self) -> String {
        match self {
            RewardOption::Unlock(w) => format!("UNLOCK {}", w.name()),
            RewardOption::Equip(w) => format!("EQUIP {}", w.name()),
            RewardOption::Upgrade(StatUpgrade::FireRate) => "OVERCLOCK".to_string(),
            RewardOption::Upgrade(StatUpgrade::Damage) => "FATAL SHOTS".to_string(),
            RewardOption::Upgrade(StatUpgrade::Speed) => "SNEAKERS".to_string(),
        }
    }

    /// Menu blurb
    pub fn description(&self) -> &'static str {
        match self {
            RewardOption::Unlock(WeaponKind::Shotgun) => "Spreads damage. Close range king.",
            RewardOption::Unlock(WeaponKind::Uzi) => "Hold fire for rapid shots.",
            RewardOption::Unlock(WeaponKind::Pistol) => "Old reliable.",
            RewardOption::Equip(WeaponKind::Shotgun) => "Switch to the boomstick.",
            RewardOption::Equip(WeaponKind::Uzi) => "Switch to rapid fire.",
            RewardOption::Equip(WeaponKind::Pistol) => "Back to basics.",
            RewardOption::Upgrade(StatUpgrade::FireRate) => "Huge firing speed boost.",
            RewardOption::Upgrade(StatUpgrade::Damage) => "Major damage increase.",
            RewardOption::Upgrade(StatUpgrade::Speed) => "Run faster than them.",
        }
    }

    /// Apply to the player. Returns the weapon newly unlocked, if any.
    pub fn apply(&self, player: &mut Player, unlocked: &mut UnlockedWeapons) -> Option<WeaponKind> {
        match *self {
            RewardOption::Unlock(weapon) | RewardOption::Equip(weapon) => {
                player.weapon = weapon;
                unlocked.unlock(weapon).then_some(weapon)
            }
            RewardOption::Upgrade(upgrade) => {
                let upgrades = &mut player.upgrades;
                match upgrade {
                    StatUpgrade::FireRate => upgrades.fire_rate += upgrade.increment(),
                    StatUpgrade::Damage => upgrades.damage += upgrade.increment(),
                    StatUpgrade::Speed => upgrades.speed += upgrade.increment(),
                }
                None
            }
        }
    }
}

/// Every eligible reward, before shuffling.
///
/// Locked weapons are offered as unlocks; unlocked ones as equips unless
/// already in hand. The pistol is the starting weapon and never offered.
pub fn candidate_rewards(unlocked: &UnlockedWeapons, equipped: WeaponKind) -> Vec<RewardOption> {
    let specials = [WeaponKind::Shotgun, WeaponKind::Uzi];
    let mut options: Vec<RewardOption> = specials
        .iter()
        .filter(|w| !unlocked.contains(**w))
        .map(|w| RewardOption::Unlock(*w))
        .collect();
    options.extend(
        specials
            .iter()
            .filter(|w| unlocked.contains(**w) && **w != equipped)
            .map(|w| RewardOption::Equip(*w)),
    );
    options.extend(StatUpgrade::ALL.iter().map(|u| RewardOption::Upgrade(*u)));
    options
}

/// Shuffle the candidates and keep up to `MAX_OFFERS` distinct options
pub fn draw_offers<R: Rng + ?Sized>(
    unlocked: &UnlockedWeapons,
    equipped: WeaponKind,
    rng: &mut R,
) -> Vec<RewardOption> {
    let mut options = candidate_rewards(unlocked, equipped);
    options.shuffle(rng);
    options.truncate(MAX_OFFERS);
    options
}

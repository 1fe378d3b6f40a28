//! Combat resolver
//!
//! Runs once per PLAYING tick, in a fixed order:
//! 1. zombies steer toward the player
//! 2. player/zombie contact damage
//! 3. bullets move and hit at most one zombie each
//! 4. pickups collected by the player
//! 5. particles drift and fade
//! 6. dead zombies removed
//!
//! A zombie killed in step 3 has already moved this tick and is only
//! removed in step 6. A lethal hit in step 2 still lets the rest of the
//! tick finish; the game over event is raised last so it carries the
//! final score.

use glam::Vec2;
use rand::Rng;

use super::collision::{first_live_overlap, live_overlaps, steer_toward};
use super::state::{GameEvent, GameState, GameStatus, PickupKind, ZombieKind};
use crate::consts::*;

/// Blood particles spawned per bullet hit
pub const PARTICLES_PER_HIT: usize = 10;
/// Chance a killed zombie drops a pickup
pub const PICKUP_DROP_CHANCE: f32 = 0.2;
/// Ammo granted by an ammo pickup
pub const AMMO_PICKUP_AMOUNT: u32 = 40;

/// Run every combat sub-phase for one tick
pub fn resolve(state: &mut GameState) {
    move_zombies(state);
    let overrun = resolve_contact(state);
    update_bullets(state);
    collect_pickups(state);
    update_particles(state);
    remove_dead(state);

    if overrun {
        announce_game_over(state);
    }
}

/// Step 1: direct-vector steering toward the player's center
pub fn move_zombies(state: &mut GameState) {
    let target = state.player.center();
    for zombie in &mut state.zombies {
        if let Some(step) = steer_toward(zombie.center(), target, zombie.speed) {
            zombie.pos += step;
        }
    }
}

/// Step 2: contact damage. Returns true when the hit was lethal.
///
/// Invulnerability is read once before checking any zombie, so the player
/// takes at most one hit per tick (from the first overlapping zombie).
pub fn resolve_contact(state: &mut GameState) -> bool {
    if state.player.invuln_ticks > 0 {
        return false;
    }

    let bounds = state.player.bounds();
    let Some(idx) = live_overlaps(&bounds, &state.zombies).next() else {
        return false;
    };
    let damage = state.zombies[idx].damage;

    let died = state.player.take_damage(damage);
    state.player.invuln_ticks = INVULN_TICKS;
    state.shake_ticks = SHAKE_TICKS;
    state.push_event(GameEvent::PlayerHit {
        damage,
        hp: state.player.hp,
    });
    log::debug!("Player hit for {} ({} hp left)", damage, state.player.hp);

    if died {
        state.status = GameStatus::GameOver;
        state.message = "OVERRUN".to_string();
    }
    died
}

fn announce_game_over(state: &mut GameState) {
    state.push_event(GameEvent::GameOver {
        score: state.player.score,
        wave: state.wave,
    });
    log::info!(
        "Game over on wave {} with score {}",
        state.wave,
        state.player.score
    );
}

/// A bullet impact recorded during the bullet pass
struct Hit {
    center: Vec2,
    color: u32,
    /// Set when the hit dropped the zombie to <= 0 hp
    kill: Option<(ZombieKind, Vec2)>,
}

/// Step 3: move bullets, apply first-match damage, cull stray bullets
pub fn update_bullets(state: &mut GameState) {
    let mut hits: Vec<Hit> = Vec::new();
    let zombies = &mut state.zombies;

    state.bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel;

        if let Some(idx) = first_live_overlap(&bullet.bounds(), &zombies[..]) {
            let zombie = &mut zombies[idx];
            zombie.hp -= bullet.damage;
            hits.push(Hit {
                center: zombie.center(),
                color: zombie.color,
                kill: zombie.is_dead().then_some((zombie.kind, zombie.pos)),
            });
            return false;
        }

        !bullet.is_out_of_bounds()
    });

    for hit in hits {
        spawn_blood(state, hit.center, hit.color);

        if let Some((kind, pos)) = hit.kill {
            let bounty = kind.bounty();
            state.player.score += bounty;
            state.kills_this_wave += 1;
            state.push_event(GameEvent::ZombieKilled { kind, bounty });

            if state.rng.random::<f32>() < PICKUP_DROP_CHANCE {
                let pickup = PickupKind::from_roll(state.rng.random::<f32>());
                state.spawn_pickup(pickup, pos);
            }
        }
    }
}

/// Burst of short-lived particles with small random velocities
fn spawn_blood(state: &mut GameState, center: Vec2, color: u32) {
    let rng = &mut state.rng;
    let burst: Vec<(Vec2, Vec2, f32)> = (0..PARTICLES_PER_HIT)
        .map(|_| {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 6.0,
                (rng.random::<f32>() - 0.5) * 6.0,
            );
            let life = 25.0 + rng.random::<f32>() * 25.0;
            (center, vel, life)
        })
        .collect();
    state.spawn_particles(burst, color);
}

/// Step 4: apply and remove every pickup the player touches
pub fn collect_pickups(state: &mut GameState) {
    let bounds = state.player.bounds();
    let mut collected = Vec::new();
    state.pickups.retain(|pickup| {
        if bounds.overlaps(&pickup.bounds()) {
            collected.push(pickup.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        let player = &mut state.player;
        match kind {
            PickupKind::Health => player.heal(1),
            PickupKind::Ammo => player.ammo = player.ammo.saturating_add(AMMO_PICKUP_AMOUNT),
            PickupKind::PowerUp => player.powerup_ticks = POWERUP_TICKS,
        }
        log::debug!("Collected {:?}", kind);
        state.push_event(GameEvent::PickupCollected { kind });
    }
}

/// Step 5: particle drift and decay
pub fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= 1.0;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Step 6: drop zombies killed this tick
pub fn remove_dead(state: &mut GameState) {
    state.zombies.retain(|z| !z.is_dead());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_zombie;

    fn playing() -> GameState {
        let mut state = GameState::new(11);
        state.status = GameStatus::Playing;
        state.wave = 1;
        state
    }

    /// Zombie placed exactly on top of the player
    fn zombie_on_player(state: &mut GameState, kind: ZombieKind) {
        let pos = state.player.pos;
        spawn_zombie(state, kind, pos);
    }

    #[test]
    fn test_contact_damage_sets_invulnerability() {
        let mut state = playing();
        zombie_on_player(&mut state, ZombieKind::Normal);

        resolve_contact(&mut state);
        assert_eq!(state.player.hp, 2);
        assert_eq!(state.player.invuln_ticks, 60);
        assert_eq!(state.shake_ticks, SHAKE_TICKS);

        // No second hit while invulnerable
        for _ in 0..59 {
            state.player.tick_timers();
            resolve_contact(&mut state);
            assert_eq!(state.player.hp, 2);
        }
        state.player.tick_timers();
        assert_eq!(state.player.invuln_ticks, 0);
        resolve_contact(&mut state);
        assert_eq!(state.player.hp, 1);
    }

    #[test]
    fn test_overlapping_zombies_hit_once_per_tick() {
        let mut state = playing();
        zombie_on_player(&mut state, ZombieKind::Normal);
        zombie_on_player(&mut state, ZombieKind::Tank);

        resolve_contact(&mut state);
        // First zombie in order (Normal, damage 1) wins
        assert_eq!(state.player.hp, 2);
    }

    #[test]
    fn test_lethal_contact_ends_run() {
        let mut state = playing();
        state.player.hp = 2;
        zombie_on_player(&mut state, ZombieKind::Tank);

        assert!(resolve_contact(&mut state));
        assert_eq!(state.player.hp, 0);
        assert_eq!(state.status, GameStatus::GameOver);

        resolve(&mut state);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
        );
    }

    #[test]
    fn test_game_over_event_includes_same_tick_kill() {
        let mut state = playing();
        state.player.hp = 1;
        zombie_on_player(&mut state, ZombieKind::Normal);
        spawn_zombie(&mut state, ZombieKind::Normal, Vec2::new(100.0, 100.0));
        state.spawn_bullet(Vec2::new(110.0, 110.0), Vec2::ZERO, 5.0);

        resolve(&mut state);
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.player.score, 25);
        let game_overs: Vec<_> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver { score, wave } => Some((*score, *wave)),
                _ => None,
            })
            .collect();
        assert_eq!(game_overs, vec![(25, 1)]);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::GameOver { .. })
        ));
    }

    #[test]
    fn test_zombies_steer_toward_player() {
        let mut state = playing();
        spawn_zombie(&mut state, ZombieKind::Normal, Vec2::new(0.0, 0.0));
        let before = state.zombies[0].center().distance(state.player.center());
        move_zombies(&mut state);
        let after = state.zombies[0].center().distance(state.player.center());
        assert!((before - after - state.zombies[0].speed).abs() < 1e-3);
    }

    #[test]
    fn test_zombie_on_player_center_does_not_move() {
        let mut state = playing();
        zombie_on_player(&mut state, ZombieKind::Normal);
        let pos = state.zombies[0].pos;
        move_zombies(&mut state);
        assert_eq!(state.zombies[0].pos, pos);
        assert!(state.zombies[0].pos.is_finite());
    }

    #[test]
    fn test_bullet_kill_scores_and_cleans_up() {
        let mut state = playing();
        spawn_zombie(&mut state, ZombieKind::Normal, Vec2::new(100.0, 100.0));
        state.zombies[0].hp = 1.5;
        state.spawn_bullet(Vec2::new(110.0, 110.0), Vec2::ZERO, 2.0);

        update_bullets(&mut state);
        assert!(state.bullets.is_empty());
        assert!((state.zombies[0].hp + 0.5).abs() < 1e-5);
        assert_eq!(state.player.score, 25);
        assert_eq!(state.kills_this_wave, 1);
        assert_eq!(state.particles.len(), PARTICLES_PER_HIT);
        for p in &state.particles {
            assert!(p.life >= 25.0 && p.life < 50.0);
            assert_eq!(p.color, ZombieKind::Normal.stats().color);
        }

        remove_dead(&mut state);
        assert!(state.zombies.is_empty());
    }

    #[test]
    fn test_kill_drops_follow_odds_at_zombie_position() {
        let mut state = playing();
        let kills = 10_000;
        let mut drops = 0;
        let (mut health, mut power, mut ammo) = (0, 0, 0);

        for i in 0..kills {
            let pos = Vec2::new(40.0 + (i % 20) as f32 * 30.0, 40.0 + (i % 13) as f32 * 30.0);
            spawn_zombie(&mut state, ZombieKind::Normal, pos);
            state.spawn_bullet(pos + Vec2::splat(10.0), Vec2::ZERO, 10.0);
            update_bullets(&mut state);
            remove_dead(&mut state);
            assert!(state.zombies.is_empty());

            if let Some(pickup) = state.pickups.pop() {
                assert_eq!(pickup.pos, pos);
                drops += 1;
                match pickup.kind {
                    PickupKind::Health => health += 1,
                    PickupKind::PowerUp => power += 1,
                    PickupKind::Ammo => ammo += 1,
                }
            }
            assert!(state.pickups.is_empty());
        }

        assert_eq!(state.player.score, 25 * kills as u64);
        let rate = drops as f32 / kills as f32;
        assert!((rate - PICKUP_DROP_CHANCE).abs() < 0.03, "drop rate {rate}");
        let share = |n: i32| n as f32 / drops as f32;
        assert!((share(health) - 0.25).abs() < 0.05, "health {}", share(health));
        assert!((share(power) - 0.10).abs() < 0.04, "power {}", share(power));
        assert!((share(ammo) - 0.65).abs() < 0.05, "ammo {}", share(ammo));
    }

    #[test]
    fn test_bullet_hits_only_first_zombie() {
        let mut state = playing();
        spawn_zombie(&mut state, ZombieKind::Tank, Vec2::new(100.0, 100.0));
        spawn_zombie(&mut state, ZombieKind::Tank, Vec2::new(100.0, 100.0));
        let hp = state.zombies[0].hp;
        state.spawn_bullet(Vec2::new(110.0, 110.0), Vec2::ZERO, 2.0);

        update_bullets(&mut state);
        assert!((state.zombies[0].hp - (hp - 2.0)).abs() < 1e-5);
        assert_eq!(state.zombies[1].hp, hp);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_second_bullet_skips_dead_zombie() {
        let mut state = playing();
        spawn_zombie(&mut state, ZombieKind::Normal, Vec2::new(100.0, 100.0));
        state.spawn_bullet(Vec2::new(110.0, 110.0), Vec2::ZERO, 5.0);
        state.spawn_bullet(Vec2::new(110.0, 110.0), Vec2::ZERO, 5.0);

        update_bullets(&mut state);
        assert_eq!(state.player.score, 25);
        assert_eq!(state.kills_this_wave, 1);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_bullets_culled_outside_margin() {
        let mut state = playing();
        state.spawn_bullet(
            Vec2::new(ARENA_WIDTH + 45.0, 10.0),
            Vec2::new(BULLET_SPEED, 0.0),
            1.0,
        );
        state.spawn_bullet(Vec2::new(400.0, 10.0), Vec2::new(BULLET_SPEED, 0.0), 1.0);
        update_bullets(&mut state);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 410.0);
    }

    #[test]
    fn test_pickup_effects() {
        let mut state = playing();
        let pos = state.player.pos;
        state.spawn_pickup(PickupKind::Health, pos);
        state.spawn_pickup(PickupKind::Ammo, pos);
        state.spawn_pickup(PickupKind::PowerUp, pos);
        state.spawn_pickup(PickupKind::Ammo, Vec2::new(0.0, 0.0));

        collect_pickups(&mut state);
        assert_eq!(state.player.hp, 4);
        assert_eq!(state.player.ammo, 100);
        assert_eq!(state.player.powerup_ticks, POWERUP_TICKS);
        assert_eq!(state.pickups.len(), 1);
    }

    #[test]
    fn test_health_pickup_never_exceeds_max() {
        let mut state = playing();
        state.player.hp = state.player.max_hp;
        let pos = state.player.pos;
        state.spawn_pickup(PickupKind::Health, pos);
        collect_pickups(&mut state);
        assert_eq!(state.player.hp, state.player.max_hp);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = playing();
        state.spawn_particle(Vec2::ZERO, Vec2::new(1.0, 0.0), 2.0, 0);
        update_particles(&mut state);
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].pos, Vec2::new(1.0, 0.0));
        update_particles(&mut state);
        assert!(state.particles.is_empty());
    }
}

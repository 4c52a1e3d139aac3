//! Collision resolution
//!
//! Runs after every actor has moved for the tick: player projectiles
//! against enemies, enemy shots and bodies against the player, then pickup
//! magnet and collection. Passive weapons (Shield, Counter) hook in
//! wherever the player actually takes damage.

use rand::Rng;

use crate::game::enemy::{enemies_within, Enemy};
use crate::game::projectile::{Blast, OnHit, Owner};
use crate::game::state::{EntityId, GameState};
use crate::game::weapons::WeaponRoster;
use crate::util::vec2::circles_overlap;

/// Totals produced by one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    /// Health removed from enemies (projectiles, blasts, reflect, counter)
    pub damage_dealt: f32,
    /// Health the player actually lost
    pub damage_taken: f32,
    pub reflected: f32,
    pub counters: u32,
    pub exp_collected: u32,
    pub level_ups: u32,
}

/// Resolve every overlap for this tick
pub fn update<R: Rng>(state: &mut GameState, roster: &mut WeaponRoster, rng: &mut R, dt: f32) -> CollisionReport {
    let mut report = CollisionReport::default();
    projectiles_vs_enemies(state, &mut report);
    enemy_shots_vs_player(state, roster, rng, &mut report);
    enemy_contact(state, roster, rng, &mut report);
    pickups(state, rng, dt, &mut report);
    report
}

fn projectiles_vs_enemies(state: &mut GameState, report: &mut CollisionReport) {
    let mut blasts: Vec<Blast> = Vec::new();

    for projectile in state.projectiles.iter_mut().filter(|p| p.alive && !p.is_hostile()) {
        for enemy in state.enemies.iter_mut() {
            if !projectile.alive {
                break;
            }
            if !enemy.alive || !circles_overlap(projectile.position, projectile.radius, enemy.position, enemy.radius) {
                continue;
            }
            if !projectile.try_hit(enemy.id) {
                continue;
            }
            report.damage_dealt += enemy.take_damage(projectile.damage);
            match projectile.on_hit {
                OnHit::Slow { amount, duration } => enemy.apply_slow(amount, duration),
                OnHit::Poison { damage, duration } => enemy.apply_poison(damage, duration),
                OnHit::Explode { .. } => blasts.extend(projectile.detonate()),
                OnHit::None => {}
            }
        }
    }

    for blast in blasts {
        report.damage_dealt += apply_blast(&mut state.enemies, &blast);
    }
}

/// Area damage to every living enemy in the blast; returns health removed
pub fn apply_blast(enemies: &mut [Enemy], blast: &Blast) -> f32 {
    enemies_within(enemies, blast.position, blast.radius)
        .into_iter()
        .map(|i| enemies[i].take_damage(blast.damage))
        .sum()
}

fn enemy_shots_vs_player<R: Rng>(
    state: &mut GameState,
    roster: &mut WeaponRoster,
    rng: &mut R,
    report: &mut CollisionReport,
) {
    let player = &mut state.player;
    let mut attackers: Vec<(EntityId, f32)> = Vec::new();

    for shot in state.projectiles.iter_mut().filter(|p| p.alive && p.is_hostile()) {
        if !circles_overlap(shot.position, shot.radius, player.position, player.radius) {
            continue;
        }
        // Consumed on contact even when the player is immune
        shot.alive = false;
        let taken = player.take_damage(shot.damage);
        if taken > 0.0 {
            report.damage_taken += taken;
            if let Owner::Enemy(id) = shot.owner {
                attackers.push((id, taken));
            }
        }
    }

    for (id, taken) in attackers {
        if let Some(index) = state.enemies.iter().position(|e| e.id == id) {
            retaliate(state, roster, rng, index, taken, report);
        }
    }
}

fn enemy_contact<R: Rng>(
    state: &mut GameState,
    roster: &mut WeaponRoster,
    rng: &mut R,
    report: &mut CollisionReport,
) {
    for index in 0..state.enemies.len() {
        let enemy = &state.enemies[index];
        if !enemy.alive || !circles_overlap(enemy.position, enemy.radius, state.player.position, state.player.radius) {
            continue;
        }
        let taken = state.player.take_damage(enemy.damage);
        if taken > 0.0 {
            report.damage_taken += taken;
            retaliate(state, roster, rng, index, taken, report);
        }
    }
}

/// Shield reflect and Counter against the enemy at `index`
fn retaliate<R: Rng>(
    state: &mut GameState,
    roster: &mut WeaponRoster,
    rng: &mut R,
    index: usize,
    taken: f32,
    report: &mut CollisionReport,
) {
    let reflect = taken * roster.reflect_fraction();
    let counter = roster.try_counter(rng, state.player.damage_multiplier());
    let attacker = &mut state.enemies[index];

    if reflect > 0.0 {
        let dealt = attacker.take_damage(reflect);
        report.reflected += dealt;
        report.damage_dealt += dealt;
    }
    if let Some(damage) = counter {
        report.counters += 1;
        report.damage_dealt += attacker.take_damage(damage);
    }
}

fn pickups<R: Rng>(state: &mut GameState, rng: &mut R, dt: f32, report: &mut CollisionReport) {
    let player = &mut state.player;
    let magnet = player.magnet_range();

    for pickup in state.pickups.iter_mut().filter(|p| p.alive) {
        if pickup.is_magnetic() && pickup.position.distance_to(player.position) < magnet {
            pickup.move_towards_player(player.position, dt);
        }
        if circles_overlap(pickup.position, pickup.radius, player.position, player.radius) {
            let collected = pickup.collect(player, &mut state.experience, rng);
            report.exp_collected += collected.exp;
            report.level_ups += collected.level_ups;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::EnemyKind;
    use crate::game::pickup::Pickup;
    use crate::game::projectile::{Pierce, Projectile};
    use crate::game::weapons::WeaponKind;
    use crate::util::vec2::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (GameState, WeaponRoster, StdRng) {
        (GameState::new(), WeaponRoster::new(), StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_projectile_damages_once_and_dies() {
        let (mut state, mut roster, mut rng) = setup();
        state.add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(200.0, 0.0)));
        state.add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(205.0, 0.0)));
        state.add_projectile(Projectile::new(Owner::Player, Vec2::new(200.0, 0.0), Vec2::ZERO, 15.0));

        let report = update(&mut state, &mut roster, &mut rng, 0.016);
        assert_eq!(report.damage_dealt, 15.0);
        assert!(!state.projectiles[0].alive);
        assert_eq!(state.enemies[0].health, 85.0);
        assert_eq!(state.enemies[1].health, 100.0);
    }

    #[test]
    fn test_piercing_projectile_hits_each_overlap() {
        let (mut state, mut roster, mut rng) = setup();
        state.add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(200.0, 0.0)));
        state.add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(205.0, 0.0)));
        state.add_projectile(
            Projectile::new(Owner::Player, Vec2::new(200.0, 0.0), Vec2::ZERO, 10.0).with_pierce(Pierce::Unlimited),
        );
        update(&mut state, &mut roster, &mut rng, 0.016);
        update(&mut state, &mut roster, &mut rng, 0.016);
        assert_eq!(state.enemies[0].health, 90.0);
        assert_eq!(state.enemies[1].health, 90.0);
        assert!(state.projectiles[0].alive);
    }

    #[test]
    fn test_fireball_blast_includes_direct_target() {
        let (mut state, mut roster, mut rng) = setup();
        state.add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(200.0, 0.0)));
        state.add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(260.0, 0.0)));
        state.add_projectile(
            Projectile::fired_by(WeaponKind::FireBall, Vec2::new(200.0, 0.0), 0.0, 0.0, 40.0)
                .with_on_hit(OnHit::Explode { radius: 80.0 }),
        );
        let report = update(&mut state, &mut roster, &mut rng, 0.016);
        assert_eq!(state.enemies[0].health, 20.0);
        assert_eq!(state.enemies[1].health, 60.0);
        assert_eq!(report.damage_dealt, 120.0);
    }

    #[test]
    fn test_contact_damage_respects_invincibility() {
        let (mut state, mut roster, mut rng) = setup();
        state.add_enemy(Enemy::new(EnemyKind::Basic, Vec2::new(10.0, 0.0)));
        state.add_enemy(Enemy::new(EnemyKind::Basic, Vec2::new(-10.0, 0.0)));
        let report = update(&mut state, &mut roster, &mut rng, 0.016);
        assert_eq!(report.damage_taken, 10.0);
        assert_eq!(state.player.health, 90.0);
    }

    #[test]
    fn test_shield_reflects_contact_damage() {
        let (mut state, mut roster, mut rng) = setup();
        roster.add_kind(WeaponKind::Shield).ok();
        state.add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(10.0, 0.0)));
        let report = update(&mut state, &mut roster, &mut rng, 0.016);
        assert_eq!(report.damage_taken, 20.0);
        assert!((report.reflected - 4.0).abs() < 1e-4);
        assert!((state.enemies[0].health - 96.0).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_shot_consumed_and_attributed() {
        let (mut state, mut roster, mut rng) = setup();
        roster.add_kind(WeaponKind::Shield).ok();
        let shooter = state.add_enemy(Enemy::new(EnemyKind::Shooter, Vec2::new(250.0, 0.0)));
        state.add_projectile(Projectile::new(Owner::Enemy(shooter), Vec2::ZERO, Vec2::ZERO, 8.0));
        state.add_projectile(Projectile::new(Owner::Enemy(shooter), Vec2::ZERO, Vec2::ZERO, 8.0));

        let report = update(&mut state, &mut roster, &mut rng, 0.016);
        assert_eq!(report.damage_taken, 8.0);
        assert!(state.projectiles.iter().all(|p| !p.alive));
        assert!(state.enemies[0].health < state.enemies[0].max_health);
    }

    #[test]
    fn test_magnet_then_collect() {
        let (mut state, mut roster, mut rng) = setup();
        state.add_pickup(Pickup::health_pack(Vec2::new(60.0, 0.0), 20.0));
        state.add_pickup(Pickup::chest(Vec2::new(60.0, 0.0)));
        state.player.health = 50.0;

        // Pack is pulled in at 200/s; the chest stays put
        for _ in 0..10 {
            update(&mut state, &mut roster, &mut rng, 0.05);
        }
        assert!(!state.pickups[0].alive);
        assert_eq!(state.player.health, 70.0);
        assert!(state.pickups[1].alive);
        assert_eq!(state.pickups[1].position, Vec2::new(60.0, 0.0));
    }
}

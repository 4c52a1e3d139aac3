//! Enemy actors: per-kind stat table, homing movement, debuffs and the
//! shooter's ranged sub-behaviour

use serde::{Deserialize, Serialize};

use crate::game::constants::enemy as consts;
use crate::game::state::EntityId;
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Shooter,
    Boss,
}

/// Unscaled stats for one enemy kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
    pub exp_value: u32,
    pub radius: f32,
}

impl EnemyKind {
    pub fn base_stats(&self) -> EnemyStats {
        let (health, speed, damage, exp_value, radius) = match self {
            EnemyKind::Basic => (20.0, 50.0, 10.0, 5, 15.0),
            EnemyKind::Fast => (10.0, 120.0, 5.0, 3, 12.0),
            EnemyKind::Tank => (100.0, 30.0, 20.0, 15, 25.0),
            EnemyKind::Shooter => (15.0, 40.0, 8.0, 8, 14.0),
            EnemyKind::Boss => (500.0, 40.0, 30.0, 100, 40.0),
        };
        EnemyStats {
            health,
            speed,
            damage,
            exp_value,
            radius,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, EnemyKind::Boss)
    }

    pub fn has_ranged_attack(&self) -> bool {
        matches!(self, EnemyKind::Shooter)
    }
}

/// Magnitude + remaining duration for slow and defense debuffs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedDebuff {
    pub amount: f32,
    pub remaining: f32,
}

impl TimedDebuff {
    fn active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Keep the stronger magnitude and the longer duration
    fn merge(&mut self, amount: f32, duration: f32) {
        if !self.active() {
            self.amount = amount;
        } else {
            self.amount = self.amount.max(amount);
        }
        self.remaining = self.remaining.max(duration);
    }

    fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
            if self.remaining == 0.0 {
                self.amount = 0.0;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Poison {
    /// Damage per tick
    pub damage: f32,
    pub remaining: f32,
    tick_timer: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Debuffs {
    /// Movement speed multiplier is (1 - amount)
    pub slow: TimedDebuff,
    /// Remaining stun; stunned enemies neither move nor fire
    pub stun: f32,
    pub poison: Poison,
    /// Incoming damage multiplier is (1 + amount)
    pub defense_down: TimedDebuff,
}

/// Request for the orchestrator to spawn a hostile projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireIntent {
    pub shooter: EntityId,
    pub origin: Vec2,
    pub direction: Vec2,
    pub damage: f32,
}

/// Result of one enemy update
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyTick {
    pub fire: Option<FireIntent>,
    /// Health removed by poison this tick
    pub poison_damage: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    /// Contact damage (also used for shooter shots)
    pub damage: f32,
    pub exp_value: u32,
    pub alive: bool,
    pub debuffs: Debuffs,
    fire_timer: f32,
}

impl Enemy {
    /// Build an enemy with unscaled stats; the id is assigned on insertion
    pub fn new(kind: EnemyKind, position: Vec2) -> Self {
        let stats = kind.base_stats();
        Self {
            id: 0,
            kind,
            position,
            radius: stats.radius,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
            exp_value: stats.exp_value,
            alive: true,
            debuffs: Debuffs::default(),
            fire_timer: 0.0,
        }
    }

    /// Advance debuffs, movement toward the player and the ranged timer
    pub fn update(&mut self, dt: f32, player_pos: Vec2) -> EnemyTick {
        let mut tick = EnemyTick::default();
        if !self.alive {
            return tick;
        }

        tick.poison_damage = self.tick_debuffs(dt);
        if !self.alive {
            return tick;
        }

        if self.debuffs.stun > 0.0 {
            return tick;
        }

        let to_player = player_pos - self.position;
        let distance = to_player.length();
        if distance > 0.0 {
            let step = self.current_speed() * dt;
            self.position = self.position.move_towards(player_pos, step);
        }

        if self.kind.has_ranged_attack() {
            self.fire_timer -= dt;
            if self.fire_timer <= 0.0 && distance < consts::SHOOTER_RANGE {
                self.fire_timer = consts::SHOOTER_FIRE_INTERVAL;
                tick.fire = Some(FireIntent {
                    shooter: self.id,
                    origin: self.position,
                    direction: self.position.direction_to(player_pos),
                    damage: self.damage,
                });
            }
        }

        tick
    }

    fn tick_debuffs(&mut self, dt: f32) -> f32 {
        self.debuffs.slow.tick(dt);
        self.debuffs.defense_down.tick(dt);
        if self.debuffs.stun > 0.0 {
            self.debuffs.stun = (self.debuffs.stun - dt).max(0.0);
        }

        let mut dealt = 0.0;
        let poison = &mut self.debuffs.poison;
        if poison.remaining > 0.0 {
            let step = dt.min(poison.remaining);
            poison.remaining -= step;
            poison.tick_timer += step;
            let mut ticks = 0;
            while poison.tick_timer >= consts::POISON_TICK {
                poison.tick_timer -= consts::POISON_TICK;
                ticks += 1;
            }
            let damage = poison.damage;
            if poison.remaining <= 0.0 {
                *poison = Poison::default();
            }
            for _ in 0..ticks {
                dealt += self.take_damage(damage);
            }
        }
        dealt
    }

    /// Speed after slow
    pub fn current_speed(&self) -> f32 {
        if self.debuffs.slow.active() {
            self.speed * (1.0 - self.debuffs.slow.amount).max(0.0)
        } else {
            self.speed
        }
    }

    /// Apply damage (amplified by defense reduction), returning health removed
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        if !self.alive || amount <= 0.0 {
            return 0.0;
        }
        let mut amount = amount;
        if self.debuffs.defense_down.active() {
            amount *= 1.0 + self.debuffs.defense_down.amount;
        }
        let applied = amount.min(self.health);
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
        }
        applied
    }

    /// Remove outright, bypassing damage modifiers
    pub fn kill(&mut self) {
        self.health = 0.0;
        self.alive = false;
    }

    pub fn apply_slow(&mut self, amount: f32, duration: f32) {
        self.debuffs.slow.merge(amount.clamp(0.0, 1.0), duration);
    }

    pub fn apply_stun(&mut self, duration: f32) {
        self.debuffs.stun = self.debuffs.stun.max(duration);
    }

    pub fn apply_poison(&mut self, damage: f32, duration: f32) {
        let poison = &mut self.debuffs.poison;
        poison.damage = if poison.remaining > 0.0 {
            poison.damage.max(damage)
        } else {
            damage
        };
        poison.remaining = poison.remaining.max(duration);
    }

    pub fn apply_defense_down(&mut self, amount: f32, duration: f32) {
        self.debuffs.defense_down.merge(amount, duration);
    }

    pub fn is_slowed(&self) -> bool {
        self.debuffs.slow.active()
    }

    pub fn is_stunned(&self) -> bool {
        self.debuffs.stun > 0.0
    }

    pub fn is_poisoned(&self) -> bool {
        self.debuffs.poison.remaining > 0.0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

/// Index of the closest living enemy to `pos`
pub fn nearest_enemy(enemies: &[Enemy], pos: Vec2) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive)
        .min_by(|(_, a), (_, b)| {
            a.position
                .distance_sq_to(pos)
                .total_cmp(&b.position.distance_sq_to(pos))
        })
        .map(|(i, _)| i)
}

/// Indices of the `count` closest living enemies, nearest first
pub fn nearest_enemies(enemies: &[Enemy], pos: Vec2, count: usize) -> Vec<usize> {
    let mut living: Vec<(usize, f32)> = enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive)
        .map(|(i, e)| (i, e.position.distance_sq_to(pos)))
        .collect();
    living.sort_by(|a, b| a.1.total_cmp(&b.1));
    living.into_iter().take(count).map(|(i, _)| i).collect()
}

/// Indices of living enemies within `radius` of `pos` (circle centres)
pub fn enemies_within(enemies: &[Enemy], pos: Vec2, radius: f32) -> Vec<usize> {
    let r2 = radius * radius;
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive && e.position.distance_sq_to(pos) < r2)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_stat_table() {
        let tank = EnemyKind::Tank.base_stats();
        assert_eq!(tank.health, 100.0);
        assert_eq!(tank.speed, 30.0);
        assert_eq!(tank.exp_value, 15);
        assert_eq!(EnemyKind::Boss.base_stats().radius, 40.0);
        assert!(EnemyKind::Boss.is_boss());
        assert!(EnemyKind::Shooter.has_ranged_attack());
    }

    #[test]
    fn test_moves_toward_player() {
        let mut enemy = Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 0.0));
        enemy.update(1.0, Vec2::ZERO);
        assert!(approx_eq(enemy.position.x, 50.0));
        assert!(approx_eq(enemy.position.y, 0.0));
    }

    #[test]
    fn test_take_damage_kills_once() {
        let mut enemy = Enemy::new(EnemyKind::Basic, Vec2::ZERO);
        assert_eq!(enemy.take_damage(15.0), 15.0);
        assert!(enemy.alive);
        assert_eq!(enemy.take_damage(15.0), 5.0);
        assert!(!enemy.alive);
        assert_eq!(enemy.health, 0.0);
        // Dead enemies are inert
        assert_eq!(enemy.take_damage(15.0), 0.0);
        let before = enemy.position;
        enemy.update(1.0, Vec2::new(500.0, 0.0));
        assert_eq!(enemy.position, before);
    }

    #[test]
    fn test_slow_and_stun() {
        let mut enemy = Enemy::new(EnemyKind::Basic, Vec2::new(100.0, 0.0));
        enemy.apply_slow(0.5, 2.0);
        enemy.update(1.0, Vec2::ZERO);
        assert!(approx_eq(enemy.position.x, 75.0));

        enemy.apply_stun(1.0);
        enemy.update(0.5, Vec2::ZERO);
        assert!(approx_eq(enemy.position.x, 75.0));
        assert!(enemy.is_stunned());
    }

    #[test]
    fn test_slow_keeps_stronger_amount() {
        let mut enemy = Enemy::new(EnemyKind::Fast, Vec2::ZERO);
        enemy.apply_slow(0.8, 1.0);
        enemy.apply_slow(0.5, 3.0);
        assert!(approx_eq(enemy.current_speed(), 120.0 * 0.2));
        enemy.update(3.5, Vec2::new(1000.0, 0.0));
        assert!(!enemy.is_slowed());
        assert_eq!(enemy.current_speed(), 120.0);
    }

    #[test]
    fn test_poison_ticks_each_second() {
        let mut enemy = Enemy::new(EnemyKind::Tank, Vec2::ZERO);
        enemy.apply_poison(5.0, 3.0);
        let mut dealt = 0.0;
        for _ in 0..16 {
            dealt += enemy.update(0.25, Vec2::ZERO).poison_damage;
        }
        assert!(approx_eq(dealt, 15.0));
        assert!(approx_eq(enemy.health, 85.0));
        assert!(!enemy.is_poisoned());
    }

    #[test]
    fn test_defense_down_amplifies_damage() {
        let mut enemy = Enemy::new(EnemyKind::Tank, Vec2::ZERO);
        enemy.apply_defense_down(0.3, 3.0);
        assert!(approx_eq(enemy.take_damage(10.0), 13.0));
    }

    #[test]
    fn test_shooter_fires_in_range() {
        let mut shooter = Enemy::new(EnemyKind::Shooter, Vec2::new(200.0, 0.0));
        shooter.id = 7;
        let tick = shooter.update(0.016, Vec2::ZERO);
        let fire = tick.fire.expect("shooter should fire when in range");
        assert_eq!(fire.shooter, 7);
        assert!(fire.direction.approx_eq(Vec2::LEFT, 1e-5));
        assert_eq!(fire.damage, 8.0);

        // Interval gates the next shot
        assert!(shooter.update(0.016, Vec2::ZERO).fire.is_none());
    }

    #[test]
    fn test_shooter_holds_fire_out_of_range() {
        let mut shooter = Enemy::new(EnemyKind::Shooter, Vec2::new(1000.0, 0.0));
        assert!(shooter.update(0.016, Vec2::ZERO).fire.is_none());
    }

    #[test]
    fn test_nearest_queries_skip_dead() {
        let mut enemies = vec![
            Enemy::new(EnemyKind::Basic, Vec2::new(10.0, 0.0)),
            Enemy::new(EnemyKind::Basic, Vec2::new(50.0, 0.0)),
            Enemy::new(EnemyKind::Basic, Vec2::new(30.0, 0.0)),
        ];
        enemies[0].kill();
        assert_eq!(nearest_enemy(&enemies, Vec2::ZERO), Some(2));
        assert_eq!(nearest_enemies(&enemies, Vec2::ZERO, 5), vec![2, 1]);
        assert_eq!(enemies_within(&enemies, Vec2::ZERO, 40.0), vec![2]);
        assert_eq!(nearest_enemy(&[], Vec2::ZERO), None);
    }
}

//! Enemy spawning and the difficulty curve
//!
//! Three independent timers: normal spawns, difficulty steps and bosses.
//! New enemies are pushed into the spawn queue, never inserted directly.

use rand::Rng;
use std::f32::consts::TAU;
use tracing::{debug, info};

use crate::game::constants::spawner::*;
use crate::game::enemy::{Enemy, EnemyKind};
use crate::game::state::SpawnQueue;
use crate::util::vec2::Vec2;

/// What the spawner did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub spawned: u32,
    pub boss_spawned: bool,
    pub difficulty_increased: bool,
}

#[derive(Debug, Clone)]
pub struct Spawner {
    spawn_timer: f32,
    spawn_interval: f32,
    difficulty_timer: f32,
    difficulty_level: u32,
    boss_timer: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            spawn_timer: 0.0,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            difficulty_timer: 0.0,
            difficulty_level: 1,
            boss_timer: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn difficulty_level(&self) -> u32 {
        self.difficulty_level
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    /// Advance all three timers around `player_pos`
    pub fn update<R: Rng>(&mut self, dt: f32, player_pos: Vec2, spawns: &mut SpawnQueue, rng: &mut R) -> SpawnReport {
        let mut report = SpawnReport::default();
        self.spawn_timer += dt;
        self.difficulty_timer += dt;
        self.boss_timer += dt;

        if self.difficulty_timer >= DIFFICULTY_INTERVAL {
            self.difficulty_timer = 0.0;
            self.difficulty_level += 1;
            self.spawn_interval = (self.spawn_interval - SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
            report.difficulty_increased = true;
            info!(
                "Difficulty increased to {} (spawn interval {:.1}s)",
                self.difficulty_level, self.spawn_interval
            );
        }

        if self.boss_timer >= BOSS_INTERVAL {
            self.boss_timer = 0.0;
            let pos = ring_point(rng, player_pos);
            spawns.enemy(scaled_boss(pos, self.difficulty_level));
            report.boss_spawned = true;
            info!("Boss spawned at difficulty {}", self.difficulty_level);
        }

        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0.0;
            let count = batch_size(self.difficulty_level);
            for _ in 0..count {
                let pos = ring_point(rng, player_pos);
                let kind = enemy_kind_for_roll(rng.gen::<f32>(), self.difficulty_level);
                spawns.enemy(scaled_enemy(kind, pos, self.difficulty_level));
            }
            report.spawned = count;
            debug!("Spawned batch of {} at difficulty {}", count, self.difficulty_level);
        }

        report
    }
}

/// Enemies per normal spawn tick
pub fn batch_size(difficulty_level: u32) -> u32 {
    (1 + difficulty_level / 3).min(MAX_BATCH)
}

/// Shooter unlock factor, `min(level / 10, 1)`
pub fn difficulty_factor(difficulty_level: u32) -> f32 {
    (difficulty_level as f32 / 10.0).min(1.0)
}

/// Map a uniform roll in [0, 1) onto the cumulative kind bands
pub fn enemy_kind_for_roll(roll: f32, difficulty_level: u32) -> EnemyKind {
    if roll < BASIC_BAND {
        EnemyKind::Basic
    } else if roll < FAST_BAND {
        EnemyKind::Fast
    } else if roll < TANK_BAND {
        EnemyKind::Tank
    } else if difficulty_factor(difficulty_level) > SHOOTER_UNLOCK {
        EnemyKind::Shooter
    } else {
        EnemyKind::Basic
    }
}

/// Normal enemy with stats scaled by difficulty
pub fn scaled_enemy(kind: EnemyKind, position: Vec2, difficulty_level: u32) -> Enemy {
    let level = difficulty_level as f32;
    let mut enemy = Enemy::new(kind, position);
    enemy.max_health *= 1.0 + level * HEALTH_RATE;
    enemy.health = enemy.max_health;
    enemy.damage *= 1.0 + level * DAMAGE_RATE;
    enemy.exp_value = (enemy.exp_value as f32 * (1.0 + level * EXP_RATE)).floor() as u32;
    enemy
}

/// Boss health scales with the full level, damage with a fractional rate
pub fn scaled_boss(position: Vec2, difficulty_level: u32) -> Enemy {
    let level = difficulty_level as f32;
    let mut boss = Enemy::new(EnemyKind::Boss, position);
    boss.max_health *= level;
    boss.health = boss.max_health;
    boss.damage *= 1.0 + level * BOSS_DAMAGE_RATE;
    boss
}

fn ring_point<R: Rng>(rng: &mut R, center: Vec2) -> Vec2 {
    center + Vec2::from_angle(rng.gen_range(0.0..TAU)) * SPAWN_DISTANCE
}

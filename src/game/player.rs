//! Player actor: movement, derived stats and the damage-immunity window

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_1_SQRT_2;

use crate::game::constants::player as consts;
use crate::game::input_buffer::Intent;
use crate::util::vec2::Vec2;

/// Passive stat a level-up reward (or item) can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassiveStat {
    MoveSpeed,
    MaxHealth,
    Damage,
    Cooldown,
    AreaSize,
    Magnet,
}

impl PassiveStat {
    pub const ALL: [PassiveStat; 6] = [
        PassiveStat::MoveSpeed,
        PassiveStat::MaxHealth,
        PassiveStat::Damage,
        PassiveStat::Cooldown,
        PassiveStat::AreaSize,
        PassiveStat::Magnet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PassiveStat::MoveSpeed => "moveSpeed",
            PassiveStat::MaxHealth => "maxHealth",
            PassiveStat::Damage => "damage",
            PassiveStat::Cooldown => "cooldown",
            PassiveStat::AreaSize => "areaSize",
            PassiveStat::Magnet => "magnet",
        }
    }

    /// Lookup by wire name; unknown names yield None
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }

    /// Amount granted by one level-up reward
    pub fn reward_amount(&self) -> f32 {
        match self {
            PassiveStat::MoveSpeed => 0.1,
            PassiveStat::MaxHealth => 20.0,
            PassiveStat::Damage => 0.1,
            PassiveStat::Cooldown => 0.05,
            PassiveStat::AreaSize => 0.1,
            PassiveStat::Magnet => 30.0,
        }
    }
}

/// Accumulated passive bonuses
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Bonuses {
    pub move_speed: f32,
    pub max_health: f32,
    pub damage: f32,
    pub cooldown_reduction: f32,
    pub area_size: f32,
    pub magnet: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub radius: f32,
    pub health: f32,
    /// Remaining immunity (seconds); > 0 means damage is ignored
    pub invincibility: f32,
    /// Last nonzero movement direction (unit length)
    facing: Vec2,
    bonuses: Bonuses,
    // Derived from base stats + bonuses, only written by recompute()
    max_health: f32,
    speed: f32,
    damage: f32,
    magnet_range: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        let mut player = Self {
            position,
            radius: consts::RADIUS,
            health: consts::BASE_MAX_HEALTH,
            invincibility: 0.0,
            facing: Vec2::RIGHT,
            bonuses: Bonuses::default(),
            max_health: consts::BASE_MAX_HEALTH,
            speed: consts::BASE_SPEED,
            damage: consts::BASE_DAMAGE,
            magnet_range: consts::BASE_MAGNET_RANGE,
        };
        player.recompute();
        player
    }

    /// Advance movement and the invincibility countdown
    pub fn update(&mut self, dt: f32, intent: Intent) {
        let dt = dt.max(0.0);
        let mut dir = Vec2::ZERO;
        if intent.up {
            dir.y -= 1.0;
        }
        if intent.down {
            dir.y += 1.0;
        }
        if intent.left {
            dir.x -= 1.0;
        }
        if intent.right {
            dir.x += 1.0;
        }

        if dir.x != 0.0 && dir.y != 0.0 {
            dir *= FRAC_1_SQRT_2;
        }

        if !dir.is_zero(f32::EPSILON) {
            self.position += dir * (self.speed * dt);
            self.facing = dir.normalize();
        }

        if self.invincibility > 0.0 {
            self.invincibility = (self.invincibility - dt).max(0.0);
        }
    }

    /// Apply incoming damage, returning the amount actually taken
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        if self.is_invincible() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health - amount).max(0.0);
        self.invincibility = consts::INVINCIBILITY_DURATION;
        before - self.health
    }

    /// Heal up to max health, returning the amount restored
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    pub fn add_passive(&mut self, stat: PassiveStat, value: f32) {
        match stat {
            PassiveStat::MoveSpeed => self.bonuses.move_speed += value,
            PassiveStat::MaxHealth => self.bonuses.max_health += value,
            PassiveStat::Damage => self.bonuses.damage += value,
            PassiveStat::Cooldown => self.bonuses.cooldown_reduction += value,
            PassiveStat::AreaSize => self.bonuses.area_size += value,
            PassiveStat::Magnet => self.bonuses.magnet += value,
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.max_health = (consts::BASE_MAX_HEALTH + self.bonuses.max_health).max(1.0);
        self.speed = consts::BASE_SPEED * (1.0 + self.bonuses.move_speed).max(0.0);
        self.damage = consts::BASE_DAMAGE * (1.0 + self.bonuses.damage);
        self.magnet_range = (consts::BASE_MAGNET_RANGE + self.bonuses.magnet).max(0.0);
        self.health = self.health.clamp(0.0, self.max_health);
    }

    /// Extend immunity to at least `duration` seconds
    pub fn grant_invincibility(&mut self, duration: f32) {
        self.invincibility = self.invincibility.max(duration);
    }

    /// Teleport along a direction (used by dash)
    pub fn displace(&mut self, offset: Vec2) {
        self.position += offset;
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn facing_angle(&self) -> f32 {
        self.facing.angle()
    }

    pub fn bonuses(&self) -> &Bonuses {
        &self.bonuses
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn magnet_range(&self) -> f32 {
        self.magnet_range
    }

    /// Multiplier applied to every weapon's damage
    #[inline]
    pub fn damage_multiplier(&self) -> f32 {
        1.0 + self.bonuses.damage
    }

    /// Multiplier applied to area radii
    #[inline]
    pub fn area_multiplier(&self) -> f32 {
        1.0 + self.bonuses.area_size
    }

    /// Factor applied to weapon cooldowns on reset
    #[inline]
    pub fn cooldown_factor(&self) -> f32 {
        (1.0 - self.bonuses.cooldown_reduction).max(consts::MIN_COOLDOWN_FACTOR)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn intent(up: bool, down: bool, left: bool, right: bool) -> Intent {
        Intent {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_invincibility_window_blocks_second_hit() {
        let mut player = Player::default();
        assert_eq!(player.health, 100.0);
        assert_eq!(player.max_health(), 100.0);

        assert_eq!(player.take_damage(30.0), 30.0);
        assert_eq!(player.health, 70.0);

        player.update(0.5, Intent::default());
        assert_eq!(player.take_damage(30.0), 0.0);
        assert_eq!(player.health, 70.0);

        player.update(0.6, Intent::default());
        assert!(!player.is_invincible());
        player.take_damage(30.0);
        assert_eq!(player.health, 40.0);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut player = Player::default();
        assert_eq!(player.take_damage(250.0), 100.0);
        assert_eq!(player.health, 0.0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut player = Player::default();
        player.take_damage(10.0);
        assert_eq!(player.heal(50.0), 10.0);
        assert_eq!(player.health, player.max_health());
    }

    #[test]
    fn test_diagonal_movement_preserves_speed() {
        let mut player = Player::default();
        player.update(1.0, intent(true, false, false, true));
        assert!(approx_eq(player.position.length(), 150.0));
        assert!(approx_eq(player.position.x, 150.0 * FRAC_1_SQRT_2));
        assert!(approx_eq(player.position.y, -150.0 * FRAC_1_SQRT_2));
    }

    #[test]
    fn test_facing_persists_when_idle() {
        let mut player = Player::default();
        assert_eq!(player.facing(), Vec2::RIGHT);
        player.update(0.1, intent(false, true, false, false));
        assert!(player.facing().approx_eq(Vec2::DOWN, 1e-6));
        player.update(0.1, Intent::default());
        assert!(player.facing().approx_eq(Vec2::DOWN, 1e-6));
        // Opposing keys cancel and keep the previous facing
        player.update(0.1, intent(true, true, false, false));
        assert!(player.facing().approx_eq(Vec2::DOWN, 1e-6));
    }

    #[test]
    fn test_passive_bonuses_recompute_derived_stats() {
        let mut player = Player::default();
        player.add_passive(PassiveStat::MaxHealth, 20.0);
        player.add_passive(PassiveStat::MoveSpeed, 0.1);
        player.add_passive(PassiveStat::Damage, 0.5);
        player.add_passive(PassiveStat::Magnet, 30.0);

        assert_eq!(player.max_health(), 120.0);
        assert!(approx_eq(player.speed(), 165.0));
        assert!(approx_eq(player.damage(), 15.0));
        assert!(approx_eq(player.damage_multiplier(), 1.5));
        assert_eq!(player.magnet_range(), 130.0);
        // Raising max health does not refill current health
        assert_eq!(player.health, 100.0);
    }

    #[test]
    fn test_recompute_clamps_health_when_max_drops() {
        let mut player = Player::default();
        player.add_passive(PassiveStat::MaxHealth, 50.0);
        player.heal(50.0);
        assert_eq!(player.health, 150.0);
        player.add_passive(PassiveStat::MaxHealth, -50.0);
        assert_eq!(player.health, 100.0);
    }

    #[test]
    fn test_cooldown_factor_has_floor() {
        let mut player = Player::default();
        player.add_passive(PassiveStat::Cooldown, 0.25);
        assert!(approx_eq(player.cooldown_factor(), 0.75));
        player.add_passive(PassiveStat::Cooldown, 5.0);
        assert!(approx_eq(player.cooldown_factor(), consts::MIN_COOLDOWN_FACTOR));
    }

    #[test]
    fn test_health_stays_in_bounds_over_many_updates() {
        let mut player = Player::default();
        for i in 0..500 {
            let dt = (i % 7) as f32 * 0.03;
            player.update(dt, intent(i % 2 == 0, false, i % 3 == 0, false));
            if i % 5 == 0 {
                player.take_damage(13.0);
            }
            if i % 11 == 0 {
                player.heal(40.0);
            }
            assert!(player.health >= 0.0 && player.health <= player.max_health());
        }
    }

    #[test]
    fn test_grant_invincibility_keeps_longer_window() {
        let mut player = Player::default();
        player.take_damage(5.0);
        player.grant_invincibility(0.2);
        assert_eq!(player.invincibility, consts::INVINCIBILITY_DURATION);
    }

    #[test]
    fn test_passive_stat_names() {
        for stat in PassiveStat::ALL {
            assert_eq!(PassiveStat::from_name(stat.name()), Some(stat));
        }
        assert_eq!(PassiveStat::from_name("luck"), None);
    }
}

//! Player-triggered skills: Dash and Bomb

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::constants::skills::*;
use crate::game::enemy::Enemy;
use crate::game::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    pub charges: u32,
    pub max_charges: u32,
    /// Progress toward the next charge, 0..1
    pub charge_progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BombState {
    pub ready: bool,
    /// Progress toward readiness, 0..1
    pub cooldown_progress: f32,
}

/// HUD view of both skills
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillSnapshot {
    pub dash: DashState,
    pub bomb: BombState,
}

#[derive(Debug, Clone)]
pub struct Skills {
    dash_charges: u32,
    dash_charge_timer: f32,
    /// Remaining active window of the current dash
    dash_active: f32,
    bomb_ready: bool,
    bomb_timer: f32,
}

impl Default for Skills {
    fn default() -> Self {
        Self::new()
    }
}

impl Skills {
    pub fn new() -> Self {
        Self {
            dash_charges: DASH_MAX_CHARGES,
            dash_charge_timer: 0.0,
            dash_active: 0.0,
            bomb_ready: true,
            bomb_timer: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Regenerate dash charges and count down the bomb
    pub fn update(&mut self, dt: f32) {
        self.dash_active = (self.dash_active - dt).max(0.0);

        if self.dash_charges < DASH_MAX_CHARGES {
            self.dash_charge_timer += dt;
            if self.dash_charge_timer >= DASH_RECHARGE {
                self.dash_charge_timer = 0.0;
                self.dash_charges += 1;
            }
        }

        if !self.bomb_ready {
            self.bomb_timer += dt;
            if self.bomb_timer >= BOMB_COOLDOWN {
                self.bomb_timer = 0.0;
                self.bomb_ready = true;
            }
        }
    }

    /// Dash along the facing direction. Fails with no charge or while a
    /// dash is still active.
    pub fn dash(&mut self, player: &mut Player) -> bool {
        if self.dash_charges == 0 || self.dash_active > 0.0 {
            return false;
        }
        self.dash_charges -= 1;
        self.dash_active = DASH_DURATION;
        player.displace(player.facing() * DASH_DISTANCE);
        player.grant_invincibility(DASH_DURATION);
        debug!("Dash used ({} charges left)", self.dash_charges);
        true
    }

    /// Kill every non-boss outright and hit bosses hard. Returns the
    /// number of enemies killed, or None while on cooldown.
    pub fn bomb(&mut self, enemies: &mut [Enemy]) -> Option<usize> {
        if !self.bomb_ready {
            return None;
        }
        self.bomb_ready = false;
        self.bomb_timer = 0.0;

        let mut killed = 0;
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            if enemy.kind.is_boss() {
                enemy.take_damage(BOMB_BOSS_DAMAGE);
            } else {
                enemy.kill();
            }
            if !enemy.alive {
                killed += 1;
            }
        }
        debug!("Bomb used, {} enemies killed", killed);
        Some(killed)
    }

    pub fn dash_charges(&self) -> u32 {
        self.dash_charges
    }

    pub fn bomb_ready(&self) -> bool {
        self.bomb_ready
    }

    pub fn snapshot(&self) -> SkillSnapshot {
        SkillSnapshot {
            dash: DashState {
                charges: self.dash_charges,
                max_charges: DASH_MAX_CHARGES,
                charge_progress: self.dash_charge_timer / DASH_RECHARGE,
            },
            bomb: BombState {
                ready: self.bomb_ready,
                cooldown_progress: self.bomb_timer / BOMB_COOLDOWN,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::EnemyKind;
    use crate::util::vec2::Vec2;

    #[test]
    fn test_dash_moves_along_facing_and_protects() {
        let mut skills = Skills::new();
        let mut player = Player::default();
        assert!(skills.dash(&mut player));
        assert_eq!(player.position, Vec2::new(DASH_DISTANCE, 0.0));
        assert!(player.is_invincible());
        assert_eq!(skills.dash_charges(), 1);
    }

    #[test]
    fn test_dash_blocked_while_active_and_when_empty() {
        let mut skills = Skills::new();
        let mut player = Player::default();
        assert!(skills.dash(&mut player));
        assert!(!skills.dash(&mut player));

        skills.update(0.25);
        assert!(skills.dash(&mut player));
        skills.update(0.25);
        assert_eq!(skills.dash_charges(), 0);
        assert!(!skills.dash(&mut player));
    }

    #[test]
    fn test_dash_recharges_one_at_a_time() {
        let mut skills = Skills::new();
        let mut player = Player::default();
        skills.dash(&mut player);
        skills.update(0.5);
        skills.dash(&mut player);
        assert_eq!(skills.dash_charges(), 0);

        for _ in 0..12 {
            skills.update(0.25);
        }
        assert_eq!(skills.dash_charges(), 1);
        for _ in 0..12 {
            skills.update(0.25);
        }
        assert_eq!(skills.dash_charges(), 2);
        assert_eq!(skills.snapshot().dash.charge_progress, 0.0);
    }

    #[test]
    fn test_bomb_clears_field_and_cools_down() {
        let mut skills = Skills::new();
        let mut enemies = vec![
            Enemy::new(EnemyKind::Tank, Vec2::ZERO),
            Enemy::new(EnemyKind::Basic, Vec2::ZERO),
            Enemy::new(EnemyKind::Boss, Vec2::ZERO),
        ];
        enemies[2].max_health = 2000.0;
        enemies[2].health = 2000.0;

        assert_eq!(skills.bomb(&mut enemies), Some(2));
        assert!(!enemies[0].alive && !enemies[1].alive);
        assert!(enemies[2].alive);
        assert_eq!(enemies[2].health, 1500.0);

        assert_eq!(skills.bomb(&mut enemies), None);
        for _ in 0..240 {
            skills.update(0.25);
        }
        assert!(skills.bomb_ready());
    }
}

//! Ballistic projectile primitive shared by every projectile weapon and by
//! enemy shooters

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::game::constants::enemy as enemy_consts;
use crate::game::enemy::{nearest_enemy, Enemy, FireIntent};
use crate::game::state::EntityId;
use crate::game::weapons::WeaponKind;
use crate::util::vec2::Vec2;

/// Boomerangs despawn once they are back within this distance of their origin
const BOOMERANG_CATCH_RADIUS: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    /// Hostile shot fired by the enemy with this id
    Enemy(EntityId),
}

/// How many distinct enemies a projectile may pass through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pierce {
    /// Dies on the first hit
    None,
    /// Survives this many distinct hits, dies on the next one
    Limited(u32),
    Unlimited,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Linear,
    /// Steers toward a tracked enemy, re-acquiring the nearest if it dies
    Homing {
        target: Option<EntityId>,
        speed: f32,
        turn_rate: f32,
    },
    /// Flies out to `max_distance`, then back to where it was thrown
    Boomerang {
        origin: Vec2,
        direction: Vec2,
        travelled: f32,
        max_distance: f32,
        speed: f32,
        returning: bool,
    },
}

/// Side effect applied to each enemy the projectile hits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OnHit {
    None,
    Slow { amount: f32, duration: f32 },
    /// Damage per poison tick for `duration` seconds
    Poison { damage: f32, duration: f32 },
    /// Area damage on hit or on expiry (whichever comes first)
    Explode { radius: f32 },
}

/// Area damage released by an exploding projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blast {
    pub position: Vec2,
    pub radius: f32,
    pub damage: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub owner: Owner,
    /// Weapon that fired it (None for enemy shots)
    pub source: Option<WeaponKind>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub damage: f32,
    pub radius: f32,
    pub lifetime: f32,
    pub age: f32,
    pub alive: bool,
    pub pierce: Pierce,
    pub motion: Motion,
    pub on_hit: OnHit,
    /// Visual spin (radians per second)
    pub spin: f32,
    pub rotation: f32,
    /// Set on copies made by Clone so they are never echoed again
    pub echo: bool,
    pierce_count: u32,
    /// Enemy id -> projectile age at the last registered hit
    hits: HashMap<EntityId, f32>,
    /// When set, the same enemy may be hit again after this many seconds
    rehit_after: Option<f32>,
    exploded: bool,
}

impl Projectile {
    pub fn new(owner: Owner, position: Vec2, velocity: Vec2, damage: f32) -> Self {
        Self {
            id: 0,
            owner,
            source: None,
            position,
            velocity,
            damage,
            radius: 5.0,
            lifetime: 5.0,
            age: 0.0,
            alive: true,
            pierce: Pierce::None,
            motion: Motion::Linear,
            on_hit: OnHit::None,
            spin: 0.0,
            rotation: 0.0,
            echo: false,
            pierce_count: 0,
            hits: HashMap::new(),
            rehit_after: None,
            exploded: false,
        }
    }

    /// Player projectile fired by `weapon` along `angle`
    pub fn fired_by(weapon: WeaponKind, position: Vec2, angle: f32, speed: f32, damage: f32) -> Self {
        let mut p = Self::new(Owner::Player, position, Vec2::from_angle(angle) * speed, damage);
        p.source = Some(weapon);
        p
    }

    /// Hostile shot materialised from a shooter's fire intent
    pub fn enemy_shot(intent: &FireIntent) -> Self {
        Self::new(
            Owner::Enemy(intent.shooter),
            intent.origin,
            intent.direction * enemy_consts::SHOT_SPEED,
            intent.damage,
        )
        .with_radius(enemy_consts::SHOT_RADIUS)
        .with_lifetime(enemy_consts::SHOT_LIFETIME)
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_pierce(mut self, pierce: Pierce) -> Self {
        self.pierce = pierce;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_on_hit(mut self, on_hit: OnHit) -> Self {
        self.on_hit = on_hit;
        self
    }

    pub fn with_rehit(mut self, window: f32) -> Self {
        self.rehit_after = Some(window);
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    /// Integrate motion and age. Returns a blast if the projectile
    /// explodes on expiry.
    pub fn update(&mut self, dt: f32, enemies: &[Enemy]) -> Option<Blast> {
        if !self.alive {
            return None;
        }

        self.age += dt;
        self.rotation += self.spin * dt;

        if self.age >= self.lifetime {
            self.alive = false;
            return self.detonate();
        }

        match &mut self.motion {
            Motion::Linear => {
                self.position += self.velocity * dt;
            }
            Motion::Homing {
                target,
                speed,
                turn_rate,
            } => {
                let tracked = target
                    .and_then(|id| enemies.iter().find(|e| e.id == id && e.alive))
                    .or_else(|| nearest_enemy(enemies, self.position).map(|i| &enemies[i]));
                if let Some(enemy) = tracked {
                    *target = Some(enemy.id);
                    let desired = self.position.direction_to(enemy.position) * *speed;
                    let blend = (*turn_rate * dt).min(1.0);
                    self.velocity += (desired - self.velocity) * blend;
                }
                self.position += self.velocity * dt;
            }
            Motion::Boomerang {
                origin,
                direction,
                travelled,
                max_distance,
                speed,
                returning,
            } => {
                if !*returning {
                    *travelled += *speed * dt;
                    if *travelled >= *max_distance {
                        *returning = true;
                    }
                    self.velocity = *direction * *speed;
                    self.position = *origin + *direction * *travelled;
                } else {
                    if self.position.distance_to(*origin) < BOOMERANG_CATCH_RADIUS {
                        self.alive = false;
                        return None;
                    }
                    let next = self.position.move_towards(*origin, *speed * dt);
                    self.velocity = (next - self.position) * (1.0 / dt.max(f32::EPSILON));
                    self.position = next;
                }
            }
        }

        None
    }

    /// Register a hit on `enemy_id`. Returns true when damage should be
    /// applied; repeated hits on the same enemy are ignored unless the
    /// re-hit window has elapsed.
    pub fn try_hit(&mut self, enemy_id: EntityId) -> bool {
        if !self.alive {
            return false;
        }

        if let Some(last) = self.hits.get_mut(&enemy_id) {
            return match self.rehit_after {
                Some(window) if self.age - *last >= window => {
                    *last = self.age;
                    true
                }
                _ => false,
            };
        }

        self.hits.insert(enemy_id, self.age);
        match self.pierce {
            Pierce::None => self.alive = false,
            Pierce::Limited(max) => {
                self.pierce_count += 1;
                if self.pierce_count > max {
                    self.alive = false;
                }
            }
            Pierce::Unlimited => {}
        }
        true
    }

    /// Release the explosion once, if this projectile carries one
    pub fn detonate(&mut self) -> Option<Blast> {
        match self.on_hit {
            OnHit::Explode { radius } if !self.exploded => {
                self.exploded = true;
                self.alive = false;
                Some(Blast {
                    position: self.position,
                    radius,
                    damage: self.damage,
                })
            }
            _ => None,
        }
    }

    pub fn pierce_count(&self) -> u32 {
        self.pierce_count
    }

    pub fn has_hit(&self, enemy_id: EntityId) -> bool {
        self.hits.contains_key(&enemy_id)
    }

    #[inline]
    pub fn is_hostile(&self) -> bool {
        matches!(self.owner, Owner::Enemy(_))
    }

    /// Copy for the Clone passive: rotated velocity, scaled damage, fresh hit state
    pub fn echo_of(&self, angle_offset: f32, damage_multiplier: f32) -> Self {
        let mut copy = self.clone();
        copy.id = 0;
        copy.velocity = self.velocity.rotate(angle_offset);
        copy.damage = self.damage * damage_multiplier;
        copy.echo = true;
        copy.hits.clear();
        copy.pierce_count = 0;
        if let Motion::Boomerang { direction, .. } = &mut copy.motion {
            *direction = direction.rotate(angle_offset);
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::EnemyKind;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn bolt() -> Projectile {
        Projectile::new(Owner::Player, Vec2::ZERO, Vec2::new(100.0, 0.0), 10.0)
    }

    #[test]
    fn test_linear_motion_and_expiry() {
        let mut p = bolt().with_lifetime(1.0);
        p.update(0.5, &[]);
        assert!(approx_eq(p.position.x, 50.0));
        assert!(p.alive);
        p.update(0.5, &[]);
        assert!(!p.alive);
    }

    #[test]
    fn test_non_piercing_dies_on_first_hit() {
        let mut p = bolt();
        assert!(p.try_hit(1));
        assert!(!p.alive);
        assert!(!p.try_hit(2));
    }

    #[test]
    fn test_limited_pierce_survives_k_hits() {
        let mut p = bolt().with_pierce(Pierce::Limited(3));
        for id in 1..=3 {
            assert!(p.try_hit(id));
            assert!(p.alive, "should survive hit {}", id);
        }
        assert!(p.try_hit(4));
        assert!(!p.alive);
        assert_eq!(p.pierce_count(), 4);
    }

    #[test]
    fn test_same_enemy_never_double_counts() {
        let mut p = bolt().with_pierce(Pierce::Limited(2));
        assert!(p.try_hit(9));
        assert!(!p.try_hit(9));
        assert!(!p.try_hit(9));
        assert_eq!(p.pierce_count(), 1);
        assert!(p.alive);
    }

    #[test]
    fn test_rehit_window() {
        let mut p = bolt().with_pierce(Pierce::Unlimited).with_rehit(0.5);
        assert!(p.try_hit(3));
        p.update(0.25, &[]);
        assert!(!p.try_hit(3));
        p.update(0.25, &[]);
        assert!(p.try_hit(3));
    }

    #[test]
    fn test_explodes_once_on_expiry() {
        let mut p = bolt()
            .with_lifetime(0.5)
            .with_on_hit(OnHit::Explode { radius: 80.0 });
        assert!(p.update(0.25, &[]).is_none());
        let blast = p.update(0.25, &[]).expect("expiry should detonate");
        assert_eq!(blast.radius, 80.0);
        assert_eq!(blast.damage, 10.0);
        assert!(p.detonate().is_none());
    }

    #[test]
    fn test_homing_turns_toward_target() {
        let mut enemy = Enemy::new(EnemyKind::Basic, Vec2::new(0.0, 200.0));
        enemy.id = 5;
        let enemies = vec![enemy];
        let mut p = Projectile::new(Owner::Player, Vec2::ZERO, Vec2::ZERO, 35.0).with_motion(Motion::Homing {
            target: Some(5),
            speed: 200.0,
            turn_rate: 3.0,
        });
        for _ in 0..30 {
            p.update(1.0 / 30.0, &enemies);
        }
        assert!(p.position.y > 50.0);
        assert!(p.position.x.abs() < 1.0);
    }

    #[test]
    fn test_boomerang_returns_to_origin() {
        let mut p = Projectile::new(Owner::Player, Vec2::ZERO, Vec2::ZERO, 18.0)
            .with_lifetime(3.0)
            .with_motion(Motion::Boomerang {
                origin: Vec2::ZERO,
                direction: Vec2::RIGHT,
                travelled: 0.0,
                max_distance: 300.0,
                speed: 400.0,
                returning: false,
            });
        let mut furthest: f32 = 0.0;
        for _ in 0..120 {
            p.update(0.02, &[]);
            furthest = furthest.max(p.position.x);
            if !p.alive {
                break;
            }
        }
        assert!(!p.alive);
        assert!(furthest >= 300.0);
        assert!(p.position.length() < 25.0);
    }

    #[test]
    fn test_echo_resets_hit_state() {
        let mut p = bolt().with_pierce(Pierce::Limited(5));
        p.try_hit(1);
        let echo = p.echo_of(0.15, 0.5);
        assert!(echo.echo);
        assert_eq!(echo.damage, 5.0);
        assert!(!echo.has_hit(1));
        assert!(approx_eq(echo.velocity.length(), 100.0));
    }

    #[test]
    fn test_enemy_shot_shape() {
        let intent = FireIntent {
            shooter: 42,
            origin: Vec2::new(10.0, 0.0),
            direction: Vec2::LEFT,
            damage: 8.0,
        };
        let shot = Projectile::enemy_shot(&intent);
        assert!(shot.is_hostile());
        assert_eq!(shot.owner, Owner::Enemy(42));
        assert_eq!(shot.velocity, Vec2::new(-200.0, 0.0));
        assert_eq!(shot.radius, 5.0);
        assert_eq!(shot.lifetime, 3.0);
        assert_eq!(shot.damage, 8.0);
    }
}

//! Weapon-owned effect instances
//!
//! Every lingering weapon effect is one of a small set of tagged variants
//! sharing the same lifecycle: `advance` once per tick, then drop it when
//! `is_expired`. Weapons configure these with parameters instead of
//! carrying bespoke per-effect logic.

use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

use crate::game::state::EntityId;
use crate::game::weapons::WeaponContext;
use crate::util::vec2::Vec2;

/// Where a zone sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneAnchor {
    Fixed(Vec2),
    /// Follows the player at a fixed offset
    Player { direction: Vec2, distance: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneDamage {
    /// `damage` to everything inside once per `interval`
    Periodic { damage: f32, interval: f32, timer: f32 },
    /// Damage per second, applied every tick scaled by dt
    Continuous { dps: f32 },
}

/// Area damage released when a zone expires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub radius: f32,
    pub damage: f32,
}

/// Stationary (or player-anchored) area with tick damage
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub anchor: ZoneAnchor,
    pub center: Vec2,
    pub radius: f32,
    pub damage: ZoneDamage,
    pub age: f32,
    pub duration: f32,
    pub burst: Option<Burst>,
}

impl Zone {
    pub fn fixed(center: Vec2, radius: f32, damage: ZoneDamage, duration: f32) -> Self {
        Self {
            anchor: ZoneAnchor::Fixed(center),
            center,
            radius,
            damage,
            age: 0.0,
            duration,
            burst: None,
        }
    }

    pub fn anchored(direction: Vec2, distance: f32, radius: f32, damage: ZoneDamage, duration: f32) -> Self {
        Self {
            anchor: ZoneAnchor::Player { direction, distance },
            center: Vec2::ZERO,
            radius,
            damage,
            age: 0.0,
            duration,
            burst: None,
        }
    }

    pub fn with_burst(mut self, burst: Burst) -> Self {
        self.burst = Some(burst);
        self
    }

    fn advance(&mut self, dt: f32, ctx: &mut WeaponContext<'_>) {
        self.center = match self.anchor {
            ZoneAnchor::Fixed(p) => p,
            ZoneAnchor::Player { direction, distance } => ctx.player.position + direction * distance,
        };
        self.age += dt;

        match &mut self.damage {
            ZoneDamage::Periodic { damage, interval, timer } => {
                *timer += dt;
                if *timer >= *interval {
                    *timer = 0.0;
                    ctx.damage_area(self.center, self.radius, *damage);
                }
            }
            ZoneDamage::Continuous { dps } => {
                ctx.damage_area(self.center, self.radius, *dps * dt);
            }
        }

        if self.age >= self.duration {
            if let Some(burst) = self.burst.take() {
                ctx.damage_area(self.center, burst.radius, burst.damage);
            }
        }
    }
}

/// Contact test used by an orbital body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reach {
    /// Centre distance below this
    Fixed(f32),
    /// Centre distance below this plus the enemy's radius
    PlusEnemyRadius(f32),
}

/// Body revolving around the player, dealing contact damage
#[derive(Debug, Clone, PartialEq)]
pub struct Orbital {
    pub angle: f32,
    pub angular_speed: f32,
    pub orbit_radius: f32,
    pub reach: Reach,
    pub damage: f32,
    pub age: f32,
    /// None for permanent orbitals
    pub duration: Option<f32>,
    /// Same enemy may be struck again after this long; None means once
    pub rehit_after: Option<f32>,
    hits: SmallVec<[(EntityId, f32); 8]>,
}

impl Orbital {
    pub fn new(angle: f32, angular_speed: f32, orbit_radius: f32, reach: Reach, damage: f32) -> Self {
        Self {
            angle,
            angular_speed,
            orbit_radius,
            reach,
            damage,
            age: 0.0,
            duration: None,
            rehit_after: None,
            hits: SmallVec::new(),
        }
    }

    pub fn lasting(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn rehit_after(mut self, window: f32) -> Self {
        self.rehit_after = Some(window);
        self
    }

    pub fn position(&self, center: Vec2) -> Vec2 {
        center + Vec2::from_angle(self.angle) * self.orbit_radius
    }

    fn advance(&mut self, dt: f32, ctx: &mut WeaponContext<'_>) {
        self.angle += self.angular_speed * dt;
        self.age += dt;
        let pos = self.position(ctx.player.position);

        if let Some(window) = self.rehit_after {
            let age = self.age;
            self.hits.retain(|(_, at)| age - *at < window);
        }

        for i in 0..ctx.enemies.len() {
            let enemy = &ctx.enemies[i];
            if !enemy.alive {
                continue;
            }
            let reach = match self.reach {
                Reach::Fixed(r) => r,
                Reach::PlusEnemyRadius(r) => r + enemy.radius,
            };
            if enemy.position.distance_sq_to(pos) >= reach * reach {
                continue;
            }
            let id = enemy.id;
            if self.hits.iter().any(|(hit, _)| *hit == id) {
                continue;
            }
            ctx.damage_enemy(i, self.damage);
            self.hits.push((id, self.age));
        }
    }

    fn is_expired(&self) -> bool {
        self.duration.map_or(false, |d| self.age >= d)
    }
}

/// Short-lived line or arc marking an instant strike (render only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beam {
    pub origin: Vec2,
    pub angle: f32,
    pub length: f32,
    /// Half-angle of a swing arc; 0 for a straight beam
    pub half_arc: f32,
    pub age: f32,
    pub duration: f32,
}

impl Beam {
    pub fn line(origin: Vec2, angle: f32, length: f32, duration: f32) -> Self {
        Self {
            origin,
            angle,
            length,
            half_arc: 0.0,
            age: 0.0,
            duration,
        }
    }

    pub fn arc(origin: Vec2, angle: f32, length: f32, half_arc: f32, duration: f32) -> Self {
        Self {
            half_arc,
            ..Self::line(origin, angle, length, duration)
        }
    }

    pub fn end(&self) -> Vec2 {
        self.origin + Vec2::from_angle(self.angle) * self.length
    }
}

/// Expanding ring centred on the player
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub center: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub max_radius: f32,
    /// Enemies within this distance of the ring edge are struck
    pub band: f32,
    pub damage: f32,
    hits: SmallVec<[EntityId; 16]>,
}

impl Wave {
    pub fn new(center: Vec2, speed: f32, max_radius: f32, band: f32, damage: f32) -> Self {
        Self {
            center,
            radius: 0.0,
            speed,
            max_radius,
            band,
            damage,
            hits: SmallVec::new(),
        }
    }

    fn advance(&mut self, dt: f32, ctx: &mut WeaponContext<'_>) {
        self.radius += self.speed * dt;
        self.center = ctx.player.position;
        for i in 0..ctx.enemies.len() {
            let enemy = &ctx.enemies[i];
            if !enemy.alive || self.hits.contains(&enemy.id) {
                continue;
            }
            let dist = enemy.position.distance_to(self.center);
            if (dist - self.radius).abs() < self.band {
                let id = enemy.id;
                ctx.damage_enemy(i, self.damage);
                self.hits.push(id);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Zone(Zone),
    Orbital(Orbital),
    Beam(Beam),
    Wave(Wave),
}

impl Effect {
    pub fn advance(&mut self, dt: f32, ctx: &mut WeaponContext<'_>) {
        match self {
            Effect::Zone(zone) => zone.advance(dt, ctx),
            Effect::Orbital(orbital) => orbital.advance(dt, ctx),
            Effect::Beam(beam) => beam.age += dt,
            Effect::Wave(wave) => wave.advance(dt, ctx),
        }
    }

    pub fn is_expired(&self) -> bool {
        match self {
            Effect::Zone(zone) => zone.age >= zone.duration,
            Effect::Orbital(orbital) => orbital.is_expired(),
            Effect::Beam(beam) => beam.age >= beam.duration,
            Effect::Wave(wave) => wave.radius >= wave.max_radius,
        }
    }
}

/// Where a scheduled strike lands, resolved when it fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrikeTarget {
    /// A random living enemy, or a random point this far from the player
    RandomEnemy { fallback_distance: f32 },
    /// A random point within this distance of the player
    AroundPlayer { max_distance: f32 },
}

/// Delayed area strike, due at a point on the owning weapon's clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingStrike {
    pub due: f32,
    pub target: StrikeTarget,
    pub radius: f32,
    pub damage: f32,
}

impl PendingStrike {
    /// Resolve the landing point and deal the damage
    pub fn land(&self, ctx: &mut WeaponContext<'_>) -> Vec2 {
        let player_pos = ctx.player.position;
        let point = match self.target {
            StrikeTarget::RandomEnemy { fallback_distance } => {
                let living: SmallVec<[usize; 32]> = (0..ctx.enemies.len()).filter(|&i| ctx.enemies[i].alive).collect();
                if living.is_empty() {
                    let angle = ctx.rng.gen_range(0.0..TAU);
                    player_pos + Vec2::from_angle(angle) * fallback_distance
                } else {
                    let pick = living[ctx.rng.gen_range(0..living.len())];
                    ctx.enemies[pick].position
                }
            }
            StrikeTarget::AroundPlayer { max_distance } => {
                let angle = ctx.rng.gen_range(0.0..TAU);
                let dist = ctx.rng.gen_range(0.0..=max_distance);
                player_pos + Vec2::from_angle(angle) * dist
            }
        };
        ctx.damage_area(point, self.radius, self.damage);
        point
    }
}

/// Satellite / minion body that fires its own projectiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turret {
    pub angle: f32,
    pub position: Vec2,
    pub shoot_timer: f32,
}

impl Turret {
    pub fn new(angle: f32, position: Vec2) -> Self {
        Self {
            angle,
            position,
            shoot_timer: 0.0,
        }
    }
}

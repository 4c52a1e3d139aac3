//! Per-weapon activation and per-tick maintenance
//!
//! `Weapon::update` is the only entry point the simulation calls. It runs
//! the shared cooldown cycle, then advances effects, turrets and the strike
//! schedule owned by the weapon.

use rand::Rng;
use std::f32::consts::TAU;

use crate::game::enemy::{enemies_within, nearest_enemies, nearest_enemy};
use crate::game::projectile::{Motion, OnHit, Pierce, Projectile};
use crate::game::weapons::effects::{
    Beam, Burst, Effect, Orbital, PendingStrike, Reach, StrikeTarget, Turret, Wave, Zone, ZoneDamage,
};
use crate::game::weapons::{Category, Weapon, WeaponContext, WeaponKind};
use crate::util::vec2::{angle_between, Vec2};

/// Projectile flight parameters per weapon
mod flight {
    pub const WAND_SPEED: f32 = 300.0;
    pub const WAND_RADIUS: f32 = 6.0;
    pub const WAND_LIFETIME: f32 = 3.0;

    pub const AXE_SPEED: f32 = 250.0;
    pub const AXE_BASE_RADIUS: f32 = 8.0;
    pub const AXE_SPREAD: f32 = 0.3;
    pub const AXE_SPIN: f32 = 10.0;

    pub const MISSILE_SPEED: f32 = 200.0;
    pub const MISSILE_TURN_RATE: f32 = 3.0;
    pub const MISSILE_RADIUS: f32 = 6.0;
    pub const MISSILE_LIFETIME: f32 = 10.0;

    pub const FIREBALL_SPEED: f32 = 250.0;
    pub const FIREBALL_SPREAD: f32 = 0.4;
    pub const FIREBALL_RADIUS: f32 = 10.0;
    pub const FIREBALL_LIFETIME: f32 = 4.0;

    pub const ICE_SPEED: f32 = 350.0;
    pub const ICE_RADIUS: f32 = 7.0;
    pub const ICE_LIFETIME: f32 = 3.0;

    pub const BOOMERANG_SPEED: f32 = 400.0;
    pub const BOOMERANG_SPREAD: f32 = 0.5;
    pub const BOOMERANG_RADIUS: f32 = 10.0;
    pub const BOOMERANG_LIFETIME: f32 = 3.0;
    pub const BOOMERANG_REHIT: f32 = 0.2;
    pub const BOOMERANG_SPIN: f32 = 15.0;

    pub const SHOTGUN_SPEED: f32 = 400.0;
    pub const SHOTGUN_SPREAD: f32 = 0.3;
    pub const SHOTGUN_RADIUS: f32 = 4.0;
    pub const SHOTGUN_LIFETIME: f32 = 1.0;

    pub const STORM_SPEED: f32 = 500.0;
    pub const STORM_SPREAD: f32 = 0.4;
    pub const STORM_RADIUS: f32 = 15.0;
    pub const STORM_LIFETIME: f32 = 2.0;

    pub const DART_SPEED: f32 = 450.0;
    pub const DART_RADIUS: f32 = 4.0;
    pub const DART_LIFETIME: f32 = 2.0;

    pub const SATELLITE_ANGULAR_SPEED: f32 = 1.5;
    pub const SATELLITE_BOLT_SPEED: f32 = 400.0;
    pub const SATELLITE_BOLT_RADIUS: f32 = 4.0;
    pub const SATELLITE_BOLT_LIFETIME: f32 = 2.0;

    pub const MINION_ANGULAR_SPEED: f32 = 2.0;
    pub const MINION_FOLLOW_RATE: f32 = 5.0;
    pub const MINION_SHOT_SPEED: f32 = 300.0;
    pub const MINION_SHOT_RADIUS: f32 = 5.0;
    pub const MINION_SHOT_LIFETIME: f32 = 3.0;
}

/// Effect shapes that are not level-scaled
mod shape {
    pub const BIBLE_ANGULAR_SPEED: f32 = 2.0;
    pub const BIBLE_HIT_RADIUS: f32 = 20.0;
    pub const BIBLE_REHIT: f32 = 0.5;

    pub const HOLY_WATER_ENEMY_CHANCE: f64 = 0.7;
    pub const HOLY_WATER_MIN_DISTANCE: f32 = 100.0;
    pub const HOLY_WATER_MAX_DISTANCE: f32 = 300.0;
    pub const HOLY_WATER_JITTER: f32 = 25.0;
    pub const HOLY_WATER_BURST_RADIUS: f32 = 2.0;
    pub const HOLY_WATER_BURST_DAMAGE: f32 = 3.0;

    pub const CHAIN_ARC_DURATION: f32 = 0.2;

    pub const LASER_TOLERANCE: f32 = 0.1;
    pub const LASER_SPREAD: f32 = 0.3;

    pub const WHIRLWIND_BAND: f32 = 30.0;

    pub const METEOR_FALLBACK_DISTANCE: f32 = 200.0;

    pub const CHAINSAW_ANGULAR_SPEED: f32 = 8.0;

    pub const PULSE_SPEED: f32 = 400.0;
    pub const PULSE_BAND: f32 = 30.0;

    pub const SWORD_ANGULAR_SPEED: f32 = 3.0;

    pub const SABER_HALF_ARC: f32 = 0.7;
    pub const SABER_SWING_DURATION: f32 = 0.3;

    pub const WIND_RING_SPEED: f32 = 1000.0;
}

/// Offset of shot `i` of `count` fanned symmetrically around the aim
fn fan_offset(i: u32, count: u32, spread: f32) -> f32 {
    (i as f32 - (count as f32 - 1.0) / 2.0) * spread
}

/// Random point `min..max` away from `center`
fn random_point_around<R: Rng>(rng: &mut R, center: Vec2, min: f32, max: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let dist = if max > min { rng.gen_range(min..max) } else { min };
    center + Vec2::from_angle(angle) * dist
}

impl Weapon {
    /// Advance one tick: cooldown-gated activation, then effect maintenance
    pub fn update(&mut self, dt: f32, ctx: &mut WeaponContext<'_>) {
        self.clock += dt;

        match self.category() {
            Category::Passive => {
                // Only Counter keeps a cooldown; it is armed by `try_counter`
                self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
            }
            Category::Turret => self.update_turrets(dt, ctx),
            _ => {
                self.cooldown_timer -= dt;
                if self.cooldown_timer <= 0.0 {
                    self.cooldown_timer = self.stats.cooldown * ctx.player.cooldown_factor();
                    self.activate(ctx);
                }
            }
        }

        for effect in &mut self.effects {
            effect.advance(dt, ctx);
        }
        self.effects.retain(|e| !e.is_expired());

        if !self.schedule.is_empty() {
            let clock = self.clock;
            let (due, pending): (Vec<PendingStrike>, Vec<PendingStrike>) =
                self.schedule.drain(..).partition(|s| s.due <= clock);
            self.schedule = pending;
            for strike in due {
                strike.land(ctx);
            }
        }
    }

    /// Roll the Counter passive. Returns the damage to deal back when it
    /// triggers; the cooldown starts only on a successful counter.
    pub fn try_counter<R: Rng>(&mut self, rng: &mut R, damage_multiplier: f32) -> Option<f32> {
        if self.kind != WeaponKind::Counter || self.cooldown_timer > 0.0 {
            return None;
        }
        let chance = self.stats.effect_amount.clamp(0.0, 1.0) as f64;
        if !rng.gen_bool(chance) {
            return None;
        }
        self.cooldown_timer = self.stats.cooldown;
        Some(self.stats.damage * damage_multiplier)
    }

    fn activate(&mut self, ctx: &mut WeaponContext<'_>) {
        let origin = ctx.player.position;
        let facing = ctx.player.facing_angle();
        let damage = self.stats.damage * ctx.player.damage_multiplier();
        let area = ctx.player.area_multiplier();
        let count = self.stats.count;
        let kind = self.kind;

        match kind {
            WeaponKind::MagicWand => {
                let targets = nearest_enemies(ctx.enemies, origin, count as usize);
                if targets.is_empty() {
                    return;
                }
                for i in 0..count as usize {
                    let target = ctx.enemies[targets[i % targets.len()]].position;
                    let angle = origin.direction_to(target).angle();
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::WAND_SPEED, damage)
                            .with_radius(flight::WAND_RADIUS)
                            .with_lifetime(flight::WAND_LIFETIME)
                            .with_pierce(self.stats.pierce),
                    );
                }
            }

            WeaponKind::Axe => {
                for i in 0..count {
                    let angle = facing + fan_offset(i, count, flight::AXE_SPREAD);
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::AXE_SPEED, damage)
                            .with_radius(flight::AXE_BASE_RADIUS * self.stats.size * area)
                            .with_lifetime(self.stats.range / flight::AXE_SPEED)
                            .with_pierce(self.stats.pierce)
                            .with_spin(flight::AXE_SPIN),
                    );
                }
            }

            WeaponKind::Garlic => {
                let radius = self.stats.radius * area;
                let tick_damage = damage * self.stats.cooldown;
                let push = self.stats.force * self.stats.cooldown;
                for i in enemies_within(ctx.enemies, origin, radius) {
                    ctx.damage_enemy(i, tick_damage);
                    let enemy = &mut ctx.enemies[i];
                    enemy.position += origin.direction_to(enemy.position) * push;
                    if self.stats.effect_amount > 0.0 {
                        enemy.apply_defense_down(self.stats.effect_amount, self.stats.effect_duration);
                    }
                }
            }

            WeaponKind::HolyBible => {
                let books = self.effects.iter().filter(|e| matches!(e, Effect::Orbital(_))).count();
                if self.stats.capstone && books == count as usize {
                    return;
                }
                self.effects.retain(|e| !matches!(e, Effect::Orbital(_)));
                for i in 0..count {
                    let angle = i as f32 * TAU / count as f32;
                    let book = Orbital::new(
                        angle,
                        shape::BIBLE_ANGULAR_SPEED,
                        self.stats.radius * area,
                        Reach::PlusEnemyRadius(shape::BIBLE_HIT_RADIUS),
                        damage,
                    )
                    .rehit_after(shape::BIBLE_REHIT);
                    let book = if self.stats.capstone {
                        book
                    } else {
                        book.lasting(self.stats.duration)
                    };
                    self.effects.push(Effect::Orbital(book));
                }
            }

            WeaponKind::HolyWater => {
                let radius = self.stats.radius * area;
                for _ in 0..count {
                    let living: Vec<usize> = (0..ctx.enemies.len()).filter(|&i| ctx.enemies[i].alive).collect();
                    let base = if !living.is_empty() && ctx.rng.gen_bool(shape::HOLY_WATER_ENEMY_CHANCE) {
                        let pick = living[ctx.rng.gen_range(0..living.len())];
                        ctx.enemies[pick].position
                    } else {
                        random_point_around(
                            ctx.rng,
                            origin,
                            shape::HOLY_WATER_MIN_DISTANCE,
                            shape::HOLY_WATER_MAX_DISTANCE,
                        )
                    };
                    let jitter = shape::HOLY_WATER_JITTER;
                    let center = base
                        + Vec2::new(
                            ctx.rng.gen_range(-jitter..=jitter),
                            ctx.rng.gen_range(-jitter..=jitter),
                        );
                    let mut zone = Zone::fixed(
                        center,
                        radius,
                        ZoneDamage::Periodic {
                            damage,
                            interval: self.stats.interval,
                            timer: 0.0,
                        },
                        self.stats.duration,
                    );
                    if self.stats.capstone {
                        zone = zone.with_burst(Burst {
                            radius: radius * shape::HOLY_WATER_BURST_RADIUS,
                            damage: damage * shape::HOLY_WATER_BURST_DAMAGE,
                        });
                    }
                    self.effects.push(Effect::Zone(zone));
                }
            }

            WeaponKind::ElectricField => {
                let Some(first) = nearest_enemy(ctx.enemies, origin) else {
                    return;
                };
                let mut struck = vec![first];
                let mut from = origin;
                let mut current = first;
                loop {
                    let at = ctx.enemies[current].position;
                    let offset = at - from;
                    self.effects.push(Effect::Beam(Beam::line(
                        from,
                        offset.angle(),
                        offset.length(),
                        shape::CHAIN_ARC_DURATION,
                    )));
                    ctx.damage_enemy(current, damage);

                    if struck.len() >= count as usize {
                        break;
                    }
                    let next = enemies_within(ctx.enemies, at, self.stats.range)
                        .into_iter()
                        .filter(|i| !struck.contains(i))
                        .min_by(|&a, &b| {
                            ctx.enemies[a]
                                .position
                                .distance_sq_to(at)
                                .total_cmp(&ctx.enemies[b].position.distance_sq_to(at))
                        });
                    match next {
                        Some(n) => {
                            struck.push(n);
                            from = at;
                            current = n;
                        }
                        None => break,
                    }
                }
            }

            WeaponKind::HomingMissile => {
                let living: Vec<usize> = (0..ctx.enemies.len()).filter(|&i| ctx.enemies[i].alive).collect();
                if living.is_empty() {
                    return;
                }
                for _ in 0..count {
                    let pick = living[ctx.rng.gen_range(0..living.len())];
                    let (target_id, target_pos) = (ctx.enemies[pick].id, ctx.enemies[pick].position);
                    let angle = origin.direction_to(target_pos).angle();
                    let motion = Motion::Homing {
                        target: Some(target_id),
                        speed: flight::MISSILE_SPEED,
                        turn_rate: flight::MISSILE_TURN_RATE,
                    };
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::MISSILE_SPEED, damage)
                            .with_radius(flight::MISSILE_RADIUS)
                            .with_lifetime(flight::MISSILE_LIFETIME)
                            .with_motion(motion),
                    );
                }
            }

            WeaponKind::FireBall => {
                for i in 0..count {
                    let angle = facing + fan_offset(i, count, flight::FIREBALL_SPREAD);
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::FIREBALL_SPEED, damage)
                            .with_radius(flight::FIREBALL_RADIUS)
                            .with_lifetime(flight::FIREBALL_LIFETIME)
                            .with_on_hit(OnHit::Explode {
                                radius: self.stats.radius * area,
                            }),
                    );
                }
            }

            WeaponKind::IceSpear => {
                let targets = nearest_enemies(ctx.enemies, origin, count as usize);
                if targets.is_empty() {
                    return;
                }
                for i in 0..count as usize {
                    let target = ctx.enemies[targets[i % targets.len()]].position;
                    let angle = origin.direction_to(target).angle();
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::ICE_SPEED, damage)
                            .with_radius(flight::ICE_RADIUS)
                            .with_lifetime(flight::ICE_LIFETIME)
                            .with_pierce(self.stats.pierce)
                            .with_on_hit(OnHit::Slow {
                                amount: self.stats.effect_amount,
                                duration: self.stats.effect_duration,
                            }),
                    );
                }
            }

            WeaponKind::LaserBeam => {
                let length = self.stats.range;
                for i in 0..count {
                    let angle = facing + fan_offset(i, count, shape::LASER_SPREAD);
                    for j in 0..ctx.enemies.len() {
                        let enemy = &ctx.enemies[j];
                        if !enemy.alive {
                            continue;
                        }
                        let offset = enemy.position - origin;
                        if offset.length() < length && angle_between(offset.angle(), angle) < shape::LASER_TOLERANCE {
                            ctx.damage_enemy(j, damage);
                        }
                    }
                    self.effects
                        .push(Effect::Beam(Beam::line(origin, angle, length, self.stats.duration)));
                }
            }

            WeaponKind::Boomerang => {
                for i in 0..count {
                    let angle = facing + fan_offset(i, count, flight::BOOMERANG_SPREAD);
                    let motion = Motion::Boomerang {
                        origin,
                        direction: Vec2::from_angle(angle),
                        travelled: 0.0,
                        max_distance: self.stats.range,
                        speed: flight::BOOMERANG_SPEED,
                        returning: false,
                    };
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::BOOMERANG_SPEED, damage)
                            .with_radius(flight::BOOMERANG_RADIUS)
                            .with_lifetime(flight::BOOMERANG_LIFETIME)
                            .with_pierce(Pierce::Unlimited)
                            .with_rehit(flight::BOOMERANG_REHIT)
                            .with_spin(flight::BOOMERANG_SPIN)
                            .with_motion(motion),
                    );
                }
            }

            WeaponKind::PoisonCloud => {
                for i in 0..count {
                    let angle = i as f32 * TAU / count as f32;
                    let center = origin + Vec2::from_angle(angle) * self.stats.range;
                    self.effects.push(Effect::Zone(Zone::fixed(
                        center,
                        self.stats.radius * area,
                        ZoneDamage::Periodic {
                            damage,
                            interval: self.stats.interval,
                            timer: 0.0,
                        },
                        self.stats.duration,
                    )));
                }
            }

            WeaponKind::Whirlwind => {
                let outer = self.stats.radius * area;
                let inner = outer - shape::WHIRLWIND_BAND;
                let tick_damage = damage * self.stats.cooldown;
                for i in enemies_within(ctx.enemies, origin, outer) {
                    if ctx.enemies[i].position.distance_to(origin) > inner {
                        ctx.damage_enemy(i, tick_damage);
                    }
                }
            }

            WeaponKind::Meteor => {
                self.schedule_strikes(
                    StrikeTarget::RandomEnemy {
                        fallback_distance: shape::METEOR_FALLBACK_DISTANCE,
                    },
                    self.stats.radius * area,
                    damage,
                );
            }

            WeaponKind::BombRain => {
                self.schedule_strikes(
                    StrikeTarget::AroundPlayer {
                        max_distance: self.stats.range,
                    },
                    self.stats.radius * area,
                    damage,
                );
            }

            WeaponKind::Chainsaw => {
                let head = Orbital::new(
                    0.0,
                    shape::CHAINSAW_ANGULAR_SPEED,
                    self.stats.range,
                    Reach::PlusEnemyRadius(self.stats.radius),
                    damage,
                )
                .lasting(self.stats.duration);
                self.effects.push(Effect::Orbital(head));
            }

            WeaponKind::PulseWave => {
                self.effects.push(Effect::Wave(Wave::new(
                    origin,
                    shape::PULSE_SPEED,
                    self.stats.range,
                    shape::PULSE_BAND,
                    damage,
                )));
            }

            WeaponKind::Shotgun => {
                for _ in 0..count {
                    let angle = facing + ctx.rng.gen_range(-flight::SHOTGUN_SPREAD..=flight::SHOTGUN_SPREAD);
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::SHOTGUN_SPEED, damage)
                            .with_radius(flight::SHOTGUN_RADIUS)
                            .with_lifetime(flight::SHOTGUN_LIFETIME),
                    );
                }
            }

            WeaponKind::Drill => {
                let direction = ctx.player.facing();
                let mut zone = Zone::anchored(
                    direction,
                    self.stats.range,
                    self.stats.radius * area,
                    ZoneDamage::Continuous { dps: damage },
                    self.stats.duration,
                );
                zone.center = origin + direction * self.stats.range;
                self.effects.push(Effect::Zone(zone));
            }

            WeaponKind::TimeStop => {
                for enemy in ctx.enemies.iter_mut().filter(|e| e.alive) {
                    enemy.apply_slow(self.stats.effect_amount, self.stats.duration);
                }
            }

            WeaponKind::StormBlade => {
                for i in 0..count {
                    let angle = facing + fan_offset(i, count, flight::STORM_SPREAD);
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::STORM_SPEED, damage)
                            .with_radius(flight::STORM_RADIUS)
                            .with_lifetime(flight::STORM_LIFETIME)
                            .with_pierce(self.stats.pierce),
                    );
                }
            }

            WeaponKind::PoisonDart => {
                let targets = nearest_enemies(ctx.enemies, origin, count as usize);
                if targets.is_empty() {
                    return;
                }
                for i in 0..count as usize {
                    let target = ctx.enemies[targets[i % targets.len()]].position;
                    let angle = origin.direction_to(target).angle();
                    ctx.spawns.projectile(
                        Projectile::fired_by(kind, origin, angle, flight::DART_SPEED, damage)
                            .with_radius(flight::DART_RADIUS)
                            .with_lifetime(flight::DART_LIFETIME)
                            .with_on_hit(OnHit::Poison {
                                damage: self.stats.effect_damage,
                                duration: self.stats.effect_duration,
                            }),
                    );
                }
            }

            WeaponKind::ElectricShock => {
                let radius = self.stats.radius * area;
                for i in enemies_within(ctx.enemies, origin, radius) {
                    ctx.damage_enemy(i, damage);
                    ctx.enemies[i].apply_stun(self.stats.effect_duration);
                }
            }

            WeaponKind::SpinningSword => {
                let base = self.clock * shape::SWORD_ANGULAR_SPEED;
                let tick_damage = damage * self.stats.cooldown;
                for i in 0..count {
                    let angle = base + i as f32 * TAU / count as f32;
                    let sword = origin + Vec2::from_angle(angle) * self.stats.radius;
                    for j in enemies_within(ctx.enemies, sword, self.stats.range) {
                        ctx.damage_enemy(j, tick_damage);
                    }
                }
            }

            WeaponKind::GravityField => {
                let pull = self.stats.force * self.stats.cooldown;
                let tick_damage = damage * self.stats.cooldown;
                for i in enemies_within(ctx.enemies, origin, self.stats.range) {
                    let enemy = &mut ctx.enemies[i];
                    enemy.position = enemy.position.move_towards(origin, pull);
                    ctx.damage_enemy(i, tick_damage);
                }
            }

            WeaponKind::BeamSaber => {
                let reach = self.stats.range;
                for i in enemies_within(ctx.enemies, origin, reach) {
                    let heading = (ctx.enemies[i].position - origin).angle();
                    if angle_between(heading, facing) <= shape::SABER_HALF_ARC {
                        ctx.damage_enemy(i, damage);
                    }
                }
                self.effects.push(Effect::Beam(Beam::arc(
                    origin,
                    facing,
                    reach,
                    shape::SABER_HALF_ARC,
                    shape::SABER_SWING_DURATION,
                )));
            }

            WeaponKind::WindBlast => {
                for i in enemies_within(ctx.enemies, origin, self.stats.range) {
                    ctx.damage_enemy(i, damage);
                    let enemy = &mut ctx.enemies[i];
                    enemy.position += origin.direction_to(enemy.position) * self.stats.force;
                }
                // Visual ring only
                self.effects.push(Effect::Wave(Wave::new(
                    origin,
                    shape::WIND_RING_SPEED,
                    self.stats.range,
                    0.0,
                    0.0,
                )));
            }

            WeaponKind::Satellite
            | WeaponKind::Minion
            | WeaponKind::Shield
            | WeaponKind::LifeSteal
            | WeaponKind::Clone
            | WeaponKind::Counter => {}
        }
    }

    /// Queue `count` strikes `interval` apart, the first one due now
    fn schedule_strikes(&mut self, target: StrikeTarget, radius: f32, damage: f32) {
        for i in 0..self.stats.count {
            self.schedule.push(PendingStrike {
                due: self.clock + i as f32 * self.stats.interval,
                target,
                radius,
                damage,
            });
        }
    }

    fn update_turrets(&mut self, dt: f32, ctx: &mut WeaponContext<'_>) {
        let count = self.stats.count as usize;
        let center = ctx.player.position;
        let damage = self.stats.damage * ctx.player.damage_multiplier();
        let interval = self.stats.interval * ctx.player.cooldown_factor();

        if self.turrets.len() != count {
            self.turrets = (0..count)
                .map(|i| {
                    let angle = i as f32 * TAU / count as f32;
                    Turret::new(angle, center + Vec2::from_angle(angle) * self.stats.radius)
                })
                .collect();
        }

        let (angular_speed, shot_speed, shot_radius, shot_lifetime) = match self.kind {
            WeaponKind::Minion => (
                flight::MINION_ANGULAR_SPEED,
                flight::MINION_SHOT_SPEED,
                flight::MINION_SHOT_RADIUS,
                flight::MINION_SHOT_LIFETIME,
            ),
            _ => (
                flight::SATELLITE_ANGULAR_SPEED,
                flight::SATELLITE_BOLT_SPEED,
                flight::SATELLITE_BOLT_RADIUS,
                flight::SATELLITE_BOLT_LIFETIME,
            ),
        };

        for turret in &mut self.turrets {
            turret.angle += angular_speed * dt;
            let slot = center + Vec2::from_angle(turret.angle) * self.stats.radius;
            turret.position = match self.kind {
                WeaponKind::Minion => turret
                    .position
                    .lerp(slot, (flight::MINION_FOLLOW_RATE * dt).min(1.0)),
                _ => slot,
            };

            turret.shoot_timer -= dt;
            if turret.shoot_timer > 0.0 {
                continue;
            }
            let target = match self.kind {
                // Satellites only engage inside their range
                WeaponKind::Satellite => nearest_enemy(ctx.enemies, turret.position)
                    .filter(|&i| ctx.enemies[i].position.distance_to(turret.position) < self.stats.range),
                _ => nearest_enemy(ctx.enemies, turret.position),
            };
            let Some(i) = target else {
                turret.shoot_timer = 0.0;
                continue;
            };
            let angle = turret.position.direction_to(ctx.enemies[i].position).angle();
            ctx.spawns.projectile(
                Projectile::fired_by(self.kind, turret.position, angle, shot_speed, damage)
                    .with_radius(shot_radius)
                    .with_lifetime(shot_lifetime),
            );
            turret.shoot_timer = interval;
        }
    }
}

//! Weapon base stats and per-level deltas
//!
//! `apply_level(kind, n, stats)` applies exactly the delta for reaching
//! level `n`; it is a total function of `(kind, n)`.

use crate::game::projectile::Pierce;
use crate::game::weapons::WeaponKind;

/// Tunable numbers for one weapon. Fields a weapon does not use stay at
/// their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponStats {
    pub damage: f32,
    pub cooldown: f32,
    /// Projectiles, bodies, zones, jumps or strikes per activation
    pub count: u32,
    /// Area radius (zones, auras, explosions) or orbit radius
    pub radius: f32,
    /// Reach, travel distance or placement distance
    pub range: f32,
    /// Projectile size multiplier
    pub size: f32,
    pub duration: f32,
    /// Tick or stagger interval
    pub interval: f32,
    /// Knockback, pull or push strength
    pub force: f32,
    /// Slow fraction, reflect/lifesteal fraction, counter chance, clone multiplier
    pub effect_amount: f32,
    pub effect_duration: f32,
    /// Poison damage per tick
    pub effect_damage: f32,
    pub pierce: Pierce,
    /// Level 8 special (permanent bible, holy water burst)
    pub capstone: bool,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            damage: 0.0,
            cooldown: 1.0,
            count: 1,
            radius: 0.0,
            range: 0.0,
            size: 1.0,
            duration: 0.0,
            interval: 0.0,
            force: 0.0,
            effect_amount: 0.0,
            effect_duration: 0.0,
            effect_damage: 0.0,
            pierce: Pierce::None,
            capstone: false,
        }
    }
}

/// Level 1 stats
pub fn base_stats(kind: WeaponKind) -> WeaponStats {
    use WeaponKind::*;
    let d = WeaponStats::default();
    match kind {
        MagicWand => WeaponStats {
            damage: 15.0,
            cooldown: 1.5,
            ..d
        },
        Axe => WeaponStats {
            damage: 20.0,
            cooldown: 2.0,
            range: 400.0,
            pierce: Pierce::Unlimited,
            ..d
        },
        Garlic => WeaponStats {
            damage: 5.0,
            cooldown: 0.1,
            radius: 80.0,
            force: 50.0,
            effect_duration: 3.0,
            ..d
        },
        HolyBible => WeaponStats {
            damage: 25.0,
            cooldown: 5.0,
            count: 2,
            radius: 80.0,
            duration: 10.0,
            ..d
        },
        HolyWater => WeaponStats {
            damage: 10.0,
            cooldown: 3.0,
            radius: 60.0,
            duration: 5.0,
            interval: 0.5,
            ..d
        },
        ElectricField => WeaponStats {
            damage: 30.0,
            cooldown: 4.0,
            count: 3,
            range: 120.0,
            ..d
        },
        Satellite => WeaponStats {
            damage: 20.0,
            cooldown: 0.0,
            count: 2,
            radius: 100.0,
            range: 250.0,
            interval: 0.5,
            ..d
        },
        HomingMissile => WeaponStats {
            damage: 35.0,
            cooldown: 3.0,
            count: 2,
            ..d
        },
        FireBall => WeaponStats {
            damage: 40.0,
            cooldown: 2.5,
            radius: 80.0,
            ..d
        },
        IceSpear => WeaponStats {
            damage: 25.0,
            cooldown: 1.8,
            pierce: Pierce::Limited(3),
            effect_amount: 0.5,
            effect_duration: 3.0,
            ..d
        },
        LaserBeam => WeaponStats {
            damage: 15.0,
            cooldown: 0.8,
            range: 500.0,
            duration: 0.3,
            ..d
        },
        Boomerang => WeaponStats {
            damage: 18.0,
            cooldown: 3.0,
            range: 300.0,
            ..d
        },
        PoisonCloud => WeaponStats {
            damage: 8.0,
            cooldown: 5.0,
            count: 2,
            radius: 80.0,
            range: 150.0,
            duration: 8.0,
            interval: 0.5,
            ..d
        },
        Whirlwind => WeaponStats {
            damage: 12.0,
            cooldown: 0.1,
            radius: 70.0,
            ..d
        },
        Meteor => WeaponStats {
            damage: 80.0,
            cooldown: 8.0,
            count: 3,
            radius: 100.0,
            interval: 0.2,
            ..d
        },
        Chainsaw => WeaponStats {
            damage: 22.0,
            cooldown: 2.0,
            radius: 25.0,
            range: 90.0,
            duration: 3.0,
            ..d
        },
        PulseWave => WeaponStats {
            damage: 30.0,
            cooldown: 4.0,
            range: 500.0,
            ..d
        },
        Shotgun => WeaponStats {
            damage: 8.0,
            cooldown: 1.2,
            count: 5,
            ..d
        },
        Drill => WeaponStats {
            damage: 25.0,
            cooldown: 2.0,
            radius: 40.0,
            range: 60.0,
            duration: 1.5,
            ..d
        },
        TimeStop => WeaponStats {
            cooldown: 15.0,
            duration: 5.0,
            effect_amount: 0.8,
            ..d
        },
        StormBlade => WeaponStats {
            damage: 35.0,
            cooldown: 2.0,
            pierce: Pierce::Unlimited,
            ..d
        },
        Shield => WeaponStats {
            cooldown: 0.0,
            effect_amount: 0.2,
            ..d
        },
        LifeSteal => WeaponStats {
            cooldown: 0.0,
            effect_amount: 0.05,
            ..d
        },
        PoisonDart => WeaponStats {
            damage: 10.0,
            cooldown: 0.8,
            count: 3,
            effect_damage: 5.0,
            effect_duration: 5.0,
            ..d
        },
        Minion => WeaponStats {
            damage: 15.0,
            cooldown: 0.0,
            radius: 50.0,
            interval: 1.5,
            ..d
        },
        BombRain => WeaponStats {
            damage: 50.0,
            cooldown: 10.0,
            count: 5,
            radius: 80.0,
            range: 300.0,
            interval: 0.15,
            ..d
        },
        ElectricShock => WeaponStats {
            damage: 20.0,
            cooldown: 3.0,
            radius: 120.0,
            effect_duration: 1.0,
            ..d
        },
        SpinningSword => WeaponStats {
            damage: 18.0,
            cooldown: 0.1,
            count: 2,
            radius: 60.0,
            range: 20.0,
            ..d
        },
        Clone => WeaponStats {
            cooldown: 0.0,
            effect_amount: 0.5,
            ..d
        },
        GravityField => WeaponStats {
            damage: 5.0,
            cooldown: 0.2,
            range: 200.0,
            force: 100.0,
            ..d
        },
        BeamSaber => WeaponStats {
            damage: 45.0,
            cooldown: 1.5,
            range: 100.0,
            ..d
        },
        Counter => WeaponStats {
            damage: 50.0,
            cooldown: 5.0,
            effect_amount: 0.3,
            ..d
        },
        WindBlast => WeaponStats {
            damage: 15.0,
            cooldown: 6.0,
            range: 250.0,
            force: 300.0,
            ..d
        },
    }
}

/// Apply the delta for reaching `level`. Levels outside 2..=8 are ignored.
pub fn apply_level(kind: WeaponKind, level: u32, s: &mut WeaponStats) {
    use WeaponKind::*;
    if !(2..=super::MAX_LEVEL).contains(&level) {
        return;
    }
    let even = level % 2 == 0;
    let third = level % 3 == 0;

    match (kind, level) {
        (MagicWand, 2) => s.count = 2,
        (MagicWand, 3) => s.damage = 25.0,
        (MagicWand, 4) => s.count = 3,
        (MagicWand, 5) => s.damage = 35.0,
        (MagicWand, 6) => s.cooldown = 1.0,
        (MagicWand, 7) => s.count = 4,
        (MagicWand, _) => s.pierce = Pierce::Unlimited,

        (Axe, 2) => s.damage = 30.0,
        (Axe, 3) => s.size = 1.3,
        (Axe, 4) => s.count = 2,
        (Axe, 5) => s.cooldown = 1.5,
        (Axe, 6) => s.damage = 45.0,
        (Axe, 7) => s.size = 1.6,
        (Axe, _) => s.range = 9999.0,

        (Garlic, 2) => s.radius = 100.0,
        (Garlic, 3) => s.damage = 8.0,
        (Garlic, 4) => s.radius = 120.0,
        (Garlic, 5) => s.force = 80.0,
        (Garlic, 6) => s.damage = 12.0,
        (Garlic, 7) => s.radius = 150.0,
        (Garlic, _) => s.effect_amount = 0.3,

        (HolyBible, 2) => s.count = 3,
        (HolyBible, 3) => s.duration = 15.0,
        (HolyBible, 4) => s.count = 4,
        (HolyBible, 5) => s.cooldown = 4.0,
        (HolyBible, 6) => s.damage = 35.0,
        (HolyBible, 7) => s.count = 5,
        (HolyBible, _) => s.capstone = true,

        (HolyWater, 2) => s.radius = 80.0,
        (HolyWater, 3) => s.damage = 15.0,
        (HolyWater, 4) => s.count = 2,
        (HolyWater, 5) => s.radius = 100.0,
        (HolyWater, 6) => s.damage = 20.0,
        (HolyWater, 7) => s.count = 3,
        (HolyWater, _) => s.capstone = true,

        (ElectricField, 2) => s.count = 4,
        (ElectricField, 3) => s.damage = 40.0,
        (ElectricField, 4) => s.count = 5,
        (ElectricField, 5) => s.range = 150.0,
        (ElectricField, 6) => s.damage = 55.0,
        (ElectricField, 7) => s.count = 7,
        (ElectricField, _) => s.cooldown = 2.5,

        (Satellite, 2) => s.count = 3,
        (Satellite, 3) => s.damage = 28.0,
        (Satellite, 4) => s.range = 300.0,
        (Satellite, 5) => s.interval = 0.4,
        (Satellite, 6) => s.count = 4,
        (Satellite, 7) => s.damage = 38.0,
        (Satellite, _) => s.count = 6,

        (HomingMissile, 2) => s.count = 3,
        (HomingMissile, 3) => s.damage = 45.0,
        (HomingMissile, 4) => s.count = 4,
        (HomingMissile, 5) => s.cooldown = 2.5,
        (HomingMissile, 6) => s.damage = 60.0,
        (HomingMissile, 7) => s.count = 6,
        (HomingMissile, _) => s.count = 8,

        (FireBall, 2) => s.damage = 50.0,
        (FireBall, 3) => s.radius = 100.0,
        (FireBall, 4) => s.count = 2,
        (FireBall, 5) => s.damage = 65.0,
        (FireBall, 6) => s.radius = 120.0,
        (FireBall, 7) => s.count = 3,
        (FireBall, _) => s.radius = 150.0,

        (IceSpear, 2) => s.count = 2,
        (IceSpear, 3) => s.damage = 35.0,
        (IceSpear, 4) => s.effect_duration = 4.0,
        (IceSpear, 5) => s.count = 3,
        (IceSpear, 6) => s.damage = 45.0,
        (IceSpear, 7) => s.effect_amount = 0.7,
        (IceSpear, _) => s.count = 5,

        (LaserBeam, 2) => s.damage = 22.0,
        (LaserBeam, 3) => s.range = 600.0,
        (LaserBeam, 4) => s.count = 2,
        (LaserBeam, 5) => s.damage = 30.0,
        (LaserBeam, 6) => s.cooldown = 0.6,
        (LaserBeam, 7) => s.count = 3,
        (LaserBeam, _) => s.duration = 0.5,

        (Boomerang, 2) => s.damage = 25.0,
        (Boomerang, 3) => s.count = 2,
        (Boomerang, 4) => s.damage = 35.0,
        (Boomerang, 5) => s.cooldown = 2.5,
        (Boomerang, 6) => s.count = 3,
        (Boomerang, 7) => s.damage = 45.0,
        (Boomerang, _) => s.count = 4,

        (PoisonCloud, 2) => s.damage = 12.0,
        (PoisonCloud, 3) => s.radius = 100.0,
        (PoisonCloud, 4) => s.count = 3,
        (PoisonCloud, 5) => s.damage = 16.0,
        (PoisonCloud, 6) => s.duration = 12.0,
        (PoisonCloud, 7) => s.count = 4,
        (PoisonCloud, _) => s.radius = 130.0,

        (Whirlwind, _) => {
            s.radius += 15.0;
            s.damage += 3.0;
        }

        (Meteor, _) if even => s.count += 1,
        (Meteor, _) => s.damage += 20.0,

        (Chainsaw, _) => {
            s.damage += 5.0;
            if level >= 6 {
                s.duration += 1.0;
            }
        }

        (PulseWave, _) => {
            s.damage += 8.0;
            if level >= 5 {
                s.cooldown = 3.0;
            }
        }

        (Shotgun, _) if even => s.count += 2,
        (Shotgun, _) => s.damage += 3.0,

        (Drill, _) => {
            s.damage += 6.0;
            if level >= 6 {
                s.duration = 2.0;
            }
        }

        (TimeStop, _) if even => s.duration += 2.0,
        (TimeStop, _) => s.effect_amount = (s.effect_amount + 0.05).min(0.95),

        (StormBlade, _) if third => s.count += 1,
        (StormBlade, _) => s.damage += 10.0,

        (Shield, _) => s.effect_amount += 0.05,
        (LifeSteal, _) => s.effect_amount += 0.02,

        (PoisonDart, _) if even => s.count += 1,
        (PoisonDart, _) => {
            s.damage += 3.0;
            s.effect_damage += 2.0;
        }

        (Minion, _) if third => s.count += 1,
        (Minion, _) => s.damage += 5.0,

        (BombRain, _) if even => s.count += 2,
        (BombRain, _) => s.damage += 15.0,

        (ElectricShock, _) => {
            s.damage += 5.0;
            if level >= 6 {
                s.effect_duration = 1.5;
            }
        }

        (SpinningSword, _) if third => s.count += 1,
        (SpinningSword, _) => s.damage += 4.0,

        (Clone, _) if level % 4 == 0 => s.count += 1,
        (Clone, _) => s.effect_amount += 0.1,

        (GravityField, _) => {
            s.damage += 2.0;
            if level >= 5 {
                s.force = 150.0;
            }
        }

        (BeamSaber, _) => {
            s.damage += 10.0;
            if level >= 6 {
                s.range = 130.0;
            }
        }

        (Counter, _) => {
            s.damage += 15.0;
            s.effect_amount = (s.effect_amount + 0.1).min(0.8);
        }

        (WindBlast, _) => {
            s.damage += 5.0;
            s.force += 50.0;
        }
    }
}

/// Stats after levelling from 1 to `level`
pub fn stats_at(kind: WeaponKind, level: u32) -> WeaponStats {
    let mut stats = base_stats(kind);
    for n in 2..=level.min(super::MAX_LEVEL) {
        apply_level(kind, n, &mut stats);
    }
    stats
}

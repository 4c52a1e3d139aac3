//! Weapon catalog and the auto-firing weapon contract
//!
//! A weapon counts its cooldown down every tick and fires when it reaches
//! zero; lingering effects (zones, orbitals, waves, turrets, scheduled
//! strikes) are advanced every tick regardless of the cooldown.

pub mod behavior;
pub mod effects;
pub mod roster;
pub mod upgrades;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::game::enemy::{enemies_within, Enemy};
use crate::game::player::Player;
use crate::game::state::SpawnQueue;
use crate::util::vec2::Vec2;

use self::effects::{Effect, PendingStrike, Turret};
use self::roster::RosterError;
use self::upgrades::WeaponStats;

pub use self::roster::WeaponRoster;

/// Highest level any weapon reaches
pub const MAX_LEVEL: u32 = 8;

/// Attack shape family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Projectile,
    Beam,
    Zone,
    Orbit,
    Wave,
    Aura,
    Debuff,
    /// Bodies with their own fire timers (satellites, minions)
    Turret,
    /// No activation; read by damage resolution
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    MagicWand,
    Axe,
    Garlic,
    HolyBible,
    HolyWater,
    ElectricField,
    Satellite,
    HomingMissile,
    FireBall,
    IceSpear,
    LaserBeam,
    Boomerang,
    PoisonCloud,
    Whirlwind,
    Meteor,
    Chainsaw,
    PulseWave,
    Shotgun,
    Drill,
    TimeStop,
    StormBlade,
    Shield,
    LifeSteal,
    PoisonDart,
    Minion,
    BombRain,
    ElectricShock,
    SpinningSword,
    Clone,
    GravityField,
    BeamSaber,
    Counter,
    WindBlast,
}

impl WeaponKind {
    /// Catalog order
    pub const ALL: [WeaponKind; 33] = [
        WeaponKind::MagicWand,
        WeaponKind::Axe,
        WeaponKind::Garlic,
        WeaponKind::HolyBible,
        WeaponKind::HolyWater,
        WeaponKind::ElectricField,
        WeaponKind::Satellite,
        WeaponKind::HomingMissile,
        WeaponKind::FireBall,
        WeaponKind::IceSpear,
        WeaponKind::LaserBeam,
        WeaponKind::Boomerang,
        WeaponKind::PoisonCloud,
        WeaponKind::Whirlwind,
        WeaponKind::Meteor,
        WeaponKind::Chainsaw,
        WeaponKind::PulseWave,
        WeaponKind::Shotgun,
        WeaponKind::Drill,
        WeaponKind::TimeStop,
        WeaponKind::StormBlade,
        WeaponKind::Shield,
        WeaponKind::LifeSteal,
        WeaponKind::PoisonDart,
        WeaponKind::Minion,
        WeaponKind::BombRain,
        WeaponKind::ElectricShock,
        WeaponKind::SpinningSword,
        WeaponKind::Clone,
        WeaponKind::GravityField,
        WeaponKind::BeamSaber,
        WeaponKind::Counter,
        WeaponKind::WindBlast,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::MagicWand => "Magic Wand",
            WeaponKind::Axe => "Axe",
            WeaponKind::Garlic => "Garlic",
            WeaponKind::HolyBible => "Holy Bible",
            WeaponKind::HolyWater => "Holy Water",
            WeaponKind::ElectricField => "Electric Field",
            WeaponKind::Satellite => "Satellite",
            WeaponKind::HomingMissile => "Homing Missile",
            WeaponKind::FireBall => "Fire Ball",
            WeaponKind::IceSpear => "Ice Spear",
            WeaponKind::LaserBeam => "Laser Beam",
            WeaponKind::Boomerang => "Boomerang",
            WeaponKind::PoisonCloud => "Poison Cloud",
            WeaponKind::Whirlwind => "Whirlwind",
            WeaponKind::Meteor => "Meteor",
            WeaponKind::Chainsaw => "Chainsaw",
            WeaponKind::PulseWave => "Pulse Wave",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Drill => "Drill",
            WeaponKind::TimeStop => "Time Stop",
            WeaponKind::StormBlade => "Storm Blade",
            WeaponKind::Shield => "Shield",
            WeaponKind::LifeSteal => "Life Steal",
            WeaponKind::PoisonDart => "Poison Dart",
            WeaponKind::Minion => "Minion",
            WeaponKind::BombRain => "Bomb Rain",
            WeaponKind::ElectricShock => "Electric Shock",
            WeaponKind::SpinningSword => "Spinning Sword",
            WeaponKind::Clone => "Clone",
            WeaponKind::GravityField => "Gravity Field",
            WeaponKind::BeamSaber => "Beam Saber",
            WeaponKind::Counter => "Counter",
            WeaponKind::WindBlast => "Wind Blast",
        }
    }

    /// Catalog lookup; unknown names yield None
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn category(&self) -> Category {
        use WeaponKind::*;
        match self {
            MagicWand | Axe | HomingMissile | FireBall | IceSpear | Boomerang | Shotgun | StormBlade | PoisonDart => {
                Category::Projectile
            }
            LaserBeam | BeamSaber | ElectricField => Category::Beam,
            HolyWater | PoisonCloud | Drill | Meteor | BombRain => Category::Zone,
            HolyBible | Chainsaw | SpinningSword => Category::Orbit,
            PulseWave | WindBlast => Category::Wave,
            Garlic | Whirlwind | ElectricShock | GravityField => Category::Aura,
            TimeStop => Category::Debuff,
            Satellite | Minion => Category::Turret,
            Shield | LifeSteal | Clone | Counter => Category::Passive,
        }
    }
}

/// Everything a weapon may touch while it updates
pub struct WeaponContext<'a> {
    pub player: &'a Player,
    pub enemies: &'a mut [Enemy],
    pub spawns: &'a mut SpawnQueue,
    pub rng: &'a mut StdRng,
    /// Health removed from enemies so far this tick
    pub damage_dealt: f32,
}

impl<'a> WeaponContext<'a> {
    pub fn new(player: &'a Player, enemies: &'a mut [Enemy], spawns: &'a mut SpawnQueue, rng: &'a mut StdRng) -> Self {
        Self {
            player,
            enemies,
            spawns,
            rng,
            damage_dealt: 0.0,
        }
    }

    /// Damage one enemy by index, returning health removed
    pub fn damage_enemy(&mut self, index: usize, amount: f32) -> f32 {
        let dealt = self.enemies[index].take_damage(amount);
        self.damage_dealt += dealt;
        dealt
    }

    /// Damage every living enemy within `radius` of `center`; returns hit count
    pub fn damage_area(&mut self, center: Vec2, radius: f32, amount: f32) -> usize {
        let targets = enemies_within(self.enemies, center, radius);
        for &i in &targets {
            self.damage_enemy(i, amount);
        }
        targets.len()
    }
}

/// HUD summary of one equipped weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponInfo {
    pub name: String,
    pub level: u32,
    pub max_level: u32,
}

/// One equipped weapon: identity, level, current stats and private effect state
#[derive(Debug, Clone)]
pub struct Weapon {
    kind: WeaponKind,
    level: u32,
    stats: WeaponStats,
    cooldown_timer: f32,
    /// Seconds since equip; drives scheduled strikes and sword rotation
    clock: f32,
    effects: Vec<Effect>,
    turrets: Vec<Turret>,
    schedule: Vec<PendingStrike>,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            level: 1,
            stats: upgrades::base_stats(kind),
            cooldown_timer: 0.0,
            clock: 0.0,
            effects: Vec::new(),
            turrets: Vec::new(),
            schedule: Vec::new(),
        }
    }

    /// Build by catalog name
    pub fn from_name(name: &str) -> Option<Self> {
        WeaponKind::from_name(name).map(Self::new)
    }

    /// Raise the level by one and apply that level's stat delta
    pub fn upgrade(&mut self) -> Result<u32, RosterError> {
        if self.is_max_level() {
            return Err(RosterError::AtMaxLevel(self.kind.name().to_string()));
        }
        self.level += 1;
        let before = self.stats.count;
        upgrades::apply_level(self.kind, self.level, &mut self.stats);
        if self.kind == WeaponKind::Satellite && self.stats.count != before {
            self.turrets.clear();
        }
        Ok(self.level)
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn turrets(&self) -> &[Turret] {
        &self.turrets
    }

    pub fn pending_strikes(&self) -> usize {
        self.schedule.len()
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn info(&self) -> WeaponInfo {
        WeaponInfo {
            name: self.name().to_string(),
            level: self.level,
            max_level: MAX_LEVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_round_trip() {
        assert_eq!(WeaponKind::ALL.len(), 33);
        for kind in WeaponKind::ALL {
            assert_eq!(WeaponKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(WeaponKind::from_name("magic wand"), Some(WeaponKind::MagicWand));
        assert_eq!(WeaponKind::from_name("Banana"), None);
        assert!(Weapon::from_name("").is_none());
    }

    #[test]
    fn test_upgrade_stops_at_max_level() {
        let mut wand = Weapon::new(WeaponKind::MagicWand);
        for expected in 2..=MAX_LEVEL {
            assert_eq!(wand.upgrade().ok(), Some(expected));
        }
        let stats = wand.stats().clone();
        assert!(matches!(wand.upgrade(), Err(RosterError::AtMaxLevel(_))));
        assert_eq!(wand.level(), MAX_LEVEL);
        assert_eq!(wand.stats(), &stats);
    }

    #[test]
    fn test_passive_category() {
        for kind in [WeaponKind::Shield, WeaponKind::LifeSteal, WeaponKind::Clone, WeaponKind::Counter] {
            assert_eq!(kind.category(), Category::Passive);
        }
        assert_eq!(WeaponKind::Satellite.category(), Category::Turret);
    }
}

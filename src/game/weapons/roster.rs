//! The player's equipped weapons (at most six)

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::game::weapons::{Weapon, WeaponContext, WeaponInfo, WeaponKind};

/// Concurrent weapon slots
pub const MAX_SLOTS: usize = 6;

/// Clone echo angle step (radians); copies alternate sides
pub const CLONE_ANGLE_STEP: f32 = 0.15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("weapon roster is full")]
    RosterFull,

    #[error("unknown weapon: {0}")]
    UnknownWeapon(String),

    #[error("weapon already equipped: {0}")]
    AlreadyEquipped(String),

    #[error("weapon not equipped: {0}")]
    NotEquipped(String),

    #[error("weapon already at max level: {0}")]
    AtMaxLevel(String),
}

#[derive(Debug, Clone, Default)]
pub struct WeaponRoster {
    weapons: Vec<Weapon>,
}

impl WeaponRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip a weapon by catalog name
    pub fn add(&mut self, name: &str) -> Result<WeaponKind, RosterError> {
        if self.is_full() {
            warn!("Rejected {}: roster full", name);
            return Err(RosterError::RosterFull);
        }
        let Some(kind) = WeaponKind::from_name(name) else {
            warn!("Rejected unknown weapon {:?}", name);
            return Err(RosterError::UnknownWeapon(name.to_string()));
        };
        self.add_kind(kind).map(|_| kind)
    }

    pub fn add_kind(&mut self, kind: WeaponKind) -> Result<(), RosterError> {
        if self.is_full() {
            warn!("Rejected {}: roster full", kind.name());
            return Err(RosterError::RosterFull);
        }
        if self.has(kind) {
            warn!("Rejected {}: already equipped", kind.name());
            return Err(RosterError::AlreadyEquipped(kind.name().to_string()));
        }
        self.weapons.push(Weapon::new(kind));
        info!("Weapon added: {} ({}/{} slots)", kind.name(), self.weapons.len(), MAX_SLOTS);
        Ok(())
    }

    /// Level up an equipped weapon by catalog name, returning its new level
    pub fn upgrade(&mut self, name: &str) -> Result<u32, RosterError> {
        match WeaponKind::from_name(name) {
            Some(kind) => self.upgrade_kind(kind),
            None => {
                warn!("Rejected upgrade of unknown weapon {:?}", name);
                Err(RosterError::NotEquipped(name.to_string()))
            }
        }
    }

    pub fn upgrade_kind(&mut self, kind: WeaponKind) -> Result<u32, RosterError> {
        let Some(weapon) = self.get_mut(kind) else {
            warn!("Rejected upgrade of {}: not equipped", kind.name());
            return Err(RosterError::NotEquipped(kind.name().to_string()));
        };
        match weapon.upgrade() {
            Ok(level) => {
                info!("Weapon upgraded: {} -> level {}", kind.name(), level);
                Ok(level)
            }
            Err(e) => {
                warn!("Rejected upgrade of {}: {}", kind.name(), e);
                Err(e)
            }
        }
    }

    /// Advance every weapon in slot order
    pub fn update(&mut self, dt: f32, ctx: &mut WeaponContext<'_>) {
        for weapon in &mut self.weapons {
            weapon.update(dt, ctx);
        }
    }

    pub fn has(&self, kind: WeaponKind) -> bool {
        self.weapons.iter().any(|w| w.kind() == kind)
    }

    pub fn get(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.kind() == kind)
    }

    fn get_mut(&mut self, kind: WeaponKind) -> Option<&mut Weapon> {
        self.weapons.iter_mut().find(|w| w.kind() == kind)
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.weapons.len() >= MAX_SLOTS
    }

    pub fn clear(&mut self) {
        self.weapons.clear();
    }

    pub fn infos(&self) -> Vec<WeaponInfo> {
        self.weapons.iter().map(Weapon::info).collect()
    }

    /// Owned weapons that can still level up
    pub fn upgradable(&self) -> Vec<WeaponKind> {
        self.weapons
            .iter()
            .filter(|w| !w.is_max_level())
            .map(Weapon::kind)
            .collect()
    }

    /// Catalog weapons not yet equipped, in catalog order
    pub fn unowned(&self) -> Vec<WeaponKind> {
        WeaponKind::ALL.iter().copied().filter(|k| !self.has(*k)).collect()
    }

    // Passive hooks

    /// Fraction of incoming damage reflected to the attacker (Shield)
    pub fn reflect_fraction(&self) -> f32 {
        self.passive_amount(WeaponKind::Shield)
    }

    /// Fraction of dealt damage healed back (Life Steal)
    pub fn lifesteal_fraction(&self) -> f32 {
        self.passive_amount(WeaponKind::LifeSteal)
    }

    /// `(copies, damage multiplier)` for the Clone passive
    pub fn clone_params(&self) -> Option<(u32, f32)> {
        self.get(WeaponKind::Clone)
            .map(|w| (w.stats().count, w.stats().effect_amount))
    }

    /// Roll the Counter passive; Some(damage) when it triggers
    pub fn try_counter<R: Rng>(&mut self, rng: &mut R, damage_multiplier: f32) -> Option<f32> {
        self.get_mut(WeaponKind::Counter)
            .and_then(|w| w.try_counter(rng, damage_multiplier))
    }

    fn passive_amount(&self, kind: WeaponKind) -> f32 {
        self.get(kind).map_or(0.0, |w| w.stats().effect_amount)
    }
}

/// Angle offset of the `index`-th Clone copy: +step, -step, +2 step, ...
pub fn clone_offset(index: u32) -> f32 {
    let magnitude = CLONE_ANGLE_STEP * (index / 2 + 1) as f32;
    if index % 2 == 0 {
        magnitude
    } else {
        -magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::weapons::MAX_LEVEL;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_add_fails_when_full_regardless_of_name() {
        let mut roster = WeaponRoster::new();
        for kind in &WeaponKind::ALL[..MAX_SLOTS] {
            assert!(roster.add_kind(*kind).is_ok());
        }
        assert!(roster.is_full());
        assert_eq!(roster.add("Shotgun"), Err(RosterError::RosterFull));
        assert_eq!(roster.add("Not A Weapon"), Err(RosterError::RosterFull));
        assert_eq!(roster.len(), MAX_SLOTS);
    }

    #[test]
    fn test_add_unknown_and_duplicate() {
        let mut roster = WeaponRoster::new();
        assert_eq!(
            roster.add("Banana"),
            Err(RosterError::UnknownWeapon("Banana".to_string()))
        );
        assert_eq!(roster.add("Axe"), Ok(WeaponKind::Axe));
        assert!(matches!(roster.add("Axe"), Err(RosterError::AlreadyEquipped(_))));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_upgrade_missing_and_at_max() {
        let mut roster = WeaponRoster::new();
        assert!(matches!(roster.upgrade("Garlic"), Err(RosterError::NotEquipped(_))));

        roster.add("Garlic").ok();
        for _ in 1..MAX_LEVEL {
            assert!(roster.upgrade("Garlic").is_ok());
        }
        assert!(matches!(roster.upgrade("Garlic"), Err(RosterError::AtMaxLevel(_))));
        assert!(roster.upgradable().is_empty());
        assert_eq!(roster.infos()[0].level, MAX_LEVEL);
    }

    #[test]
    fn test_passive_queries() {
        let mut roster = WeaponRoster::new();
        assert_eq!(roster.reflect_fraction(), 0.0);
        assert!(roster.clone_params().is_none());

        roster.add_kind(WeaponKind::Shield).ok();
        roster.add_kind(WeaponKind::LifeSteal).ok();
        roster.add_kind(WeaponKind::Clone).ok();
        roster.upgrade_kind(WeaponKind::Shield).ok();

        assert!(approx_eq(roster.reflect_fraction(), 0.25));
        assert!(approx_eq(roster.lifesteal_fraction(), 0.05));
        assert_eq!(roster.clone_params(), Some((1, 0.5)));
        assert_eq!(roster.unowned().len(), WeaponKind::ALL.len() - 3);
    }

    #[test]
    fn test_clone_offsets_alternate() {
        assert!(approx_eq(clone_offset(0), 0.15));
        assert!(approx_eq(clone_offset(1), -0.15));
        assert!(approx_eq(clone_offset(2), 0.30));
        assert!(approx_eq(clone_offset(3), -0.30));
    }
}

//! Level-up reward generation and the pending level-up queue

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::game::constants::rewards::*;
use crate::game::player::{PassiveStat, Player};
use crate::game::weapons::roster::RosterError;
use crate::game::weapons::{WeaponKind, WeaponRoster};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Reward {
    NewWeapon(WeaponKind),
    UpgradeWeapon { weapon: WeaponKind, next_level: u32 },
    Passive { stat: PassiveStat, amount: f32 },
    Heal(f32),
}

impl Reward {
    fn passive(stat: PassiveStat) -> Self {
        Reward::Passive {
            stat,
            amount: stat.reward_amount(),
        }
    }

    /// Short label for menus and logs
    pub fn label(&self) -> String {
        match self {
            Reward::NewWeapon(kind) => format!("New: {}", kind.name()),
            Reward::UpgradeWeapon { weapon, next_level } => format!("{} Lv.{}", weapon.name(), next_level),
            Reward::Passive { stat, amount } => format!("{} +{}", stat.name(), amount),
            Reward::Heal(amount) => format!("Heal {}", amount),
        }
    }

    /// Apply to the player or roster
    pub fn apply(&self, player: &mut Player, roster: &mut WeaponRoster) -> Result<(), RewardError> {
        match *self {
            Reward::NewWeapon(kind) => roster.add_kind(kind)?,
            Reward::UpgradeWeapon { weapon, .. } => {
                roster.upgrade_kind(weapon)?;
            }
            Reward::Passive { stat, amount } => player.add_passive(stat, amount),
            Reward::Heal(amount) => {
                player.heal(amount);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    #[error("no level-up choice is pending")]
    NoPendingChoice,

    #[error("choice index {0} out of range")]
    InvalidIndex(usize),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Three reward choices for the current roster
pub fn generate_choices<R: Rng>(roster: &WeaponRoster, rng: &mut R) -> Vec<Reward> {
    let upgrades = roster.upgradable().into_iter().filter_map(|kind| {
        roster.get(kind).map(|w| Reward::UpgradeWeapon {
            weapon: kind,
            next_level: w.level() + 1,
        })
    });

    let mut pool: Vec<Reward> = upgrades.collect();

    if roster.is_full() && pool.is_empty() {
        return fallback_choices(rng);
    }

    if !roster.is_full() {
        let unowned = roster.unowned();
        pool.extend(
            unowned
                .choose_multiple(rng, NEW_WEAPON_CANDIDATES)
                .map(|k| Reward::NewWeapon(*k)),
        );
    }
    pool.extend(
        PassiveStat::ALL
            .choose_multiple(rng, PASSIVE_CANDIDATES)
            .map(|s| Reward::passive(*s)),
    );

    pool.shuffle(rng);
    pool.truncate(CHOICES);
    pool
}

/// Everything is maxed: a heal plus two distinct passive bonuses
fn fallback_choices<R: Rng>(rng: &mut R) -> Vec<Reward> {
    let mut choices = vec![Reward::Heal(HEAL_AMOUNT)];
    choices.extend(
        PassiveStat::ALL
            .choose_multiple(rng, CHOICES - 1)
            .map(|s| Reward::passive(*s)),
    );
    choices
}

/// Level-ups waiting for a reward choice
#[derive(Debug, Clone, Default)]
pub struct LevelUpQueue {
    pending: u32,
    choices: Vec<Reward>,
}

impl LevelUpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue level-ups and make sure a choice set is on offer
    pub fn push<R: Rng>(&mut self, level_ups: u32, roster: &WeaponRoster, rng: &mut R) {
        if level_ups == 0 {
            return;
        }
        self.pending += level_ups;
        if self.choices.is_empty() {
            self.choices = generate_choices(roster, rng);
        }
    }

    /// Apply choice `index`, then offer a fresh set if more level-ups wait
    pub fn choose<R: Rng>(
        &mut self,
        index: usize,
        player: &mut Player,
        roster: &mut WeaponRoster,
        rng: &mut R,
    ) -> Result<Reward, RewardError> {
        if self.pending == 0 {
            return Err(RewardError::NoPendingChoice);
        }
        let reward = *self.choices.get(index).ok_or(RewardError::InvalidIndex(index))?;
        reward.apply(player, roster)?;
        info!("Level-up reward applied: {}", reward.label());

        self.pending -= 1;
        self.choices.clear();
        if self.pending > 0 {
            self.choices = generate_choices(roster, rng);
        }
        Ok(reward)
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    pub fn choices(&self) -> &[Reward] {
        &self.choices
    }

    pub fn clear(&mut self) {
        self.pending = 0;
        self.choices.clear();
    }
}

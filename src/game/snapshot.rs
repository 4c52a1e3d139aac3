//! HUD snapshot and end-of-run summary
//!
//! Plain serializable views built from the simulation each tick (HUD) or
//! once on game over (summary). Nothing here mutates game state.

use serde::{Deserialize, Serialize};

use crate::game::state::{GamePhase, GameState};
use crate::game::systems::skills::{SkillSnapshot, Skills};
use crate::game::weapons::{WeaponInfo, WeaponRoster};

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    /// Seconds survived
    pub elapsed: f32,
    pub weapons: Vec<WeaponInfo>,
    pub skills: SkillSnapshot,
    pub enemies: usize,
    pub kills: u32,
}

impl HudSnapshot {
    pub fn from_game(state: &GameState, roster: &WeaponRoster, skills: &Skills) -> Self {
        Self {
            tick: state.tick,
            phase: state.phase,
            health: state.player.health,
            max_health: state.player.max_health(),
            level: state.experience.level,
            exp: state.experience.current,
            exp_to_next: state.experience.to_next_level,
            elapsed: state.elapsed,
            weapons: roster.infos(),
            skills: skills.snapshot(),
            enemies: state.living_enemy_count(),
            kills: state.kills,
        }
    }
}

/// Result of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub survived_time: f32,
    pub level: u32,
    pub kills: u32,
    pub weapons: Vec<WeaponInfo>,
}

impl RunSummary {
    pub fn from_game(state: &GameState, roster: &WeaponRoster) -> Self {
        Self {
            survived_time: state.elapsed,
            level: state.experience.level,
            kills: state.kills,
            weapons: roster.infos(),
        }
    }

    /// "Magic Wand Lv.3, Garlic Lv.1"
    pub fn weapon_list(&self) -> String {
        self.weapons
            .iter()
            .map(|w| format!("{} Lv.{}", w.name, w.level))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

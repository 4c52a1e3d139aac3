//! Collectible pickups: experience gems, health packs and chests

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::constants::pickup as consts;
use crate::game::experience::Experience;
use crate::game::player::Player;
use crate::game::state::EntityId;
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickupKind {
    ExperienceGem { value: u32 },
    HealthPack { heal: f32 },
    Chest,
}

/// What collecting a pickup produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Collected {
    pub exp: u32,
    pub healed: f32,
    pub level_ups: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: PickupKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub alive: bool,
    /// Set once the player's magnet has started pulling it
    pub magnetized: bool,
}

impl Pickup {
    fn with_kind(kind: PickupKind, position: Vec2, radius: f32) -> Self {
        Self {
            id: 0,
            kind,
            position,
            velocity: Vec2::ZERO,
            radius,
            alive: true,
            magnetized: false,
        }
    }

    /// Gem sized by value, with a small random scatter impulse
    pub fn gem<R: Rng>(position: Vec2, value: u32, rng: &mut R) -> Self {
        let radius = if value < 5 {
            8.0
        } else if value < 20 {
            10.0
        } else {
            12.0
        };
        let mut gem = Self::with_kind(PickupKind::ExperienceGem { value }, position, radius);
        gem.velocity = Vec2::new(
            rng.gen_range(-consts::GEM_SCATTER..=consts::GEM_SCATTER),
            rng.gen_range(-consts::GEM_SCATTER..=consts::GEM_SCATTER),
        );
        gem
    }

    pub fn health_pack(position: Vec2, heal: f32) -> Self {
        Self::with_kind(PickupKind::HealthPack { heal }, position, consts::HEALTH_PACK_RADIUS)
    }

    pub fn chest(position: Vec2) -> Self {
        Self::with_kind(PickupKind::Chest, position, consts::CHEST_RADIUS)
    }

    /// Gems drift with friction; packs and chests stay put
    pub fn update(&mut self, dt: f32) {
        if let PickupKind::ExperienceGem { .. } = self.kind {
            self.velocity *= consts::GEM_FRICTION;
            self.position += self.velocity * dt;
        }
    }

    /// Whether the player's magnet can pull this pickup
    pub fn is_magnetic(&self) -> bool {
        !matches!(self.kind, PickupKind::Chest)
    }

    /// Steer toward the player at this kind's magnet speed
    pub fn move_towards_player(&mut self, player_pos: Vec2, dt: f32) {
        let speed = match self.kind {
            PickupKind::ExperienceGem { .. } => consts::GEM_MAGNET_SPEED,
            PickupKind::HealthPack { .. } => consts::HEALTH_PACK_MAGNET_SPEED,
            PickupKind::Chest => return,
        };
        self.magnetized = true;
        self.position = self.position.move_towards(player_pos, speed * dt);
    }

    /// Apply the payload and mark the pickup collected
    pub fn collect<R: Rng>(&mut self, player: &mut Player, experience: &mut Experience, rng: &mut R) -> Collected {
        let mut out = Collected::default();
        if !self.alive {
            return out;
        }
        match self.kind {
            PickupKind::ExperienceGem { value } => {
                out.exp = value;
                out.level_ups = experience.add(value);
            }
            PickupKind::HealthPack { heal } => {
                out.healed = player.heal(heal);
            }
            PickupKind::Chest => {
                let bursts = rng.gen_range(consts::CHEST_MIN_BURSTS..=consts::CHEST_MAX_BURSTS);
                for _ in 0..bursts {
                    out.exp += consts::CHEST_BURST_EXP;
                    out.level_ups += experience.add(consts::CHEST_BURST_EXP);
                }
                out.healed = player.heal(consts::CHEST_HEAL);
            }
        }
        self.alive = false;
        out
    }
}

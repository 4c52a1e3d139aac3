//! Game state definitions and structures
//!
//! Owns the live entity collections (enemies, projectiles, pickups) plus
//! the player and their experience. Systems never insert into these
//! collections directly: they push requests into a [`SpawnQueue`] that the
//! simulation drains between phases.

use serde::{Deserialize, Serialize};

use crate::game::enemy::Enemy;
use crate::game::experience::Experience;
use crate::game::pickup::Pickup;
use crate::game::player::Player;
use crate::game::projectile::Projectile;
use crate::util::vec2::Vec2;

/// Entity identifier for enemies, projectiles and pickups
pub type EntityId = u64;

/// Top-level simulation phase; only `Playing` advances the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    /// Waiting for a level-up reward to be chosen
    LevelUp,
    GameOver,
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

/// Insertion request produced during a phase
#[derive(Debug, Clone)]
pub enum SpawnRequest {
    Enemy(Enemy),
    Projectile(Projectile),
    Pickup(Pickup),
}

/// Per-tick outbox of spawn requests
#[derive(Debug, Default)]
pub struct SpawnQueue {
    requests: Vec<SpawnRequest>,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enemy(&mut self, enemy: Enemy) {
        self.requests.push(SpawnRequest::Enemy(enemy));
    }

    pub fn projectile(&mut self, projectile: Projectile) {
        self.requests.push(SpawnRequest::Projectile(projectile));
    }

    pub fn pickup(&mut self, pickup: Pickup) {
        self.requests.push(SpawnRequest::Pickup(pickup));
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SpawnRequest> {
        self.requests.drain(..)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Queued projectile requests (used by tests and Clone accounting)
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.requests.iter().filter_map(|r| match r {
            SpawnRequest::Projectile(p) => Some(p),
            _ => None,
        })
    }
}

/// Complete world state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tick: u64,
    pub phase: GamePhase,
    /// Seconds of `Playing` time this run
    pub elapsed: f32,
    pub player: Player,
    pub experience: Experience,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub kills: u32,
    next_entity_id: EntityId,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            tick: 0,
            phase: GamePhase::Menu,
            elapsed: 0.0,
            player: Player::new(Vec2::ZERO),
            experience: Experience::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            kills: 0,
            next_entity_id: 1,
        }
    }

    /// Get next entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    pub fn add_enemy(&mut self, mut enemy: Enemy) -> EntityId {
        let id = self.next_entity_id();
        enemy.id = id;
        self.enemies.push(enemy);
        id
    }

    pub fn add_projectile(&mut self, mut projectile: Projectile) -> EntityId {
        let id = self.next_entity_id();
        projectile.id = id;
        self.projectiles.push(projectile);
        id
    }

    pub fn add_pickup(&mut self, mut pickup: Pickup) -> EntityId {
        let id = self.next_entity_id();
        pickup.id = id;
        self.pickups.push(pickup);
        id
    }

    pub fn get_enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Total live entities (for tick budgeting and logs)
    pub fn entity_count(&self) -> usize {
        self.enemies.len() + self.projectiles.len() + self.pickups.len() + 1
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::EnemyKind;
    use crate::game::projectile::Owner;

    #[test]
    fn test_ids_are_unique_across_collections() {
        let mut state = GameState::new();
        let a = state.add_enemy(Enemy::new(EnemyKind::Basic, Vec2::ZERO));
        let b = state.add_projectile(Projectile::new(Owner::Player, Vec2::ZERO, Vec2::ZERO, 1.0));
        let c = state.add_pickup(Pickup::health_pack(Vec2::ZERO, 20.0));
        assert!(a != b && b != c && a != c);
        assert_eq!(state.enemies[0].id, a);
        assert_eq!(state.get_enemy(a).map(|e| e.kind), Some(EnemyKind::Basic));
        assert_eq!(state.entity_count(), 4);
    }

    #[test]
    fn test_spawn_queue_drains_in_order() {
        let mut queue = SpawnQueue::new();
        queue.enemy(Enemy::new(EnemyKind::Fast, Vec2::ZERO));
        queue.projectile(Projectile::new(Owner::Player, Vec2::ZERO, Vec2::ZERO, 1.0));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.projectiles().count(), 1);

        let drained: Vec<_> = queue.drain().collect();
        assert!(matches!(drained[0], SpawnRequest::Enemy(_)));
        assert!(matches!(drained[1], SpawnRequest::Projectile(_)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_living_count_ignores_dead() {
        let mut state = GameState::new();
        state.add_enemy(Enemy::new(EnemyKind::Basic, Vec2::ZERO));
        let id = state.add_enemy(Enemy::new(EnemyKind::Basic, Vec2::ZERO));
        if let Some(e) = state.get_enemy_mut(id) {
            e.kill();
        }
        assert_eq!(state.living_enemy_count(), 1);
    }
}

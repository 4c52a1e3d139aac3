//! Simulation orchestrator
//!
//! Owns every live collection and advances them in a fixed order once per
//! frame. Only [`GamePhase::Playing`] advances the world; every other phase
//! freezes it. Systems request insertions through the [`SpawnQueue`],
//! which is drained between phases, and only this module deletes entities.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SimConfig;
use crate::game::constants::pickup as pickup_consts;
use crate::game::input_buffer::{Action, ActionQueue, ActionSender, Intent};
use crate::game::pickup::Pickup;
use crate::game::projectile::Projectile;
use crate::game::render::{render_weapon, Render, Surface};
use crate::game::snapshot::{HudSnapshot, RunSummary};
use crate::game::state::{GamePhase, GameState, SpawnQueue, SpawnRequest};
use crate::game::systems::collision::{self, apply_blast};
use crate::game::systems::rewards::{LevelUpQueue, Reward, RewardError};
use crate::game::systems::skills::Skills;
use crate::game::systems::spawner::Spawner;
use crate::game::weapons::roster::clone_offset;
use crate::game::weapons::{WeaponContext, WeaponKind, WeaponRoster};

/// Notable things that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Started { session: Uuid },
    Paused,
    Resumed,
    ReturnedToMenu,
    Dashed,
    Bombed { killed: usize },
    DifficultyIncreased(u32),
    BossSpawned,
    LevelUp { level: u32, pending: u32 },
    GameOver(RunSummary),
}

pub struct Simulation {
    state: GameState,
    roster: WeaponRoster,
    spawner: Spawner,
    skills: Skills,
    levelups: LevelUpQueue,
    spawns: SpawnQueue,
    actions: ActionQueue,
    rng: StdRng,
    max_frame_dt: f32,
    starting_weapon: Option<WeaponKind>,
    session_id: Uuid,
    last_summary: Option<RunSummary>,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let starting_weapon = config.starting_weapon_kind();
        if starting_weapon.is_none() {
            if let Some(name) = &config.starting_weapon {
                warn!("Unknown starting weapon {:?}, runs start unarmed", name);
            }
        }

        Self {
            state: GameState::new(),
            roster: WeaponRoster::new(),
            spawner: Spawner::new(),
            skills: Skills::new(),
            levelups: LevelUpQueue::new(),
            spawns: SpawnQueue::new(),
            actions: ActionQueue::default(),
            rng,
            max_frame_dt: config.max_frame_dt,
            starting_weapon,
            session_id: Uuid::nil(),
            last_summary: None,
        }
    }

    /// Handle for the input collaborator
    pub fn action_sender(&self) -> ActionSender {
        self.actions.sender()
    }

    /// Queue an action for the next frame; false when the queue is full
    pub fn submit(&self, action: Action) -> bool {
        self.actions.try_submit(action)
    }

    /// Run one frame: drain actions, then tick if playing.
    /// `dt` is clamped to `[0, max_frame_dt]` before anything integrates.
    pub fn frame(&mut self, dt: f32, intent: Intent) -> Vec<SimEvent> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };
        let mut events = Vec::new();

        for action in self.actions.drain() {
            self.handle_action(action, &mut events);
        }

        if self.state.phase.is_running() {
            self.tick(dt, intent, &mut events);
        }
        events
    }

    fn handle_action(&mut self, action: Action, events: &mut Vec<SimEvent>) {
        let phase = self.state.phase;
        match action {
            Action::Dash if phase == GamePhase::Playing => {
                if self.skills.dash(&mut self.state.player) {
                    events.push(SimEvent::Dashed);
                }
            }
            Action::Bomb if phase == GamePhase::Playing => {
                if let Some(killed) = self.skills.bomb(&mut self.state.enemies) {
                    events.push(SimEvent::Bombed { killed });
                }
            }
            Action::TogglePause => match phase {
                GamePhase::Playing => {
                    self.state.phase = GamePhase::Paused;
                    events.push(SimEvent::Paused);
                }
                GamePhase::Paused => {
                    self.state.phase = GamePhase::Playing;
                    events.push(SimEvent::Resumed);
                }
                _ => {}
            },
            Action::Start => {
                if matches!(phase, GamePhase::Menu | GamePhase::GameOver | GamePhase::Paused) {
                    self.start();
                    events.push(SimEvent::Started {
                        session: self.session_id,
                    });
                }
            }
            Action::BackToMenu => {
                self.levelups.clear();
                self.state.phase = GamePhase::Menu;
                events.push(SimEvent::ReturnedToMenu);
            }
            Action::Dash | Action::Bomb => {}
        }
    }

    /// Begin a fresh run
    pub fn start(&mut self) {
        self.state = GameState::new();
        self.roster.clear();
        self.spawner.reset();
        self.skills.reset();
        self.levelups.clear();
        self.spawns.drain();
        self.session_id = Uuid::new_v4();

        if let Some(kind) = self.starting_weapon {
            if let Err(e) = self.roster.add_kind(kind) {
                warn!("Could not equip starting weapon: {}", e);
            }
        }
        self.state.phase = GamePhase::Playing;
        info!("Run {} started", self.session_id);
    }

    fn tick(&mut self, dt: f32, intent: Intent, events: &mut Vec<SimEvent>) {
        // Player
        self.state.player.update(dt, intent);

        // Weapons
        let mut dealt = {
            let mut ctx = WeaponContext::new(
                &self.state.player,
                &mut self.state.enemies,
                &mut self.spawns,
                &mut self.rng,
            );
            self.roster.update(dt, &mut ctx);
            ctx.damage_dealt
        };
        flush_spawns(&mut self.state, &mut self.spawns, &self.roster);
        self.skills.update(dt);

        // Spawner
        let report = self
            .spawner
            .update(dt, self.state.player.position, &mut self.spawns, &mut self.rng);
        if report.difficulty_increased {
            events.push(SimEvent::DifficultyIncreased(self.spawner.difficulty_level()));
        }
        if report.boss_spawned {
            events.push(SimEvent::BossSpawned);
        }
        flush_spawns(&mut self.state, &mut self.spawns, &self.roster);

        // Enemies
        let player_pos = self.state.player.position;
        for enemy in &mut self.state.enemies {
            let tick = enemy.update(dt, player_pos);
            dealt += tick.poison_damage;
            if let Some(fire) = tick.fire {
                self.spawns.projectile(Projectile::enemy_shot(&fire));
            }
        }
        flush_spawns(&mut self.state, &mut self.spawns, &self.roster);

        // Projectiles
        let mut blasts = Vec::new();
        for projectile in &mut self.state.projectiles {
            blasts.extend(projectile.update(dt, &self.state.enemies));
        }
        for blast in &blasts {
            dealt += apply_blast(&mut self.state.enemies, blast);
        }
        self.state.projectiles.retain(|p| p.alive);

        // Pickups
        for pickup in &mut self.state.pickups {
            pickup.update(dt);
        }
        self.state.pickups.retain(|p| p.alive);

        // Collisions
        let report = collision::update(&mut self.state, &mut self.roster, &mut self.rng, dt);
        dealt += report.damage_dealt;

        let lifesteal = self.roster.lifesteal_fraction();
        if lifesteal > 0.0 && dealt > 0.0 {
            self.state.player.heal(dealt * lifesteal);
        }

        self.prune_dead();

        self.state.elapsed += dt;
        self.state.tick += 1;

        if report.level_ups > 0 {
            self.levelups.push(report.level_ups, &self.roster, &mut self.rng);
            self.state.phase = GamePhase::LevelUp;
            info!(
                "Level up to {} ({} reward choices pending)",
                self.state.experience.level,
                self.levelups.pending()
            );
            events.push(SimEvent::LevelUp {
                level: self.state.experience.level,
                pending: self.levelups.pending(),
            });
        }

        if self.state.player.is_dead() {
            self.finish(events);
        }
    }

    /// Remove dead entities; each dead enemy leaves its drops behind
    fn prune_dead(&mut self) {
        let before = self.state.enemies.len();
        let rng = &mut self.rng;
        let spawns = &mut self.spawns;

        self.state.enemies.retain(|enemy| {
            if enemy.alive {
                return true;
            }
            spawns.pickup(Pickup::gem(enemy.position, enemy.exp_value, rng));
            if enemy.kind.is_boss() {
                spawns.pickup(Pickup::chest(enemy.position));
            } else if rng.gen_bool(pickup_consts::HEALTH_PACK_DROP_CHANCE) {
                spawns.pickup(Pickup::health_pack(enemy.position, pickup_consts::HEALTH_PACK_HEAL));
            }
            false
        });

        let killed = before - self.state.enemies.len();
        self.state.kills += killed as u32;
        self.state.projectiles.retain(|p| p.alive);
        self.state.pickups.retain(|p| p.alive);
        flush_spawns(&mut self.state, &mut self.spawns, &self.roster);

        if killed > 0 {
            debug!("Pruned {} dead enemies ({} alive)", killed, self.state.enemies.len());
        }
    }

    fn finish(&mut self, events: &mut Vec<SimEvent>) {
        let summary = RunSummary::from_game(&self.state, &self.roster);
        info!(
            "Run {} over after {:.1}s: level {}, {} kills, weapons [{}]",
            self.session_id,
            summary.survived_time,
            summary.level,
            summary.kills,
            summary.weapon_list()
        );
        self.levelups.clear();
        self.state.phase = GamePhase::GameOver;
        self.last_summary = Some(summary.clone());
        events.push(SimEvent::GameOver(summary));
    }

    /// Apply reward `index` of the current level-up offer. Resumes play
    /// once every queued level-up has been resolved.
    pub fn choose_reward(&mut self, index: usize) -> Result<Reward, RewardError> {
        if self.state.phase != GamePhase::LevelUp {
            return Err(RewardError::NoPendingChoice);
        }
        let reward = self
            .levelups
            .choose(index, &mut self.state.player, &mut self.roster, &mut self.rng)?;
        if self.levelups.is_empty() {
            self.state.phase = GamePhase::Playing;
        }
        Ok(reward)
    }

    pub fn reward_choices(&self) -> &[Reward] {
        self.levelups.choices()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_game(&self.state, &self.roster, &self.skills)
    }

    /// Summary of the most recently finished run
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    /// Draw every live entity: pickups, player, weapon effects, enemies,
    /// projectiles
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for pickup in self.state.pickups.iter().filter(|p| p.alive) {
            pickup.render(surface);
        }
        self.state.player.render(surface);
        for weapon in self.roster.weapons() {
            render_weapon(weapon, self.state.player.position, surface);
        }
        for enemy in self.state.enemies.iter().filter(|e| e.alive) {
            enemy.render(surface);
        }
        for projectile in self.state.projectiles.iter().filter(|p| p.alive) {
            projectile.render(surface);
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn roster(&self) -> &WeaponRoster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut WeaponRoster {
        &mut self.roster
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn skills(&self) -> &Skills {
        &self.skills
    }
}

/// Move queued requests into the live collections. Player weapon
/// projectiles are echoed here when Clone is equipped.
fn flush_spawns(state: &mut GameState, spawns: &mut SpawnQueue, roster: &WeaponRoster) {
    if spawns.is_empty() {
        return;
    }
    let clone = roster.clone_params();

    for request in spawns.drain() {
        match request {
            SpawnRequest::Enemy(enemy) => {
                state.add_enemy(enemy);
            }
            SpawnRequest::Pickup(pickup) => {
                state.add_pickup(pickup);
            }
            SpawnRequest::Projectile(projectile) => {
                if let Some((copies, multiplier)) = clone {
                    if projectile.source.is_some() && !projectile.echo && !projectile.is_hostile() {
                        for k in 0..copies {
                            state.add_projectile(projectile.echo_of(clone_offset(k), multiplier));
                        }
                    }
                }
                state.add_projectile(projectile);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::{Enemy, EnemyKind};
    use crate::game::pickup::PickupKind;
    use crate::game::projectile::Owner;
    use crate::game::render::{DrawKind, DrawList};
    use crate::util::vec2::Vec2;

    const DT: f32 = 0.05;

    fn unarmed() -> Simulation {
        let config = SimConfig {
            seed: Some(7),
            starting_weapon: None,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(&config);
        sim.start();
        sim
    }

    fn idle() -> Intent {
        Intent::default()
    }

    #[test]
    fn test_menu_freezes_world() {
        let mut sim = Simulation::new(&SimConfig::default());
        assert_eq!(sim.phase(), GamePhase::Menu);
        sim.frame(DT, idle());
        assert_eq!(sim.state().tick, 0);
        assert_eq!(sim.state().elapsed, 0.0);
    }

    #[test]
    fn test_start_action_equips_starting_weapon() {
        let config = SimConfig {
            seed: Some(1),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(&config);
        assert!(sim.submit(Action::Start));
        let events = sim.frame(DT, idle());

        assert!(matches!(events[0], SimEvent::Started { .. }));
        assert_eq!(sim.phase(), GamePhase::Playing);
        assert!(sim.roster().has(WeaponKind::MagicWand));
        assert_eq!(sim.state().tick, 1);
        assert!(!sim.session_id().is_nil());
    }

    #[test]
    fn test_frame_dt_is_clamped() {
        let mut sim = unarmed();
        sim.frame(5.0, idle());
        assert!((sim.state().elapsed - 0.1).abs() < 1e-6);
        sim.frame(-1.0, idle());
        sim.frame(f32::NAN, idle());
        assert!((sim.state().elapsed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pause_toggles_and_freezes() {
        let mut sim = unarmed();
        sim.frame(DT, idle());
        sim.submit(Action::TogglePause);
        let events = sim.frame(DT, idle());
        assert_eq!(events, vec![SimEvent::Paused]);
        let tick = sim.state().tick;
        sim.frame(DT, idle());
        assert_eq!(sim.state().tick, tick);

        sim.submit(Action::TogglePause);
        sim.frame(DT, idle());
        assert_eq!(sim.phase(), GamePhase::Playing);
        assert_eq!(sim.state().tick, tick + 1);
    }

    #[test]
    fn test_player_moves_before_anything_else() {
        let mut sim = unarmed();
        sim.frame(
            0.1,
            Intent {
                right: true,
                ..Intent::default()
            },
        );
        assert!((sim.state().player.position.x - 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_dead_boss_drops_gem_and_chest() {
        let mut sim = unarmed();
        let mut boss = Enemy::new(EnemyKind::Boss, Vec2::new(1000.0, 0.0));
        boss.kill();
        sim.state_mut().add_enemy(boss);

        sim.frame(DT, idle());
        let state = sim.state();
        assert!(state.enemies.is_empty());
        assert_eq!(state.kills, 1);
        assert_eq!(state.pickups.len(), 2);
        assert!(matches!(state.pickups[0].kind, PickupKind::ExperienceGem { value: 100 }));
        assert!(matches!(state.pickups[1].kind, PickupKind::Chest));
    }

    #[test]
    fn test_bomb_kills_are_pruned_with_drops() {
        let mut sim = unarmed();
        for x in [600.0, 700.0, 800.0] {
            sim.state_mut().add_enemy(Enemy::new(EnemyKind::Basic, Vec2::new(x, 0.0)));
        }
        sim.submit(Action::Bomb);
        let events = sim.frame(DT, idle());
        assert!(events.contains(&SimEvent::Bombed { killed: 3 }));
        assert_eq!(sim.state().kills, 3);
        assert!(sim.state().pickups.len() >= 3);
    }

    #[test]
    fn test_level_up_pauses_until_every_choice_is_made() {
        let mut sim = unarmed();
        let mut rng = StdRng::seed_from_u64(3);
        // 10 + 28 exp crosses two thresholds at once
        sim.state_mut().add_pickup(Pickup::gem(Vec2::ZERO, 38, &mut rng));

        let events = sim.frame(DT, idle());
        assert!(events.contains(&SimEvent::LevelUp { level: 3, pending: 2 }));
        assert_eq!(sim.phase(), GamePhase::LevelUp);
        assert_eq!(sim.reward_choices().len(), 3);

        let tick = sim.state().tick;
        sim.submit(Action::Dash);
        sim.frame(DT, idle());
        assert_eq!(sim.state().tick, tick);
        assert_eq!(sim.skills().dash_charges(), 2);

        assert!(sim.choose_reward(0).is_ok());
        assert_eq!(sim.phase(), GamePhase::LevelUp);
        assert_eq!(sim.choose_reward(5), Err(RewardError::InvalidIndex(5)));
        assert!(sim.choose_reward(1).is_ok());
        assert_eq!(sim.phase(), GamePhase::Playing);
        assert_eq!(sim.choose_reward(0), Err(RewardError::NoPendingChoice));
    }

    #[test]
    fn test_game_over_wins_over_level_up() {
        let mut sim = unarmed();
        let mut rng = StdRng::seed_from_u64(3);
        sim.state_mut().add_pickup(Pickup::gem(Vec2::ZERO, 10, &mut rng));
        sim.state_mut().player.health = 0.0;

        let events = sim.frame(DT, idle());
        assert!(matches!(events.last(), Some(SimEvent::GameOver(_))));
        assert_eq!(sim.phase(), GamePhase::GameOver);
        assert!(sim.reward_choices().is_empty());
        assert_eq!(sim.last_summary().map(|s| s.level), Some(2));

        sim.frame(DT, idle());
        assert_eq!(sim.phase(), GamePhase::GameOver);

        sim.submit(Action::Start);
        sim.frame(DT, idle());
        assert_eq!(sim.phase(), GamePhase::Playing);
        assert_eq!(sim.state().player.health, 100.0);
        assert_eq!(sim.state().experience.level, 1);
    }

    #[test]
    fn test_contact_damage_can_end_the_run() {
        let mut sim = unarmed();
        sim.state_mut().player.health = 5.0;
        sim.state_mut().add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(10.0, 0.0)));
        let events = sim.frame(DT, idle());
        assert!(matches!(events.last(), Some(SimEvent::GameOver(_))));
        assert_eq!(sim.state().player.health, 0.0);
    }

    #[test]
    fn test_shooter_fire_becomes_hostile_projectile() {
        let mut sim = unarmed();
        sim.state_mut().add_enemy(Enemy::new(EnemyKind::Shooter, Vec2::new(250.0, 0.0)));
        sim.frame(DT, idle());

        let shots: Vec<_> = sim.state().projectiles.iter().filter(|p| p.is_hostile()).collect();
        assert_eq!(shots.len(), 1);
        assert!(shots[0].velocity.x < 0.0);
        assert_eq!(shots[0].damage, 8.0);
    }

    #[test]
    fn test_clone_echoes_weapon_projectiles() {
        let config = SimConfig {
            seed: Some(5),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(&config);
        sim.start();
        sim.roster_mut().add_kind(WeaponKind::Clone).ok();
        sim.state_mut().add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(400.0, 0.0)));

        sim.frame(DT, idle());
        let projectiles = &sim.state().projectiles;
        assert_eq!(projectiles.len(), 2);
        let echo = projectiles.iter().find(|p| p.echo).map(|p| p.damage);
        let original = projectiles.iter().find(|p| !p.echo).map(|p| p.damage);
        assert_eq!(original, Some(15.0));
        assert_eq!(echo, Some(7.5));
    }

    #[test]
    fn test_lifesteal_heals_from_damage_dealt() {
        let mut sim = unarmed();
        sim.roster_mut().add_kind(WeaponKind::LifeSteal).ok();
        sim.state_mut().player.health = 50.0;
        sim.state_mut().add_enemy(Enemy::new(EnemyKind::Tank, Vec2::new(300.0, 0.0)));
        sim.state_mut()
            .add_projectile(Projectile::new(Owner::Player, Vec2::new(300.0, 0.0), Vec2::ZERO, 40.0));

        sim.frame(DT, idle());
        assert!((sim.state().player.health - 52.0).abs() < 1e-3);
    }

    #[test]
    fn test_back_to_menu_from_anywhere() {
        let mut sim = unarmed();
        sim.submit(Action::BackToMenu);
        let events = sim.frame(DT, idle());
        assert_eq!(events, vec![SimEvent::ReturnedToMenu]);
        assert_eq!(sim.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_render_order() {
        let config = SimConfig {
            seed: Some(11),
            starting_weapon: Some("Holy Bible".to_string()),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(&config);
        sim.start();
        sim.frame(DT, idle());

        let mut rng = StdRng::seed_from_u64(1);
        let state = sim.state_mut();
        state.add_enemy(Enemy::new(EnemyKind::Fast, Vec2::new(500.0, 0.0)));
        state.add_pickup(Pickup::gem(Vec2::new(-500.0, 0.0), 3, &mut rng));
        state.add_projectile(Projectile::new(Owner::Enemy(99), Vec2::new(0.0, 500.0), Vec2::ZERO, 1.0));

        let mut list = DrawList::new();
        sim.render(&mut list);
        let position = |wanted: fn(&DrawKind) -> bool| list.kinds().position(|k| wanted(&k));

        let gem = position(|k| matches!(k, DrawKind::Gem));
        let player = position(|k| matches!(k, DrawKind::Player | DrawKind::PlayerInvincible));
        let book = position(|k| matches!(k, DrawKind::Orbital(WeaponKind::HolyBible)));
        let enemy = position(|k| matches!(k, DrawKind::Enemy(_)));
        let shot = position(|k| matches!(k, DrawKind::EnemyShot));
        assert!(gem < player && player < book && book < enemy && enemy < shot);
        assert!(gem.is_some() && shot.is_some());
    }

    #[test]
    fn test_hud_tracks_run() {
        let mut sim = unarmed();
        for _ in 0..10 {
            sim.frame(0.1, idle());
        }
        let hud = sim.hud();
        assert!((hud.elapsed - 1.0).abs() < 1e-4);
        assert_eq!(hud.tick, 10);
        assert_eq!(hud.level, 1);
        assert!(hud.weapons.is_empty());
    }
}

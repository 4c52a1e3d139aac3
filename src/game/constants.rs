//! Gameplay tuning constants
//!
//! Weapon base stats and level tables live next to the weapons in
//! `weapons::upgrades`; everything else is here.

/// Player base stats
pub mod player {
    /// Collision radius
    pub const RADIUS: f32 = 20.0;
    pub const BASE_MAX_HEALTH: f32 = 100.0;
    /// Movement speed in units per second
    pub const BASE_SPEED: f32 = 150.0;
    pub const BASE_DAMAGE: f32 = 10.0;
    /// Pickup magnet range before bonuses
    pub const BASE_MAGNET_RANGE: f32 = 100.0;
    /// Immunity window after taking a hit (seconds)
    pub const INVINCIBILITY_DURATION: f32 = 1.0;
    /// Cooldown reduction is capped so weapons never fire faster than this factor
    pub const MIN_COOLDOWN_FACTOR: f32 = 0.1;
}

/// Enemy behaviour constants (per-kind stats live on `EnemyKind`)
pub mod enemy {
    /// Seconds between shooter volleys
    pub const SHOOTER_FIRE_INTERVAL: f32 = 2.0;
    /// Shooters only fire when the player is closer than this
    pub const SHOOTER_RANGE: f32 = 300.0;
    /// Enemy shot speed
    pub const SHOT_SPEED: f32 = 200.0;
    pub const SHOT_RADIUS: f32 = 5.0;
    pub const SHOT_LIFETIME: f32 = 3.0;
    /// Poison ticks once per this many seconds
    pub const POISON_TICK: f32 = 1.0;
}

/// Spawner timing and difficulty curve
pub mod spawner {
    pub const INITIAL_SPAWN_INTERVAL: f32 = 2.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.5;
    /// Interval shrink per difficulty step
    pub const SPAWN_INTERVAL_STEP: f32 = 0.1;
    /// Seconds between difficulty increases
    pub const DIFFICULTY_INTERVAL: f32 = 30.0;
    /// Seconds between boss spawns
    pub const BOSS_INTERVAL: f32 = 120.0;
    /// Spawn ring distance from the player
    pub const SPAWN_DISTANCE: f32 = 600.0;
    pub const MAX_BATCH: u32 = 5;

    /// Cumulative roll bands for enemy kind selection
    pub const BASIC_BAND: f32 = 0.5;
    pub const FAST_BAND: f32 = 0.7;
    pub const TANK_BAND: f32 = 0.85;
    /// Shooters unlock once `min(level / 10, 1)` exceeds this
    pub const SHOOTER_UNLOCK: f32 = 0.3;

    /// Per-level stat scaling rates
    pub const HEALTH_RATE: f32 = 0.1;
    pub const DAMAGE_RATE: f32 = 0.05;
    pub const EXP_RATE: f32 = 0.1;
    pub const BOSS_DAMAGE_RATE: f32 = 0.1;
}

/// Pickups and drops
pub mod pickup {
    /// Gem velocity multiplier applied every tick
    pub const GEM_FRICTION: f32 = 0.9;
    /// Initial scatter impulse (per axis, +/-)
    pub const GEM_SCATTER: f32 = 25.0;
    pub const GEM_MAGNET_SPEED: f32 = 300.0;
    pub const HEALTH_PACK_MAGNET_SPEED: f32 = 200.0;
    pub const HEALTH_PACK_HEAL: f32 = 20.0;
    pub const HEALTH_PACK_RADIUS: f32 = 12.0;
    pub const HEALTH_PACK_DROP_CHANCE: f64 = 0.02;
    pub const CHEST_RADIUS: f32 = 20.0;
    pub const CHEST_MIN_BURSTS: u32 = 2;
    pub const CHEST_MAX_BURSTS: u32 = 4;
    pub const CHEST_BURST_EXP: u32 = 20;
    pub const CHEST_HEAL: f32 = 30.0;
}

/// Experience curve
pub mod experience {
    /// Exp needed for level 1 -> 2, and the curve scale
    pub const BASE: f32 = 10.0;
    /// Threshold = floor(BASE * level^EXPONENT)
    pub const EXPONENT: f32 = 1.5;
}

/// Player-triggered skills
pub mod skills {
    pub const DASH_MAX_CHARGES: u32 = 2;
    pub const DASH_RECHARGE: f32 = 3.0;
    pub const DASH_DISTANCE: f32 = 150.0;
    /// Active window; also the minimum invincibility granted
    pub const DASH_DURATION: f32 = 0.2;
    pub const BOMB_COOLDOWN: f32 = 60.0;
    /// Damage dealt to bosses (everything else dies outright)
    pub const BOMB_BOSS_DAMAGE: f32 = 500.0;
}

/// Level-up reward tuning
pub mod rewards {
    /// Choices offered per level-up
    pub const CHOICES: usize = 3;
    /// Unowned weapons sampled as new-weapon candidates
    pub const NEW_WEAPON_CANDIDATES: usize = 5;
    /// Passive stats sampled as candidates
    pub const PASSIVE_CANDIDATES: usize = 2;
    pub const HEAL_AMOUNT: f32 = 50.0;
}

/// Simulation loop limits
pub mod sim {
    /// Largest dt a single frame may integrate
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Action queue capacity
    pub const ACTION_QUEUE_CAPACITY: usize = 64;
}

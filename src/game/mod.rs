pub mod constants;
pub mod enemy;
pub mod experience;
pub mod game_loop;
pub mod input_buffer;
pub mod performance;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod render;
pub mod snapshot;
pub mod state;
pub mod systems;
pub mod weapons;

pub use game_loop::{SimEvent, Simulation};

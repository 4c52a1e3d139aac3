//! Survivor Sim - real-time top-down survival combat simulation core
//!
//! The [`game::Simulation`] owns every live entity and advances them in a
//! fixed order once per frame. Rendering, HUD and input devices are
//! collaborators reached through traits and queues.

pub mod config;
pub mod game;
pub mod util;

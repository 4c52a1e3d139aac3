//! Game systems (collision, spawning, skills, level-up rewards)

pub mod collision;
pub mod rewards;
pub mod skills;
pub mod spawner;

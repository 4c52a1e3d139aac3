//! Experience accumulation and the level curve

use serde::{Deserialize, Serialize};

use crate::game::constants::experience as consts;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub current: u32,
    pub level: u32,
    pub to_next_level: u32,
}

/// Exp needed to advance from `level` to `level + 1`
pub fn threshold_for(level: u32) -> u32 {
    if level <= 1 {
        return consts::BASE as u32;
    }
    (consts::BASE * (level as f32).powf(consts::EXPONENT)).floor() as u32
}

impl Experience {
    pub fn new() -> Self {
        Self {
            current: 0,
            level: 1,
            to_next_level: threshold_for(1),
        }
    }

    /// Add exp and resolve every threshold it crosses. Returns the number
    /// of level-ups gained.
    pub fn add(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_add(amount);
        let mut gained = 0;
        while self.current >= self.to_next_level {
            self.current -= self.to_next_level;
            self.level += 1;
            self.to_next_level = threshold_for(self.level).max(1);
            gained += 1;
        }
        gained
    }

    /// Fill fraction toward the next level, for the HUD
    pub fn progress(&self) -> f32 {
        self.current as f32 / self.to_next_level.max(1) as f32
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_constants() {
        let exp = Experience::new();
        assert_eq!(exp.level, 1);
        assert_eq!(exp.to_next_level, 10);
        assert_eq!(threshold_for(2), 28);
        assert_eq!(threshold_for(3), 51);
        assert_eq!(threshold_for(4), 80);
    }

    #[test]
    fn test_two_small_gems_level_once() {
        let mut exp = Experience::new();
        assert_eq!(exp.add(5), 0);
        assert_eq!(exp.add(5), 1);
        assert_eq!(exp.level, 2);
        assert_eq!(exp.current, 0);
        assert_eq!(exp.to_next_level, 28);
    }

    #[test]
    fn test_large_gain_crosses_several_thresholds() {
        let mut exp = Experience::new();
        // 10 + 28 + 51 = 89 reaches level 4 with 1 left over
        assert_eq!(exp.add(90), 3);
        assert_eq!(exp.level, 4);
        assert_eq!(exp.current, 1);
        assert!(exp.current < exp.to_next_level);
    }

    #[test]
    fn test_invariant_after_arbitrary_gains() {
        let mut exp = Experience::new();
        for amount in [0, 3, 17, 250, 1, 999, 42] {
            exp.add(amount);
            assert!(exp.current < exp.to_next_level);
        }
    }
}

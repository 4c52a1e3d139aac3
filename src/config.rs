use crate::game::constants::sim;
use crate::game::weapons::WeaponKind;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Frames per second driven by the headless runner
    pub tick_rate: u32,
    /// Upper bound on a single frame's dt (seconds)
    pub max_frame_dt: f32,
    /// Fixed RNG seed; None draws one from OS entropy
    pub seed: Option<u64>,
    /// Weapon equipped at the start of every run; None starts empty-handed
    pub starting_weapon: Option<String>,
    /// Wall-clock cap for the headless runner (seconds)
    pub run_seconds: f32,
    /// Seconds between HUD snapshot logs
    pub snapshot_interval: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_frame_dt: sim::MAX_FRAME_DT,
            seed: None,
            starting_weapon: Some(WeaponKind::MagicWand.name().to_string()),
            run_seconds: 300.0,
            snapshot_interval: 5.0,
        }
    }
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values keep their default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(rate) = lookup("TICK_RATE") {
            match rate.parse::<u32>() {
                Ok(parsed) if (1..=240).contains(&parsed) => config.tick_rate = parsed,
                Ok(_) => tracing::warn!("TICK_RATE must be 1-240, using default"),
                Err(_) => tracing::warn!("Invalid TICK_RATE '{}', using default", rate),
            }
        }

        if let Some(dt) = lookup("MAX_FRAME_DT") {
            match dt.parse::<f32>() {
                Ok(parsed) if parsed > 0.0 && parsed <= 1.0 => config.max_frame_dt = parsed,
                Ok(_) => tracing::warn!("MAX_FRAME_DT must be in (0, 1], using default"),
                Err(_) => tracing::warn!("Invalid MAX_FRAME_DT '{}', using default", dt),
            }
        }

        if let Some(seed) = lookup("SIM_SEED") {
            if let Ok(parsed) = seed.parse::<u64>() {
                config.seed = Some(parsed);
            } else {
                tracing::warn!("Invalid SIM_SEED '{}', using entropy", seed);
            }
        }

        if let Some(weapon) = lookup("STARTING_WEAPON") {
            if weapon.trim().eq_ignore_ascii_case("none") {
                config.starting_weapon = None;
            } else {
                config.starting_weapon = Some(weapon);
            }
        }

        if let Some(secs) = lookup("RUN_SECONDS") {
            match secs.parse::<f32>() {
                Ok(parsed) if parsed > 0.0 => config.run_seconds = parsed,
                Ok(_) => tracing::warn!("RUN_SECONDS must be > 0, using default"),
                Err(_) => tracing::warn!("Invalid RUN_SECONDS '{}', using default", secs),
            }
        }

        if let Some(secs) = lookup("SNAPSHOT_INTERVAL") {
            match secs.parse::<f32>() {
                Ok(parsed) if parsed > 0.0 => config.snapshot_interval = parsed,
                Ok(_) => tracing::warn!("SNAPSHOT_INTERVAL must be > 0, using default"),
                Err(_) => tracing::warn!("Invalid SNAPSHOT_INTERVAL '{}', using default", secs),
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=240).contains(&self.tick_rate) {
            return Err(format!("tick_rate must be 1-240, got {}", self.tick_rate));
        }
        if !(self.max_frame_dt > 0.0 && self.max_frame_dt <= 1.0) {
            return Err(format!("max_frame_dt must be in (0, 1], got {}", self.max_frame_dt));
        }
        if let Some(name) = &self.starting_weapon {
            if WeaponKind::from_name(name).is_none() {
                return Err(format!("unknown starting weapon '{}'", name));
            }
        }
        if self.run_seconds <= 0.0 {
            return Err("run_seconds must be > 0".to_string());
        }
        if self.snapshot_interval <= 0.0 {
            return Err("snapshot_interval must be > 0".to_string());
        }
        Ok(())
    }

    /// Starting weapon resolved against the catalog
    pub fn starting_weapon_kind(&self) -> Option<WeaponKind> {
        self.starting_weapon.as_deref().and_then(WeaponKind::from_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.max_frame_dt, 0.1);
        assert_eq!(config.starting_weapon_kind(), Some(WeaponKind::MagicWand));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_values_from_lookup() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("TICK_RATE", "30"),
            ("SIM_SEED", "1234"),
            ("STARTING_WEAPON", "garlic"),
            ("RUN_SECONDS", "12.5"),
        ]));
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.starting_weapon_kind(), Some(WeaponKind::Garlic));
        assert_eq!(config.run_seconds, 12.5);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("TICK_RATE", "0"),
            ("MAX_FRAME_DT", "fast"),
            ("SIM_SEED", "-1"),
            ("SNAPSHOT_INTERVAL", "-3"),
        ]));
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_starting_weapon_none_and_unknown() {
        let config = SimConfig::from_lookup(lookup_from(&[("STARTING_WEAPON", "None")]));
        assert_eq!(config.starting_weapon, None);
        assert!(config.validate().is_ok());

        let config = SimConfig::from_lookup(lookup_from(&[("STARTING_WEAPON", "Rubber Duck")]));
        assert!(config.validate().is_err());
    }
}

//! Race tuning, optionally loaded from TOML

use looprace_core::{LoopError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning values for a race session. Speeds are distance units per millisecond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub base_speed: f32,
    /// Extra speed once the first lap is done.
    pub lap_speed_bonus: f32,
    /// How far ahead the ship looks to orient itself.
    pub lookahead: f32,
    /// Collision radius for pickups and the respawn line.
    pub pickup_radius: f32,
    /// Collectables sit on every `pickup_spacing`-th loop point.
    pub pickup_spacing: usize,
    pub health_pack_spacing: usize,
    /// Health packs are shifted this many points past their slot.
    pub health_pack_offset: usize,
    pub max_health: i32,
    pub health_pack_heal: i32,
    /// Health lost per frame while touching a wrong pickup.
    pub wrong_pickup_damage: i32,
    /// Spin rate of pickups, radians per millisecond.
    pub spin_rate: f32,
    /// Fixed seed for target selection; random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.1,
            lap_speed_bonus: 0.06,
            lookahead: 1.0,
            pickup_radius: 5.0,
            pickup_spacing: 50,
            health_pack_spacing: 250,
            health_pack_offset: 36,
            max_health: 100,
            health_pack_heal: 10,
            wrong_pickup_damage: 1,
            spin_rate: 0.2,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_speed.is_nan()
            || self.base_speed < 0.0
            || self.lap_speed_bonus.is_nan()
            || self.lap_speed_bonus < 0.0
        {
            return Err(LoopError::InvalidConfig(
                "speeds must be non-negative".to_string(),
            ));
        }
        if self.lookahead.is_nan() || self.lookahead <= 0.0 {
            return Err(LoopError::InvalidConfig(format!(
                "lookahead must be positive, got {}",
                self.lookahead
            )));
        }
        if self.pickup_spacing == 0 || self.health_pack_spacing == 0 {
            return Err(LoopError::InvalidConfig(
                "pickup spacings must be at least 1".to_string(),
            ));
        }
        if self.max_health <= 0 {
            return Err(LoopError::InvalidConfig(format!(
                "max_health must be positive, got {}",
                self.max_health
            )));
        }
        Ok(())
    }
}

//! Tunable thresholds for the ambient movement policy and anti-cheese limits.
//! Defaults reproduce the original arcade balance; a TOML file can override
//! individual fields for experimentation.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Base likelihood to change movement action (lower is more likely).
    pub act_thresh: i32,
    /// Base timer before the movement action may change again.
    pub act_timer: i32,
    /// Base likelihood to keep moving (lower is more likely).
    pub move_thresh: i32,
    /// Base likelihood to move forward (lower is more likely).
    pub fwd_thresh: i32,
    /// Base likelihood to jump while moving forward (lower is more likely).
    pub fwd_jump_thresh: i32,
    /// Base likelihood to jump while moving backward (lower is more likely).
    pub back_jump_thresh: i32,
    /// Base likelihood to jump while standing still (lower is more likely).
    pub still_jump_thresh: i32,
    /// Ticks to hold each command-string input before advancing.
    pub input_lag: u8,
    /// Throws suffered before the AI reshapes its personality.
    pub max_times_thrown: u32,
    /// Projectile hits suffered before the AI reshapes its personality.
    pub max_times_shot: u32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            act_thresh: 90,
            act_timer: 28,
            move_thresh: 16,
            fwd_thresh: 50,
            fwd_jump_thresh: 76,
            back_jump_thresh: 82,
            still_jump_thresh: 95,
            input_lag: 3,
            max_times_thrown: 3,
            max_times_shot: 4,
        }
    }
}

impl AiTuning {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("parsing AI tuning")
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading AI tuning from {}", path.display()))?;
        Self::from_toml_str(&raw)
    }
}

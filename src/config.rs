//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup; every knob has a default so the replay binary
//! and tests run without any environment at all.

use std::env;

use serde::{Deserialize, Serialize};

/// Subscription tier. Only the shield bank cap differs between tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Pro,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Steps per day that count as meeting the goal
    pub daily_step_goal: u32,
    /// Readings above this are treated as corrupt and discarded
    pub step_ceiling_per_day: u32,
    /// Distance/steps ratios above this are implausible for walking
    pub max_stride_meters: f64,
    /// Shield bank cap for free-tier users
    pub max_banked_shields_free: u32,
    /// Shield bank cap for pro-tier users
    pub max_banked_shields_pro: u32,
    /// How far back a missed day can still be manually repaired
    pub repair_window_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daily_step_goal: 7_000,
            step_ceiling_per_day: 100_000,
            max_stride_meters: 2.5,
            max_banked_shields_free: 2,
            max_banked_shields_pro: 5,
            repair_window_days: 7,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            daily_step_goal: env_u32("STEP_GOAL", 7_000)?,
            step_ceiling_per_day: env_u32("STEP_CEILING_PER_DAY", 100_000)?,
            max_stride_meters: env_f64("MAX_STRIDE_METERS", 2.5)?,
            max_banked_shields_free: env_u32("MAX_BANKED_SHIELDS_FREE", 2)?,
            max_banked_shields_pro: env_u32("MAX_BANKED_SHIELDS_PRO", 5)?,
            repair_window_days: env_i64("REPAIR_WINDOW_DAYS", 7)?,
        };

        if config.daily_step_goal == 0 {
            return Err(ConfigError::Invalid("STEP_GOAL"));
        }
        if config.step_ceiling_per_day <= config.daily_step_goal {
            return Err(ConfigError::Invalid("STEP_CEILING_PER_DAY"));
        }
        if config.repair_window_days < 0 {
            return Err(ConfigError::Invalid("REPAIR_WINDOW_DAYS"));
        }

        Ok(config)
    }

    /// Shield bank cap for the given tier.
    pub fn max_banked(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Free => self.max_banked_shields_free,
            Tier::Pro => self.max_banked_shields_pro,
        }
    }
}

fn env_u32(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

fn env_i64(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

fn env_f64(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

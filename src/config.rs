//! Game configuration.
//!
//! `GameConfig` bundles what a collaborator chooses before the first move:
//! the mode, the time control, an optional RNG seed for reproducible setups
//! and the period of the clock task. Every field has a default, so a partial
//! JSON document is enough.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{DEFAULT_TIME_CONTROL_SECONDS, MAX_TIME_CONTROL_SECONDS};
use crate::setup::setup_generator::GameMode;

/// Per-side starting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControl {
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

impl TimeControl {
    pub const fn from_seconds(total: u32) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    /// `None` when the sum does not fit in a `u32`.
    pub fn total_seconds(&self) -> Option<u32> {
        self.minutes.checked_mul(60)?.checked_add(self.seconds)
    }

    /// Starting clock value, positive and at most one day.
    pub fn starting_seconds(&self) -> EngineResult<u32> {
        match self.total_seconds() {
            Some(0) => Err(EngineError::InvalidState(
                "time control must be positive".to_owned(),
            )),
            Some(total) if total <= MAX_TIME_CONTROL_SECONDS => Ok(total),
            _ => Err(EngineError::InvalidState(format!(
                "time control exceeds {MAX_TIME_CONTROL_SECONDS} seconds"
            ))),
        }
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::from_seconds(DEFAULT_TIME_CONTROL_SECONDS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub time_control: TimeControl,
    /// Fixed seed for the setup shuffle and joker pick; entropy when absent.
    pub seed: Option<u64>,
    /// Wall-clock length of one clock tick.
    pub clock_period_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Joker,
            time_control: TimeControl::default(),
            seed: None,
            clock_period_ms: 1000,
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> EngineResult<Self> {
        let config: GameConfig = serde_json::from_str(raw)
            .map_err(|e| EngineError::InvalidState(format!("bad game config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.clock_period_ms == 0 {
            return Err(EngineError::InvalidState(
                "clock period must be positive".to_owned(),
            ));
        }
        self.time_control.starting_seconds()?;
        Ok(())
    }

    #[inline]
    pub fn clock_period(&self) -> Duration {
        Duration::from_millis(self.clock_period_ms)
    }
}

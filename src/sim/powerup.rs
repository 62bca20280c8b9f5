//! Per-run power-up modifiers
//!
//! A power-up is picked (and paid for) before the run starts and stays fixed
//! for the whole run. Only one can be active at a time.

use serde::{Deserialize, Serialize};

use crate::tuning::RunnerTuning;

/// Power-up chosen before a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerUp {
    #[default]
    None,
    /// Absorbs obstacle hits until it breaks
    Shield,
    /// Speed increases half as often
    SlowMotion,
    /// Score counts double
    DoublePoints,
}

impl PowerUp {
    pub const ALL: [PowerUp; 4] = [
        PowerUp::None,
        PowerUp::Shield,
        PowerUp::SlowMotion,
        PowerUp::DoublePoints,
    ];

    /// Credits charged to start a run with this selection
    pub fn cost(&self) -> u32 {
        match self {
            PowerUp::None => 1,
            PowerUp::Shield => 3,
            PowerUp::SlowMotion => 2,
            PowerUp::DoublePoints => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUp::None => "None",
            PowerUp::Shield => "Shield",
            PowerUp::SlowMotion => "Slow Motion",
            PowerUp::DoublePoints => "Double Points",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "none" => Some(PowerUp::None),
            "shield" => Some(PowerUp::Shield),
            "slowmotion" | "slow" => Some(PowerUp::SlowMotion),
            "doublepoints" | "double" => Some(PowerUp::DoublePoints),
            _ => None,
        }
    }
}

/// How an obstacle hit is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// Shield took the hit; the obstacle is removed and the run continues
    Absorbed,
    /// The run ends
    Fatal,
}

/// Power-up effects for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpState {
    pub selection: PowerUp,
    pub shield_hits: u32,
    pub max_shield_hits: u32,
    pub score_multiplier: u64,
    /// Unscaled score between permanent speed increases
    pub speed_up_interval: u64,
}

impl PowerUpState {
    pub fn from_selection(selection: PowerUp, tuning: &RunnerTuning) -> Self {
        let score_multiplier = match selection {
            PowerUp::DoublePoints => tuning.double_points_multiplier,
            _ => 1,
        };
        let speed_up_interval = match selection {
            PowerUp::SlowMotion => tuning.slow_motion_interval,
            _ => tuning.speed_up_interval,
        };
        let max_shield_hits = match selection {
            PowerUp::Shield => tuning.shield_max_hits,
            _ => 0,
        };

        Self {
            selection,
            shield_hits: 0,
            max_shield_hits,
            score_multiplier,
            speed_up_interval,
        }
    }

    pub fn shield_active(&self) -> bool {
        self.selection == PowerUp::Shield
    }

    /// Hits the shield can still take before the next one is fatal (Shield only)
    pub fn shield_remaining(&self) -> Option<u32> {
        self.shield_active()
            .then(|| self.max_shield_hits.saturating_sub(self.shield_hits))
    }

    /// Settle one obstacle hit
    pub fn resolve_collision(&mut self) -> CollisionOutcome {
        if !self.shield_active() {
            return CollisionOutcome::Fatal;
        }
        self.shield_hits = (self.shield_hits + 1).min(self.max_shield_hits);
        if self.shield_hits >= self.max_shield_hits {
            CollisionOutcome::Fatal
        } else {
            CollisionOutcome::Absorbed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_per_selection() {
        let tuning = RunnerTuning::default();

        let none = PowerUpState::from_selection(PowerUp::None, &tuning);
        assert_eq!(none.score_multiplier, 1);
        assert_eq!(none.speed_up_interval, 50);
        assert_eq!(none.shield_remaining(), None);

        let slow = PowerUpState::from_selection(PowerUp::SlowMotion, &tuning);
        assert_eq!(slow.speed_up_interval, 100);
        assert_eq!(slow.score_multiplier, 1);

        let double = PowerUpState::from_selection(PowerUp::DoublePoints, &tuning);
        assert_eq!(double.score_multiplier, 2);
        assert_eq!(double.speed_up_interval, 50);

        let shield = PowerUpState::from_selection(PowerUp::Shield, &tuning);
        assert_eq!(shield.shield_remaining(), Some(3));
        assert_eq!(shield.speed_up_interval, 50);
    }

    #[test]
    fn test_shield_breaks_on_third_hit() {
        let mut state = PowerUpState::from_selection(PowerUp::Shield, &RunnerTuning::default());
        assert_eq!(state.resolve_collision(), CollisionOutcome::Absorbed);
        assert_eq!(state.shield_remaining(), Some(2));
        assert_eq!(state.resolve_collision(), CollisionOutcome::Absorbed);
        assert_eq!(state.shield_remaining(), Some(1));
        assert_eq!(state.resolve_collision(), CollisionOutcome::Fatal);
        assert_eq!(state.shield_remaining(), Some(0));
    }

    #[test]
    fn test_no_shield_is_fatal() {
        for selection in [PowerUp::None, PowerUp::SlowMotion, PowerUp::DoublePoints] {
            let mut state = PowerUpState::from_selection(selection, &RunnerTuning::default());
            assert_eq!(state.resolve_collision(), CollisionOutcome::Fatal);
        }
    }

    #[test]
    fn test_costs_and_names() {
        assert_eq!(PowerUp::None.cost(), 1);
        assert_eq!(PowerUp::Shield.cost(), 3);
        assert_eq!(PowerUp::SlowMotion.cost(), 2);
        assert_eq!(PowerUp::DoublePoints.cost(), 4);
        for p in PowerUp::ALL {
            assert_eq!(PowerUp::from_str(p.as_str()), Some(p));
        }
        assert_eq!(PowerUp::from_str("double-points"), Some(PowerUp::DoublePoints));
        assert_eq!(PowerUp::from_str("jetpack"), None);
    }
}

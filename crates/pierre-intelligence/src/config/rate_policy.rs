// ABOUTME: Unified safe weekly weight-change policy shared by target planning and projection
// ABOUTME: One table of gentle/recommended/aggressive/safe-max rates per goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use pierre_core::models::{Goal, GoalIntensity};
use serde::{Deserialize, Serialize};

/// Weekly rate magnitudes (kg/week) for one goal
///
/// Values are unsigned; the goal's direction supplies the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalRates {
    /// Slowest rate worth planning for
    pub gentle: f64,
    /// Default rate (balanced intensity)
    pub recommended: f64,
    /// Fast rate for aggressive intensity
    pub aggressive: f64,
    /// Hard ceiling, never exceeded by any plan
    pub safe_max: f64,
}

impl GoalRates {
    /// All-zero rates used for maintenance
    pub const ZERO: Self = Self {
        gentle: 0.0,
        recommended: 0.0,
        aggressive: 0.0,
        safe_max: 0.0,
    };

    /// Rate magnitude chosen by an intensity
    #[must_use]
    pub const fn for_intensity(&self, intensity: GoalIntensity) -> f64 {
        match intensity {
            GoalIntensity::Gentle => self.gentle,
            GoalIntensity::Balanced => self.recommended,
            GoalIntensity::Aggressive => self.aggressive,
        }
    }

    fn validate(&self, label: &'static str) -> Result<(), ConfigError> {
        let ordered = 0.0 < self.gentle
            && self.gentle <= self.recommended
            && self.recommended <= self.aggressive
            && self.aggressive <= self.safe_max;
        if ordered {
            Ok(())
        } else {
            Err(ConfigError::InconsistentRates(label))
        }
    }
}

/// Safe-rate policy table
///
/// | Goal | gentle | recommended | aggressive | safe max |
/// |------|--------|-------------|------------|----------|
/// | cut  | 0.25   | 0.5         | 0.75       | 1.0      |
/// | bulk | 0.1    | 0.25        | 0.35       | 0.4      |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatePolicyConfig {
    /// Weight loss rates (kg/week)
    pub cut: GoalRates,
    /// Weight gain rates (kg/week)
    pub bulk: GoalRates,
}

impl Default for RatePolicyConfig {
    fn default() -> Self {
        Self {
            cut: GoalRates {
                gentle: 0.25,
                recommended: 0.5,
                aggressive: 0.75,
                safe_max: 1.0,
            },
            bulk: GoalRates {
                gentle: 0.1,
                recommended: 0.25,
                aggressive: 0.35,
                safe_max: 0.4,
            },
        }
    }
}

impl RatePolicyConfig {
    /// Rates for a goal (maintenance has none)
    #[must_use]
    pub const fn rates(&self, goal: Goal) -> GoalRates {
        match goal {
            Goal::Cut => self.cut,
            Goal::Bulk => self.bulk,
            Goal::Maintain => GoalRates::ZERO,
        }
    }

    /// Signed fallback rate for a goal at the given intensity
    #[must_use]
    pub fn fallback_rate(&self, goal: Goal, intensity: GoalIntensity) -> f64 {
        goal.direction() * self.rates(goal).for_intensity(intensity)
    }

    /// Clamp a signed weekly change so it never moves against the goal and
    /// never exceeds the safe maximum.
    ///
    /// Maintenance is bounded by the cut ceiling downward and the bulk ceiling upward.
    // f64::clamp panics when min > max, which an unvalidated table can produce
    #[allow(clippy::manual_clamp)]
    #[must_use]
    pub fn clamp_weekly_change(&self, goal: Goal, change_kg: f64) -> f64 {
        match goal {
            Goal::Cut => change_kg.min(0.0).max(-self.cut.safe_max),
            Goal::Bulk => change_kg.max(0.0).min(self.bulk.safe_max),
            Goal::Maintain => change_kg.max(-self.cut.safe_max).min(self.bulk.safe_max),
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        self.cut
            .validate("cut rates must satisfy 0 < gentle <= recommended <= aggressive <= safe_max")?;
        self.bulk
            .validate("bulk rates must satisfy 0 < gentle <= recommended <= aggressive <= safe_max")
    }
}

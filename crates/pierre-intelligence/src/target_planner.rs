// ABOUTME: Derives safe daily calorie and macro targets from goal, timeline and metabolism
// ABOUTME: Selects a weekly rate from the safe-rate policy, bounds calories, and splits macros
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Target Planner
//!
//! Turns a [`UserMetrics`] snapshot and an optional timeline into a
//! [`NutritionTarget`]:
//!
//! 1. Pick a weekly weight-change rate from the required rate and the
//!    [`RatePolicyConfig`] table. Infeasible timelines never fail; they fall back
//!    to the intensity rate and attach a [`TargetWarning`].
//! 2. Convert the rate to a daily calorie delta through the kcal-per-kg constant
//!    and bound the result between `max(floor, 1.1 x BMR)` and `TDEE + 500`.
//! 3. Split the calorie target into protein (fixed by body weight), fat and carbs.

use crate::config::{EnergyConfig, MacroSplitConfig, NutritionPlanningConfig, RatePolicyConfig};
use crate::nutrition_calculator::{metabolic_profile, MetabolicProfile};
use pierre_core::constants::calendar::DAYS_PER_WEEK_F64;
use pierre_core::errors::AppResult;
use pierre_core::models::{Goal, GoalIntensity, NutritionTarget, UserMetrics};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use tracing::{debug, warn};

/// Non-fatal conditions raised while choosing a rate or a calorie target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetWarning {
    /// Required rate exceeds the safe maximum for the goal
    TimelineInfeasible {
        /// Rate the timeline would need (kg/week, signed)
        required_rate: f64,
        /// Rate used instead (kg/week, signed)
        applied_rate: f64,
        /// Safe maximum magnitude for the goal
        safe_max: f64,
        /// Weeks needed at the applied rate
        suggested_weeks: u32,
    },
    /// Target weight lies on the wrong side of the current weight for the goal
    AgainstGoal {
        /// Rate the timeline would need (kg/week, signed)
        required_rate: f64,
        /// Rate used instead (kg/week, signed)
        applied_rate: f64,
    },
    /// No target weight or no timeline was given
    NoTimeline {
        /// Rate used (kg/week, signed)
        applied_rate: f64,
    },
    /// Timeline is slower than the minimum effective rate, so the plan finishes early
    BelowMinimumRate {
        /// Rate the timeline would need (kg/week, signed)
        required_rate: f64,
        /// Rate used instead (kg/week, signed)
        applied_rate: f64,
    },
    /// Calorie target hit the floor or the surplus ceiling
    CaloriesBounded {
        /// Target before bounding (kcal)
        requested: f64,
        /// Target after bounding (kcal)
        applied: f64,
    },
}

impl fmt::Display for TargetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimelineInfeasible {
                required_rate,
                applied_rate,
                safe_max,
                suggested_weeks,
            } => write!(
                f,
                "Timeline requires {required_rate:+.2} kg/week which exceeds the safe maximum of {safe_max:.2} kg/week; using {applied_rate:+.2} kg/week instead. Consider {suggested_weeks} weeks for this goal."
            ),
            Self::AgainstGoal {
                required_rate,
                applied_rate,
            } => write!(
                f,
                "Target weight implies {required_rate:+.2} kg/week which contradicts the goal; using {applied_rate:+.2} kg/week instead."
            ),
            Self::BelowMinimumRate {
                required_rate,
                applied_rate,
            } => write!(
                f,
                "Timeline needs only {required_rate:+.2} kg/week, below the minimum effective rate; using {applied_rate:+.2} kg/week and reaching the target early."
            ),
            Self::NoTimeline { applied_rate } => write!(
                f,
                "No target weight or timeline given; using {applied_rate:+.2} kg/week."
            ),
            Self::CaloriesBounded { requested, applied } => write!(
                f,
                "Calorie target {requested:.0} kcal is outside safe bounds; using {applied:.0} kcal."
            ),
        }
    }
}

/// Outcome of weekly rate selection
#[derive(Debug, Clone, PartialEq)]
pub struct RateDecision {
    /// Rate the timeline would need, if one was given (kg/week, signed)
    pub required_rate: Option<f64>,
    /// Rate used for calorie math (kg/week, signed)
    pub applied_rate: f64,
    /// Whether the applied rate differs from the required one
    pub timeline_adjusted: bool,
    /// Why the rate was adjusted
    pub rationale: String,
    /// Warning to surface, if any
    pub warning: Option<TargetWarning>,
}

/// Weeks needed to move `change_kg` at `rate_kg_per_week`, rounded up
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: non-negative, clamped to u32 range
pub fn weeks_needed(change_kg: f64, rate_kg_per_week: f64) -> u32 {
    let rate = rate_kg_per_week.abs();
    if rate < f64::EPSILON {
        return 0;
    }
    (change_kg.abs() / rate).ceil().min(f64::from(u32::MAX)) as u32
}

/// Choose the weekly rate for a goal given the weight change still needed and the weeks left
#[must_use]
pub fn select_weekly_rate(
    policy: &RatePolicyConfig,
    goal: Goal,
    intensity: GoalIntensity,
    change_needed_kg: Option<f64>,
    weeks_available: Option<u32>,
) -> RateDecision {
    if goal == Goal::Maintain {
        return RateDecision {
            required_rate: None,
            applied_rate: 0.0,
            timeline_adjusted: false,
            rationale: "Maintenance keeps calories at TDEE".to_owned(),
            warning: None,
        };
    }

    let rates = policy.rates(goal);
    let fallback = policy.fallback_rate(goal, intensity);

    let (Some(change), Some(weeks)) = (change_needed_kg, weeks_available.filter(|w| *w > 0))
    else {
        return RateDecision {
            required_rate: None,
            applied_rate: fallback,
            timeline_adjusted: true,
            rationale: "No target timeline; using the intensity rate".to_owned(),
            warning: Some(TargetWarning::NoTimeline {
                applied_rate: fallback,
            }),
        };
    };

    if change.abs() < f64::EPSILON {
        return RateDecision {
            required_rate: Some(0.0),
            applied_rate: 0.0,
            timeline_adjusted: false,
            rationale: "Already at target weight".to_owned(),
            warning: None,
        };
    }

    let required = change / f64::from(weeks);

    if required * goal.direction() < 0.0 {
        return RateDecision {
            required_rate: Some(required),
            applied_rate: fallback,
            timeline_adjusted: true,
            rationale: format!("Target weight contradicts the {goal} goal"),
            warning: Some(TargetWarning::AgainstGoal {
                required_rate: required,
                applied_rate: fallback,
            }),
        };
    }

    let magnitude = required.abs();
    if magnitude > rates.safe_max {
        let suggested_weeks = weeks_needed(change, fallback);
        return RateDecision {
            required_rate: Some(required),
            applied_rate: fallback,
            timeline_adjusted: true,
            rationale: format!(
                "Required {magnitude:.2} kg/week exceeds the safe maximum of {:.2} kg/week",
                rates.safe_max
            ),
            warning: Some(TargetWarning::TimelineInfeasible {
                required_rate: required,
                applied_rate: fallback,
                safe_max: rates.safe_max,
                suggested_weeks,
            }),
        };
    }

    if magnitude < rates.gentle {
        let applied = goal.direction() * rates.gentle;
        return RateDecision {
            required_rate: Some(required),
            applied_rate: applied,
            timeline_adjusted: true,
            rationale: format!(
                "Required {magnitude:.2} kg/week is below the minimum effective rate of {:.2} kg/week",
                rates.gentle
            ),
            warning: Some(TargetWarning::BelowMinimumRate {
                required_rate: required,
                applied_rate: applied,
            }),
        };
    }

    RateDecision {
        required_rate: Some(required),
        applied_rate: required,
        timeline_adjusted: false,
        rationale: "Timeline is realistic and safe".to_owned(),
        warning: None,
    }
}

/// Lower and upper calorie bounds for a metabolic profile
#[must_use]
pub fn calorie_bounds(profile: &MetabolicProfile, energy: &EnergyConfig) -> (f64, f64) {
    let lower = energy
        .calorie_floor
        .max(profile.bmr * energy.bmr_floor_multiplier);
    let upper = (profile.tdee + energy.surplus_ceiling_kcal).max(lower);
    (lower, upper)
}

/// Daily calorie target for a signed weekly rate, bounded for safety
///
/// Returns the bounded target and the unbounded request.
#[must_use]
pub fn calorie_target_for_rate(
    profile: &MetabolicProfile,
    weekly_rate_kg: f64,
    energy: &EnergyConfig,
) -> (f64, f64) {
    let daily_delta = weekly_rate_kg * energy.kcal_per_kg / DAYS_PER_WEEK_F64;
    let requested = profile.tdee + daily_delta;
    let (lower, upper) = calorie_bounds(profile, energy);
    (requested.max(lower).min(upper), requested)
}

/// Split a calorie target into protein, fat and carb grams
///
/// Protein is fixed; fat and carbs take their goal shares. When the three
/// exceed the target, carbs shrink first (down to the floor share), then fat.
#[must_use]
pub fn split_macros(
    calorie_target: f64,
    protein_target: f64,
    goal: Goal,
    split: &MacroSplitConfig,
    energy: &EnergyConfig,
) -> NutritionTarget {
    let share = split.share(goal);
    let protein_kcal = protein_target * energy.kcal_per_gram_protein;
    let mut fat_kcal = calorie_target * share.fat;
    let mut carb_kcal = calorie_target * share.carb;

    let total = protein_kcal + fat_kcal + carb_kcal;
    if total > calorie_target {
        let excess = total - calorie_target;
        carb_kcal = (carb_kcal - excess).max(calorie_target * split.carb_floor_share);
        fat_kcal = (calorie_target - protein_kcal - carb_kcal).max(0.0);
    }

    NutritionTarget {
        calorie_target,
        protein_target,
        carb_target: carb_kcal / energy.kcal_per_gram_carb,
        fat_target: fat_kcal / energy.kcal_per_gram_fat,
    }
}

/// Complete target planning result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPlan {
    /// BMR, TDEE and protein at the planning weight
    pub metabolic: MetabolicProfile,
    /// Daily targets
    pub target: NutritionTarget,
    /// Weight the plan was computed at (kg)
    pub current_weight_kg: f64,
    /// Weeks the caller asked to plan over
    pub weeks_available: Option<u32>,
    /// Rate the timeline would need (kg/week, signed)
    pub required_rate: Option<f64>,
    /// Rate used for the calorie target (kg/week, signed)
    pub weekly_rate: f64,
    /// Whether the timeline was adjusted
    pub timeline_adjusted: bool,
    /// Reason for the chosen rate
    pub rationale: String,
    /// Non-fatal warnings
    pub warnings: Vec<TargetWarning>,
    /// Human-readable analysis
    pub analysis: String,
}

impl TargetPlan {
    /// Expected weekly calorie deficit or surplus at the target
    #[must_use]
    pub fn weekly_calorie_change(&self) -> f64 {
        (self.target.calorie_target - self.metabolic.tdee) * DAYS_PER_WEEK_F64
    }

    /// Warnings as display strings
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Target planner bound to a validated configuration
#[derive(Debug, Clone, Copy)]
pub struct TargetPlanner<'a> {
    config: &'a NutritionPlanningConfig,
}

impl<'a> TargetPlanner<'a> {
    /// Create a planner over a configuration
    #[must_use]
    pub const fn new(config: &'a NutritionPlanningConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &'a NutritionPlanningConfig {
        self.config
    }

    /// Plan targets from the profile's own weight
    ///
    /// # Errors
    ///
    /// Returns a validation error if the profile is invalid
    pub fn plan(&self, metrics: &UserMetrics, weeks_available: Option<u32>) -> AppResult<TargetPlan> {
        self.plan_at_weight(metrics, metrics.weight_kg, weeks_available)
    }

    /// Plan targets for a profile evaluated at a carried-forward weight
    ///
    /// # Errors
    ///
    /// Returns a validation error if the profile or weight is invalid
    pub fn plan_at_weight(
        &self,
        metrics: &UserMetrics,
        current_weight_kg: f64,
        weeks_available: Option<u32>,
    ) -> AppResult<TargetPlan> {
        metrics.validate()?;
        let metabolic = metabolic_profile(metrics, current_weight_kg, self.config)?;

        let decision = select_weekly_rate(
            &self.config.rate_policy,
            metrics.goal,
            metrics.goal_intensity,
            metrics.weight_change_needed(current_weight_kg),
            weeks_available,
        );

        let mut warnings: Vec<TargetWarning> = decision.warning.iter().cloned().collect();

        let calorie_target = if metrics.goal == Goal::Maintain {
            metabolic.tdee
        } else {
            let (bounded, requested) =
                calorie_target_for_rate(&metabolic, decision.applied_rate, &self.config.energy);
            if (bounded - requested).abs() > f64::EPSILON {
                warnings.push(TargetWarning::CaloriesBounded {
                    requested,
                    applied: bounded,
                });
            }
            bounded
        };

        let target = split_macros(
            calorie_target,
            metabolic.protein_target,
            metrics.goal,
            &self.config.macro_split,
            &self.config.energy,
        );

        for warning in &warnings {
            warn!(goal = %metrics.goal, "{warning}");
        }
        debug!(
            bmr = metabolic.bmr,
            tdee = metabolic.tdee,
            calorie_target = target.calorie_target,
            weekly_rate = decision.applied_rate,
            "Derived nutrition targets"
        );

        let mut plan = TargetPlan {
            metabolic,
            target,
            current_weight_kg,
            weeks_available,
            required_rate: decision.required_rate,
            weekly_rate: decision.applied_rate,
            timeline_adjusted: decision.timeline_adjusted,
            rationale: decision.rationale,
            warnings,
            analysis: String::new(),
        };
        plan.analysis = render_analysis(metrics, &plan, &self.config.energy);
        Ok(plan)
    }

    /// Calorie target recomputed from the carried weight and the weeks left
    ///
    /// Within `maintenance_window_kg` of the target, or with no weeks left,
    /// the target is maintenance. Otherwise the remaining rate is clamped to the
    /// safe maximum and the usual calorie bounds apply.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the profile or weight is invalid
    pub fn adaptive_calorie_target(
        &self,
        metrics: &UserMetrics,
        current_weight_kg: f64,
        weeks_remaining: u32,
        maintenance_window_kg: f64,
    ) -> AppResult<f64> {
        let metabolic = metabolic_profile(metrics, current_weight_kg, self.config)?;
        if metrics.goal == Goal::Maintain || weeks_remaining == 0 {
            return Ok(metabolic.tdee);
        }
        let Some(remaining) = metrics.weight_change_needed(current_weight_kg) else {
            return Ok(metabolic.tdee);
        };
        if remaining.abs() <= maintenance_window_kg {
            return Ok(metabolic.tdee);
        }

        let required = remaining / f64::from(weeks_remaining);
        let rate = self
            .config
            .rate_policy
            .clamp_weekly_change(metrics.goal, required);
        let (bounded, _) = calorie_target_for_rate(&metabolic, rate, &self.config.energy);
        Ok(bounded)
    }

    /// Weeks needed to cover the full weight change at the safe maximum
    #[must_use]
    pub fn minimum_safe_weeks(&self, goal: Goal, change_kg: f64) -> u32 {
        weeks_needed(change_kg, self.config.rate_policy.rates(goal).safe_max)
    }
}

fn render_analysis(metrics: &UserMetrics, plan: &TargetPlan, energy: &EnergyConfig) -> String {
    let mut out = String::from("Nutrition Plan Analysis\n\nCurrent Stats:\n");
    let _ = writeln!(out, "- Weight: {:.1}kg", plan.current_weight_kg);
    if let Some(target) = metrics.target_weight {
        let _ = writeln!(
            out,
            "- Target: {target:.1}kg ({:+.1}kg change)",
            target - plan.current_weight_kg
        );
    }
    if let Some(weeks) = plan.weeks_available {
        let _ = writeln!(out, "- Timeline: {weeks} weeks");
    }
    let _ = writeln!(out, "- Goal: {}", metrics.goal.as_str().to_uppercase());

    let _ = write!(
        out,
        "\nMetabolic Calculations:\n- BMR: {:.0} kcal/day\n- TDEE: {:.0} kcal/day\n- Activity Level: {}\n",
        plan.metabolic.bmr, plan.metabolic.tdee, metrics.activity_level
    );

    out.push_str("\nWeight Change Plan:\n");
    if let Some(required) = plan.required_rate {
        let _ = writeln!(out, "- Required Rate: {required:.2}kg/week");
    }
    let _ = writeln!(out, "- Recommended Rate: {:.2}kg/week", plan.weekly_rate);
    let _ = writeln!(out, "- Analysis: {}", plan.rationale);
    if plan.timeline_adjusted {
        out.push_str("- Timeline adjusted: yes\n");
    }

    let _ = write!(
        out,
        "\nDaily Targets:\n- Calories: {:.0} kcal\n- Protein: {:.0}g ({:.0} kcal)\n- Carbs: {:.0}g ({:.0} kcal)\n- Fat: {:.0}g ({:.0} kcal)\n",
        plan.target.calorie_target,
        plan.target.protein_target,
        plan.target.protein_target * energy.kcal_per_gram_protein,
        plan.target.carb_target,
        plan.target.carb_target * energy.kcal_per_gram_carb,
        plan.target.fat_target,
        plan.target.fat_target * energy.kcal_per_gram_fat,
    );

    let _ = write!(
        out,
        "\nWeekly Deficit/Surplus: {:+.0} kcal\nExpected Weekly Change: {:+.2}kg",
        plan.weekly_calorie_change(),
        plan.weekly_rate
    );

    for warning in &plan.warnings {
        let _ = write!(out, "\nWarning: {warning}");
    }
    out
}

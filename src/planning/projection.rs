// ABOUTME: Multi-week weight projection driving the week aggregator with carried weight state
// ABOUTME: Fail-fast validation, upfront safe-rate check, per-week clamp, final-week snap, resumable end state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Multi-Week Projection Simulator
//!
//! Each week's realized calorie balance moves the weight by
//! `(eaten - target * 7) / kcal_per_kg`, clamped to the goal direction and the
//! safe maximum. On the final scheduled week the weight snaps to the target
//! when one is set and it lies in the goal's direction. The snap can produce
//! a jump larger than any clamped weekly step; it is reported as-is.
//!
//! In fixed mode the targets planned for the first week hold for the whole
//! run. Adaptive mode recomputes them from each week's starting weight.

use super::variety::UsedFoodSet;
use super::week_aggregator::{WeekAggregator, WeekPlan};
use super::PlanningServices;
use crate::config::{PlannerConfig, TargetMode};
use crate::logging::PlannerLogger;
use crate::storage::ArchivedWeek;
use chrono::Utc;
use pierre_core::constants::limits::MAX_WEIGHT_KG;
use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::{Goal, MacroTotals, NutritionTarget, UserMetrics};
use pierre_intelligence::target_planner::{split_macros, weeks_needed};
use pierre_intelligence::{metabolic_profile, TargetPlan, TargetPlanner};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::{info, instrument, warn};

/// Per-week inputs that do not live in the carried state
struct WeekContext<'t> {
    /// Targets planned for the first week, used throughout in fixed mode
    fixed_target: &'t NutritionTarget,
    weeks_remaining: u32,
    is_final: bool,
}

/// How many weeks to simulate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionSchedule {
    /// `tenure_months` × weeks per month
    #[default]
    Tenure,
    /// An explicit number of weeks
    Weeks(u32),
    /// As many weeks as the applied rate needs to reach the target
    UntilTarget,
}

/// Weight state carried between weeks, and between runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionState {
    /// Weight at the start of the next week (kg)
    pub current_weight: f64,
    /// Weeks already simulated; the next week is `week_offset + 1`
    pub week_offset: u32,
}

impl ProjectionState {
    /// Starting state for a profile with no prior projection
    #[must_use]
    pub const fn fresh(metrics: &UserMetrics) -> Self {
        Self {
            current_weight: metrics.weight_kg,
            week_offset: 0,
        }
    }
}

/// Projection input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// User whose profile and variety state are used
    pub user_id: String,
    /// Projection length
    #[serde(default)]
    pub schedule: ProjectionSchedule,
    /// End state of an earlier projection to continue from
    #[serde(default)]
    pub resume_from: Option<ProjectionState>,
}

/// One simulated week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRecord {
    /// Week number within the user's plan
    pub week_number: u32,
    /// Rendered week report
    pub plan_text: String,
    /// Summed macros for the week
    pub totals: MacroTotals,
    /// Weight at the start of the week (kg)
    pub start_weight: f64,
    /// Projected weight at the end of the week (kg)
    pub end_weight: f64,
    /// Daily targets used for the week
    pub targets: NutritionTarget,
    /// Day and week scoped warnings
    pub warnings: Vec<String>,
}

/// Cumulative view over every simulated week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// Summed macros over all weeks
    pub totals: MacroTotals,
    /// Weight before the first simulated week (kg)
    pub start_weight: f64,
    /// Weight after the last simulated week (kg)
    pub end_weight: f64,
    /// Weeks simulated
    pub week_count: u32,
    /// Run, week and day warnings, in order
    pub warnings: Vec<String>,
    /// Human-readable analysis
    pub analysis: String,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Per-week records
    pub weeks: Vec<WeekRecord>,
    /// Cumulative summary
    pub summary: ProjectionSummary,
    /// State to pass as `resume_from` for a continuation
    pub end_state: ProjectionState,
}

/// Drives the week aggregator across a schedule
#[derive(Clone, Copy)]
pub struct ProjectionSimulator<'a> {
    services: PlanningServices<'a>,
    config: &'a PlannerConfig,
}

impl<'a> ProjectionSimulator<'a> {
    /// Create a simulator
    #[must_use]
    pub const fn new(services: PlanningServices<'a>, config: &'a PlannerConfig) -> Self {
        Self { services, config }
    }

    /// Load the user's profile and run the projection
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is missing or invalid, the schedule is
    /// empty, or a day runs out of candidates
    pub async fn run(&self, request: &ProjectionRequest) -> AppResult<Projection> {
        let metrics = self
            .services
            .users
            .get(&request.user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("user profile").with_user_id(request.user_id.clone())
            })?;
        self.simulate(
            &request.user_id,
            &metrics,
            request.schedule,
            request.resume_from,
        )
        .await
    }

    /// Run the projection for a given profile
    ///
    /// Every check happens before the first week: nothing is planned or
    /// persisted for an invalid profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile or resume state is invalid, the
    /// schedule is empty, or a day runs out of candidates
    #[instrument(skip(self, metrics), fields(goal = %metrics.goal))]
    pub async fn simulate(
        &self,
        user_id: &str,
        metrics: &UserMetrics,
        schedule: ProjectionSchedule,
        resume_from: Option<ProjectionState>,
    ) -> AppResult<Projection> {
        metrics.validate()?;
        let start = resume_from.unwrap_or_else(|| ProjectionState::fresh(metrics));
        validate_weight(&start)?;

        let planner = TargetPlanner::new(&self.config.nutrition);
        let initial = planner.plan_at_weight(metrics, start.current_weight, None)?;
        let weeks = self.schedule_weeks(metrics, schedule, &start, &initial)?;
        validate_week_range(&start, weeks)?;
        let first_plan = planner.plan_at_weight(metrics, start.current_weight, Some(weeks))?;

        let mut run_warnings = first_plan.warning_messages();
        run_warnings.extend(self.safety_check(&planner, metrics, &start, weeks));

        let mut used = self.load_used(user_id, &mut run_warnings).await;
        info!(user_id, weeks, start_weight = start.current_weight, "Projection started");

        let mut state = start;
        let mut records = Vec::new();
        for index in 0..weeks {
            let is_final = index + 1 == weeks;
            let record = self
                .simulate_week(
                    user_id,
                    metrics,
                    &state,
                    WeekContext {
                        fixed_target: &first_plan.target,
                        weeks_remaining: weeks - index,
                        is_final,
                    },
                    &mut used,
                )
                .await?;
            self.archive(user_id, &record, &mut run_warnings).await;
            state = ProjectionState {
                current_weight: record.end_weight,
                week_offset: record.week_number,
            };
            records.push(record);
        }

        let summary = summarize(&start, &state, &records, run_warnings, &first_plan);
        info!(
            user_id,
            end_weight = state.current_weight,
            last_week = state.week_offset,
            "Projection finished"
        );
        Ok(Projection {
            weeks: records,
            summary,
            end_state: state,
        })
    }

    fn schedule_weeks(
        &self,
        metrics: &UserMetrics,
        schedule: ProjectionSchedule,
        start: &ProjectionState,
        initial: &TargetPlan,
    ) -> AppResult<u32> {
        let weeks = match schedule {
            ProjectionSchedule::Tenure => metrics
                .tenure_months
                .saturating_mul(self.config.projection.weeks_per_month),
            ProjectionSchedule::Weeks(weeks) => weeks,
            ProjectionSchedule::UntilTarget => {
                let change = metrics
                    .weight_change_needed(start.current_weight)
                    .ok_or_else(|| {
                        AppError::invalid_input("An until-target schedule needs a target weight")
                            .with_resource_id("target_weight")
                    })?;
                weeks_needed(change, initial.weekly_rate).max(1)
            }
        };
        if weeks == 0 {
            return Err(AppError::out_of_range(
                "weeks",
                "Projection needs at least one week",
            ));
        }
        Ok(weeks)
    }

    /// Warn once when the whole schedule needs more than the safe maximum
    fn safety_check(
        &self,
        planner: &TargetPlanner<'_>,
        metrics: &UserMetrics,
        start: &ProjectionState,
        weeks: u32,
    ) -> Option<String> {
        if metrics.goal == Goal::Maintain {
            return None;
        }
        let change = metrics.weight_change_needed(start.current_weight)?;
        let required = change / f64::from(weeks);
        let safe_max = self.config.nutrition.rate_policy.rates(metrics.goal).safe_max;
        if required.abs() <= safe_max {
            return None;
        }

        let minimum_weeks = planner.minimum_safe_weeks(metrics.goal, change);
        let minimum_months = minimum_weeks.div_ceil(self.config.projection.weeks_per_month);
        let message = format!(
            "Reaching the target in {weeks} weeks needs {:.2} kg/week, above the safe maximum of {safe_max:.2} kg/week. \
             The rate is clamped; reaching the target safely needs at least {minimum_weeks} weeks ({minimum_months} months)",
            required.abs()
        );
        warn!(required_rate = required, safe_max, "{message}");
        Some(message)
    }

    async fn load_used(&self, user_id: &str, warnings: &mut Vec<String>) -> UsedFoodSet {
        match self.services.variety.get_used(user_id).await {
            Ok(stored) => UsedFoodSet::from_stored(stored),
            Err(e) => {
                PlannerLogger::log_persistence_failure(user_id, "variety", &e.to_string());
                warnings.push(format!("Variety state could not be loaded: {e}"));
                UsedFoodSet::new()
            }
        }
    }

    /// Daily targets for a week starting at `weight`
    fn week_target(
        &self,
        metrics: &UserMetrics,
        weight: f64,
        context: &WeekContext<'_>,
    ) -> AppResult<NutritionTarget> {
        match self.config.projection.target_mode {
            TargetMode::Fixed => Ok(*context.fixed_target),
            TargetMode::Adaptive => {
                let nutrition = &self.config.nutrition;
                let calorie_target = TargetPlanner::new(nutrition).adaptive_calorie_target(
                    metrics,
                    weight,
                    context.weeks_remaining,
                    self.config.projection.maintenance_window_kg,
                )?;
                let metabolic = metabolic_profile(metrics, weight, nutrition)?;
                Ok(split_macros(
                    calorie_target,
                    metabolic.protein_target,
                    metrics.goal,
                    &nutrition.macro_split,
                    &nutrition.energy,
                ))
            }
        }
    }

    #[instrument(skip(self, metrics, state, context, used), fields(week = state.week_offset + 1))]
    async fn simulate_week(
        &self,
        user_id: &str,
        metrics: &UserMetrics,
        state: &ProjectionState,
        context: WeekContext<'_>,
        used: &mut UsedFoodSet,
    ) -> AppResult<WeekRecord> {
        let week_number = state.week_offset + 1;
        let start_weight = state.current_weight;
        let target = self.week_target(metrics, start_weight, &context)?;

        let week = WeekAggregator::new(self.services, self.config)
            .plan_week(user_id, metrics, week_number, &target, used)
            .await?;

        let end_weight = self.next_weight(metrics, &week, start_weight, context.is_final);
        PlannerLogger::log_week_summary(
            user_id,
            week_number,
            week.totals.calories,
            start_weight,
            end_weight,
            week.warnings.len(),
        );

        Ok(WeekRecord {
            week_number,
            plan_text: week.report(),
            totals: week.totals,
            start_weight,
            end_weight,
            targets: target,
            warnings: week.warnings,
        })
    }

    fn next_weight(
        &self,
        metrics: &UserMetrics,
        week: &WeekPlan,
        start_weight: f64,
        is_final: bool,
    ) -> f64 {
        if is_final {
            let in_goal_direction =
                |target: &f64| (target - start_weight) * metrics.goal.direction() >= 0.0;
            if let Some(target) = metrics.target_weight.filter(in_goal_direction) {
                return target;
            }
        }
        let nutrition = &self.config.nutrition;
        let raw_change = week.calorie_delta() / nutrition.energy.kcal_per_kg;
        let change = nutrition
            .rate_policy
            .clamp_weekly_change(metrics.goal, raw_change);
        start_weight + change
    }

    async fn archive(&self, user_id: &str, record: &WeekRecord, warnings: &mut Vec<String>) {
        let snapshot = ArchivedWeek {
            week_number: record.week_number,
            plan_text: record.plan_text.clone(),
            totals: record.totals,
            start_weight: record.start_weight,
            end_weight: record.end_weight,
            archived_at: Utc::now(),
        };
        if let Err(e) = self.services.archive.append(user_id, &snapshot).await {
            PlannerLogger::log_persistence_failure(user_id, "plan_archive", &e.to_string());
            warnings.push(format!(
                "Week {} snapshot could not be archived: {e}",
                record.week_number
            ));
        }
    }
}

fn validate_weight(state: &ProjectionState) -> AppResult<()> {
    if !(state.current_weight > 0.0 && state.current_weight <= MAX_WEIGHT_KG) {
        return Err(AppError::out_of_range(
            "current_weight",
            format!("Resume weight must be between 0 and {MAX_WEIGHT_KG} kg"),
        ));
    }
    Ok(())
}

/// Week numbers for the whole run must fit in `u32`
fn validate_week_range(state: &ProjectionState, weeks: u32) -> AppResult<()> {
    if state.week_offset.checked_add(weeks).is_none() {
        return Err(AppError::out_of_range(
            "week_offset",
            format!(
                "Resuming after week {} leaves no room for {weeks} more weeks",
                state.week_offset
            ),
        ));
    }
    Ok(())
}

fn summarize(
    start: &ProjectionState,
    end: &ProjectionState,
    records: &[WeekRecord],
    run_warnings: Vec<String>,
    first_plan: &TargetPlan,
) -> ProjectionSummary {
    let totals: MacroTotals = records.iter().map(|r| r.totals).sum();
    let week_count = end.week_offset - start.week_offset;

    let mut warnings = run_warnings;
    for record in records {
        warnings.extend(
            record
                .warnings
                .iter()
                .map(|w| format!("Week {}: {w}", record.week_number)),
        );
    }

    let mut analysis = first_plan.analysis.clone();
    let _ = write!(
        analysis,
        "\n\nProjection:\n- Weeks {} to {}\n- Weight: {:.1}kg → {:.1}kg ({:+.1}kg)\n- Total intake: {:.0} kcal",
        start.week_offset + 1,
        end.week_offset,
        start.current_weight,
        end.current_weight,
        end.current_weight - start.current_weight,
        totals.calories
    );

    ProjectionSummary {
        totals,
        start_weight: start.current_weight,
        end_weight: end.current_weight,
        week_count,
        warnings,
        analysis,
    }
}

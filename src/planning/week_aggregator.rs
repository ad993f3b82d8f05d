// ABOUTME: Seven-day planning loop with cross-day variety tracking and weekly totals
// ABOUTME: Feeds used foods back into the dislikes prompt and persists them best-effort
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::day_validator::{DayValidator, ValidatedDay};
use super::meal_composer::{DayPlan, MealComposer};
use super::report;
use super::variety::UsedFoodSet;
use super::PlanningServices;
use crate::config::PlannerConfig;
use crate::external::CandidateRequest;
use crate::logging::PlannerLogger;
use pierre_core::constants::calendar::{DAYS_PER_WEEK, DAYS_PER_WEEK_F64};
use pierre_core::errors::PlanningError;
use pierre_core::models::{MacroTotals, NutritionTarget, UserMetrics};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Seven planned days with their totals and warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// Week number within the user's plan
    pub week_number: u32,
    /// Daily targets the week was planned against
    pub target: NutritionTarget,
    /// Day plans, Monday first
    pub days: Vec<DayPlan>,
    /// Sum of the day totals
    pub totals: MacroTotals,
    /// Day and week scoped warnings
    pub warnings: Vec<String>,
}

impl WeekPlan {
    /// Build a week; totals are always the sum of the days
    #[must_use]
    pub fn new(
        week_number: u32,
        target: NutritionTarget,
        days: Vec<DayPlan>,
        warnings: Vec<String>,
    ) -> Self {
        let totals = days.iter().map(DayPlan::totals).sum();
        Self {
            week_number,
            target,
            days,
            totals,
            warnings,
        }
    }

    /// Week totals divided by seven
    #[must_use]
    pub fn daily_average(&self) -> MacroTotals {
        self.totals.divided_by(DAYS_PER_WEEK_F64)
    }

    /// Calories eaten above (positive) or below the week's target
    #[must_use]
    pub fn calorie_delta(&self) -> f64 {
        self.target
            .calorie_target
            .mul_add(-DAYS_PER_WEEK_F64, self.totals.calories)
    }

    /// Rendered week report
    #[must_use]
    pub fn report(&self) -> String {
        report::render_week(self)
    }
}

/// Plans weeks day by day against one set of targets
#[derive(Clone, Copy)]
pub struct WeekAggregator<'a> {
    services: PlanningServices<'a>,
    config: &'a PlannerConfig,
}

impl<'a> WeekAggregator<'a> {
    /// Create an aggregator
    #[must_use]
    pub const fn new(services: PlanningServices<'a>, config: &'a PlannerConfig) -> Self {
        Self { services, config }
    }

    /// Plan seven days, updating `used` after each day
    ///
    /// Variety state is written back after every day that introduced new
    /// foods. A failed write becomes a week warning; planning continues.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::CandidatesExhausted` if a day yields no usable foods
    #[instrument(skip_all, fields(user_id = %user_id, week = week_number))]
    pub async fn plan_week(
        &self,
        user_id: &str,
        metrics: &UserMetrics,
        week_number: u32,
        target: &NutritionTarget,
        used: &mut UsedFoodSet,
    ) -> Result<WeekPlan, PlanningError> {
        let composer = MealComposer::new(
            self.services.generator,
            self.services.oracle,
            &self.config.composer,
        );
        let validator = DayValidator::new(composer, self.config.validator.max_attempts);

        let mut days = Vec::with_capacity(usize::from(DAYS_PER_WEEK));
        let mut warnings = Vec::new();
        let mut persistence_warned = false;

        for day in 1..=DAYS_PER_WEEK {
            let request = self.request_for(metrics, target, used);
            let ValidatedDay { plan, warning, .. } =
                validator.run(week_number, day, &request).await?;
            warnings.extend(warning);

            if let Some(failure) = self.record_used(user_id, &plan, used).await {
                if !persistence_warned {
                    warnings.push(failure);
                    persistence_warned = true;
                }
            }
            days.push(plan);
        }

        let week = WeekPlan::new(week_number, *target, days, warnings);
        info!(
            week = week_number,
            total_kcal = week.totals.calories,
            used_foods = used.len(),
            "Week composed"
        );
        Ok(week)
    }

    fn request_for(
        &self,
        metrics: &UserMetrics,
        target: &NutritionTarget,
        used: &UsedFoodSet,
    ) -> CandidateRequest {
        CandidateRequest {
            goal: metrics.goal,
            diet_type: metrics.diet_type,
            calorie_target: target.calorie_target,
            protein_target: target.protein_target,
            dislikes: used.augmented_dislikes(&metrics.dislikes, self.config.variety.prompt_limit),
        }
    }

    /// Add the day's foods and persist; returns a warning if the write failed
    async fn record_used(
        &self,
        user_id: &str,
        plan: &DayPlan,
        used: &mut UsedFoodSet,
    ) -> Option<String> {
        if used.extend_new(plan.descriptions()) == 0 {
            return None;
        }
        match self.services.variety.put_used(user_id, used.as_slice()).await {
            Ok(()) => None,
            Err(e) => {
                PlannerLogger::log_persistence_failure(user_id, "variety", &e.to_string());
                Some(format!("Variety state could not be saved: {e}"))
            }
        }
    }
}

// ABOUTME: Bounded retry of day composition against a nondeterministic candidate oracle
// ABOUTME: Pure acceptance check, last-attempt retention with warnings, exhaustion detection
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::meal_composer::{DayPlan, MealComposer};
use crate::external::CandidateRequest;
use crate::logging::PlannerLogger;
use pierre_core::errors::{OracleError, PlanningError};
use tracing::{info, instrument, warn};

/// Whether a composed day lands within `margin_kcal` of the calorie target
#[must_use]
pub fn accept(plan: &DayPlan, calorie_target: f64, margin_kcal: f64) -> bool {
    !plan.is_empty() && (plan.totals().calories - calorie_target).abs() <= margin_kcal
}

/// Outcome of validating one day
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDay {
    /// Accepted plan, or the last usable attempt
    pub plan: DayPlan,
    /// Attempts made
    pub attempts: u32,
    /// Whether the plan is within the margin
    pub accepted: bool,
    /// Day-scoped warning when the plan was not accepted
    pub warning: Option<String>,
}

/// What the failed attempts left behind
#[derive(Debug, Default)]
struct Leftovers {
    last_plan: Option<DayPlan>,
    last_error: Option<OracleError>,
}

/// Retries the composer up to a fixed number of attempts
#[derive(Clone, Copy)]
pub struct DayValidator<'a> {
    composer: MealComposer<'a>,
    max_attempts: u32,
}

impl<'a> DayValidator<'a> {
    /// Create a validator; at least one attempt is always made
    #[must_use]
    pub fn new(composer: MealComposer<'a>, max_attempts: u32) -> Self {
        Self {
            composer,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Compose a day, accepting the first attempt within the margin
    ///
    /// Without an acceptable attempt the last non-empty one is kept with a
    /// warning. When every attempt failed at the oracle the day is left empty
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::CandidatesExhausted` when every attempt
    /// produced zero usable foods
    #[instrument(skip(self, request), fields(calorie_target = request.calorie_target))]
    pub async fn run(
        &self,
        week: u32,
        day: u8,
        request: &CandidateRequest,
    ) -> Result<ValidatedDay, PlanningError> {
        let target = request.calorie_target;
        let margin = self.composer.margin_kcal();
        let mut leftovers = Leftovers::default();

        for attempt in 1..=self.max_attempts {
            match self.composer.compose(request).await {
                Ok(plan) => {
                    let accepted = accept(&plan, target, margin);
                    PlannerLogger::log_day_attempt(
                        day,
                        attempt,
                        plan.totals().calories,
                        target,
                        accepted,
                    );
                    if accepted {
                        info!(day, attempt, items = plan.len(), "Day accepted");
                        return Ok(ValidatedDay {
                            plan,
                            attempts: attempt,
                            accepted: true,
                            warning: None,
                        });
                    }
                    if !plan.is_empty() {
                        leftovers.last_plan = Some(plan);
                    }
                }
                Err(e) => {
                    warn!(day, attempt, error = %e, "Oracle failure while composing day");
                    leftovers.last_error = Some(e);
                }
            }
        }

        self.settle(week, day, target, leftovers)
    }

    fn settle(
        &self,
        week: u32,
        day: u8,
        target: f64,
        leftovers: Leftovers,
    ) -> Result<ValidatedDay, PlanningError> {
        let attempts = self.max_attempts;
        let margin = self.composer.margin_kcal();

        let (plan, warning) = match leftovers {
            Leftovers {
                last_plan: Some(plan),
                ..
            } => {
                let warning = format!(
                    "Day {day}: could not land within ±{margin:.0} kcal of {target:.0} kcal after {attempts} attempts, kept {:.0} kcal",
                    plan.totals().calories
                );
                (plan, warning)
            }
            Leftovers {
                last_error: Some(e),
                ..
            } => {
                let warning = format!(
                    "Day {day}: food services failed on all {attempts} attempts ({e}), day left empty"
                );
                (DayPlan::empty(), warning)
            }
            Leftovers { .. } => {
                return Err(PlanningError::CandidatesExhausted {
                    week,
                    day,
                    attempts,
                });
            }
        };

        warn!(day, "{warning}");
        Ok(ValidatedDay {
            plan,
            attempts,
            accepted: false,
            warning: Some(warning),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::models::{FoodItem, MacroProfile};

    fn plan_of(calories: f64) -> DayPlan {
        DayPlan::new(vec![FoodItem::new(
            "test food",
            MacroProfile::new(calories, 0.0, 0.0, 0.0),
        )])
    }

    #[test]
    fn test_accept_within_margin_inclusive() {
        assert!(accept(&plan_of(1950.0), 2000.0, 50.0));
        assert!(accept(&plan_of(2050.0), 2000.0, 50.0));
        assert!(!accept(&plan_of(2050.5), 2000.0, 50.0));
    }

    #[test]
    fn test_empty_plan_never_accepted() {
        assert!(!accept(&DayPlan::empty(), 30.0, 50.0));
    }
}

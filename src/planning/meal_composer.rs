// ABOUTME: Greedy single-day menu composition against a calorie target using external oracles
// ABOUTME: Scans candidates in order, skips unknown foods, pops overshoots and backfills
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Meal Composer
//!
//! One pass over a finite candidate list, so composition always terminates.
//! A day is satisfied once its calories are within the margin of the target
//! and, in variety mode, it holds at least the minimum number of items.

use crate::config::ComposerConfig;
use crate::external::{CandidateGenerator, CandidateRequest, MacroOracle};
use crate::logging::PlannerLogger;
use pierre_core::errors::OracleError;
use pierre_core::models::{FoodItem, MacroTotals};
use serde::{Deserialize, Serialize};
use tracing::debug;

const GENERATOR_SERVICE: &str = "candidate-generator";

/// One day's ordered foods and their summed macros
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    items: Vec<FoodItem>,
    totals: MacroTotals,
}

impl DayPlan {
    /// Build a plan; totals are always the sum of the items
    #[must_use]
    pub fn new(items: Vec<FoodItem>) -> Self {
        let totals = MacroTotals::from_items(&items);
        Self { items, totals }
    }

    /// Plan with no foods and zero macros
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Foods in the order they were added
    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Summed macros
    #[must_use]
    pub const fn totals(&self) -> MacroTotals {
        self.totals
    }

    /// Whether no food was planned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of foods
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Descriptions of the planned foods
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.description.as_str())
    }
}

/// Greedy day composer over a candidate generator and a macro oracle
#[derive(Clone, Copy)]
pub struct MealComposer<'a> {
    generator: &'a dyn CandidateGenerator,
    oracle: &'a dyn MacroOracle,
    margin_kcal: f64,
    min_items: usize,
}

impl<'a> MealComposer<'a> {
    /// Create a composer
    #[must_use]
    pub const fn new(
        generator: &'a dyn CandidateGenerator,
        oracle: &'a dyn MacroOracle,
        config: &ComposerConfig,
    ) -> Self {
        Self {
            generator,
            oracle,
            margin_kcal: config.margin_kcal,
            min_items: config.effective_min_items(),
        }
    }

    /// Allowed deviation from the calorie target (kcal)
    #[must_use]
    pub const fn margin_kcal(&self) -> f64 {
        self.margin_kcal
    }

    /// Ask the generator for candidates and compose a day from them
    ///
    /// # Errors
    ///
    /// Returns `OracleError` if the generator or the macro oracle fails
    pub async fn compose(&self, request: &CandidateRequest) -> Result<DayPlan, OracleError> {
        let candidates = self.generator.generate(request).await;
        let detail = candidates
            .as_ref()
            .map_or_else(ToString::to_string, |c| format!("{} candidates", c.len()));
        PlannerLogger::log_oracle_call(GENERATOR_SERVICE, "generate", candidates.is_ok(), &detail);

        self.compose_from(&candidates?, request.calorie_target).await
    }

    /// Compose a day from a fixed candidate sequence
    ///
    /// Deterministic whenever the oracle is: the same candidates and lookups
    /// always yield the same plan.
    ///
    /// # Errors
    ///
    /// Returns `OracleError` if a macro lookup fails
    pub async fn compose_from(
        &self,
        candidates: &[String],
        calorie_target: f64,
    ) -> Result<DayPlan, OracleError> {
        let floor = calorie_target - self.margin_kcal;
        let ceiling = calorie_target + self.margin_kcal;
        let mut items: Vec<FoodItem> = Vec::new();
        let mut totals = MacroTotals::ZERO;

        for candidate in candidates {
            if totals.calories >= floor && items.len() >= self.min_items {
                break;
            }
            let description = candidate.trim();
            if description.is_empty() || contains_food(&items, description) {
                continue;
            }

            let Some(macros) = self.oracle.lookup(description).await? else {
                debug!(food = %description, "Macro lookup found nothing, skipping");
                continue;
            };
            if !macros.is_plausible() {
                debug!(food = %description, "Implausible macros, skipping");
                continue;
            }

            let item = FoodItem::new(description, macros);
            totals += item.macros();
            items.push(item);

            if totals.calories > ceiling {
                if let Some(dropped) = items.pop() {
                    debug!(food = %dropped.description, "Overshot calorie ceiling, dropping");
                }
                totals = MacroTotals::from_items(&items);
            }
        }

        Ok(DayPlan { items, totals })
    }
}

fn contains_food(items: &[FoodItem], description: &str) -> bool {
    items
        .iter()
        .any(|item| item.description.eq_ignore_ascii_case(description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::FoodCatalog;

    fn composer<'a>(catalog: &'a FoodCatalog, config: &ComposerConfig) -> MealComposer<'a> {
        MealComposer::new(catalog, catalog, config)
    }

    fn candidates(foods: &[&str]) -> Vec<String> {
        foods.iter().map(|f| (*f).to_owned()).collect()
    }

    #[tokio::test]
    async fn test_unknown_foods_are_skipped() {
        let catalog = FoodCatalog::builtin(0);
        let config = ComposerConfig {
            variety_mode: false,
            ..ComposerConfig::default()
        };
        let plan = composer(&catalog, &config)
            .compose_from(
                &candidates(&["unicorn steak", "100g white rice", "100g white rice"]),
                130.0,
            )
            .await
            .unwrap();
        assert_eq!(plan.len(), 1);
        assert!((plan.totals().calories - 130.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_overshoot_is_popped_then_backfilled() {
        let catalog = FoodCatalog::builtin(0);
        let config = ComposerConfig {
            variety_mode: false,
            ..ComposerConfig::default()
        };
        // 312 overshoots 200 + 50 and is dropped; 165 fits
        let plan = composer(&catalog, &config)
            .compose_from(
                &candidates(&["150g baked salmon", "100g grilled chicken breast"]),
                200.0,
            )
            .await
            .unwrap();
        let foods: Vec<&str> = plan.descriptions().collect();
        assert_eq!(foods, ["100g grilled chicken breast"]);
    }

    #[tokio::test]
    async fn test_no_candidates_yields_empty_plan() {
        let catalog = FoodCatalog::builtin(0);
        let plan = composer(&catalog, &ComposerConfig::default())
            .compose_from(&[], 2000.0)
            .await
            .unwrap();
        assert!(plan.is_empty());
        assert!(plan.totals().is_zero());
    }
}

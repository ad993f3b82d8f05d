// ABOUTME: Integration tests for seven-day aggregation with variety tracking
// ABOUTME: Covers weekly totals and averages, dislikes feedback, persistence and exhaustion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::failing_stores::FailingVarietyStore;
use helpers::scripted_oracles::{candidates, uniform_foods, ScriptedGenerator, TableOracle};
use pierre_core::errors::PlanningError;
use pierre_core::models::{Goal, MacroTotals, NutritionTarget, UserMetrics};
use pierre_nutrition_planner::external::FoodCatalog;
use pierre_nutrition_planner::planning::{
    report, DayPlan, PlanningServices, UsedFoodSet, WeekAggregator,
};
use pierre_nutrition_planner::storage::{MemoryStorage, VarietyStore};

fn target(calorie_target: f64) -> NutritionTarget {
    NutritionTarget {
        calorie_target,
        protein_target: 140.0,
        carb_target: 200.0,
        fat_target: 60.0,
    }
}

#[tokio::test]
async fn test_week_totals_and_daily_average() {
    common::init_test_logging();
    let catalog = FoodCatalog::builtin(11);
    let storage = MemoryStorage::new();
    let services = PlanningServices {
        generator: &catalog,
        oracle: &catalog,
        users: &storage,
        variety: &storage,
        archive: &storage,
    };
    let config = common::config_without_variety();
    let metrics = common::sample_metrics(Goal::Maintain);
    let mut used = UsedFoodSet::new();

    let week = WeekAggregator::new(services, &config)
        .plan_week("u1", &metrics, 1, &target(2200.0), &mut used)
        .await
        .unwrap();

    assert_eq!(week.days.len(), 7);
    let summed: MacroTotals = week.days.iter().map(DayPlan::totals).sum();
    assert_eq!(week.totals, summed);
    assert!((week.daily_average().calories - week.totals.calories / 7.0).abs() < 1e-9);

    let parsed = report::parse_totals(&week.report()).unwrap();
    assert!((parsed.calories - week.totals.calories).abs() < 0.051);
}

#[tokio::test]
async fn test_used_foods_feed_later_days_and_are_persisted() {
    let (foods, oracle) = uniform_foods(40, 100.0);
    let generator = ScriptedGenerator::repeating(foods);
    let storage = MemoryStorage::new();
    let services = PlanningServices {
        generator: &generator,
        oracle: &oracle,
        users: &storage,
        variety: &storage,
        archive: &storage,
    };
    let config = common::config_without_variety();
    let metrics = UserMetrics {
        dislikes: "okra".to_owned(),
        ..common::sample_metrics(Goal::Maintain)
    };
    let mut used = UsedFoodSet::new();

    let week = WeekAggregator::new(services, &config)
        .plan_week("u1", &metrics, 3, &target(300.0), &mut used)
        .await
        .unwrap();
    assert!(week.warnings.is_empty());

    let requests = generator.requests();
    assert_eq!(requests.len(), 7);
    assert_eq!(requests[0].dislikes, "okra");
    // Every day accepts the same first three foods
    assert_eq!(
        requests[1].dislikes,
        "okra, portion 1 of test food, portion 2 of test food, portion 3 of test food"
    );

    let stored = storage.get_used("u1").await.unwrap();
    assert_eq!(stored, used.as_slice());
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn test_variety_write_failure_is_a_single_warning() {
    let (foods, oracle) = uniform_foods(40, 100.0);
    let generator = ScriptedGenerator::repeating(foods);
    let storage = MemoryStorage::new();
    let variety = FailingVarietyStore::default();
    let services = PlanningServices {
        generator: &generator,
        oracle: &oracle,
        users: &storage,
        variety: &variety,
        archive: &storage,
    };
    let config = common::config_without_variety();
    let metrics = common::sample_metrics(Goal::Maintain);
    let mut used = UsedFoodSet::new();

    let week = WeekAggregator::new(services, &config)
        .plan_week("u1", &metrics, 1, &target(500.0), &mut used)
        .await
        .unwrap();

    assert_eq!(week.days.len(), 7);
    assert_eq!(week.warnings.len(), 1);
    assert!(week.warnings[0].contains("variety store offline"));
    // Only day one introduced new foods
    assert_eq!(variety.writes(), 1);
    assert_eq!(used.len(), 5);
}

#[tokio::test]
async fn test_exhausted_day_aborts_the_week() {
    let generator = ScriptedGenerator::repeating(candidates(&["mystery meat"]));
    let oracle = TableOracle::default();
    let storage = MemoryStorage::new();
    let services = PlanningServices {
        generator: &generator,
        oracle: &oracle,
        users: &storage,
        variety: &storage,
        archive: &storage,
    };
    let config = common::config_without_variety();
    let metrics = common::sample_metrics(Goal::Cut);
    let mut used = UsedFoodSet::new();

    let err = WeekAggregator::new(services, &config)
        .plan_week("u1", &metrics, 2, &target(2000.0), &mut used)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PlanningError::CandidatesExhausted { week: 2, day: 1, .. }
    ));
}

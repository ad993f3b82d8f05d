// ABOUTME: Criterion benchmarks for target planning and week composition
// ABOUTME: Measures the pure target math and a full catalog-backed week and projection
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Criterion benchmarks for the planning pipeline.
//!
//! Oracles are served by the built-in food catalog so the numbers reflect
//! planner overhead rather than network latency.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pierre_core::models::{
    ActivityLevel, DietType, Gender, Goal, GoalIntensity, NutritionTarget, UserMetrics,
};
use pierre_intelligence::TargetPlanner;
use pierre_nutrition_planner::config::PlannerConfig;
use pierre_nutrition_planner::external::FoodCatalog;
use pierre_nutrition_planner::planning::{
    PlanningServices, ProjectionSchedule, ProjectionSimulator, UsedFoodSet, WeekAggregator,
};
use pierre_nutrition_planner::storage::MemoryStorage;
use tokio::runtime::Runtime;

fn bench_metrics(goal: Goal) -> UserMetrics {
    UserMetrics {
        weight_kg: 82.0,
        height_cm: 180.0,
        age: 35,
        gender: Gender::Male,
        activity_level: ActivityLevel::Moderate,
        goal,
        goal_intensity: GoalIntensity::Balanced,
        diet_type: DietType::NonVeg,
        dislikes: String::new(),
        target_weight: match goal {
            Goal::Cut => Some(76.0),
            Goal::Bulk => Some(86.0),
            Goal::Maintain => None,
        },
        tenure_months: 3,
    }
}

fn bench_target_planning(c: &mut Criterion) {
    let config = PlannerConfig::default();
    let planner = TargetPlanner::new(&config.nutrition);
    let mut group = c.benchmark_group("target_plan");

    for goal in [Goal::Cut, Goal::Bulk, Goal::Maintain] {
        let metrics = bench_metrics(goal);
        group.bench_with_input(BenchmarkId::from_parameter(goal), &metrics, |b, metrics| {
            b.iter(|| planner.plan(black_box(metrics), Some(12)).unwrap());
        });
    }

    group.finish();
}

fn bench_week_composition(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let config = PlannerConfig::default();
    let catalog = FoodCatalog::builtin(42);
    let storage = MemoryStorage::new();
    let services = PlanningServices {
        generator: &catalog,
        oracle: &catalog,
        users: &storage,
        variety: &storage,
        archive: &storage,
    };
    let metrics = bench_metrics(Goal::Cut);
    let target = NutritionTarget {
        calorie_target: 2200.0,
        protein_target: 164.0,
        carb_target: 190.0,
        fat_target: 61.0,
    };

    c.bench_function("week_composition", |b| {
        b.to_async(&runtime).iter(|| async {
            let aggregator = WeekAggregator::new(services, &config);
            let mut used = UsedFoodSet::new();
            aggregator
                .plan_week("bench-user", &metrics, 1, &target, &mut used)
                .await
                .unwrap()
        });
    });
}

fn bench_projection(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let config = PlannerConfig::default();
    let catalog = FoodCatalog::builtin(7);
    let storage = MemoryStorage::new();
    let services = PlanningServices {
        generator: &catalog,
        oracle: &catalog,
        users: &storage,
        variety: &storage,
        archive: &storage,
    };
    let metrics = bench_metrics(Goal::Cut);
    let mut group = c.benchmark_group("projection");
    group.sample_size(10);

    for weeks in [1_u32, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(weeks), &weeks, |b, &weeks| {
            b.to_async(&runtime).iter(|| async {
                ProjectionSimulator::new(services, &config)
                    .simulate("bench-user", &metrics, ProjectionSchedule::Weeks(weeks), None)
                    .await
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_target_planning,
    bench_week_composition,
    bench_projection
);
criterion_main!(benches);

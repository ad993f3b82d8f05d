// ABOUTME: Integration tests for the multi-week projection simulator
// ABOUTME: Covers snap-to-target, safety clamping, continuation, fail-fast validation and persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::metrics_with_target;
use helpers::failing_stores::{FailingArchive, FailingVarietyStore};
use helpers::scripted_oracles::{candidates, uniform_foods, ScriptedGenerator, TableOracle};
use pierre_core::errors::ErrorCode;
use pierre_core::models::{Goal, MacroProfile, UserMetrics};
use pierre_intelligence::{metabolic_profile, TargetPlanner};
use pierre_nutrition_planner::config::{PlannerConfig, TargetMode};
use pierre_nutrition_planner::planning::{
    PlanningServices, ProjectionRequest, ProjectionSchedule, ProjectionSimulator, ProjectionState,
};
use pierre_nutrition_planner::storage::{MemoryStorage, UserStore, VarietyStore};

struct Fixture {
    generator: ScriptedGenerator,
    oracle: TableOracle,
    storage: MemoryStorage,
}

impl Fixture {
    /// Sixty 100 kcal foods: every day lands within the margin
    fn uniform() -> Self {
        let (foods, oracle) = uniform_foods(60, 100.0);
        Self {
            generator: ScriptedGenerator::repeating(foods),
            oracle,
            storage: MemoryStorage::new(),
        }
    }

    fn services(&self) -> PlanningServices<'_> {
        PlanningServices {
            generator: &self.generator,
            oracle: &self.oracle,
            users: &self.storage,
            variety: &self.storage,
            archive: &self.storage,
        }
    }
}

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn test_final_week_snaps_to_target_with_safety_warning() {
    common::init_test_logging();
    let fixture = Fixture::uniform();
    let config = common::config_without_variety();
    let metrics = metrics_with_target(Goal::Cut, 80.0, 75.0, 1);
    fixture.storage.put("u1", &metrics).await.unwrap();

    let request = ProjectionRequest {
        user_id: "u1".to_owned(),
        schedule: ProjectionSchedule::Tenure,
        resume_from: None,
    };
    let projection = ProjectionSimulator::new(fixture.services(), &config)
        .run(&request)
        .await
        .unwrap();

    assert_eq!(projection.weeks.len(), 4);
    let numbers: Vec<u32> = projection.weeks.iter().map(|w| w.week_number).collect();
    assert_eq!(numbers, [1, 2, 3, 4]);
    for week in &projection.weeks[..3] {
        assert!(week.end_weight <= week.start_weight, "cut never gains");
    }
    assert_eq!(projection.weeks[3].end_weight.to_bits(), 75.0_f64.to_bits());
    assert_eq!(
        projection.end_state,
        ProjectionState {
            current_weight: 75.0,
            week_offset: 4
        }
    );

    let warnings = &projection.summary.warnings;
    assert!(warnings.iter().any(|w| w.contains("Consider 10 weeks")), "{warnings:?}");
    assert!(warnings.iter().any(|w| w.contains("at least 5 weeks")), "{warnings:?}");
    assert_eq!(projection.summary.week_count, 4);
    assert!(same(projection.summary.start_weight, 80.0));
    assert_eq!(fixture.storage.archived_weeks("u1").len(), 4);
}

#[tokio::test]
async fn test_surplus_is_clamped_to_safe_gain() {
    let mut config = common::config_without_variety();
    config.composer.margin_kcal = 1000.0;
    let metrics = metrics_with_target(Goal::Bulk, 70.0, 80.0, 1);
    let first_target = TargetPlanner::new(&config.nutrition)
        .plan_at_weight(&metrics, 70.0, Some(3))
        .unwrap()
        .target
        .calorie_target;

    let oracle = TableOracle::new(&[(
        "family size lasagne",
        MacroProfile::new(first_target + 900.0, 60.0, 300.0, 90.0),
    )]);
    let fixture = Fixture {
        generator: ScriptedGenerator::repeating(candidates(&["family size lasagne"])),
        oracle,
        storage: MemoryStorage::new(),
    };

    let projection = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Weeks(3), None)
        .await
        .unwrap();

    let safe_max = config.nutrition.rate_policy.bulk.safe_max;
    for week in &projection.weeks[..2] {
        assert!(same(week.end_weight - week.start_weight, safe_max));
    }
    assert!(same(projection.end_state.current_weight, 80.0));
    assert!(projection
        .summary
        .warnings
        .iter()
        .any(|w| w.contains("safe maximum")));
}

#[tokio::test]
async fn test_continuation_numbers_weeks_after_offset() {
    let fixture = Fixture::uniform();
    let config = common::config_without_variety();
    let metrics = metrics_with_target(Goal::Cut, 80.0, 75.0, 1);
    let resume = ProjectionState {
        current_weight: 78.0,
        week_offset: 4,
    };

    let projection = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Weeks(2), Some(resume))
        .await
        .unwrap();

    let numbers: Vec<u32> = projection.weeks.iter().map(|w| w.week_number).collect();
    assert_eq!(numbers, [5, 6]);
    assert!(same(projection.weeks[0].start_weight, 78.0));
    assert!(same(
        projection.weeks[1].start_weight,
        projection.weeks[0].end_weight
    ));
    assert_eq!(projection.end_state.week_offset, 6);
    assert_eq!(projection.summary.week_count, 2);
}

#[tokio::test]
async fn test_invalid_profile_aborts_before_any_week() {
    let fixture = Fixture::uniform();
    let config = PlannerConfig::default();
    let metrics = UserMetrics {
        height_cm: 0.0,
        ..metrics_with_target(Goal::Cut, 80.0, 75.0, 1)
    };

    let err = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Tenure, None)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(fixture.generator.call_count(), 0);
    assert!(fixture.storage.archived_weeks("u1").is_empty());
}

#[tokio::test]
async fn test_invalid_resume_weight_is_rejected() {
    let fixture = Fixture::uniform();
    let config = PlannerConfig::default();
    let metrics = metrics_with_target(Goal::Cut, 80.0, 75.0, 1);
    let resume = ProjectionState {
        current_weight: -3.0,
        week_offset: 2,
    };

    let err = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Tenure, Some(resume))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(fixture.generator.call_count(), 0);
}

#[tokio::test]
async fn test_missing_profile_is_not_found() {
    let fixture = Fixture::uniform();
    let config = PlannerConfig::default();
    let request = ProjectionRequest {
        user_id: "ghost".to_owned(),
        schedule: ProjectionSchedule::Tenure,
        resume_from: None,
    };

    let err = ProjectionSimulator::new(fixture.services(), &config)
        .run(&request)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_until_target_schedule_uses_applied_rate() {
    let fixture = Fixture::uniform();
    let config = common::config_without_variety();
    let metrics = metrics_with_target(Goal::Cut, 80.0, 75.0, 1);

    let projection = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::UntilTarget, None)
        .await
        .unwrap();
    // 5kg at the recommended 0.5 kg/week
    assert_eq!(projection.summary.week_count, 10);
    assert!(same(projection.end_state.current_weight, 75.0));

    let no_target = common::sample_metrics(Goal::Cut);
    let err = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &no_target, ProjectionSchedule::UntilTarget, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_adaptive_mode_holds_maintenance_near_target() {
    let fixture = Fixture::uniform();
    let mut config = common::config_without_variety();
    config.projection.target_mode = TargetMode::Adaptive;
    let metrics = metrics_with_target(Goal::Cut, 72.0, 70.5, 1);

    let projection = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Weeks(1), None)
        .await
        .unwrap();

    let tdee = metabolic_profile(&metrics, 72.0, &config.nutrition)
        .unwrap()
        .tdee;
    let targets = projection.weeks[0].targets;
    assert!(same(targets.calorie_target, tdee));
    assert!(same(targets.protein_target, 144.0));
}

#[tokio::test]
async fn test_persistence_failures_become_warnings() {
    let (foods, oracle) = uniform_foods(60, 100.0);
    let generator = ScriptedGenerator::repeating(foods);
    let storage = MemoryStorage::new();
    let variety = FailingVarietyStore::default();
    let archive = FailingArchive;
    let services = PlanningServices {
        generator: &generator,
        oracle: &oracle,
        users: &storage,
        variety: &variety,
        archive: &archive,
    };
    let config = common::config_without_variety();
    let metrics = common::sample_metrics(Goal::Maintain);

    let projection = ProjectionSimulator::new(services, &config)
        .simulate("u1", &metrics, ProjectionSchedule::Weeks(2), None)
        .await
        .unwrap();

    let warnings = &projection.summary.warnings;
    assert_eq!(projection.weeks.len(), 2);
    assert!(warnings.iter().any(|w| w.contains("could not be loaded")));
    assert!(warnings
        .iter()
        .any(|w| w.contains("Week 2 snapshot could not be archived")));
    assert!(warnings
        .iter()
        .any(|w| w.starts_with("Week 1: Variety state could not be saved")));
}

#[tokio::test]
async fn test_stored_variety_state_reaches_first_prompt() {
    let fixture = Fixture::uniform();
    let config = common::config_without_variety();
    let metrics = common::sample_metrics(Goal::Maintain);
    fixture
        .storage
        .put_used("u1", &["150g cottage cheese".to_owned()])
        .await
        .unwrap();

    ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Weeks(1), None)
        .await
        .unwrap();

    let first = &fixture.generator.requests()[0];
    assert_eq!(first.dislikes, "150g cottage cheese");
    let stored = fixture.storage.get_used("u1").await.unwrap();
    assert_eq!(stored[0], "150g cottage cheese");
    assert!(stored.len() > 1);
}

#[tokio::test]
async fn test_fixed_mode_holds_first_week_targets() {
    let fixture = Fixture::uniform();
    let config = common::config_without_variety();
    let metrics = metrics_with_target(Goal::Cut, 80.0, 76.0, 1);
    let planned = TargetPlanner::new(&config.nutrition)
        .plan_at_weight(&metrics, 80.0, Some(4))
        .unwrap()
        .target;

    let projection = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Tenure, None)
        .await
        .unwrap();

    assert_eq!(projection.weeks.len(), 4);
    for week in &projection.weeks {
        assert_eq!(week.targets, planned, "week {}", week.week_number);
    }
}

#[tokio::test]
async fn test_resume_without_room_for_week_numbers_is_rejected() {
    let fixture = Fixture::uniform();
    let config = common::config_without_variety();
    let metrics = metrics_with_target(Goal::Cut, 80.0, 75.0, 1);
    let resume = ProjectionState {
        current_weight: 80.0,
        week_offset: u32::MAX,
    };

    let err = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Weeks(1), Some(resume))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(fixture.generator.call_count(), 0);
}

#[tokio::test]
async fn test_target_against_goal_is_not_snapped() {
    let fixture = Fixture::uniform();
    let config = common::config_without_variety();
    // A cut towards a heavier target
    let metrics = metrics_with_target(Goal::Cut, 70.0, 75.0, 1);

    let projection = ProjectionSimulator::new(fixture.services(), &config)
        .simulate("u1", &metrics, ProjectionSchedule::Weeks(2), None)
        .await
        .unwrap();

    for week in &projection.weeks {
        assert!(week.end_weight <= week.start_weight, "week {}", week.week_number);
    }
    assert!(projection.end_state.current_weight <= 70.0);
}

// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, sample profiles and planner configuration helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `pierre_nutrition_planner`

use pierre_core::models::{ActivityLevel, DietType, Gender, Goal, GoalIntensity, UserMetrics};
use pierre_nutrition_planner::config::PlannerConfig;
use std::env;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// 70kg, 175cm, 30 year old moderately active male
pub fn sample_metrics(goal: Goal) -> UserMetrics {
    UserMetrics {
        weight_kg: 70.0,
        height_cm: 175.0,
        age: 30,
        gender: Gender::Male,
        activity_level: ActivityLevel::Moderate,
        goal,
        goal_intensity: GoalIntensity::Balanced,
        diet_type: DietType::NonVeg,
        dislikes: String::new(),
        target_weight: None,
        tenure_months: 1,
    }
}

/// Sample profile moving from `weight_kg` to `target_kg`
pub fn metrics_with_target(goal: Goal, weight_kg: f64, target_kg: f64, tenure_months: u32) -> UserMetrics {
    UserMetrics {
        weight_kg,
        target_weight: Some(target_kg),
        tenure_months,
        ..sample_metrics(goal)
    }
}

/// Default configuration with variety mode off so small candidate lists stop early
pub fn config_without_variety() -> PlannerConfig {
    let mut config = PlannerConfig::default();
    config.composer.variety_mode = false;
    config
}

// ABOUTME: Integration tests for planner configuration environment overrides
// ABOUTME: Serialized because they mutate process environment variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_core::errors::{AppError, ErrorCode};
use pierre_nutrition_planner::config::{PlannerConfig, TargetMode};
use serial_test::serial;
use std::env;

const VARS: [&str; 6] = [
    "PIERRE_MEAL_MARGIN_KCAL",
    "PIERRE_MIN_DAY_ITEMS",
    "PIERRE_MAX_DAY_ATTEMPTS",
    "PIERRE_KCAL_PER_KG",
    "PIERRE_VARIETY_PROMPT_LIMIT",
    "PIERRE_TARGET_MODE",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_without_overrides_uses_defaults() {
    clear_vars();
    let config = PlannerConfig::load().unwrap();
    assert!((config.composer.margin_kcal - 50.0).abs() < f64::EPSILON);
    assert_eq!(config.validator.max_attempts, 3);
    assert!((config.nutrition.energy.kcal_per_kg - 7700.0).abs() < f64::EPSILON);
    assert_eq!(config.projection.target_mode, TargetMode::Fixed);
}

#[test]
#[serial]
fn test_env_overrides_are_applied() {
    clear_vars();
    env::set_var("PIERRE_MEAL_MARGIN_KCAL", "75");
    env::set_var("PIERRE_MAX_DAY_ATTEMPTS", "5");
    env::set_var("PIERRE_VARIETY_PROMPT_LIMIT", "20");
    env::set_var("PIERRE_TARGET_MODE", "adaptive");

    let config = PlannerConfig::load().unwrap();
    clear_vars();

    assert!((config.composer.margin_kcal - 75.0).abs() < f64::EPSILON);
    assert_eq!(config.validator.max_attempts, 5);
    assert_eq!(config.variety.prompt_limit, 20);
    assert_eq!(config.projection.target_mode, TargetMode::Adaptive);
}

#[test]
#[serial]
fn test_unparsable_override_fails_load() {
    clear_vars();
    env::set_var("PIERRE_MIN_DAY_ITEMS", "plenty");
    let result = PlannerConfig::load();
    clear_vars();

    let err: AppError = result.unwrap_err().into();
    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(err.message.contains("PIERRE_MIN_DAY_ITEMS"));
}

#[test]
#[serial]
fn test_out_of_range_override_fails_validation() {
    clear_vars();
    env::set_var("PIERRE_MAX_DAY_ATTEMPTS", "0");
    let result = PlannerConfig::load();
    clear_vars();

    let err: AppError = result.unwrap_err().into();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn test_non_positive_energy_constant_is_rejected() {
    clear_vars();
    env::set_var("PIERRE_KCAL_PER_KG", "-7700");
    let result = PlannerConfig::load();
    clear_vars();

    assert!(result.is_err());
}

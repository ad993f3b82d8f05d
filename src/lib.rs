// ABOUTME: Main library entry point for the Pierre nutrition planner
// ABOUTME: Async planning pipeline from daily menus to multi-week weight projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Pierre Nutrition Planner
//!
//! Derives calorie and macro targets from body metrics and a goal, composes
//! daily and weekly menus by querying external food services, and simulates a
//! weight trajectory week by week against a target.
//!
//! ## Architecture
//!
//! - **`pierre_core`**: errors, domain models, unit constants
//! - **`pierre_intelligence`**: metabolic calculator, target planner, safe-rate policy
//! - **planning**: meal composer, day validator, week aggregator, projection simulator
//! - **external**: candidate generator and macro oracle contracts with USDA and catalog adapters
//! - **storage**: profile, variety and archive contracts with in-memory implementations
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_nutrition_planner::config::PlannerConfig;
//! use pierre_nutrition_planner::external::FoodCatalog;
//! use pierre_nutrition_planner::planning::{PlanningServices, ProjectionSchedule, ProjectionSimulator};
//! use pierre_nutrition_planner::storage::MemoryStorage;
//! use pierre_core::errors::AppResult;
//! use pierre_core::models::UserMetrics;
//!
//! async fn project(metrics: &UserMetrics) -> AppResult<()> {
//!     let config = PlannerConfig::load()?;
//!     let catalog = FoodCatalog::builtin(42);
//!     let storage = MemoryStorage::new();
//!     let services = PlanningServices {
//!         generator: &catalog,
//!         oracle: &catalog,
//!         users: &storage,
//!         variety: &storage,
//!         archive: &storage,
//!     };
//!     let projection = ProjectionSimulator::new(services, &config)
//!         .simulate("user-1", metrics, ProjectionSchedule::Tenure, None)
//!         .await?;
//!     println!("{}", projection.summary.analysis);
//!     Ok(())
//! }
//! ```

/// Runtime configuration with environment overrides
pub mod config;

/// Candidate generator and macro oracle contracts and adapters
pub mod external;

/// Logging configuration and structured pipeline events
pub mod logging;

/// Day, week and multi-week planning
pub mod planning;

/// Profile, variety and archive storage
pub mod storage;

pub use pierre_core::errors;
pub use pierre_core::models;

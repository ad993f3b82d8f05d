// ABOUTME: Planning pipeline from a single day up to a multi-week weight projection
// ABOUTME: Wires composer, validator, week aggregator and simulator over shared collaborators
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Planning Pipeline
//!
//! Leaf first:
//!
//! - [`meal_composer`]: greedy day composition against the oracles
//! - [`day_validator`]: bounded retries with an acceptance check
//! - [`week_aggregator`]: seven days, variety tracking, weekly totals
//! - [`projection`]: weeks in sequence with the weight carried forward
//!
//! Everything runs sequentially. Week N finishes, including its variety
//! writes, before week N+1 starts. Callers must not run two projections for
//! the same user at once; variety state is read-then-write.

/// Bounded retries around the composer
pub mod day_validator;
/// Greedy single-day composition
pub mod meal_composer;
/// Multi-week projection with weight state
pub mod projection;
/// Text rendering and `Total:` parsing
pub mod report;
/// Used-food accumulator
pub mod variety;
/// Seven-day aggregation
pub mod week_aggregator;

pub use day_validator::{accept, DayValidator, ValidatedDay};
pub use meal_composer::{DayPlan, MealComposer};
pub use projection::{
    Projection, ProjectionRequest, ProjectionSchedule, ProjectionSimulator, ProjectionState,
    ProjectionSummary, WeekRecord,
};
pub use variety::UsedFoodSet;
pub use week_aggregator::{WeekAggregator, WeekPlan};

use crate::external::{CandidateGenerator, MacroOracle};
use crate::storage::{PlanArchive, UserStore, VarietyStore};

/// External collaborators the pipeline calls
#[derive(Clone, Copy)]
pub struct PlanningServices<'a> {
    /// Proposes candidate foods
    pub generator: &'a dyn CandidateGenerator,
    /// Resolves macros for a food description
    pub oracle: &'a dyn MacroOracle,
    /// Profile storage
    pub users: &'a dyn UserStore,
    /// Used-food variety state
    pub variety: &'a dyn VarietyStore,
    /// Weekly snapshot archive
    pub archive: &'a dyn PlanArchive,
}

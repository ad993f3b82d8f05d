// ABOUTME: Persistence contracts for profiles, used-food variety state and weekly plan snapshots
// ABOUTME: Async UserStore, VarietyStore and PlanArchive traits plus the archived week record
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Storage Contracts
//!
//! Storage mechanics are external to the planner. The pipeline reads the
//! profile and the used-food list once per run, then writes variety state and
//! weekly snapshots best-effort: a failed write is logged and reported as a
//! warning, never propagated.

/// In-memory implementation of every store
pub mod memory;

pub use memory::MemoryStorage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pierre_core::errors::AppResult;
use pierre_core::models::{MacroTotals, UserMetrics};
use serde::{Deserialize, Serialize};

/// Snapshot of one planned week, as archived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedWeek {
    /// Week number within the user's plan
    pub week_number: u32,
    /// Rendered week report
    pub plan_text: String,
    /// Summed macros for the week
    pub totals: MacroTotals,
    /// Weight at the start of the week (kg)
    pub start_weight: f64,
    /// Projected weight at the end of the week (kg)
    pub end_weight: f64,
    /// When the snapshot was taken
    pub archived_at: DateTime<Utc>,
}

/// Profile storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a profile; `None` when the user has none
    async fn get(&self, user_id: &str) -> AppResult<Option<UserMetrics>>;

    /// Store a profile
    async fn put(&self, user_id: &str, metrics: &UserMetrics) -> AppResult<()>;
}

/// Used-food variety state, oldest first
#[async_trait]
pub trait VarietyStore: Send + Sync {
    /// Foods the user has already been served
    async fn get_used(&self, user_id: &str) -> AppResult<Vec<String>>;

    /// Replace the used-food list
    async fn put_used(&self, user_id: &str, used: &[String]) -> AppResult<()>;
}

/// Weekly plan snapshots
#[async_trait]
pub trait PlanArchive: Send + Sync {
    /// Append a week snapshot
    async fn append(&self, user_id: &str, week: &ArchivedWeek) -> AppResult<()>;
}

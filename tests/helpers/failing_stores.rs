// ABOUTME: Storage doubles whose writes and reads always fail
// ABOUTME: Exercise the best-effort persistence paths of the planning pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use pierre_core::errors::{AppError, AppResult};
use pierre_nutrition_planner::storage::{ArchivedWeek, PlanArchive, VarietyStore};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Variety store that is never reachable
#[derive(Default)]
pub struct FailingVarietyStore {
    writes: AtomicUsize,
}

impl FailingVarietyStore {
    /// Attempted writes
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VarietyStore for FailingVarietyStore {
    async fn get_used(&self, _user_id: &str) -> AppResult<Vec<String>> {
        Err(AppError::storage("variety store offline"))
    }

    async fn put_used(&self, _user_id: &str, _used: &[String]) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(AppError::storage("variety store offline"))
    }
}

/// Plan archive that rejects every snapshot
pub struct FailingArchive;

#[async_trait]
impl PlanArchive for FailingArchive {
    async fn append(&self, _user_id: &str, _week: &ArchivedWeek) -> AppResult<()> {
        Err(AppError::storage("archive bucket missing"))
    }
}

// ABOUTME: DashMap-backed in-memory storage for profiles, variety state and plan snapshots
// ABOUTME: Used by the CLI and tests; safe to share across tasks behind an Arc
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{ArchivedWeek, PlanArchive, UserStore, VarietyStore};
use async_trait::async_trait;
use dashmap::DashMap;
use pierre_core::errors::AppResult;
use pierre_core::models::UserMetrics;
use std::sync::Arc;

/// In-memory storage implementing every store contract
///
/// `DashMap` shards its locks, so concurrent runs for different users do not contend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    profiles: Arc<DashMap<String, UserMetrics>>,
    used_foods: Arc<DashMap<String, Vec<String>>>,
    archive: Arc<DashMap<String, Vec<ArchivedWeek>>>,
}

impl MemoryStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Archived weeks for a user, in append order
    #[must_use]
    pub fn archived_weeks(&self, user_id: &str) -> Vec<ArchivedWeek> {
        self.archive
            .get(user_id)
            .map(|weeks| weeks.value().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn get(&self, user_id: &str) -> AppResult<Option<UserMetrics>> {
        Ok(self.profiles.get(user_id).map(|m| m.value().clone()))
    }

    async fn put(&self, user_id: &str, metrics: &UserMetrics) -> AppResult<()> {
        metrics.validate()?;
        self.profiles.insert(user_id.to_owned(), metrics.clone());
        Ok(())
    }
}

#[async_trait]
impl VarietyStore for MemoryStorage {
    async fn get_used(&self, user_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .used_foods
            .get(user_id)
            .map(|used| used.value().clone())
            .unwrap_or_default())
    }

    async fn put_used(&self, user_id: &str, used: &[String]) -> AppResult<()> {
        self.used_foods.insert(user_id.to_owned(), used.to_vec());
        Ok(())
    }
}

#[async_trait]
impl PlanArchive for MemoryStorage {
    async fn append(&self, user_id: &str, week: &ArchivedWeek) -> AppResult<()> {
        self.archive
            .entry(user_id.to_owned())
            .or_default()
            .push(week.clone());
        Ok(())
    }
}

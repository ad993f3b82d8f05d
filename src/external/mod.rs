// ABOUTME: External oracle contracts and adapters for food candidates and macro lookup
// ABOUTME: Defines the CandidateGenerator and MacroOracle traits plus USDA and catalog implementations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External Oracles
//!
//! The planner treats food generation and macro lookup as black boxes behind
//! two async traits. Both may be nondeterministic and may fail; the pipeline
//! bounds the damage with retries and warnings rather than timeouts.

/// In-memory food catalog usable as both oracles
pub mod catalog;
/// USDA `FoodData` Central macro oracle
pub mod usda_oracle;

pub use catalog::{CatalogEntry, FoodCatalog};
pub use usda_oracle::{UsdaMacroOracle, UsdaOracleConfig};

use async_trait::async_trait;
use pierre_core::errors::OracleError;
use pierre_core::models::{DietType, Goal, MacroProfile};

/// Everything a candidate generator needs to propose a day of foods
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRequest {
    /// Body composition goal
    pub goal: Goal,
    /// Dietary pattern
    pub diet_type: DietType,
    /// Daily calorie target (kcal)
    pub calorie_target: f64,
    /// Daily protein target (grams)
    pub protein_target: f64,
    /// Comma-separated foods to avoid, including recently used ones
    pub dislikes: String,
}

impl CandidateRequest {
    /// Dislike terms, lowercased, trimmed, empty entries removed
    #[must_use]
    pub fn dislike_terms(&self) -> Vec<String> {
        self.dislikes
            .split(',')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect()
    }
}

/// Proposes an ordered list of free-text food descriptions with quantities
#[async_trait]
pub trait CandidateGenerator: Send + Sync {
    /// Generate candidates for one day; may differ between calls
    ///
    /// # Errors
    ///
    /// Returns `OracleError` if the generator cannot be reached or answers garbage
    async fn generate(&self, request: &CandidateRequest) -> Result<Vec<String>, OracleError>;
}

/// Resolves a food description into macros
#[async_trait]
pub trait MacroOracle: Send + Sync {
    /// Look up macros; `Ok(None)` means the food is unknown
    ///
    /// # Errors
    ///
    /// Returns `OracleError` if the oracle cannot be reached or answers garbage
    async fn lookup(&self, description: &str) -> Result<Option<MacroProfile>, OracleError>;
}

// ABOUTME: In-memory food catalog acting as both candidate generator and macro oracle
// ABOUTME: JSON-loadable entries, diet and dislike filtering, seeded shuffles for reproducible runs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Food Catalog
//!
//! A fixed list of portioned foods with known macros. As a candidate generator
//! it filters by diet and dislikes and returns a shuffled selection; the shuffle
//! is seeded so a catalog built with the same seed replays the same sequence of
//! answers.
//!
//! Dislike terms that name a catalog entry exactly are treated as recently used
//! foods: they are avoided while enough alternatives remain, then offered last.

use super::{CandidateGenerator, CandidateRequest, MacroOracle};
use async_trait::async_trait;
use pierre_core::errors::{AppError, AppResult, OracleError};
use pierre_core::models::{DietType, MacroProfile};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fewest fresh candidates before recently used foods are offered again
const MIN_FRESH_CANDIDATES: usize = 8;

/// One portioned food with its macros
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Description including quantity (e.g. "100g tofu")
    pub description: String,
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein_g: f64,
    /// Carbohydrates (grams)
    pub carb_g: f64,
    /// Fat (grams)
    pub fat_g: f64,
    /// Suitable for a vegetarian diet
    #[serde(default)]
    pub vegetarian: bool,
}

impl CatalogEntry {
    fn macros(&self) -> MacroProfile {
        MacroProfile::new(self.calories, self.protein_g, self.carb_g, self.fat_g)
    }
}

fn entry(description: &str, macros: [f64; 4], vegetarian: bool) -> CatalogEntry {
    let [calories, protein_g, carb_g, fat_g] = macros;
    CatalogEntry {
        description: description.to_owned(),
        calories,
        protein_g,
        carb_g,
        fat_g,
        vegetarian,
    }
}

/// In-memory catalog of foods
#[derive(Debug)]
pub struct FoodCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    seed: u64,
    calls: AtomicU64,
    max_candidates: usize,
}

impl FoodCatalog {
    /// Build a catalog from entries
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>, seed: u64) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.description.to_lowercase(), i))
            .collect();
        Self {
            entries,
            index,
            seed,
            calls: AtomicU64::new(0),
            max_candidates: 24,
        }
    }

    /// Limit how many candidates each `generate` call returns
    #[must_use]
    pub const fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Parse a catalog from a JSON array of entries
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or an entry has implausible macros
    pub fn from_json_str(json: &str, seed: u64) -> AppResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        if let Some(bad) = entries.iter().find(|e| !e.macros().is_plausible()) {
            return Err(AppError::invalid_input(format!(
                "Catalog entry '{}' has negative or non-finite macros",
                bad.description
            )));
        }
        Ok(Self::new(entries, seed))
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path, seed: u64) -> AppResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            AppError::invalid_input(format!("Cannot read catalog {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json, seed)
    }

    /// Built-in catalog of common portioned foods
    #[must_use]
    pub fn builtin(seed: u64) -> Self {
        let entries = vec![
            entry("100g grilled chicken breast", [165.0, 31.0, 0.0, 3.6], false),
            entry("150g baked salmon", [312.0, 33.0, 0.0, 19.5], false),
            entry("100g lean beef mince", [176.0, 26.0, 0.0, 8.0], false),
            entry("120g canned tuna in water", [139.0, 31.0, 0.0, 1.2], false),
            entry("100g roast turkey breast", [135.0, 30.0, 0.0, 1.0], false),
            entry("150g cod fillet", [123.0, 27.0, 0.0, 1.0], false),
            entry("100g prawns", [99.0, 24.0, 0.2, 0.3], false),
            entry("2 large boiled eggs", [155.0, 12.6, 1.1, 10.6], true),
            entry("200g greek yogurt", [194.0, 20.0, 7.8, 10.0], true),
            entry("150g cottage cheese", [147.0, 16.5, 5.1, 6.5], true),
            entry("100g firm tofu", [144.0, 15.7, 3.5, 8.7], true),
            entry("100g tempeh", [193.0, 20.3, 7.6, 10.8], true),
            entry("150g cooked lentils", [174.0, 13.5, 30.0, 0.6], true),
            entry("150g cooked chickpeas", [246.0, 13.3, 41.0, 3.9], true),
            entry("100g paneer", [265.0, 18.3, 1.2, 20.8], true),
            entry("30g whey protein shake", [120.0, 24.0, 3.0, 1.5], true),
            entry("100g white rice", [130.0, 2.7, 28.0, 0.3], true),
            entry("150g brown rice", [168.0, 3.9, 35.0, 1.4], true),
            entry("60g rolled oats", [228.0, 8.0, 40.0, 4.1], true),
            entry("150g cooked quinoa", [180.0, 6.6, 32.0, 2.9], true),
            entry("200g baked potato", [186.0, 5.0, 42.0, 0.2], true),
            entry("150g sweet potato", [135.0, 2.4, 31.0, 0.2], true),
            entry("2 slices wholemeal bread", [160.0, 8.0, 28.0, 2.0], true),
            entry("100g wholewheat pasta", [149.0, 6.0, 30.0, 1.7], true),
            entry("1 medium banana", [105.0, 1.3, 27.0, 0.4], true),
            entry("1 medium apple", [95.0, 0.5, 25.0, 0.3], true),
            entry("150g blueberries", [86.0, 1.1, 21.7, 0.5], true),
            entry("200g steamed broccoli", [70.0, 4.8, 14.0, 0.8], true),
            entry("100g spinach", [23.0, 2.9, 3.6, 0.4], true),
            entry("150g mixed salad", [30.0, 2.0, 5.0, 0.3], true),
            entry("30g almonds", [174.0, 6.4, 6.5, 15.0], true),
            entry("30g peanut butter", [188.0, 7.5, 6.0, 16.0], true),
            entry("1 tbsp olive oil", [119.0, 0.0, 0.0, 13.5], true),
            entry("half avocado", [160.0, 2.0, 8.5, 14.7], true),
            entry("250ml semi-skimmed milk", [122.0, 8.5, 12.0, 4.5], true),
            entry("30g cheddar cheese", [121.0, 7.5, 0.4, 10.0], true),
        ];
        Self::new(entries, seed)
    }

    /// Number of foods in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_rng(&self) -> StdRng {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        StdRng::seed_from_u64(self.seed.wrapping_add(call))
    }
}

#[async_trait]
impl CandidateGenerator for FoodCatalog {
    async fn generate(&self, request: &CandidateRequest) -> Result<Vec<String>, OracleError> {
        let terms = request.dislike_terms();
        let (recent, hard): (Vec<&String>, Vec<&String>) =
            terms.iter().partition(|t| self.index.contains_key(t.as_str()));

        let mut fresh = Vec::new();
        let mut used = Vec::new();
        for entry in &self.entries {
            if request.diet_type == DietType::Veg && !entry.vegetarian {
                continue;
            }
            let lower = entry.description.to_lowercase();
            if hard.iter().any(|t| lower.contains(t.as_str())) {
                continue;
            }
            if recent.iter().any(|t| **t == lower) {
                used.push(entry.description.clone());
            } else {
                fresh.push(entry.description.clone());
            }
        }

        let mut rng = self.next_rng();
        fresh.shuffle(&mut rng);
        if fresh.len() < MIN_FRESH_CANDIDATES {
            used.shuffle(&mut rng);
            fresh.extend(used);
        }
        fresh.truncate(self.max_candidates);
        Ok(fresh)
    }
}

#[async_trait]
impl MacroOracle for FoodCatalog {
    async fn lookup(&self, description: &str) -> Result<Option<MacroProfile>, OracleError> {
        Ok(self
            .index
            .get(&description.trim().to_lowercase())
            .and_then(|i| self.entries.get(*i))
            .map(CatalogEntry::macros))
    }
}

// ABOUTME: USDA FoodData Central macro oracle resolving quantity-prefixed food descriptions
// ABOUTME: Implements search-based macro lookup with TTL caching and per-minute rate limiting
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! USDA `FoodData` Central Macro Oracle
//!
//! Resolves descriptions such as `"150g grilled chicken breast"` by searching
//! `FoodData` Central for the food name, reading the per-100g energy and macro
//! nutrients of the best match, and scaling them by the quantity.
//!
//! # Features
//! - Quantity parsing (`g` or `ml`, default 100g)
//! - 24-hour caching keyed by normalized description
//! - Rate limiting (30 requests per minute by default)
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use super::MacroOracle;
use crate::logging::PlannerLogger;
use async_trait::async_trait;
use pierre_core::errors::OracleError;
use pierre_core::models::MacroProfile;
use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const SERVICE: &str = "usda-fdc";

/// Default portion when a description carries no quantity
const DEFAULT_PORTION_GRAMS: f64 = 100.0;

const NUTRIENT_ENERGY_KCAL: u32 = 1008;
const NUTRIENT_PROTEIN: u32 = 1003;
const NUTRIENT_FAT: u32 = 1004;
const NUTRIENT_CARB: u32 = 1005;

static QUANTITY_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:g|gram|grams|ml)\b\s*(?:of\s+)?(.+?)\s*$").ok()
});

/// USDA oracle configuration
#[derive(Debug, Clone)]
pub struct UsdaOracleConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Cache TTL in seconds (default: 86400 = 24 hours)
    pub cache_ttl_secs: u64,
    /// Rate limit per minute (default: 30)
    pub rate_limit_per_minute: u32,
}

impl Default for UsdaOracleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.nal.usda.gov/fdc/v1".to_owned(),
            cache_ttl_secs: 86400,
            rate_limit_per_minute: 30,
        }
    }
}

/// Split `"150g chicken breast"` into `(150.0, "chicken breast")`
#[must_use]
pub fn parse_portion(description: &str) -> (f64, String) {
    QUANTITY_PATTERN
        .as_ref()
        .and_then(|re| re.captures(description))
        .and_then(|caps| {
            let grams = caps.get(1)?.as_str().parse::<f64>().ok()?;
            let name = caps.get(2)?.as_str().to_owned();
            Some((grams, name))
        })
        .unwrap_or_else(|| (DEFAULT_PORTION_GRAMS, description.trim().to_owned()))
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
struct SearchFood {
    #[serde(rename = "foodNutrients", default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
struct SearchNutrient {
    #[serde(rename = "nutrientId")]
    nutrient_id: u32,
    #[serde(default)]
    value: Option<f64>,
}

impl SearchFood {
    fn nutrient(&self, id: u32) -> Option<f64> {
        self.food_nutrients
            .iter()
            .find(|n| n.nutrient_id == id)
            .and_then(|n| n.value)
    }

    /// Macros per 100g, or `None` when energy is absent
    fn per_100g(&self) -> Option<MacroProfile> {
        Some(MacroProfile::new(
            self.nutrient(NUTRIENT_ENERGY_KCAL)?,
            self.nutrient(NUTRIENT_PROTEIN).unwrap_or(0.0),
            self.nutrient(NUTRIENT_CARB).unwrap_or(0.0),
            self.nutrient(NUTRIENT_FAT).unwrap_or(0.0),
        ))
    }
}

/// Scale per-100g macros to a portion
#[must_use]
pub fn scale_macros(per_100g: MacroProfile, grams: f64) -> MacroProfile {
    let factor = grams / DEFAULT_PORTION_GRAMS;
    MacroProfile::new(
        per_100g.calories * factor,
        per_100g.protein_g * factor,
        per_100g.carb_g * factor,
        per_100g.fat_g * factor,
    )
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Sliding-window rate limiter for API requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    fn can_request(&mut self) -> bool {
        let now = Instant::now();
        self.requests
            .retain(|&t| now.duration_since(t) < self.window);
        self.requests.len() < self.limit as usize
    }

    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }

    async fn wait_if_needed(&mut self) {
        while !self.can_request() {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

/// Macro oracle backed by USDA `FoodData` Central search
pub struct UsdaMacroOracle {
    config: UsdaOracleConfig,
    http_client: reqwest::Client,
    cache: Arc<RwLock<HashMap<String, CacheEntry<Option<MacroProfile>>>>>,
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl UsdaMacroOracle {
    /// Create a new USDA oracle
    #[must_use]
    pub fn new(config: UsdaOracleConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, Duration::from_secs(60));

        Self {
            config,
            http_client: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(HashMap::new())),
            rate_limiter: Arc::new(RwLock::new(rate_limiter)),
        }
    }

    async fn cached(&self, key: &str) -> Option<Option<MacroProfile>> {
        let cache = self.cache.read().await;
        cache
            .get(key)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.data)
    }

    async fn store(&self, key: String, data: Option<MacroProfile>) {
        let mut cache = self.cache.write().await;
        cache.insert(
            key,
            CacheEntry {
                data,
                expires_at: Instant::now() + Duration::from_secs(self.config.cache_ttl_secs),
            },
        );
    }

    async fn search_per_100g(&self, food_name: &str) -> Result<Option<MacroProfile>, OracleError> {
        {
            let mut limiter = self.rate_limiter.write().await;
            limiter.wait_if_needed().await;
            limiter.record_request();
        }

        let url = format!("{}/foods/search", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("query", food_name),
                ("pageSize", "1"),
                ("dataType", "Foundation,SR Legacy"),
                ("api_key", &self.config.api_key),
            ])
            .send()
            .await
            .map_err(|e| OracleError::unavailable(SERVICE, e.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(OracleError::rate_limited(SERVICE)),
            status if !status.is_success() => {
                return Err(OracleError::unavailable(SERVICE, format!("HTTP {status}")));
            }
            _ => {}
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| OracleError::malformed(SERVICE, format!("JSON parse error: {e}")))?;

        Ok(search.foods.first().and_then(SearchFood::per_100g))
    }

    /// Number of cached descriptions
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl MacroOracle for UsdaMacroOracle {
    async fn lookup(&self, description: &str) -> Result<Option<MacroProfile>, OracleError> {
        let (grams, food_name) = parse_portion(description);
        if food_name.is_empty() {
            return Ok(None);
        }
        let key = food_name.to_lowercase();

        let per_100g = if let Some(hit) = self.cached(&key).await {
            hit
        } else {
            let fetched = self.search_per_100g(&food_name).await;
            PlannerLogger::log_oracle_call(SERVICE, "search", fetched.is_ok(), &food_name);
            let fetched = fetched?;
            self.store(key, fetched).await;
            fetched
        };

        Ok(per_100g.map(|macros| scale_macros(macros, grams)))
    }
}

// ABOUTME: Deterministic candidate generator and macro oracle doubles for pipeline tests
// ABOUTME: Scripted responses, recorded requests, lookup counters and always-failing oracles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use pierre_core::errors::OracleError;
use pierre_core::models::MacroProfile;
use pierre_nutrition_planner::external::{CandidateGenerator, CandidateRequest, MacroOracle};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Candidate generator that plays back scripted answers, then repeats a fallback list
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<Vec<String>, OracleError>>>,
    fallback: Vec<String>,
    requests: Mutex<Vec<CandidateRequest>>,
}

impl ScriptedGenerator {
    /// Always answer with the same candidates
    pub fn repeating(candidates: Vec<String>) -> Self {
        Self::scripted(Vec::new(), candidates)
    }

    /// Answer from `responses` in order, then with `fallback` forever
    pub fn scripted(responses: Vec<Result<Vec<String>, OracleError>>, fallback: Vec<String>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<CandidateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of generate calls
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CandidateGenerator for ScriptedGenerator {
    async fn generate(&self, request: &CandidateRequest) -> Result<Vec<String>, OracleError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Macro oracle answering from a fixed table; unknown foods are `None`
#[derive(Default)]
pub struct TableOracle {
    table: HashMap<String, MacroProfile>,
    lookups: AtomicUsize,
}

impl TableOracle {
    pub fn new(entries: &[(&str, MacroProfile)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(name, macros)| (name.to_lowercase(), *macros))
                .collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of lookups served
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MacroOracle for TableOracle {
    async fn lookup(&self, description: &str) -> Result<Option<MacroProfile>, OracleError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.table.get(&description.to_lowercase()).copied())
    }
}

/// Macro oracle that is always down
pub struct UnavailableOracle;

#[async_trait]
impl MacroOracle for UnavailableOracle {
    async fn lookup(&self, _description: &str) -> Result<Option<MacroProfile>, OracleError> {
        Err(OracleError::unavailable("test-oracle", "connection refused"))
    }
}

/// `count` distinct foods of `kcal` each, plus an oracle that knows them
///
/// With 100 kcal foods the greedy composer always lands within a 50 kcal
/// margin of any target it can reach.
pub fn uniform_foods(count: usize, kcal: f64) -> (Vec<String>, TableOracle) {
    let names: Vec<String> = (1..=count).map(|i| format!("portion {i} of test food")).collect();
    let macros = MacroProfile::new(kcal, kcal * 0.075, kcal * 0.1, kcal * 0.033);
    let entries: Vec<(&str, MacroProfile)> = names.iter().map(|n| (n.as_str(), macros)).collect();
    let oracle = TableOracle::new(&entries);
    (names, oracle)
}

/// Owned candidate list from string literals
pub fn candidates(foods: &[&str]) -> Vec<String> {
    foods.iter().map(|f| (*f).to_owned()).collect()
}

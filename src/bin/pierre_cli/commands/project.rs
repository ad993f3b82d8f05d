// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Projection command for the planner CLI
// ABOUTME: Seeds in-memory stores, picks the oracles and runs the multi-week simulator

use crate::helpers::display::{display_projection, print_json};
use crate::Result;
use pierre_core::errors::AppError;
use pierre_core::models::UserMetrics;
use pierre_nutrition_planner::config::PlannerConfig;
use pierre_nutrition_planner::external::{
    FoodCatalog, MacroOracle, UsdaMacroOracle, UsdaOracleConfig,
};
use pierre_nutrition_planner::planning::{
    PlanningServices, ProjectionRequest, ProjectionSchedule, ProjectionSimulator, ProjectionState,
};
use pierre_nutrition_planner::storage::{MemoryStorage, UserStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Projection inputs accepted on the command line
pub struct ProjectArgs {
    pub profile: PathBuf,
    pub user_id: String,
    pub catalog: Option<PathBuf>,
    pub seed: u64,
    pub usda_api_key: Option<String>,
    pub weeks: Option<u32>,
    pub until_target: bool,
    pub resume_weight: Option<f64>,
    pub resume_week: Option<u32>,
}

impl ProjectArgs {
    fn schedule(&self) -> ProjectionSchedule {
        match (self.weeks, self.until_target) {
            (Some(weeks), _) => ProjectionSchedule::Weeks(weeks),
            (None, true) => ProjectionSchedule::UntilTarget,
            (None, false) => ProjectionSchedule::Tenure,
        }
    }

    fn resume_from(&self) -> Option<ProjectionState> {
        Some(ProjectionState {
            current_weight: self.resume_weight?,
            week_offset: self.resume_week?,
        })
    }
}

fn load_profile(path: &Path) -> Result<UserMetrics> {
    let json = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Cannot read profile {}: {e}", path.display()))
    })?;
    UserMetrics::from_value(serde_json::from_str(&json)?)
}

fn load_catalog(args: &ProjectArgs) -> Result<FoodCatalog> {
    match &args.catalog {
        Some(path) => FoodCatalog::from_path(path, args.seed),
        None => Ok(FoodCatalog::builtin(args.seed)),
    }
}

/// Run a projection and print it
pub async fn run(args: &ProjectArgs, json: bool) -> Result<()> {
    let metrics = load_profile(&args.profile)?;
    let catalog = load_catalog(args)?;
    info!(foods = catalog.len(), "Food catalog loaded");

    let usda = args.usda_api_key.as_ref().map(|api_key| {
        UsdaMacroOracle::new(UsdaOracleConfig {
            api_key: api_key.clone(),
            ..UsdaOracleConfig::default()
        })
    });
    let oracle: &dyn MacroOracle = match &usda {
        Some(usda) => usda,
        None => &catalog,
    };

    let storage = MemoryStorage::new();
    storage.put(&args.user_id, &metrics).await?;

    let services = PlanningServices {
        generator: &catalog,
        oracle,
        users: &storage,
        variety: &storage,
        archive: &storage,
    };
    let request = ProjectionRequest {
        user_id: args.user_id.clone(),
        schedule: args.schedule(),
        resume_from: args.resume_from(),
    };
    let config = PlannerConfig::global();
    let projection = ProjectionSimulator::new(services, config).run(&request).await?;

    if json {
        print_json(&projection)
    } else {
        display_projection(&projection);
        Ok(())
    }
}

// ABOUTME: Pierre nutrition planner CLI - targets and multi-week projections from the terminal
// ABOUTME: Loads a profile and food catalog, wires in-memory stores, prints reports or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Daily targets for a 70kg cut to 65kg over 10 weeks
//! pierre-nutrition-planner targets --weight 70 --height 175 --age 30 --gender male \
//!     --activity moderate --goal cut --target-weight 65 --weeks 10
//!
//! # Project the profile's tenure with the built-in catalog
//! pierre-nutrition-planner project --profile profile.json
//!
//! # Continue a projection from week 12 at 74.2kg, as JSON
//! pierre-nutrition-planner project --profile profile.json --resume-week 12 --resume-weight 74.2 --json
//!
//! # Resolve macros through USDA FoodData Central instead of the catalog
//! USDA_API_KEY=... pierre-nutrition-planner project --profile profile.json --catalog foods.json
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use pierre_core::errors::AppResult;
use pierre_nutrition_planner::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::info;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "pierre-nutrition-planner",
    about = "Pierre Nutrition Planner CLI",
    long_about = "Derive calorie and macro targets and project a weight trajectory from weekly meal plans."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print daily targets and the plan analysis
    Targets {
        /// Body weight (kg)
        #[arg(long)]
        weight: f64,

        /// Height (cm)
        #[arg(long)]
        height: f64,

        /// Age (years)
        #[arg(long)]
        age: u32,

        /// male or female
        #[arg(long)]
        gender: String,

        /// sedentary, light, moderate, active or very_active
        #[arg(long, default_value = "moderate")]
        activity: String,

        /// cut, bulk or maintain
        #[arg(long)]
        goal: String,

        /// gentle, balanced or aggressive
        #[arg(long, default_value = "balanced")]
        intensity: String,

        /// Target weight (kg)
        #[arg(long)]
        target_weight: Option<f64>,

        /// Weeks available to reach the target
        #[arg(long)]
        weeks: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run a multi-week projection for a profile
    Project {
        /// Profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// User id for variety and archive state
        #[arg(long, default_value = "cli-user")]
        user_id: String,

        /// Food catalog JSON file (built-in catalog if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Seed for the catalog's candidate shuffles
        #[arg(long, default_value = "42")]
        seed: u64,

        /// USDA `FoodData` Central API key; macros come from USDA when set
        #[arg(long, env = "USDA_API_KEY", hide_env_values = true)]
        usda_api_key: Option<String>,

        /// Simulate this many weeks instead of the profile's tenure
        #[arg(long, conflicts_with = "until_target")]
        weeks: Option<u32>,

        /// Simulate until the target weight is reached at the applied rate
        #[arg(long)]
        until_target: bool,

        /// Weight to resume from (kg)
        #[arg(long, requires = "resume_week")]
        resume_weight: Option<f64>,

        /// Last completed week number of an earlier projection
        #[arg(long, requires = "resume_weight")]
        resume_week: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    // A subscriber may already be installed when embedded; planning does not depend on it
    let _ = logging.init();

    info!("Pierre Nutrition Planner CLI");

    match cli.command {
        Command::Targets {
            weight,
            height,
            age,
            gender,
            activity,
            goal,
            intensity,
            target_weight,
            weeks,
            json,
        } => {
            let args = commands::targets::TargetsArgs {
                weight,
                height,
                age,
                gender,
                activity,
                goal,
                intensity,
                target_weight,
                weeks,
            };
            commands::targets::run(&args, json)?;
        }
        Command::Project {
            profile,
            user_id,
            catalog,
            seed,
            usda_api_key,
            weeks,
            until_target,
            resume_weight,
            resume_week,
            json,
        } => {
            let args = commands::project::ProjectArgs {
                profile,
                user_id,
                catalog,
                seed,
                usda_api_key,
                weeks,
                until_target,
                resume_weight,
                resume_week,
            };
            commands::project::run(&args, json).await?;
        }
    }

    Ok(())
}

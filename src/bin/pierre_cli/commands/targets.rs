// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Target planning command for the planner CLI
// ABOUTME: Builds a profile from flags and prints the target planner's analysis

use crate::helpers::display::{display_target_plan, print_json};
use crate::Result;
use pierre_core::models::{DietType, UserMetrics};
use pierre_intelligence::TargetPlanner;
use pierre_nutrition_planner::config::PlannerConfig;

/// Profile fields accepted on the command line
pub struct TargetsArgs {
    pub weight: f64,
    pub height: f64,
    pub age: u32,
    pub gender: String,
    pub activity: String,
    pub goal: String,
    pub intensity: String,
    pub target_weight: Option<f64>,
    pub weeks: Option<u32>,
}

impl TargetsArgs {
    fn to_metrics(&self) -> Result<UserMetrics> {
        let metrics = UserMetrics {
            weight_kg: self.weight,
            height_cm: self.height,
            age: self.age,
            gender: self.gender.parse()?,
            activity_level: self.activity.parse()?,
            goal: self.goal.parse()?,
            goal_intensity: self.intensity.parse()?,
            diet_type: DietType::default(),
            dislikes: String::new(),
            target_weight: self.target_weight,
            tenure_months: 1,
        };
        metrics.validate()?;
        Ok(metrics)
    }
}

/// Print targets for the given profile
pub fn run(args: &TargetsArgs, json: bool) -> Result<()> {
    let metrics = args.to_metrics()?;
    let config = PlannerConfig::global();
    let plan = TargetPlanner::new(&config.nutrition).plan(&metrics, args.weeks)?;

    if json {
        print_json(&plan)
    } else {
        display_target_plan(&plan);
        Ok(())
    }
}

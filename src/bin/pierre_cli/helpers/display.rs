// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for the planner CLI
// ABOUTME: Prints target analyses, week reports and projection summaries to stdout

use crate::Result;
use pierre_intelligence::TargetPlan;
use pierre_nutrition_planner::planning::Projection;
use serde::Serialize;

/// Pretty-print any serializable result as JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display the target planner's analysis
pub fn display_target_plan(plan: &TargetPlan) {
    println!("{}", plan.analysis);
    println!("{}", "=".repeat(60));
    println!("Rate: {:+.2} kg/week", plan.weekly_rate);
    println!("Rationale: {}", plan.rationale);
    if plan.timeline_adjusted {
        println!("Timeline adjusted: yes");
    }
}

/// Display every week report followed by the cumulative summary
pub fn display_projection(projection: &Projection) {
    for week in &projection.weeks {
        println!("{}", "=".repeat(60));
        println!("{}", week.plan_text);
        println!(
            "\nWeight: {:.1}kg → {:.1}kg",
            week.start_weight, week.end_weight
        );
    }

    let summary = &projection.summary;
    println!("{}", "=".repeat(60));
    println!("{}", summary.analysis);
    if !summary.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &summary.warnings {
            println!("• {warning}");
        }
    }
    println!(
        "\nResume with: --resume-week {} --resume-weight {:.2}",
        projection.end_state.week_offset, projection.end_state.current_weight
    );
}

// ABOUTME: Text rendering of day and week plans and parsing of their Total contract line
// ABOUTME: Downstream aggregation reads archived blocks through parse_totals and summarize_blocks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Plan Reports
//!
//! Internally the pipeline passes typed [`DayPlan`] and [`WeekPlan`] values.
//! Text exists only at the edge: the rendered blocks below are what users see
//! and what gets archived. The `Total:` line is a stable contract:
//!
//! ```text
//! Total: <kcal> kcal, <g>g protein, <g>g carbs, <g>g fat
//! ```

use super::meal_composer::DayPlan;
use super::week_aggregator::WeekPlan;
use pierre_core::errors::PlanningError;
use pierre_core::models::{FoodItem, MacroTotals};
use regex::{Captures, Regex};
use std::fmt::Write;
use std::sync::LazyLock;

const TOTAL_MARKER: &str = "Total:";

static TOTAL_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*Total:\s*(\d+(?:\.\d+)?)\s*kcal,\s*(\d+(?:\.\d+)?)g protein,\s*(\d+(?:\.\d+)?)g carbs,\s*(\d+(?:\.\d+)?)g fat",
    )
    .ok()
});

static LEGACY_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?m)Calories:\s*(\d+(?:\.\d+)?).*?Protein:\s*(\d+(?:\.\d+)?).*?Carbs:\s*(\d+(?:\.\d+)?).*?Fat:\s*(\d+(?:\.\d+)?)",
    )
    .ok()
});

/// `- <description> → <kcal> kcal | <g>g protein | <g>g carbs | <g>g fat`
#[must_use]
pub fn item_line(item: &FoodItem) -> String {
    format!(
        "- {} → {:.0} kcal | {:.1}g protein | {:.1}g carbs | {:.1}g fat",
        item.description, item.calories, item.protein_g, item.carb_g, item.fat_g
    )
}

/// The `Total:` contract line
#[must_use]
pub fn total_line(totals: &MacroTotals) -> String {
    format!(
        "{TOTAL_MARKER} {:.1} kcal, {:.1}g protein, {:.1}g carbs, {:.1}g fat",
        totals.calories, totals.protein_g, totals.carb_g, totals.fat_g
    )
}

/// Render one day: item lines followed by the total line
#[must_use]
pub fn render_day(plan: &DayPlan) -> String {
    let mut out = String::new();
    for item in plan.items() {
        let _ = writeln!(out, "{}", item_line(item));
    }
    if plan.is_empty() {
        out.push_str("- no foods could be planned\n");
    }
    let _ = write!(out, "\n{}", total_line(&plan.totals()));
    out
}

/// Render a week: each day, collected warnings, then the weekly summary block
#[must_use]
pub fn render_week(week: &WeekPlan) -> String {
    let mut out = format!(
        "Week {} (target {:.0} kcal/day, {:.0}g protein)\n",
        week.week_number, week.target.calorie_target, week.target.protein_target
    );
    for (index, day) in week.days.iter().enumerate() {
        let _ = writeln!(out, "\nDay {}:\n{}", index + 1, render_day(day));
    }
    for warning in &week.warnings {
        let _ = writeln!(out, "\nWarning: {warning}");
    }
    let average = week.daily_average();
    let _ = write!(
        out,
        "\nWeekly Summary:\n{}\nDaily Average: {:.1} kcal, {:.1}g protein, {:.1}g carbs, {:.1}g fat",
        total_line(&week.totals),
        average.calories,
        average.protein_g,
        average.carb_g,
        average.fat_g
    );
    out
}

fn capture_totals(caps: &Captures<'_>) -> Option<MacroTotals> {
    let value = |i: usize| caps.get(i)?.as_str().parse::<f64>().ok();
    Some(MacroTotals {
        calories: value(1)?,
        protein_g: value(2)?,
        carb_g: value(3)?,
        fat_g: value(4)?,
    })
}

/// Read the macros a rendered block reports
///
/// The last `Total:` line wins, so a week block yields its weekly summary
/// rather than the sum of day and week lines. Blocks without a `Total:` line
/// fall back to summing legacy `Calories: … Protein: … Carbs: … Fat: …` lines.
///
/// # Errors
///
/// Returns `PlanningError::Parse` when neither marker is present
pub fn parse_totals(block: &str) -> Result<MacroTotals, PlanningError> {
    let parse_error = PlanningError::Parse {
        marker: TOTAL_MARKER,
    };

    if let Some(total) = TOTAL_LINE
        .as_ref()
        .and_then(|re| re.captures_iter(block).filter_map(|c| capture_totals(&c)).last())
    {
        return Ok(total);
    }

    let legacy: Vec<MacroTotals> = LEGACY_LINE
        .as_ref()
        .map(|re| re.captures_iter(block).filter_map(|c| capture_totals(&c)).collect())
        .unwrap_or_default();
    if legacy.is_empty() {
        return Err(parse_error);
    }
    Ok(legacy.into_iter().sum())
}

/// Summed totals of many archived blocks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockSummary {
    /// Sum over every parsable block
    pub totals: MacroTotals,
    /// Blocks that parsed
    pub parsed: usize,
    /// One entry per unparsable block
    pub warnings: Vec<String>,
}

/// Sum the totals of many blocks; unparsable blocks count as zero with a warning
#[must_use]
pub fn summarize_blocks<S: AsRef<str>>(blocks: &[S]) -> BlockSummary {
    let mut summary = BlockSummary::default();
    for (index, block) in blocks.iter().enumerate() {
        match parse_totals(block.as_ref()) {
            Ok(totals) => {
                summary.totals += totals;
                summary.parsed += 1;
            }
            Err(e) => summary.warnings.push(format!("Block {}: {e}", index + 1)),
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::models::MacroProfile;

    #[test]
    fn test_item_line_format() {
        let item = FoodItem::new("100g white rice", MacroProfile::new(130.0, 2.7, 28.0, 0.3));
        assert_eq!(
            item_line(&item),
            "- 100g white rice → 130 kcal | 2.7g protein | 28.0g carbs | 0.3g fat"
        );
    }

    #[test]
    fn test_total_line_round_trips_through_parser() {
        let totals = MacroTotals {
            calories: 1834.5,
            protein_g: 142.0,
            carb_g: 180.3,
            fat_g: 55.9,
        };
        let parsed = parse_totals(&format!("Day 1:\n- x\n\n{}", total_line(&totals))).unwrap();
        assert_eq!(parsed, totals);
    }

    #[test]
    fn test_last_total_line_wins() {
        let block = "Total: 100.0 kcal, 1.0g protein, 1.0g carbs, 1.0g fat\n\
                     Weekly Summary:\n\
                     Total: 700.0 kcal, 7.0g protein, 7.0g carbs, 7.0g fat";
        let parsed = parse_totals(block).unwrap();
        assert!((parsed.calories - 700.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_legacy_lines_are_summed() {
        let block = "Calories: 155, Protein: 12.6, Carbs: 1.1, Fat: 10.6\n\
                     Calories: 105, Protein: 1.3, Carbs: 27, Fat: 0.4";
        let parsed = parse_totals(block).unwrap();
        assert!((parsed.calories - 260.0).abs() < 1e-9);
        assert!((parsed.carb_g - 28.1).abs() < 1e-9);
    }

    #[test]
    fn test_missing_marker_is_parse_error() {
        assert_eq!(
            parse_totals("the model wandered off"),
            Err(PlanningError::Parse { marker: "Total:" })
        );
    }

    #[test]
    fn test_summarize_blocks_counts_failures_as_zero() {
        let blocks = [
            "Total: 2000.0 kcal, 150.0g protein, 200.0g carbs, 60.0g fat",
            "garbled",
        ];
        let summary = summarize_blocks(&blocks);
        assert_eq!(summary.parsed, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert!((summary.totals.calories - 2000.0).abs() < f64::EPSILON);
    }
}

// ABOUTME: Nutrition models for composed meal plans
// ABOUTME: MacroProfile, FoodItem and summable MacroTotals definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Macro values for one food as reported by a macro oracle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProfile {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein_g: f64,
    /// Carbohydrates (grams)
    pub carb_g: f64,
    /// Fat (grams)
    pub fat_g: f64,
}

impl MacroProfile {
    /// Create a macro profile
    #[must_use]
    pub const fn new(calories: f64, protein_g: f64, carb_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carb_g,
            fat_g,
        }
    }

    /// Whether every value is finite and non-negative
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        [self.calories, self.protein_g, self.carb_g, self.fat_g]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Individual food item within a composed day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Free-text description including quantity (e.g. "100g tofu")
    pub description: String,
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein_g: f64,
    /// Carbohydrates (grams)
    pub carb_g: f64,
    /// Fat (grams)
    pub fat_g: f64,
}

impl FoodItem {
    /// Build a food item from a description and the oracle's macro answer
    #[must_use]
    pub fn new(description: impl Into<String>, macros: MacroProfile) -> Self {
        Self {
            description: description.into(),
            calories: macros.calories,
            protein_g: macros.protein_g,
            carb_g: macros.carb_g,
            fat_g: macros.fat_g,
        }
    }

    /// Macros of this item as totals
    #[must_use]
    pub const fn macros(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            protein_g: self.protein_g,
            carb_g: self.carb_g,
            fat_g: self.fat_g,
        }
    }
}

/// Summed calorie and macro totals for a day, week or run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein_g: f64,
    /// Carbohydrates (grams)
    pub carb_g: f64,
    /// Fat (grams)
    pub fat_g: f64,
}

impl MacroTotals {
    /// All-zero totals
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein_g: 0.0,
        carb_g: 0.0,
        fat_g: 0.0,
    };

    /// Sum the macros of a slice of items
    #[must_use]
    pub fn from_items(items: &[FoodItem]) -> Self {
        items.iter().map(FoodItem::macros).sum()
    }

    /// Divide every value by `divisor` (daily averages)
    #[must_use]
    pub fn divided_by(self, divisor: f64) -> Self {
        if divisor.abs() < f64::EPSILON {
            return Self::ZERO;
        }
        Self {
            calories: self.calories / divisor,
            protein_g: self.protein_g / divisor,
            carb_g: self.carb_g / divisor,
            fat_g: self.fat_g / divisor,
        }
    }

    /// Whether all values are zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for MacroTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carb_g: self.carb_g + rhs.carb_g,
            fat_g: self.fat_g + rhs.fat_g,
        }
    }
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for MacroTotals {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            calories: self.calories - rhs.calories,
            protein_g: self.protein_g - rhs.protein_g,
            carb_g: self.carb_g - rhs.carb_g,
            fat_g: self.fat_g - rhs.fat_g,
        }
    }
}

impl Sum for MacroTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Daily calorie and macro targets derived for one planning run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionTarget {
    /// Daily energy target (kcal)
    pub calorie_target: f64,
    /// Daily protein target (grams)
    pub protein_target: f64,
    /// Daily carbohydrate target (grams)
    pub carb_target: f64,
    /// Daily fat target (grams)
    pub fat_target: f64,
}

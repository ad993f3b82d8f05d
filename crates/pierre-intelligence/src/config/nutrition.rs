// ABOUTME: Metabolic and macro configuration for nutrition target calculation
// ABOUTME: Configures BMR coefficients, activity factors, protein factors, macro split, and energy bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Target Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology
//! - Protein: Phillips & Van Loon (2011) DOI: 10.1080/02640414.2011.619204

use super::error::ConfigError;
use pierre_core::constants::energy::{
    KCAL_PER_GRAM_CARB, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN, KCAL_PER_KG_BODY_MASS,
};
use pierre_core::models::{ActivityLevel, Gender, Goal};
use serde::{Deserialize, Serialize};

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

impl BmrConfig {
    /// Gender-specific constant
    #[must_use]
    pub const fn gender_constant(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.msj_male_constant,
            Gender::Female => self.msj_female_constant,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub light: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderate: f64,
    /// Active (6-7 days/week): 1.725
    pub active: f64,
    /// Very active (hard training or physical job): 1.9
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let factors = [
            self.sedentary,
            self.light,
            self.moderate,
            self.active,
            self.very_active,
        ];
        if factors.iter().any(|f| !(1.0..=2.5).contains(f)) {
            return Err(ConfigError::ValueOutOfRange(
                "activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::InvalidRange(
                "activity factors must not decrease with activity level",
            ));
        }
        Ok(())
    }
}

/// Protein intake per kilogram of body weight, per goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProteinConfig {
    /// Cutting (g/kg): 2.0, preserves lean mass in a deficit
    pub cut_g_per_kg: f64,
    /// Bulking (g/kg): 1.6
    pub bulk_g_per_kg: f64,
    /// Maintenance (g/kg): 1.2
    pub maintain_g_per_kg: f64,
}

impl Default for ProteinConfig {
    fn default() -> Self {
        Self {
            cut_g_per_kg: 2.0,
            bulk_g_per_kg: 1.6,
            maintain_g_per_kg: 1.2,
        }
    }
}

impl ProteinConfig {
    /// Protein factor for a goal
    #[must_use]
    pub const fn g_per_kg(&self, goal: Goal) -> f64 {
        match goal {
            Goal::Cut => self.cut_g_per_kg,
            Goal::Bulk => self.bulk_g_per_kg,
            Goal::Maintain => self.maintain_g_per_kg,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for factor in [self.cut_g_per_kg, self.bulk_g_per_kg, self.maintain_g_per_kg] {
            if !(0.5..=3.5).contains(&factor) {
                return Err(ConfigError::ValueOutOfRange(
                    "protein factors must be between 0.5 and 3.5 g/kg",
                ));
            }
        }
        Ok(())
    }
}

/// Fat and carbohydrate shares of the calorie target
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroShare {
    /// Fat share of calorie target (0.0-1.0)
    pub fat: f64,
    /// Carbohydrate share of calorie target (0.0-1.0)
    pub carb: f64,
}

/// Per-goal macro distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Cutting: 25% fat, 35% carbs
    pub cut: MacroShare,
    /// Bulking: 20% fat, 50% carbs
    pub bulk: MacroShare,
    /// Maintenance: 25% fat, 45% carbs
    pub maintain: MacroShare,
    /// Carbs never drop below this share when protein crowds the target: 20%
    pub carb_floor_share: f64,
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            cut: MacroShare {
                fat: 0.25,
                carb: 0.35,
            },
            bulk: MacroShare {
                fat: 0.20,
                carb: 0.50,
            },
            maintain: MacroShare {
                fat: 0.25,
                carb: 0.45,
            },
            carb_floor_share: 0.20,
        }
    }
}

impl MacroSplitConfig {
    /// Shares for a goal
    #[must_use]
    pub const fn share(&self, goal: Goal) -> MacroShare {
        match goal {
            Goal::Cut => self.cut,
            Goal::Bulk => self.bulk,
            Goal::Maintain => self.maintain,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for share in [self.cut, self.bulk, self.maintain] {
            if !(0.0..=1.0).contains(&share.fat) || !(0.0..=1.0).contains(&share.carb) {
                return Err(ConfigError::ValueOutOfRange(
                    "macro shares must be between 0.0 and 1.0",
                ));
            }
            if share.fat + share.carb > 1.0 {
                return Err(ConfigError::InvalidWeights(
                    "fat and carb shares must not exceed 100% of the calorie target",
                ));
            }
            if self.carb_floor_share > share.carb {
                return Err(ConfigError::InvalidWeights(
                    "carb floor share must not exceed any goal's carb share",
                ));
            }
        }
        Ok(())
    }
}

/// Energy conversion factors and calorie target bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Energy per kilogram of body mass change: 7700 kcal
    pub kcal_per_kg: f64,
    /// Absolute daily calorie floor: 1200 kcal
    pub calorie_floor: f64,
    /// Calorie target never drops below BMR times this: 1.1
    pub bmr_floor_multiplier: f64,
    /// Calorie target never exceeds TDEE plus this: 500 kcal
    pub surplus_ceiling_kcal: f64,
    /// Protein energy density: 4 kcal/g
    pub kcal_per_gram_protein: f64,
    /// Carbohydrate energy density: 4 kcal/g
    pub kcal_per_gram_carb: f64,
    /// Fat energy density: 9 kcal/g
    pub kcal_per_gram_fat: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            kcal_per_kg: KCAL_PER_KG_BODY_MASS,
            calorie_floor: 1200.0,
            bmr_floor_multiplier: 1.1,
            surplus_ceiling_kcal: 500.0,
            kcal_per_gram_protein: KCAL_PER_GRAM_PROTEIN,
            kcal_per_gram_carb: KCAL_PER_GRAM_CARB,
            kcal_per_gram_fat: KCAL_PER_GRAM_FAT,
        }
    }
}

impl EnergyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(3000.0..=10_000.0).contains(&self.kcal_per_kg) {
            return Err(ConfigError::ValueOutOfRange(
                "kcal_per_kg must be between 3000 and 10000",
            ));
        }
        if self.calorie_floor <= 0.0 || self.surplus_ceiling_kcal < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "calorie floor must be positive and surplus ceiling non-negative",
            ));
        }
        if self.bmr_floor_multiplier < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "bmr_floor_multiplier must not be negative",
            ));
        }
        if [
            self.kcal_per_gram_protein,
            self.kcal_per_gram_carb,
            self.kcal_per_gram_fat,
        ]
        .iter()
        .any(|d| *d <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "macro energy densities must be positive",
            ));
        }
        Ok(())
    }
}

/// Validate the metabolic and macro sections together
pub(super) fn validate_all(
    activity_factors: &ActivityFactorsConfig,
    protein: &ProteinConfig,
    macro_split: &MacroSplitConfig,
    energy: &EnergyConfig,
) -> Result<(), ConfigError> {
    activity_factors.validate()?;
    protein.validate()?;
    macro_split.validate()?;
    energy.validate()
}

use super::{ApplicationMethod, FertilizerType, Season};
use serde::{Deserialize, Serialize};

/// Per-hectare N, P₂O₅ and K₂O in kg/ha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientRates {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P2O5")]
    pub p2o5: f64,
    #[serde(rename = "K2O")]
    pub k2o: f64,
}

impl NutrientRates {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            n: self.n * factor,
            p2o5: self.p2o5 * factor,
            k2o: self.k2o * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhStatus {
    Acidic,
    Optimal,
    Alkaline,
}

impl PhStatus {
    pub const TARGET_MIN: f64 = 6.0;
    pub const TARGET_MAX: f64 = 7.5;

    /// Both bounds of the target range count as optimal.
    pub fn classify(ph: f64) -> Self {
        if ph < Self::TARGET_MIN {
            PhStatus::Acidic
        } else if ph > Self::TARGET_MAX {
            PhStatus::Alkaline
        } else {
            PhStatus::Optimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhStatus::Acidic => "Acidic",
            PhStatus::Optimal => "Optimal",
            PhStatus::Alkaline => "Alkaline",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PhStatus::Acidic => "Soil is acidic. Consider adding lime to raise pH to 6.0-7.5.",
            PhStatus::Alkaline => {
                "Soil is alkaline. Consider adding sulfur or organic matter to lower pH to 6.0-7.5."
            }
            PhStatus::Optimal => "Soil pH is optimal for most crops (6.0-7.5).",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            PhStatus::Acidic => Color::Yellow,
            PhStatus::Optimal => Color::Green,
            PhStatus::Alkaline => Color::LightBlue,
        }
    }
}

impl std::fmt::Display for PhStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fertilizer plan for one field. Rebuilt from scratch on every input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub crop: String,
    /// Hectares
    pub area: f64,
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P2O5")]
    pub p2o5: f64,
    #[serde(rename = "K2O")]
    pub k2o: f64,
    #[serde(rename = "N_total")]
    pub n_total: f64,
    #[serde(rename = "P2O5_total")]
    pub p2o5_total: f64,
    #[serde(rename = "K2O_total")]
    pub k2o_total: f64,
    #[serde(rename = "phRecommendation")]
    pub ph_recommendation: String,
    #[serde(rename = "applicationMethod")]
    pub application_method: ApplicationMethod,
    #[serde(rename = "fertilizerType")]
    pub fertilizer_type: FertilizerType,
    pub season: Season,
}

impl RecommendationResult {
    pub fn rates(&self) -> NutrientRates {
        NutrientRates {
            n: self.n,
            p2o5: self.p2o5,
            k2o: self.k2o,
        }
    }

    pub fn totals(&self) -> NutrientRates {
        NutrientRates {
            n: self.n_total,
            p2o5: self.p2o5_total,
            k2o: self.k2o_total,
        }
    }
}

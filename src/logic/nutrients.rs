use crate::models::{find_crop, CropProfile, NutrientRates, SoilTest};

/// Baseline minus what the soil already holds, never below zero.
/// A missing reading leaves the baseline untouched.
pub fn adjust(baseline: f64, measured: Option<f64>) -> f64 {
    match measured {
        Some(existing) => (baseline - existing).max(0.0),
        None => baseline,
    }
}

pub fn adjust_profile(profile: &CropProfile, soil: &SoilTest) -> NutrientRates {
    NutrientRates {
        n: adjust(profile.n, soil.n),
        p2o5: adjust(profile.p2o5, soil.p),
        k2o: adjust(profile.k2o, soil.k),
    }
}

/// Adjusted per-hectare rates for a named crop, or `None` if the name is
/// not in the crop table.
pub fn adjust_nutrients(crop: &str, soil: &SoilTest) -> Option<NutrientRates> {
    find_crop(crop).map(|profile| adjust_profile(profile, soil))
}

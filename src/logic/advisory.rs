use crate::models::{FieldInputs, NutrientRates, PhStatus, RecommendationResult};

/// Amendment message for a soil pH; empty when no pH was measured.
pub fn ph_advisory(ph: Option<f64>) -> String {
    ph.map(|value| PhStatus::classify(value).message().to_string())
        .unwrap_or_default()
}

/// Build the full result record from a resolved area and adjusted rates.
pub fn assemble(
    crop: &str,
    area_ha: f64,
    rates: NutrientRates,
    inputs: &FieldInputs,
) -> RecommendationResult {
    let totals = rates.scaled(area_ha);

    RecommendationResult {
        crop: crop.to_string(),
        area: area_ha,
        n: rates.n,
        p2o5: rates.p2o5,
        k2o: rates.k2o,
        n_total: totals.n,
        p2o5_total: totals.p2o5,
        k2o_total: totals.k2o,
        ph_recommendation: ph_advisory(inputs.soil_test.ph),
        application_method: inputs.application_method,
        fertilizer_type: inputs.fertilizer_type,
        season: inputs.season,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationMethod, FertilizerType, Season, SoilTest};

    #[test]
    fn ph_advisory_branches() {
        assert!(ph_advisory(Some(5.2)).starts_with("Soil is acidic"));
        assert!(ph_advisory(Some(8.1)).starts_with("Soil is alkaline"));
        assert_eq!(
            ph_advisory(Some(6.5)),
            "Soil pH is optimal for most crops (6.0-7.5)."
        );
    }

    #[test]
    fn ph_advisory_inclusive_bounds() {
        assert_eq!(ph_advisory(Some(6.0)), PhStatus::Optimal.message());
        assert_eq!(ph_advisory(Some(7.5)), PhStatus::Optimal.message());
    }

    #[test]
    fn ph_advisory_absent_is_empty() {
        assert_eq!(ph_advisory(None), "");
    }

    #[test]
    fn assemble_carries_context_through() {
        let inputs = FieldInputs {
            soil_test: SoilTest {
                ph: Some(5.5),
                ..Default::default()
            },
            fertilizer_type: FertilizerType::Organic,
            application_method: ApplicationMethod::FoliarSpray,
            season: Season::Fall,
            ..Default::default()
        };
        let rates = NutrientRates {
            n: 100.0,
            p2o5: 50.0,
            k2o: 0.0,
        };

        let result = assemble("Rice", 1.5, rates, &inputs);
        assert_eq!(result.crop, "Rice");
        assert_eq!(result.area, 1.5);
        assert_eq!(result.n_total, 150.0);
        assert_eq!(result.p2o5_total, 75.0);
        assert_eq!(result.k2o_total, 0.0);
        assert_eq!(result.ph_recommendation, PhStatus::Acidic.message());
        assert_eq!(result.fertilizer_type, FertilizerType::Organic);
        assert_eq!(result.application_method, ApplicationMethod::FoliarSpray);
        assert_eq!(result.season, Season::Fall);
    }
}

use super::{advisory, area, nutrients};
use crate::models::{FieldInputs, RawFieldInputs, RecommendationResult};

/// Run the whole pipeline: area, then nutrient adjustment, then the
/// advisory record. `None` whenever there is no crop, the crop is unknown,
/// or the area is not a finite positive number.
pub fn compute(inputs: &FieldInputs) -> Option<RecommendationResult> {
    let crop = inputs.crop.as_deref()?;

    let area_ha = area::resolve_area(&inputs.geometry, inputs.area_override)?;
    if !area_ha.is_finite() || area_ha <= 0.0 {
        tracing::debug!(area_ha, "area not positive, no recommendation");
        return None;
    }

    let Some(rates) = nutrients::adjust_nutrients(crop, &inputs.soil_test) else {
        tracing::debug!(crop, "crop not in table, no recommendation");
        return None;
    };

    let result = advisory::assemble(crop, area_ha, rates, inputs);
    tracing::trace!(?result, "recommendation computed");
    Some(result)
}

/// Convenience for callers holding raw form text.
pub fn compute_raw(raw: &RawFieldInputs) -> Option<RecommendationResult> {
    compute(&raw.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ApplicationMethod, FertilizerType, FieldGeometry, FieldShape, PhStatus, Season, SoilTest,
    };
    use approx::assert_relative_eq;

    fn inputs_for(crop: &str, geometry: FieldGeometry) -> FieldInputs {
        FieldInputs {
            crop: Some(crop.to_string()),
            geometry,
            ..Default::default()
        }
    }

    #[test]
    fn potato_two_hectare_override() {
        let inputs = FieldInputs {
            crop: Some("Potato".into()),
            area_override: Some(2.0),
            ..Default::default()
        };

        let result = compute(&inputs).unwrap();
        assert_eq!(result.crop, "Potato");
        assert_eq!(result.area, 2.0);
        assert_eq!(result.n, 150.0);
        assert_eq!(result.p2o5, 100.0);
        assert_eq!(result.k2o, 150.0);
        assert_eq!(result.n_total, 300.0);
        assert_eq!(result.p2o5_total, 200.0);
        assert_eq!(result.k2o_total, 300.0);
        assert_eq!(result.ph_recommendation, "");
    }

    #[test]
    fn wheat_rectangle_with_soil_test() {
        let mut inputs = inputs_for("Wheat", FieldGeometry::rectangle(100.0, 50.0));
        inputs.soil_test = SoilTest {
            ph: Some(7.5),
            n: Some(150.0),
            p: Some(10.0),
            k: None,
        };

        let result = compute(&inputs).unwrap();
        assert_eq!(result.area, 0.5);
        assert_eq!(result.n, 0.0);
        assert_eq!(result.p2o5, 50.0);
        assert_eq!(result.k2o, 40.0);
        assert_eq!(result.n_total, 0.0);
        assert_eq!(result.p2o5_total, 25.0);
        assert_eq!(result.k2o_total, 20.0);
        assert_eq!(result.ph_recommendation, PhStatus::Optimal.message());
    }

    #[test]
    fn circle_and_triangle_totals() {
        let result = compute(&inputs_for("Rice", FieldGeometry::circle(100.0))).unwrap();
        assert_relative_eq!(
            result.n_total,
            100.0 * std::f64::consts::PI * 0.25,
            epsilon = 1e-9
        );

        let result = compute(&inputs_for("Canola", FieldGeometry::triangle(30.0, 40.0, 50.0)))
            .unwrap();
        assert_relative_eq!(result.area, 0.06, epsilon = 1e-12);
        assert_relative_eq!(result.n_total, 5.4, epsilon = 1e-9);
    }

    #[test]
    fn no_crop_is_none() {
        let inputs = FieldInputs {
            area_override: Some(2.0),
            ..Default::default()
        };
        assert!(compute(&inputs).is_none());
    }

    #[test]
    fn unknown_crop_is_none() {
        let mut inputs = inputs_for("Tomato", FieldGeometry::default());
        inputs.area_override = Some(1.0);
        assert!(compute(&inputs).is_none());
    }

    #[test]
    fn incomplete_or_zero_area_is_none() {
        assert!(compute(&inputs_for("Maize", FieldGeometry::default())).is_none());
        assert!(compute(&inputs_for("Maize", FieldGeometry::rectangle(0.0, 10.0))).is_none());
        assert!(compute(&inputs_for("Maize", FieldGeometry::rectangle(-5.0, 10.0))).is_none());
        assert!(compute(&inputs_for("Maize", FieldGeometry::triangle(1.0, 2.0, 3.0))).is_none());
        assert!(compute(&inputs_for("Maize", FieldGeometry::triangle(1.0, 2.0, 9.0))).is_none());
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut inputs = inputs_for("Sugarcane", FieldGeometry::triangle(120.0, 90.0, 150.0));
        inputs.soil_test.ph = Some(5.0);
        inputs.fertilizer_type = FertilizerType::Custom;
        inputs.application_method = ApplicationMethod::DripIrrigation;
        inputs.season = Season::Summer;

        let first = compute(&inputs);
        let second = compute(&inputs);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn raw_form_round_through_boundary() {
        let raw = RawFieldInputs {
            crop: "Potato".into(),
            shape: FieldShape::Rectangle,
            length: "abc".into(),
            width: "50".into(),
            area: "2".into(),
            ..Default::default()
        };
        let result = compute_raw(&raw).unwrap();
        assert_eq!(result.n_total, 300.0);

        let raw = RawFieldInputs {
            crop: "Potato".into(),
            length: "abc".into(),
            width: "50".into(),
            ..Default::default()
        };
        assert!(compute_raw(&raw).is_none());
    }

    #[test]
    fn serialized_record_uses_wire_keys() {
        let inputs = FieldInputs {
            crop: Some("Potato".into()),
            area_override: Some(2.0),
            ..Default::default()
        };
        let json = serde_json::to_value(compute(&inputs).unwrap()).unwrap();
        assert_eq!(json["N"], 150.0);
        assert_eq!(json["P2O5_total"], 200.0);
        assert_eq!(json["phRecommendation"], "");
        assert_eq!(json["applicationMethod"], "Broadcast Spreading");
        assert_eq!(json["fertilizerType"], "synthetic");
        assert_eq!(json["season"], "Spring");
    }
}

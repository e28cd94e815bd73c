use super::{ApplicationMethod, FertilizerType, FieldGeometry, FieldShape, Season};
use serde::{Deserialize, Serialize};

/// Measured soil values. Absent values mean "assume none present".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilTest {
    pub ph: Option<f64>,
    /// kg/ha
    pub n: Option<f64>,
    /// kg/ha
    pub p: Option<f64>,
    /// kg/ha
    pub k: Option<f64>,
}

impl SoilTest {
    pub fn is_empty(&self) -> bool {
        self.ph.is_none() && self.n.is_none() && self.p.is_none() && self.k.is_none()
    }
}

/// Validated calculator input. Everything numeric is either a finite
/// number or absent; no raw text reaches the computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldInputs {
    pub crop: Option<String>,
    pub geometry: FieldGeometry,
    /// Hectares. Wins over geometry when positive.
    pub area_override: Option<f64>,
    pub soil_test: SoilTest,
    pub fertilizer_type: FertilizerType,
    pub application_method: ApplicationMethod,
    pub season: Season,
}

/// Form values exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFieldInputs {
    pub crop: String,
    pub shape: FieldShape,
    pub length: String,
    pub width: String,
    pub diameter: String,
    pub side_a: String,
    pub side_b: String,
    pub side_c: String,
    pub area: String,
    pub ph: String,
    pub soil_n: String,
    pub soil_p: String,
    pub soil_k: String,
    pub fertilizer_type: FertilizerType,
    pub application_method: ApplicationMethod,
    pub season: Season,
}

/// Parse a typed number. Blank, unparseable and non-finite text are all
/// treated as "not entered".
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_soil_nutrient(label: &str, raw: &str) -> Option<f64> {
    let value = parse_measurement(raw)?;
    if value < 0.0 {
        tracing::debug!(label, value, "ignoring negative soil nutrient reading");
        return None;
    }
    Some(value)
}

fn parse_ph(raw: &str) -> Option<f64> {
    let value = parse_measurement(raw)?;
    if !(0.0..=14.0).contains(&value) {
        tracing::debug!(value, "ignoring pH outside 0-14");
        return None;
    }
    Some(value)
}

impl RawFieldInputs {
    pub fn normalize(&self) -> FieldInputs {
        let geometry = match self.shape {
            FieldShape::Rectangle => FieldGeometry::Rectangle {
                length: parse_measurement(&self.length),
                width: parse_measurement(&self.width),
            },
            FieldShape::Circle => FieldGeometry::Circle {
                diameter: parse_measurement(&self.diameter),
            },
            FieldShape::Triangle => FieldGeometry::Triangle {
                side_a: parse_measurement(&self.side_a),
                side_b: parse_measurement(&self.side_b),
                side_c: parse_measurement(&self.side_c),
            },
        };

        let crop = Some(self.crop.clone()).filter(|c| !c.trim().is_empty());

        FieldInputs {
            crop,
            geometry,
            area_override: parse_measurement(&self.area),
            soil_test: SoilTest {
                ph: parse_ph(&self.ph),
                n: parse_soil_nutrient("N", &self.soil_n),
                p: parse_soil_nutrient("P", &self.soil_p),
                k: parse_soil_nutrient("K", &self.soil_k),
            },
            fertilizer_type: self.fertilizer_type,
            application_method: self.application_method,
            season: self.season,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_measurement_accepts_numbers() {
        assert_eq!(parse_measurement("100"), Some(100.0));
        assert_eq!(parse_measurement(" 2.5 "), Some(2.5));
        assert_eq!(parse_measurement("0"), Some(0.0));
        assert_eq!(parse_measurement("-3"), Some(-3.0));
        assert_eq!(parse_measurement("1e2"), Some(100.0));
    }

    #[test]
    fn parse_measurement_rejects_non_numbers() {
        assert_eq!(parse_measurement(""), None);
        assert_eq!(parse_measurement("   "), None);
        assert_eq!(parse_measurement("abc"), None);
        assert_eq!(parse_measurement("12m"), None);
        assert_eq!(parse_measurement("NaN"), None);
        assert_eq!(parse_measurement("inf"), None);
    }

    #[test]
    fn zero_is_distinct_from_blank() {
        let raw = RawFieldInputs {
            length: "0".into(),
            ..Default::default()
        };
        let inputs = raw.normalize();
        assert_eq!(
            inputs.geometry,
            FieldGeometry::Rectangle {
                length: Some(0.0),
                width: None
            }
        );
    }

    #[test]
    fn normalize_uses_only_active_shape_fields() {
        let raw = RawFieldInputs {
            shape: FieldShape::Circle,
            length: "100".into(),
            width: "50".into(),
            diameter: "80".into(),
            ..Default::default()
        };
        assert_eq!(raw.normalize().geometry, FieldGeometry::circle(80.0));
    }

    #[test]
    fn normalize_blank_crop_is_absent() {
        let raw = RawFieldInputs::default();
        assert_eq!(raw.normalize().crop, None);

        let raw = RawFieldInputs {
            crop: "Maize".into(),
            ..Default::default()
        };
        assert_eq!(raw.normalize().crop.as_deref(), Some("Maize"));
    }

    #[test]
    fn normalize_soil_test_bounds() {
        let raw = RawFieldInputs {
            ph: "15".into(),
            soil_n: "-10".into(),
            soil_p: "20".into(),
            soil_k: "".into(),
            ..Default::default()
        };
        let soil = raw.normalize().soil_test;
        assert_eq!(soil.ph, None);
        assert_eq!(soil.n, None);
        assert_eq!(soil.p, Some(20.0));
        assert_eq!(soil.k, None);

        let raw = RawFieldInputs {
            ph: "0".into(),
            ..Default::default()
        };
        assert_eq!(raw.normalize().soil_test.ph, Some(0.0));
    }

    #[test]
    fn soil_test_is_empty() {
        assert!(SoilTest::default().is_empty());
        let soil = SoilTest {
            k: Some(0.0),
            ..Default::default()
        };
        assert!(!soil.is_empty());
    }
}

use crate::models::FieldGeometry;
use std::f64::consts::PI;

pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

pub fn square_meters_to_hectares(area_m2: f64) -> f64 {
    area_m2 / SQUARE_METERS_PER_HECTARE
}

pub fn rectangle_area_m2(length: f64, width: f64) -> f64 {
    length * width
}

pub fn circle_area_m2(diameter: f64) -> f64 {
    PI * (diameter / 2.0).powi(2)
}

/// Heron's formula. Returns `None` when the sides cannot close into a
/// triangle; a flat triangle yields `Some(0.0)`.
pub fn triangle_area_m2(a: f64, b: f64, c: f64) -> Option<f64> {
    if a < 0.0 || b < 0.0 || c < 0.0 || a + b < c || a + c < b || b + c < a {
        return None;
    }
    let s = (a + b + c) / 2.0;
    // Rounding can push a flat triangle's product just below zero.
    let product = (s * (s - a) * (s - b) * (s - c)).max(0.0);
    Some(product.sqrt())
}

fn dimension(value: Option<f64>) -> Option<f64> {
    let value = value?;
    if value < 0.0 {
        tracing::debug!(value, "negative field dimension");
        return None;
    }
    Some(value)
}

/// Resolve the field area in hectares.
///
/// A positive override is taken as-is. Otherwise the geometry is used, and
/// `None` means some required dimension is missing or negative (or the
/// triangle sides are impossible). A computed zero comes back as `Some(0.0)`.
pub fn resolve_area(geometry: &FieldGeometry, area_override: Option<f64>) -> Option<f64> {
    if let Some(hectares) = area_override.filter(|ha| *ha > 0.0) {
        return Some(hectares);
    }

    let area_m2 = match *geometry {
        FieldGeometry::Rectangle { length, width } => {
            rectangle_area_m2(dimension(length)?, dimension(width)?)
        }
        FieldGeometry::Circle { diameter } => circle_area_m2(dimension(diameter)?),
        FieldGeometry::Triangle {
            side_a,
            side_b,
            side_c,
        } => {
            let (a, b, c) = (side_a?, side_b?, side_c?);
            match triangle_area_m2(a, b, c) {
                Some(area) => area,
                None => {
                    tracing::debug!(a, b, c, "triangle sides violate the triangle inequality");
                    return None;
                }
            }
        }
    };

    Some(square_meters_to_hectares(area_m2)).filter(|ha| ha.is_finite())
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldShape {
    #[default]
    Rectangle,
    Circle,
    Triangle,
}

impl FieldShape {
    pub fn all() -> &'static [FieldShape] {
        &[FieldShape::Rectangle, FieldShape::Circle, FieldShape::Triangle]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldShape::Rectangle => "Rectangle",
            FieldShape::Circle => "Circle",
            FieldShape::Triangle => "Triangle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rectangle" | "rect" => Some(FieldShape::Rectangle),
            "circle" => Some(FieldShape::Circle),
            "triangle" => Some(FieldShape::Triangle),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field outline with dimensions in meters. Each dimension stays `None`
/// until the user has entered a usable number for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum FieldGeometry {
    Rectangle {
        length: Option<f64>,
        width: Option<f64>,
    },
    Circle {
        diameter: Option<f64>,
    },
    Triangle {
        side_a: Option<f64>,
        side_b: Option<f64>,
        side_c: Option<f64>,
    },
}

impl FieldGeometry {
    #[cfg(test)]
    pub fn rectangle(length: f64, width: f64) -> Self {
        FieldGeometry::Rectangle {
            length: Some(length),
            width: Some(width),
        }
    }

    #[cfg(test)]
    pub fn circle(diameter: f64) -> Self {
        FieldGeometry::Circle {
            diameter: Some(diameter),
        }
    }

    #[cfg(test)]
    pub fn triangle(a: f64, b: f64, c: f64) -> Self {
        FieldGeometry::Triangle {
            side_a: Some(a),
            side_b: Some(b),
            side_c: Some(c),
        }
    }

    /// A geometry of the given shape with nothing entered yet.
    pub fn empty(shape: FieldShape) -> Self {
        match shape {
            FieldShape::Rectangle => FieldGeometry::Rectangle {
                length: None,
                width: None,
            },
            FieldShape::Circle => FieldGeometry::Circle { diameter: None },
            FieldShape::Triangle => FieldGeometry::Triangle {
                side_a: None,
                side_b: None,
                side_c: None,
            },
        }
    }

    pub fn shape(&self) -> FieldShape {
        match self {
            FieldGeometry::Rectangle { .. } => FieldShape::Rectangle,
            FieldGeometry::Circle { .. } => FieldShape::Circle,
            FieldGeometry::Triangle { .. } => FieldShape::Triangle,
        }
    }
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self::empty(FieldShape::Rectangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_shape_from_str() {
        assert_eq!(FieldShape::from_str("rectangle"), Some(FieldShape::Rectangle));
        assert_eq!(FieldShape::from_str("Circle"), Some(FieldShape::Circle));
        assert_eq!(FieldShape::from_str("TRIANGLE"), Some(FieldShape::Triangle));
        assert_eq!(FieldShape::from_str("square"), None);
        assert_eq!(FieldShape::from_str(""), None);
    }

    #[test]
    fn empty_geometry_keeps_shape() {
        for shape in FieldShape::all() {
            assert_eq!(FieldGeometry::empty(*shape).shape(), *shape);
        }
    }

    #[test]
    fn geometry_serializes_with_shape_tag() {
        let json = serde_json::to_value(FieldGeometry::circle(100.0)).unwrap();
        assert_eq!(json["shape"], "circle");
        assert_eq!(json["diameter"], 100.0);
    }
}

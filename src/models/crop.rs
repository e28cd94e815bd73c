use serde::Serialize;

/// Baseline nutrient requirement for a crop, in kg/ha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropProfile {
    pub name: &'static str,
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P2O5")]
    pub p2o5: f64,
    #[serde(rename = "K2O")]
    pub k2o: f64,
}

impl CropProfile {
    const fn new(name: &'static str, n: f64, p2o5: f64, k2o: f64) -> Self {
        Self {
            name,
            n,
            p2o5,
            k2o,
        }
    }
}

pub const CROP_TABLE: &[CropProfile] = &[
    CropProfile::new("Potato", 150.0, 100.0, 150.0),
    CropProfile::new("Wheat", 120.0, 60.0, 40.0),
    CropProfile::new("Cotton", 90.0, 60.0, 60.0),
    CropProfile::new("Maize", 160.0, 70.0, 80.0),
    CropProfile::new("Rice", 100.0, 50.0, 50.0),
    CropProfile::new("Sugarcane", 200.0, 80.0, 160.0),
    CropProfile::new("Soybean", 20.0, 60.0, 80.0),
    CropProfile::new("Barley", 80.0, 40.0, 40.0),
    CropProfile::new("Sunflower", 60.0, 60.0, 80.0),
    CropProfile::new("Canola", 90.0, 40.0, 40.0),
];

/// Upper bounds used when drawing per-hectare rates as bars.
pub struct NutrientScale;

impl NutrientScale {
    pub const N: f64 = 200.0;
    pub const P2O5: f64 = 100.0;
    pub const K2O: f64 = 160.0;
}

/// Exact, case-sensitive lookup.
pub fn find_crop(name: &str) -> Option<&'static CropProfile> {
    CROP_TABLE.iter().find(|c| c.name == name)
}

pub fn crop_names() -> Vec<&'static str> {
    CROP_TABLE.iter().map(|c| c.name).collect()
}

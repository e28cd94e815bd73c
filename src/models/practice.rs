//! Context selections that travel with a recommendation unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FertilizerType {
    #[default]
    Synthetic,
    Organic,
    Custom,
}

impl FertilizerType {
    pub fn all() -> &'static [FertilizerType] {
        &[
            FertilizerType::Synthetic,
            FertilizerType::Organic,
            FertilizerType::Custom,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FertilizerType::Synthetic => "Synthetic",
            FertilizerType::Organic => "Organic",
            FertilizerType::Custom => "Custom Blend",
        }
    }

    /// Wire value as carried in a result record.
    pub fn value(&self) -> &'static str {
        match self {
            FertilizerType::Synthetic => "synthetic",
            FertilizerType::Organic => "organic",
            FertilizerType::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "synthetic" => Some(FertilizerType::Synthetic),
            "organic" => Some(FertilizerType::Organic),
            "custom" | "custom blend" | "customblend" => Some(FertilizerType::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for FertilizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationMethod {
    #[default]
    #[serde(rename = "Broadcast Spreading")]
    BroadcastSpreading,
    #[serde(rename = "Row Banding")]
    RowBanding,
    #[serde(rename = "Drip Irrigation")]
    DripIrrigation,
    #[serde(rename = "Foliar Spray")]
    FoliarSpray,
    #[serde(rename = "Top Dressing")]
    TopDressing,
}

impl ApplicationMethod {
    pub fn all() -> &'static [ApplicationMethod] {
        &[
            ApplicationMethod::BroadcastSpreading,
            ApplicationMethod::RowBanding,
            ApplicationMethod::DripIrrigation,
            ApplicationMethod::FoliarSpray,
            ApplicationMethod::TopDressing,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationMethod::BroadcastSpreading => "Broadcast Spreading",
            ApplicationMethod::RowBanding => "Row Banding",
            ApplicationMethod::DripIrrigation => "Drip Irrigation",
            ApplicationMethod::FoliarSpray => "Foliar Spray",
            ApplicationMethod::TopDressing => "Top Dressing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "broadcast spreading" | "broadcastspreading" | "broadcast" => {
                Some(ApplicationMethod::BroadcastSpreading)
            }
            "row banding" | "rowbanding" | "banding" => Some(ApplicationMethod::RowBanding),
            "drip irrigation" | "dripirrigation" | "drip" | "fertigation" => {
                Some(ApplicationMethod::DripIrrigation)
            }
            "foliar spray" | "foliarspray" | "foliar" => Some(ApplicationMethod::FoliarSpray),
            "top dressing" | "topdressing" => Some(ApplicationMethod::TopDressing),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn all() -> &'static [Season] {
        &[Season::Spring, Season::Summer, Season::Fall, Season::Winter]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "fall" | "autumn" => Some(Season::Fall),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fertilizer_type_from_str() {
        assert_eq!(
            FertilizerType::from_str("synthetic"),
            Some(FertilizerType::Synthetic)
        );
        assert_eq!(
            FertilizerType::from_str("Organic"),
            Some(FertilizerType::Organic)
        );
        assert_eq!(
            FertilizerType::from_str("Custom Blend"),
            Some(FertilizerType::Custom)
        );
        assert_eq!(FertilizerType::from_str("manure"), None);
    }

    #[test]
    fn fertilizer_type_wire_values() {
        let values: Vec<_> = FertilizerType::all().iter().map(|t| t.value()).collect();
        assert_eq!(values, ["synthetic", "organic", "custom"]);
        assert_eq!(
            serde_json::to_string(&FertilizerType::Custom).unwrap(),
            "\"custom\""
        );
    }

    #[test]
    fn application_method_round_trip() {
        for method in ApplicationMethod::all() {
            assert_eq!(ApplicationMethod::from_str(method.as_str()), Some(*method));
            let json = serde_json::to_string(method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
        assert_eq!(
            ApplicationMethod::from_str("foliar-spray"),
            Some(ApplicationMethod::FoliarSpray)
        );
        assert_eq!(ApplicationMethod::from_str("injection"), None);
    }

    #[test]
    fn season_from_str() {
        assert_eq!(Season::from_str("spring"), Some(Season::Spring));
        assert_eq!(Season::from_str("Autumn"), Some(Season::Fall));
        assert_eq!(Season::from_str("WINTER"), Some(Season::Winter));
        assert_eq!(Season::from_str("monsoon"), None);
    }

    #[test]
    fn defaults_match_form_defaults() {
        assert_eq!(FertilizerType::default(), FertilizerType::Synthetic);
        assert_eq!(
            ApplicationMethod::default(),
            ApplicationMethod::BroadcastSpreading
        );
        assert_eq!(Season::default(), Season::Spring);
    }
}

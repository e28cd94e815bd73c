use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Probability above which a suggestion is flagged for immediate action.
pub const HIGH_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    #[serde(default)]
    pub chemical: Vec<String>,
    #[serde(default)]
    pub biological: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
}

impl Treatment {
    pub fn is_empty(&self) -> bool {
        self.chemical.is_empty() && self.biological.is_empty() && self.prevention.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiseaseDetails {
    pub description: Option<String>,
    pub cause: Option<String>,
    #[serde(default)]
    pub treatment: Treatment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseSuggestion {
    pub id: String,
    pub name: String,
    pub probability: f64,
    /// Set by the service when the suggestion overlaps a more specific one.
    #[serde(default)]
    pub redundant: bool,
    #[serde(default)]
    pub details: DiseaseDetails,
}

impl DiseaseSuggestion {
    pub fn is_high_confidence(&self) -> bool {
        self.probability > HIGH_CONFIDENCE
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.probability.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

/// Verdict on one plant photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub is_plant: Option<f64>,
    pub is_healthy: Option<bool>,
    pub healthy_probability: Option<f64>,
    pub suggestions: Vec<DiseaseSuggestion>,
    pub assessed_at: DateTime<Utc>,
}

impl HealthAssessment {
    pub fn unique_suggestions(&self) -> Vec<&DiseaseSuggestion> {
        self.suggestions.iter().filter(|s| !s.redundant).collect()
    }

    pub fn top_suggestion(&self) -> Option<&DiseaseSuggestion> {
        self.unique_suggestions()
            .into_iter()
            .max_by(|a, b| a.probability.total_cmp(&b.probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(name: &str, probability: f64, redundant: bool) -> DiseaseSuggestion {
        DiseaseSuggestion {
            id: name.to_lowercase(),
            name: name.to_string(),
            probability,
            redundant,
            details: DiseaseDetails::default(),
        }
    }

    fn assessment(suggestions: Vec<DiseaseSuggestion>) -> HealthAssessment {
        HealthAssessment {
            is_plant: Some(0.99),
            is_healthy: Some(false),
            healthy_probability: Some(0.05),
            suggestions,
            assessed_at: Utc::now(),
        }
    }

    #[test]
    fn unique_suggestions_drop_redundant() {
        let a = assessment(vec![
            suggestion("Fungi", 0.8, true),
            suggestion("Late blight", 0.75, false),
            suggestion("Early blight", 0.1, false),
        ]);
        let names: Vec<_> = a.unique_suggestions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Late blight", "Early blight"]);
        assert_eq!(a.top_suggestion().unwrap().name, "Late blight");
    }

    #[test]
    fn high_confidence_is_strictly_above_threshold() {
        assert!(!suggestion("x", 0.9, false).is_high_confidence());
        assert!(suggestion("x", 0.91, false).is_high_confidence());
    }

    #[test]
    fn confidence_percent_rounds() {
        assert_eq!(suggestion("x", 0.756, false).confidence_percent(), 76);
        assert_eq!(suggestion("x", 1.2, false).confidence_percent(), 100);
    }

    #[test]
    fn empty_assessment_has_no_top() {
        assert!(assessment(Vec::new()).top_suggestion().is_none());
    }
}

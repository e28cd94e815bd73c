use crate::config::PlantHealthConfig;
use crate::error::{AgroError, Result};
use crate::models::{DiseaseDetails, DiseaseSuggestion, HealthAssessment, Treatment};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DETAILS: &str = "description,treatment,cause";

pub struct PlantHealthClient {
    client: reqwest::Client,
    config: PlantHealthConfig,
}

#[derive(Debug, Serialize)]
struct AssessmentRequest<'a> {
    images: Vec<&'a str>,
    similar_images: bool,
}

// Plant health API response structures
#[derive(Debug, Deserialize)]
struct PhResponse {
    result: PhResult,
}

#[derive(Debug, Deserialize)]
struct PhResult {
    #[serde(default)]
    is_plant: Option<PhBinary>,
    #[serde(default)]
    is_healthy: Option<PhBinary>,
    #[serde(default)]
    disease: Option<PhDisease>,
}

#[derive(Debug, Deserialize)]
struct PhBinary {
    binary: bool,
    probability: f64,
}

#[derive(Debug, Deserialize)]
struct PhDisease {
    #[serde(default)]
    suggestions: Vec<PhSuggestion>,
}

#[derive(Debug, Deserialize)]
struct PhSuggestion {
    id: String,
    name: String,
    probability: f64,
    #[serde(default)]
    redundant: Option<bool>,
    #[serde(default)]
    details: Option<PhDetails>,
}

#[derive(Debug, Deserialize)]
struct PhDetails {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    cause: Option<String>,
    #[serde(default)]
    treatment: Option<PhTreatment>,
}

#[derive(Debug, Deserialize)]
struct PhTreatment {
    #[serde(default)]
    chemical: Option<Vec<String>>,
    #[serde(default)]
    biological: Option<Vec<String>>,
    #[serde(default)]
    prevention: Option<Vec<String>>,
}

/// Identify an image format from its leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'B', b'M', ..] => Some("image/bmp"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

/// Encode raw image bytes as a `data:` URL.
pub fn encode_image(bytes: &[u8]) -> Result<String> {
    let mime = sniff_mime(bytes)
        .ok_or_else(|| AgroError::UnsupportedImage("Please upload an image file".into()))?;
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

impl PlantHealthClient {
    pub fn new(config: PlantHealthConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("agroassist/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.url.trim_end_matches('/'), path)
    }

    /// Read an image from disk and send it for a health assessment.
    pub async fn assess_file(&self, path: &Path) -> Result<HealthAssessment> {
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "loaded image");
        self.assess(&bytes).await
    }

    pub async fn assess(&self, image: &[u8]) -> Result<HealthAssessment> {
        let data_url = encode_image(image)?;
        let url = format!("{}?details={}", self.endpoint("health_assessment"), DETAILS);

        let request = AssessmentRequest {
            images: vec![data_url.as_str()],
            similar_images: self.config.similar_images,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgroError::DataSourceUnavailable(format!("Plant health API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgroError::DataSourceUnavailable(format!(
                "Plant health API returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await.map_err(|e| {
            AgroError::DataSourceUnavailable(format!("Plant health API: {}", e))
        })?;

        let assessment = parse_assessment(&body)?;
        tracing::info!(
            suggestions = assessment.suggestions.len(),
            healthy = ?assessment.is_healthy,
            "plant health assessment received"
        );
        Ok(assessment)
    }

    /// Test credentials against the usage endpoint.
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.endpoint("usage_info"))
            .header("Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| AgroError::DataSourceUnavailable(format!("Plant health API: {}", e)))?;

        Ok(response.status().is_success())
    }
}

/// Convert a raw response body into an assessment.
pub fn parse_assessment(body: &str) -> Result<HealthAssessment> {
    let response: PhResponse = serde_json::from_str(body)?;
    Ok(convert_result(response.result))
}

fn convert_result(result: PhResult) -> HealthAssessment {
    let suggestions = result
        .disease
        .map(|d| d.suggestions)
        .unwrap_or_default()
        .into_iter()
        .map(convert_suggestion)
        .collect();

    HealthAssessment {
        is_plant: result.is_plant.as_ref().map(|b| b.probability),
        is_healthy: result.is_healthy.as_ref().map(|b| b.binary),
        healthy_probability: result.is_healthy.as_ref().map(|b| b.probability),
        suggestions,
        assessed_at: Utc::now(),
    }
}

fn convert_suggestion(s: PhSuggestion) -> DiseaseSuggestion {
    let details = s
        .details
        .map(|d| DiseaseDetails {
            description: d.description,
            cause: d.cause,
            treatment: d
                .treatment
                .map(|t| Treatment {
                    chemical: t.chemical.unwrap_or_default(),
                    biological: t.biological.unwrap_or_default(),
                    prevention: t.prevention.unwrap_or_default(),
                })
                .unwrap_or_default(),
        })
        .unwrap_or_default();

    DiseaseSuggestion {
        id: s.id,
        name: s.name,
        probability: s.probability,
        redundant: s.redundant.unwrap_or(false),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    fn sample_config() -> PlantHealthConfig {
        PlantHealthConfig {
            url: "https://plant.example/api/v3/".to_string(),
            api_key: "test_key".to_string(),
            similar_images: true,
            timeout_secs: 5,
            enabled: true,
        }
    }

    #[test]
    fn client_endpoint_joins_path() {
        let client = PlantHealthClient::new(sample_config()).unwrap();
        assert_eq!(
            client.endpoint("usage_info"),
            "https://plant.example/api/v3/usage_info"
        );
    }

    #[test]
    fn sniff_known_formats() {
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_mime(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_mime(b"GIF89a"), Some("image/gif"));
        assert_eq!(sniff_mime(b"RIFF\x10\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"%PDF-1.7"), None);
        assert_eq!(sniff_mime(b""), None);
    }

    #[test]
    fn encode_image_builds_data_url() {
        let url = encode_image(&[0xFF, 0xD8, 0xFF]).unwrap();
        assert_eq!(url, "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn encode_rejects_non_images() {
        let err = encode_image(b"hello world").unwrap_err();
        assert!(matches!(err, AgroError::UnsupportedImage(_)));
    }

    #[test]
    fn parse_full_response() {
        let body = r#"{
            "access_token": "abc",
            "result": {
                "is_plant": {"binary": true, "probability": 0.98},
                "is_healthy": {"binary": false, "probability": 0.04},
                "disease": {
                    "suggestions": [
                        {
                            "id": "d1",
                            "name": "Late blight",
                            "probability": 0.93,
                            "details": {
                                "description": "Oomycete infection of leaves and tubers.",
                                "cause": "Phytophthora infestans",
                                "treatment": {
                                    "chemical": ["Apply copper fungicide"],
                                    "biological": ["Bacillus subtilis sprays"],
                                    "prevention": ["Rotate crops", "Avoid overhead watering"]
                                }
                            }
                        },
                        {
                            "id": "d2",
                            "name": "Fungi",
                            "probability": 0.5,
                            "redundant": true
                        }
                    ]
                }
            }
        }"#;

        let assessment = parse_assessment(body).unwrap();
        assert_eq!(assessment.is_plant, Some(0.98));
        assert_eq!(assessment.is_healthy, Some(false));
        assert_eq!(assessment.suggestions.len(), 2);

        let unique = assessment.unique_suggestions();
        assert_eq!(unique.len(), 1);
        let blight = unique[0];
        assert!(blight.is_high_confidence());
        assert_eq!(blight.details.cause.as_deref(), Some("Phytophthora infestans"));
        assert_eq!(blight.details.treatment.prevention.len(), 2);
    }

    #[test]
    fn parse_tolerates_null_details() {
        let body = r#"{
            "result": {
                "disease": {
                    "suggestions": [
                        {"id": "x", "name": "Leaf spot", "probability": 0.2,
                         "redundant": null,
                         "details": {"description": null, "cause": null, "treatment": null}}
                    ]
                }
            }
        }"#;

        let assessment = parse_assessment(body).unwrap();
        assert_eq!(assessment.is_plant, None);
        let s = &assessment.suggestions[0];
        assert!(!s.redundant);
        assert!(s.details.treatment.is_empty());
    }

    #[test]
    fn parse_healthy_plant_without_disease() {
        let body = r#"{"result": {"is_healthy": {"binary": true, "probability": 0.97}}}"#;
        let assessment = parse_assessment(body).unwrap();
        assert_eq!(assessment.is_healthy, Some(true));
        assert!(assessment.suggestions.is_empty());
    }

    #[test]
    fn parse_garbage_is_json_error() {
        assert!(matches!(
            parse_assessment("not json"),
            Err(AgroError::Json(_))
        ));
    }
}

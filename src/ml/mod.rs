use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Soil and weather parameters for a crop recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropFeatures {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropAlternate {
    pub crop: String,
    pub confidence: f64,
}

/// A classifier verdict: the top label plus runner-up recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropPrediction {
    pub primary_crop: String,
    pub primary_confidence: f64,
    pub other_recommendations: Vec<CropAlternate>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    success: bool,
    #[serde(default)]
    primary_crop: String,
    #[serde(default)]
    primary_confidence: f64,
    #[serde(default)]
    other_recommendations: Vec<CropAlternate>,
}

/// Thin client for the external crop classifier. Stateless request/response;
/// a remote failure surfaces as an error, no retries.
#[derive(Clone)]
pub struct MlClient {
    base_url: String,
    client: reqwest::Client,
}

impl MlClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn predict(&self, features: &CropFeatures) -> Result<CropPrediction, ApiError> {
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(features)
            .send()
            .await
            .map_err(|e| ApiError::Unavailable(format!("Crop prediction service: {e}")))?;

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Unavailable(format!("Crop prediction service: {e}")))?;

        if !body.success {
            return Err(ApiError::Unavailable("Crop prediction failed".into()));
        }

        Ok(CropPrediction {
            primary_crop: body.primary_crop,
            primary_confidence: body.primary_confidence,
            other_recommendations: body.other_recommendations,
        })
    }
}

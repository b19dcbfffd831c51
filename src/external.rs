//! Clients for the external exercise and nutrition lookup APIs.
//!
//! Both collaborators return JSON over HTTP. Any non-success status or parse
//! failure surfaces as an error the handlers catch and render as an empty or
//! degraded result set.

use crate::config::AppConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub exercise_type: String,
    #[serde(default)]
    pub muscle: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NutritionAnalysis {
    #[serde(default)]
    pub items: Vec<NutritionItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NutritionItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub serving_size_g: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub fat_total_g: f64,
    #[serde(default)]
    pub carbohydrates_total_g: f64,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    exercises_url: String,
    exercises_key: String,
    nutrition_url: String,
    nutrition_key: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            exercises_url: config.exercises_api_url.clone(),
            exercises_key: config.exercises_api_key.clone(),
            nutrition_url: config.nutrition_api_url.clone(),
            nutrition_key: config.nutrition_api_key.clone(),
        }
    }

    pub async fn exercises_by_muscle(&self, muscle: &str) -> Result<Vec<Exercise>, reqwest::Error> {
        self.http
            .get(&self.exercises_url)
            .query(&[("muscle", muscle)])
            .header("X-Api-Key", &self.exercises_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn analyze_nutrition(&self, query: &str) -> Result<NutritionAnalysis, reqwest::Error> {
        self.http
            .get(&self.nutrition_url)
            .query(&[("query", query)])
            .header("X-Api-Key", &self.nutrition_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

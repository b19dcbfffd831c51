use crate::base_path::normalize_prefix;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_EXERCISES_API: &str = "https://api.api-ninjas.com/v1/exercises";
const DEFAULT_NUTRITION_API: &str = "https://api.calorieninjas.com/v1/nutrition";

/// Process-wide settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_path: PathBuf,
    /// Explicitly configured mount prefix, already normalized. Empty means
    /// "infer per request".
    pub base_prefix: String,
    pub exercises_api_url: String,
    pub exercises_api_key: String,
    pub nutrition_api_url: String,
    pub nutrition_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8000);

        let database_path = env::var("HEALTH_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/health.db"));

        let raw_base = env::var("BASE_URL").unwrap_or_default();
        let base_prefix = normalize_prefix(&raw_base);
        if !raw_base.trim().is_empty() && base_prefix.is_empty() {
            warn!("BASE_URL {raw_base:?} names no prefix, falling back to per-request inference");
        }

        Self {
            port,
            database_path,
            base_prefix,
            exercises_api_url: env::var("EXERCISES_API_URL")
                .unwrap_or_else(|_| DEFAULT_EXERCISES_API.to_string()),
            exercises_api_key: env::var("API_NINJAS_KEY").unwrap_or_default(),
            nutrition_api_url: env::var("NUTRITION_API_URL")
                .unwrap_or_else(|_| DEFAULT_NUTRITION_API.to_string()),
            nutrition_api_key: env::var("CALORIE_NINJAS_KEY").unwrap_or_default(),
        }
    }
}

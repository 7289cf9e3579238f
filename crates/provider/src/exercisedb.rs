use std::time::Duration;

use log::warn;
use serde::Deserialize;

use liftlog_domain::{ExerciseProvider, ExternalExercise, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://exercisedb-api1.p.rapidapi.com/api/v1";
pub const DEFAULT_HOST: &str = "exercisedb-api1.p.rapidapi.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const RESULT_LIMIT: usize = 10;

/// ExerciseDB access configuration. A missing API key is a valid
/// configuration and degrades every search to an empty result.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("RAPIDAPI_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            ..Self::default()
        }
    }
}

/// ExerciseDB client via the RapidAPI gateway.
pub struct ExerciseDb {
    config: Config,
    client: reqwest::Client,
}

impl ExerciseDb {
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| ProviderError::Request(err.into()))?;
        Ok(Self { config, client })
    }
}

impl ExerciseProvider for ExerciseDb {
    async fn search_exercises(
        &self,
        query: &str,
    ) -> Result<Vec<ExternalExercise>, ProviderError> {
        let Some(api_key) = &self.config.api_key else {
            warn!("RAPIDAPI_KEY is not set");
            return Ok(Vec::new());
        };
        let response = self
            .client
            .get(format!("{}/exercises", self.config.base_url))
            .query(&[("name", query), ("limit", &RESULT_LIMIT.to_string())])
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| ProviderError::Request(err.into()))?
            .json::<SearchResponse>()
            .await
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))?;
        Ok(response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(ExternalExercise::from)
            .collect())
    }
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    data: Option<Vec<WireExercise>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WireExercise {
    #[serde(default)]
    exercise_id: String,
    name: String,
    #[serde(default)]
    body_parts: Vec<String>,
    #[serde(default)]
    target_muscles: Vec<String>,
    #[serde(default)]
    equipments: Vec<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    instructions: Vec<String>,
}

impl From<WireExercise> for ExternalExercise {
    fn from(exercise: WireExercise) -> Self {
        Self {
            id: exercise.exercise_id,
            name: exercise.name,
            body_parts: exercise.body_parts,
            target_muscles: exercise.target_muscles,
            equipments: exercise.equipments,
            image_url: exercise.image_url,
            instructions: exercise.instructions,
        }
    }
}

/// External exercise database collaborator.
///
/// The contract is best-effort: implementations with no credentials
/// return an empty list, and callers must treat errors as an empty
/// external segment rather than surfacing them.
#[allow(async_fn_in_trait)]
pub trait ExerciseProvider {
    async fn search_exercises(&self, query: &str)
    -> Result<Vec<ExternalExercise>, ProviderError>;
}

/// Provider record after adaptation to the domain. The provider's wire
/// format stays behind its client implementation; only this shape
/// crosses into the domain.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExternalExercise {
    pub id: String,
    pub name: String,
    pub body_parts: Vec<String>,
    pub target_muscles: Vec<String>,
    pub equipments: Vec<String>,
    pub image_url: Option<String>,
    pub instructions: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(Box<dyn std::error::Error + Send + Sync>),
    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// Stand-in used when no external exercise database is configured.
pub struct OfflineProvider;

impl ExerciseProvider for OfflineProvider {
    async fn search_exercises(
        &self,
        _query: &str,
    ) -> Result<Vec<ExternalExercise>, ProviderError> {
        Ok(Vec::new())
    }
}

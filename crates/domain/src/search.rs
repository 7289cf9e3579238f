use std::fmt;

use crate::{Exercise, ExerciseID, ExternalExercise, ImportCandidate};

/// Maximum number of local catalog matches in a merged search.
pub const LOCAL_SEARCH_LIMIT: usize = 5;

/// Marks whether a search result originated from the local catalog or
/// the external provider.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Source {
    Local,
    External,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Source::Local => "local",
                Source::External => "external",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResultID {
    Catalog(ExerciseID),
    Provider(String),
}

/// Exercise-shaped projection of a search match. Taxonomy fields are
/// raw strings: local results pass catalog values through unchanged
/// and external results keep the provider's vocabulary until an
/// explicit import normalizes it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: SearchResultID,
    pub name: String,
    pub category: String,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub source: Source,
}

impl SearchResult {
    /// Import payload carrying this result's raw taxonomy fields.
    #[must_use]
    pub fn into_import_candidate(self) -> ImportCandidate {
        ImportCandidate {
            name: self.name,
            category: Some(self.category),
            muscle_group: Some(self.muscle_group),
            equipment: self.equipment,
            instructions: self.instructions,
            image_url: self.image_url,
        }
    }
}

impl From<Exercise> for SearchResult {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: SearchResultID::Catalog(exercise.id),
            name: exercise.name.to_string(),
            category: exercise.category.name().to_string(),
            muscle_group: exercise.muscle_group.name().to_string(),
            equipment: exercise.equipment,
            instructions: exercise.instructions,
            image_url: exercise.image_url,
            source: Source::Local,
        }
    }
}

impl From<ExternalExercise> for SearchResult {
    fn from(exercise: ExternalExercise) -> Self {
        Self {
            id: SearchResultID::Provider(exercise.id),
            name: exercise.name,
            category: exercise
                .body_parts
                .first()
                .cloned()
                .unwrap_or_else(|| "Other".to_string()),
            muscle_group: exercise
                .target_muscles
                .first()
                .cloned()
                .unwrap_or_else(|| "Full Body".to_string()),
            equipment: Some(
                exercise
                    .equipments
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "None".to_string()),
            ),
            instructions: if exercise.instructions.is_empty() {
                None
            } else {
                Some(exercise.instructions.join(" "))
            },
            image_url: exercise.image_url,
            source: Source::External,
        }
    }
}

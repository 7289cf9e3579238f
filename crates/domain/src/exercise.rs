use derive_more::Deref;
use uuid::Uuid;

use crate::{Category, CreateError, DeleteError, MuscleGroup, Name, ReadError};

/// Catalog persistence collaborator.
///
/// Implementations must enforce at-most-one exercise per
/// case-insensitive name: `create_exercise` reports
/// [`CreateError::Conflict`] when a row with the same key already
/// exists, and callers recover by re-fetching.
#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    /// All exercises, ordered by name ascending.
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    /// Exact, case-sensitive name match.
    async fn find_exercise_by_name(&self, name: &str) -> Result<Option<Exercise>, ReadError>;
    /// Exact, case-insensitive name match.
    async fn find_exercise_by_name_ci(&self, name: &str) -> Result<Option<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        category: Category,
        muscle_group: MuscleGroup,
        equipment: Option<String>,
        instructions: Option<String>,
        image_url: Option<String>,
    ) -> Result<Exercise, CreateError>;
    /// Case-insensitive substring match, ordered by name ascending,
    /// capped at `limit` results.
    async fn search_exercises(&self, query: &str, limit: usize) -> Result<Vec<Exercise>, ReadError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

/// The single deduplicated catalog record for an exercise name.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub category: Category,
    pub muscle_group: MuscleGroup,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Candidate payload for promoting an external exercise into the
/// catalog. Taxonomy fields carry raw provider text unless they already
/// hold an internal enum value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportCandidate {
    pub name: String,
    pub category: Option<String>,
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
}

/// Outcome of an import: either a newly created catalog record or the
/// record a previous import already created for the same name.
#[derive(Debug, Clone, PartialEq)]
pub enum Imported {
    Created(Exercise),
    Existing(Exercise),
}

impl Imported {
    #[must_use]
    pub fn exercise(&self) -> &Exercise {
        match self {
            Imported::Created(exercise) | Imported::Existing(exercise) => exercise,
        }
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Imported::Created(_))
    }
}

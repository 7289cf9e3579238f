#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod name;
mod provider;
mod search;
mod service;
mod taxonomy;
mod workout;

pub use error::{CreateError, DeleteError, ReadError, StorageError, ValidationError};
pub use exercise::{Exercise, ExerciseID, ExerciseRepository, ImportCandidate, Imported};
pub use name::{Name, NameError};
pub use provider::{ExerciseProvider, ExternalExercise, OfflineProvider, ProviderError};
pub use search::{LOCAL_SEARCH_LIMIT, SearchResult, SearchResultID, Source};
pub use service::{ExerciseService, Service, WorkoutLogService};
pub use taxonomy::{Category, MuscleGroup, TaxonomyError};
pub use workout::{
    ExerciseLog, NewWorkoutLog, RawValue, Reps, RepsError, RoutineID, SetLog, UserID, Weight,
    WeightError, WorkoutAggregator, WorkoutInputLine, WorkoutLog, WorkoutLogID,
    WorkoutLogRepository,
};

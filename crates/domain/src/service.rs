use chrono::Local;
use log::{error, warn};

use crate::{
    Category, CreateError, DeleteError, Exercise, ExerciseID, ExerciseProvider,
    ExerciseRepository, ImportCandidate, Imported, LOCAL_SEARCH_LIMIT, MuscleGroup, Name,
    NewWorkoutLog, ReadError, SearchResult, UserID, ValidationError, WorkoutAggregator,
    WorkoutLog, WorkoutLogID, WorkoutLogRepository,
};

pub struct Service<R, P> {
    repository: R,
    provider: P,
}

impl<R, P> Service<R, P> {
    pub fn new(repository: R, provider: P) -> Self {
        Self {
            repository,
            provider,
        }
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        category: Category,
        muscle_group: MuscleGroup,
        equipment: Option<String>,
        instructions: Option<String>,
        image_url: Option<String>,
    ) -> Result<Exercise, CreateError>;
    /// Finds the canonical exercise for a bare name
    /// (case-insensitively) or creates it with hard defaults. Repeated
    /// calls with the same name yield the same id, also under
    /// concurrent callers.
    async fn resolve_or_create_exercise(&self, name: &str) -> Result<ExerciseID, CreateError>;
    /// Promotes a candidate into the catalog. Importing a name that
    /// already exists returns the first import's record unchanged.
    async fn import_exercise(&self, candidate: ImportCandidate) -> Result<Imported, CreateError>;
    /// Merged local and external search. An empty query returns no
    /// results without touching catalog or provider; a provider
    /// failure degrades to an empty external segment.
    async fn search_exercises(&self, query: &str) -> Result<Vec<SearchResult>, ReadError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

impl<R, P> ExerciseService for Service<R, P>
where
    R: ExerciseRepository,
    P: ExerciseProvider,
{
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(self.repository.read_exercises(), "get", "exercises")
    }

    async fn create_exercise(
        &self,
        name: Name,
        category: Category,
        muscle_group: MuscleGroup,
        equipment: Option<String>,
        instructions: Option<String>,
        image_url: Option<String>,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(
                name,
                category,
                muscle_group,
                equipment,
                instructions,
                image_url
            ),
            "create",
            "exercise"
        )
    }

    async fn resolve_or_create_exercise(&self, name: &str) -> Result<ExerciseID, CreateError> {
        let name = Name::new(name).map_err(ValidationError::from)?;
        if let Some(existing) = self
            .repository
            .find_exercise_by_name_ci(name.as_ref())
            .await?
        {
            return Ok(existing.id);
        }
        // No taxonomy text is available from a bare name, so the
        // created row gets hard defaults rather than normalizer output.
        match self
            .repository
            .create_exercise(
                name.clone(),
                Category::Strength,
                MuscleGroup::FullBody,
                None,
                None,
                None,
            )
            .await
        {
            Ok(exercise) => Ok(exercise.id),
            Err(CreateError::Conflict) => {
                // Lost a concurrent create for the same name; the
                // winner's row is authoritative.
                match self
                    .repository
                    .find_exercise_by_name_ci(name.as_ref())
                    .await?
                {
                    Some(exercise) => Ok(exercise.id),
                    None => Err(CreateError::UnresolvedConflict),
                }
            }
            Err(err) => {
                error!("failed to create exercise: {err}");
                Err(err)
            }
        }
    }

    async fn import_exercise(&self, candidate: ImportCandidate) -> Result<Imported, CreateError> {
        let name = Name::new(&candidate.name).map_err(ValidationError::from)?;
        if let Some(existing) = self.repository.find_exercise_by_name(name.as_ref()).await? {
            return Ok(Imported::Existing(existing));
        }
        let raw_category = candidate.category.unwrap_or_default();
        let category = Category::try_from(raw_category.as_str())
            .unwrap_or_else(|_| Category::from_provider(&raw_category));
        let raw_muscle_group = candidate.muscle_group.unwrap_or_default();
        let muscle_group = MuscleGroup::try_from(raw_muscle_group.as_str())
            .unwrap_or_else(|_| MuscleGroup::from_provider(&raw_muscle_group));
        let equipment = candidate.equipment.or_else(|| Some("None".to_string()));
        match self
            .repository
            .create_exercise(
                name.clone(),
                category,
                muscle_group,
                equipment,
                candidate.instructions,
                candidate.image_url,
            )
            .await
        {
            Ok(exercise) => Ok(Imported::Created(exercise)),
            Err(CreateError::Conflict) => {
                match self
                    .repository
                    .find_exercise_by_name_ci(name.as_ref())
                    .await?
                {
                    Some(exercise) => Ok(Imported::Existing(exercise)),
                    None => Err(CreateError::UnresolvedConflict),
                }
            }
            Err(err) => {
                error!("failed to import exercise: {err}");
                Err(err)
            }
        }
    }

    async fn search_exercises(&self, query: &str) -> Result<Vec<SearchResult>, ReadError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let local = log_on_error!(
            self.repository.search_exercises(query, LOCAL_SEARCH_LIMIT),
            "search",
            "exercises"
        )?;
        let mut results = local.into_iter().map(SearchResult::from).collect::<Vec<_>>();
        match self.provider.search_exercises(query).await {
            Ok(external) => results.extend(external.into_iter().map(SearchResult::from)),
            Err(err) => warn!("external exercise search failed: {err}"),
        }
        Ok(results)
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(self.repository.delete_exercise(id), "delete", "exercise")
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutLogService {
    async fn get_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError>;
    async fn get_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLog, ReadError>;
    /// Validates, aggregates and persists a workout in one operation.
    /// Input lines are folded strictly in input order; grouping and
    /// set numbering depend on what earlier lines established.
    async fn create_workout_log(
        &self,
        user_id: UserID,
        entry: NewWorkoutLog,
    ) -> Result<WorkoutLog, CreateError>;
    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError>;
}

impl<R, P> WorkoutLogService for Service<R, P>
where
    R: ExerciseRepository + WorkoutLogRepository,
    P: ExerciseProvider,
{
    async fn get_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError> {
        log_on_error!(
            self.repository.read_workout_logs(user_id),
            "get",
            "workout logs"
        )
    }

    async fn get_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLog, ReadError> {
        log_on_error!(self.repository.read_workout_log(id), "get", "workout log")
    }

    async fn create_workout_log(
        &self,
        user_id: UserID,
        entry: NewWorkoutLog,
    ) -> Result<WorkoutLog, CreateError> {
        let name = Name::new(&entry.name).map_err(ValidationError::from)?;
        // All names are validated before the first catalog mutation.
        for line in &entry.exercises {
            Name::new(&line.name).map_err(ValidationError::from)?;
        }
        let date = entry.date.unwrap_or_else(|| Local::now().date_naive());
        let mut aggregator = WorkoutAggregator::default();
        for line in &entry.exercises {
            let exercise_id = self.resolve_or_create_exercise(&line.name).await?;
            aggregator.add(exercise_id, line);
        }
        log_on_error!(
            self.repository.create_workout_log(WorkoutLog {
                id: WorkoutLogID::nil(),
                user_id,
                routine_id: entry.routine_id,
                name,
                date,
                duration: entry.duration,
                notes: entry.notes,
                exercises: aggregator.into_logs(),
            }),
            "create",
            "workout log"
        )
    }

    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_log(id),
            "delete",
            "workout log"
        )
    }
}

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use liftlog_domain::{
    Category, CreateError, DeleteError, Exercise, ExerciseID, ExerciseRepository, MuscleGroup,
    Name, ReadError, UserID, WorkoutLog, WorkoutLogID, WorkoutLogRepository,
};

/// In-memory storage shared across clones.
///
/// All state sits behind one async mutex, so every operation observes
/// and produces a consistent snapshot. The case-insensitive name index
/// is updated in the same critical section as the exercise map, which
/// makes concurrent creates of the same name race on exactly one
/// winner.
#[derive(Clone, Default)]
pub struct Storage {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    exercises: BTreeMap<ExerciseID, Exercise>,
    exercise_names: HashMap<String, ExerciseID>,
    workout_logs: BTreeMap<WorkoutLogID, WorkoutLog>,
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl ExerciseRepository for Storage {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        let state = self.state.lock().await;
        let mut exercises = state.exercises.values().cloned().collect::<Vec<_>>();
        exercises.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(exercises)
    }

    async fn find_exercise_by_name(&self, name: &str) -> Result<Option<Exercise>, ReadError> {
        let state = self.state.lock().await;
        Ok(state
            .exercises
            .values()
            .find(|exercise| exercise.name.as_ref() == name)
            .cloned())
    }

    async fn find_exercise_by_name_ci(&self, name: &str) -> Result<Option<Exercise>, ReadError> {
        let state = self.state.lock().await;
        Ok(state
            .exercise_names
            .get(&name_key(name))
            .and_then(|id| state.exercises.get(id))
            .cloned())
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
        let mut state = self.state.lock().await;
        let key = name.key();
        if state.exercise_names.contains_key(&key) {
            return Err(CreateError::Conflict);
        }
        let exercise = Exercise {
            id: Uuid::new_v4().into(),
            name,
            category,
            muscle_group,
            equipment,
            instructions,
            image_url,
        };
        state.exercise_names.insert(key, exercise.id);
        state.exercises.insert(exercise.id, exercise.clone());
        Ok(exercise)
    }

    async fn search_exercises(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Exercise>, ReadError> {
        let state = self.state.lock().await;
        let query = query.to_lowercase();
        let mut matches = state
            .exercises
            .values()
            .filter(|exercise| exercise.name.as_ref().to_lowercase().contains(&query))
            .cloned()
            .collect::<Vec<_>>();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        let mut state = self.state.lock().await;
        let Some(exercise) = state.exercises.remove(&id) else {
            return Err(DeleteError::NotFound);
        };
        state.exercise_names.remove(&exercise.name.key());
        Ok(id)
    }
}

impl WorkoutLogRepository for Storage {
    async fn read_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError> {
        let state = self.state.lock().await;
        let mut workout_logs = state
            .workout_logs
            .values()
            .filter(|workout_log| workout_log.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        workout_logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(workout_logs)
    }

    async fn read_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLog, ReadError> {
        let state = self.state.lock().await;
        state
            .workout_logs
            .get(&id)
            .cloned()
            .ok_or(ReadError::NotFound)
    }

    async fn create_workout_log(
        &self,
        workout_log: WorkoutLog,
    ) -> Result<WorkoutLog, CreateError> {
        let mut state = self.state.lock().await;
        let workout_log = WorkoutLog {
            id: Uuid::new_v4().into(),
            ..workout_log
        };
        state
            .workout_logs
            .insert(workout_log.id, workout_log.clone());
        Ok(workout_log)
    }

    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError> {
        let mut state = self.state.lock().await;
        if state.workout_logs.remove(&id).is_none() {
            return Err(DeleteError::NotFound);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_create_exercise_conflict_on_case_insensitive_name() {
        let storage = Storage::default();
        storage
            .create_exercise(
                Name::new("Bench Press").unwrap(),
                Category::Strength,
                MuscleGroup::Chest,
                None,
                None,
                None,
            )
            .await
            .unwrap();
        assert!(matches!(
            storage
                .create_exercise(
                    Name::new("BENCH PRESS").unwrap(),
                    Category::Strength,
                    MuscleGroup::Chest,
                    None,
                    None,
                    None,
                )
                .await,
            Err(CreateError::Conflict)
        ));
    }

    #[tokio::test]
    async fn test_read_exercises_sorted_by_name() {
        let storage = Storage::default();
        for name in ["Squat", "Bench Press", "Deadlift"] {
            storage
                .create_exercise(
                    Name::new(name).unwrap(),
                    Category::Strength,
                    MuscleGroup::FullBody,
                    None,
                    None,
                    None,
                )
                .await
                .unwrap();
        }
        let names = storage
            .read_exercises()
            .await
            .unwrap()
            .into_iter()
            .map(|exercise| exercise.name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Bench Press", "Deadlift", "Squat"]);
    }

    #[tokio::test]
    async fn test_search_exercises_limit() {
        let storage = Storage::default();
        for name in ["Press A", "Press B", "Press C"] {
            storage
                .create_exercise(
                    Name::new(name).unwrap(),
                    Category::Strength,
                    MuscleGroup::Chest,
                    None,
                    None,
                    None,
                )
                .await
                .unwrap();
        }
        let matches = storage.search_exercises("press", 2).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name.as_ref(), "Press A");
        assert_eq!(matches[1].name.as_ref(), "Press B");
    }

    #[tokio::test]
    async fn test_delete_exercise_frees_name() {
        let storage = Storage::default();
        let exercise = storage
            .create_exercise(
                Name::new("Bench Press").unwrap(),
                Category::Strength,
                MuscleGroup::Chest,
                None,
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(storage.delete_exercise(exercise.id).await.unwrap(), exercise.id);
        assert!(matches!(
            storage.delete_exercise(exercise.id).await,
            Err(DeleteError::NotFound)
        ));
        assert!(
            storage
                .create_exercise(
                    Name::new("bench press").unwrap(),
                    Category::Strength,
                    MuscleGroup::Chest,
                    None,
                    None,
                    None,
                )
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_read_workout_log_not_found() {
        let storage = Storage::default();
        assert!(matches!(
            storage.read_workout_log(WorkoutLogID::nil()).await,
            Err(ReadError::NotFound)
        ));
    }
}

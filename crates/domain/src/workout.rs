use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseID, Name, ReadError};

#[allow(async_fn_in_trait)]
pub trait WorkoutLogRepository {
    /// All workout logs of one user, ordered by date descending.
    async fn read_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError>;
    async fn read_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLog, ReadError>;
    /// Persists the whole log in one operation. The passed id is
    /// ignored and a fresh one is assigned.
    async fn create_workout_log(&self, workout_log: WorkoutLog)
    -> Result<WorkoutLog, CreateError>;
    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError>;
}

/// One recorded workout session. Created whole from aggregated input,
/// never partially populated.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: WorkoutLogID,
    pub user_id: UserID,
    pub routine_id: Option<RoutineID>,
    pub name: Name,
    pub date: NaiveDate,
    /// Minutes.
    pub duration: Option<u32>,
    pub notes: String,
    pub exercises: Vec<ExerciseLog>,
}

/// All set logs of one canonical exercise within one workout. Within a
/// workout, each exercise id appears in exactly one log and its set
/// numbers are contiguous starting at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLog {
    pub exercise_id: ExerciseID,
    pub sets: Vec<SetLog>,
}

/// One recorded working set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetLog {
    pub set_number: u32,
    pub reps: Reps,
    pub weight: Weight,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutLogID(Uuid);

impl WorkoutLogID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutLogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutLogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoutineID(Uuid);

impl RoutineID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for RoutineID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RoutineID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Clamps into the valid range instead of rejecting.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(value.clamp(0, 999) as u32)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Clamps into the valid range instead of rejecting. The value must
    /// be finite.
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self(value.clamp(0.0, 999.9) as f32)
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Free-form numeric field as it arrives from workout entry: either
/// already numeric or as text.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_integer(&self) -> Option<i64> {
        match self {
            #[allow(clippy::cast_possible_truncation)]
            RawValue::Number(value) if value.is_finite() => Some(value.trunc() as i64),
            RawValue::Number(_) => None,
            RawValue::Text(value) => longest_numeric_prefix::<i64>(value),
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) => Some(*value),
            RawValue::Text(value) => longest_numeric_prefix::<f64>(value),
        }
    }
}

/// Longest parsable numeric prefix of the trimmed text. Free-form
/// entries such as "3.7" or "100kg" keep their leading number instead
/// of failing outright.
fn longest_numeric_prefix<T: FromStr>(value: &str) -> Option<T> {
    let value = value.trim();
    (1..=value.len())
        .rev()
        .filter(|position| value.is_char_boundary(*position))
        .find_map(|position| value[..position].parse().ok())
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// One free-form line of workout input: an exercise name, a number of
/// sets, and the reps and weight shared by those sets.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutInputLine {
    pub name: String,
    pub sets: RawValue,
    pub reps: RawValue,
    pub weight: RawValue,
}

impl WorkoutInputLine {
    /// Number of set logs this line expands to. A malformed or
    /// non-positive count still produces one set.
    #[must_use]
    pub fn set_count(&self) -> u32 {
        match self.sets.as_integer() {
            Some(count) if count > 0 => u32::try_from(count).unwrap_or(1),
            _ => 1,
        }
    }

    /// Parsed reps, clamped into the valid range, 0 on parse failure.
    #[must_use]
    pub fn reps(&self) -> Reps {
        self.reps.as_integer().map_or_else(Reps::default, Reps::clamped)
    }

    /// Parsed weight, clamped into the valid range, 0 on parse failure.
    #[must_use]
    pub fn weight(&self) -> Weight {
        match self.weight.as_float() {
            Some(value) if value.is_finite() => Weight::clamped(value),
            _ => Weight::default(),
        }
    }
}

/// Raw workout creation request before validation and aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWorkoutLog {
    pub name: String,
    pub date: Option<NaiveDate>,
    /// Minutes.
    pub duration: Option<u32>,
    pub routine_id: Option<RoutineID>,
    pub notes: String,
    pub exercises: Vec<WorkoutInputLine>,
}

/// Folds workout input lines into per-exercise set logs.
///
/// Lines must be added strictly in input order: groups are keyed by
/// the first occurrence of each exercise id and set numbers continue
/// across later lines for the same exercise.
#[derive(Debug, Default)]
pub struct WorkoutAggregator {
    groups: Vec<ExerciseLog>,
    index: HashMap<ExerciseID, usize>,
}

impl WorkoutAggregator {
    pub fn add(&mut self, exercise_id: ExerciseID, line: &WorkoutInputLine) {
        let groups = &mut self.groups;
        let position = *self.index.entry(exercise_id).or_insert_with(|| {
            groups.push(ExerciseLog {
                exercise_id,
                sets: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut self.groups[position];
        let reps = line.reps();
        let weight = line.weight();
        for _ in 0..line.set_count() {
            #[allow(clippy::cast_possible_truncation)]
            let set_number = group.sets.len() as u32 + 1;
            group.sets.push(SetLog {
                set_number,
                reps,
                weight,
            });
        }
    }

    /// The groups in first-seen order of their exercise ids.
    #[must_use]
    pub fn into_logs(self) -> Vec<ExerciseLog> {
        self.groups
    }
}

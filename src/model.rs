//! Routines and workouts - the records the app keeps

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// Default target for a freshly added exercise
pub const DEFAULT_TARGET_SETS: u32 = 3;
pub const DEFAULT_TARGET_REPS: u32 = 10;

/// Exercise inside a routine (a template, nothing performed yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    pub name: String,
    #[serde(rename = "sets")]
    pub target_sets: u32,
    #[serde(rename = "reps")]
    pub target_reps: u32,
}

impl ExerciseTemplate {
    pub fn new(name: impl Into<String>, target_sets: u32, target_reps: u32) -> Self {
        Self {
            name: name.into(),
            target_sets,
            target_reps,
        }
    }
}

impl Default for ExerciseTemplate {
    fn default() -> Self {
        Self::new("", DEFAULT_TARGET_SETS, DEFAULT_TARGET_REPS)
    }
}

/// Reusable named list of exercises
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub name: String,
    pub exercises: Vec<ExerciseTemplate>,
}

impl Routine {
    /// A routine can be saved only with a name and at least one exercise
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.exercises.is_empty()
    }
}

/// One logged set. `{0, 0}` means the set was not done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub weight: f64,
    pub reps: u32,
}

impl WorkoutSet {
    pub const PLACEHOLDER: WorkoutSet = WorkoutSet { weight: 0.0, reps: 0 };

    pub fn new(weight: f64, reps: u32) -> Self {
        Self { weight, reps }
    }

    /// weight * reps
    pub fn volume(&self) -> f64 {
        self.weight * self.reps as f64
    }

    pub fn is_placeholder(&self) -> bool {
        self.weight == 0.0 && self.reps == 0
    }
}

/// Exercise as performed in a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutExercise {
    pub fn new(name: impl Into<String>, sets: Vec<WorkoutSet>) -> Self {
        Self {
            name: name.into(),
            sets,
        }
    }

    /// Unfilled exercise from a routine template
    pub fn from_template(template: &ExerciseTemplate) -> Self {
        Self {
            name: template.name.clone(),
            sets: vec![WorkoutSet::PLACEHOLDER; template.target_sets as usize],
        }
    }
}

/// Dated training session.
///
/// `routine_name` is a copy taken when the workout was logged; renaming or
/// deleting the routine later does not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(alias = "routineName")]
    pub routine_name: String,
    /// Date key, `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

/// Record that has been stored and got an id.
///
/// A bare `Routine` or `Workout` is a draft; history views only ever see
/// `Saved` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saved<T> {
    pub id: i64,
    #[serde(flatten)]
    pub record: T,
}

impl<T> Saved<T> {
    pub fn new(id: i64, record: T) -> Self {
        Self { id, record }
    }

    pub fn into_record(self) -> T {
        self.record
    }
}

impl<T> Deref for Saved<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

impl<T> DerefMut for Saved<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.record
    }
}

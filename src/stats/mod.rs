//! Stats module - derived views over logged workouts
//!
//! Features:
//! - Performed / skipped detection for exercises
//! - Per-workout volume and exercise summaries
//! - Per-exercise progress series for charts
//! - History overview (counts, recent workouts)

pub mod overview;
pub mod series;

pub use overview::Overview;
pub use series::{ChartPoint, exercise_series};

use serde::Serialize;

use crate::model::{Workout, WorkoutExercise, WorkoutSet};

/// Summary of one exercise inside a workout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSummary {
    pub name: String,
    pub total_sets: usize,
    pub total_reps: u64,
    pub total_volume: f64,
    pub max_weight: f64,
    pub performed: bool,
}

/// True if at least one set has weight or reps.
///
/// Exercises left at their `{0, 0}` placeholders were skipped and must not
/// show up as zero points on progress charts.
pub fn is_performed(exercise: Option<&WorkoutExercise>) -> bool {
    exercise.is_some_and(|e| e.sets.iter().any(|s| s.weight > 0.0 || s.reps > 0))
}

/// Sum of weight * reps over the given sets
pub fn sets_volume(sets: &[WorkoutSet]) -> f64 {
    sets.iter().map(WorkoutSet::volume).sum()
}

/// Heaviest weight over the given sets, 0 when there are none
pub fn max_weight(sets: &[WorkoutSet]) -> f64 {
    sets.iter().map(|s| s.weight).fold(0.0, f64::max)
}

/// Total volume of a workout. Placeholder sets add nothing.
pub fn total_volume(workout: &Workout) -> f64 {
    workout.exercises.iter().map(|e| sets_volume(&e.sets)).sum()
}

/// One summary per exercise, in workout order, skipped ones included
pub fn exercise_summaries(workout: &Workout) -> Vec<ExerciseSummary> {
    workout
        .exercises
        .iter()
        .map(|exercise| ExerciseSummary {
            name: exercise.name.clone(),
            total_sets: exercise.sets.len(),
            total_reps: exercise.sets.iter().map(|s| u64::from(s.reps)).sum(),
            total_volume: sets_volume(&exercise.sets),
            max_weight: max_weight(&exercise.sets),
            performed: is_performed(Some(exercise)),
        })
        .collect()
}

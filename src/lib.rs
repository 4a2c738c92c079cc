//! gymlog - Personal gym tracker
//!
//! Routines are templates, workouts are dated logs taken from them; the
//! stats and calendar modules turn the workout history into progress views.

pub mod calendar;
pub mod dates;
pub mod db;
pub mod editor;
pub mod export;
pub mod model;
pub mod stats;

pub use db::Database;
pub use model::{ExerciseTemplate, Routine, Saved, Workout, WorkoutExercise, WorkoutSet};

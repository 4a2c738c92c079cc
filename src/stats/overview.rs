//! History overview - counters shown above the progress charts

use std::collections::HashSet;

use crate::dates::from_date_key;
use crate::model::{Saved, Workout};

/// Aggregate counters over the whole history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overview {
    pub total_workouts: usize,
    /// Distinct exercise names, first-seen order
    pub exercise_names: Vec<String>,
    /// Distinct days with at least one workout
    pub active_days: usize,
}

impl Overview {
    pub fn from_workouts(workouts: &[Saved<Workout>]) -> Self {
        let mut seen = HashSet::new();
        let mut exercise_names = Vec::new();
        for exercise in workouts.iter().flat_map(|w| &w.exercises) {
            if seen.insert(exercise.name.as_str()) {
                exercise_names.push(exercise.name.clone());
            }
        }

        let active_days = workouts
            .iter()
            .map(|w| w.date.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_workouts: workouts.len(),
            exercise_names,
            active_days,
        }
    }
}

/// The `limit` most recent workouts, newest first.
/// Workouts on the same day keep their input order.
pub fn recent(workouts: &[Saved<Workout>], limit: usize) -> Vec<&Saved<Workout>> {
    let mut sorted: Vec<_> = workouts.iter().collect();
    sorted.sort_by_key(|w| std::cmp::Reverse(from_date_key(Some(&w.date))));
    sorted.truncate(limit);
    sorted
}

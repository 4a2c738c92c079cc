//! Progress series for one exercise across the workout history

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::{chart_label, from_date_key};
use crate::model::{Saved, Workout};
use crate::stats::{is_performed, max_weight, sets_volume};

/// One point on the progress chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Axis label, e.g. "8 ene"
    pub label: String,
    pub max_weight: f64,
    pub total_volume: f64,
}

/// Chronological series of max weight and volume for `exercise_name`.
///
/// Names match exactly. Workouts where the exercise was present but left
/// unfilled produce no point. Same-day workouts keep their input order.
pub fn exercise_series(exercise_name: &str, workouts: &[Saved<Workout>]) -> Vec<ChartPoint> {
    let mut matching: Vec<(NaiveDate, &Workout)> = workouts
        .iter()
        .filter(|w| w.exercises.iter().any(|e| e.name == exercise_name))
        .map(|w| (from_date_key(Some(&w.date)), &w.record))
        .collect();

    // sort_by_key is stable
    matching.sort_by_key(|(date, _)| *date);

    matching
        .into_iter()
        .filter_map(|(date, workout)| {
            let exercise = workout.exercises.iter().find(|e| e.name == exercise_name);
            if !is_performed(exercise) {
                return None;
            }
            let sets = &exercise?.sets;
            Some(ChartPoint {
                date,
                label: chart_label(date),
                max_weight: max_weight(sets),
                total_volume: sets_volume(sets),
            })
        })
        .collect()
}

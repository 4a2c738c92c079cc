//! Month calendar - 6x7 grid, Monday first, with workout lookups

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::dates::{self, to_date_key};
use crate::model::{Saved, Workout};

/// Cells in a calendar grid (6 weeks x 7 days)
pub const GRID_CELLS: usize = 42;

/// Weekday headers, Monday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["L", "M", "X", "J", "V", "S", "D"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
}

/// Grid for the month containing `reference`.
///
/// Trailing days of the previous month fill the first row up to the 1st,
/// leading days of the next month pad the end; always 42 cells.
pub fn calendar_days(reference: NaiveDate) -> Vec<CalendarDay> {
    let first = reference.with_day(1).unwrap_or(reference);
    let next_month = dates::shift_month(first, 1);
    let days_in_month = (next_month - first).num_days();
    let offset = first.weekday().num_days_from_monday() as i64;

    let mut days = Vec::with_capacity(GRID_CELLS);

    for i in (1..=offset).rev() {
        days.push(CalendarDay {
            date: first - Duration::days(i),
            is_current_month: false,
        });
    }

    for i in 0..days_in_month {
        days.push(CalendarDay {
            date: first + Duration::days(i),
            is_current_month: true,
        });
    }

    let mut i = 0;
    while days.len() < GRID_CELLS {
        days.push(CalendarDay {
            date: next_month + Duration::days(i),
            is_current_month: false,
        });
        i += 1;
    }

    days
}

/// Is `date` today in local time
pub fn is_today(date: NaiveDate) -> bool {
    date == dates::today()
}

/// Workouts logged on `date`, in input order
pub fn workouts_on_date(date: NaiveDate, workouts: &[Saved<Workout>]) -> Vec<&Saved<Workout>> {
    let key = to_date_key(&date);
    workouts.iter().filter(|w| w.date == key).collect()
}

pub fn has_workout(date: NaiveDate, workouts: &[Saved<Workout>]) -> bool {
    let key = to_date_key(&date);
    workouts.iter().any(|w| w.date == key)
}

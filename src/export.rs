//! Backup and export - JSON snapshot, CSV of every set, JSON import

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dates::parse_date_key;
use crate::db::Database;
use crate::model::{Routine, Saved, Workout};

/// CSV header, one row per logged set
pub const CSV_HEADER: &str = "Fecha,Rutina,Ejercicio,Serie,Peso(kg),Repeticiones";

/// Full snapshot written by `export json`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup<'a> {
    pub routines: &'a [Saved<Routine>],
    pub workouts: &'a [Saved<Workout>],
    pub export_date: DateTime<Utc>,
}

/// What `import` reads. Ids and extra fields in the file are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ImportFile {
    #[serde(default)]
    pub routines: Vec<Routine>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

/// Counts of imported records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub routines: usize,
    pub workouts: usize,
}

pub fn to_json(routines: &[Saved<Routine>], workouts: &[Saved<Workout>]) -> Result<String> {
    let backup = Backup {
        routines,
        workouts,
        export_date: Utc::now(),
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

pub fn to_csv(workouts: &[Saved<Workout>]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for workout in workouts {
        for exercise in &workout.exercises {
            for (index, set) in exercise.sets.iter().enumerate() {
                csv.push_str(&format!(
                    "{},{},{},{},{},{}\n",
                    workout.date,
                    workout.routine_name,
                    exercise.name,
                    index + 1,
                    set.weight,
                    set.reps
                ));
            }
        }
    }
    csv
}

pub fn parse_import(json: &str) -> Result<ImportFile> {
    serde_json::from_str(json).context("Invalid backup file: expected JSON with routines/workouts")
}

/// Insert every record of `file` as a new row, all or nothing
pub fn import_into(db: &mut Database, file: &ImportFile) -> Result<ImportReport> {
    for workout in &file.workouts {
        if parse_date_key(&workout.date).is_none() {
            warn!("Workout \"{}\" has invalid date \"{}\"", workout.routine_name, workout.date);
        }
    }
    db.insert_all(&file.routines, &file.workouts)
        .context("Import failed, nothing was imported")?;

    let report = ImportReport {
        routines: file.routines.len(),
        workouts: file.workouts.len(),
    };
    info!("Imported {} routines, {} workouts", report.routines, report.workouts);
    Ok(report)
}

//! Database module - SQLite storage for routines and workouts
//!
//! Exercise lists are stored as JSON text columns.

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

use crate::model::{ExerciseTemplate, Routine, Saved, Workout, WorkoutExercise};

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path))?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS routines (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                exercises TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                routine_name TEXT NOT NULL,
                date TEXT NOT NULL,
                exercises TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    // === Routines ===

    pub fn add_routine(&self, routine: &Routine) -> Result<i64> {
        let id = insert_routine(&self.conn, routine)?;
        info!("Routine \"{}\" saved (id: {})", routine.name, id);
        Ok(id)
    }

    pub fn update_routine(&self, id: i64, routine: &Routine) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE routines SET name = ?1, exercises = ?2 WHERE id = ?3",
            params![routine.name, serde_json::to_string(&routine.exercises)?, id],
        )?;
        if changed == 0 {
            bail!("Routine {} not found", id);
        }
        info!("Routine \"{}\" updated (id: {})", routine.name, id);
        Ok(())
    }

    /// Insert when `id` is None, update otherwise
    pub fn save_routine(&self, id: Option<i64>, routine: &Routine) -> Result<i64> {
        match id {
            Some(id) => self.update_routine(id, routine).map(|_| id),
            None => self.add_routine(routine),
        }
    }

    /// Get all routines, oldest first
    pub fn get_routines(&self) -> Result<Vec<Saved<Routine>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, exercises FROM routines ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, json)| routine_from_row(id, name, &json))
            .collect()
    }

    pub fn get_routine(&self, id: i64) -> Result<Option<Saved<Routine>>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT name, exercises FROM routines WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(name, json)| routine_from_row(id, name, &json))
            .transpose()
    }

    /// Delete a routine. Workouts logged from it keep their copy of the name.
    pub fn delete_routine(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM routines WHERE id = ?1", params![id])?;
        if changed == 0 {
            bail!("Routine {} not found", id);
        }
        info!("Routine {} deleted", id);
        Ok(())
    }

    // === Workouts ===

    pub fn add_workout(&self, workout: &Workout) -> Result<i64> {
        let id = insert_workout(&self.conn, workout)?;
        info!("Workout \"{}\" on {} saved (id: {})", workout.routine_name, workout.date, id);
        Ok(id)
    }

    pub fn update_workout(&self, id: i64, workout: &Workout) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE workouts SET routine_name = ?1, date = ?2, exercises = ?3 WHERE id = ?4",
            params![
                workout.routine_name,
                workout.date,
                serde_json::to_string(&workout.exercises)?,
                id,
            ],
        )?;
        if changed == 0 {
            bail!("Workout {} not found", id);
        }
        info!("Workout {} updated", id);
        Ok(())
    }

    /// Insert when `id` is None, update otherwise
    pub fn save_workout(&self, id: Option<i64>, workout: &Workout) -> Result<i64> {
        match id {
            Some(id) => self.update_workout(id, workout).map(|_| id),
            None => self.add_workout(workout),
        }
    }

    /// Get all workouts in insertion order
    pub fn get_workouts(&self) -> Result<Vec<Saved<Workout>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, routine_name, date, exercises FROM workouts ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, routine_name, date, json)| workout_from_row(id, routine_name, date, &json))
            .collect()
    }

    pub fn get_workout(&self, id: i64) -> Result<Option<Saved<Workout>>> {
        let row: Option<(String, String, String)> = self
            .conn
            .query_row(
                "SELECT routine_name, date, exercises FROM workouts WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        row.map(|(routine_name, date, json)| workout_from_row(id, routine_name, date, &json))
            .transpose()
    }

    pub fn delete_workout(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        if changed == 0 {
            bail!("Workout {} not found", id);
        }
        info!("Workout {} deleted", id);
        Ok(())
    }

    /// Insert all records in one transaction; nothing is kept if any insert fails
    pub fn insert_all(&mut self, routines: &[Routine], workouts: &[Workout]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for routine in routines {
            insert_routine(&tx, routine)?;
        }
        for workout in workouts {
            insert_workout(&tx, workout)?;
        }
        tx.commit()?;
        info!("Inserted {} routines, {} workouts", routines.len(), workouts.len());
        Ok(())
    }

    /// Remove every routine and workout
    pub fn clear_all(&self) -> Result<()> {
        self.conn
            .execute_batch("DELETE FROM routines; DELETE FROM workouts;")?;
        info!("All data cleared");
        Ok(())
    }
}

fn insert_routine(conn: &Connection, routine: &Routine) -> Result<i64> {
    conn.execute(
        "INSERT INTO routines (name, exercises) VALUES (?1, ?2)",
        params![routine.name, serde_json::to_string(&routine.exercises)?],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_workout(conn: &Connection, workout: &Workout) -> Result<i64> {
    conn.execute(
        "INSERT INTO workouts (routine_name, date, exercises) VALUES (?1, ?2, ?3)",
        params![
            workout.routine_name,
            workout.date,
            serde_json::to_string(&workout.exercises)?,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn routine_from_row(id: i64, name: String, json: &str) -> Result<Saved<Routine>> {
    let exercises: Vec<ExerciseTemplate> = serde_json::from_str(json)
        .with_context(|| format!("Corrupt exercises for routine {}", id))?;
    Ok(Saved::new(id, Routine { name, exercises }))
}

fn workout_from_row(id: i64, routine_name: String, date: String, json: &str) -> Result<Saved<Workout>> {
    let exercises: Vec<WorkoutExercise> = serde_json::from_str(json)
        .with_context(|| format!("Corrupt exercises for workout {}", id))?;
    Ok(Saved::new(
        id,
        Workout {
            routine_name,
            date,
            exercises,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkoutSet;

    fn open_db() -> Database {
        Database::open(":memory:").unwrap()
    }

    fn create_routine(name: &str) -> Routine {
        Routine {
            name: name.to_string(),
            exercises: vec![
                ExerciseTemplate::new("Press banca", 4, 10),
                ExerciseTemplate::new("Fondos", 3, 12),
            ],
        }
    }

    fn create_workout(routine_name: &str, date: &str) -> Workout {
        Workout {
            routine_name: routine_name.to_string(),
            date: date.to_string(),
            exercises: vec![WorkoutExercise::new(
                "Press banca",
                vec![WorkoutSet::new(80.0, 10), WorkoutSet::new(82.5, 8)],
            )],
        }
    }

    #[test]
    fn test_routine_crud() {
        let db = open_db();
        let id = db.add_routine(&create_routine("Empuje")).unwrap();

        let saved = db.get_routine(id).unwrap().unwrap();
        assert_eq!(saved.id, id);
        assert_eq!(saved.record, create_routine("Empuje"));

        let mut changed = create_routine("Empuje pesado");
        changed.exercises.pop();
        db.update_routine(id, &changed).unwrap();
        assert_eq!(db.get_routines().unwrap(), vec![Saved::new(id, changed)]);

        db.delete_routine(id).unwrap();
        assert!(db.get_routine(id).unwrap().is_none());
        assert!(db.get_routines().unwrap().is_empty());
    }

    #[test]
    fn test_missing_ids_are_errors() {
        let db = open_db();
        assert!(db.update_routine(42, &create_routine("X")).is_err());
        assert!(db.delete_routine(42).is_err());
        assert!(db.update_workout(42, &create_workout("X", "2026-01-01")).is_err());
        assert!(db.delete_workout(42).is_err());
    }

    #[test]
    fn test_save_inserts_or_updates() {
        let db = open_db();
        let id = db.save_workout(None, &create_workout("Empuje", "2026-01-01")).unwrap();
        let same = db.save_workout(Some(id), &create_workout("Empuje", "2026-01-02")).unwrap();
        assert_eq!(id, same);

        let workouts = db.get_workouts().unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].date, "2026-01-02");
    }

    #[test]
    fn test_workout_round_trip() {
        let db = open_db();
        let workout = create_workout("Empuje", "2026-01-08");
        let id = db.add_workout(&workout).unwrap();
        assert_eq!(db.get_workout(id).unwrap(), Some(Saved::new(id, workout)));
    }

    #[test]
    fn test_deleting_routine_keeps_workouts() {
        let db = open_db();
        let routine_id = db.add_routine(&create_routine("Empuje")).unwrap();
        db.add_workout(&create_workout("Empuje", "2026-01-08")).unwrap();

        db.delete_routine(routine_id).unwrap();
        let workouts = db.get_workouts().unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].routine_name, "Empuje");
    }

    #[test]
    fn test_insert_all() {
        let mut db = open_db();
        db.insert_all(
            &[create_routine("Empuje")],
            &[create_workout("Empuje", "2026-01-08"), create_workout("Empuje", "2026-01-10")],
        )
        .unwrap();
        assert_eq!(db.get_routines().unwrap().len(), 1);
        assert_eq!(db.get_workouts().unwrap().len(), 2);
    }

    #[test]
    fn test_insert_all_failure_keeps_nothing() {
        let mut db = open_db();
        db.conn
            .execute_batch(
                "CREATE TRIGGER reject_bad BEFORE INSERT ON workouts
                 WHEN NEW.routine_name = 'bad'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = db.insert_all(
            &[create_routine("Empuje")],
            &[create_workout("Empuje", "2026-01-08"), create_workout("bad", "2026-01-09")],
        );
        assert!(result.is_err());
        assert!(db.get_routines().unwrap().is_empty());
        assert!(db.get_workouts().unwrap().is_empty());
    }

    #[test]
    fn test_clear_all() {
        let db = open_db();
        db.add_routine(&create_routine("Empuje")).unwrap();
        db.add_workout(&create_workout("Empuje", "2026-01-08")).unwrap();
        db.clear_all().unwrap();
        assert!(db.get_routines().unwrap().is_empty());
        assert!(db.get_workouts().unwrap().is_empty());
    }
}

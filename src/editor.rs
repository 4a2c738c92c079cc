//! Editing sessions - building a routine, logging a workout

use anyhow::{Result, bail};

use crate::dates;
use crate::model::{
    DEFAULT_TARGET_REPS, DEFAULT_TARGET_SETS, ExerciseTemplate, Routine, Saved, Workout, WorkoutExercise,
    WorkoutSet,
};

/// Field of an exercise template being edited
#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseField {
    Name(String),
    Sets(u32),
    Reps(u32),
}

/// Routine being created or edited
#[derive(Debug, Clone, Default)]
pub struct RoutineEditor {
    /// Present when editing a stored routine
    pub id: Option<i64>,
    pub routine: Routine,
}

impl RoutineEditor {
    /// Empty draft
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_saved(saved: &Saved<Routine>) -> Self {
        Self {
            id: Some(saved.id),
            routine: saved.record.clone(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.routine.name = name.into();
    }

    /// Append an exercise with default targets, returns its index
    pub fn add_exercise(&mut self) -> usize {
        self.routine.exercises.push(ExerciseTemplate::default());
        self.routine.exercises.len() - 1
    }

    pub fn update_exercise(&mut self, index: usize, field: ExerciseField) -> Result<()> {
        let Some(exercise) = self.routine.exercises.get_mut(index) else {
            bail!("No exercise #{} in routine", index + 1);
        };
        match field {
            ExerciseField::Name(name) => exercise.name = name,
            ExerciseField::Sets(sets) => exercise.target_sets = sets,
            ExerciseField::Reps(reps) => exercise.target_reps = reps,
        }
        Ok(())
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<ExerciseTemplate> {
        if index >= self.routine.exercises.len() {
            bail!("No exercise #{} in routine", index + 1);
        }
        Ok(self.routine.exercises.remove(index))
    }

    /// Validated routine and the id to update (None = insert)
    pub fn finish(self) -> Result<(Option<i64>, Routine)> {
        if !self.routine.is_valid() {
            if self.routine.name.trim().is_empty() {
                bail!("Routine needs a name");
            }
            bail!("Routine \"{}\" needs at least one exercise", self.routine.name);
        }
        Ok((self.id, self.routine))
    }
}

/// Parse an exercise entry `Name[:SETSxREPS]`, e.g. `Press banca:4x10`.
/// Without targets the exercise gets the defaults.
pub fn parse_template_entry(input: &str) -> Result<ExerciseTemplate> {
    let (name, targets) = match input.rsplit_once(':') {
        Some((name, targets)) => (name.trim(), Some(targets.trim().to_lowercase())),
        None => (input.trim(), None),
    };
    if name.is_empty() {
        bail!("Exercise needs a name");
    }

    let mut template = ExerciseTemplate::new(name, DEFAULT_TARGET_SETS, DEFAULT_TARGET_REPS);
    if let Some(targets) = targets {
        let Some((sets, reps)) = targets.split_once('x') else {
            bail!("Invalid targets \"{}\", expected SETSxREPS", targets);
        };
        template.target_sets = sets.trim().parse()?;
        template.target_reps = reps.trim().parse()?;
    }
    Ok(template)
}

/// Field of a logged set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetField {
    Weight(f64),
    Reps(u32),
}

/// Parse user input for a set field; anything unusable becomes 0
pub fn parse_set_value(input: &str) -> f64 {
    match input.trim().replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Most reps accepted for a single set
pub const MAX_REPS: u32 = 10_000;

/// Turn a 1-based number from the command line into an index
pub fn number_to_index(number: usize, what: &str) -> Result<usize> {
    if number == 0 {
        bail!("{} numbers start at 1", what);
    }
    Ok(number - 1)
}

/// Parse a rep count. Empty input is 0; fractions and counts above
/// [`MAX_REPS`] are rejected.
pub fn parse_reps(input: &str) -> Result<u32> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }
    let Ok(reps) = input.parse::<u32>() else {
        bail!("Invalid reps \"{}\", expected a whole number", input);
    };
    if reps > MAX_REPS {
        bail!("{} reps in one set is more than the limit of {}", reps, MAX_REPS);
    }
    Ok(reps)
}

/// Parse a set entry `E.S=WxR` (1-based exercise and set numbers),
/// e.g. `1.2=80x10`. Weight goes through [`parse_set_value`], reps
/// through [`parse_reps`].
pub fn parse_set_entry(input: &str) -> Result<(usize, usize, WorkoutSet)> {
    let Some((position, values)) = input.split_once('=') else {
        bail!("Invalid set \"{}\", expected E.S=WxR", input);
    };
    let Some((exercise, set)) = position.split_once('.') else {
        bail!("Invalid set position \"{}\", expected E.S", position);
    };
    let exercise = number_to_index(exercise.trim().parse()?, "Exercise")?;
    let set = number_to_index(set.trim().parse()?, "Set")?;

    let values = values.to_lowercase();
    let set_values = match values.split_once('x') {
        Some((weight, reps)) => WorkoutSet::new(parse_set_value(weight), parse_reps(reps)?),
        None => WorkoutSet::new(0.0, parse_reps(&values)?),
    };

    Ok((exercise, set, set_values))
}

/// Workout being logged, fresh from a routine or reopened for editing
#[derive(Debug, Clone)]
pub struct WorkoutSession {
    /// Present when editing a stored workout
    pub id: Option<i64>,
    pub workout: Workout,
}

impl WorkoutSession {
    /// Start logging `routine`; every set begins as a placeholder
    pub fn start(routine: &Routine, date: Option<&str>) -> Self {
        let date = match date {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => dates::today_key(),
        };
        Self {
            id: None,
            workout: Workout {
                routine_name: routine.name.clone(),
                date,
                exercises: routine.exercises.iter().map(WorkoutExercise::from_template).collect(),
            },
        }
    }

    pub fn edit(saved: &Saved<Workout>) -> Self {
        Self {
            id: Some(saved.id),
            workout: saved.record.clone(),
        }
    }

    pub fn set_date(&mut self, key: &str) -> Result<()> {
        let Some(date) = dates::parse_date_key(key) else {
            bail!("Invalid date \"{}\", expected YYYY-MM-DD", key);
        };
        self.workout.date = dates::to_date_key(&date);
        Ok(())
    }

    /// Change one existing set. The number of sets never changes.
    pub fn update_set(&mut self, exercise_index: usize, set_index: usize, field: SetField) -> Result<()> {
        let Some(exercise) = self.workout.exercises.get_mut(exercise_index) else {
            bail!("No exercise #{} in workout", exercise_index + 1);
        };
        let Some(set) = exercise.sets.get_mut(set_index) else {
            bail!(
                "Exercise \"{}\" has {} sets, no set #{}",
                exercise.name,
                exercise.sets.len(),
                set_index + 1
            );
        };
        match field {
            SetField::Weight(weight) => set.weight = weight.max(0.0),
            SetField::Reps(reps) => set.reps = reps,
        }
        Ok(())
    }

    /// Replace a whole set, e.g. from a `80x10` entry
    pub fn log_set(&mut self, exercise_index: usize, set_index: usize, set: WorkoutSet) -> Result<()> {
        self.update_set(exercise_index, set_index, SetField::Weight(set.weight))?;
        self.update_set(exercise_index, set_index, SetField::Reps(set.reps))
    }

    /// Workout and the id to update (None = insert)
    pub fn finish(self) -> (Option<i64>, Workout) {
        (self.id, self.workout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_routine() -> Routine {
        Routine {
            name: "Pierna".to_string(),
            exercises: vec![
                ExerciseTemplate::new("Sentadilla", 4, 8),
                ExerciseTemplate::new("Prensa", 3, 12),
            ],
        }
    }

    #[test]
    fn test_routine_editor_build() {
        let mut editor = RoutineEditor::new();
        editor.set_name("Empuje");
        let idx = editor.add_exercise();
        assert_eq!(editor.routine.exercises[idx], ExerciseTemplate::new("", 3, 10));

        editor.update_exercise(idx, ExerciseField::Name("Press banca".to_string())).unwrap();
        editor.update_exercise(idx, ExerciseField::Sets(5)).unwrap();
        editor.update_exercise(idx, ExerciseField::Reps(5)).unwrap();

        let (id, routine) = editor.finish().unwrap();
        assert_eq!(id, None);
        assert_eq!(routine.exercises, vec![ExerciseTemplate::new("Press banca", 5, 5)]);
    }

    #[test]
    fn test_routine_editor_rejects_invalid() {
        assert!(RoutineEditor::new().finish().is_err());

        let mut editor = RoutineEditor::new();
        editor.set_name("Vacía");
        assert!(editor.finish().is_err());

        let mut editor = RoutineEditor::new();
        editor.add_exercise();
        assert!(editor.finish().is_err());
    }

    #[test]
    fn test_routine_editor_index_errors() {
        let mut editor = RoutineEditor::from_saved(&Saved::new(3, sample_routine()));
        assert!(editor.update_exercise(2, ExerciseField::Sets(1)).is_err());
        assert!(editor.remove_exercise(5).is_err());

        let removed = editor.remove_exercise(0).unwrap();
        assert_eq!(removed.name, "Sentadilla");

        let (id, routine) = editor.finish().unwrap();
        assert_eq!(id, Some(3));
        assert_eq!(routine.exercises.len(), 1);
    }

    #[test]
    fn test_session_start_fills_placeholders() {
        let session = WorkoutSession::start(&sample_routine(), Some("2026-01-08"));
        assert_eq!(session.id, None);
        assert_eq!(session.workout.routine_name, "Pierna");
        assert_eq!(session.workout.date, "2026-01-08");
        assert_eq!(session.workout.exercises[0].sets, vec![WorkoutSet::PLACEHOLDER; 4]);
        assert_eq!(session.workout.exercises[1].sets.len(), 3);
    }

    #[test]
    fn test_session_start_defaults_to_today() {
        let session = WorkoutSession::start(&sample_routine(), None);
        assert_eq!(session.workout.date, dates::today_key());
    }

    #[test]
    fn test_session_update_set_keeps_length() {
        let mut session = WorkoutSession::start(&sample_routine(), Some("2026-01-08"));
        session.update_set(0, 1, SetField::Weight(100.0)).unwrap();
        session.update_set(0, 1, SetField::Reps(8)).unwrap();
        session.log_set(1, 2, WorkoutSet::new(140.0, 12)).unwrap();

        assert!(session.update_set(0, 4, SetField::Reps(1)).is_err());
        assert!(session.update_set(2, 0, SetField::Reps(1)).is_err());

        let (_, workout) = session.finish();
        assert_eq!(workout.exercises[0].sets.len(), 4);
        assert_eq!(workout.exercises[0].sets[1], WorkoutSet::new(100.0, 8));
        assert_eq!(workout.exercises[1].sets[2], WorkoutSet::new(140.0, 12));
    }

    #[test]
    fn test_session_negative_weight_clamped() {
        let mut session = WorkoutSession::start(&sample_routine(), Some("2026-01-08"));
        session.update_set(0, 0, SetField::Weight(-5.0)).unwrap();
        assert_eq!(session.workout.exercises[0].sets[0].weight, 0.0);
    }

    #[test]
    fn test_session_edit_keeps_id() {
        let saved = Saved::new(9, WorkoutSession::start(&sample_routine(), Some("2026-01-08")).workout);
        let mut session = WorkoutSession::edit(&saved);
        session.set_date("2026-01-09").unwrap();
        assert!(session.set_date("09/01/2026").is_err());

        let (id, workout) = session.finish();
        assert_eq!(id, Some(9));
        assert_eq!(workout.date, "2026-01-09");
    }

    #[test]
    fn test_parse_set_value() {
        assert_eq!(parse_set_value("82.5"), 82.5);
        assert_eq!(parse_set_value("82,5"), 82.5);
        assert_eq!(parse_set_value(""), 0.0);
        assert_eq!(parse_set_value("abc"), 0.0);
        assert_eq!(parse_set_value("-3"), 0.0);
        assert_eq!(parse_set_value("NaN"), 0.0);
    }

    #[test]
    fn test_parse_template_entry() {
        assert_eq!(
            parse_template_entry("Press banca:4x10").unwrap(),
            ExerciseTemplate::new("Press banca", 4, 10)
        );
        assert_eq!(parse_template_entry(" Remo ").unwrap(), ExerciseTemplate::new("Remo", 3, 10));
        assert!(parse_template_entry(":4x10").is_err());
        assert!(parse_template_entry("Curl:4").is_err());
        assert!(parse_template_entry("Curl:ax10").is_err());
    }

    #[test]
    fn test_parse_set_entry() {
        assert_eq!(parse_set_entry("1.2=80x10").unwrap(), (0, 1, WorkoutSet::new(80.0, 10)));
        assert_eq!(parse_set_entry("2.1=22,5X8").unwrap(), (1, 0, WorkoutSet::new(22.5, 8)));
        // bodyweight: reps only
        assert_eq!(parse_set_entry("3.3=12").unwrap(), (2, 2, WorkoutSet::new(0.0, 12)));

        assert!(parse_set_entry("1.2").is_err());
        assert!(parse_set_entry("12=80x10").is_err());
        assert!(parse_set_entry("0.1=80x10").is_err());
        assert!(parse_set_entry("1.0=80x10").is_err());
    }

    #[test]
    fn test_parse_set_entry_rejects_bad_reps() {
        assert!(parse_set_entry("1.1=1x99999999999").is_err());
        assert!(parse_set_entry("1.1=80x10001").is_err());
        assert!(parse_set_entry("1.1=80x8.6").is_err());
        assert!(parse_set_entry("1.1=80x-3").is_err());
        assert_eq!(parse_set_entry("1.1=80x").unwrap().2, WorkoutSet::new(80.0, 0));
        assert_eq!(parse_set_entry("1.1=80x10000").unwrap().2, WorkoutSet::new(80.0, MAX_REPS));
    }

    #[test]
    fn test_number_to_index() {
        assert_eq!(number_to_index(1, "Exercise").unwrap(), 0);
        assert_eq!(number_to_index(3, "Exercise").unwrap(), 2);
        assert!(number_to_index(0, "Exercise").is_err());
    }

    #[test]
    fn test_remove_exercise_number_zero_keeps_routine() {
        let mut editor = RoutineEditor::from_saved(&Saved::new(1, sample_routine()));
        let result = number_to_index(0, "Exercise").and_then(|i| editor.remove_exercise(i));
        assert!(result.is_err());
        assert_eq!(editor.routine.exercises.len(), 2);

        let removed = number_to_index(2, "Exercise")
            .and_then(|i| editor.remove_exercise(i))
            .unwrap();
        assert_eq!(removed.name, "Prensa");
    }
}

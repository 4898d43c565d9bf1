use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{Result, ScheduleError};

/// Row limit of a spreadsheet sheet
pub const MAX_SHEET_ROWS: u64 = 1_048_576;
/// Longest column name a sheet uses ("XFD")
pub const MAX_COLUMN_LETTERS: usize = 3;
/// Column A holds the shift labels and cannot host a day
pub const LABEL_COLUMN: &str = "A";

/// Dimensions of the weekly schedule grid.
///
/// One column per day, and each shift takes `max_tutors` rows, starting at
/// `starting_row` (1-based, as in a spreadsheet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub days: Vec<String>,
    pub shifts: Vec<String>,
    pub columns: Vec<String>,
    pub starting_row: u32,
    pub max_tutors: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let to_strings = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            days: to_strings(&["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]),
            shifts: to_strings(&[
                "8-9", "9-10", "10-11", "11-12", "12-1", "1-2", "2-3", "3-4", "4-5", "5-6", "6-7",
                "7-8",
            ]),
            columns: to_strings(&["B", "C", "D", "E", "F", "G"]),
            starting_row: 2,
            max_tutors: 4,
        }
    }
}

impl ScheduleConfig {
    /// Loads a configuration from a JSON file and validates it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ScheduleConfig = serde_json::from_str(&text)?;
        config.validate()?;
        info!(path = %path.as_ref().display(), "Loaded schedule configuration");
        Ok(config)
    }

    /// Checks the invariants the grid layout relies on
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(ScheduleError::InvalidConfig("day list is empty".to_string()));
        }
        if self.shifts.is_empty() {
            return Err(ScheduleError::InvalidConfig("shift list is empty".to_string()));
        }
        if self.columns.len() != self.days.len() {
            return Err(ScheduleError::InvalidConfig(format!(
                "expected one column per day ({} days), got {} columns",
                self.days.len(),
                self.columns.len()
            )));
        }
        if let Some(bad) = self.columns.iter().find(|c| {
            c.is_empty()
                || c.len() > MAX_COLUMN_LETTERS
                || !c.chars().all(|ch| ch.is_ascii_uppercase())
        }) {
            return Err(ScheduleError::InvalidConfig(format!("invalid column letter '{}'", bad)));
        }
        if self.columns.iter().any(|c| c == LABEL_COLUMN) {
            return Err(ScheduleError::InvalidConfig(format!(
                "column {} is reserved for shift labels",
                LABEL_COLUMN
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ScheduleError::InvalidConfig(format!("column '{}' is used by more than one day", dup)));
        }
        if self.max_tutors == 0 {
            return Err(ScheduleError::InvalidConfig("max_tutors must be positive".to_string()));
        }
        if self.starting_row == 0 {
            return Err(ScheduleError::InvalidConfig("starting_row is 1-based".to_string()));
        }

        // last row = starting_row + shifts * max_tutors - 1
        let last_row = (self.shifts.len() as u64)
            .checked_mul(u64::from(self.max_tutors))
            .and_then(|rows| rows.checked_add(u64::from(self.starting_row)))
            .map(|end| end - 1);
        match last_row {
            Some(row) if row <= MAX_SHEET_ROWS => Ok(()),
            _ => Err(ScheduleError::InvalidConfig(format!(
                "grid of {} shifts x {} rows from row {} does not fit in {} rows",
                self.shifts.len(),
                self.max_tutors,
                self.starting_row,
                MAX_SHEET_ROWS
            ))),
        }
    }
}

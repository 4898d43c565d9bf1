use csv::Writer;
use std::path::Path;
use tracing::info;

use crate::availability::{TutorAvailability, Weekday};
use crate::error::Result;
use crate::grid::{column_to_index, GridLayout};

/// Builds the blank schedule sheet as a matrix of cells (row-major, row 1 first).
///
/// The header row above the grid names each day in its column, and column A
/// labels every shift on the first row of its region. Region cells stay empty.
pub fn render_grid_sheet(layout: &GridLayout) -> Vec<Vec<String>> {
    let config = layout.config();
    let width = config
        .columns
        .iter()
        .filter_map(|c| column_to_index(c))
        .max()
        .unwrap_or(0)
        + 1;
    let height = layout.last_row() as usize;
    let mut cells = vec![vec![String::new(); width]; height];

    let header_row = layout.header_row() as usize;
    if header_row > 0 {
        for (day, column) in config.days.iter().zip(&config.columns) {
            if let Some(col) = column_to_index(column) {
                cells[header_row - 1][col] = day.clone();
            }
        }
    }

    for region in layout.generate_all_shift_regions() {
        let first_row = region.cell_range.start_row as usize - 1;
        if cells[first_row][0].is_empty() {
            cells[first_row][0] = region.time.clone();
        }
    }

    cells
}

/// Writes the blank grid sheet, creating the file (and its directory) if missing
pub fn write_grid_to_file<P: AsRef<Path>>(layout: &GridLayout, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut wtr = Writer::from_path(path)?;
    for row in render_grid_sheet(layout) {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), "Wrote schedule grid");
    Ok(())
}

/// Flattens a tutor into sheet columns: profile fields, courses, then one column per day
pub fn tutor_to_record(tutor: &TutorAvailability) -> Vec<String> {
    let mut record = vec![
        tutor.name.clone(),
        tutor.email.clone(),
        tutor.major.clone(),
        tutor.level.clone(),
        tutor.courses.join(" "),
    ];
    record.extend(tutor.shifts.iter().map(|(_, shifts)| shifts.join(", ")));
    record
}

/// Writes the tutor availability sheet, creating the file (and its directory) if missing
pub fn write_tutors_to_file<P: AsRef<Path>>(tutors: &[TutorAvailability], path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut wtr = Writer::from_path(path)?;
    let mut header = vec!["name", "email", "major", "level", "courses"];
    header.extend(Weekday::ALL.iter().map(|day| day.as_str()));
    wtr.write_record(&header)?;

    for tutor in tutors {
        wtr.write_record(tutor_to_record(tutor))?;
    }
    wtr.flush()?;

    info!(path = %path.display(), count = tutors.len(), "Wrote tutor availability");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Logs one summary line per tutor
pub fn print_tutor_summary(tutors: &[TutorAvailability]) {
    info!("=== Tutor Availability ({} tutors) ===", tutors.len());
    for tutor in tutors {
        let days: Vec<String> = tutor
            .shifts
            .iter()
            .filter(|(_, shifts)| !shifts.is_empty())
            .map(|(day, shifts)| format!("{} {}", day, shifts.join("/")))
            .collect();
        let days = if days.is_empty() { "unavailable".to_string() } else { days.join("; ") };
        info!(
            "  {} <{}> [{}] {} shifts: {}",
            tutor.name,
            tutor.email,
            tutor.courses.join(" "),
            tutor.shifts.total_shifts(),
            days
        );
    }
}

use tracing::debug;

use crate::config::ScheduleConfig;
use crate::error::Result;
use super::types::{CellRange, ShiftRegion};

/// Computes cell regions of the weekly grid from a validated configuration
#[derive(Debug, Clone)]
pub struct GridLayout {
    config: ScheduleConfig,
}

impl GridLayout {
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Row of the header line holding the day names (0 when the grid starts on row 1)
    pub fn header_row(&self) -> u32 {
        self.config.starting_row - 1
    }

    /// Last row used by any region
    pub fn last_row(&self) -> u32 {
        self.config.starting_row + self.config.shifts.len() as u32 * self.config.max_tutors - 1
    }

    /// Generates one region per (day, shift), day-major then shift-minor.
    /// Each region spans `max_tutors` rows in the day's column; row numbering
    /// restarts at `starting_row` for every day.
    pub fn generate_all_shift_regions(&self) -> Vec<ShiftRegion> {
        let config = &self.config;
        let mut regions = Vec::with_capacity(config.days.len() * config.shifts.len());

        for (day, column) in config.days.iter().zip(&config.columns) {
            let mut start_row = config.starting_row;
            for time in &config.shifts {
                regions.push(ShiftRegion {
                    day: day.clone(),
                    time: time.clone(),
                    cell_range: CellRange {
                        column: column.clone(),
                        start_row,
                        end_row: start_row + config.max_tutors - 1,
                    },
                });
                start_row += config.max_tutors;
            }
        }

        debug!(count = regions.len(), "Generated shift regions");
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn reference_layout() -> GridLayout {
        GridLayout::new(ScheduleConfig::default()).unwrap()
    }

    #[test]
    fn generates_days_times_shifts_regions() {
        let regions = reference_layout().generate_all_shift_regions();
        assert_eq!(regions.len(), 72);
    }

    #[test]
    fn first_regions_match_reference_rows() {
        let regions = reference_layout().generate_all_shift_regions();

        assert_eq!(regions[0].day, "Sunday");
        assert_eq!(regions[0].time, "8-9");
        assert_eq!((regions[0].cell_range.start_row, regions[0].cell_range.end_row), (2, 5));
        assert_eq!(regions[0].cell_range.to_string(), "B2:B5");

        assert_eq!(regions[1].day, "Sunday");
        assert_eq!((regions[1].cell_range.start_row, regions[1].cell_range.end_row), (6, 9));

        // first region of day 1: same rows, next column
        assert_eq!(regions[12].day, "Monday");
        assert_eq!(regions[12].cell_range.to_string(), "C2:C5");
    }

    #[test]
    fn regions_are_day_major_shift_minor() {
        let layout = reference_layout();
        let config = layout.config().clone();
        let regions = layout.generate_all_shift_regions();

        let mut expected = Vec::new();
        for day in &config.days {
            for shift in &config.shifts {
                expected.push((day.clone(), shift.clone()));
            }
        }
        let actual: Vec<(String, String)> =
            regions.iter().map(|r| (r.day.clone(), r.time.clone())).collect();
        assert_eq!(actual, expected);
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn assert_disjoint_regions(config: ScheduleConfig) {
        let expected_rows = config.max_tutors;
        let expected_len = config.days.len() * config.shifts.len();
        let regions = GridLayout::new(config).unwrap().generate_all_shift_regions();

        assert_eq!(regions.len(), expected_len);
        for (i, a) in regions.iter().enumerate() {
            assert_eq!(a.cell_range.row_count(), expected_rows);
            for b in &regions[i + 1..] {
                let overlaps = a.cell_range.column == b.cell_range.column
                    && a.cell_range.start_row <= b.cell_range.end_row
                    && b.cell_range.start_row <= a.cell_range.end_row;
                assert!(!overlaps, "{} overlaps {}", a.cell_range, b.cell_range);
            }
        }
        let distinct: HashSet<String> = regions.iter().map(|r| r.cell_range.to_string()).collect();
        assert_eq!(distinct.len(), regions.len());
    }

    #[test]
    fn regions_never_overlap_and_span_max_tutors() {
        assert_disjoint_regions(ScheduleConfig::default());
    }

    #[test]
    fn regions_never_overlap_for_other_configurations() {
        assert_disjoint_regions(ScheduleConfig {
            days: strings(&["Monday", "Tuesday"]),
            shifts: strings(&["9-10", "10-11", "11-12"]),
            columns: strings(&["D", "AA"]),
            starting_row: 1,
            max_tutors: 2,
        });
        assert_disjoint_regions(ScheduleConfig {
            days: strings(&["Friday"]),
            shifts: strings(&["12-1"]),
            columns: strings(&["XFD"]),
            starting_row: 10,
            max_tutors: 1,
        });
        assert_disjoint_regions(ScheduleConfig {
            columns: strings(&["G", "F", "E", "D", "C", "B"]),
            starting_row: 7,
            max_tutors: 9,
            ..ScheduleConfig::default()
        });
        assert_disjoint_regions(ScheduleConfig {
            starting_row: 5,
            max_tutors: 87_381,
            ..ScheduleConfig::default()
        });
    }

    #[test]
    fn configurations_that_would_overlap_are_rejected() {
        let shared_column = ScheduleConfig { columns: strings(&["B"; 6]), ..ScheduleConfig::default() };
        assert!(GridLayout::new(shared_column).is_err());

        let mut label_column = ScheduleConfig::default();
        label_column.columns[0] = "A".to_string();
        assert!(GridLayout::new(label_column).is_err());

        let wrapping_rows = ScheduleConfig { max_tutors: u32::MAX / 2, ..ScheduleConfig::default() };
        assert!(GridLayout::new(wrapping_rows).is_err());

        let wrapping_start = ScheduleConfig { starting_row: u32::MAX, ..ScheduleConfig::default() };
        assert!(GridLayout::new(wrapping_start).is_err());
    }

    #[test]
    fn smaller_configuration_is_respected() {
        let config = ScheduleConfig {
            days: vec!["Monday".to_string(), "Tuesday".to_string()],
            shifts: vec!["9-10".to_string(), "10-11".to_string(), "11-12".to_string()],
            columns: vec!["D".to_string(), "AA".to_string()],
            starting_row: 1,
            max_tutors: 2,
        };
        let layout = GridLayout::new(config).unwrap();
        let regions = layout.generate_all_shift_regions();

        assert_eq!(regions.len(), 6);
        assert_eq!(regions[2].cell_range.to_string(), "D5:D6");
        assert_eq!(regions[3].cell_range.to_string(), "AA1:AA2");
        assert_eq!(layout.header_row(), 0);
        assert_eq!(layout.last_row(), 6);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = ScheduleConfig { shifts: Vec::new(), ..ScheduleConfig::default() };
        assert!(GridLayout::new(config).is_err());
    }

    #[test]
    fn generation_is_repeatable() {
        let layout = reference_layout();
        assert_eq!(layout.generate_all_shift_regions(), layout.generate_all_shift_regions());
    }
}

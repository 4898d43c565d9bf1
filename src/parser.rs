use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::availability::SURVEY_FIELD_COUNT;
use crate::error::Result;

/// Column A of the response sheet holds the form timestamp; profile fields start at B
const FIRST_FIELD_COLUMN: usize = 1;

/// Loads raw survey rows (profile column B onward) from an exported response sheet
pub fn load_survey_rows<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Vec<String>>> {
    let file = std::fs::File::open(csv_path.as_ref())?;
    info!(path = %csv_path.as_ref().display(), "Loading survey responses");
    parse_survey_csv(file)
}

/// Reads survey rows from CSV data. The first line is the header; data rows
/// follow until the last populated row. Short rows are kept as they are.
pub fn parse_survey_csv<R: Read>(input: R) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // header is sheet row 1
        let sheet_row = index + 2;

        let fields: Vec<String> = record
            .iter()
            .skip(FIRST_FIELD_COLUMN)
            .map(str::to_string)
            .collect();

        if fields.iter().all(|f| f.trim().is_empty()) {
            debug!(sheet_row, "Skipping blank row");
            continue;
        }
        if fields.len() < SURVEY_FIELD_COUNT {
            warn!(
                sheet_row,
                found = fields.len(),
                expected = SURVEY_FIELD_COUNT,
                "Short survey row, missing fields are treated as empty"
            );
        }
        rows.push(fields);
    }

    if rows.is_empty() {
        info!("No respondent rows found");
    } else {
        info!(count = rows.len(), "Loaded survey rows");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::{parse_all_respondents, SurveyRow};

    const HEADER: &str = "Timestamp,Name,Email,Major,Level,Courses,Sunday,Monday,Tuesday,Wednesday,Thursday,Friday,Comments,Monday (group),Tuesday (group),Wednesday (group),Thursday (group)\n";

    #[test]
    fn parses_named_fields_skipping_timestamp() {
        let data = format!(
            "{}{}",
            HEADER,
            "10/1/2026 9:00:00,Ada Lovelace,ada@example.edu,Mathematics,Senior,MATH101 CS201,\"9-10 AM\",\"10-11 AM\",,,,\"1-2 PM, 2-3 PM\",,\"2-3 PM\",,,\"4-5 PM\"\n"
        );
        let rows = parse_survey_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), SURVEY_FIELD_COUNT);
        let (row, missing) = SurveyRow::decode(&rows[0]);
        assert!(missing.is_empty());
        assert_eq!(row.name, "Ada Lovelace");
        assert_eq!(row.courses, "MATH101 CS201");
        assert_eq!(row.sunday, "9-10 AM");
        assert_eq!(row.monday, "10-11 AM");
        assert_eq!(row.friday, "1-2 PM, 2-3 PM");
        assert_eq!(row.monday_group, "2-3 PM");
        assert_eq!(row.thursday_group, "4-5 PM");
    }

    #[test]
    fn skips_blank_rows() {
        let data = format!(
            "{}{}{}",
            HEADER,
            ",,,,,,,,,,,,,,,,\n",
            "10/1/2026 9:00:00,Grace Hopper,grace@example.edu,CS,Junior,CS101,,,,,,,,,,,\n"
        );
        let rows = parse_survey_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Grace Hopper");
    }

    #[test]
    fn accepts_short_rows() {
        let data = format!("{}{}", HEADER, "10/1/2026 9:00:00,Alan Turing,alan@example.edu\n");
        let rows = parse_survey_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["Alan Turing", "alan@example.edu"]);

        let tutors = parse_all_respondents(&rows);
        assert_eq!(tutors[0].email, "alan@example.edu");
        assert!(tutors[0].courses.is_empty());
    }

    #[test]
    fn header_only_yields_no_rows() {
        let rows = parse_survey_csv(HEADER.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join("tutor_schedule_parser_test.csv");
        let data = format!("{}{}", HEADER, "t,Ada,ada@example.edu,Math,Senior,MATH101,9-10 AM,,,,,,,,,,\n");
        std::fs::write(&path, data).unwrap();

        let rows = load_survey_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][5], "9-10 AM");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("tutor_schedule_does_not_exist.csv");
        assert!(load_survey_rows(&path).is_err());
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Days the tutoring center is open. Saturday has no survey field and is never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shift labels a tutor can work, per day. Every day is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyShifts {
    pub sunday: Vec<String>,
    pub monday: Vec<String>,
    pub tuesday: Vec<String>,
    pub wednesday: Vec<String>,
    pub thursday: Vec<String>,
    pub friday: Vec<String>,
}

impl WeeklyShifts {
    pub fn get(&self, day: Weekday) -> &[String] {
        match day {
            Weekday::Sunday => &self.sunday,
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
        }
    }

    fn get_mut(&mut self, day: Weekday) -> &mut Vec<String> {
        match day {
            Weekday::Sunday => &mut self.sunday,
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
        }
    }

    /// Iterates days in Sunday..Friday order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[String])> + '_ {
        Weekday::ALL.into_iter().map(move |day| (day, self.get(day)))
    }

    pub fn total_shifts(&self) -> usize {
        self.iter().map(|(_, shifts)| shifts.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorAvailability {
    pub name: String,
    pub email: String,
    pub major: String,
    pub level: String,
    pub courses: Vec<String>,
    pub shifts: WeeklyShifts,
}

/// One survey response decoded from its fixed column layout.
///
/// Monday to Thursday are asked twice on the form (individual and group
/// tutoring); Sunday and Friday only once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyRow {
    pub name: String,
    pub email: String,
    pub major: String,
    pub level: String,
    pub courses: String,
    pub sunday: String,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub monday_group: String,
    pub tuesday_group: String,
    pub wednesday_group: String,
    pub thursday_group: String,
}

/// Position of each field in a raw row, starting at the first profile column.
/// Position 11 is an unused form column between Friday and the group answers.
const NAME: usize = 0;
const EMAIL: usize = 1;
const MAJOR: usize = 2;
const LEVEL: usize = 3;
const COURSES: usize = 4;
const SUNDAY: usize = 5;
const MONDAY: usize = 6;
const TUESDAY: usize = 7;
const WEDNESDAY: usize = 8;
const THURSDAY: usize = 9;
const FRIDAY: usize = 10;
const MONDAY_GROUP: usize = 12;
const TUESDAY_GROUP: usize = 13;
const WEDNESDAY_GROUP: usize = 14;
const THURSDAY_GROUP: usize = 15;

/// Number of raw fields in a complete row, gap included
pub const SURVEY_FIELD_COUNT: usize = 16;

impl SurveyRow {
    /// Decodes raw fields by position. Fields past the end of `fields` decode
    /// as empty strings and their names are returned alongside the row.
    pub fn decode<S: AsRef<str>>(fields: &[S]) -> (SurveyRow, Vec<&'static str>) {
        let mut missing = Vec::new();
        let mut field = |index: usize, name: &'static str| match fields.get(index) {
            Some(value) => value.as_ref().to_string(),
            None => {
                missing.push(name);
                String::new()
            }
        };

        let row = SurveyRow {
            name: field(NAME, "name"),
            email: field(EMAIL, "email"),
            major: field(MAJOR, "major"),
            level: field(LEVEL, "level"),
            courses: field(COURSES, "courses"),
            sunday: field(SUNDAY, "sunday"),
            monday: field(MONDAY, "monday"),
            tuesday: field(TUESDAY, "tuesday"),
            wednesday: field(WEDNESDAY, "wednesday"),
            thursday: field(THURSDAY, "thursday"),
            friday: field(FRIDAY, "friday"),
            monday_group: field(MONDAY_GROUP, "monday_group"),
            tuesday_group: field(TUESDAY_GROUP, "tuesday_group"),
            wednesday_group: field(WEDNESDAY_GROUP, "wednesday_group"),
            thursday_group: field(THURSDAY_GROUP, "thursday_group"),
        };
        (row, missing)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Combines individual and group hours for one day, individual first.
/// Overlapping hours are kept as-is.
pub fn merge_day_hours(individual: Option<&str>, group: Option<&str>) -> String {
    match (individual, group) {
        (i, g) if is_blank(i) && is_blank(g) => String::new(),
        (Some(i), g) if is_blank(g) => i.to_string(),
        (i, Some(g)) if is_blank(i) => g.to_string(),
        (Some(i), Some(g)) => format!("{}, {}", i, g),
        _ => String::new(),
    }
}

/// Splits "9-10 AM, 10-11 AM" into ["9-10", "10-11"], dropping whatever
/// follows the first space of each entry.
pub fn normalize_shift_list(raw_field: &str) -> Vec<String> {
    if raw_field.is_empty() {
        return Vec::new();
    }
    raw_field
        .split(", ")
        .map(|entry| entry.split(' ').next().unwrap_or(entry).to_string())
        .collect()
}

/// Builds a tutor record from one decoded survey row
pub fn build_tutor_availability(row: &SurveyRow) -> TutorAvailability {
    let courses = row.courses.split_whitespace().map(str::to_string).collect();

    let weekday_hours = [
        (Weekday::Monday, &row.monday, &row.monday_group),
        (Weekday::Tuesday, &row.tuesday, &row.tuesday_group),
        (Weekday::Wednesday, &row.wednesday, &row.wednesday_group),
        (Weekday::Thursday, &row.thursday, &row.thursday_group),
    ];
    let mut merged: Vec<(Weekday, String)> = weekday_hours
        .iter()
        .map(|(day, individual, group)| {
            (*day, merge_day_hours(Some(individual.as_str()), Some(group.as_str())))
        })
        .collect();
    merged.push((Weekday::Friday, row.friday.clone()));
    merged.insert(0, (Weekday::Sunday, row.sunday.clone()));

    let mut shifts = WeeklyShifts::default();
    for (day, hours) in merged {
        *shifts.get_mut(day) = if hours.trim().is_empty() {
            Vec::new()
        } else {
            normalize_shift_list(&hours)
        };
    }

    TutorAvailability {
        name: row.name.clone(),
        email: row.email.clone(),
        major: row.major.clone(),
        level: row.level.clone(),
        courses,
        shifts,
    }
}

/// Decodes and builds every raw row in order. Rows with missing trailing
/// fields are still built, with those fields left empty.
pub fn parse_all_respondents<S: AsRef<str>>(rows: &[Vec<S>]) -> Vec<TutorAvailability> {
    if rows.is_empty() {
        info!("No respondent rows found");
        return Vec::new();
    }

    rows.iter()
        .enumerate()
        .map(|(index, fields)| {
            let (row, missing) = SurveyRow::decode(fields);
            if !missing.is_empty() {
                warn!(row = index + 1, missing = ?missing, "Survey row is missing fields");
            }
            build_tutor_availability(&row)
        })
        .collect()
}

use crate::model::{Gender, Student, StudentId, Trip, TripId};
use eyre::{Error, WrapErr, bail, ensure};
use std::collections::HashSet;
use tracing::{debug, warn};

pub use self::csv_loader::CsvLoader;
pub use self::loader::Loader;
pub use self::table::Table;
pub use self::workbook_loader::WorkbookLoader;

mod csv_loader;
mod loader;
mod table;
mod workbook_loader;

const TRIP: &str = "Trip";
const CATEGORY: &str = "Category";
const SUBCATEGORY: &str = "Subcategory";
const CAPACITY: &str = "Capacity";

const FIRST_NAME: &str = "First Name";
const LAST_NAME: &str = "Last Name";
const ID_NUMBER: &str = "Colby ID Number";
const GENDER: &str = "Gender";
const POC: &str = "POC";
const DORM: &str = "Dorm";
const TEAM: &str = "Team";
/// POC value flagging a protected-class student.
const PROTECTED_CLASS: &str = "Yes";
const STUDENT_COLUMNS: [&str; 7] = [FIRST_NAME, LAST_NAME, ID_NUMBER, GENDER, POC, DORM, TEAM];

/// How student rows are interpreted.
#[derive(Clone, Debug)]
pub struct Format {
    /// Preference column labels are cut after the last occurrence of this
    /// separator to get the subcategory name.
    pub separator: String,
    /// Team marker meaning "no team", also used for empty team cells.
    pub no_team: String,
}

fn parse_capacity(cell: &str) -> Option<u32> {
    cell.parse::<u32>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|c| c.fract() == 0.0 && *c >= 0.0 && *c <= f64::from(u32::MAX))
            .map(|c| c as u32)
    })
}

pub fn parse_trips(table: &Table) -> Result<Vec<Trip>, Error> {
    let name = table.column(TRIP)?;
    let category = table.column(CATEGORY)?;
    let subcategory = table.column(SUBCATEGORY)?;
    let capacity_column = table.column(CAPACITY)?;
    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let cell = table.cell(row, capacity_column);
            let Some(capacity) = parse_capacity(cell) else {
                bail!(
                    "invalid capacity \"{cell}\" in {} row {}",
                    table.name,
                    idx + 2
                );
            };
            Ok(Trip {
                id: TripId(idx),
                name: table.cell(row, name).to_owned(),
                category: table.cell(row, category).to_owned(),
                subcategory: table.cell(row, subcategory).to_owned(),
                capacity,
            })
        })
        .collect()
}

/// Ranked subcategory names of a student row: non-empty scores, sorted by
/// decreasing score, ties keeping the column order.
fn preferences(
    table: &Table,
    row: &[String],
    columns: &[(usize, String)],
    row_number: usize,
) -> Result<Vec<String>, Error> {
    let mut seen = HashSet::new();
    let mut scores = Vec::new();
    for (column, subcategory) in columns {
        let cell = table.cell(row, *column);
        if cell.is_empty() {
            continue;
        }
        let score = cell.parse::<f64>().wrap_err_with(|| {
            format!(
                "invalid score \"{cell}\" for {subcategory} in {} row {row_number}",
                table.name
            )
        })?;
        if score.is_nan() {
            continue;
        }
        if !seen.insert(subcategory) {
            warn!(
                row = row_number,
                subcategory = %subcategory,
                "Duplicated preference column, keeping the first one",
            );
            continue;
        }
        scores.push((subcategory.clone(), score));
    }
    scores.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    Ok(scores.into_iter().map(|(s, _)| s).collect())
}

pub fn parse_students(table: &Table, format: &Format) -> Result<Vec<Student>, Error> {
    let first_name = table.column(FIRST_NAME)?;
    let last_name = table.column(LAST_NAME)?;
    let id_number = table.column(ID_NUMBER)?;
    let gender = table.column(GENDER)?;
    let poc = table.column(POC)?;
    let dorm = table.column(DORM)?;
    let team = table.column(TEAM)?;
    let preference_columns = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.is_empty() && !STUDENT_COLUMNS.contains(&h.as_str()))
        .map(|(idx, h)| {
            let subcategory = h.rsplit(format.separator.as_str()).next().unwrap_or(h);
            (idx, subcategory.trim().to_owned())
        })
        .collect::<Vec<_>>();
    debug!(
        columns = preference_columns.len(),
        "Found preference columns"
    );
    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let row_number = idx + 2;
            let gender_cell = table.cell(row, gender);
            let gender = gender_cell.parse::<Gender>()?;
            if gender == Gender::Other && gender_cell != "Other" {
                warn!(
                    row = row_number,
                    gender = gender_cell,
                    "Unknown gender, counting it as Other",
                );
            }
            let team = match table.cell(row, team) {
                "" => format.no_team.clone(),
                team => team.to_owned(),
            };
            Ok(Student {
                id: StudentId(idx),
                first_name: table.cell(row, first_name).to_owned(),
                last_name: table.cell(row, last_name).to_owned(),
                id_number: table.cell(row, id_number).to_owned(),
                preferences: preferences(table, row, &preference_columns, row_number)?,
                gender,
                poc: table.cell(row, poc).to_owned(),
                protected_class: table.cell(row, poc) == PROTECTED_CLASS,
                dorm: table.cell(row, dorm).to_owned(),
                team,
            })
        })
        .collect()
}

/// Warn about students whose preferences name a subcategory no trip offers.
pub fn check_preferences(students: &[Student], trips: &[Trip]) {
    let offered = trips
        .iter()
        .map(|t| t.subcategory.as_str())
        .collect::<HashSet<_>>();
    for student in students {
        for subcategory in &student.preferences {
            if !offered.contains(subcategory.as_str()) {
                warn!(
                    student = %student,
                    subcategory = %subcategory,
                    "Preference for a subcategory without any trip",
                );
            }
        }
        if !student.has_preferences() {
            warn!(student = %student, "Student has not expressed any preference");
        }
    }
}

/// Turn both tables into records, failing on the first malformed row.
pub fn build(
    trip_table: &Table,
    student_table: &Table,
    format: &Format,
) -> Result<(Vec<Student>, Vec<Trip>), Error> {
    let trips = parse_trips(trip_table).wrap_err("cannot load trips")?;
    let students = parse_students(student_table, format).wrap_err("cannot load students")?;
    let mut ids = HashSet::new();
    for student in &students {
        ensure!(
            student.id_number.is_empty() || ids.insert(&student.id_number),
            "duplicated student id {}",
            student.id_number
        );
    }
    check_preferences(&students, &trips);
    Ok((students, trips))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|&c| c.to_owned()).collect()
    }

    fn format() -> Format {
        Format {
            separator: " - ".to_owned(),
            no_team: "N".to_owned(),
        }
    }

    fn trip_table() -> Table {
        Table::new(
            "Trip Sheet",
            strings(&["Trip", "Category", "Subcategory", "Capacity"]),
            vec![
                strings(&["Canoe 1", "Water", "Canoeing", "8"]),
                strings(&["Hike 1", "Land", "Hiking", "10.0"]),
            ],
        )
    }

    fn student_table(rows: Vec<Vec<String>>) -> Table {
        Table::new(
            "Student Sheet",
            strings(&[
                "First Name",
                "Last Name",
                "Colby ID Number",
                "Gender",
                "POC",
                "Dorm",
                "Team",
                "Rank your choices - Canoeing",
                "Rank your choices - Hiking",
                "Farming",
            ]),
            rows,
        )
    }

    #[test]
    fn test_parse_trips() {
        let trips = parse_trips(&trip_table()).unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].name, "Canoe 1");
        assert_eq!(trips[0].category, "Water");
        assert_eq!(trips[0].subcategory, "Canoeing");
        assert_eq!(trips[0].capacity, 8);
        assert_eq!(trips[1].capacity, 10);
        assert_eq!(trips[1].id, TripId(1));
    }

    #[test]
    fn test_invalid_capacity() {
        for capacity in ["eight", "-1", "2.5", ""] {
            let table = Table::new(
                "Trip Sheet",
                strings(&["Trip", "Category", "Subcategory", "Capacity"]),
                vec![strings(&["Canoe 1", "Water", "Canoeing", capacity])],
            );
            assert!(parse_trips(&table).is_err(), "capacity {capacity:?}");
        }
    }

    #[test]
    fn test_missing_trip_column() {
        let table = Table::new(
            "Trip Sheet",
            strings(&["Trip", "Category", "Capacity"]),
            vec![strings(&["Canoe 1", "Water", "8"])],
        );
        let err = parse_trips(&table).unwrap_err();
        assert!(err.to_string().contains("Subcategory"));
    }

    #[test]
    fn test_parse_students() {
        let table = student_table(vec![
            strings(&[
                "Ada", "Lovelace", "1001", "F", "Yes", "Dana", "", "2", "5", "",
            ]),
            strings(&[
                "Alan", "Turing", "1002", "M", "No", "Piper", "Ski", "3", "3", "4",
            ]),
        ]);
        let students = parse_students(&table, &format()).unwrap();
        assert_eq!(students.len(), 2);
        let ada = &students[0];
        assert_eq!(ada.name(), "Ada Lovelace");
        assert_eq!(ada.id_number, "1001");
        assert_eq!(ada.gender, Gender::F);
        assert!(ada.protected_class);
        assert_eq!(ada.team, "N");
        assert_eq!(ada.preferences, vec!["Hiking", "Canoeing"]);
        let alan = &students[1];
        assert_eq!(alan.id, StudentId(1));
        assert!(!alan.protected_class);
        assert_eq!(alan.team, "Ski");
        // Ties keep the column order.
        assert_eq!(alan.preferences, vec!["Farming", "Canoeing", "Hiking"]);
    }

    #[test]
    fn test_poc_kept_verbatim() {
        let table = student_table(vec![
            strings(&["Ada", "L", "1001", "F", "yes", "Dana", "N", "1", "", ""]),
            strings(&["Alan", "T", "1002", "M", "Prefer not to say", "Piper", "N", "1", "", ""]),
            strings(&["Grace", "H", "1003", "F", "Yes", "Coburn", "N", "1", "", ""]),
        ]);
        let students = parse_students(&table, &format()).unwrap();
        assert!(!students[0].protected_class);
        assert_eq!(students[0].poc, "yes");
        assert!(!students[1].protected_class);
        assert_eq!(students[1].poc, "Prefer not to say");
        assert!(students[2].protected_class);
    }

    #[test]
    fn test_blank_dorms_share_a_trip() {
        use crate::algos::{Algo, Greedy};
        use crate::config::ChecksConfig;
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let table = student_table(vec![
            strings(&["Ada", "L", "1001", "F", "No", "", "N", "1", "", ""]),
            strings(&["Alan", "T", "1002", "M", "No", "", "N", "1", "", ""]),
        ]);
        let students = parse_students(&table, &format()).unwrap();
        assert_eq!(students[0].dorm, "");
        let trips = vec![Trip {
            id: TripId(0),
            name: "Canoe 1".to_owned(),
            category: "Water".to_owned(),
            subcategory: "Canoeing".to_owned(),
            capacity: 10,
        }];
        let config = ChecksConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut algo = Greedy::new(&students, &trips, &config, &mut rng);
        algo.assign();
        let (a, ranks) = algo.into_parts();
        assert!(a.unassigned_students().is_empty());
        assert_eq!(a.students_for(TripId(0)).len(), 2);
        assert_eq!(ranks.total(), 2);
    }

    #[test]
    fn test_invalid_score() {
        let table = student_table(vec![strings(&[
            "Ada", "Lovelace", "1001", "F", "Yes", "Dana", "N", "two", "", "",
        ])]);
        assert!(parse_students(&table, &format()).is_err());
    }

    #[test]
    fn test_missing_student_column() {
        let table = Table::new(
            "Student Sheet",
            strings(&["First Name", "Last Name", "Gender"]),
            Vec::new(),
        );
        let err = parse_students(&table, &format()).unwrap_err();
        assert!(err.to_string().contains("Colby ID Number"));
    }

    #[test]
    fn test_build_rejects_duplicated_ids() {
        let table = student_table(vec![
            strings(&["Ada", "L", "1001", "F", "No", "Dana", "N", "1", "", ""]),
            strings(&["Alan", "T", "1001", "M", "No", "Piper", "N", "1", "", ""]),
        ]);
        assert!(build(&trip_table(), &table, &format()).is_err());
    }

    #[test]
    fn test_build() {
        let table = student_table(vec![strings(&[
            "Ada", "L", "1001", "F", "No", "Dana", "N", "1", "", "",
        ])]);
        let (students, trips) = build(&trip_table(), &table, &format()).unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(trips.len(), 2);
    }
}

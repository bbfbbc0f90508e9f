use crate::config::OutputConfig;
use crate::model::{Assignments, StudentId};
use eyre::{Error, WrapErr};
use serde::Serialize;
use std::io::Write;
use tracing::info;

const TRIP_HEADERS: [&str; 5] = [
    "Name",
    "Category",
    "Subcategory",
    "Capacity",
    "Assigned Students",
];

const STUDENT_HEADERS: [&str; 9] = [
    "First Name",
    "Last Name",
    "ID Number",
    "Preferences",
    "Gender",
    "POC",
    "Dorm",
    "Team",
    "Assigned Trip",
];

/// A CSV writer whose header row is written even for empty tables.
fn table_writer<W: Write>(writer: W, headers: &[&str]) -> Result<csv::Writer<W>, Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(headers)?;
    Ok(writer)
}

#[derive(Debug, Serialize)]
struct TripRow<'a> {
    name: &'a str,
    category: &'a str,
    subcategory: &'a str,
    capacity: u32,
    assigned_students: String,
}

#[derive(Debug, Serialize)]
struct StudentRow<'a> {
    first_name: &'a str,
    last_name: &'a str,
    id_number: &'a str,
    preferences: String,
    gender: String,
    poc: &'a str,
    dorm: &'a str,
    team: &'a str,
    assigned_trip: &'a str,
}

/// Trips in catalog order, with their remaining capacity and the ids of
/// their students in assignment order.
pub fn write_trips<W: Write>(writer: W, a: &Assignments) -> Result<(), Error> {
    let mut writer = table_writer(writer, &TRIP_HEADERS)?;
    for t in a.all_trips() {
        let trip = a.trip(t);
        writer.serialize(TripRow {
            name: &trip.name,
            category: &trip.category,
            subcategory: &trip.subcategory,
            capacity: a.remaining_capacity(t),
            assigned_students: a
                .students_for(t)
                .iter()
                .map(|&s| a.student(s).id_number.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_students<W: Write>(
    writer: W,
    a: &Assignments,
    students: &[StudentId],
) -> Result<(), Error> {
    let mut writer = table_writer(writer, &STUDENT_HEADERS)?;
    for &s in students {
        let student = a.student(s);
        writer.serialize(StudentRow {
            first_name: &student.first_name,
            last_name: &student.last_name,
            id_number: &student.id_number,
            preferences: student.preferences_str(),
            gender: student.gender.to_string(),
            poc: &student.poc,
            dorm: &student.dorm,
            team: &student.team,
            assigned_trip: a.trip_for(s).map_or("", |t| a.trip(t).name.as_str()),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the three result tables of the selected trial.
pub fn save(config: &OutputConfig, a: &Assignments) -> Result<(), Error> {
    std::fs::create_dir_all(&config.directory).wrap_err_with(|| {
        format!(
            "cannot create output directory {}",
            config.directory.display()
        )
    })?;
    let create = |name: &str| {
        let path = config.directory.join(name);
        std::fs::File::create(&path)
            .wrap_err_with(|| format!("cannot create {}", path.display()))
    };
    write_trips(create(config.trips_file.as_str())?, a).wrap_err("cannot save trips")?;
    write_students(create(config.assigned_file.as_str())?, a, a.assigned_students())
        .wrap_err("cannot save assigned students")?;
    write_students(
        create(config.unassigned_file.as_str())?,
        a,
        &a.unassigned_students(),
    )
    .wrap_err("cannot save unassigned students")?;
    info!(directory = %config.directory.display(), "Results saved");
    Ok(())
}

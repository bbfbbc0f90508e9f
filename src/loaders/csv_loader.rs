use super::{Format, Loader, Table};
use crate::model::{Student, Trip};
use eyre::{Error, WrapErr};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load trips and students from two CSV files with header rows.
pub struct CsvLoader {
    trips: PathBuf,
    students: PathBuf,
    format: Format,
}

impl CsvLoader {
    pub fn new(trips: PathBuf, students: PathBuf, format: Format) -> CsvLoader {
        CsvLoader {
            trips,
            students,
            format,
        }
    }

    fn read_file(path: &Path) -> Result<Table, Error> {
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("cannot open {}", path.display()))?;
        read_table(&path.display().to_string(), file)
    }
}

/// Read a CSV document whose first record is the header row. Records may
/// be shorter than the header.
pub fn read_table<R: Read>(name: &str, reader: R) -> Result<Table, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = reader
        .headers()
        .wrap_err_with(|| format!("cannot read header row of {name}"))?
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|record| Ok(record?.iter().map(String::from).collect::<Vec<_>>()))
        .collect::<Result<Vec<_>, csv::Error>>()
        .wrap_err_with(|| format!("cannot read {name}"))?;
    Ok(Table::new(name, headers, rows))
}

impl Loader for CsvLoader {
    fn load(&mut self) -> Result<(Vec<Student>, Vec<Trip>), Error> {
        let trips = Self::read_file(&self.trips)?;
        let students = Self::read_file(&self.students)?;
        info!(
            trips = %self.trips.display(),
            students = %self.students.display(),
            "Loading CSV files",
        );
        super::build(&trips, &students, &self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_table() {
        let data = "\
Trip,Category,Subcategory,Capacity
Canoe 1,Water,Canoeing,8
\"Hike, long\",Land,Hiking
";
        let table = read_table("trips.csv", data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Trip", "Category", "Subcategory", "Capacity"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], "Hike, long");
        assert_eq!(table.cell(&table.rows[1], 3), "");
    }

    #[test]
    fn test_load_files() {
        let dir = std::env::temp_dir().join(format!("tripsolver-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let trips = dir.join("trips.csv");
        let students = dir.join("students.csv");
        std::fs::write(
            &trips,
            "Trip,Category,Subcategory,Capacity\nCanoe 1,Water,Canoeing,8\nHike 1,Land,Hiking,6\n",
        )
        .unwrap();
        std::fs::write(
            &students,
            "First Name,Last Name,Colby ID Number,Gender,POC,Dorm,Team,Q - Canoeing,Q - Hiking\n\
             Ada,Lovelace,1001,F,No,Dana,N,1,2\n",
        )
        .unwrap();
        let mut loader = CsvLoader::new(
            trips,
            students,
            Format {
                separator: " - ".to_owned(),
                no_team: "N".to_owned(),
            },
        );
        let (students, trips) = loader.load().unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(students[0].preferences, vec!["Hiking", "Canoeing"]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let mut loader = CsvLoader::new(
            PathBuf::from("/nonexistent/trips.csv"),
            PathBuf::from("/nonexistent/students.csv"),
            Format {
                separator: " - ".to_owned(),
                no_team: "N".to_owned(),
            },
        );
        assert!(loader.load().is_err());
    }
}

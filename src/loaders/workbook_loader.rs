use super::{Format, Loader, Table};
use crate::model::{Student, Trip};
use calamine::{Data, Reader, open_workbook_auto};
use eyre::{Error, WrapErr, eyre};
use std::path::PathBuf;
use tracing::info;

/// Load trips and students from two sheets of a spreadsheet workbook
/// (xlsx, xls or ods).
pub struct WorkbookLoader {
    path: PathBuf,
    trip_sheet: String,
    student_sheet: String,
    format: Format,
}

impl WorkbookLoader {
    pub fn new(
        path: PathBuf,
        trip_sheet: String,
        student_sheet: String,
        format: Format,
    ) -> WorkbookLoader {
        WorkbookLoader {
            path,
            trip_sheet,
            student_sheet,
            format,
        }
    }
}

/// Integral numbers are rendered without a fractional part, so that ids and
/// capacities stored as floats read back as written.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_owned(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

pub fn range_to_table(name: &str, rows: &[Vec<Data>]) -> Result<Table, Error> {
    let (headers, rows) = rows
        .split_first()
        .ok_or_else(|| eyre!("sheet {name} is empty"))?;
    Ok(Table::new(
        name,
        headers.iter().map(cell_to_string).collect(),
        rows.iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect(),
    ))
}

impl Loader for WorkbookLoader {
    fn load(&mut self) -> Result<(Vec<Student>, Vec<Trip>), Error> {
        info!(workbook = %self.path.display(), "Loading workbook");
        let mut workbook = open_workbook_auto(&self.path)
            .wrap_err_with(|| format!("cannot open workbook {}", self.path.display()))?;
        let mut sheet = |name: &str| -> Result<Table, Error> {
            let range = workbook
                .worksheet_range(name)
                .wrap_err_with(|| format!("cannot read sheet {name}"))?;
            let rows = range.rows().map(<[Data]>::to_vec).collect::<Vec<_>>();
            range_to_table(name, &rows)
        };
        let trips = sheet(self.trip_sheet.as_str())?;
        let students = sheet(self.student_sheet.as_str())?;
        super::build(&trips, &students, &self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(8.0)), "8");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Int(1234567)), "1234567");
        assert_eq!(cell_to_string(&Data::String(" Yes ".to_owned())), "Yes");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_range_to_table() {
        let rows = vec![
            vec![
                Data::String("Trip".to_owned()),
                Data::String("Category".to_owned()),
                Data::String("Subcategory".to_owned()),
                Data::String("Capacity".to_owned()),
            ],
            vec![
                Data::String("Canoe 1".to_owned()),
                Data::String("Water".to_owned()),
                Data::String("Canoeing".to_owned()),
                Data::Float(8.0),
            ],
            vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty],
        ];
        let table = range_to_table("Trip Sheet", &rows).unwrap();
        assert_eq!(table.rows.len(), 1);
        let trips = super::super::parse_trips(&table).unwrap();
        assert_eq!(trips[0].capacity, 8);
        assert!(range_to_table("Trip Sheet", &[]).is_err());
    }
}

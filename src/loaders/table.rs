use eyre::{Error, eyre};

/// A sheet of string cells with a header row.
#[derive(Clone, Debug)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: &str, headers: Vec<String>, rows: Vec<Vec<String>>) -> Table {
        Table {
            name: name.to_owned(),
            headers: headers.into_iter().map(|h| h.trim().to_owned()).collect(),
            rows: rows
                .into_iter()
                .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
                .collect(),
        }
    }

    /// Index of the column with this header.
    pub fn column(&self, header: &str) -> Result<usize, Error> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| eyre!("missing column \"{header}\" in {}", self.name))
    }

    /// Trimmed cell content, empty when the row is shorter than the header.
    pub fn cell<'t>(&self, row: &'t [String], column: usize) -> &'t str {
        row.get(column).map_or("", |cell| cell.trim())
    }
}

use eyre::{Error, WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub solver: SolverConfig,
    pub checks: ChecksConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub trials: usize,
    pub seed: Option<u64>,
    /// Number of ranks detailed in the statistics.
    pub reported_ranks: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            trials: 10,
            seed: None,
            reported_ranks: 5,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksConfig {
    pub gender_ratio_threshold: f64,
    pub gender_balance_tolerance: f64,
    /// A trip holding exactly this many protected-class students accepts
    /// no further student at all, whatever their own flag.
    pub protected_class_blocked_count: u32,
    /// Team marker meaning "no team".
    pub no_team: String,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            gender_ratio_threshold: 0.8,
            gender_balance_tolerance: 0.1,
            protected_class_blocked_count: 1,
            no_team: "N".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub workbook: Option<PathBuf>,
    pub trips: Option<PathBuf>,
    pub students: Option<PathBuf>,
    pub trip_sheet: String,
    pub student_sheet: String,
    pub preference_separator: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            workbook: None,
            trips: None,
            students: None,
            trip_sheet: "Trip Sheet".to_owned(),
            student_sheet: "Student Sheet".to_owned(),
            preference_separator: " - ".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub trips_file: String,
    pub assigned_file: String,
    pub unassigned_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            trips_file: "trips.csv".to_owned(),
            assigned_file: "assigned_students.csv".to_owned(),
            unassigned_file: "unassigned_students.csv".to_owned(),
        }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Config, Error> {
        let content = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot read configuration file {}", file_name.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))
    }

    pub fn parse(content: &str) -> Result<Config, Error> {
        Ok(toml::from_str(content)?)
    }
}

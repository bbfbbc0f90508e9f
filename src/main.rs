use crate::config::Config;
use crate::loaders::{CsvLoader, Format, Loader, WorkbookLoader};
use clap::Parser;
use eyre::{Error, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

mod algos;
mod checks;
mod config;
mod display;
mod loaders;
mod model;
mod stats;
mod trials;
mod writer;

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Workbook holding the trip and student sheets
    #[arg(short, long, conflicts_with_all = ["trips", "students"])]
    workbook: Option<PathBuf>,
    /// CSV file with the trips
    #[arg(long, requires = "students")]
    trips: Option<PathBuf>,
    /// CSV file with the students and their preference scores
    #[arg(long, requires = "trips")]
    students: Option<PathBuf>,
    /// Directory receiving the result tables
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Number of trials
    #[arg(short, long)]
    trials: Option<usize>,
    /// Seed of the random generator
    #[arg(short, long)]
    seed: Option<u64>,
    /// Do not write the result tables
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Show every trip roster
    #[arg(long)]
    details: bool,
    /// Increase verbosity (can be repeated)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

const DEFAULT_CONFIG: &str = "tripsolver.toml";

fn load_config(options: &Options) -> Result<Config, Error> {
    let mut config = match &options.config {
        Some(file) => Config::load(file)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(Path::new(DEFAULT_CONFIG))?,
        None => Config::default(),
    };
    if let Some(workbook) = &options.workbook {
        config.input.workbook = Some(workbook.clone());
        config.input.trips = None;
        config.input.students = None;
    }
    if let (Some(trips), Some(students)) = (&options.trips, &options.students) {
        config.input.workbook = None;
        config.input.trips = Some(trips.clone());
        config.input.students = Some(students.clone());
    }
    if let Some(output) = &options.output {
        config.output.directory = output.clone();
    }
    if let Some(trials) = options.trials {
        config.solver.trials = trials;
    }
    if options.seed.is_some() {
        config.solver.seed = options.seed;
    }
    Ok(config)
}

fn loader(config: &Config) -> Result<Box<dyn Loader>, Error> {
    let format = Format {
        separator: config.input.preference_separator.clone(),
        no_team: config.checks.no_team.clone(),
    };
    let input = &config.input;
    if let Some(workbook) = &input.workbook {
        return Ok(Box::new(WorkbookLoader::new(
            workbook.clone(),
            input.trip_sheet.clone(),
            input.student_sheet.clone(),
            format,
        )));
    }
    match (&input.trips, &input.students) {
        (Some(trips), Some(students)) => Ok(Box::new(CsvLoader::new(
            trips.clone(),
            students.clone(),
            format,
        ))),
        _ => bail!("no input given, use --workbook or --trips and --students"),
    }
}

fn main() -> Result<(), Error> {
    color_eyre::install()?;
    let options = Options::parse();
    let level = match options.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = load_config(&options)?;
    let (students, trips) = loader(&config)?.load()?;
    info!(
        students = students.len(),
        trips = trips.len(),
        trials = config.solver.trials,
        "Data loaded"
    );
    let mut rng = match config.solver.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let reported_ranks = config.solver.reported_ranks;
    let incumbent = trials::run_trials(
        &students,
        &trips,
        &config.checks,
        config.solver.trials,
        &mut rng,
        |trial| display::display_trial(trial, reported_ranks),
    );
    info!(accepted = ?incumbent.accepted(), "Trials done");
    let Some(best) = incumbent.into_best() else {
        println!("No trial has been run");
        return Ok(());
    };
    let a = &best.assignments;
    if !options.dry_run {
        writer::save(&config.output, a)?;
    }
    println!();
    if options.details {
        display::display_details(a);
    }
    display::display_stats(a, &best.ranks, reported_ranks);
    display::display_unassigned(a);
    display::display_empty(a);
    Ok(())
}

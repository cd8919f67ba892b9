//! Command implementations for the HyTek ingest CLI
//!
//! Each subcommand reads one source, writes its record sets as CSV into the
//! output directory and reports what was written.

use colored::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::app::services::csv_export::export_records;
use crate::app::services::ev3_parser::Ev3Parser;
use crate::app::services::meet_reader::{AccessConnector, MeetEntriesReader, list_drivers};
use crate::app::services::time_codec::{format_time_value, parse_time};
use crate::cli::args::{Args, Commands, EventsArgs, MeetArgs, TimeArgs};
use crate::constants::{
    ENTRIES_FILE, EV3_EVENTS_FILE, EV3_HEADER_FILE, MEET_INFO_FILE, TIME_STANDARDS_FILE,
};
use crate::{Error, Result};

/// What a command produced, for the final report
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Output files and the number of records written to each
    pub outputs: Vec<(PathBuf, usize)>,
    /// Lines printed to stdout by commands that do not write files
    pub lines: Vec<String>,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Total records across every output file
    pub fn total_records(&self) -> usize {
        self.outputs.iter().map(|(_, count)| count).sum()
    }

    fn record_output(&mut self, path: PathBuf, count: usize) {
        self.outputs.push((path, count));
    }
}

/// Main command runner
pub fn run(args: Args) -> Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);
    args.validate()?;

    let mut summary = match &args.command {
        Commands::Events(events) => run_events(events)?,
        Commands::Meet(meet) => run_meet(meet)?,
        Commands::Drivers => run_drivers()?,
        Commands::Time(time) => run_time(time)?,
    };

    summary.elapsed = start_time.elapsed();
    print_summary(&summary);
    Ok(summary)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hytek_ingest={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Create the output directory if it does not exist
fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir).map_err(|e| {
            Error::io(
                format!(
                    "Failed to create output directory '{}'",
                    output_dir.display()
                ),
                e,
            )
        })?;
    }
    Ok(())
}

fn run_events(args: &EventsArgs) -> Result<RunSummary> {
    info!("Parsing EV3 file {}", args.ev3_file.display());

    let parser = Ev3Parser::new(args.parse_options());
    let ev3 = parser.parse_file(&args.ev3_file)?;
    let standards = ev3.time_standards();

    prepare_output_dir(&args.output_dir)?;
    let mut summary = RunSummary::default();

    let path = args.output_dir.join(EV3_HEADER_FILE);
    let count = export_records(std::slice::from_ref(&ev3.header), &path)?;
    summary.record_output(path, count);

    let path = args.output_dir.join(EV3_EVENTS_FILE);
    let count = export_records(&ev3.events, &path)?;
    summary.record_output(path, count);

    let path = args.output_dir.join(TIME_STANDARDS_FILE);
    let count = export_records(&standards, &path)?;
    summary.record_output(path, count);

    Ok(summary)
}

fn run_meet(args: &MeetArgs) -> Result<RunSummary> {
    let config = args.database_config()?;
    debug!("Database configuration: {:?}", config);

    let reader = MeetEntriesReader::new(AccessConnector::new(config));
    let mut connection = reader.connect()?;
    connection.read_meet_header()?;
    connection.read_entries()?;

    prepare_output_dir(&args.output_dir)?;
    let mut summary = RunSummary::default();

    let path = args.output_dir.join(MEET_INFO_FILE);
    let count = connection.export_meet_header(&path)?;
    summary.record_output(path, count);

    let path = args.output_dir.join(ENTRIES_FILE);
    let count = connection.export_entries(&path)?;
    summary.record_output(path, count);

    connection.close();
    Ok(summary)
}

fn run_drivers() -> Result<RunSummary> {
    let drivers = list_drivers()?;
    info!("Found {} ODBC drivers", drivers.len());
    Ok(RunSummary {
        lines: drivers,
        ..Default::default()
    })
}

fn run_time(args: &TimeArgs) -> Result<RunSummary> {
    Ok(RunSummary {
        lines: convert_times(&args.values, args.to_text)?,
        ..Default::default()
    })
}

/// Convert each value, text to centiseconds or centiseconds to text
fn convert_times(values: &[String], to_text: bool) -> Result<Vec<String>> {
    values
        .iter()
        .map(|value| -> Result<String> {
            let converted = if to_text {
                format_time_value(value)?
            } else {
                parse_time(value)?.to_string()
            };
            Ok(format!("{} => {}", value, converted))
        })
        .collect()
}

fn print_summary(summary: &RunSummary) {
    for line in &summary.lines {
        println!("{}", line);
    }

    if summary.outputs.is_empty() {
        return;
    }

    println!("\n{}", "Ingest Summary".bright_green().bold());
    for (path, count) in &summary.outputs {
        println!(
            "  {} {} records",
            format!("{}:", path.display()).bright_cyan(),
            count.to_string().bright_white().bold()
        );
    }
    println!(
        "  {} {}",
        "Total records:".bright_cyan(),
        summary.total_records().to_string().bright_white().bold()
    );
    println!(
        "  {} {:.2}s",
        "Time elapsed:".bright_cyan(),
        summary.elapsed.as_secs_f64()
    );
}

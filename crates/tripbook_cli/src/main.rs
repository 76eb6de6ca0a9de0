//! Command-line shell over `tripbook_core`.
//!
//! # Responsibility
//! - Resolve configuration (defaults, config file, flags) and open the store.
//! - Expose the single-trip workflow, export/import and the print sheet.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tripbook_core::db::open_db;
use tripbook_core::{
    export_trips, get_trip, import_trips, init_logging, load_config_file, parse_fragment,
    render_print_sheet, CoreConfig, Route, SqliteKvStore, Trip, TripStore,
};

#[derive(Parser)]
#[command(name = "tripbook", about = "Personal trip planner", version)]
struct Cli {
    /// Config file (defaults to ~/.tripbook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Database file overriding the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the active trip, creating it on first use
    Show,
    /// Write all trips as pretty-printed JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all trips with the contents of a JSON export
    Import { file: PathBuf },
    /// Print the itinerary sheet of a trip (the active one by default)
    Print { id: Option<String> },
    /// Resolve a navigation fragment to its view
    Route { fragment: String },
    /// Check core wiring
    Ping,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&cli)?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    match &cli.command {
        Command::Ping => {
            println!("tripbook_core ping={}", tripbook_core::ping());
            println!("tripbook_core version={}", tripbook_core::core_version());
            return Ok(());
        }
        Command::Route { fragment } => {
            println!("{}", describe_route(&parse_fragment(fragment)));
            return Ok(());
        }
        _ => {}
    }

    if let Some(parent) = config.db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let conn = open_db(&config.db_path)?;
    let store = TripStore::new(SqliteKvStore::new(&conn))
        .with_key(config.storage_key.clone())
        .with_ids(config.id_strategy.provider());

    match cli.command {
        Command::Show => {
            let trip = store.get_or_create_single()?;
            print!("{}", summarize(&trip));
        }
        Command::Export { out } => {
            let json = export_trips(&store.load())?;
            match out {
                Some(path) => fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        Command::Import { file } => {
            let json = fs::read_to_string(file)?;
            let trips = import_trips(&store, &json)?;
            println!("imported {} trip(s)", trips.len());
        }
        Command::Print { id } => {
            let trip = match id {
                Some(id) => get_trip(&store.load(), &id)
                    .cloned()
                    .ok_or_else(|| format!("trip not found: {id}"))?,
                None => store.get_or_create_single()?,
            };
            print!("{}", render_print_sheet(&trip));
        }
        Command::Ping | Command::Route { .. } => {}
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig, Box<dyn Error>> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(tripbook_core::config::default_config_path);
    let mut config = CoreConfig::resolve(load_config_file(&path)?);
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn describe_route(route: &Route) -> String {
    let view = match route {
        Route::List => "list",
        Route::Edit(_) => "edit",
        Route::Print(_) => "print",
    };
    match route.trip_id() {
        Some(id) => format!("{view} {id}"),
        None => view.to_string(),
    }
}

fn summarize(trip: &Trip) -> String {
    let planned: usize = trip.days.iter().map(|day| day.items.len()).sum();
    let total = trip
        .expense_total()
        .map_or_else(|| "overflow".to_string(), |total| total.to_string());
    format!(
        "{} [{}]\n{} ~ {} ({} days, {} plans)\npacking: {}/{} packed\nexpenses: {} total\n",
        trip.title,
        trip.id,
        trip.start_date,
        trip.end_date,
        trip.days.len(),
        planned,
        trip.packed_count(),
        trip.packing.len(),
        total
    )
}

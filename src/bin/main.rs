//! facets CLI - Compile and run faceted event filters
//!
//! Usage:
//!   facets sql [--filter <file.json|->] [--dialect <dialect>]
//!   facets query [--db <file.sqlite>] [--filter <file.json|->] [--output <format>]
//!   facets init [--db <file.sqlite>]
//!
//! Examples:
//!   echo '{"minYear": 2001, "countries": [4]}' | facets sql --filter - --dialect postgres
//!   facets query --db gtd.sqlite --filter filters/afghanistan.json --output table
//!   facets init --db gtd.sqlite

use clap::{Parser, Subcommand, ValueEnum};
use facets::config::Settings;
use facets::datasource::SqliteSource;
use facets::logging::{init_logging, LogConfig};
use facets::model::Event;
use facets::repository::{FacetRepository, FiltersRepository};
use facets::schema::{create_script, StarSchema};
use facets::sql::Dialect;
use facets::{Filter, QueryBuilder};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "facets")]
#[command(about = "facets - Compile faceted filters into star-schema SQL queries")]
#[command(version)]
struct Cli {
    /// Path to a facets.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL and bound parameters a filter compiles to
    Sql {
        /// Filter JSON file, or "-" for stdin (empty filter if omitted)
        #[arg(short, long)]
        filter: Option<PathBuf>,

        /// SQL dialect to generate (defaults to the configured dialect)
        #[arg(short, long)]
        dialect: Option<DialectArg>,
    },

    /// Run a filter against a SQLite database
    Query {
        /// SQLite database file (defaults to database.path from the config)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Filter JSON file, or "-" for stdin (empty filter if omitted)
        #[arg(short, long)]
        filter: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        output: OutputFormat,
    },

    /// Create the star-schema tables in a SQLite database
    Init {
        /// SQLite database file (defaults to database.path from the config)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Sqlite,
    Postgres,
    Duckdb,
    Mysql,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Sqlite => Dialect::Sqlite,
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Duckdb => Dialect::DuckDb,
            DialectArg::Mysql => Dialect::MySql,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// Aligned text columns
    Table,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&LogConfig::verbose(cli.verbose)) {
        eprintln!("Warning: {}", e);
    }

    let loaded = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Sql { filter, dialect } => cmd_sql(&settings, filter, dialect),
        Commands::Query { db, filter, output } => cmd_query(&settings, db, filter, output),
        Commands::Init { db } => cmd_init(&settings, db),
    }
}

fn cmd_sql(settings: &Settings, filter: Option<PathBuf>, dialect: Option<DialectArg>) -> ExitCode {
    let filter = match read_filter(filter.as_deref()) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let dialect = dialect.map(Dialect::from).unwrap_or(settings.database.dialect);
    let builder = QueryBuilder::new(settings.year_bounds()).with_dialect(dialect);
    println!("{}", builder.compile(&filter));
    ExitCode::SUCCESS
}

fn cmd_query(
    settings: &Settings,
    db: Option<PathBuf>,
    filter: Option<PathBuf>,
    output: OutputFormat,
) -> ExitCode {
    let filter = match read_filter(filter.as_deref()) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = match open_database(settings, db) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let repository = FacetRepository::new(source, QueryBuilder::new(settings.year_bounds()));
    let events = match repository.find_by(&filter) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Query error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(&events) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing results: {}", e);
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Table => print_table(&events),
    }
    ExitCode::SUCCESS
}

fn cmd_init(settings: &Settings, db: Option<PathBuf>) -> ExitCode {
    let source = match open_database(settings, db) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let script = create_script(&StarSchema::default(), Dialect::Sqlite);
    match source.execute_batch(&script) {
        Ok(()) => {
            println!("Star schema created");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error creating tables: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Read a filter from a JSON file, or stdin when the path is "-".
fn read_filter(path: Option<&Path>) -> Result<Filter, String> {
    let Some(path) = path else {
        return Ok(Filter::new());
    };

    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Error reading filter from stdin: {}", e))?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| format!("Error reading filter '{}': {}", path.display(), e))?
    };

    serde_json::from_str(&content).map_err(|e| format!("Invalid filter: {}", e))
}

fn open_database(settings: &Settings, db: Option<PathBuf>) -> Result<SqliteSource, ExitCode> {
    let path = match db {
        Some(path) => path,
        None => match settings.database.resolved_path() {
            Ok(Some(path)) => path,
            Ok(None) => {
                eprintln!("No database given: pass --db or set database.path in the config");
                return Err(ExitCode::FAILURE);
            }
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return Err(ExitCode::FAILURE);
            }
        },
    };

    SqliteSource::open(&path).map_err(|e| {
        eprintln!("Error opening database '{}': {}", path.display(), e);
        ExitCode::FAILURE
    })
}

fn print_table(events: &[Event]) {
    println!(
        "{:<14} {:<10} {:<24} {:<28} {:>6}  {}",
        "EVENT", "DATE", "COUNTRY", "ATTACK TYPE", "KILLS", "GROUP"
    );
    for event in events {
        let kills = event
            .kills_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<14} {:<10} {:<24} {:<28} {:>6}  {}",
            event.event_id,
            event.date(),
            truncate(&event.country, 24),
            truncate(&event.attack_type, 28),
            kills,
            event.group
        );
    }
    println!();
    println!("{} event(s)", events.len());
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

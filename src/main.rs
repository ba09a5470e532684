use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use csv2sql::{
    ConvertError, CsvConverter, NumericPolicy, PrimaryKey, RenderedDocument, StatementOptions,
};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const TRANSACTION_BEFORE: &str = "start transaction;\n";
const TRANSACTION_AFTER: &str = ";\ncommit;\n";

#[derive(Parser)]
#[command(name = "csv2sql")]
#[command(about = "Convert CSV files into SQL insert and update scripts")]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # One insert statement per row, table name taken from the file name
    csv2sql insert users.csv

    # A single multi-row insert wrapped in a transaction
    csv2sql insert users.csv --table users --bulk --transaction -o users.sql

    # Update the balance column, keyed by the first column (id)
    csv2sql update account_balances.csv --table accounts --set ,balance

    # Read defaults from a JSON options file
    csv2sql insert users.csv --config options.json")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Set log level explicitly
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate INSERT statements
    Insert {
        #[command(flatten)]
        shared: SharedArgs,

        /// Combine all rows into a single multi-row insert
        #[arg(long)]
        bulk: bool,

        /// Use INSERT IGNORE
        #[arg(long)]
        ignore: bool,
    },

    /// Generate UPDATE statements keyed by a primary key column
    Update {
        #[command(flatten)]
        shared: SharedArgs,

        /// Comma separated SQL column names aligned with the CSV columns;
        /// leave a position empty to skip that column (e.g. ",balance")
        #[arg(long, value_name = "COLUMNS")]
        set: String,

        /// Primary key as INDEX:COLUMN (default: 0:id)
        #[arg(long, value_name = "INDEX:COLUMN")]
        pk: Option<String>,
    },
}

#[derive(Args)]
struct SharedArgs {
    /// Path to the CSV file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Target table (default: derived from the file name)
    #[arg(short, long)]
    table: Option<String>,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON options file; command line flags take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wrap the script in start transaction / commit
    #[arg(long)]
    transaction: bool,

    /// Emit plain decimal fields unquoted
    #[arg(long)]
    detect_numbers: bool,

    /// Field delimiter (default: ',')
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Skip the first record as a header
    #[arg(long)]
    has_headers: bool,

    /// Output used when no row is rendered
    #[arg(long, value_name = "TEXT")]
    when_empty: Option<String>,
}

impl SharedArgs {
    /// Build statement options from the flags, layered over the options file
    fn statement_options(&self) -> Result<StatementOptions> {
        let file_options = match &self.config {
            Some(path) => StatementOptions::from_json_file(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => StatementOptions::default(),
        };

        let mut options = StatementOptions {
            table: self.table.clone(),
            when_empty: self.when_empty.clone(),
            numbers: self.detect_numbers.then_some(NumericPolicy::Detect),
            ..Default::default()
        };

        if self.delimiter.is_some() || self.has_headers {
            let mut dialect = file_options.dialect.clone().unwrap_or_default();
            if let Some(delimiter) = self.delimiter {
                dialect.delimiter = delimiter;
            }
            if self.has_headers {
                dialect.has_headers = true;
            }
            options.dialect = Some(dialect);
        }

        if self.transaction {
            options.before = Some(TRANSACTION_BEFORE.to_string());
            options.after = Some(TRANSACTION_AFTER.to_string());
        }

        options.merge_missing(file_options);
        debug!(?options, "Resolved statement options");
        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();

    initialize_logging(&cli);

    info!("Starting csv2sql v{}", csv2sql::VERSION);

    if let Err(e) = run(cli.command) {
        eprintln!("Conversion failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Insert {
            shared,
            bulk,
            ignore,
        } => {
            info!("Generating insert statements from {:?}", shared.file);
            let mut options = shared.statement_options()?;
            if bulk {
                options.bulk = Some(true);
            }
            if ignore {
                options.ignore = Some(true);
            }

            let document = CsvConverter::new(&shared.file)
                .to_inserts_with(options, Default::default())
                .with_context(|| format!("Failed to convert {}", shared.file.display()))?;
            write_output(&document, shared.output.as_ref())
        }
        Commands::Update { shared, set, pk } => {
            info!("Generating update statements from {:?}", shared.file);
            let mut options = shared.statement_options()?;
            if let Some(pk) = pk {
                options.pk = Some(parse_primary_key(&pk)?);
            }

            let document = CsvConverter::new(&shared.file)
                .to_updates_with(parse_set_columns(&set), options, Default::default())
                .with_context(|| format!("Failed to convert {}", shared.file.display()))?;
            write_output(&document, shared.output.as_ref())
        }
    }
}

/// Parse `",balance"` into `[None, Some("balance")]`
fn parse_set_columns(spec: &str) -> Vec<Option<String>> {
    spec.split(',')
        .map(str::trim)
        .map(|name| (!name.is_empty()).then(|| name.to_string()))
        .collect()
}

/// Parse `INDEX:COLUMN` into a primary key locator
fn parse_primary_key(spec: &str) -> Result<PrimaryKey, ConvertError> {
    let (index, column) = spec.split_once(':').ok_or_else(|| {
        ConvertError::configuration(format!("primary key {:?} must look like INDEX:COLUMN", spec))
    })?;
    let index = index.trim().parse::<usize>().map_err(|e| {
        ConvertError::configuration(format!("invalid primary key index {:?}: {}", index, e))
    })?;
    let column = column.trim();
    if column.is_empty() {
        return Err(ConvertError::configuration("primary key column name is empty"));
    }
    Ok(PrimaryKey::new(index, column))
}

fn write_output(document: &RenderedDocument, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, &document.sql)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote SQL script to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.sql.as_bytes())?;
            stdout.flush()?;
        }
    }

    let stats = &document.statistics;
    info!(
        "Summary: {} rows read, {} dropped, {} rendered in {}ms",
        stats.rows_read, stats.rows_dropped, stats.rows_rendered, stats.generation_time_ms
    );
    Ok(())
}

/// Explicit flags win over `RUST_LOG`, which wins over the INFO default
fn log_filter(cli: &Cli) -> EnvFilter {
    let explicit = match &cli.log_level {
        Some(level) => Some(Level::from(level.clone())),
        None if cli.verbose => Some(Level::DEBUG),
        None => None,
    };

    match explicit {
        Some(level) => EnvFilter::default().add_directive(LevelFilter::from_level(level).into()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::INFO.into())),
    }
}

fn initialize_logging(cli: &Cli) {
    let filter = log_filter(cli);

    if cli.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(cli.verbose)
            .with_line_number(cli.verbose)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(cli.verbose)
            .with_line_number(cli.verbose)
            .init();
    }
}

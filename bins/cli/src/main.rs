//! Dispatch billing CLI
//!
//! Lists billing periods, computes client invoices and courier payroll for a
//! period, and imports dispatch ride exports. Inputs are JSON files; exports
//! are Quickbooks CSV files written to the configured output directory.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dispatch_core::billing::{
    BillingRun, Client, ClientInvoice, Courier, CourierPaystub, FeeSchedule, Ride,
};
use dispatch_core::export::{CsvRecord, QuickbooksBills, QuickbooksInvoices, write_csv};
use dispatch_core::import::{
    InMemoryDirectory, LookupCache, RideBook, RideImportRow, RideImporter,
};
use dispatch_core::period::{
    Invoice, Period, ProjectionStrategy, end_of_day, period_overview, start_of_day,
};
use dispatch_shared::{AppConfig, AppError};

#[derive(Parser)]
#[command(name = "dispatch")]
#[command(version, about = "Semi-monthly billing for courier dispatch", long_about = None)]
struct Cli {
    /// Extra configuration file layered over config/default and config/{RUN_MODE}
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List generated and potential billing periods
    Periods {
        /// JSON file of generated invoices, payrolls or bare periods
        #[arg(short, long)]
        existing: Option<PathBuf>,

        /// First day of the range
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the range (default: today in the configured time zone)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Projection strategy: gap or forward
        #[arg(long, default_value = "gap")]
        strategy: ProjectionStrategy,
    },

    /// Compute client invoices for a period and export them
    Invoices {
        /// JSON file of clients
        #[arg(long)]
        clients: PathBuf,

        /// JSON file of rides
        #[arg(long)]
        rides: PathBuf,

        #[command(flatten)]
        period: PeriodArgs,

        /// First invoice reference number
        #[arg(long, default_value_t = 1)]
        first_ref: u32,

        /// Print every charge with its rationale instead of the invoice records
        #[arg(long)]
        explain: bool,
    },

    /// Compute courier paystubs for a period and export them as bills
    Payroll {
        /// JSON file of couriers
        #[arg(long)]
        couriers: PathBuf,

        /// JSON file of rides
        #[arg(long)]
        rides: PathBuf,

        #[command(flatten)]
        period: PeriodArgs,

        /// First bill reference number
        #[arg(long, default_value_t = 1)]
        first_ref: u32,

        /// Print every line with its rationale instead of the payroll record
        #[arg(long)]
        explain: bool,
    },

    /// Import a dispatch ride export into a ride file
    Import {
        /// JSON file of exported ride rows
        #[arg(long)]
        rows: PathBuf,

        /// JSON file of clients
        #[arg(long)]
        clients: PathBuf,

        /// JSON file of couriers
        #[arg(long)]
        couriers: PathBuf,

        /// Existing ride file to update
        #[arg(long)]
        rides: Option<PathBuf>,

        /// Where to write the updated rides
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Args)]
struct PeriodArgs {
    /// First day of the billing period
    #[arg(long)]
    period_start: NaiveDate,

    /// Last day of the billing period
    #[arg(long)]
    period_end: NaiveDate,
}

impl PeriodArgs {
    fn period(&self) -> Result<Period, AppError> {
        if self.period_start > self.period_end {
            return Err(AppError::Validation(format!(
                "Period start {} is after period end {}",
                self.period_start, self.period_end
            )));
        }
        Ok(Period::from_dates(self.period_start, self.period_end))
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dispatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.map(|path| path.to_string_lossy().into_owned());
    let config = AppConfig::load_from(config_path.as_deref())?;

    match cli.command {
        Commands::Periods {
            existing,
            from,
            to,
            strategy,
        } => cmd_periods(&config, existing.as_deref(), from, to, strategy),
        Commands::Invoices {
            clients,
            rides,
            period,
            first_ref,
            explain,
        } => cmd_invoices(&config, &clients, &rides, period.period()?, first_ref, explain),
        Commands::Payroll {
            couriers,
            rides,
            period,
            first_ref,
            explain,
        } => cmd_payroll(&config, &couriers, &rides, period.period()?, first_ref, explain),
        Commands::Import {
            rows,
            clients,
            couriers,
            rides,
            out,
        } => cmd_import(&config, &rows, &clients, &couriers, rides.as_deref(), &out),
    }
}

/// List generated and potential periods, newest first
fn cmd_periods(
    config: &AppConfig,
    existing: Option<&Path>,
    from: NaiveDate,
    to: Option<NaiveDate>,
    strategy: ProjectionStrategy,
) -> anyhow::Result<()> {
    let existing: Vec<Period> = match existing {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let to = match to {
        Some(date) => date,
        None => Utc::now()
            .with_timezone(&config.billing.time_zone()?)
            .date_naive(),
    };

    let rows = period_overview(&existing, start_of_day(from), end_of_day(to), strategy)
        .map_err(AppError::from)?;

    info!(
        from = %from,
        to = %to,
        strategy = ?strategy,
        rows = rows.len(),
        "Listed billing periods"
    );

    print_json(&rows)
}

/// Compute invoices, write the Quickbooks export and print the records
fn cmd_invoices(
    config: &AppConfig,
    clients: &Path,
    rides: &Path,
    period: Period,
    first_ref: u32,
    explain: bool,
) -> anyhow::Result<()> {
    let clients: Vec<Client> = read_json(clients)?;
    let rides: Vec<Ride> = read_json(rides)?;
    let schedule = fee_schedule(config);

    let invoices = BillingRun::invoices(&clients, &rides, period, &schedule);
    let rows = QuickbooksInvoices::new(config.billing.invoice_due_days)
        .format(&invoices, period, first_ref)
        .map_err(AppError::from)?;

    let path = export_path(config, "invoices", period)?;
    write_rows(&rows, &path)?;
    info!(rows = rows.len(), path = %path.display(), "Wrote invoice export");

    if explain {
        let summaries = invoices
            .iter()
            .map(ClientInvoice::summary)
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::from)?;
        return print_json(&summaries);
    }

    let file_path = path.display().to_string();
    let records: Vec<Invoice> = invoices
        .iter()
        .map(|invoice| BillingRun::record_invoice(invoice, file_path.as_str()))
        .collect();
    print_json(&records)
}

/// Compute paystubs, write the Quickbooks export and print the record
fn cmd_payroll(
    config: &AppConfig,
    couriers: &Path,
    rides: &Path,
    period: Period,
    first_ref: u32,
    explain: bool,
) -> anyhow::Result<()> {
    let couriers: Vec<Courier> = read_json(couriers)?;
    let rides: Vec<Ride> = read_json(rides)?;
    let schedule = fee_schedule(config);

    let paystubs = BillingRun::paystubs(&couriers, &rides, period, &schedule);
    let rows = QuickbooksBills::new(config.billing.invoice_due_days)
        .format(&paystubs, period, first_ref)
        .map_err(AppError::from)?;

    let path = export_path(config, "payroll", period)?;
    write_rows(&rows, &path)?;
    info!(rows = rows.len(), path = %path.display(), "Wrote payroll export");

    if explain {
        let summaries: Vec<_> = paystubs.iter().map(CourierPaystub::summary).collect();
        return print_json(&summaries);
    }

    print_json(&BillingRun::record_payroll(period, path.display().to_string()))
}

/// Import ride rows into a ride file and print the report
fn cmd_import(
    config: &AppConfig,
    rows: &Path,
    clients: &Path,
    couriers: &Path,
    existing: Option<&Path>,
    out: &Path,
) -> anyhow::Result<()> {
    let rows: Vec<RideImportRow> = read_json(rows)?;
    let clients: Vec<Client> = read_json(clients)?;
    let couriers: Vec<Courier> = read_json(couriers)?;
    let mut book: RideBook = match existing {
        Some(path) => read_json::<Vec<Ride>>(path)?.into_iter().collect(),
        None => RideBook::new(),
    };

    let directory = InMemoryDirectory::new(&clients, &couriers);
    let report = RideImporter::new(config.billing.import_batch_size).import(
        rows,
        &directory,
        &LookupCache::new(),
        &mut book,
    );

    for failure in &report.failures {
        warn!(
            row = failure.row,
            job_id = %failure.job_id,
            error = %failure.error,
            "Skipped ride row"
        );
    }

    let rides = book.into_rides();
    fs::write(out, serde_json::to_string_pretty(&rides)?)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    info!(rides = rides.len(), path = %out.display(), "Wrote ride file");

    print_json(&report)
}

fn fee_schedule(config: &AppConfig) -> FeeSchedule {
    FeeSchedule::default().with_radio_rental(config.billing.radio_rental_fee)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| AppError::Validation(format!("{}: {e}", path.display())))?;
    Ok(value)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn export_path(config: &AppConfig, kind: &str, period: Period) -> anyhow::Result<PathBuf> {
    let dir = Path::new(&config.export.output_dir);
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir.join(format!(
        "{kind}-{}-{}.csv",
        period.start_date(),
        period.end_date()
    )))
}

fn write_rows<R: CsvRecord>(rows: &[R], path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(rows, BufWriter::new(file)).map_err(AppError::from)?;
    Ok(())
}

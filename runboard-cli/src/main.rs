//! Runboard CLI — browse and create backtest runs against the mock service.
//!
//! Commands:
//! - `list`: parse a list-view query string, fetch that page, print a table
//! - `show`: detail view for one run id
//! - `create`: queue a run from a preset or explicit parameters
//! - `normalize`: print the canonical form of a list-view query string

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use runboard_core::format::{
    format_currency, format_date, format_date_range, format_number, format_percent,
};
use runboard_core::{
    CreateRunInput, ListRunsResult, Pair, Run, RunPreset, RunsQueryState, Strategy, Timeframe,
};
use runboard_service::{
    ListRunsRequest, RunService, ServiceConfig, ServiceError, SimulationConfig,
};

/// Run id was well-formed input but no record exists.
const EXIT_NOT_FOUND: u8 = 3;
/// Create input failed validation; nothing was sent to the service.
const EXIT_INVALID_INPUT: u8 = 2;

/// Account size used to express risk per trade in dollars.
const REFERENCE_EQUITY: f64 = 100_000.0;

#[derive(Parser)]
#[command(
    name = "runboard",
    about = "Runboard CLI — browse and queue backtest runs"
)]
struct Cli {
    /// Path to a TOML service config. Defaults apply when absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// No simulated latency and no random failures.
    #[arg(long, global = true, default_value_t = false)]
    instant: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of runs for a list-view query string.
    List {
        /// Query string, e.g. "status=done&sort=pf:desc&page=2". Empty means defaults.
        #[arg(default_value = "")]
        query: String,

        /// Force the call to fail (true) or to succeed (false).
        #[arg(long)]
        force_error: Option<bool>,

        /// Extra attempts after a transient failure.
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Show the details of one run.
    Show {
        /// Run id, e.g. RUN-007.
        id: String,

        /// Force the call to fail (true) or to succeed (false).
        #[arg(long)]
        force_error: Option<bool>,

        /// Extra attempts after a transient failure.
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Queue a new run from a preset or explicit parameters.
    Create {
        /// Named preset: quick_demo, conservative, higher_activity, trend_focus, mean_reversion_test.
        #[arg(long)]
        preset: Option<RunPreset>,

        /// Currency pair (e.g., EURUSD).
        #[arg(long)]
        pair: Option<Pair>,

        /// Timeframe: M15, H1, H4, D1.
        #[arg(long)]
        timeframe: Option<Timeframe>,

        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Strategy: momentum, mean_reversion, breakout.
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Risk per trade in percent (0.1 to 2.0).
        #[arg(long)]
        risk: Option<f64>,

        /// Print the created run as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Force the call to fail (true) or to succeed (false).
        #[arg(long)]
        force_error: Option<bool>,
    },
    /// Print the canonical form of a list-view query string.
    Normalize {
        /// Query string to normalize.
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.instant)?;
    let service = RunService::with_sample_data(&config);

    match cli.command {
        Commands::List {
            query,
            force_error,
            retries,
        } => run_list(&service, &query, force_error, retries).await,
        Commands::Show {
            id,
            force_error,
            retries,
        } => run_show(&service, &id, force_error, retries).await,
        Commands::Create {
            preset,
            pair,
            timeframe,
            start,
            end,
            strategy,
            risk,
            json,
            force_error,
        } => {
            let input = build_input(preset, pair, timeframe, start, end, strategy, risk)?;
            run_create(&service, &input, json, force_error).await
        }
        Commands::Normalize { query } => {
            let state = RunsQueryState::parse_query_string(&query);
            println!("{}", display_query(&state));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("runboard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, instant: bool) -> Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    if instant {
        config.simulation = SimulationConfig::instant();
    }
    Ok(config)
}

/// Retry transient failures up to `retries` extra times. The service never
/// retries on its own.
async fn with_retries<T, F, Fut>(retries: u32, mut op: F) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < retries => {
                attempt += 1;
                warn!(attempt, retries, error = %err, "retrying");
            }
            Err(err) => return Err(err),
        }
    }
}

// ── list ─────────────────────────────────────────────────────────────

async fn run_list(
    service: &RunService,
    query: &str,
    force_error: Option<bool>,
    retries: u32,
) -> Result<ExitCode> {
    let state = RunsQueryState::parse_query_string(query);
    let request = ListRunsRequest::from(&state).with_force_error(force_error);

    let result = with_retries(retries, || service.list(&request))
        .await
        .context("listing runs")?;

    print_table(&result);

    match state.reconcile(&result) {
        Some(corrected) => {
            info!(
                requested = state.page,
                served = result.page,
                "page out of range, query corrected"
            );
            println!("Query: {}", display_query(&corrected));
            println!("(requested page {} does not exist)", state.page);
        }
        None => println!("Query: {}", display_query(&state)),
    }
    Ok(ExitCode::SUCCESS)
}

fn print_table(result: &ListRunsResult) {
    if result.items.is_empty() {
        println!("No runs match this view.");
    } else {
        println!(
            "{:<8} {:<7} {:<4} {:<15} {:<8} {:>5} {:>7} {:>7}  {:<13}",
            "ID", "Pair", "TF", "Strategy", "Status", "PF", "Trades", "MaxDD", "Created"
        );
        println!("{}", "-".repeat(84));
        for run in &result.items {
            println!(
                "{:<8} {:<7} {:<4} {:<15} {:<8} {:>5} {:>7} {:>7}  {:<13}",
                run.id,
                run.pair,
                run.timeframe,
                run.strategy,
                run.status,
                format_number(run.pf, 2),
                format_number(f64::from(run.trades), 0),
                format_percent(run.max_dd),
                format_date(run.created_at.date_naive()),
            );
        }
    }
    println!();
    println!(
        "Page {} of {} · {} run{}",
        result.page,
        result.total_pages(),
        format_number(result.total as f64, 0),
        if result.total == 1 { "" } else { "s" }
    );
}

fn display_query(state: &RunsQueryState) -> String {
    let encoded = state.to_query_string();
    if encoded.is_empty() {
        "(defaults)".to_string()
    } else {
        format!("?{encoded}")
    }
}

// ── show ─────────────────────────────────────────────────────────────

async fn run_show(
    service: &RunService,
    id: &str,
    force_error: Option<bool>,
    retries: u32,
) -> Result<ExitCode> {
    let found = with_retries(retries, || service.get_by_id(id, force_error))
        .await
        .with_context(|| format!("loading run {id}"))?;

    match found {
        Some(run) => {
            print_detail(&run);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("Run {id} not found");
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
    }
}

fn print_detail(run: &Run) {
    println!("Run {}", run.id);
    println!("{}", "-".repeat(40));
    println!("{:<12} {}", "Pair", run.pair);
    println!("{:<12} {}", "Timeframe", run.timeframe);
    println!("{:<12} {}", "Strategy", run.strategy);
    println!("{:<12} {}", "Status", run.status);
    println!(
        "{:<12} {}",
        "Period",
        format_date_range(run.start_date, run.end_date)
    );
    println!(
        "{:<12} {}% ({} per trade on {})",
        "Risk",
        format_number(run.risk_pct, 2),
        format_currency(REFERENCE_EQUITY * run.risk_pct / 100.0),
        format_currency(REFERENCE_EQUITY),
    );
    println!("{:<12} {}", "PF", format_number(run.pf, 2));
    println!("{:<12} {}", "Trades", run.trades);
    println!("{:<12} {}", "Max DD", format_percent(run.max_dd));
    println!(
        "{:<12} {}",
        "Created",
        run.created_at.format("%b %d, %Y %H:%M UTC")
    );
}

// ── create ───────────────────────────────────────────────────────────

fn build_input(
    preset: Option<RunPreset>,
    pair: Option<Pair>,
    timeframe: Option<Timeframe>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    strategy: Option<Strategy>,
    risk: Option<f64>,
) -> Result<CreateRunInput> {
    let today = Utc::now().date_naive();

    if let Some(preset) = preset {
        if pair.is_some() || timeframe.is_some() || start.is_some() || strategy.is_some() {
            bail!("--preset cannot be combined with --pair, --timeframe, --start, or --strategy");
        }
        let mut input = preset.input(end.unwrap_or(today));
        if let Some(risk) = risk {
            input.risk_pct = risk;
        }
        return Ok(input);
    }

    let (Some(pair), Some(timeframe), Some(start_date), Some(strategy), Some(risk_pct)) =
        (pair, timeframe, start, strategy, risk)
    else {
        bail!("either --preset or all of --pair, --timeframe, --start, --strategy, --risk is required");
    };

    Ok(CreateRunInput {
        pair,
        timeframe,
        start_date,
        end_date: end.unwrap_or(today),
        strategy,
        risk_pct,
    })
}

async fn run_create(
    service: &RunService,
    input: &CreateRunInput,
    json: bool,
    force_error: Option<bool>,
) -> Result<ExitCode> {
    if let Err(errors) = input.validate() {
        for err in &errors {
            eprintln!("invalid input: {err}");
        }
        return Ok(ExitCode::from(EXIT_INVALID_INPUT));
    }

    let run = service
        .create(input, force_error)
        .await
        .context("creating run")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        print_detail(&run);
    }
    Ok(ExitCode::SUCCESS)
}

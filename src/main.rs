//! viewkit - Entry Point

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use viewkit::config::ResolvedConfig;
use viewkit::format::{apply_mask, apply_monetary_mask};
use viewkit::logging::{DEFAULT_FILTER, VERBOSE_FILTER};
use viewkit::model::{AppError, FilterParams};
use viewkit::pagination::{PaginationController, PaginationVm, VecFetcher};
use viewkit::scheduler::{FramePump, RedrawScheduler, TimerFrames};
use viewkit::validate::{is_valid_cnpj, is_valid_cpf, is_valid_email};

/// viewkit - redraw scheduling, pagination and document validation helpers
#[derive(Parser, Debug)]
#[command(name = "viewkit")]
#[command(version)]
#[command(about = "Redraw scheduling, pagination and document validation helpers")]
pub struct Args {
    /// What to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Milliseconds between redraw frames
    #[arg(long, global = true)]
    pub frame_interval_ms: Option<u64>,

    /// Rows requested per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Path of the log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Validate a document number or e-mail address (CPF must be digits only)
    Check {
        /// Kind of value
        #[arg(value_enum)]
        kind: DocumentKind,
        /// Value to validate
        value: String,
    },

    /// Apply a fixed input mask (9 = digit, A = letter, anything else literal)
    Mask {
        /// Mask pattern, e.g. 999.999.999-99
        pattern: String,
        /// Raw input
        value: String,
    },

    /// Format digits as a currency amount with two decimal places
    Money {
        /// Raw input
        value: String,
    },

    /// Page through a JSON array, redrawing as pages arrive
    Paginate {
        /// File holding a JSON array
        file: PathBuf,
        /// Stop after this many pages
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        pages: Option<u32>,
    },
}

/// Kinds of value `check` understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    /// Individual taxpayer number
    Cpf,
    /// Company taxpayer number
    Cnpj,
    /// E-mail address
    Email,
}

fn main() -> Result<ExitCode, AppError> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    let filter = if args.verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    viewkit::logging::init_with_filter(&config.log_file_path, filter)?;

    info!(config = ?config, command = ?args.command, "Configuration loaded and resolved");

    match args.command {
        Command::Check { kind, value } => Ok(check(kind, &value)),
        Command::Mask { pattern, value } => {
            println!("{}", apply_mask(&pattern, &value));
            Ok(ExitCode::SUCCESS)
        }
        Command::Money { value } => {
            println!("{}", apply_monetary_mask(&value));
            Ok(ExitCode::SUCCESS)
        }
        Command::Paginate { file, pages } => paginate(&file, pages, &config),
    }
}

/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = viewkit::config::load_config_with_precedence(args.config.clone())?;
    let merged = viewkit::config::merge_config(config_file);
    let with_env = viewkit::config::apply_env_overrides(merged)?;
    let resolved = viewkit::config::apply_cli_overrides(
        with_env,
        args.frame_interval_ms,
        args.page_size,
        args.log_file.clone(),
    );
    Ok(resolved.validate()?)
}

fn check(kind: DocumentKind, value: &str) -> ExitCode {
    let valid = match kind {
        DocumentKind::Cpf => is_valid_cpf(value),
        DocumentKind::Cnpj => is_valid_cnpj(value),
        DocumentKind::Email => is_valid_email(value),
    };
    info!(?kind, valid, "checked value");

    if valid {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("invalid");
        ExitCode::FAILURE
    }
}

fn paginate(file: &Path, max_pages: Option<u32>, config: &ResolvedConfig) -> Result<ExitCode, AppError> {
    let contents = std::fs::read_to_string(file).map_err(|source| AppError::Input {
        path: file.to_path_buf(),
        source,
    })?;
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&contents).map_err(|e| AppError::InvalidJson {
            path: file.to_path_buf(),
            reason: e.to_string(),
        })?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run_pagination(rows, max_pages, config))
}

async fn run_pagination(
    rows: Vec<serde_json::Value>,
    max_pages: Option<u32>,
    config: &ResolvedConfig,
) -> Result<ExitCode, AppError> {
    let scheduler = RedrawScheduler::with_call_site_tracking(config.track_call_sites);
    let vm = PaginationVm::new(VecFetcher::new(rows), config.page_size);
    let controller = PaginationController::new(vm, scheduler.clone());

    let view = controller.clone();
    let mut renders = 0u32;
    let render = move || {
        renders += 1;
        let state = view.state();
        let total = state.total.map_or_else(|| "?".to_string(), |t| t.to_string());
        let last = if state.is_last_page { " (last page)" } else { "" };
        println!("render {renders}: {} of {total} rows loaded{last}", state.items.len());
    };
    let pump = FramePump::new(scheduler.clone(), render);
    let pump_task = tokio::task::spawn_local(pump.run(TimerFrames::new(config.frame_interval())));

    let mut loaded = controller.first_page(&FilterParams::new()).await?;
    let mut pages = 1;
    while !controller.is_last_page() && max_pages.map_or(true, |max| pages < max) {
        loaded = controller.next_page().await?;
        pages += 1;
    }

    // Let the pump collapse whatever is still pending before exiting.
    while !scheduler.is_idle() {
        tokio::time::sleep(config.frame_interval()).await;
    }
    pump_task.abort();

    info!(pages, rows = loaded.len(), "pagination finished");
    println!("{} rows in {pages} page(s)", loaded.len());
    Ok(ExitCode::SUCCESS)
}

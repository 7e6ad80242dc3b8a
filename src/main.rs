use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finsight::updater::load_watchlist;
use finsight::{
    FsClient, FsError, Frequency, Schedule, Scheduler, Updater, UpdaterConfig, YahooSource,
};

#[derive(Parser, Debug)]
#[command(name = "finsight", version, about = "Fetch company fundamentals and write ratio reports")]
struct Cli {
    /// Directory that receives the JSON and spreadsheet files
    #[arg(long, global = true, default_value = "data_templates")]
    out_dir: PathBuf,

    /// JSON file with an array of {"symbol", "name"} objects replacing the built-in watchlist
    #[arg(long, global = true)]
    watchlist: Option<PathBuf>,

    /// Seconds to wait between two symbols
    #[arg(long, global = true, default_value_t = 2)]
    pause_secs: u64,

    /// Use quarterly instead of annual statements
    #[arg(long, global = true)]
    quarterly: bool,

    /// HTTP(S) proxy for all requests, e.g. http://127.0.0.1:8118
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Overall request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Update every company on the watchlist once
    UpdateAll,
    /// Update one company from the watchlist
    Update {
        /// Ticker symbol, e.g. PDD
        symbol: String,
    },
    /// Update all companies every day at a fixed time
    Daily {
        #[arg(long, default_value = "09:30")]
        at: String,
        /// Also run one batch immediately
        #[arg(long)]
        run_now: bool,
    },
    /// Update all companies once a week
    Weekly {
        #[arg(long, default_value = "monday")]
        day: String,
        #[arg(long, default_value = "09:00")]
        at: String,
        /// Also run one batch immediately
        #[arg(long)]
        run_now: bool,
    },
    /// Register several schedules at once
    Schedule {
        /// Daily time, HH:MM (repeatable)
        #[arg(long = "daily")]
        daily: Vec<String>,
        /// Weekly slot, DAY@HH:MM (repeatable)
        #[arg(long = "weekly")]
        weekly: Vec<String>,
        /// Also run one batch immediately
        #[arg(long)]
        run_now: bool,
    },
    /// Print the watchlist
    List,
}

fn init_tracing(log_file: Option<&Path>) -> Result<(), FsError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn build_updater(cli: &Cli) -> Result<Updater<YahooSource>, FsError> {
    let mut client = FsClient::builder().connect_timeout(Duration::from_secs(10));
    if let Some(secs) = cli.timeout_secs {
        client = client.timeout(Duration::from_secs(secs));
    }
    if let Some(proxy) = &cli.proxy {
        client = client.try_proxy(proxy)?;
    }
    let frequency = if cli.quarterly {
        Frequency::Quarterly
    } else {
        Frequency::Annual
    };
    let source = YahooSource::new(client.build()?).frequency(frequency);

    let mut config = UpdaterConfig {
        out_dir: cli.out_dir.clone(),
        pause: Duration::from_secs(cli.pause_secs),
        ..UpdaterConfig::default()
    };
    if let Some(path) = &cli.watchlist {
        config.companies = load_watchlist(path)?;
    }
    Ok(Updater::new(source, config))
}

fn schedules_for(command: &Command) -> Result<Vec<Schedule>, FsError> {
    match command {
        Command::Daily { at, .. } => Ok(vec![Schedule::daily(at)?]),
        Command::Weekly { day, at, .. } => Ok(vec![Schedule::weekly(day, at)?]),
        Command::Schedule { daily, weekly, .. } => {
            let mut out = Vec::with_capacity(daily.len() + weekly.len());
            for at in daily {
                out.push(Schedule::daily(at)?);
            }
            for spec in weekly {
                out.push(Schedule::parse_weekly(spec)?);
            }
            if out.is_empty() {
                return Err(FsError::InvalidSchedule(
                    "give at least one --daily or --weekly".into(),
                ));
            }
            Ok(out)
        }
        _ => Ok(Vec::new()),
    }
}

async fn run(cli: Cli) -> Result<ExitCode, FsError> {
    let updater = build_updater(&cli)?;

    match &cli.command {
        Command::List => {
            for c in updater.companies() {
                println!("{}\t{}", c.symbol, c.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::UpdateAll => {
            let report = updater.update_all().await;
            for o in &report.updated {
                for path in &o.written {
                    println!("{}: {}", o.symbol, path.display());
                }
            }
            for (symbol, e) in &report.failed {
                eprintln!("{symbol}: {e}");
            }
            Ok(if report.failed.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Update { symbol } => {
            let outcome = updater.update_symbol(&symbol.to_uppercase()).await?;
            for path in &outcome.written {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Daily { run_now, .. }
        | Command::Weekly { run_now, .. }
        | Command::Schedule { run_now, .. } => {
            let mut scheduler = Scheduler::new();
            let now = Local::now().naive_local();
            for schedule in schedules_for(&cli.command)? {
                scheduler.add(schedule, now);
            }

            for schedule in scheduler.schedules() {
                println!("scheduled: {schedule}");
            }
            tracing::info!(
                out_dir = %updater.config().out_dir.display(),
                companies = updater.companies().len(),
                "scheduler configured"
            );

            let updater = &updater;
            if *run_now {
                updater.update_all().await;
            }
            scheduler
                .run(move || async move {
                    updater.update_all().await;
                })
                .await;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.log_file.as_deref()) {
        eprintln!("cannot open log file: {e}");
        return ExitCode::FAILURE;
    }
    tracing::debug!(?cli, "command line parsed");

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "finsight failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

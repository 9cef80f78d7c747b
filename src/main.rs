use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::Result;
use serde::Serialize;

use fleet_advisor::advisor::{AdvisorSettings, AdvisoryProxy, AsyncAiProvider, Generator};
use fleet_advisor::config;
use fleet_advisor::error::AdvisorError;
use fleet_advisor::fleet::MaintenanceCase;
use fleet_advisor::render;

/// AI-assisted route and maintenance advice for fleet operators
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print the advisory as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to ~/.config/fleet-advisor/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log proxy decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suggest logistics hubs matching a partial place name
    Places {
        query: String,
    },
    /// Suggest a route between two places
    Route {
        origin: String,
        destination: String,
        #[arg(long, default_value = "Truck")]
        vehicle_type: String,
    },
    /// Forecast upcoming maintenance from a vehicle + history JSON file
    Maintenance {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.verbose);

    let config_result = config::load_config(args.config.as_deref())?;
    if let Some(warning) = &config_result.warning {
        log::warn!("{}; using defaults", warning);
    }
    let config = config_result.config;

    let provider = AsyncAiProvider::from_config_or_offline(&config.ai);
    let proxy = AdvisoryProxy::new(provider, AdvisorSettings::from(&config.advisor));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(run(args.command, &proxy, args.json))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    Ok(())
}

/// stderr logger; `RUST_LOG` wins over the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

async fn run<G: Generator>(
    command: Command,
    proxy: &AdvisoryProxy<G>,
    json: bool,
) -> Result<String> {
    let output = match command {
        Command::Places { query } => {
            let advisory = proxy.suggest_places(&query).await;
            present(&advisory, json, render::render_places)?
        }
        Command::Route {
            origin,
            destination,
            vehicle_type,
        } => {
            let advisory = proxy
                .optimize_route(&origin, &destination, &vehicle_type)
                .await;
            present(&advisory, json, render::render_route)?
        }
        Command::Maintenance { file } => {
            let case = read_case(&file)?;
            let history = case.vehicle_history();
            let advisory = proxy.predict_maintenance(&case.vehicle, &history).await;
            present(&advisory, json, render::render_forecast)?
        }
    };
    Ok(output)
}

fn present<T: Serialize>(value: &T, json: bool, text: fn(&T) -> String) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}

fn read_case(path: &Path) -> Result<MaintenanceCase, AdvisorError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| AdvisorError::InvalidInput(format!("{}: {}", path.display(), e)))
}

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "gatetime", version, about = "Gatetime: when to leave for your flight")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or search sample flights
    Flights {
        /// Flight number, airline, airport code or city
        query: Option<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List or search sample origins
    Origins {
        /// Part of a label or address
        query: Option<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute a leave time and itinerary for a flight
    Plan(commands::plan::PlanArgs),
    /// Replay progress reports and show the recalculated plan
    Track(commands::plan::TrackArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("GATETIME_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Flights { query, json } => commands::catalog::flights(query.as_deref(), json),
        Commands::Origins { query, json } => commands::catalog::origins(query.as_deref(), json),
        Commands::Plan(args) => commands::plan::plan(args),
        Commands::Track(args) => commands::plan::track(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

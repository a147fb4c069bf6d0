use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "summitpace", version, about = "SummitPace trip pacing CLI")]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict arrival times from the trailhead
    Plan(commands::plan::PlanArgs),
    /// Revise predictions from reported checkpoints
    Update(commands::track::TrackArgs),
    /// Performance ratios and fatigue factors for reported checkpoints
    Fatigue(commands::track::TrackArgs),
    /// Original against adjusted ascent and descent paces
    Paces(commands::paces::PacesArgs),
    /// Route waypoints and legs
    Route(commands::route::RouteArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Update(args) => commands::track::run_update(args),
        Commands::Fatigue(args) => commands::track::run_fatigue(args),
        Commands::Paces(args) => commands::paces::run(args),
        Commands::Route(args) => commands::route::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "summitpace", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fintrack::cli::{handle_check_command, run_demo, CheckCommand};
use fintrack::config::{paths::FintrackPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "In-memory user accounts and personal transaction tracking",
    long_about = "fintrack manages users with validated credentials and the income, \
                  expense and investment transactions they record. Data lives only \
                  for the duration of a run."
)]
struct Cli {
    /// Log filter directive (overrides the configured one)
    #[arg(long, env = "FINTRACK_LOG", global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted demonstration
    Demo {
        /// Print a JSON snapshot of the final state
        #[arg(long)]
        export: bool,
    },

    /// Check credentials against the validation policies
    #[command(subcommand)]
    Check(CheckCommand),

    /// Show current configuration and paths
    Config {
        /// Write the resolved settings to the config file
        #[arg(long)]
        save: bool,
    },
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("fintrack=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let paths = FintrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_tracing(cli.log.as_deref().unwrap_or(&settings.log_filter));

    match cli.command {
        Some(Commands::Demo { export }) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            run_demo(&settings, &mut out, export)?;
        }
        Some(Commands::Check(cmd)) => {
            if !handle_check_command(cmd) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Config { save }) => {
            if save {
                settings.save(&paths)?;
                println!("Saved settings to {}", paths.settings_file().display());
                println!();
            }

            println!("fintrack Configuration");
            println!("======================");
            println!("Config file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Log filter:      {}", settings.log_filter);
            println!("  Date format:     {}", settings.date_format);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("fintrack - user accounts and transaction tracking");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack demo' to see every operation in action.");
        }
    }

    Ok(ExitCode::SUCCESS)
}

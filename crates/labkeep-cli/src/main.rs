use clap::{Parser, Subcommand};
use labkeep_cli::cmd::{self, config::ConfigSubcommand};
use labkeep_cli::settings::{self, RunnerOverrides};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "labkeep",
    about = "In-memory record keeping for AI experiments and clinic appointments",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./labkeep.yaml if present)
    #[arg(long, global = true, env = "LABKEEP_CONFIG")]
    config: Option<PathBuf>,

    /// Render listings as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track projects and simulated experiment runs
    Lab {
        /// Skip the simulated training delay
        #[arg(long)]
        fast: bool,

        /// Seed for reproducible delays and metrics
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Register patients and schedule appointments
    Clinic,

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = settings::load_config(cli.config.as_deref())?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Lab { fast, seed } => {
            config.ensure_valid()?;
            let runner = settings::runner_config(&config, RunnerOverrides { fast, seed });
            cmd::lab::run(stdin.lock(), stdout.lock(), runner, cli.json)
        }
        Commands::Clinic => cmd::clinic::run(stdin.lock(), stdout.lock(), cli.json),
        Commands::Config { subcommand } => cmd::config::run(&mut stdout, &config, subcommand, cli.json),
    }
}

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use finalhour_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod host;

#[derive(Parser)]
#[command(
    name = "finalhour",
    version,
    about = "Till the Final Hour: a three-day countdown clock",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    run: commands::run::RunArgs,
    /// Config file (default: ~/.config/finalhour/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
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

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FINALHOUR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn config_path(cli_path: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match cli_path {
        Some(path) => Ok(path),
        None => Ok(Config::default_path()?),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Config { action }) => {
            config_path(cli.config).and_then(|path| commands::config::run(action, &path))
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "finalhour", &mut std::io::stdout());
            Ok(())
        }
        None => {
            let config = match cli.config {
                Some(path) => Config::load_from(&path),
                None => Config::load(),
            };
            config
                .map_err(Into::into)
                .and_then(|config| commands::run::run(cli.run, config))
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

use std::path::Path;

use clap::Subcommand;
use finalhour_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.interval-short", "labels.dawn")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value; hour lists accept "6,12,18"
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(path)?;
            config.set(&key, &value)?;
            config.save_to(path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load_from(path)?;
            let toml = toml::to_string_pretty(&config)?;
            print!("{toml}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save_to(path)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}

//! Configuration commands.

use clap::Subcommand;

use recharge_core::storage::Config;
use recharge_core::HealthProvider;

use super::common::{self, Error};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Set a configuration value
    Set {
        /// One of: baseline, health-provider, notifications,
        /// sedentary-threshold
        key: String,
        value: String,
    },
    /// Delete all stored engine state (activities, missions, character,
    /// streak, history)
    WipeData {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Error> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Set { key, value } => set(&key, &value)?,
        ConfigAction::WipeData { yes } => {
            if !yes {
                return Err("pass --yes to confirm wiping all engine state".into());
            }
            let state = common::open_state()?;
            state.wipe();
            println!("All engine state removed.");
        }
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<(), Error> {
    let mut config = Config::load()?;
    match key {
        "baseline" => {
            let baseline: u8 = value.parse()?;
            if baseline > 100 {
                return Err("baseline must be 0..=100".into());
            }
            config.baseline = baseline;
        }
        "health-provider" => {
            config.health_provider = match value {
                "manual" => HealthProvider::Manual,
                "simulated" => HealthProvider::Simulated,
                other => return Err(format!("unknown provider '{other}'").into()),
            };
        }
        "notifications" => {
            config.notifications.enabled = value.parse()?;
        }
        "sedentary-threshold" => {
            let minutes: u32 = value.parse()?;
            if minutes == 0 {
                return Err("sedentary-threshold must be positive".into());
            }
            config.sedentary.threshold_minutes = minutes;
        }
        other => return Err(format!("unknown config key '{other}'").into()),
    }
    config.save()?;
    println!("{key} = {value}");
    Ok(())
}
